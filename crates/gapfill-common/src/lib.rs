//! Common types and configuration shared across the gap-filling crates.
//!
//! The [`GlobalConfig`] is the parameter store: directory layout, analysis
//! period, geographic bounds, the Phytoplankton Functional Type (PFT)
//! variables and the renaming tables used during pre/post-processing. It is
//! built once (from defaults or a YAML file) and passed by reference.

pub mod bbox;
pub mod error;
pub mod loader;
pub mod params;
pub mod time;

pub use bbox::GeoBounds;
pub use error::{ConfigError, Result};
pub use loader::{load_config, CONFIG_ENV_VAR};
pub use params::{DineofFiles, GlobalConfig, PathsConfig};
pub use time::{DateRange, ExpeditionWindow};
