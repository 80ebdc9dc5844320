//! DINEOF configuration generator.
//!
//! Turns a stored parameter record into everything the external DINEOF
//! binary needs for one `(region, experiment)` pair:
//!
//! ```text
//! random/params.json ──► ParameterRecord
//!                              │
//!   GlobalConfig ──► ExperimentPaths::resolve(region, experiment)
//!                              │
//!                              ├─► mkdir  {output_dir}/{region}/dineof/{experiment}/
//!                              ├─► write  random/json/{region}_{experiment}.json
//!                              └─► write  random/{region}_{experiment}.init
//! ```
//!
//! The init text itself comes from [`InitFile::render`], a pure function,
//! so the template is testable without touching the filesystem.
//!
//! Numeric parameters are not range-checked: whatever the record holds is
//! written to the init file. Suspicious values are logged as warnings.

pub mod error;
pub mod generator;
pub mod layout;
pub mod record;
pub mod template;

pub use error::{DineofError, Result};
pub use generator::{generate, generate_with_record, GeneratedExperiment};
pub use layout::{ExperimentKey, ExperimentPaths};
pub use record::ParameterRecord;
pub use template::{selected_variables, InitFile};
