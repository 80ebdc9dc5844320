//! Common test fixtures for gap-filling tests.
//!
//! This module provides pre-defined parameter records and a configuration
//! rooted in a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use gapfill_common::GlobalConfig;

/// Parameter records as stored by the upstream random sampling.
pub mod records {
    /// Reference scenario: SST enabled, 10 modes.
    pub const SCENARIO_JSON: &str = r#"{
  "sst": true,
  "numit": 5,
  "alpha": 0.01,
  "filter_extent": 1.2,
  "rec": 1,
  "norm": 0,
  "nev": 10
}"#;

    /// PFTs only.
    pub const NO_SST_JSON: &str = r#"{
  "sst": false,
  "numit": 3,
  "alpha": 0.5,
  "filter_extent": 0.8,
  "rec": 0,
  "norm": 1,
  "nev": 4
}"#;

    /// Out-of-range values that must pass through unchanged.
    pub const ZERO_MODES_JSON: &str = r#"{
  "sst": false,
  "numit": 0,
  "alpha": -1.0,
  "filter_extent": 1.0,
  "rec": 2,
  "norm": 0,
  "nev": 0
}"#;

    /// Record carrying a field the generator does not know about.
    pub const EXTRA_FIELD_JSON: &str = r#"{
  "sst": true,
  "numit": 5,
  "alpha": 0.01,
  "filter_extent": 1.2,
  "rec": 1,
  "norm": 0,
  "nev": 10,
  "sample_id": 42
}"#;

    /// Missing `nev`.
    pub const INCOMPLETE_JSON: &str = r#"{"sst": true, "numit": 5}"#;
}

/// Reference experiment key.
pub mod experiment {
    pub const REGION: u32 = 3;
    pub const EXPERIMENT: &str = "7";
}

/// Default configuration with every writable location under `root`.
///
/// Region directories go to `{root}/regions` and init files to
/// `{root}/random`.
pub fn sample_config(root: &Path) -> GlobalConfig {
    let mut config = GlobalConfig::default().with_random_dir(root.join("random"));
    config.paths.work_dir = root.to_path_buf();
    config.paths.data_dir = root.join("data");
    config.paths.output_dir = root.join("regions");
    config
}

/// Write a record where `config` expects to find it and return the path.
pub fn write_record(config: &GlobalConfig, json: &str) -> PathBuf {
    let path = config.dineof.record_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create record directory");
    }
    fs::write(&path, json).expect("Failed to write record fixture");
    path
}
