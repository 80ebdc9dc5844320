//! File layout of one `(region, experiment)` pair.

use std::fmt;
use std::path::PathBuf;

use gapfill_common::GlobalConfig;

use crate::error::{DineofError, Result};

/// Composite key partitioning the geographic area and the sampling run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExperimentKey {
    pub region: u32,
    pub experiment: String,
}

impl ExperimentKey {
    /// Build a key. The experiment id becomes a path component, so it must be
    /// non-empty and free of path separators.
    pub fn new(region: u32, experiment: impl Into<String>) -> Result<Self> {
        let experiment = experiment.into();
        if experiment.is_empty()
            || experiment == "."
            || experiment == ".."
            || experiment.contains(['/', '\\'])
        {
            return Err(DineofError::InvalidKey(format!(
                "experiment id '{}' is not a valid directory name",
                experiment
            )));
        }
        Ok(Self { region, experiment })
    }

    /// `{region}_{experiment}`, the stem of the init file and record copy.
    pub fn file_stem(&self) -> String {
        format!("{}_{}", self.region, self.experiment)
    }
}

impl fmt::Display for ExperimentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region {} experiment {}", self.region, self.experiment)
    }
}

/// Every path read or written for one experiment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentPaths {
    /// `{output_dir}/{region}`
    pub region_dir: PathBuf,
    /// Input dataset holding the PFT (and SST) fields, mask and time
    pub data_file: PathBuf,
    /// Cloud index used by DINEOF for cross-validation
    pub clouds_file: PathBuf,
    /// `{region_dir}/{reconstruction_dir}/{experiment}`
    pub reconstruction_dir: PathBuf,
    /// Reconstruction written by DINEOF
    pub results_file: PathBuf,
    /// EOF decomposition written by DINEOF
    pub eof_file: PathBuf,
    /// `{random_dir}/json/{region}_{experiment}.json`
    pub record_copy: PathBuf,
    /// `{random_dir}/{region}_{experiment}.init`
    pub init_file: PathBuf,
}

impl ExperimentPaths {
    pub fn resolve(config: &GlobalConfig, key: &ExperimentKey) -> Self {
        let files = &config.dineof;
        let region_dir = config.region_dir(key.region);
        let reconstruction_dir = region_dir
            .join(&files.reconstruction_dir)
            .join(&key.experiment);
        let stem = key.file_stem();

        Self {
            data_file: region_dir.join(&files.data_file),
            clouds_file: region_dir.join(&files.clouds_file),
            results_file: reconstruction_dir.join(&files.results_file),
            eof_file: reconstruction_dir.join(&files.eof_file),
            record_copy: files.json_dir().join(format!("{}.json", stem)),
            init_file: files.random_dir.join(format!("{}.init", stem)),
            reconstruction_dir,
            region_dir,
        }
    }

    /// Input files that must exist before DINEOF can run.
    pub fn inputs(&self) -> [&PathBuf; 2] {
        [&self.data_file, &self.clouds_file]
    }
}
