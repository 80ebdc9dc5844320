//! Writes the files of one experiment.

use std::fs;
use std::path::Path;

use gapfill_common::GlobalConfig;
use tracing::{debug, info, instrument, warn};

use crate::error::{DineofError, Result};
use crate::layout::{ExperimentKey, ExperimentPaths};
use crate::record::ParameterRecord;
use crate::template::{selected_variables, InitFile};

/// Outcome of a generator run.
#[derive(Debug, Clone)]
pub struct GeneratedExperiment {
    pub key: ExperimentKey,
    pub paths: ExperimentPaths,
    pub variables: Vec<String>,
    pub init: InitFile,
}

/// Load the stored record and generate the experiment files.
pub fn generate(config: &GlobalConfig, key: &ExperimentKey) -> Result<GeneratedExperiment> {
    let record_path = config.dineof.record_path();
    debug!(path = %record_path.display(), "Loading parameter record");
    let record = ParameterRecord::load(&record_path)?;
    generate_with_record(config, key, &record)
}

/// Generate the experiment files for an already loaded record.
///
/// Creates the reconstruction directory (no error if it exists), archives the
/// record as `{random_dir}/json/{stem}.json` and writes
/// `{random_dir}/{stem}.init`. Existing files are overwritten.
#[instrument(skip(config, record), fields(region = key.region, experiment = %key.experiment))]
pub fn generate_with_record(
    config: &GlobalConfig,
    key: &ExperimentKey,
    record: &ParameterRecord,
) -> Result<GeneratedExperiment> {
    for note in record.suspect_values() {
        warn!(%note, "Suspicious parameter passed through unchanged");
    }

    let paths = ExperimentPaths::resolve(config, key);
    for input in paths.inputs() {
        if !input.is_file() {
            return Err(DineofError::MissingInput(input.clone()));
        }
    }

    create_dir(&paths.reconstruction_dir)?;

    ensure_parent(&paths.record_copy)?;
    record.save(&paths.record_copy)?;
    debug!(path = %paths.record_copy.display(), "Archived parameter record");

    let variables = selected_variables(config, record);
    let init = InitFile::build(&variables, record, &paths, &config.dineof);
    ensure_parent(&paths.init_file)?;
    fs::write(&paths.init_file, init.render())
        .map_err(|e| DineofError::write(&paths.init_file, e))?;

    info!(
        init_file = %paths.init_file.display(),
        variables = variables.len(),
        nev = init.nev,
        ncv = init.ncv,
        "Generated DINEOF configuration"
    );

    Ok(GeneratedExperiment {
        key: key.clone(),
        paths,
        variables,
        init,
    })
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| DineofError::write(path, e))
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => create_dir(parent),
        _ => Ok(()),
    }
}
