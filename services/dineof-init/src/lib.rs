//! Generates the DINEOF configuration of one experiment.

use std::path::Path;

use anyhow::{Context, Result};
use dineof_config::{generate, ExperimentKey, GeneratedExperiment};
use gapfill_common::{load_config, GlobalConfig, CONFIG_ENV_VAR};
use tracing::info;

/// Load the configuration from `path`.
///
/// Without a path the file named by `GAPFILL_CONFIG` is used, or the
/// built-in defaults when that is unset. Every branch is validated.
pub fn resolve_config(path: Option<&Path>) -> Result<GlobalConfig> {
    match path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => GlobalConfig::from_env().with_context(|| {
            format!("Failed to load configuration named by {}", CONFIG_ENV_VAR)
        }),
    }
}

/// Write the init file and record copy for `(region, experiment)`.
pub fn run(config: &GlobalConfig, region: u32, experiment: &str) -> Result<GeneratedExperiment> {
    let key = ExperimentKey::new(region, experiment)?;
    let generated =
        generate(config, &key).with_context(|| format!("Failed to generate {}", key))?;
    info!(
        region,
        experiment,
        init_file = %generated.paths.init_file.display(),
        record_copy = %generated.paths.record_copy.display(),
        "Experiment ready"
    );
    Ok(generated)
}
