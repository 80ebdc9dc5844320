//! Configuration loader.
//!
//! Loads the YAML parameter store and validates it. Environment variables
//! can be referenced with `${VAR}` or `${VAR:-default}` anywhere in the file,
//! which is how the work directories are pointed at scratch space on HPC
//! nodes without editing the file.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{ConfigError, Result};
use crate::params::GlobalConfig;

/// Environment variable naming the YAML configuration file.
pub const CONFIG_ENV_VAR: &str = "GAPFILL_CONFIG";

/// Load, expand and validate a YAML configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GlobalConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_config(&content)?;
    info!(path = %path.display(), pft = ?config.pft, "Loaded configuration");
    Ok(config)
}

/// Parse configuration YAML from a string.
pub fn parse_config(content: &str) -> Result<GlobalConfig> {
    let expanded = expand_env_vars(content)?;
    let config: GlobalConfig = serde_yaml::from_str(&expanded)?;
    config.validate()?;
    Ok(config)
}

impl GlobalConfig {
    /// Load from the file named by `GAPFILL_CONFIG`, or use the defaults.
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.is_empty() => load_config(path),
            _ => {
                debug!("{} not set, using default configuration", CONFIG_ENV_VAR);
                let config = GlobalConfig::default();
                config.validate()?;
                Ok(config)
            }
        }
    }
}

// ============================================================================
// Environment Variable Expansion
// ============================================================================

/// Expand environment variables in YAML content.
/// Supports ${VAR} and ${VAR:-default} syntax
fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'

            let mut var_expr = String::new();
            let mut depth = 1;

            while depth > 0 {
                match chars.next() {
                    Some('{') => {
                        depth += 1;
                        var_expr.push('{');
                    }
                    Some('}') => {
                        depth -= 1;
                        if depth > 0 {
                            var_expr.push('}');
                        }
                    }
                    Some(c) => var_expr.push(c),
                    None => return Err(ConfigError::UnclosedVariable(var_expr)),
                }
            }

            result.push_str(&resolve_var_expr(&var_expr)?);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

/// Resolve a variable expression (`VAR` or `VAR:-default`).
fn resolve_var_expr(expr: &str) -> Result<String> {
    if let Some((name, default)) = expr.split_once(":-") {
        match std::env::var(name.trim()) {
            Ok(val) if !val.is_empty() => Ok(val),
            _ => Ok(default.to_string()),
        }
    } else {
        std::env::var(expr.trim()).map_err(|_| ConfigError::MissingVariable(expr.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_env_vars_simple() {
        std::env::set_var("GAPFILL_TEST_VAR", "scratch");
        let result = expand_env_vars("/${GAPFILL_TEST_VAR}/regions").unwrap();
        assert_eq!(result, "/scratch/regions");
    }

    #[test]
    fn test_expand_env_vars_with_default() {
        std::env::remove_var("GAPFILL_NONEXISTENT_VAR");
        let result = expand_env_vars("dir: ${GAPFILL_NONEXISTENT_VAR:-/tmp/work}").unwrap();
        assert_eq!(result, "dir: /tmp/work");
    }

    #[test]
    fn test_expand_env_vars_missing_required() {
        std::env::remove_var("GAPFILL_REQUIRED_VAR");
        let result = expand_env_vars("${GAPFILL_REQUIRED_VAR}");
        assert!(matches!(result, Err(ConfigError::MissingVariable(_))));
    }

    #[test]
    fn test_expand_env_vars_unclosed() {
        let result = expand_env_vars("path: ${HOME");
        assert!(matches!(result, Err(ConfigError::UnclosedVariable(_))));
    }

    #[test]
    fn test_dollar_without_brace_is_literal() {
        let result = expand_env_vars(r"units: '$\frac{mg}{m^{3}}$'").unwrap();
        assert_eq!(result, r"units: '$\frac{mg}{m^{3}}$'");
    }

    #[test]
    fn test_parse_partial_config() {
        let yaml = r#"
paths:
  output_dir: /scratch/regions
pft: [CHL, DIATO]
dineof:
  random_dir: /scratch/random
"#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.pft, vec!["CHL".to_string(), "DIATO".to_string()]);
        assert_eq!(config.paths.output_dir, Path::new("/scratch/regions"));
        assert_eq!(config.dineof.random_dir, Path::new("/scratch/random"));
        // untouched sections keep their defaults
        assert_eq!(config.dineof.data_file, "dineof_input.nc");
        assert_eq!(config.expedition.delta_days, 3);
    }

    #[test]
    fn test_parse_rejects_invalid() {
        let yaml = "pft: []\n";
        assert!(matches!(parse_config(yaml), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_parse_rejects_unrepresentable_expedition() {
        let yaml = "expedition: {start: 2018-05-10, end: 2018-06-09, delta_days: 200000000}\n";
        assert!(matches!(parse_config(yaml), Err(ConfigError::Invalid(_))));
    }
}
