//! Configuration lookup through GAPFILL_CONFIG.
//!
//! Kept in its own test binary: the environment is process-wide.

use std::fs;

use dineof_init::resolve_config;
use gapfill_common::{GlobalConfig, CONFIG_ENV_VAR};

#[test]
fn test_resolve_config_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let env_file = dir.path().join("env.yaml");
    let flag_file = dir.path().join("flag.yaml");
    fs::write(&env_file, "pft: [DINO]\n").unwrap();
    fs::write(&flag_file, "pft: [GREEN, PROKAR]\n").unwrap();

    // variable set: used when no path is given
    std::env::set_var(CONFIG_ENV_VAR, &env_file);
    assert_eq!(resolve_config(None).unwrap().pft, vec!["DINO".to_string()]);

    // an explicit path wins over the variable
    let config = resolve_config(Some(flag_file.as_path())).unwrap();
    assert_eq!(config.pft, vec!["GREEN".to_string(), "PROKAR".to_string()]);

    // variable naming an invalid file is an error, not a silent fallback
    fs::write(&env_file, "pft: []\n").unwrap();
    let err = resolve_config(None).unwrap_err();
    assert!(err.to_string().contains(CONFIG_ENV_VAR));

    // variable unset: validated defaults
    std::env::remove_var(CONFIG_ENV_VAR);
    assert_eq!(resolve_config(None).unwrap(), GlobalConfig::default());
}
