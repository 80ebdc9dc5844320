//! Integration tests: generate experiment files into a temporary workspace.

use std::fs;
use std::path::Path;

use dineof_config::{
    generate, generate_with_record, DineofError, ExperimentKey, ExperimentPaths, ParameterRecord,
};
use gapfill_common::GlobalConfig;
use test_utils::{experiment, records, sample_config, write_record};

/// Create the region inputs DINEOF reads.
fn prepare_region(config: &GlobalConfig, region: u32) {
    let dir = config.region_dir(region);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(&config.dineof.data_file), b"netcdf").unwrap();
    fs::write(dir.join(&config.dineof.clouds_file), b"netcdf").unwrap();
}

fn scenario_key() -> ExperimentKey {
    ExperimentKey::new(experiment::REGION, experiment::EXPERIMENT).unwrap()
}

fn directive(text: &str, name: &str) -> String {
    let prefix = format!("{} = ", name);
    text.lines()
        .find_map(|line| line.strip_prefix(prefix.as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| panic!("missing directive {}", name))
}

fn entry_count(text: &str, name: &str) -> usize {
    directive(text, name).split(',').count()
}

#[test]
fn test_generate_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let config = sample_config(dir.path());
    prepare_region(&config, experiment::REGION);
    write_record(&config, records::SCENARIO_JSON);

    let generated = generate(&config, &scenario_key()).unwrap();

    assert_eq!(generated.variables.len(), 7);
    assert!(generated.paths.reconstruction_dir.is_dir());
    assert_eq!(
        generated.paths.init_file,
        dir.path().join("random").join("3_7.init")
    );

    let text = fs::read_to_string(&generated.paths.init_file).unwrap();
    assert_eq!(directive(&text, "nev"), "10");
    assert_eq!(directive(&text, "ncv"), "15");
    assert_eq!(entry_count(&text, "data"), 7);
    assert_eq!(entry_count(&text, "mask"), 7);
    assert_eq!(entry_count(&text, "results"), 7);
    assert_eq!(entry_count(&text, "EOF.U"), 7);
    assert_eq!(text, generated.init.render());
}

#[test]
fn test_generate_without_sst() {
    let dir = tempfile::tempdir().unwrap();
    let config = sample_config(dir.path());
    prepare_region(&config, 5);
    write_record(&config, records::NO_SST_JSON);

    let key = ExperimentKey::new(5, "12").unwrap();
    let generated = generate(&config, &key).unwrap();

    let text = fs::read_to_string(&generated.paths.init_file).unwrap();
    assert_eq!(entry_count(&text, "data"), config.pft.len());
    assert!(!directive(&text, "data").contains("#sst"));
    assert_eq!(directive(&text, "ncv"), "9");
    assert_eq!(directive(&text, "norm"), "1");
}

#[test]
fn test_record_copy_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let config = sample_config(dir.path());
    prepare_region(&config, experiment::REGION);
    let source = write_record(&config, records::EXTRA_FIELD_JSON);

    let generated = generate(&config, &scenario_key()).unwrap();

    let copy_path = dir.path().join("random").join("json").join("3_7.json");
    assert_eq!(generated.paths.record_copy, copy_path);

    let original = ParameterRecord::load(&source).unwrap();
    let copy = ParameterRecord::load(&copy_path).unwrap();
    assert_eq!(copy, original);
    assert_eq!(copy.extra["sample_id"], serde_json::json!(42));
}

#[test]
fn test_generate_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let config = sample_config(dir.path());
    prepare_region(&config, experiment::REGION);
    write_record(&config, records::SCENARIO_JSON);

    let first = generate(&config, &scenario_key()).unwrap();
    let first_text = fs::read_to_string(&first.paths.init_file).unwrap();

    // reconstruction directory already exists on the second run
    let second = generate(&config, &scenario_key()).unwrap();
    let second_text = fs::read_to_string(&second.paths.init_file).unwrap();
    assert_eq!(first_text, second_text);
}

#[test]
fn test_out_of_range_values_pass_through() {
    let dir = tempfile::tempdir().unwrap();
    let config = sample_config(dir.path());
    prepare_region(&config, experiment::REGION);
    write_record(&config, records::ZERO_MODES_JSON);

    let generated = generate(&config, &scenario_key()).unwrap();
    let text = fs::read_to_string(&generated.paths.init_file).unwrap();

    assert_eq!(directive(&text, "nev"), "0");
    assert_eq!(directive(&text, "ncv"), "5");
    assert_eq!(directive(&text, "numit"), "0");
    assert_eq!(directive(&text, "alpha"), "-1");
    assert_eq!(directive(&text, "rec"), "2");
}

#[test]
fn test_missing_record() {
    let dir = tempfile::tempdir().unwrap();
    let config = sample_config(dir.path());
    prepare_region(&config, experiment::REGION);

    let err = generate(&config, &scenario_key()).unwrap_err();
    match err {
        DineofError::Read { path, .. } => assert_eq!(path, config.dineof.record_path()),
        other => panic!("expected read error, got {:?}", other),
    }
}

#[test]
fn test_incomplete_record() {
    let dir = tempfile::tempdir().unwrap();
    let config = sample_config(dir.path());
    prepare_region(&config, experiment::REGION);
    write_record(&config, records::INCOMPLETE_JSON);

    assert!(matches!(
        generate(&config, &scenario_key()),
        Err(DineofError::Record { .. })
    ));
}

#[test]
fn test_missing_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let config = sample_config(dir.path());
    let record: ParameterRecord = serde_json::from_str(records::SCENARIO_JSON).unwrap();

    let err = generate_with_record(&config, &scenario_key(), &record).unwrap_err();
    let paths = ExperimentPaths::resolve(&config, &scenario_key());
    match err {
        DineofError::MissingInput(path) => assert_eq!(path, paths.data_file),
        other => panic!("expected missing input, got {:?}", other),
    }
    // nothing written
    assert!(!Path::new(&paths.init_file).exists());
    assert!(!paths.reconstruction_dir.exists());
}
