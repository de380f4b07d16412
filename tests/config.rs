// config.rs - Configuration file loading and CLI precedence

use argscan::cli::{validate_args, Args, Config, InputMode, QueryInput};
use argscan::core::ThresholdMode;
use argscan::data::loaders::MalformedRowPolicy;
use argscan::error::ArgScanError;
use std::fs;

#[test]
fn test_config_file_fills_unset_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("argscan.toml");
    fs::write(
        &path,
        r#"
results = "hits.txt"
min_identity = 90.0
max_evalue = 1e-10
threshold_mode = "strict"
on_malformed = "skip"
include_family = "lactamase"
"#,
    )
    .unwrap();

    let args = Args {
        max_evalue: Some("1e-3".to_string()),
        ..Args::default()
    };
    let merged = args.with_config_file(path.to_str().unwrap()).unwrap();
    let validated = validate_args(&merged).unwrap();

    assert_eq!(validated.thresholds.min_identity(), 90.0);
    assert_eq!(validated.thresholds.max_evalue(), 1e-3);
    assert_eq!(validated.thresholds.mode(), ThresholdMode::Strict);
    assert_eq!(validated.policy, MalformedRowPolicy::Skip);
    assert!(validated.selection.family_include.is_some());
}

#[test]
fn test_config_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.toml");
    let config = Config {
        db: Some("/data/card".to_string()),
        threads: Some(8),
        timeout: Some(600),
        ..Config::default()
    };
    config.to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.db.as_deref(), Some("/data/card"));
    assert_eq!(loaded.threads, Some(8));
    assert_eq!(loaded.timeout, Some(600));
    assert!(loaded.results.is_none());
}

#[test]
fn test_bad_toml_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "min_identity = \"not closed\n").unwrap();

    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, ArgScanError::Config { .. }));
}

#[test]
fn test_cli_query_overrides_config_results() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("argscan.toml");
    fs::write(&path, "results = \"old_results.txt\"\nthreads = 2\n").unwrap();

    let args = Args {
        query: Some("sample.fasta".to_string()),
        db: Some("db/card".to_string()),
        ..Args::default()
    };
    let merged = args.with_config_file(path.to_str().unwrap()).unwrap();
    let validated = validate_args(&merged).unwrap();

    assert!(matches!(validated.input, InputMode::Query(QueryInput::Fasta(_))));
    assert_eq!(validated.search.unwrap().threads, 2);
}
