// pipeline.rs - End-to-end filtering of tabular results files

use argscan::core::{run_pipeline, PipelineOptions, ResultSource, ThresholdMode, Thresholds};
use argscan::data::loaders::MalformedRowPolicy;
use argscan::error::ArgScanError;
use argscan::output::{derive_output_path, write_csv_file, OutputColumns};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const RESULTS: &str = "\
q1\tARG|db|xyz|123|blaTEM|beta-lactamase\t85.5\t300\t2\t1\t1\t300\t1\t300\t1e-10\t550.0
q1\tARG|db|xyz|124|tetM|tetracycline\t65.0\t280\t40\t3\t5\t285\t2\t281\t1e-30\t300.0
q2\tARG|db|xyz|125|vanA|glycopeptide\t99.1\t1000\t9\t0\t1\t1000\t1\t1000\t0.0\t1800.0
q3\tARG|db|xyz|126|sul1|sulfonamide, folate\t91.0\t250\t22\t0\t1\t250\t1\t250\t1e-3\t200.0
q4\tshort|id\t100.0\t50\t0\t0\t1\t50\t1\t50\t1e-20\t90.0
";

fn write_results(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_results_file_to_csv() {
    let dir = tempdir().unwrap();
    let input = write_results(dir.path(), "results.txt", RESULTS);

    let result = run_pipeline(ResultSource::Path(&input), &PipelineOptions::default()).unwrap();
    assert_eq!(result.report.total_rows, 5);
    assert_eq!(result.report.passed_thresholds, 3);
    assert_eq!(result.report.selected, 3);

    let output = derive_output_path(&input);
    assert_eq!(output, dir.path().join("filtered_results.csv"));
    write_csv_file(&output, &result.hits, OutputColumns::Minimal).unwrap();

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, vec!["gene", "family", "identity", "evalue"]);

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);

    assert_eq!(&rows[0][0], "blaTEM");
    assert_eq!(&rows[0][1], "beta-lactamase");
    assert_eq!(rows[0][2].parse::<f64>().unwrap(), 85.5);
    assert_eq!(rows[0][3].parse::<f64>().unwrap(), 1e-10);

    assert_eq!(&rows[1][0], "vanA");
    assert_eq!(rows[1][3].parse::<f64>().unwrap(), 0.0);

    // identifier with too few tokens keeps the row with empty fields
    assert_eq!(&rows[2][0], "");
    assert_eq!(&rows[2][1], "");
    assert_eq!(rows[2][2].parse::<f64>().unwrap(), 100.0);
}

#[test]
fn test_comma_in_family_survives_round_trip() {
    let dir = tempdir().unwrap();
    let input = write_results(dir.path(), "results.txt", RESULTS);
    let options = PipelineOptions {
        thresholds: Thresholds::new(90.0, 1e-2, ThresholdMode::Inclusive).unwrap(),
        ..PipelineOptions::default()
    };

    let result = run_pipeline(ResultSource::Path(&input), &options).unwrap();
    let output = dir.path().join("out").join("hits.csv");
    write_csv_file(&output, &result.hits, OutputColumns::Full).unwrap();

    let mut reader = csv::Reader::from_path(&output).unwrap();
    assert_eq!(reader.headers().unwrap().len(), 14);
    let families: Vec<String> = reader
        .records()
        .map(|r| r.unwrap()[13].to_string())
        .collect();
    assert_eq!(families, vec!["glycopeptide", "sulfonamide, folate", ""]);
}

#[test]
fn test_empty_file_gives_header_only() {
    let dir = tempdir().unwrap();
    let input = write_results(dir.path(), "empty.txt", "");

    let result = run_pipeline(ResultSource::Path(&input), &PipelineOptions::default()).unwrap();
    assert!(result.hits.is_empty());
    assert_eq!(result.report.total_rows, 0);

    let output = derive_output_path(&input);
    write_csv_file(&output, &result.hits, OutputColumns::Minimal).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), "gene,family,identity,evalue\n");
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.txt");
    let err = run_pipeline(ResultSource::Path(&missing), &PipelineOptions::default()).unwrap_err();
    match err {
        ArgScanError::NotFound { path } => assert_eq!(path, missing),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_malformed_row_policies() {
    let dir = tempdir().unwrap();
    let content = format!("{}q9\tbroken\trow\n", RESULTS);
    let input = write_results(dir.path(), "mixed.txt", &content);

    let err = run_pipeline(ResultSource::Path(&input), &PipelineOptions::default()).unwrap_err();
    assert!(matches!(err, ArgScanError::Parse { line: 6, .. }));

    let options = PipelineOptions {
        policy: MalformedRowPolicy::Skip,
        ..PipelineOptions::default()
    };
    let result = run_pipeline(ResultSource::Path(&input), &options).unwrap();
    assert_eq!(result.report.skipped_rows, 1);
    assert_eq!(result.report.total_rows, 6);
    assert_eq!(result.hits.len(), 3);
}

#[test]
fn test_invalid_utf8_is_parse_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("binary.txt");
    fs::write(&input, [b'q', b'1', b'\t', 0xff, 0xfe, b'\n']).unwrap();

    let options = PipelineOptions {
        policy: MalformedRowPolicy::Skip,
        ..PipelineOptions::default()
    };
    let err = run_pipeline(ResultSource::Path(&input), &options).unwrap_err();
    assert!(matches!(err, ArgScanError::Parse { line: 1, .. }));
}
