// mod.rs - CSV export of annotated hits

pub mod report;

use crate::data::hit::{format_evalue, TABULAR_HEADER};
use crate::data::AnnotatedHit;
use crate::error::{ArgScanError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use report::{format_hit_table, format_family_table, write_summary_json, RunSummary};

/// Which columns go into the exported CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputColumns {
    /// gene, family, identity, evalue
    #[default]
    Minimal,
    /// the 12 tabular columns followed by gene, family
    Full,
}

impl FromStr for OutputColumns {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimal" | "summary" => Ok(OutputColumns::Minimal),
            "full" | "all" => Ok(OutputColumns::Full),
            _ => Err(format!("Invalid output columns: {}. Use: minimal, full", s)),
        }
    }
}

impl OutputColumns {
    pub fn header(&self) -> Vec<&'static str> {
        match self {
            OutputColumns::Minimal => vec!["gene", "family", "identity", "evalue"],
            OutputColumns::Full => {
                let mut header = TABULAR_HEADER.to_vec();
                header.push("gene");
                header.push("family");
                header
            }
        }
    }

    fn record(&self, hit: &AnnotatedHit) -> Vec<String> {
        match self {
            OutputColumns::Minimal => vec![
                hit.gene().to_string(),
                hit.family().to_string(),
                hit.hit.identity.to_string(),
                format_evalue(hit.hit.evalue),
            ],
            OutputColumns::Full => {
                let mut record = hit.hit.to_record().to_vec();
                record.push(hit.gene().to_string());
                record.push(hit.family().to_string());
                record
            }
        }
    }
}

/// Write a header row and one CSV row per hit
pub fn serialize_to_writer<W: Write>(
    hits: &[AnnotatedHit],
    columns: OutputColumns,
    writer: W,
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(columns.header())?;
    for hit in hits {
        csv_writer.write_record(columns.record(hit))?;
    }
    csv_writer
        .flush()
        .map_err(|e| ArgScanError::io("flushing CSV output", e))?;
    Ok(())
}

/// Serialize to an in-memory CSV byte stream
pub fn serialize_to_bytes(hits: &[AnnotatedHit], columns: OutputColumns) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    serialize_to_writer(hits, columns, &mut buffer)?;
    Ok(buffer)
}

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|e| {
                ArgScanError::io(format!("creating parent directory '{}'", parent.display()), e)
            })?;
        }
    }
    Ok(())
}

/// Write annotated hits as CSV to `file_path`
pub fn write_csv_file(file_path: &Path, hits: &[AnnotatedHit], columns: OutputColumns) -> Result<()> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path).map_err(|e| {
        ArgScanError::io(format!("creating output file '{}'", file_path.display()), e)
    })?;
    serialize_to_writer(hits, columns, BufWriter::new(file))?;
    log::debug!("Wrote {} rows to {}", hits.len(), file_path.display());
    Ok(())
}

/// Default export path: `filtered_<stem>.csv` beside the input
pub fn derive_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "results".to_string());
    let file_name = format!("filtered_{}.csv", stem);
    match input.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}
