// report.rs - Terminal tables and JSON run summaries

use crate::core::summary::{rank_hits, FamilySummary};
use crate::core::{PipelineReport, ThresholdMode, Thresholds};
use crate::data::hit::format_evalue;
use crate::data::AnnotatedHit;
use crate::error::{ArgScanError, Result};
use serde::Serialize;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Top hits as an aligned text table, best first
pub fn format_hit_table(hits: &[AnnotatedHit], limit: usize) -> String {
    let ranked = rank_hits(hits);
    let shown = &ranked[..ranked.len().min(limit)];

    let gene_width = shown.iter().map(|h| h.gene().len()).max().unwrap_or(0).max(4);
    let family_width = shown.iter().map(|h| h.family().len()).max().unwrap_or(0).max(6);

    let mut output = String::new();
    let _ = writeln!(
        output,
        "{:<gw$}  {:<fw$}  {:>8}  {:>10}",
        "gene",
        "family",
        "identity",
        "evalue",
        gw = gene_width,
        fw = family_width
    );
    for hit in shown {
        let _ = writeln!(
            output,
            "{:<gw$}  {:<fw$}  {:>8.2}  {:>10}",
            hit.gene(),
            hit.family(),
            hit.hit.identity,
            format_evalue(hit.hit.evalue),
            gw = gene_width,
            fw = family_width
        );
    }
    if ranked.len() > shown.len() {
        let _ = writeln!(output, "... {} more hits not shown", ranked.len() - shown.len());
    }
    output
}

/// One line per resistance family
pub fn format_family_table(summaries: &[FamilySummary]) -> String {
    let mut output = String::new();
    for summary in summaries {
        let _ = writeln!(
            output,
            "  • {}: {} hit(s), best identity {:.1}% [{}]",
            summary.family,
            summary.hits,
            summary.best_identity,
            summary.genes.join(", ")
        );
    }
    output
}

/// Machine-readable record of one run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub tool_version: String,
    pub generated: String,
    pub input: String,
    pub output: Option<String>,
    pub min_identity: f64,
    pub max_evalue: f64,
    pub threshold_mode: ThresholdMode,
    pub counts: PipelineReport,
    pub families: Vec<FamilySummary>,
}

impl RunSummary {
    pub fn new(
        input: &Path,
        output: Option<&Path>,
        thresholds: &Thresholds,
        counts: PipelineReport,
        families: Vec<FamilySummary>,
    ) -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            generated: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            input: input.display().to_string(),
            output: output.map(|p| p.display().to_string()),
            min_identity: thresholds.min_identity(),
            max_evalue: thresholds.max_evalue(),
            threshold_mode: thresholds.mode(),
            counts,
            families,
        }
    }
}

/// Write the run summary as pretty-printed JSON
pub fn write_summary_json(path: &Path, summary: &RunSummary) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| ArgScanError::io(format!("creating summary file '{}'", path.display()), e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writer
        .flush()
        .map_err(|e| ArgScanError::io(format!("flushing summary file '{}'", path.display()), e))?;
    Ok(())
}
