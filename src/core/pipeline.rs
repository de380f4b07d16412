// pipeline.rs - parse -> filter -> annotate -> select in one pass

use crate::core::annotate::{annotate_owned, count_incomplete};
use crate::core::filter::{filter, HitSelection, Thresholds};
use crate::data::loaders::{self, MalformedRowPolicy, ParseOutcome};
use crate::data::AnnotatedHit;
use crate::error::Result;
use serde::Serialize;
use std::path::Path;

/// Where the tabular results come from
#[derive(Debug, Clone, Copy)]
pub enum ResultSource<'a> {
    Path(&'a Path),
    Bytes { data: &'a [u8], name: &'a str },
}

/// Settings for one pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub thresholds: Thresholds,
    pub policy: MalformedRowPolicy,
    pub selection: HitSelection,
}

/// Row counts at each stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub total_rows: usize,
    pub skipped_rows: usize,
    pub passed_thresholds: usize,
    pub selected: usize,
    /// Selected hits missing a gene or family token
    pub incomplete_annotations: usize,
}

#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub hits: Vec<AnnotatedHit>,
    pub report: PipelineReport,
}

/// Run the full transform on one dataset. Nothing is retained between calls.
pub fn run_pipeline(source: ResultSource<'_>, options: &PipelineOptions) -> Result<PipelineResult> {
    let outcome = match source {
        ResultSource::Path(path) => loaders::parse_path(path, options.policy)?,
        ResultSource::Bytes { data, name } => loaders::parse_bytes(data, name, options.policy)?,
    };
    Ok(process_outcome(outcome, options))
}

/// Apply thresholds, annotation and selection to already-parsed hits
pub fn process_outcome(outcome: ParseOutcome, options: &PipelineOptions) -> PipelineResult {
    let total_rows = outcome.hits.len() + outcome.skipped_rows.len();
    let passed = filter(&outcome.hits, &options.thresholds);
    let passed_thresholds = passed.len();

    let mut hits = annotate_owned(passed);
    let removed = options.selection.apply(&mut hits);
    if removed > 0 {
        log::debug!("Gene/family selection removed {} hits", removed);
    }

    let report = PipelineReport {
        total_rows,
        skipped_rows: outcome.skipped_rows.len(),
        passed_thresholds,
        selected: hits.len(),
        incomplete_annotations: count_incomplete(&hits),
    };
    log::debug!("Pipeline report: {:?}", report);

    PipelineResult { hits, report }
}
