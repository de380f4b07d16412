// mod.rs - Core filtering and annotation logic

pub mod annotate;
pub mod filter;
pub mod pipeline;
pub mod summary;

// Re-export main types for convenience
pub use annotate::{annotate, annotate_owned, count_incomplete};
pub use filter::{filter, HitSelection, ThresholdMode, Thresholds, DEFAULT_MAX_EVALUE, DEFAULT_MIN_IDENTITY};
pub use pipeline::{process_outcome, run_pipeline, PipelineOptions, PipelineReport, PipelineResult, ResultSource};
pub use summary::{rank_hits, summarize_families, FamilySummary, UNKNOWN_FAMILY};
