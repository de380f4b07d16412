// lib.rs - argscan library root

//! # argscan - Antibiotic resistance gene screening of BLAST results
//!
//! Turns BLAST+ tabular output (`-outfmt 6`) against a reference ARG database into a
//! filtered, annotated table of resistance gene hits.
//!
//! ## Features
//!
//! - **Threshold filtering**: minimum percent identity and maximum e-value, inclusive or strict
//! - **Annotation**: gene and resistance family read from `|`-delimited subject identifiers
//! - **Malformed rows**: fail fast or skip with a warning
//! - **BLAST driver**: optional search of a query FASTA with a bounded timeout
//! - **Reports**: CSV export, terminal tables and a JSON run summary
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use argscan::prelude::*;
//!
//! let options = PipelineOptions {
//!     thresholds: Thresholds::new(70.0, 1e-5, ThresholdMode::Inclusive)?,
//!     ..PipelineOptions::default()
//! };
//! let result = run_pipeline(ResultSource::Path(std::path::Path::new("results.txt")), &options)?;
//!
//! write_csv_file(
//!     std::path::Path::new("filtered_results.csv"),
//!     &result.hits,
//!     OutputColumns::Minimal,
//! )?;
//! # Ok::<(), argscan::ArgScanError>(())
//! ```

// Re-export all main modules
pub mod blast;
pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::blast::{BlastConfig, BlastProgram, BlastRunner};
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{annotate, filter, run_pipeline, summarize_families};
    pub use crate::core::{HitSelection, PipelineOptions, ResultSource, ThresholdMode, Thresholds};
    pub use crate::data::loaders::{parse_bytes, parse_path, MalformedRowPolicy};
    pub use crate::data::{AlignmentHit, AnnotatedHit, MoleculeType, QuerySequence, SubjectFields};
    pub use crate::error::{ArgScanError, Result};
    pub use crate::output::{serialize_to_bytes, write_csv_file, OutputColumns};
}

// Re-export main types at the root level for convenience
pub use cli::{Args, ValidationResult};
pub use core::{PipelineOptions, PipelineReport, ThresholdMode, Thresholds};
pub use data::{AlignmentHit, AnnotatedHit, SubjectFields};
pub use error::{ArgScanError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "argscan v{} - Antibiotic resistance gene screening of BLAST results",
        VERSION
    )
}
