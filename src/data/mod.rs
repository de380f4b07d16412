// mod.rs - Data structures module

pub mod hit;
pub mod loaders;
pub mod query;

// Re-export main types for convenience
pub use hit::{AlignmentHit, AnnotatedHit, SubjectFields, TABULAR_COLUMNS, TABULAR_HEADER};
pub use query::{MoleculeType, QuerySequence};
