// mod.rs - External BLAST+ collaborator

pub mod program;
pub mod runner;

// Re-export main types for convenience
pub use program::{detect_database_type, BlastProgram};
pub use runner::{BlastConfig, BlastRun, BlastRunner, DEFAULT_TIMEOUT_SECS};
