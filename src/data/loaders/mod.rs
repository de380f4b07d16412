// mod.rs - Result file loaders

pub mod tsv;

pub use tsv::{parse_bytes, parse_path, parse_reader, MalformedRowPolicy, ParseOutcome, SkippedRow};
