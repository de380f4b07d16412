// error.rs - Error types shared by every module

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by argscan operations
#[derive(Error, Debug)]
pub enum ArgScanError {
    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Parse error in {source_name} at line {line}: {message}")]
    Parse {
        source_name: String,
        line: usize,
        message: String,
    },

    #[error("Invalid threshold: {message}")]
    InvalidThreshold { message: String },

    #[error("External tool error: {tool} - {message}")]
    ExternalToolFailure { tool: String, message: String },

    #[error("External tool timeout: {tool} did not finish within {seconds}s")]
    ToolTimeout { tool: String, seconds: u64 },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ArgScanError {
    pub fn not_found<P: Into<PathBuf>>(path: P) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn parse<S: Into<String>>(source_name: S, line: usize, message: S) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            line,
            message: message.into(),
        }
    }

    pub fn invalid_threshold<S: Into<String>>(message: S) -> Self {
        Self::InvalidThreshold {
            message: message.into(),
        }
    }

    pub fn external_tool<S: Into<String>>(tool: S, message: S) -> Self {
        Self::ExternalToolFailure {
            tool: tool.into(),
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn io<S: Into<String>>(context: S, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Map an I/O error on `path`, turning `ErrorKind::NotFound` into `NotFound`
    pub fn from_io_at(path: &std::path::Path, context: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::not_found(path)
        } else {
            Self::io(format!("{} '{}'", context, path.display()), source)
        }
    }
}

/// Result type for argscan operations
pub type Result<T> = std::result::Result<T, ArgScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ArgScanError::invalid_threshold("identity must be within [0, 100]");
        assert_eq!(
            err.to_string(),
            "Invalid threshold: identity must be within [0, 100]"
        );

        let err = ArgScanError::parse("results.tsv", 3, "expected 12 columns, found 11");
        assert_eq!(
            err.to_string(),
            "Parse error in results.tsv at line 3: expected 12 columns, found 11"
        );
    }

    #[test]
    fn test_io_not_found_mapping() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ArgScanError::from_io_at(std::path::Path::new("hits.tsv"), "opening", io_err);
        assert!(matches!(err, ArgScanError::NotFound { .. }));

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ArgScanError::from_io_at(std::path::Path::new("hits.tsv"), "opening", io_err);
        assert!(matches!(err, ArgScanError::Io { .. }));
    }
}
