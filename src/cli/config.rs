// config.rs - Configuration file support

use crate::error::{ArgScanError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub results: Option<String>,
    pub query: Option<String>,
    pub output: Option<String>,
    pub summary: Option<String>,
    pub columns: Option<String>,
    pub top: Option<usize>,

    // Filtering
    pub min_identity: Option<f64>,
    pub max_evalue: Option<f64>,
    pub threshold_mode: Option<String>,
    pub on_malformed: Option<String>,
    pub include_gene: Option<String>,
    pub exclude_gene: Option<String>,
    pub include_family: Option<String>,
    pub exclude_family: Option<String>,

    // BLAST
    pub db: Option<String>,
    pub db_type: Option<String>,
    pub program: Option<String>,
    pub blast_evalue: Option<f64>,
    pub max_target_seqs: Option<usize>,
    pub threads: Option<usize>,
    pub timeout: Option<u64>,
    pub blast_bin: Option<String>,
    pub blast_output: Option<String>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ArgScanError::from_io_at(path, "reading config file", e))?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            ArgScanError::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| ArgScanError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| ArgScanError::io(format!("writing config file '{}'", path.display()), e))?;
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# argscan.toml - Configuration file for argscan
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Pre-computed BLAST tabular results (-outfmt 6, 12 columns, no header)
# results = "results.txt"

# Or a query FASTA to search with BLAST
# query = "sample.fasta"

# Output CSV (default: filtered_<input>.csv next to the input)
output = "filtered_results.csv"

# CSV columns: minimal (gene, family, identity, evalue) or full
columns = "minimal"

# JSON run summary
# summary = "summary.json"

# Number of top hits printed to the terminal
top = 20

# =============================================================================
# FILTERING
# =============================================================================

# Minimum percent identity (0-100)
min_identity = 70.0

# Maximum e-value (positive)
max_evalue = 1e-5

# Threshold comparison: inclusive (>=, <=) or strict (>, <)
threshold_mode = "inclusive"

# Malformed result rows: strict (fail the run) or skip (warn and continue)
on_malformed = "strict"

# Regex selection on gene and family names
# include_gene = "^bla"
# exclude_family = "efflux"

# =============================================================================
# BLAST
# =============================================================================

# Reference ARG database prefix (built with makeblastdb)
db = "/path/to/card_db"

# Database molecule type if it cannot be detected: nucl, prot
# db_type = "prot"

# Program: blastn, blastp, blastx, tblastn (omit to choose from query and db type)
# program = "blastx"

# BLAST search parameters
blast_evalue = 1e-5
max_target_seqs = 5
threads = 4

# Seconds before a BLAST run is killed
timeout = 3600

# Directory holding BLAST+ executables (omit to search PATH)
# blast_bin = "/opt/ncbi-blast/bin"
"#
        .to_string()
    }
}
