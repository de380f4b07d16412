// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};
use crate::error::Result;

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        let defaults = Args::default();

        // Input/Output: the config input applies only when the CLI names none
        if self.results.is_none() && self.query.is_none() && self.sequence.is_none() {
            self.results = config.results;
            self.query = config.query;
        }
        if self.output.is_none() {
            self.output = config.output;
        }
        if self.summary.is_none() {
            self.summary = config.summary;
        }
        if self.columns == defaults.columns {
            if let Some(columns) = config.columns {
                self.columns = columns;
            }
        }
        if self.top == defaults.top {
            if let Some(top) = config.top {
                self.top = top;
            }
        }

        // Filtering
        if self.min_identity.is_none() {
            self.min_identity = config.min_identity.map(|v| v.to_string());
        }
        if self.max_evalue.is_none() {
            self.max_evalue = config.max_evalue.map(|v| format!("{:e}", v));
        }
        if self.threshold_mode == defaults.threshold_mode {
            if let Some(mode) = config.threshold_mode {
                self.threshold_mode = mode;
            }
        }
        if self.on_malformed == defaults.on_malformed {
            if let Some(policy) = config.on_malformed {
                self.on_malformed = policy;
            }
        }
        if self.include_gene.is_none() {
            self.include_gene = config.include_gene;
        }
        if self.exclude_gene.is_none() {
            self.exclude_gene = config.exclude_gene;
        }
        if self.include_family.is_none() {
            self.include_family = config.include_family;
        }
        if self.exclude_family.is_none() {
            self.exclude_family = config.exclude_family;
        }

        // BLAST (only override defaults, not explicit CLI values)
        if self.db.is_none() {
            self.db = config.db;
        }
        if self.db_type.is_none() {
            self.db_type = config.db_type;
        }
        if self.program.is_none() {
            self.program = config.program;
        }
        if self.blast_evalue == defaults.blast_evalue {
            if let Some(evalue) = config.blast_evalue {
                self.blast_evalue = evalue;
            }
        }
        if self.max_target_seqs == defaults.max_target_seqs {
            if let Some(max_target_seqs) = config.max_target_seqs {
                self.max_target_seqs = max_target_seqs;
            }
        }
        if self.threads == defaults.threads {
            if let Some(threads) = config.threads {
                self.threads = threads;
            }
        }
        if self.timeout == defaults.timeout {
            if let Some(timeout) = config.timeout {
                self.timeout = timeout;
            }
        }
        if self.blast_bin.is_none() {
            self.blast_bin = config.blast_bin;
        }
        if self.blast_output.is_none() {
            self.blast_output = config.blast_output;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
