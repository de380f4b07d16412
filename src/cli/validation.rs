// validation.rs - Input validation utilities

use crate::blast::{detect_database_type, BlastConfig, BlastProgram};
use crate::cli::args::Args;
use crate::core::{HitSelection, ThresholdMode, Thresholds, DEFAULT_MAX_EVALUE, DEFAULT_MIN_IDENTITY};
use crate::data::loaders::MalformedRowPolicy;
use crate::data::query::write_fasta_to;
use crate::data::{MoleculeType, QuerySequence};
use crate::error::{ArgScanError, Result};
use crate::output::{derive_output_path, OutputColumns};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::NamedTempFile;

/// Record id used when a bare sequence is pasted
pub const RAW_QUERY_ID: &str = "query";

/// Where the query for a BLAST search comes from
#[derive(Debug, Clone, PartialEq)]
pub enum QueryInput {
    Fasta(PathBuf),
    Raw(String),
}

/// What the run starts from
#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    /// Existing tabular results, filtered directly
    Results(PathBuf),
    /// A query searched against the ARG database first
    Query(QueryInput),
}

/// Query FASTA on disk; a scratch file is deleted when dropped
#[derive(Debug)]
pub enum QueryFile {
    Existing(PathBuf),
    Scratch(NamedTempFile),
}

impl QueryFile {
    pub fn path(&self) -> &Path {
        match self {
            QueryFile::Existing(path) => path,
            QueryFile::Scratch(file) => file.path(),
        }
    }
}

/// Everything needed to launch a BLAST search once the query is loaded
#[derive(Debug, Clone)]
pub struct SearchPlan {
    pub query: QueryInput,
    pub db: PathBuf,
    pub program: Option<BlastProgram>,
    pub db_type: Option<MoleculeType>,
    pub evalue: f64,
    pub max_target_seqs: usize,
    pub threads: usize,
    pub timeout_secs: u64,
    pub binary_dir: Option<PathBuf>,
    /// Raw tabular output of the search
    pub blast_output: PathBuf,
}

impl SearchPlan {
    /// FASTA file handed to BLAST: the input file itself, or a scratch copy of pasted text
    pub fn prepare_query_file(&self, query: &QuerySequence) -> Result<QueryFile> {
        match &self.query {
            QueryInput::Fasta(path) => Ok(QueryFile::Existing(path.clone())),
            QueryInput::Raw(_) => {
                let mut scratch = tempfile::Builder::new()
                    .prefix("argscan_query_")
                    .suffix(".fasta")
                    .tempfile()
                    .map_err(|e| ArgScanError::io("creating scratch query file", e))?;
                write_fasta_to(query, scratch.as_file_mut()).map_err(|e| {
                    ArgScanError::io(format!("writing '{}'", scratch.path().display()), e)
                })?;
                log::debug!("Wrote pasted query to {}", scratch.path().display());
                Ok(QueryFile::Scratch(scratch))
            }
        }
    }

    pub fn load_query(&self) -> Result<QuerySequence> {
        match &self.query {
            QueryInput::Fasta(path) => QuerySequence::from_fasta_path(path),
            QueryInput::Raw(text) => QuerySequence::from_raw_text(text, RAW_QUERY_ID),
        }
    }

    /// Pick the program for this query and build the runner configuration
    pub fn resolve(&self, query: &QuerySequence) -> Result<BlastConfig> {
        let query_type = query.molecule_type();

        let program = match self.program {
            Some(program) => {
                if program.query_type() != query_type {
                    log::warn!(
                        "{} expects a {} query but the input looks like {}",
                        program.binary_name(),
                        program.query_type().description(),
                        query_type.description()
                    );
                }
                program
            }
            None => {
                let db_type = self
                    .db_type
                    .or_else(|| detect_database_type(&self.db))
                    .ok_or_else(|| {
                        ArgScanError::config(format!(
                            "Cannot detect the molecule type of database '{}'. Use --db-type or --program",
                            self.db.display()
                        ))
                    })?;
                BlastProgram::for_query(query_type, db_type)
            }
        };

        let mut config = BlastConfig::new(program, self.db.clone());
        config.evalue = self.evalue;
        config.max_target_seqs = self.max_target_seqs;
        config.threads = self.threads;
        config.timeout_secs = self.timeout_secs;
        config.binary_dir = self.binary_dir.clone();
        Ok(config)
    }
}

pub struct ValidationResult {
    pub input: InputMode,
    pub thresholds: Thresholds,
    pub policy: MalformedRowPolicy,
    pub columns: OutputColumns,
    pub selection: HitSelection,
    pub search: Option<SearchPlan>,
    pub output_path: PathBuf,
    pub summary_path: Option<PathBuf>,
    pub top: usize,
}

impl ValidationResult {
    /// Path shown as the run input
    pub fn input_path(&self) -> PathBuf {
        match &self.input {
            InputMode::Results(path) => path.clone(),
            InputMode::Query(QueryInput::Fasta(path)) => path.clone(),
            InputMode::Query(QueryInput::Raw(_)) => PathBuf::from("<pasted sequence>"),
        }
    }
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult> {
    // Exactly one input
    let provided = [&args.results, &args.query, &args.sequence]
        .iter()
        .filter(|v| v.is_some())
        .count();
    if provided == 0 {
        return Err(ArgScanError::config(
            "One of --results, --query or --sequence is required",
        ));
    }
    if provided > 1 {
        return Err(ArgScanError::config(
            "--results, --query and --sequence are mutually exclusive",
        ));
    }

    let input = if let Some(results) = &args.results {
        InputMode::Results(PathBuf::from(results))
    } else if let Some(query) = &args.query {
        InputMode::Query(QueryInput::Fasta(PathBuf::from(query)))
    } else {
        let text = args.sequence.clone().unwrap_or_default();
        if text.trim().is_empty() {
            return Err(ArgScanError::config("--sequence is empty"));
        }
        InputMode::Query(QueryInput::Raw(text))
    };

    // Thresholds
    let mode = ThresholdMode::from_str(&args.threshold_mode).map_err(ArgScanError::invalid_threshold)?;
    let min_identity = args
        .min_identity
        .clone()
        .unwrap_or_else(|| DEFAULT_MIN_IDENTITY.to_string());
    let max_evalue = args
        .max_evalue
        .clone()
        .unwrap_or_else(|| format!("{:e}", DEFAULT_MAX_EVALUE));
    let thresholds = Thresholds::parse(&min_identity, &max_evalue, mode)?;

    let policy = MalformedRowPolicy::from_str(&args.on_malformed).map_err(ArgScanError::config)?;
    let columns = OutputColumns::from_str(&args.columns).map_err(ArgScanError::config)?;

    // Compile regex patterns
    let selection = HitSelection {
        gene_include: compile_pattern("include-gene", &args.include_gene)?,
        gene_exclude: compile_pattern("exclude-gene", &args.exclude_gene)?,
        family_include: compile_pattern("include-family", &args.include_family)?,
        family_exclude: compile_pattern("exclude-family", &args.exclude_family)?,
    };

    let output_path = match (&args.output, &input) {
        (Some(output), _) => PathBuf::from(output),
        (None, InputMode::Results(path)) => derive_output_path(path),
        (None, InputMode::Query(QueryInput::Fasta(path))) => derive_output_path(path),
        (None, InputMode::Query(QueryInput::Raw(_))) => derive_output_path(Path::new(RAW_QUERY_ID)),
    };

    let search = match &input {
        InputMode::Results(_) => {
            if args.db.is_some() {
                log::warn!("--db is ignored when filtering existing results");
            }
            None
        }
        InputMode::Query(query) => Some(validate_search(args, query.clone(), &output_path)?),
    };

    if args.top == 0 {
        log::debug!("--top 0: the hit table will not be printed");
    }

    Ok(ValidationResult {
        input,
        thresholds,
        policy,
        columns,
        selection,
        search,
        output_path,
        summary_path: args.summary.as_ref().map(PathBuf::from),
        top: args.top,
    })
}

fn validate_search(args: &Args, query: QueryInput, output_path: &Path) -> Result<SearchPlan> {
    let db = args.db.as_ref().ok_or_else(|| {
        ArgScanError::config("--db is required to search a query against the ARG database")
    })?;

    let program = args
        .program
        .as_deref()
        .map(BlastProgram::from_str)
        .transpose()
        .map_err(ArgScanError::config)?;
    let db_type = args
        .db_type
        .as_deref()
        .map(MoleculeType::from_str)
        .transpose()
        .map_err(ArgScanError::config)?;

    if !args.blast_evalue.is_finite() || args.blast_evalue <= 0.0 {
        return Err(ArgScanError::config(format!(
            "BLAST e-value must be a positive number, got {}",
            args.blast_evalue
        )));
    }
    if args.max_target_seqs == 0 {
        return Err(ArgScanError::config("--max-target-seqs must be at least 1"));
    }
    if args.threads == 0 {
        return Err(ArgScanError::config("--threads must be at least 1"));
    }
    if args.timeout == 0 {
        return Err(ArgScanError::config("--timeout must be at least 1 second"));
    }

    let blast_output = match &args.blast_output {
        Some(path) => PathBuf::from(path),
        None => sibling_with_suffix(output_path, "_blast.tsv"),
    };

    Ok(SearchPlan {
        query,
        db: PathBuf::from(db),
        program,
        db_type,
        evalue: args.blast_evalue,
        max_target_seqs: args.max_target_seqs,
        threads: args.threads,
        timeout_secs: args.timeout,
        binary_dir: args.blast_bin.as_ref().map(PathBuf::from),
        blast_output,
    })
}

fn compile_pattern(name: &str, pattern: &Option<String>) -> Result<Option<Regex>> {
    pattern
        .as_deref()
        .map(|p| {
            Regex::new(p)
                .map_err(|e| ArgScanError::config(format!("Invalid {} regex: {}", name, e)))
        })
        .transpose()
}

/// `dir/stem.ext` -> `dir/stem<suffix>`
fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| RAW_QUERY_ID.to_string());
    path.with_file_name(format!("{}{}", stem, suffix))
}
