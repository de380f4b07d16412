// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs, Debug)]
/// argscan - screen BLAST results for antibiotic resistance genes
pub struct Args {
    /// pre-computed BLAST tabular results (-outfmt 6) to filter
    #[argh(option)]
    pub results: Option<String>,

    /// query FASTA file to search against the ARG database
    #[argh(option)]
    pub query: Option<String>,

    /// raw DNA or protein sequence (or FASTA text) to search against the ARG database
    #[argh(option)]
    pub sequence: Option<String>,

    /// BLAST database prefix of the reference ARG set (required with --query/--sequence)
    #[argh(option)]
    pub db: Option<String>,

    /// database molecule type when it cannot be detected: nucl, prot
    #[argh(option)]
    pub db_type: Option<String>,

    /// BLAST program: blastn, blastp, blastx, tblastn (default: chosen from query and db type)
    #[argh(option)]
    pub program: Option<String>,

    /// e-value cutoff passed to BLAST (default: 1e-5)
    #[argh(option, default = "1e-5")]
    pub blast_evalue: f64,

    /// maximum number of aligned sequences kept per query (default: 5)
    #[argh(option, default = "5")]
    pub max_target_seqs: usize,

    /// number of BLAST threads (default: 1)
    #[argh(option, default = "1")]
    pub threads: usize,

    /// BLAST timeout in seconds (default: 3600)
    #[argh(option, default = "3600")]
    pub timeout: u64,

    /// directory containing the BLAST+ executables (default: search PATH)
    #[argh(option)]
    pub blast_bin: Option<String>,

    /// where to keep the raw BLAST tabular output (default: next to the CSV output)
    #[argh(option)]
    pub blast_output: Option<String>,

    /// minimum percent identity for a hit to be kept (default: 70)
    #[argh(option)]
    pub min_identity: Option<String>,

    /// maximum e-value for a hit to be kept (default: 1e-5)
    #[argh(option)]
    pub max_evalue: Option<String>,

    /// threshold comparison: inclusive (>=, <=) or strict (>, <) (default: inclusive)
    #[argh(option, default = "String::from(\"inclusive\")")]
    pub threshold_mode: String,

    /// malformed result rows: strict (fail the run) or skip (warn and continue) (default: strict)
    #[argh(option, default = "String::from(\"strict\")")]
    pub on_malformed: String,

    /// CSV columns: minimal (gene, family, identity, evalue) or full (default: minimal)
    #[argh(option, default = "String::from(\"minimal\")")]
    pub columns: String,

    /// output CSV file (default: filtered_<input>.csv next to the input)
    #[argh(option)]
    pub output: Option<String>,

    /// write a JSON run summary to this file
    #[argh(option)]
    pub summary: Option<String>,

    /// number of top hits to print (default: 20)
    #[argh(option, default = "20")]
    pub top: usize,

    /// keep only genes matching regex pattern
    #[argh(option)]
    pub include_gene: Option<String>,

    /// drop genes matching regex pattern
    #[argh(option)]
    pub exclude_gene: Option<String>,

    /// keep only families matching regex pattern
    #[argh(option)]
    pub include_family: Option<String>,

    /// drop families matching regex pattern
    #[argh(option)]
    pub exclude_family: Option<String>,

    /// validate inputs without running BLAST or writing output (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// enable debug logging
    #[argh(switch, short = 'v')]
    pub verbose: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            results: None,
            query: None,
            sequence: None,
            db: None,
            db_type: None,
            program: None,
            blast_evalue: 1e-5,
            max_target_seqs: 5,
            threads: 1,
            timeout: 3600,
            blast_bin: None,
            blast_output: None,
            min_identity: None,
            max_evalue: None,
            threshold_mode: "inclusive".to_string(),
            on_malformed: "strict".to_string(),
            columns: "minimal".to_string(),
            output: None,
            summary: None,
            top: 20,
            include_gene: None,
            exclude_gene: None,
            include_family: None,
            exclude_family: None,
            dry_run: false,
            verbose: false,
            config: None,
            generate_config: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_results_mode() {
        let args = Args::from_args(
            &["argscan"],
            &[
                "--results",
                "hits.txt",
                "--min-identity",
                "90",
                "--max-evalue",
                "1e-10",
                "--threshold-mode",
                "strict",
            ],
        )
        .unwrap();

        assert_eq!(args.results.as_deref(), Some("hits.txt"));
        assert_eq!(args.min_identity.as_deref(), Some("90"));
        assert_eq!(args.max_evalue.as_deref(), Some("1e-10"));
        assert_eq!(args.threshold_mode, "strict");
        assert_eq!(args.on_malformed, "strict");
        assert_eq!(args.top, 20);
    }

    #[test]
    fn test_defaults_match_default_impl() {
        let parsed = Args::from_args(&["argscan"], &[]).unwrap();
        let default = Args::default();
        assert_eq!(parsed.blast_evalue, default.blast_evalue);
        assert_eq!(parsed.max_target_seqs, default.max_target_seqs);
        assert_eq!(parsed.threads, default.threads);
        assert_eq!(parsed.timeout, default.timeout);
        assert_eq!(parsed.threshold_mode, default.threshold_mode);
        assert_eq!(parsed.columns, default.columns);
        assert!(!parsed.verbose);
    }
}
