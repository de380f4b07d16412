// main.rs - CLI entry point

use argscan::blast::BlastRunner;
use argscan::cli::{validate_args, Args, Config, InputMode};
use argscan::core::{run_pipeline, summarize_families, PipelineOptions, ResultSource};
use argscan::error::ArgScanError;
use argscan::output::{format_family_table, format_hit_table, write_csv_file, write_summary_json, RunSummary};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), ArgScanError> {
    let mut args: Args = argh::from_env();

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    init_logging(args.verbose);

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
        println!("📄 Configuration: {}", config_path);
    }

    // Validate all arguments
    let validated = validate_args(&args)?;

    println!("🚀 {}", argscan::get_info());
    println!(
        "🎯 Thresholds: identity {} / e-value {} ({})",
        validated.thresholds.min_identity(),
        validated.thresholds.max_evalue(),
        validated.thresholds.mode().description()
    );
    println!("🧹 Malformed rows: {}", validated.policy.description());
    if !validated.selection.is_empty() {
        println!("🔎 Gene/family regex selection active");
    }

    let total_start = Instant::now();

    // Obtain tabular results, running BLAST when a query was given
    let results_path: PathBuf = match (&validated.input, &validated.search) {
        (InputMode::Results(path), _) => {
            println!("📂 Results: {}", path.display());
            path.clone()
        }
        (InputMode::Query(_), Some(plan)) => {
            let query = plan.load_query()?;
            let blast_config = plan.resolve(&query)?;
            println!(
                "🧬 Query: {} record(s), {} residues ({})",
                query.records.len(),
                query.total_length(),
                query.molecule_type().description()
            );
            println!(
                "🔨 BLAST: {} ({}) against {}",
                blast_config.program.binary_name(),
                blast_config.program.description(),
                blast_config.db.display()
            );
            println!(
                "⏱️  Timeout: {}s, threads: {}, max target seqs: {}",
                blast_config.timeout_secs, blast_config.threads, blast_config.max_target_seqs
            );

            if args.dry_run {
                println!("✅ Dry run completed successfully");
                println!("📁 Output would be written to: {}", validated.output_path.display());
                return Ok(());
            }

            let query_file = plan.prepare_query_file(&query)?;

            let runner = BlastRunner::new(blast_config);
            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}") {
                spinner.set_style(style);
            }
            spinner.enable_steady_tick(Duration::from_millis(120));
            spinner.set_message("BLAST running");

            let run = runner.run_with_progress(query_file.path(), &plan.blast_output, &spinner);
            spinner.finish_and_clear();
            drop(query_file);
            let run = run?;

            println!(
                "✅ BLAST finished in {:.1}s, raw results: {}",
                run.elapsed.as_secs_f64(),
                run.output.display()
            );
            run.output
        }
        (InputMode::Query(_), None) => {
            return Err(ArgScanError::config("query input without a BLAST search plan"));
        }
    };

    // Parse, filter, annotate, select
    let options = PipelineOptions {
        thresholds: validated.thresholds,
        policy: validated.policy,
        selection: validated.selection.clone(),
    };
    let result = run_pipeline(ResultSource::Path(&results_path), &options)?;
    let report = result.report;

    println!(
        "📊 Rows: {} total, {} skipped, {} passed thresholds, {} selected",
        report.total_rows, report.skipped_rows, report.passed_thresholds, report.selected
    );
    if report.incomplete_annotations > 0 {
        println!(
            "⚠️  {} selected hit(s) lack a gene or family token in the subject id",
            report.incomplete_annotations
        );
    }

    if result.hits.is_empty() {
        println!("\n⚠️  No hits passed the identity and e-value thresholds");
    } else {
        if validated.top > 0 {
            println!("\n🎯 Top ARG hits:");
            print!("{}", format_hit_table(&result.hits, validated.top));
        }
        println!("\n🧪 Resistance families:");
        print!("{}", format_family_table(&summarize_families(&result.hits)));
    }

    if args.dry_run {
        println!("\n✅ Dry run completed successfully");
        println!("📁 Output would be written to: {}", validated.output_path.display());
        return Ok(());
    }

    write_csv_file(&validated.output_path, &result.hits, validated.columns)?;
    println!("\n💾 Filtered hits saved to: {}", validated.output_path.display());

    if let Some(summary_path) = &validated.summary_path {
        let summary = RunSummary::new(
            &validated.input_path(),
            Some(validated.output_path.as_path()),
            &validated.thresholds,
            report,
            summarize_families(&result.hits),
        );
        write_summary_json(summary_path, &summary)?;
        println!("📝 Run summary saved to: {}", summary_path.display());
    }

    println!(
        "✅ Completed in {:.2}s",
        total_start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init();
}
