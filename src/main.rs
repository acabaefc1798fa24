//! Statement Engine CLI
//!
//! Command-line interface for converting peer-to-peer lending account
//! statement exports into Portfolio Performance compatible CSV files.
//!
//! # Usage
//!
//! ```bash
//! statement-engine --config config/mintos.yml statements/mintos.csv
//! statement-engine --config config/mintos.yml --aggregate daily statements/mintos.csv
//! statement-engine --config config/estateguru.yml --aggregate monthly -o out.csv export.csv
//! ```
//!
//! The program reads the account statement rows from the input CSV file,
//! classifies and optionally aggregates them according to the platform
//! configuration, and writes the result as a Portfolio Performance CSV
//! (by default `portfolio_performance__<config name>.csv` next to the
//! input file).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing files, bad configuration, unsupported mode, etc.)

use statement_engine::cli::{self, CliArgs};
use statement_engine::config::PlatformConfig;
use statement_engine::core::StatementPipeline;
use statement_engine::io::{write_statements_csv, StatementReader};
use statement_engine::types::StatementError;

use std::fs::File;
use std::process;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse_args();

    init_logging(args.debug);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Configure the tracing subscriber for this run
///
/// `RUST_LOG` wins when set; otherwise `--debug` selects debug level so the
/// dropped-row traces become visible, and info is the default.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Process one account statement file end to end
fn run(args: &CliArgs) -> Result<(), StatementError> {
    if !args.input_file.exists() {
        return Err(StatementError::file_not_found(
            args.input_file.display().to_string(),
        ));
    }

    info!(
        input = %args.input_file.display(),
        config = %args.config.display(),
        aggregate = %args.aggregate,
        "parsing peer-to-peer lending account statements"
    );

    let config = PlatformConfig::load(&args.config)?;
    let pipeline = StatementPipeline::new(config).strict(args.strict);
    let reader = StatementReader::new(&args.input_file)?;

    let entries = pipeline.run_with_mode(reader, args.aggregate)?;

    if entries.is_empty() {
        warn!("no statements were found in the input file; re-run with --debug to check for unexpected statement types");
        return Ok(());
    }

    info!(
        count = entries.len(),
        "account statement parsing finished"
    );

    let output_path = args.output_path();
    let mut output = File::create(&output_path)?;
    write_statements_csv(&entries, &mut output, args.decimal_separator)?;

    info!(output = %output_path.display(), "wrote Portfolio Performance csv");

    Ok(())
}
