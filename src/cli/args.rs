use crate::core::aggregation::AggregationMode;
use crate::io::csv_format::DecimalSeparator;
use clap::Parser;
use std::path::PathBuf;

/// Convert peer-to-peer lending account statements for Portfolio Performance
#[derive(Parser, Debug)]
#[command(name = "statement-engine")]
#[command(
    about = "Convert peer-to-peer lending account statements into a Portfolio Performance CSV",
    long_about = None
)]
pub struct CliArgs {
    /// CSV file containing the downloaded data from the P2P site
    #[arg(value_name = "INPUT", help = "Path to the account statement CSV file")]
    pub input_file: PathBuf,

    /// Platform configuration file
    #[arg(
        long,
        short = 'c',
        value_name = "CONFIG",
        help = "YAML file with the platform's patterns and field mapping"
    )]
    pub config: PathBuf,

    /// How account statements should be summarized
    #[arg(
        long,
        value_name = "MODE",
        default_value = "transaction",
        value_parser = parse_aggregation_mode,
        help = "Aggregation mode: 'transaction', 'daily' or 'monthly'"
    )]
    pub aggregate: AggregationMode,

    /// Output file path
    #[arg(
        long,
        short = 'o',
        value_name = "OUTPUT",
        help = "Defaults to portfolio_performance__<config name>.csv next to the input"
    )]
    pub output: Option<PathBuf>,

    /// Abort on the first malformed row instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Decimal separator used when rendering output values
    #[arg(long, value_enum, default_value = "comma", value_name = "SEPARATOR")]
    pub decimal_separator: DecimalSeparator,

    /// Enable debug level logging
    #[arg(long)]
    pub debug: bool,
}

/// Parse the aggregation mode through the engine's own validator so the CLI
/// rejects exactly what the pipeline would reject.
fn parse_aggregation_mode(value: &str) -> Result<AggregationMode, String> {
    value
        .parse::<AggregationMode>()
        .map_err(|error| error.to_string())
}

impl CliArgs {
    /// Resolve the output path
    ///
    /// Uses `--output` when given, otherwise derives
    /// `portfolio_performance__<config stem>.csv` next to the input file;
    /// the config file stem doubles as the provider name.
    pub fn output_path(&self) -> PathBuf {
        if let Some(path) = &self.output {
            return path.clone();
        }

        let platform = self
            .config
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("statements");
        let file_name = format!("portfolio_performance__{}.csv", platform);

        match self.input_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(file_name),
            _ => PathBuf::from(file_name),
        }
    }
}
