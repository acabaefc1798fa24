//! End-to-end integration tests
//!
//! These tests validate the complete statement processing pipeline using
//! predefined CSV test fixtures. Each test:
//! 1. Loads the platform configuration from config/
//! 2. Streams input.csv from a fixture directory through the pipeline
//! 3. Writes the resulting Portfolio Performance CSV
//! 4. Compares the output with expected.csv
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - The Mintos scenario (deposit, interest rows, withdrawal, the
//!   sign-split discount/premium pair, ignorable and unknown rows)
//! - Daily and monthly aggregation of the same data
//! - A second provider with a different field map and date format
//! - Semicolon-delimited exports (delimiter detection)
//! - Malformed values under the default skip-and-continue policy

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use statement_engine::config::PlatformConfig;
    use statement_engine::core::StatementPipeline;
    use statement_engine::io::{write_statements_csv, DecimalSeparator, StatementReader};
    use statement_engine::types::{RawRecord, StatementError};
    use std::fs;
    use std::path::Path;

    /// Process a fixture's input.csv with a shipped platform config
    ///
    /// Returns the Portfolio Performance CSV the pipeline produced,
    /// rendered with the default comma decimal separator.
    fn process_fixture(fixture_name: &str, config_path: &str, mode: &str) -> String {
        let input_path = format!("tests/fixtures/{}/input.csv", fixture_name);
        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );

        let config = PlatformConfig::load(Path::new(config_path))
            .unwrap_or_else(|e| panic!("Failed to load config {}: {}", config_path, e));
        let pipeline = StatementPipeline::new(config);
        let reader = StatementReader::new(Path::new(&input_path))
            .unwrap_or_else(|e| panic!("Failed to open input {}: {}", input_path, e));

        let entries = pipeline
            .run(reader, mode)
            .unwrap_or_else(|e| panic!("Failed to process statements: {}", e));

        let mut output = Vec::new();
        write_statements_csv(&entries, &mut output, DecimalSeparator::Comma)
            .unwrap_or_else(|e| panic!("Failed to write output: {}", e));

        String::from_utf8(output).expect("Output is not valid UTF-8")
    }

    /// End-to-end test for all fixtures
    #[rstest]
    #[case::mintos_transaction("mintos_transaction", "config/mintos.yml", "transaction")]
    #[case::mintos_daily("mintos_daily", "config/mintos.yml", "daily")]
    #[case::mintos_monthly("mintos_monthly", "config/mintos.yml", "monthly")]
    #[case::estateguru("estateguru_transaction", "config/estateguru.yml", "transaction")]
    #[case::swaper_semicolon("swaper_semicolon", "config/swaper.yml", "transaction")]
    #[case::malformed_value_skipped("malformed_value", "config/mintos.yml", "transaction")]
    fn test_fixtures(#[case] fixture: &str, #[case] config: &str, #[case] mode: &str) {
        let actual_output = process_fixture(fixture, config, mode);

        let expected_path = format!("tests/fixtures/{}/expected.csv", fixture);
        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (mode: {})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture, mode, actual_output, expected_output
        );
    }

    #[test]
    fn unsupported_mode_fails_without_output() {
        let config = PlatformConfig::load(Path::new("config/mintos.yml")).unwrap();
        let pipeline = StatementPipeline::new(config);
        let reader =
            StatementReader::new(Path::new("tests/fixtures/mintos_transaction/input.csv")).unwrap();

        let result = pipeline.run(reader, "yearly");
        assert!(matches!(
            result,
            Err(StatementError::UnsupportedAggregation { .. })
        ));
    }

    #[test]
    fn strict_mode_aborts_on_malformed_value() {
        let config = PlatformConfig::load(Path::new("config/mintos.yml")).unwrap();
        let pipeline = StatementPipeline::new(config).strict(true);
        let reader =
            StatementReader::new(Path::new("tests/fixtures/malformed_value/input.csv")).unwrap();

        let result = pipeline.run(reader, "transaction");
        assert!(matches!(result, Err(StatementError::InvalidValue { .. })));
    }

    /// All shipped platform configurations must load and compile.
    #[rstest]
    #[case::mintos("config/mintos.yml")]
    #[case::estateguru("config/estateguru.yml")]
    #[case::bondora("config/bondora.yml")]
    #[case::bondora_go_grow("config/bondora_go_grow.yml")]
    #[case::robocash("config/robocash.yml")]
    #[case::swaper("config/swaper.yml")]
    #[case::viainvest("config/viainvest.yml")]
    #[case::debitumnetwork("config/debitumnetwork.yml")]
    #[case::lande("config/lande.yml")]
    fn shipped_configs_are_valid(#[case] config_path: &str) {
        let config = PlatformConfig::load(Path::new(config_path))
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", config_path, e));

        // An empty run compiles the patterns and exercises the field map.
        let pipeline = StatementPipeline::new(config);
        let entries = pipeline
            .run(Vec::<Result<RawRecord, StatementError>>::new(), "transaction")
            .unwrap_or_else(|e| panic!("Failed to run with {}: {}", config_path, e));
        assert!(entries.is_empty());
    }
}
