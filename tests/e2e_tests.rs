//! End-to-end integration tests
//!
//! These tests validate the complete replay pipeline using predefined CSV
//! fixtures. Each test:
//! 1. Reads input.csv from a fixture directory
//! 2. Replays all commands through a fresh ledger
//! 3. Generates the balance report
//! 4. Compares the report with expected.csv
//!
//! Each fixture is run with both the synchronous and the asynchronous
//! strategy; per-user ordering makes their output identical.

#[cfg(test)]
mod tests {
    use point_ledger::cli::StrategyType;
    use point_ledger::strategy::{create_strategy, BatchConfig};
    use point_ledger::LedgerConfig;
    use rstest::rstest;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    /// Run a fixture by replaying input.csv and comparing with expected.csv
    fn run_test_fixture(fixture_name: &str, strategy_type: StrategyType, batch_size: usize) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.csv", fixture_dir);
        let expected_path = format!("{}/expected.csv", fixture_dir);

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );
        assert!(
            Path::new(&expected_path).exists(),
            "Expected file not found: {}",
            expected_path
        );

        let strategy = create_strategy(
            strategy_type.clone(),
            LedgerConfig::default(),
            Some(BatchConfig::new(batch_size, 4)),
        );

        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");

        strategy
            .process(Path::new(&input_path), &mut temp_output)
            .unwrap_or_else(|e| panic!("Failed to process commands: {}", e));

        temp_output.flush().expect("Failed to flush temp file");

        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));

        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (strategy: {:?}, batch size: {})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, strategy_type, batch_size, actual_output, expected_output
        );
    }

    #[rstest]
    #[case("happy_path")]
    #[case("limit_boundary")]
    #[case("insufficient_balance")]
    #[case("invalid_amounts")]
    #[case("malformed_data")]
    #[case("rejected_only_user")]
    #[case("case_and_whitespace")]
    #[case("interleaved_users")]
    fn test_fixtures(
        #[case] fixture: &str,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
        #[values(1, 1000)] batch_size: usize,
    ) {
        run_test_fixture(fixture, strategy, batch_size);
    }
}
