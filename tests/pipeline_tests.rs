//! Pipeline and CLI integration tests.
//!
//! These tests exercise the full load → rank → report pipeline, error
//! handling paths, and CLI command handlers with real fixture files.

use autorank::cli::{run_rank, RankOptions};
use autorank::config::{AppConfig, ConfigOverrides, OutputConfig};
use autorank::model::{FuelType, VehicleFilter};
use autorank::pipeline::{
    compute_ranking, exit_codes, load_live_prices, load_vehicles, output_report,
    parse_vehicles_str,
};
use autorank::reports::ReportFormat;
use autorank::scoring::StrategyKind;
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn quiet_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.ownership.reference_year = Some(2025);
    config
}

// ============================================================================
// Load Stage Tests
// ============================================================================

mod load_stage {
    use super::*;

    #[test]
    fn test_load_vehicle_fixture() {
        let vehicles = load_vehicles(&fixture_path("vehicles.json"), true).expect("load");
        assert_eq!(vehicles.len(), 5);
        assert_eq!(vehicles[1].depreciation_percent_3yr, Some(30.0));
        assert_eq!(vehicles[1].annual_fuel_cost, Some(1_300.0));
        assert_eq!(vehicles[1].style_score, Some(6.5));
        assert_eq!(vehicles[3].manufacturer(), Some("BMW"));
        assert_eq!(vehicles[3].final_price_low, Some(27_000.0));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = load_vehicles(&fixture_path("does-not-exist.json"), true).unwrap_err();
        assert!(err.to_string().contains("does-not-exist.json"));
    }

    #[test]
    fn test_bare_array_is_accepted() {
        let vehicles = parse_vehicles_str(r#"[{"make":"Kia","model":"Niro"}]"#).unwrap();
        assert_eq!(vehicles.len(), 1);
    }

    #[test]
    fn test_scalar_document_is_rejected() {
        assert!(parse_vehicles_str("42").is_err());
        assert!(parse_vehicles_str(r#"{"trucks": []}"#).is_err());
    }

    #[test]
    fn test_bad_record_names_its_index() {
        let err = parse_vehicles_str(r#"[{"make":"Kia"},{"price":"cheap"}]"#).unwrap_err();
        assert!(err.to_string().contains("vehicle #1"), "{err}");
    }

    #[test]
    fn test_live_price_overlay_matches_by_make_and_model() {
        let mut vehicles = load_vehicles(&fixture_path("vehicles.json"), true).unwrap();
        let feed = load_live_prices(&fixture_path("live_prices.json")).unwrap();
        assert_eq!(feed.cars.len(), 4);

        let summary = feed.apply(&mut vehicles);
        assert_eq!(summary.exact, 1);
        let camry = vehicles[0].live_price.as_ref().expect("camry live price");
        assert_eq!(camry.current, 28_750.0);
        // Zero-listing entries never override
        assert!(vehicles[1].live_price.is_none());
    }
}

// ============================================================================
// Rank Stage Tests
// ============================================================================

mod rank_stage {
    use super::*;

    #[test]
    fn test_rank_fixture_with_defaults() {
        let vehicles = load_vehicles(&fixture_path("vehicles.json"), true).unwrap();
        let report =
            compute_ranking(&quiet_config(), vehicles, VehicleFilter::new(), None, true).unwrap();

        assert_eq!(report.vehicle_count, 5);
        assert_eq!(report.results.len(), 5);
        for pair in report.results.windows(2) {
            assert!(pair[0].weighted_score >= pair[1].weighted_score);
        }
        let ford = report
            .results
            .iter()
            .find(|r| r.vehicle.record.make == "Ford")
            .unwrap();
        assert_eq!(ford.vehicle.record.price, 25_000.0);
    }

    #[test]
    fn test_live_prices_supersede_list_prices() {
        let vehicles = load_vehicles(&fixture_path("vehicles.json"), true).unwrap();
        let live = fixture_path("live_prices.json");
        let report = compute_ranking(
            &quiet_config(),
            vehicles,
            VehicleFilter::new(),
            Some(&live),
            true,
        )
        .unwrap();

        let camry = report
            .results
            .iter()
            .find(|r| r.vehicle.record.model == "Camry Hybrid")
            .unwrap();
        assert_eq!(camry.vehicle.record.price, 28_750.0);
        assert_eq!(camry.vehicle.record.list_price, 29_500.0);
    }

    #[test]
    fn test_filter_by_fuel() {
        let vehicles = load_vehicles(&fixture_path("vehicles.json"), true).unwrap();
        let filter = VehicleFilter::new().fuel(FuelType::Electric);
        let report = compute_ranking(&quiet_config(), vehicles, filter, None, true).unwrap();
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].vehicle.record.make, "Tesla");
    }

    #[test]
    fn test_composite_strategy_from_config() {
        let mut config = quiet_config();
        config.scoring.strategy = StrategyKind::Composite;
        let vehicles = load_vehicles(&fixture_path("vehicles.json"), true).unwrap();
        let report = compute_ranking(&config, vehicles, VehicleFilter::new(), None, true).unwrap();
        assert_eq!(report.strategy, StrategyKind::Composite);
        assert!(report.results.iter().all(|r| r.composite.is_some()));
    }

    #[test]
    fn test_missing_live_price_file_fails() {
        let vehicles = load_vehicles(&fixture_path("vehicles.json"), true).unwrap();
        let missing = fixture_path("nope.json");
        let result = compute_ranking(
            &quiet_config(),
            vehicles,
            VehicleFilter::new(),
            Some(&missing),
            true,
        );
        assert!(result.is_err());
    }
}

// ============================================================================
// Report Stage Tests
// ============================================================================

mod report_stage {
    use super::*;

    fn fixture_report() -> autorank::reports::RankingReport {
        let vehicles = load_vehicles(&fixture_path("vehicles.json"), true).unwrap();
        compute_ranking(&quiet_config(), vehicles, VehicleFilter::new(), None, true).unwrap()
    }

    #[test]
    fn test_csv_file_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.csv");
        let output = OutputConfig {
            format: ReportFormat::Csv,
            file: Some(path.clone()),
            ..OutputConfig::default()
        };
        output_report(&output, &fixture_report(), true).unwrap();

        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.starts_with("Rank,Name,Make,Model"));
        assert_eq!(written.lines().filter(|l| l.starts_with("1,")).count(), 1);
    }

    #[test]
    fn test_json_top_limits_results() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.json");
        let output = OutputConfig {
            format: ReportFormat::Json,
            file: Some(path.clone()),
            top: Some(2),
            ..OutputConfig::default()
        };
        output_report(&output, &fixture_report(), true).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["results"].as_array().unwrap().len(), 2);
        assert_eq!(json["metadata"]["vehicleCount"], 5);
    }

    #[test]
    fn test_markdown_file_has_no_ansi() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.md");
        let output = OutputConfig {
            format: ReportFormat::Markdown,
            file: Some(path.clone()),
            ..OutputConfig::default()
        };
        output_report(&output, &fixture_report(), true).unwrap();
        let written = std::fs::read_to_string(path).unwrap();
        assert!(!written.contains('\x1b'));
        assert!(written.contains("Camry Hybrid"));
    }
}

// ============================================================================
// CLI Handler Tests
// ============================================================================

mod cli_handlers {
    use super::*;

    fn options(output: PathBuf) -> RankOptions {
        let overrides = ConfigOverrides {
            format: Some(ReportFormat::Json),
            file: Some(output),
            reference_year: Some(2025),
            ..ConfigOverrides::default()
        };
        RankOptions {
            vehicles: fixture_path("vehicles.json"),
            config_path: Some(fixture_path("no-config.yaml")),
            overrides,
            quiet: true,
            ..RankOptions::default()
        }
    }

    #[test]
    fn test_run_rank_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let code = run_rank(options(dir.path().join("out.json"))).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
        assert!(dir.path().join("out.json").exists());
    }

    #[test]
    fn test_run_rank_min_score_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path().join("out.json"));
        opts.min_score = Some(11.0);
        let code = run_rank(opts).unwrap();
        assert_eq!(code, exit_codes::THRESHOLD_FAILED);
    }

    #[test]
    fn test_run_rank_missing_input_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path().join("out.json"));
        opts.vehicles = fixture_path("missing.json");
        assert!(run_rank(opts).is_err());
    }
}
