//! Rank command handler.
//!
//! Implements the `rank` subcommand: load vehicles, score them with the
//! configured strategy and write a report.

use crate::config::{AppConfig, ConfigOverrides, Validatable};
use crate::model::{FuelType, VehicleFilter};
use crate::pipeline::{compute_ranking, exit_codes, load_vehicles, output_report};
use crate::reports::RankingReport;
use crate::scoring::Category;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;

/// Rank command configuration
#[derive(Debug, Clone, Default)]
pub struct RankOptions {
    /// Vehicle JSON file
    pub vehicles: PathBuf,
    /// Optional live price feed
    pub live_prices: Option<PathBuf>,
    /// Explicit config file path
    pub config_path: Option<PathBuf>,
    /// CLI settings layered over the config file
    pub overrides: ConfigOverrides,
    pub filter: VehicleFilter,
    /// Fail with exit code 1 when the best score falls below this
    pub min_score: Option<f64>,
    pub quiet: bool,
}

/// Run the rank command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_rank(options: RankOptions) -> Result<i32> {
    let (config, loaded_from) =
        AppConfig::from_file_with_overrides(options.config_path.as_deref(), &options.overrides);
    if let Some(path) = &loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }
    ensure_valid(&config)?;

    let vehicles = load_vehicles(&options.vehicles, options.quiet)
        .with_context(|| format!("Failed to load vehicles: {}", options.vehicles.display()))?;

    let report = compute_ranking(
        &config,
        vehicles,
        options.filter,
        options.live_prices.as_deref(),
        options.quiet,
    )?;

    output_report(&config.output, &report, options.quiet)?;

    Ok(check_min_score(&report, options.min_score))
}

/// Reject configs that fail validation, listing every problem.
pub fn ensure_valid(config: &AppConfig) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
    bail!("Invalid configuration:\n  {}", details.join("\n  "));
}

fn check_min_score(report: &RankingReport, min_score: Option<f64>) -> i32 {
    let Some(threshold) = min_score else {
        return exit_codes::SUCCESS;
    };
    let best = report.best().map_or(0.0, |b| b.weighted_score);
    if best < threshold {
        tracing::error!(
            "Best score {:.2} is below minimum threshold {:.2}",
            best,
            threshold
        );
        return exit_codes::THRESHOLD_FAILED;
    }
    exit_codes::SUCCESS
}

/// Parse a category name
pub fn parse_category(name: &str) -> Result<Category> {
    match Category::from_name(name) {
        Some(category) => Ok(category),
        None => bail!(
            "Unknown category: {name}. Valid options: cost, tco, reliability, style, fuel"
        ),
    }
}

/// Parse a `category=weight` assignment such as `style=8`.
pub fn parse_weight_assignment(assignment: &str) -> Result<(Category, f64)> {
    let Some((name, value)) = assignment.split_once('=') else {
        bail!("Invalid weight '{assignment}'. Expected CATEGORY=WEIGHT, e.g. style=8");
    };
    let category = parse_category(name)?;
    let weight: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("Invalid weight value for {category}: '{value}'"))?;
    if !weight.is_finite() || weight < 0.0 {
        bail!("Weight for {category} must be a non-negative number, got {weight}");
    }
    Ok((category, weight))
}

/// Build the vehicle filter from CLI flags.
pub fn build_filter(brand: Option<String>, fuel: Option<&str>, max_price: Option<f64>) -> Result<VehicleFilter> {
    let mut filter = VehicleFilter::new();
    if let Some(brand) = brand {
        filter = filter.brand(brand);
    }
    if let Some(fuel) = fuel {
        let fuel_type = FuelType::parse(fuel);
        if fuel_type == FuelType::Unknown {
            bail!("Unknown fuel type: {fuel}. Valid options: gas, hybrid, electric");
        }
        filter = filter.fuel(fuel_type);
    }
    if let Some(max_price) = max_price {
        if !max_price.is_finite() || max_price < 0.0 {
            bail!("--max-price must be a non-negative number, got {max_price}");
        }
        filter = filter.max_price(max_price);
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportFormat;
    use std::io::Write;

    #[test]
    fn test_parse_weight_assignment() {
        assert_eq!(
            parse_weight_assignment("style=8").unwrap(),
            (Category::Style, 8.0)
        );
        assert_eq!(
            parse_weight_assignment(" Price = 2.5").unwrap(),
            (Category::Cost, 2.5)
        );
        assert!(parse_weight_assignment("style").is_err());
        assert!(parse_weight_assignment("speed=3").is_err());
        assert!(parse_weight_assignment("tco=-1").is_err());
        assert!(parse_weight_assignment("tco=lots").is_err());
    }

    #[test]
    fn test_build_filter() {
        let filter = build_filter(Some("Honda".into()), Some("hybrid"), Some(30_000.0)).unwrap();
        assert!(!filter.is_empty());
        assert!(build_filter(None, Some("diesel"), None).is_err());
        assert!(build_filter(None, None, Some(-1.0)).is_err());
        assert!(build_filter(None, None, None).unwrap().is_empty());
    }

    #[test]
    fn test_ensure_valid_lists_errors() {
        let config = AppConfig::builder().credit_score(100).years_owned(0).build();
        let err = ensure_valid(&config).unwrap_err().to_string();
        assert!(err.contains("ownership.years_owned"));
        assert!(err.contains("ownership.credit_score"));
    }

    fn write_vehicles(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("cars.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"[{{"make":"Toyota","model":"Corolla","year":2024,"price":23000}},
               {{"make":"Porsche","model":"911","year":2024,"price":120000}}]"#
        )
        .unwrap();
        path
    }

    #[test]
    fn test_run_rank_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.json");
        let options = RankOptions {
            vehicles: write_vehicles(&dir),
            config_path: Some(dir.path().join("missing.yaml")),
            overrides: ConfigOverrides {
                format: Some(ReportFormat::Json),
                file: Some(output.clone()),
                ..ConfigOverrides::default()
            },
            quiet: true,
            ..RankOptions::default()
        };

        assert_eq!(run_rank(options).unwrap(), exit_codes::SUCCESS);
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(value["results"][0]["model"], "Corolla");
    }

    #[test]
    fn test_run_rank_min_score_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let options = RankOptions {
            vehicles: write_vehicles(&dir),
            config_path: Some(dir.path().join("missing.yaml")),
            overrides: ConfigOverrides {
                format: Some(ReportFormat::Csv),
                file: Some(dir.path().join("out.csv")),
                ..ConfigOverrides::default()
            },
            min_score: Some(11.0),
            quiet: true,
            ..RankOptions::default()
        };
        assert_eq!(run_rank(options).unwrap(), exit_codes::THRESHOLD_FAILED);
    }

    #[test]
    fn test_run_rank_missing_vehicles() {
        let options = RankOptions {
            vehicles: PathBuf::from("/nonexistent/cars.json"),
            quiet: true,
            ..RankOptions::default()
        };
        let err = run_rank(options).unwrap_err();
        assert!(err.to_string().contains("Failed to load vehicles"));
    }
}
