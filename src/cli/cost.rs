//! Cost command handlers.
//!
//! Implements the `apr` and `tco` subcommands, which expose the cost model
//! without ranking anything.

use crate::config::{AppConfig, ConfigOverrides};
use crate::cost::{current_year, estimate_apr_at, extended_tco, EnrichedVehicle, ExtendedTco};
use crate::model::VehicleDefaults;
use crate::pipeline::{exit_codes, load_vehicles, OutputTarget};
use crate::reports::ReportFormat;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::json;
use std::fmt::Write as _;
use std::path::PathBuf;

use super::rank::ensure_valid;

/// Run the apr command, printing the estimated rate.
pub fn run_apr(
    make: &str,
    year: Option<i32>,
    used: bool,
    credit_score: u32,
    format: ReportFormat,
) -> Result<i32> {
    if !(300..=850).contains(&credit_score) {
        bail!("Credit score must be between 300 and 850, got {credit_score}");
    }
    let reference_year = current_year();
    let year = year.unwrap_or(reference_year);
    let apr = estimate_apr_at(make, year, used, credit_score, reference_year);
    tracing::debug!("APR for {make} {year} (used: {used}, credit: {credit_score}) = {apr}");

    let output = match format {
        ReportFormat::Json => serde_json::to_string_pretty(&json!({
            "make": make,
            "year": year,
            "used": used,
            "creditScore": credit_score,
            "estimatedAPR": apr,
        }))
        .context("failed to serialize APR")?,
        _ => format!("{apr:.1}%"),
    };
    OutputTarget::Stdout.write(&output, true)?;
    Ok(exit_codes::SUCCESS)
}

/// Tco command configuration
#[derive(Debug, Clone, Default)]
pub struct TcoOptions {
    pub vehicles: PathBuf,
    pub config_path: Option<PathBuf>,
    pub overrides: ConfigOverrides,
    pub quiet: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TcoRow {
    #[serde(flatten)]
    vehicle: EnrichedVehicle,
    extended: ExtendedTco,
    years_owned: u32,
}

/// Run the tco command: per-vehicle cost breakdowns, no ranking.
pub fn run_tco(options: TcoOptions) -> Result<i32> {
    let (config, _) =
        AppConfig::from_file_with_overrides(options.config_path.as_deref(), &options.overrides);
    ensure_valid(&config)?;

    let vehicles = load_vehicles(&options.vehicles, options.quiet)
        .with_context(|| format!("Failed to load vehicles: {}", options.vehicles.display()))?;

    let cost_model = config.ownership.cost_model();
    let profile = config.ownership.profile();
    let defaults = VehicleDefaults::default();
    let rows: Vec<TcoRow> = vehicles
        .iter()
        .map(|v| {
            let enriched = cost_model.enrich(v.resolve(&defaults));
            let extended = extended_tco(&enriched.record, &profile, cost_model.registration_per_year);
            TcoRow {
                vehicle: enriched,
                extended,
                years_owned: profile.years_owned,
            }
        })
        .collect();

    let content = match config.output.format {
        ReportFormat::Json => {
            serde_json::to_string_pretty(&rows).context("failed to serialize TCO rows")?
        }
        _ => format_tco_text(&rows)?,
    };

    OutputTarget::from(config.output.file.clone()).write(&content, options.quiet)?;
    Ok(exit_codes::SUCCESS)
}

fn format_tco_text(rows: &[TcoRow]) -> Result<String> {
    let mut out = String::new();
    for row in rows {
        let v = &row.vehicle;
        let b = &v.breakdown;
        writeln!(out, "{}", v.record.name)?;
        writeln!(out, "  APR                 {:>10.1}%", v.estimated_apr)?;
        writeln!(out, "  Depreciation (3yr)  {:>11.0}", b.depreciation)?;
        writeln!(out, "  Fuel (3yr)          {:>11.0}", b.fuel)?;
        writeln!(out, "  Maintenance (3yr)   {:>11.0}", b.maintenance)?;
        writeln!(out, "  Insurance (3yr)     {:>11.0}", b.insurance)?;
        writeln!(out, "  Financing           {:>11.0}", b.financing)?;
        writeln!(out, "  TCO (3yr)           {:>11.0}", v.tco)?;
        writeln!(out, "  Incl. purchase      {:>11.0}", v.tco_including_purchase_price)?;
        writeln!(
            out,
            "  Ownership ({}yr)     {:>11.0}",
            row.years_owned, row.extended.total
        )?;
        if row.extended.mileage_penalty > 0.0 {
            writeln!(out, "  Mileage penalty     {:>11.0}", row.extended.mileage_penalty)?;
        }
        writeln!(out)?;
    }
    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_run_apr_rejects_bad_credit() {
        assert!(run_apr("Toyota", None, false, 200, ReportFormat::Summary).is_err());
    }

    #[test]
    fn test_run_tco_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cars.json");
        let mut file = std::fs::File::create(&input).unwrap();
        write!(
            file,
            r#"{{"vehicles":[{{"make":"Toyota","model":"Camry","year":2025,"price":30000,
                "depreciationPercent":30,"annualFuelCost":1500,
                "annualMaintenanceCost":600,"annualInsuranceCost":1400}}]}}"#
        )
        .unwrap();
        let output = dir.path().join("tco.json");

        let overrides = ConfigOverrides {
            format: Some(ReportFormat::Json),
            file: Some(output.clone()),
            reference_year: Some(2025),
            ..ConfigOverrides::default()
        };

        let code = run_tco(TcoOptions {
            vehicles: input,
            config_path: Some(dir.path().join("none.yaml")),
            overrides,
            quiet: true,
        })
        .unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let rows: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(rows[0]["tco"], 23_057.0);
        assert_eq!(rows[0]["tcoIncludingPurchasePrice"], 54_557.0);
        assert_eq!(rows[0]["yearsOwned"], 3);
        assert_eq!(rows[0]["estimatedAPR"], 4.5);
    }
}
