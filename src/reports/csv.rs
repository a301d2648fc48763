//! CSV report generator.
//!
//! One row per ranked vehicle, suitable for spreadsheet import and data
//! analysis pipelines.

use super::escape::escape_csv;
use super::{RankingReport, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::scoring::ScoredVehicle;

const HEADER: &str = "Rank,Name,Make,Model,Year,Price,Fuel Type,APR,Financing Cost,TCO,TCO Incl. Purchase,Score,Value Rating,Explanation";

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for CsvReporter {
    fn generate_ranking_report(
        &self,
        report: &RankingReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut content = String::new();
        content.push_str(HEADER);
        content.push('\n');

        for scored in config.visible(report) {
            write_vehicle_line(&mut content, scored);
        }

        if config.include_breakdown {
            if let Some(breakdown) = &report.cost_breakdown {
                content.push_str("\n# Average Cost Breakdown\n");
                content.push_str("Segment,Average\n");
                for (label, value) in breakdown.segments() {
                    content.push_str(&format!("\"{}\",{:.2}\n", escape_csv(label), value));
                }
            }
        }

        Ok(content)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

fn write_vehicle_line(content: &mut String, scored: &ScoredVehicle) {
    let v = &scored.vehicle;
    let r = &v.record;
    content.push_str(&format!(
        "{},\"{}\",\"{}\",\"{}\",{},{:.0},{},{:.2},{:.0},{:.0},{:.0},{:.2},{},\"{}\"\n",
        scored.rank,
        escape_csv(&r.name),
        escape_csv(&r.make),
        escape_csv(&r.model),
        r.year,
        r.price,
        r.fuel_type,
        v.estimated_apr,
        v.financing_cost,
        v.tco,
        v.tco_including_purchase_price,
        scored.weighted_score,
        scored.value_rating,
        escape_csv(&scored.explanation),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support::sample_report;

    #[test]
    fn test_csv_rows() {
        let report = sample_report();
        let output = CsvReporter::new()
            .generate_ranking_report(&report, &ReportConfig::default())
            .unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1,"));
        assert!(output.contains("M3 \"\"Comp\"\" | Track"));
    }

    #[test]
    fn test_csv_breakdown_section() {
        let report = sample_report();
        let config = ReportConfig::default().with_breakdown(true);
        let output = CsvReporter::new().generate_ranking_report(&report, &config).unwrap();
        assert!(output.contains("# Average Cost Breakdown"));
        assert!(output.contains("\"Purchase Price\",52000.00"));
    }
}
