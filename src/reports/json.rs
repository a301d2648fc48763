//! JSON report generator.

use super::{RankingReport, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::cost::PopulationCostBreakdown;
use crate::scoring::{PriorityMode, ScoredVehicle, StrategyKind, WeightVector};
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_ranking_report(
        &self,
        report: &RankingReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let document = JsonRankingReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: "autorank",
                    version: env!("CARGO_PKG_VERSION"),
                },
                title: config.title.as_deref(),
                generated_at: &report.generated_at,
                strategy: report.strategy,
                mode: report.mode,
                weights: &report.weights,
                vehicle_count: report.vehicle_count,
            },
            results: config.visible(report),
            cost_breakdown: if config.include_breakdown {
                report.cost_breakdown.as_ref()
            } else {
                None
            },
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };
        json.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonRankingReport<'a> {
    metadata: JsonReportMetadata<'a>,
    results: &'a [ScoredVehicle],
    #[serde(skip_serializing_if = "Option::is_none")]
    cost_breakdown: Option<&'a PopulationCostBreakdown>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReportMetadata<'a> {
    tool: ToolInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    generated_at: &'a str,
    strategy: StrategyKind,
    mode: PriorityMode,
    weights: &'a WeightVector,
    vehicle_count: usize,
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}
