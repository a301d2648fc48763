//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::cost::PopulationCostBreakdown;
use crate::scoring::{PriorityMode, RecommendationSession, ScoredVehicle, StrategyKind, WeightVector};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Auto-detect: table if TTY, summary otherwise
    #[default]
    Auto,
    /// Structured JSON output
    Json,
    /// Human-readable Markdown
    Markdown,
    /// Brief summary output
    Summary,
    /// Compact table for terminal (colored)
    Table,
    /// CSV for spreadsheet import
    Csv,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Auto => write!(f, "auto"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Markdown => write!(f, "markdown"),
            ReportFormat::Summary => write!(f, "summary"),
            ReportFormat::Table => write!(f, "table"),
            ReportFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Show only the best N vehicles
    pub top: Option<usize>,
    /// Title for the report
    pub title: Option<String>,
    /// Include the population cost breakdown section
    pub include_breakdown: bool,
}

impl ReportConfig {
    #[must_use]
    pub fn with_top(mut self, top: Option<usize>) -> Self {
        self.top = top;
        self
    }

    #[must_use]
    pub fn with_breakdown(mut self, include: bool) -> Self {
        self.include_breakdown = include;
        self
    }

    /// Title, falling back to the default heading.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("Vehicle Ranking")
    }

    /// The slice of results this config asks to display.
    #[must_use]
    pub fn visible<'a>(&self, report: &'a RankingReport) -> &'a [ScoredVehicle] {
        match self.top {
            Some(n) => &report.results[..n.min(report.results.len())],
            None => &report.results,
        }
    }
}

/// A ranked population plus the parameters that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingReport {
    /// RFC 3339 generation timestamp
    pub generated_at: String,
    pub strategy: StrategyKind,
    pub mode: PriorityMode,
    /// Effective weights after mode multipliers and masking
    pub weights: WeightVector,
    pub vehicle_count: usize,
    pub results: Vec<ScoredVehicle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_breakdown: Option<PopulationCostBreakdown>,
}

impl RankingReport {
    #[must_use]
    pub fn new(
        results: Vec<ScoredVehicle>,
        strategy: StrategyKind,
        mode: PriorityMode,
        weights: WeightVector,
    ) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            strategy,
            mode,
            weights,
            vehicle_count: results.len(),
            results,
            cost_breakdown: None,
        }
    }

    /// Capture a session's parameters alongside its latest results.
    ///
    /// The cost breakdown is computed from the session population, so it
    /// reflects every ranked vehicle even when the report is truncated.
    #[must_use]
    pub fn from_session(session: &RecommendationSession, results: Vec<ScoredVehicle>) -> Self {
        let records: Vec<_> = session.population().iter().map(|v| v.record.clone()).collect();
        let mut report = Self::new(
            results,
            session.strategy(),
            session.mode(),
            session.effective_weights(),
        );
        report.cost_breakdown = PopulationCostBreakdown::from_records(
            &records,
            session.cost_model().registration_per_year,
        );
        report
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Highest-ranked vehicle, if any.
    #[must_use]
    pub fn best(&self) -> Option<&ScoredVehicle> {
        self.results.first()
    }
}
