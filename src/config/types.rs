//! Configuration types for autorank.
//!
//! Provides structured configuration for scoring, ownership assumptions,
//! report output and brand reference data.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::{
    DEFAULT_CREDIT_SCORE, DEFAULT_LOAN_TERM_MONTHS, DEFAULT_MILES_PER_WEEK, DEFAULT_YEARS_OWNED,
};
use crate::cost::{CostModel, LoanTerms, OwnershipProfile, DEFAULT_REGISTRATION_PER_YEAR};
use crate::reports::ReportFormat;
use crate::scoring::{
    BrandProfile, BrandTable, Category, EnabledCategories, PriorityMode, RecommendationSession,
    StrategyKind, WeightVector,
};

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are layered over file settings with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Scoring strategy, priority mode and weights
    pub scoring: ScoringConfig,
    /// Ownership horizon and loan assumptions
    pub ownership: OwnershipConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Brand prestige/credibility overrides
    pub brands: BrandsConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Build a ranking session carrying every setting in this config.
    #[must_use]
    pub fn build_session(&self) -> RecommendationSession {
        RecommendationSession::new()
            .with_weights(self.scoring.weights)
            .with_enabled(self.scoring.enabled)
            .with_strategy(self.scoring.strategy)
            .with_mode(self.scoring.mode)
            .with_ownership(self.ownership.profile())
            .with_cost_model(self.ownership.cost_model())
            .with_brands(self.brands.table())
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub const fn strategy(mut self, strategy: StrategyKind) -> Self {
        self.config.scoring.strategy = strategy;
        self
    }

    pub const fn mode(mut self, mode: PriorityMode) -> Self {
        self.config.scoring.mode = mode;
        self
    }

    pub const fn weights(mut self, weights: WeightVector) -> Self {
        self.config.scoring.weights = weights;
        self
    }

    /// Set a single category weight.
    pub fn weight(mut self, category: Category, weight: f64) -> Self {
        self.config.scoring.weights.set(category, weight);
        self
    }

    /// Exclude a category from scoring.
    pub fn disable(mut self, category: Category) -> Self {
        self.config.scoring.enabled.set(category, false);
        self
    }

    pub const fn years_owned(mut self, years: u32) -> Self {
        self.config.ownership.years_owned = years;
        self
    }

    pub const fn miles_per_week(mut self, miles: f64) -> Self {
        self.config.ownership.miles_per_week = miles;
        self
    }

    pub const fn credit_score(mut self, score: u32) -> Self {
        self.config.ownership.credit_score = score;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    pub const fn top(mut self, top: Option<usize>) -> Self {
        self.config.output.top = top;
        self
    }

    pub fn brand(mut self, name: impl Into<String>, profile: BrandProfile) -> Self {
        self.config.brands.overrides.insert(name.into(), profile);
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section Configurations
// ============================================================================

/// Scoring strategy and weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoringConfig {
    /// Scoring strategy: weighted or composite
    pub strategy: StrategyKind,
    /// Priority mode: budget, luxury, efficiency, balanced, bootstrap, fundraising, stealth
    pub mode: PriorityMode,
    /// Baseline category weights
    pub weights: WeightVector,
    /// Per-category enable switches
    pub enabled: EnabledCategories,
}

/// Ownership horizon and financing assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OwnershipConfig {
    /// Years the vehicle will be kept (extended TCO and opportunity cost)
    #[schemars(range(min = 1))]
    pub years_owned: u32,
    /// Expected weekly mileage
    pub miles_per_week: f64,
    /// Borrower credit score used for APR estimation
    #[schemars(range(min = 300, max = 850))]
    pub credit_score: u32,
    /// Loan term in months
    #[schemars(range(min = 1))]
    pub loan_term_months: u32,
    /// Annual registration fee
    pub registration_per_year: f64,
    /// Price loans as used-vehicle loans
    pub treat_as_used: bool,
    /// Reference year for vehicle age (defaults to the current year)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_year: Option<i32>,
}

impl Default for OwnershipConfig {
    fn default() -> Self {
        Self {
            years_owned: DEFAULT_YEARS_OWNED,
            miles_per_week: DEFAULT_MILES_PER_WEEK,
            credit_score: DEFAULT_CREDIT_SCORE,
            loan_term_months: DEFAULT_LOAN_TERM_MONTHS,
            registration_per_year: DEFAULT_REGISTRATION_PER_YEAR,
            treat_as_used: false,
            reference_year: None,
        }
    }
}

impl OwnershipConfig {
    #[must_use]
    pub fn profile(&self) -> OwnershipProfile {
        OwnershipProfile {
            years_owned: self.years_owned,
            miles_per_week: self.miles_per_week,
        }
    }

    #[must_use]
    pub fn cost_model(&self) -> CostModel {
        CostModel {
            loan: LoanTerms {
                term_months: self.loan_term_months,
                credit_score: self.credit_score,
                treat_as_used: self.treat_as_used,
            },
            registration_per_year: self.registration_per_year,
            reference_year: self.reference_year,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
    /// Show only the best N vehicles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<usize>,
    /// Include the population cost breakdown
    pub breakdown: bool,
}

/// Brand reference data layered over the built-in table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BrandsConfig {
    /// Brand name to profile; replaces a built-in entry of the same name
    pub overrides: IndexMap<String, BrandProfile>,
}

impl BrandsConfig {
    /// Built-in table with the overrides applied.
    #[must_use]
    pub fn table(&self) -> BrandTable {
        let mut table = BrandTable::default();
        table.extend(&self.overrides);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::DepreciationCurve;

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .mode(PriorityMode::Budget)
            .weight(Category::Style, 0.0)
            .disable(Category::Fuel)
            .years_owned(5)
            .output_format(ReportFormat::Json)
            .top(Some(3))
            .build();

        assert_eq!(config.scoring.mode, PriorityMode::Budget);
        assert_eq!(config.scoring.weights.style, 0.0);
        assert!(!config.scoring.enabled.fuel);
        assert_eq!(config.ownership.years_owned, 5);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert_eq!(config.output.top, Some(3));
    }

    #[test]
    fn test_defaults_match_cost_model() {
        let config = AppConfig::default();
        assert_eq!(config.ownership.cost_model(), CostModel::default());
        assert_eq!(config.ownership.profile(), OwnershipProfile::default());
    }

    #[test]
    fn test_brand_overrides_apply() {
        let config = AppConfig::builder()
            .brand("Kia", BrandProfile::new(60.0, DepreciationCurve::Moderate, 55.0))
            .build();
        let table = config.brands.table();
        assert_eq!(table.lookup("kia").credibility, 55.0);
        assert_eq!(table.lookup("Tesla").credibility, 95.0);
    }

    #[test]
    fn test_build_session_carries_settings() {
        let config = AppConfig::builder()
            .mode(PriorityMode::Stealth)
            .disable(Category::Style)
            .build();
        let session = config.build_session();

        assert_eq!(session.strategy(), StrategyKind::Composite);
        assert!(!session.enabled().style);
    }

    #[test]
    fn test_yaml_sections_parse() {
        let yaml = r"
scoring:
  strategy: composite
  mode: bootstrap
  weights:
    cost: 5
    style: 1
  enabled:
    fuel: false
ownership:
  years_owned: 5
  credit_score: 680
output:
  format: json
  top: 3
brands:
  overrides:
    Kia:
      prestige: 60
      credibility: 55
";
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.scoring.strategy, StrategyKind::Composite);
        assert_eq!(config.scoring.mode, PriorityMode::Bootstrap);
        assert_eq!(config.scoring.weights.cost, 5.0);
        assert_eq!(config.scoring.weights.tco, 4.0);
        assert!(!config.scoring.enabled.fuel);
        assert!(config.scoring.enabled.cost);
        assert_eq!(config.ownership.years_owned, 5);
        assert_eq!(config.ownership.loan_term_months, 60);
        assert_eq!(config.output.top, Some(3));
        assert_eq!(config.brands.overrides["Kia"].credibility, 55.0);
    }
}
