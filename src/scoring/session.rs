//! Stateful ranking session.
//!
//! A [`RecommendationSession`] owns every tunable parameter together with
//! the last ranked population, so an interactive caller can adjust a weight
//! and call [`RecommendationSession::rerank`] without reloading data. Every
//! mutation invalidates the percentile cache.

use serde::{Deserialize, Serialize};

use super::brand::BrandTable;
use super::composite::{CompositeEngine, CompositeProfile};
use super::engine::{ScoredVehicle, ScoringStrategy, StrategyKind, WeightedEngine};
use super::normalize::PercentileCache;
use super::weights::{Category, EnabledCategories, PriorityMode, WeightUpdate, WeightVector};
use crate::cost::{current_year, CostModel, EnrichedVehicle, OwnershipProfile};
use crate::error::{AutorankError, Result};
use crate::model::{Vehicle, VehicleDefaults, VehicleFilter, VehicleRecord};

/// Partial change to the ownership profile and loan assumptions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileUpdate {
    pub years_owned: Option<u32>,
    pub miles_per_week: Option<f64>,
    pub credit_score: Option<u32>,
    pub loan_term_months: Option<u32>,
}

/// Owns weights, flags, profile and population for repeated ranking passes.
#[derive(Debug, Clone)]
pub struct RecommendationSession {
    base_weights: WeightVector,
    enabled: EnabledCategories,
    mode: PriorityMode,
    strategy: StrategyKind,
    composite_profile: CompositeProfile,
    ownership: OwnershipProfile,
    cost_model: CostModel,
    defaults: VehicleDefaults,
    brands: BrandTable,
    filter: VehicleFilter,
    population: Vec<EnrichedVehicle>,
    cache: PercentileCache,
}

impl Default for RecommendationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_weights: WeightVector::default(),
            enabled: EnabledCategories::all(),
            mode: PriorityMode::Balanced,
            strategy: StrategyKind::Weighted,
            composite_profile: CompositeProfile::Balanced,
            ownership: OwnershipProfile::default(),
            cost_model: CostModel::default(),
            defaults: VehicleDefaults::default(),
            brands: BrandTable::default(),
            filter: VehicleFilter::default(),
            population: Vec::new(),
            cache: PercentileCache::new(),
        }
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_weights(mut self, weights: WeightVector) -> Self {
        self.base_weights = weights;
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: EnabledCategories) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    #[must_use]
    pub fn with_ownership(mut self, ownership: OwnershipProfile) -> Self {
        self.ownership = ownership;
        self
    }

    #[must_use]
    pub fn with_brands(mut self, brands: BrandTable) -> Self {
        self.brands = brands;
        self
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: VehicleDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: VehicleFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Start from a priority mode instead of the balanced defaults.
    #[must_use]
    pub fn with_mode(mut self, mode: PriorityMode) -> Self {
        self.set_mode(mode);
        self
    }

    // ------------------------------------------------------------------
    // Ranking
    // ------------------------------------------------------------------

    /// Resolve, enrich and rank a new population, replacing the current one.
    pub fn rank(&mut self, vehicles: &[Vehicle]) -> Vec<ScoredVehicle> {
        let records = vehicles.iter().map(|v| v.resolve(&self.defaults)).collect();
        self.rank_records(records)
    }

    /// Rank already-resolved records, replacing the current population.
    pub fn rank_records(&mut self, records: Vec<VehicleRecord>) -> Vec<ScoredVehicle> {
        let before = records.len();
        let records = self.filter.apply(records);
        if records.len() != before {
            tracing::debug!("filter kept {} of {} vehicle(s)", records.len(), before);
        }
        self.population = self.cost_model.enrich_all(records);
        self.cache.clear();
        self.score_population()
    }

    /// Re-score the current population under the current parameters.
    pub fn rerank(&mut self) -> Vec<ScoredVehicle> {
        self.score_population()
    }

    fn score_population(&mut self) -> Vec<ScoredVehicle> {
        match self.strategy {
            StrategyKind::Weighted => {
                let engine = WeightedEngine::new(self.effective_base_weights(), &self.enabled);
                engine.score(&self.population, &mut self.cache)
            }
            StrategyKind::Composite => {
                let reference_year = self.cost_model.reference_year.unwrap_or_else(current_year);
                let engine = CompositeEngine::new(&self.brands, self.composite_profile, reference_year)
                    .with_ownership(self.ownership)
                    .with_registration(self.cost_model.registration_per_year);
                engine.score(&self.population, &mut self.cache)
            }
        }
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Apply a partial weight change. Invalid updates leave the session unchanged.
    pub fn update_weights(&mut self, update: &WeightUpdate) -> Result<()> {
        self.base_weights.apply_update(update)?;
        self.cache.clear();
        Ok(())
    }

    pub fn set_enabled(&mut self, category: Category, enabled: bool) {
        self.enabled.set(category, enabled);
        self.cache.clear();
    }

    /// Switch priority mode.
    ///
    /// Weight-shaping modes select the weighted strategy; composite modes
    /// select the composite strategy and profile. `balanced` resets the
    /// multipliers and the composite profile but keeps the current strategy.
    pub fn apply_mode(&mut self, mode: PriorityMode) {
        self.set_mode(mode);
        self.cache.clear();
    }

    fn set_mode(&mut self, mode: PriorityMode) {
        self.mode = mode;
        if let Some(profile) = mode.composite_profile() {
            self.composite_profile = profile;
        }
        match mode {
            PriorityMode::Budget | PriorityMode::Luxury | PriorityMode::Efficiency => {
                self.strategy = StrategyKind::Weighted;
            }
            PriorityMode::Bootstrap | PriorityMode::Fundraising | PriorityMode::Stealth => {
                self.strategy = StrategyKind::Composite;
            }
            PriorityMode::Balanced => {}
        }
        tracing::debug!("priority mode {} (strategy {})", mode, self.strategy);
    }

    /// Apply a partial ownership/loan change.
    ///
    /// Loan changes alter TCO, so the current population is re-enriched.
    pub fn update_profile(&mut self, update: &ProfileUpdate) -> Result<()> {
        if update.years_owned == Some(0) {
            return Err(AutorankError::validation("years owned must be at least 1"));
        }
        if let Some(miles) = update.miles_per_week {
            if !miles.is_finite() || miles < 0.0 {
                return Err(AutorankError::validation(format!(
                    "miles per week must be a non-negative number, got {miles}"
                )));
            }
        }
        if update.loan_term_months == Some(0) {
            return Err(AutorankError::validation("loan term must be at least 1 month"));
        }

        if let Some(years) = update.years_owned {
            self.ownership.years_owned = years;
        }
        if let Some(miles) = update.miles_per_week {
            self.ownership.miles_per_week = miles;
        }
        let loan_changed = update.credit_score.is_some() || update.loan_term_months.is_some();
        if let Some(score) = update.credit_score {
            self.cost_model.loan.credit_score = score;
        }
        if let Some(term) = update.loan_term_months {
            self.cost_model.loan.term_months = term;
        }
        if loan_changed && !self.population.is_empty() {
            let records: Vec<VehicleRecord> =
                self.population.drain(..).map(|v| v.record).collect();
            self.population = self.cost_model.enrich_all(records);
        }
        self.cache.clear();
        Ok(())
    }

    pub fn set_strategy(&mut self, strategy: StrategyKind) {
        self.strategy = strategy;
        self.cache.clear();
    }

    pub fn set_brands(&mut self, brands: BrandTable) {
        self.brands = brands;
        self.cache.clear();
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Baseline weights before mode multipliers and masking.
    #[must_use]
    pub fn base_weights(&self) -> &WeightVector {
        &self.base_weights
    }

    fn effective_base_weights(&self) -> WeightVector {
        match self.mode.multipliers() {
            Some(multipliers) => self.base_weights.scaled_by(&multipliers),
            None => self.base_weights,
        }
    }

    /// Weights the weighted engine would apply right now.
    #[must_use]
    pub fn effective_weights(&self) -> WeightVector {
        self.effective_base_weights().masked(&self.enabled)
    }

    #[must_use]
    pub fn enabled(&self) -> &EnabledCategories {
        &self.enabled
    }

    #[must_use]
    pub fn mode(&self) -> PriorityMode {
        self.mode
    }

    #[must_use]
    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    #[must_use]
    pub fn composite_profile(&self) -> CompositeProfile {
        self.composite_profile
    }

    #[must_use]
    pub fn ownership(&self) -> &OwnershipProfile {
        &self.ownership
    }

    #[must_use]
    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    #[must_use]
    pub fn population(&self) -> &[EnrichedVehicle] {
        &self.population
    }

    #[must_use]
    pub fn cache(&self) -> &PercentileCache {
        &self.cache
    }
}
