//! Scoring strategies and the weighted min-max engine.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::composite::CompositeDetail;
use super::explain::{advisories, explain, value_rating, Advisory};
use super::normalize::{min_max_in_range, value_range, Direction, PercentileCache};
use super::weights::{Category, EnabledCategories, WeightVector};
use crate::cost::EnrichedVehicle;
use crate::error::{AutorankError, Result};

/// A way of turning an enriched population into ranked results.
///
/// Implementations must be deterministic: the same population and
/// parameters always produce the same scores in the same order.
pub trait ScoringStrategy {
    fn kind(&self) -> StrategyKind;

    /// Score and rank `vehicles`, best first.
    fn score(&self, vehicles: &[EnrichedVehicle], cache: &mut PercentileCache) -> Vec<ScoredVehicle>;
}

/// Available scoring strategies.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Min-max normalized categories blended by user weights
    #[default]
    Weighted,
    /// Percentile-ranked cost, credibility and opportunity cost
    Composite,
}

impl StrategyKind {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Weighted => "weighted",
            Self::Composite => "composite",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = AutorankError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "weighted" | "simple" => Ok(Self::Weighted),
            "composite" | "advanced" => Ok(Self::Composite),
            other => Err(AutorankError::config(format!(
                "unknown scoring strategy '{other}'. Valid strategies: weighted, composite"
            ))),
        }
    }
}

/// One ranked vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredVehicle {
    #[serde(flatten)]
    pub vehicle: EnrichedVehicle,
    /// 1-based position in the ranking
    pub rank: usize,
    pub category_scores: IndexMap<String, f64>,
    pub weighted_score: f64,
    pub explanation: String,
    pub advisories: Vec<Advisory>,
    /// 1-10 rating derived from TCO
    pub value_rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composite: Option<CompositeDetail>,
}

impl ScoredVehicle {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.vehicle.record.name
    }
}

/// Round to two decimal places, half away from zero.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Stable descending sort by score, then assign 1-based ranks.
pub(crate) fn rank_descending(results: &mut [ScoredVehicle]) {
    results.sort_by(|a, b| b.weighted_score.total_cmp(&a.weighted_score));
    for (i, result) in results.iter_mut().enumerate() {
        result.rank = i + 1;
    }
}

/// Weighted average of min-max normalized category scores.
///
/// Price, TCO and fuel cost are min-max scaled with lower values better;
/// reliability and style use the vehicle's own 1-10 attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedEngine {
    weights: WeightVector,
}

impl WeightedEngine {
    /// Build an engine; disabled categories are zero-weighted.
    #[must_use]
    pub fn new(weights: WeightVector, enabled: &EnabledCategories) -> Self {
        Self {
            weights: weights.masked(enabled),
        }
    }

    /// Weights actually applied, after masking.
    #[must_use]
    pub fn effective_weights(&self) -> &WeightVector {
        &self.weights
    }
}

struct Ranges {
    price: Option<(f64, f64)>,
    tco: Option<(f64, f64)>,
    fuel: Option<(f64, f64)>,
}

fn scaled(value: f64, range: Option<(f64, f64)>) -> f64 {
    match range {
        Some((min, max)) => min_max_in_range(value, min, max, Direction::LowerIsBetter),
        None => super::normalize::NEUTRAL_MIN_MAX_SCORE,
    }
}

impl ScoringStrategy for WeightedEngine {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Weighted
    }

    fn score(&self, vehicles: &[EnrichedVehicle], _cache: &mut PercentileCache) -> Vec<ScoredVehicle> {
        if vehicles.is_empty() {
            return Vec::new();
        }

        let prices: Vec<f64> = vehicles.iter().map(|v| v.record.price).collect();
        let tcos: Vec<f64> = vehicles.iter().map(|v| v.tco).collect();
        let fuels: Vec<f64> = vehicles.iter().map(|v| v.record.annual_fuel_cost).collect();
        let ranges = Ranges {
            price: value_range(&prices),
            tco: value_range(&tcos),
            fuel: value_range(&fuels),
        };

        let total_weight = self.weights.total_active();
        let explanation = explain(&self.weights);
        tracing::debug!(
            "weighted scoring {} vehicle(s), weights {:?}, total {}",
            vehicles.len(),
            self.weights,
            total_weight
        );

        let mut results: Vec<ScoredVehicle> = vehicles
            .iter()
            .map(|vehicle| {
                let mut category_scores = IndexMap::with_capacity(Category::ALL.len());
                for category in Category::ALL {
                    let score = match category {
                        Category::Cost => scaled(vehicle.record.price, ranges.price),
                        Category::Tco => scaled(vehicle.tco, ranges.tco),
                        Category::Fuel => scaled(vehicle.record.annual_fuel_cost, ranges.fuel),
                        Category::Reliability => vehicle.record.reliability,
                        Category::Style => vehicle.record.style_score,
                    };
                    category_scores.insert(category.name().to_string(), score);
                }

                let weighted_score = if total_weight > 0.0 {
                    let sum: f64 = self
                        .weights
                        .active()
                        .map(|(c, w)| category_scores.get(c.name()).copied().unwrap_or(0.0) * w)
                        .sum();
                    round2(sum / total_weight)
                } else {
                    0.0
                };

                ScoredVehicle {
                    vehicle: vehicle.clone(),
                    rank: 0,
                    category_scores,
                    weighted_score,
                    explanation: explanation.clone(),
                    advisories: advisories(vehicle),
                    value_rating: value_rating(vehicle.tco),
                    composite: None,
                }
            })
            .collect();

        rank_descending(&mut results);
        results
    }
}
