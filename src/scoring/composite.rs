//! Composite percentile scoring.
//!
//! Each vehicle's extended ownership cost is loaded with a reliability
//! penalty and the opportunity cost of the capital tied up in it. Total
//! cost, brand credibility and opportunity cost are then percentile-ranked
//! across the population and blended with a [`CompositeProfile`]'s weights.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::brand::{BrandProfile, BrandTable};
use super::engine::{rank_descending, round2, ScoredVehicle, ScoringStrategy, StrategyKind};
use super::explain::{advisories, narrative, value_rating, NarrativeInput};
use super::normalize::{Direction, PercentileCache, Population};
use crate::cost::{extended_tco, EnrichedVehicle, ExtendedTco, OwnershipProfile};
use crate::model::{FuelType, MarketPosition, VehicleRecord};

/// Score credited to every vehicle for the reliability component
pub const RELIABILITY_BASELINE: f64 = 85.0;
/// Annual return assumed on capital not spent on the vehicle
pub const OPPORTUNITY_RATE: f64 = 0.08;

/// Weight sets for the composite engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum CompositeProfile {
    /// Capital efficiency first
    Bootstrap,
    /// Credibility and image first
    Fundraising,
    /// Low cost with understated credibility
    Stealth,
    #[default]
    Balanced,
}

impl CompositeProfile {
    /// Weights for this profile. Each set sums to 1.0.
    #[must_use]
    pub const fn weights(self) -> CompositeWeights {
        match self {
            Self::Bootstrap => CompositeWeights {
                tco: 0.50,
                credibility: 0.15,
                reliability: 0.25,
                market_position: 0.05,
                opportunity_cost: 0.05,
            },
            Self::Fundraising => CompositeWeights {
                tco: 0.20,
                credibility: 0.40,
                reliability: 0.15,
                market_position: 0.20,
                opportunity_cost: 0.05,
            },
            Self::Stealth => CompositeWeights {
                tco: 0.35,
                credibility: 0.30,
                reliability: 0.20,
                market_position: 0.10,
                opportunity_cost: 0.05,
            },
            Self::Balanced => CompositeWeights {
                tco: 0.30,
                credibility: 0.25,
                reliability: 0.20,
                market_position: 0.15,
                opportunity_cost: 0.10,
            },
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bootstrap => "bootstrap",
            Self::Fundraising => "fundraising",
            Self::Stealth => "stealth",
            Self::Balanced => "balanced",
        }
    }
}

impl fmt::Display for CompositeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Blend weights of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeWeights {
    pub tco: f64,
    pub credibility: f64,
    pub reliability: f64,
    pub market_position: f64,
    pub opportunity_cost: f64,
}

impl CompositeWeights {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.tco + self.credibility + self.reliability + self.market_position + self.opportunity_cost
    }
}

/// Per-vehicle intermediate figures of the composite engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeDetail {
    pub advanced_tco: ExtendedTco,
    pub credibility: f64,
    pub reliability_penalty: f64,
    pub opportunity_cost: f64,
    pub total_cost: f64,
    pub tco_percentile: f64,
    pub credibility_percentile: f64,
    pub market_position: MarketPosition,
}

/// Table entry for a vehicle: its `brand` when listed, otherwise its make.
#[must_use]
pub fn brand_profile(vehicle: &VehicleRecord, brands: &BrandTable) -> BrandProfile {
    vehicle
        .brand
        .as_deref()
        .and_then(|brand| brands.get(brand))
        .or_else(|| brands.get(&vehicle.make))
        .copied()
        .unwrap_or(BrandProfile::UNKNOWN)
}

/// Brand credibility adjusted for price band, powertrain and age, on 0-100.
#[must_use]
pub fn credibility_score(vehicle: &VehicleRecord, brands: &BrandTable, reference_year: i32) -> f64 {
    let mut score = brand_profile(vehicle, brands).credibility;

    if vehicle.price < 15_000.0 {
        score -= 25.0;
    } else if vehicle.price > 50_000.0 {
        score += 10.0;
    }

    if vehicle.fuel_type == FuelType::Electric {
        score += 15.0;
    }

    let age = reference_year - vehicle.year;
    if age > 5 {
        score -= 3.0 * f64::from(age);
    }

    score.clamp(0.0, 100.0)
}

/// Expected extra cost of owning an unreliable vehicle.
#[must_use]
pub fn reliability_penalty(reliability: f64) -> f64 {
    if reliability < 6.0 {
        5_000.0
    } else if reliability < 7.0 {
        2_000.0
    } else {
        0.0
    }
}

/// Forgone return on the purchase price over the ownership period.
#[must_use]
pub fn opportunity_cost(price: f64, years_owned: u32) -> f64 {
    price * OPPORTUNITY_RATE * f64::from(years_owned)
}

/// Percentile-based composite scorer.
#[derive(Debug, Clone)]
pub struct CompositeEngine<'a> {
    brands: &'a BrandTable,
    profile: CompositeProfile,
    ownership: OwnershipProfile,
    registration_per_year: f64,
    reference_year: i32,
}

impl<'a> CompositeEngine<'a> {
    #[must_use]
    pub fn new(brands: &'a BrandTable, profile: CompositeProfile, reference_year: i32) -> Self {
        Self {
            brands,
            profile,
            ownership: OwnershipProfile::default(),
            registration_per_year: crate::cost::DEFAULT_REGISTRATION_PER_YEAR,
            reference_year,
        }
    }

    #[must_use]
    pub fn with_ownership(mut self, ownership: OwnershipProfile) -> Self {
        self.ownership = ownership;
        self
    }

    #[must_use]
    pub fn with_registration(mut self, registration_per_year: f64) -> Self {
        self.registration_per_year = registration_per_year;
        self
    }

    fn raw_detail(&self, vehicle: &VehicleRecord) -> CompositeDetail {
        let advanced_tco = extended_tco(vehicle, &self.ownership, self.registration_per_year);
        let credibility = credibility_score(vehicle, self.brands, self.reference_year);
        let reliability_penalty = reliability_penalty(vehicle.reliability);
        let opportunity_cost = opportunity_cost(vehicle.price, self.ownership.years_owned);

        CompositeDetail {
            total_cost: advanced_tco.total + reliability_penalty + opportunity_cost,
            advanced_tco,
            credibility,
            reliability_penalty,
            opportunity_cost,
            tco_percentile: 0.0,
            credibility_percentile: 0.0,
            market_position: MarketPosition::from_price(vehicle.price),
        }
    }
}

impl ScoringStrategy for CompositeEngine<'_> {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Composite
    }

    fn score(&self, vehicles: &[EnrichedVehicle], cache: &mut PercentileCache) -> Vec<ScoredVehicle> {
        if vehicles.is_empty() {
            return Vec::new();
        }

        let weights = self.profile.weights();
        let total_weight = weights.total();
        let details: Vec<CompositeDetail> =
            vehicles.iter().map(|v| self.raw_detail(&v.record)).collect();

        let total_costs: Vec<f64> = details.iter().map(|d| d.total_cost).collect();
        let credibilities: Vec<f64> = details.iter().map(|d| d.credibility).collect();
        let opportunity_costs: Vec<f64> = details.iter().map(|d| d.opportunity_cost).collect();
        let cost_population = Population::new(&total_costs);
        let credibility_population = Population::new(&credibilities);
        let opportunity_population = Population::new(&opportunity_costs);

        tracing::debug!(
            "composite scoring {} vehicle(s) with {} profile",
            vehicles.len(),
            self.profile
        );

        let mut results: Vec<ScoredVehicle> = vehicles
            .iter()
            .zip(details)
            .map(|(vehicle, mut detail)| {
                let tco_pct =
                    cache.percentile(detail.total_cost, &cost_population, Direction::LowerIsBetter);
                let cred_pct = cache.percentile(
                    detail.credibility,
                    &credibility_population,
                    Direction::HigherIsBetter,
                );
                let opportunity_score = 100.0
                    - cache.percentile(
                        detail.opportunity_cost,
                        &opportunity_population,
                        Direction::LowerIsBetter,
                    );

                let blended = tco_pct * weights.tco
                    + cred_pct * weights.credibility
                    + RELIABILITY_BASELINE * weights.reliability
                    + cred_pct * weights.market_position
                    + opportunity_score * weights.opportunity_cost;
                let weighted_score = if total_weight > 0.0 {
                    round2(blended / total_weight)
                } else {
                    0.0
                };

                detail.tco_percentile = tco_pct;
                detail.credibility_percentile = cred_pct;

                let mut category_scores = IndexMap::new();
                category_scores.insert("tco".to_string(), tco_pct);
                category_scores.insert("credibility".to_string(), cred_pct);
                category_scores.insert("reliability".to_string(), RELIABILITY_BASELINE);
                category_scores.insert("marketPosition".to_string(), cred_pct);
                category_scores.insert("opportunityCost".to_string(), opportunity_score);

                let explanation = narrative(&NarrativeInput {
                    tco: detail.advanced_tco.total,
                    credibility: detail.credibility,
                    reliability: vehicle.record.reliability,
                    price: vehicle.record.price,
                    fuel_type: vehicle.record.fuel_type,
                })
                .to_string();

                ScoredVehicle {
                    vehicle: vehicle.clone(),
                    rank: 0,
                    category_scores,
                    weighted_score,
                    explanation,
                    advisories: advisories(vehicle),
                    value_rating: value_rating(vehicle.tco),
                    composite: Some(detail),
                }
            })
            .collect();

        rank_descending(&mut results);
        results
    }
}
