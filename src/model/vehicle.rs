//! Raw and resolved vehicle records.
//!
//! Input data arrives with optional fields under several historical
//! spellings. [`Vehicle`] accepts all of them; [`Vehicle::resolve`] applies
//! the [`VehicleDefaults`] table exactly once and yields a fully-populated
//! [`VehicleRecord`] that the cost model and scorers consume.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::market::LivePrice;

/// Powertrain classification used for filtering and credibility adjustments.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[non_exhaustive]
pub enum FuelType {
    Gas,
    Hybrid,
    Electric,
    #[default]
    Unknown,
}

impl FuelType {
    /// Parse a fuel label leniently. Unrecognized labels map to `Unknown`.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "gas" | "gasoline" | "petrol" | "ice" => Self::Gas,
            "hybrid" | "plug-in hybrid" | "phev" | "hev" => Self::Hybrid,
            "electric" | "ev" | "bev" => Self::Electric,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Gas => "Gas",
            Self::Hybrid => "Hybrid",
            Self::Electric => "Electric",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A vehicle as it appears in input data. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vehicle {
    pub name: Option<String>,
    pub make: Option<String>,
    /// Older data sets carry the manufacturer under `brand`
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub price: Option<f64>,
    /// Low end of a quoted price range, used when `price` is absent
    #[serde(alias = "final_price_low")]
    pub final_price_low: Option<f64>,
    #[serde(alias = "depreciation_3yr_percent", alias = "depreciationPercent")]
    pub depreciation_percent_3yr: Option<f64>,
    #[serde(alias = "annual_fuel_cost", alias = "fuelCost")]
    pub annual_fuel_cost: Option<f64>,
    #[serde(alias = "maintenance_annual", alias = "maintenanceCost")]
    pub annual_maintenance_cost: Option<f64>,
    #[serde(alias = "insurance_annual", alias = "insuranceCost")]
    pub annual_insurance_cost: Option<f64>,
    #[serde(alias = "reliability_score")]
    pub reliability: Option<f64>,
    #[serde(alias = "safety_rating", alias = "safety")]
    pub safety_rating: Option<f64>,
    #[serde(
        alias = "styleOrCredibilityScore",
        alias = "founder_credibility_score",
        alias = "founderCredibility",
        alias = "coolness_score"
    )]
    pub style_score: Option<f64>,
    #[serde(alias = "fuel_type", alias = "fuel")]
    pub fuel_type: Option<String>,
    #[serde(alias = "body_type", alias = "category")]
    pub body_type: Option<String>,
    pub notes: Option<String>,
    #[serde(alias = "livePriceData", alias = "live_price_data")]
    pub live_price: Option<LivePrice>,
    /// Flat live-market fields, folded into `live_price` when no nested
    /// object is present
    #[serde(alias = "current_price")]
    pub current_price: Option<f64>,
    #[serde(alias = "min_price")]
    pub min_price: Option<f64>,
    #[serde(alias = "max_price")]
    pub max_price: Option<f64>,
    #[serde(
        alias = "listing_count",
        alias = "listings_count",
        alias = "listingsCount"
    )]
    pub listing_count: Option<u32>,
}

impl Vehicle {
    /// Create a record with identity fields only.
    #[must_use]
    pub fn new(make: impl Into<String>, model: impl Into<String>, year: i32) -> Self {
        Self {
            make: Some(make.into()),
            model: Some(model.into()),
            year: Some(year),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn with_running_costs(mut self, fuel: f64, maintenance: f64, insurance: f64) -> Self {
        self.annual_fuel_cost = Some(fuel);
        self.annual_maintenance_cost = Some(maintenance);
        self.annual_insurance_cost = Some(insurance);
        self
    }

    #[must_use]
    pub fn with_depreciation(mut self, percent_3yr: f64) -> Self {
        self.depreciation_percent_3yr = Some(percent_3yr);
        self
    }

    #[must_use]
    pub fn with_reliability(mut self, reliability: f64) -> Self {
        self.reliability = Some(reliability);
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: f64) -> Self {
        self.style_score = Some(style);
        self
    }

    #[must_use]
    pub fn with_fuel_type(mut self, fuel: FuelType) -> Self {
        self.fuel_type = Some(fuel.name().to_string());
        self
    }

    /// Manufacturer, preferring `make` over the legacy `brand` field.
    #[must_use]
    pub fn manufacturer(&self) -> Option<&str> {
        self.make
            .as_deref()
            .or(self.brand.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Live price assembled from the top-level `currentPrice` family.
    fn flat_live_price(&self) -> Option<LivePrice> {
        self.current_price.map(|current| LivePrice {
            current,
            min: self.min_price,
            max: self.max_price,
            listings: self.listing_count.unwrap_or(0),
            ..LivePrice::default()
        })
    }

    /// Resolve every optional field against `defaults`.
    #[must_use]
    pub fn resolve(&self, defaults: &VehicleDefaults) -> VehicleRecord {
        let make = self
            .manufacturer()
            .map_or_else(|| defaults.make.clone(), str::to_string);
        let model = self
            .model
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map_or_else(|| defaults.model.clone(), str::to_string);
        let year = self.year.unwrap_or(defaults.year);

        let list_price = self
            .price
            .or(self.final_price_low)
            .unwrap_or(defaults.price);
        let live_price = self
            .live_price
            .clone()
            .or_else(|| self.flat_live_price())
            .filter(|live| live.current.is_finite() && live.current > 0.0);
        let price = live_price.as_ref().map_or(list_price, |live| live.current);

        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map_or_else(
                || format!("{year} {make} {model}").trim().to_string(),
                str::to_string,
            );

        let brand = self
            .brand
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        VehicleRecord {
            name,
            make,
            brand,
            model,
            year,
            price,
            list_price,
            depreciation_percent_3yr: self
                .depreciation_percent_3yr
                .unwrap_or(defaults.depreciation_percent_3yr),
            annual_fuel_cost: self.annual_fuel_cost.unwrap_or(defaults.annual_fuel_cost),
            annual_maintenance_cost: self
                .annual_maintenance_cost
                .unwrap_or(defaults.annual_maintenance_cost),
            annual_insurance_cost: self
                .annual_insurance_cost
                .unwrap_or(defaults.annual_insurance_cost),
            reliability: self.reliability.unwrap_or(defaults.reliability),
            safety_rating: self.safety_rating.unwrap_or(defaults.safety_rating),
            style_score: self.style_score.unwrap_or(defaults.style_score),
            fuel_type: self
                .fuel_type
                .as_deref()
                .map_or(defaults.fuel_type, FuelType::parse),
            body_type: self.body_type.clone(),
            notes: self.notes.clone(),
            live_price,
        }
    }
}

/// Values substituted for missing vehicle attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct VehicleDefaults {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub depreciation_percent_3yr: f64,
    pub annual_fuel_cost: f64,
    pub annual_maintenance_cost: f64,
    pub annual_insurance_cost: f64,
    pub reliability: f64,
    pub safety_rating: f64,
    pub style_score: f64,
    pub fuel_type: FuelType,
}

impl Default for VehicleDefaults {
    fn default() -> Self {
        Self {
            make: "Unknown".to_string(),
            model: "Unknown".to_string(),
            year: 2020,
            price: 25_000.0,
            depreciation_percent_3yr: 35.0,
            annual_fuel_cost: 2_000.0,
            annual_maintenance_cost: 800.0,
            annual_insurance_cost: 1_200.0,
            reliability: 7.0,
            safety_rating: 4.0,
            style_score: 5.0,
            fuel_type: FuelType::Unknown,
        }
    }
}

/// A vehicle with every attribute resolved.
///
/// `price` is the effective purchase price: the live market price when one
/// is attached, otherwise `list_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub name: String,
    pub make: String,
    /// Brand as given in the input, kept for brand-table lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub list_price: f64,
    pub depreciation_percent_3yr: f64,
    pub annual_fuel_cost: f64,
    pub annual_maintenance_cost: f64,
    pub annual_insurance_cost: f64,
    pub reliability: f64,
    pub safety_rating: f64,
    pub style_score: f64,
    pub fuel_type: FuelType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_price: Option<LivePrice>,
}

impl VehicleRecord {
    /// Sum of annual fuel, maintenance and insurance costs.
    #[must_use]
    pub fn annual_running_cost(&self) -> f64 {
        self.annual_fuel_cost + self.annual_maintenance_cost + self.annual_insurance_cost
    }

    /// Whether a live market price superseded the list price.
    #[must_use]
    pub fn has_live_price(&self) -> bool {
        self.live_price.is_some()
    }
}

impl From<&Vehicle> for VehicleRecord {
    fn from(vehicle: &Vehicle) -> Self {
        vehicle.resolve(&VehicleDefaults::default())
    }
}
