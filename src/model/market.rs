//! Live market prices and market classification.
//!
//! A live price feed is an externally produced JSON document listing current
//! asking prices per make and model. Feed entries are matched onto raw
//! vehicles before resolution, so a matched live price supersedes the static
//! list price everywhere downstream.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::vehicle::Vehicle;

/// Minimum Jaro-Winkler similarity for a model-name match within a make
pub const MODEL_MATCH_THRESHOLD: f64 = 0.92;

/// Live market data attached to a single vehicle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LivePrice {
    /// Current asking price
    #[serde(alias = "current_price", alias = "currentPrice")]
    pub current: f64,
    #[serde(alias = "min_price", skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(alias = "max_price", skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Number of listings the price was derived from
    #[serde(alias = "listings_count")]
    pub listings: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
    #[serde(
        alias = "market_status",
        rename = "marketStatus",
        skip_serializing_if = "Option::is_none"
    )]
    pub market_status: Option<MarketStatus>,
}

/// Volatility of a model's listing prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MarketStatus {
    Stable,
    Active,
    Volatile,
    Unknown,
}

impl MarketStatus {
    /// Classify a set of observed prices by their spread relative to the mean.
    ///
    /// Spread above 30% is volatile, above 20% active, otherwise stable.
    #[must_use]
    pub fn from_prices(prices: &[f64]) -> Self {
        let valid: Vec<f64> = prices
            .iter()
            .copied()
            .filter(|p| p.is_finite() && *p > 0.0)
            .collect();
        if valid.is_empty() {
            return Self::Unknown;
        }

        let min = valid.iter().copied().fold(f64::INFINITY, f64::min);
        let max = valid.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg = valid.iter().sum::<f64>() / valid.len() as f64;
        let range_pct = (max - min) / avg * 100.0;

        if range_pct > 30.0 {
            Self::Volatile
        } else if range_pct > 20.0 {
            Self::Active
        } else {
            Self::Stable
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Active => "active",
            Self::Volatile => "volatile",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Market segment implied by purchase price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MarketPosition {
    Budget,
    #[serde(rename = "Mid-Market")]
    MidMarket,
    Premium,
    Luxury,
}

impl MarketPosition {
    #[must_use]
    pub fn from_price(price: f64) -> Self {
        if price < 20_000.0 {
            Self::Budget
        } else if price < 35_000.0 {
            Self::MidMarket
        } else if price < 50_000.0 {
            Self::Premium
        } else {
            Self::Luxury
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Budget => "Budget",
            Self::MidMarket => "Mid-Market",
            Self::Premium => "Premium",
            Self::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for MarketPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One make/model entry of a live price feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LivePriceEntry {
    pub make: String,
    pub model: String,
    pub current_price: f64,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub listings_count: u32,
    pub price_sources: Vec<String>,
    pub last_updated: Option<String>,
    pub market_status: Option<MarketStatus>,
}

impl LivePriceEntry {
    /// Entries without a positive price or without any listing are estimates
    /// and never override a vehicle.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.current_price.is_finite() && self.current_price > 0.0 && self.listings_count > 0
    }

    fn to_live_price(&self) -> LivePrice {
        let market_status = self.market_status.or_else(|| {
            let observed: Vec<f64> = self.min_price.into_iter().chain(self.max_price).collect();
            (observed.len() == 2).then(|| MarketStatus::from_prices(&observed))
        });
        LivePrice {
            current: self.current_price,
            min: self.min_price,
            max: self.max_price,
            listings: self.listings_count,
            trend: None,
            market_status,
        }
    }
}

/// A live price feed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LivePriceFeed {
    pub timestamp: Option<String>,
    pub total_cars: Option<usize>,
    pub successful_scrapes: Option<usize>,
    pub cars: Vec<LivePriceEntry>,
}

/// Outcome of overlaying a feed onto a vehicle list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LivePriceMatchSummary {
    pub exact: usize,
    pub fuzzy: usize,
    pub unmatched: Vec<String>,
}

impl LivePriceMatchSummary {
    #[must_use]
    pub fn matched(&self) -> usize {
        self.exact + self.fuzzy
    }
}

impl LivePriceFeed {
    /// Attach live prices to every vehicle with a matching feed entry.
    ///
    /// Matching is case-insensitive on make; the model is matched exactly
    /// first, then by Jaro-Winkler similarity within the same make.
    pub fn apply(&self, vehicles: &mut [Vehicle]) -> LivePriceMatchSummary {
        let usable: Vec<&LivePriceEntry> = self.cars.iter().filter(|e| e.is_usable()).collect();
        let mut summary = LivePriceMatchSummary::default();

        for vehicle in vehicles.iter_mut() {
            let (Some(make), Some(model)) = (vehicle.manufacturer(), vehicle.model.as_deref())
            else {
                continue;
            };
            let make = normalize_key(make);
            let model = normalize_key(model);

            match find_entry(&usable, &make, &model) {
                Some((entry, exact)) => {
                    tracing::debug!(
                        "live price {} for {} {} ({})",
                        entry.current_price,
                        entry.make,
                        entry.model,
                        if exact { "exact" } else { "fuzzy" }
                    );
                    vehicle.live_price = Some(entry.to_live_price());
                    if exact {
                        summary.exact += 1;
                    } else {
                        summary.fuzzy += 1;
                    }
                }
                None => summary.unmatched.push(format!("{make} {model}")),
            }
        }

        if !summary.unmatched.is_empty() {
            tracing::warn!(
                "No live price for {} vehicle(s): {}",
                summary.unmatched.len(),
                summary.unmatched.join(", ")
            );
        }
        summary
    }
}

fn normalize_key(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

fn find_entry<'a>(
    entries: &[&'a LivePriceEntry],
    make: &str,
    model: &str,
) -> Option<(&'a LivePriceEntry, bool)> {
    let same_make: Vec<&'a LivePriceEntry> = entries
        .iter()
        .copied()
        .filter(|e| normalize_key(&e.make) == make)
        .collect();

    if let Some(entry) = same_make.iter().find(|e| normalize_key(&e.model) == model) {
        return Some((*entry, true));
    }

    same_make
        .into_iter()
        .map(|e| (e, strsim::jaro_winkler(&normalize_key(&e.model), model)))
        .filter(|(_, similarity)| *similarity >= MODEL_MATCH_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entry, _)| (entry, false))
}
