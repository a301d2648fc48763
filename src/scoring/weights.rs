//! Scoring categories, weight vectors and priority modes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::composite::CompositeProfile;
use crate::error::{AutorankError, Result};

/// A scored dimension of the weighted engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cost,
    Tco,
    Reliability,
    Style,
    Fuel,
}

impl Category {
    /// All categories in enumeration order. Ties in weight resolve in this order.
    pub const ALL: [Self; 5] = [
        Self::Cost,
        Self::Tco,
        Self::Reliability,
        Self::Style,
        Self::Fuel,
    ];

    /// Machine name, used as the key in category score maps
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Cost => "cost",
            Self::Tco => "tco",
            Self::Reliability => "reliability",
            Self::Style => "style",
            Self::Fuel => "fuel",
        }
    }

    /// Column label for reports
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cost => "Price",
            Self::Tco => "TCO",
            Self::Reliability => "Reliability",
            Self::Style => "Style",
            Self::Fuel => "Fuel",
        }
    }

    /// Phrase used when this category drives a recommendation
    #[must_use]
    pub const fn phrase(&self) -> &'static str {
        match self {
            Self::Cost => "affordable price",
            Self::Tco => "low total cost",
            Self::Reliability => "proven reliability",
            Self::Style => "great style",
            Self::Fuel => "excellent fuel economy",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "cost" | "price" => Some(Self::Cost),
            "tco" => Some(Self::Tco),
            "reliability" => Some(Self::Reliability),
            "style" | "credibility" => Some(Self::Style),
            "fuel" | "fuel-economy" | "efficiency" => Some(Self::Fuel),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Non-negative weight per category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct WeightVector {
    pub cost: f64,
    pub tco: f64,
    pub reliability: f64,
    pub style: f64,
    pub fuel: f64,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            cost: 3.0,
            tco: 4.0,
            reliability: 3.0,
            style: 2.0,
            fuel: 3.0,
        }
    }
}

impl WeightVector {
    /// All weights equal to `w`.
    #[must_use]
    pub const fn uniform(w: f64) -> Self {
        Self {
            cost: w,
            tco: w,
            reliability: w,
            style: w,
            fuel: w,
        }
    }

    #[must_use]
    pub const fn get(&self, category: Category) -> f64 {
        match category {
            Category::Cost => self.cost,
            Category::Tco => self.tco,
            Category::Reliability => self.reliability,
            Category::Style => self.style,
            Category::Fuel => self.fuel,
        }
    }

    pub fn set(&mut self, category: Category, weight: f64) {
        match category {
            Category::Cost => self.cost = weight,
            Category::Tco => self.tco = weight,
            Category::Reliability => self.reliability = weight,
            Category::Style => self.style = weight,
            Category::Fuel => self.fuel = weight,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Component-wise product.
    #[must_use]
    pub fn scaled_by(&self, multipliers: &Self) -> Self {
        let mut out = *self;
        for category in Category::ALL {
            out.set(category, self.get(category) * multipliers.get(category));
        }
        out
    }

    /// Weights with disabled categories zeroed.
    #[must_use]
    pub fn masked(&self, enabled: &EnabledCategories) -> Self {
        let mut out = *self;
        for category in Category::ALL {
            if !enabled.is_enabled(category) {
                out.set(category, 0.0);
            }
        }
        out
    }

    /// Categories with a positive weight, in enumeration order.
    pub fn active(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.iter().filter(|(_, w)| *w > 0.0)
    }

    #[must_use]
    pub fn total_active(&self) -> f64 {
        self.active().map(|(_, w)| w).sum()
    }

    /// Apply a partial update, rejecting negative or non-finite weights.
    ///
    /// The update is all-or-nothing: on error `self` is unchanged.
    pub fn apply_update(&mut self, update: &WeightUpdate) -> Result<()> {
        let mut next = *self;
        for (category, weight) in update.iter() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(AutorankError::validation(format!(
                    "weight for '{category}' must be a non-negative number, got {weight}"
                )));
            }
            next.set(category, weight);
        }
        *self = next;
        Ok(())
    }
}

/// Per-category enable switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EnabledCategories {
    pub cost: bool,
    pub tco: bool,
    pub reliability: bool,
    pub style: bool,
    pub fuel: bool,
}

impl Default for EnabledCategories {
    fn default() -> Self {
        Self::all()
    }
}

impl EnabledCategories {
    #[must_use]
    pub const fn all() -> Self {
        Self {
            cost: true,
            tco: true,
            reliability: true,
            style: true,
            fuel: true,
        }
    }

    #[must_use]
    pub const fn none() -> Self {
        Self {
            cost: false,
            tco: false,
            reliability: false,
            style: false,
            fuel: false,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self, category: Category) -> bool {
        match category {
            Category::Cost => self.cost,
            Category::Tco => self.tco,
            Category::Reliability => self.reliability,
            Category::Style => self.style,
            Category::Fuel => self.fuel,
        }
    }

    pub fn set(&mut self, category: Category, enabled: bool) {
        match category {
            Category::Cost => self.cost = enabled,
            Category::Tco => self.tco = enabled,
            Category::Reliability => self.reliability = enabled,
            Category::Style => self.style = enabled,
            Category::Fuel => self.fuel = enabled,
        }
    }
}

/// A partial weight change. `None` leaves a weight untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightUpdate {
    pub cost: Option<f64>,
    pub tco: Option<f64>,
    pub reliability: Option<f64>,
    pub style: Option<f64>,
    pub fuel: Option<f64>,
}

impl WeightUpdate {
    #[must_use]
    pub fn single(category: Category, weight: f64) -> Self {
        let mut update = Self::default();
        update.set(category, weight);
        update
    }

    /// Record a new weight for `category`, replacing any earlier one.
    pub fn set(&mut self, category: Category, weight: f64) {
        let slot = match category {
            Category::Cost => &mut self.cost,
            Category::Tco => &mut self.tco,
            Category::Reliability => &mut self.reliability,
            Category::Style => &mut self.style,
            Category::Fuel => &mut self.fuel,
        };
        *slot = Some(weight);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Set weights in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> {
        [
            (Category::Cost, self.cost),
            (Category::Tco, self.tco),
            (Category::Reliability, self.reliability),
            (Category::Style, self.style),
            (Category::Fuel, self.fuel),
        ]
        .into_iter()
        .filter_map(|(c, w)| w.map(|w| (c, w)))
    }
}

/// Named weighting presets.
///
/// `budget`, `luxury` and `efficiency` reshape the weighted engine's weights;
/// `bootstrap`, `fundraising` and `stealth` select a composite profile.
/// `balanced` resets both.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum PriorityMode {
    Budget,
    Luxury,
    Efficiency,
    #[default]
    Balanced,
    Bootstrap,
    Fundraising,
    Stealth,
}

impl PriorityMode {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Luxury => "luxury",
            Self::Efficiency => "efficiency",
            Self::Balanced => "balanced",
            Self::Bootstrap => "bootstrap",
            Self::Fundraising => "fundraising",
            Self::Stealth => "stealth",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "budget" => Some(Self::Budget),
            "luxury" => Some(Self::Luxury),
            "efficiency" | "eco" => Some(Self::Efficiency),
            "balanced" | "default" => Some(Self::Balanced),
            "bootstrap" => Some(Self::Bootstrap),
            "fundraising" => Some(Self::Fundraising),
            "stealth" => Some(Self::Stealth),
            _ => None,
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Budget => "Favor purchase price and running costs",
            Self::Luxury => "Favor style and reliability over price",
            Self::Efficiency => "Favor fuel economy and total cost",
            Self::Balanced => "Baseline weights and the balanced composite profile",
            Self::Bootstrap => "Composite profile maximizing capital efficiency",
            Self::Fundraising => "Composite profile favoring credibility and image",
            Self::Stealth => "Composite profile balancing low cost with quiet credibility",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Budget,
            Self::Luxury,
            Self::Efficiency,
            Self::Balanced,
            Self::Bootstrap,
            Self::Fundraising,
            Self::Stealth,
        ]
    }

    /// Multipliers applied to the baseline weights, for weight-shaping modes.
    #[must_use]
    pub const fn multipliers(&self) -> Option<WeightVector> {
        match self {
            Self::Budget => Some(WeightVector {
                cost: 1.5,
                tco: 1.5,
                reliability: 1.0,
                style: 0.5,
                fuel: 1.2,
            }),
            Self::Luxury => Some(WeightVector {
                cost: 0.5,
                tco: 0.7,
                reliability: 1.2,
                style: 2.0,
                fuel: 0.5,
            }),
            Self::Efficiency => Some(WeightVector {
                cost: 1.0,
                tco: 1.3,
                reliability: 1.0,
                style: 0.7,
                fuel: 2.0,
            }),
            Self::Balanced => Some(WeightVector::uniform(1.0)),
            Self::Bootstrap | Self::Fundraising | Self::Stealth => None,
        }
    }

    /// Composite profile selected by this mode, if any.
    #[must_use]
    pub const fn composite_profile(&self) -> Option<CompositeProfile> {
        match self {
            Self::Bootstrap => Some(CompositeProfile::Bootstrap),
            Self::Fundraising => Some(CompositeProfile::Fundraising),
            Self::Stealth => Some(CompositeProfile::Stealth),
            Self::Balanced => Some(CompositeProfile::Balanced),
            Self::Budget | Self::Luxury | Self::Efficiency => None,
        }
    }
}

impl fmt::Display for PriorityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for PriorityMode {
    type Err = AutorankError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| {
            let valid: Vec<&str> = Self::all().iter().map(Self::name).collect();
            AutorankError::config(format!(
                "unknown priority mode '{s}'. Valid modes: {}",
                valid.join(", ")
            ))
        })
    }
}
