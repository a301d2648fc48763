//! Population filtering.

use serde::{Deserialize, Serialize};

use super::vehicle::{FuelType, VehicleRecord};

/// Conjunctive filter over resolved vehicles. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleFilter {
    pub brand: Option<String>,
    pub fuel: Option<FuelType>,
    pub max_price: Option<f64>,
}

impl VehicleFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    #[must_use]
    pub fn fuel(mut self, fuel: FuelType) -> Self {
        self.fuel = Some(fuel);
        self
    }

    #[must_use]
    pub fn max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    /// True when no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.brand.is_none() && self.fuel.is_none() && self.max_price.is_none()
    }

    #[must_use]
    pub fn matches(&self, vehicle: &VehicleRecord) -> bool {
        let brand_ok = self
            .brand
            .as_deref()
            .map_or(true, |b| vehicle.make.eq_ignore_ascii_case(b.trim()));
        let fuel_ok = self.fuel.map_or(true, |f| vehicle.fuel_type == f);
        let price_ok = self.max_price.map_or(true, |max| vehicle.price <= max);
        brand_ok && fuel_ok && price_ok
    }

    /// Keep matching vehicles, preserving input order.
    #[must_use]
    pub fn apply(&self, vehicles: Vec<VehicleRecord>) -> Vec<VehicleRecord> {
        if self.is_empty() {
            return vehicles;
        }
        vehicles.into_iter().filter(|v| self.matches(v)).collect()
    }
}
