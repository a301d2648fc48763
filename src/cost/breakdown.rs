//! Average cost composition across a population.

use serde::{Deserialize, Serialize};

use super::tco::TCO_YEARS;
use crate::model::VehicleRecord;

/// Population-average 3-year cost segments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationCostBreakdown {
    pub vehicle_count: usize,
    pub purchase_price: f64,
    pub depreciation: f64,
    pub fuel: f64,
    pub maintenance: f64,
    pub insurance: f64,
    pub registration: f64,
}

impl PopulationCostBreakdown {
    /// Average the population's cost segments, charging the given annual
    /// registration fee. `None` for an empty population.
    #[must_use]
    pub fn from_records(records: &[VehicleRecord], registration_per_year: f64) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let n = records.len() as f64;
        let avg = |f: fn(&VehicleRecord) -> f64| records.iter().map(f).sum::<f64>() / n;

        Some(Self {
            vehicle_count: records.len(),
            purchase_price: avg(|v| v.price),
            depreciation: avg(|v| v.price * v.depreciation_percent_3yr / 100.0),
            fuel: avg(|v| v.annual_fuel_cost * TCO_YEARS),
            maintenance: avg(|v| v.annual_maintenance_cost * TCO_YEARS),
            insurance: avg(|v| v.annual_insurance_cost * TCO_YEARS),
            registration: registration_per_year * TCO_YEARS,
        })
    }

    /// Labelled segments in display order.
    #[must_use]
    pub fn segments(&self) -> [(&'static str, f64); 6] {
        [
            ("Purchase Price", self.purchase_price),
            ("Depreciation", self.depreciation),
            ("Fuel (3yr)", self.fuel),
            ("Maintenance (3yr)", self.maintenance),
            ("Insurance (3yr)", self.insurance),
            ("Registration (3yr)", self.registration),
        ]
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.segments().iter().map(|(_, v)| v).sum()
    }
}
