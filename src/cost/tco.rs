//! Total-cost-of-ownership derivation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::apr::{current_year, estimate_apr_at};
use super::financing::{financing_cost, LoanTerms};
use crate::model::VehicleRecord;

/// Horizon of the standard TCO figure, in years
pub const TCO_YEARS: f64 = 3.0;
/// Annual registration fee
pub const DEFAULT_REGISTRATION_PER_YEAR: f64 = 500.0;
/// Annual mileage above which the extended TCO charges a wear penalty
pub const HIGH_MILEAGE_THRESHOLD: f64 = 15_000.0;
/// Penalty per excess mile per year of ownership
pub const MILEAGE_PENALTY_PER_MILE: f64 = 0.15;

/// Cost assumptions shared by every vehicle in a pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostModel {
    /// Loan terms for the financing component
    pub loan: LoanTerms,
    /// Registration fee per year
    pub registration_per_year: f64,
    /// Reference year for vehicle age; `None` reads the local clock
    pub reference_year: Option<i32>,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            loan: LoanTerms::default(),
            registration_per_year: DEFAULT_REGISTRATION_PER_YEAR,
            reference_year: None,
        }
    }
}

/// Itemized 3-year costs for one vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcoBreakdown {
    pub purchase_price: f64,
    pub depreciation: f64,
    pub fuel: f64,
    pub maintenance: f64,
    pub insurance: f64,
    pub registration: f64,
    pub financing: f64,
}

impl TcoBreakdown {
    #[must_use]
    pub fn running_costs(&self) -> f64 {
        self.fuel + self.maintenance + self.insurance
    }

    /// Depreciation, running costs and financing. Excludes the purchase
    /// price and registration.
    #[must_use]
    pub fn tco(&self) -> f64 {
        (self.depreciation + self.running_costs() + self.financing).round()
    }

    /// Every cost including the purchase price itself.
    #[must_use]
    pub fn including_purchase_price(&self) -> f64 {
        (self.purchase_price
            + self.depreciation
            + self.running_costs()
            + self.registration
            + self.financing)
            .round()
    }
}

/// A resolved vehicle with its derived cost figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedVehicle {
    #[serde(flatten)]
    pub record: VehicleRecord,
    #[serde(rename = "estimatedAPR")]
    pub estimated_apr: f64,
    pub financing_cost: f64,
    pub tco: f64,
    pub tco_including_purchase_price: f64,
    pub breakdown: TcoBreakdown,
}

/// The three figures a TCO computation reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TcoSummary {
    pub tco: f64,
    pub financing_cost: f64,
    pub estimated_apr: f64,
}

impl CostModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the reference year instead of reading the clock.
    #[must_use]
    pub fn at_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    #[must_use]
    pub fn with_loan(mut self, loan: LoanTerms) -> Self {
        self.loan = loan;
        self
    }

    fn reference_year(&self) -> i32 {
        self.reference_year.unwrap_or_else(current_year)
    }

    /// APR this model assumes for the vehicle.
    #[must_use]
    pub fn apr_for(&self, vehicle: &VehicleRecord) -> f64 {
        estimate_apr_at(
            &vehicle.make,
            vehicle.year,
            self.loan.treat_as_used,
            self.loan.credit_score,
            self.reference_year(),
        )
    }

    /// Itemize the 3-year costs of one vehicle.
    #[must_use]
    pub fn breakdown(&self, vehicle: &VehicleRecord) -> (TcoBreakdown, f64) {
        let apr = self.apr_for(vehicle);
        let breakdown = TcoBreakdown {
            purchase_price: vehicle.price,
            depreciation: vehicle.price * vehicle.depreciation_percent_3yr / 100.0,
            fuel: vehicle.annual_fuel_cost * TCO_YEARS,
            maintenance: vehicle.annual_maintenance_cost * TCO_YEARS,
            insurance: vehicle.annual_insurance_cost * TCO_YEARS,
            registration: self.registration_per_year * TCO_YEARS,
            financing: financing_cost(vehicle.price, apr, self.loan.term_months),
        };
        (breakdown, apr)
    }

    #[must_use]
    pub fn compute(&self, vehicle: &VehicleRecord) -> TcoSummary {
        let (breakdown, estimated_apr) = self.breakdown(vehicle);
        TcoSummary {
            tco: breakdown.tco(),
            financing_cost: breakdown.financing,
            estimated_apr,
        }
    }

    #[must_use]
    pub fn enrich(&self, record: VehicleRecord) -> EnrichedVehicle {
        let (breakdown, estimated_apr) = self.breakdown(&record);
        EnrichedVehicle {
            record,
            estimated_apr,
            financing_cost: breakdown.financing,
            tco: breakdown.tco(),
            tco_including_purchase_price: breakdown.including_purchase_price(),
            breakdown,
        }
    }

    pub fn enrich_all(&self, records: impl IntoIterator<Item = VehicleRecord>) -> Vec<EnrichedVehicle> {
        let enriched: Vec<EnrichedVehicle> = records.into_iter().map(|r| self.enrich(r)).collect();
        tracing::debug!("computed TCO for {} vehicle(s)", enriched.len());
        enriched
    }
}

/// TCO with the default assumptions: 60-month loan, credit 750, new-vehicle
/// pricing, age measured against the local clock.
#[must_use]
pub fn compute_tco(vehicle: &VehicleRecord) -> TcoSummary {
    CostModel::default().compute(vehicle)
}

/// How long and how hard the vehicle will be used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OwnershipProfile {
    pub years_owned: u32,
    pub miles_per_week: f64,
}

impl Default for OwnershipProfile {
    fn default() -> Self {
        Self {
            years_owned: 3,
            miles_per_week: 210.0,
        }
    }
}

impl OwnershipProfile {
    #[must_use]
    pub fn annual_miles(&self) -> f64 {
        self.miles_per_week * 52.0
    }
}

/// Ownership cost over a custom horizon, purchase price included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedTco {
    pub purchase_price: f64,
    pub depreciation: f64,
    pub running_costs: f64,
    pub registration: f64,
    pub mileage_penalty: f64,
    pub total: f64,
}

/// Extended ownership TCO.
///
/// Depreciation scales linearly from its 3-year figure. Annual mileage above
/// [`HIGH_MILEAGE_THRESHOLD`] is charged at [`MILEAGE_PENALTY_PER_MILE`] per
/// mile for every year owned.
#[must_use]
pub fn extended_tco(
    vehicle: &VehicleRecord,
    profile: &OwnershipProfile,
    registration_per_year: f64,
) -> ExtendedTco {
    let years = f64::from(profile.years_owned);
    let depreciation = vehicle.price * vehicle.depreciation_percent_3yr / 100.0 * (years / TCO_YEARS);
    let running_costs = vehicle.annual_running_cost() * years;
    let registration = registration_per_year * years;

    let annual_miles = profile.annual_miles();
    let mileage_penalty = if annual_miles > HIGH_MILEAGE_THRESHOLD {
        (annual_miles - HIGH_MILEAGE_THRESHOLD) * MILEAGE_PENALTY_PER_MILE * years
    } else {
        0.0
    };

    ExtendedTco {
        purchase_price: vehicle.price,
        depreciation,
        running_costs,
        registration,
        mileage_penalty,
        total: vehicle.price + depreciation + running_costs + registration + mileage_penalty,
    }
}
