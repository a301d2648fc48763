//! Cost model: APR estimation, loan financing and total cost of ownership.
//!
//! All functions here are pure. The only clock access is
//! [`estimate_apr`]/[`current_year`]; everything else takes the reference
//! year explicitly so results are reproducible.

mod apr;
mod breakdown;
mod financing;
mod tco;

pub use apr::{
    current_year, estimate_apr, estimate_apr_at, is_luxury_make, APR_CEILING, APR_FLOOR,
    LUXURY_MAKES,
};
pub use breakdown::PopulationCostBreakdown;
pub use financing::{financing_cost, monthly_payment, LoanTerms};
pub use tco::{
    compute_tco, extended_tco, CostModel, EnrichedVehicle, ExtendedTco, OwnershipProfile,
    TcoBreakdown, TcoSummary, DEFAULT_REGISTRATION_PER_YEAR, HIGH_MILEAGE_THRESHOLD,
    MILEAGE_PENALTY_PER_MILE, TCO_YEARS,
};
