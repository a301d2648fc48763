//! Amortized loan arithmetic.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Loan assumptions used when financing a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LoanTerms {
    /// Loan term in months
    pub term_months: u32,
    /// Borrower credit score
    pub credit_score: u32,
    /// Price the loan as a used-vehicle loan
    pub treat_as_used: bool,
}

impl Default for LoanTerms {
    fn default() -> Self {
        Self {
            term_months: 60,
            credit_score: 750,
            treat_as_used: false,
        }
    }
}

/// Fixed monthly payment for an amortized loan.
///
/// A zero rate degenerates to straight division; a zero term yields 0.
#[must_use]
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, term_months: u32) -> f64 {
    if term_months == 0 {
        return 0.0;
    }
    let n = f64::from(term_months);
    if annual_rate_percent == 0.0 {
        return principal / n;
    }
    let r = annual_rate_percent / 100.0 / 12.0;
    let growth = (1.0 + r).powf(n);
    principal * r * growth / (growth - 1.0)
}

/// Total interest paid over the loan, rounded to whole currency units.
#[must_use]
pub fn financing_cost(principal: f64, annual_rate_percent: f64, term_months: u32) -> f64 {
    if annual_rate_percent == 0.0 || term_months == 0 {
        return 0.0;
    }
    let payment = monthly_payment(principal, annual_rate_percent, term_months);
    (payment * f64::from(term_months) - principal).round()
}
