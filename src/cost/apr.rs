//! APR estimation heuristic.

use chrono::Datelike;

/// Lower bound for any estimated APR (percent)
pub const APR_FLOOR: f64 = 2.9;
/// Upper bound for any estimated APR (percent)
pub const APR_CEILING: f64 = 15.0;

const NEW_BASE_APR: f64 = 4.5;
const USED_BASE_APR: f64 = 5.5;
const LUXURY_SURCHARGE: f64 = 0.5;

/// Makes financed at a small premium.
pub const LUXURY_MAKES: &[&str] = &["BMW", "Mercedes", "Audi", "Lexus", "Infiniti", "Acura"];

/// Whether `make` is in the luxury set. `Mercedes-Benz` counts as Mercedes.
#[must_use]
pub fn is_luxury_make(make: &str) -> bool {
    let make = make.trim();
    LUXURY_MAKES.iter().any(|l| make.eq_ignore_ascii_case(l))
        || make.to_ascii_lowercase().starts_with("mercedes")
}

/// Current calendar year from the local clock.
#[must_use]
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Estimate an APR using the local clock for the vehicle's age.
#[must_use]
pub fn estimate_apr(make: &str, year: i32, is_used: bool, credit_score: u32) -> f64 {
    estimate_apr_at(make, year, is_used, credit_score, current_year())
}

/// Estimate an APR (percent) relative to an explicit reference year.
///
/// Starts from 4.5 for new and 5.5 for used vehicles, adds 1.0 for vehicles
/// older than five years and a further 2.0 past ten, adjusts for credit
/// (+3.0 below 650, +1.5 for 650-699, -0.5 above 800) and adds 0.5 for
/// luxury makes. The result is clamped to `[APR_FLOOR, APR_CEILING]`.
#[must_use]
pub fn estimate_apr_at(
    make: &str,
    year: i32,
    is_used: bool,
    credit_score: u32,
    reference_year: i32,
) -> f64 {
    let mut apr = if is_used { USED_BASE_APR } else { NEW_BASE_APR };

    let age = reference_year - year;
    if age > 5 {
        apr += 1.0;
    }
    if age > 10 {
        apr += 2.0;
    }

    apr += match credit_score {
        0..=649 => 3.0,
        650..=699 => 1.5,
        700..=800 => 0.0,
        _ => -0.5,
    };

    if is_luxury_make(make) {
        apr += LUXURY_SURCHARGE;
    }

    apr.clamp(APR_FLOOR, APR_CEILING)
}
