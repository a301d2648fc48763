//! Pipeline orchestration for ranking runs.
//!
//! This module provides shared orchestration logic for load → rank → report
//! workflows, keeping CLI command handlers thin.

mod load;
mod output;
mod rank_stage;
mod report_stage;

pub use load::{load_live_prices, load_vehicles, parse_live_prices_str, parse_vehicles_str};
pub use output::OutputTarget;
pub use rank_stage::compute_ranking;
pub use report_stage::output_report;

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// A `--min-score` threshold was not met
    pub const THRESHOLD_FAILED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::THRESHOLD_FAILED, 1);
        assert_eq!(exit_codes::ERROR, 3);
    }
}
