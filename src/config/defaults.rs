//! Default values and mode-based presets.

use super::types::{AppConfig, ScoringConfig};
use crate::scoring::{PriorityMode, StrategyKind};

// ============================================================================
// Default Value Constants
// ============================================================================

/// Default ownership horizon in years.
pub const DEFAULT_YEARS_OWNED: u32 = 3;

/// Default weekly mileage (about 10,900 miles a year).
pub const DEFAULT_MILES_PER_WEEK: f64 = 210.0;

/// Default borrower credit score.
pub const DEFAULT_CREDIT_SCORE: u32 = 750;

/// Default loan term in months.
pub const DEFAULT_LOAN_TERM_MONTHS: u32 = 60;

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` tuned for a priority mode.
    ///
    /// Composite modes also select the composite strategy so the resulting
    /// file is self-describing.
    #[must_use]
    pub fn from_mode(mode: PriorityMode) -> Self {
        let strategy = if mode.multipliers().is_none() {
            StrategyKind::Composite
        } else {
            StrategyKind::Weighted
        };
        Self {
            scoring: ScoringConfig {
                strategy,
                mode,
                ..ScoringConfig::default()
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mode_weight_shaping() {
        let config = AppConfig::from_mode(PriorityMode::Efficiency);
        assert_eq!(config.scoring.mode, PriorityMode::Efficiency);
        assert_eq!(config.scoring.strategy, StrategyKind::Weighted);
    }

    #[test]
    fn test_from_mode_composite() {
        let config = AppConfig::from_mode(PriorityMode::Bootstrap);
        assert_eq!(config.scoring.strategy, StrategyKind::Composite);
    }

    #[test]
    fn test_balanced_is_default() {
        assert_eq!(AppConfig::from_mode(PriorityMode::Balanced), AppConfig::default());
    }
}
