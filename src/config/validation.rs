//! Configuration validation for autorank.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, BrandsConfig, OutputConfig, OwnershipConfig, ScoringConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.scoring.validate());
        errors.extend(self.ownership.validate());
        errors.extend(self.output.validate());
        errors.extend(self.brands.validate());
        errors
    }
}

impl Validatable for ScoringConfig {
    fn validate(&self) -> Vec<ConfigError> {
        self.weights
            .iter()
            .filter(|(_, w)| !w.is_finite() || *w < 0.0)
            .map(|(category, w)| {
                ConfigError::new(
                    format!("scoring.weights.{category}"),
                    format!("Weight must be a non-negative number, got {w}"),
                )
            })
            .collect()
    }
}

impl Validatable for OwnershipConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.years_owned == 0 {
            errors.push(ConfigError::new(
                "ownership.years_owned",
                "Years owned must be at least 1",
            ));
        }
        if !self.miles_per_week.is_finite() || self.miles_per_week < 0.0 {
            errors.push(ConfigError::new(
                "ownership.miles_per_week",
                format!("Miles per week must be non-negative, got {}", self.miles_per_week),
            ));
        }
        if !(300..=850).contains(&self.credit_score) {
            errors.push(ConfigError::new(
                "ownership.credit_score",
                format!(
                    "Credit score must be between 300 and 850, got {}",
                    self.credit_score
                ),
            ));
        }
        if self.loan_term_months == 0 {
            errors.push(ConfigError::new(
                "ownership.loan_term_months",
                "Loan term must be at least 1 month",
            ));
        }
        if !self.registration_per_year.is_finite() || self.registration_per_year < 0.0 {
            errors.push(ConfigError::new(
                "ownership.registration_per_year",
                format!(
                    "Registration fee must be non-negative, got {}",
                    self.registration_per_year
                ),
            ));
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        // Validate output file path if specified
        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        if self.top == Some(0) {
            errors.push(ConfigError::new("output.top", "Top must be at least 1"));
        }

        errors
    }
}

impl Validatable for BrandsConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for (name, profile) in &self.overrides {
            if !(0.0..=100.0).contains(&profile.prestige) {
                errors.push(ConfigError::new(
                    format!("brands.overrides.{name}.prestige"),
                    format!("Prestige must be between 0 and 100, got {}", profile.prestige),
                ));
            }
            if !(0.0..=100.0).contains(&profile.credibility) {
                errors.push(ConfigError::new(
                    format!("brands.overrides.{name}.credibility"),
                    format!(
                        "Credibility must be between 0 and 100, got {}",
                        profile.credibility
                    ),
                ));
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{BrandProfile, Category, DepreciationCurve};
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.is_valid());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let config = AppConfig::builder()
            .weight(Category::Tco, -1.0)
            .weight(Category::Fuel, f64::INFINITY)
            .build();
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "scoring.weights.tco");
        assert_eq!(errors[1].field, "scoring.weights.fuel");
    }

    #[test]
    fn test_zero_weights_are_valid() {
        let config = AppConfig::builder()
            .weights(crate::scoring::WeightVector::uniform(0.0))
            .build();
        assert!(config.is_valid());
    }

    #[test]
    fn test_ownership_bounds() {
        let ownership = OwnershipConfig {
            years_owned: 0,
            credit_score: 900,
            loan_term_months: 0,
            miles_per_week: -5.0,
            ..OwnershipConfig::default()
        };
        let fields: Vec<String> = ownership.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "ownership.years_owned",
                "ownership.miles_per_week",
                "ownership.credit_score",
                "ownership.loan_term_months",
            ]
        );
    }

    #[test]
    fn test_output_file_parent_must_exist() {
        let output = OutputConfig {
            file: Some(PathBuf::from("/nonexistent/dir/report.json")),
            ..OutputConfig::default()
        };
        let errors = output.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Parent directory"));
    }

    #[test]
    fn test_brand_override_range() {
        let config = AppConfig::builder()
            .brand("Kia", BrandProfile::new(120.0, DepreciationCurve::Moderate, 55.0))
            .build();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "brands.overrides.Kia.prestige: Prestige must be between 0 and 100, got 120");
    }
}
