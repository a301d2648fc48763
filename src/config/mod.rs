//! Configuration module for autorank.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Mode-based presets
//! - YAML config file loading and discovery
//! - CLI overrides layered over the loaded file
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use autorank::config::AppConfig;
//! use autorank::scoring::{Category, PriorityMode};
//!
//! // Use defaults
//! let config = AppConfig::default();
//!
//! // Start from a priority mode
//! let config = AppConfig::from_mode(PriorityMode::Bootstrap);
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .weight(Category::Style, 5.0)
//!     .years_owned(5)
//!     .build();
//!
//! // Load from file
//! use autorank::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.autorank.yaml` file in your project root or `~/.config/autorank/`:
//!
//! ```yaml
//! scoring:
//!   mode: budget
//!   weights:
//!     style: 1
//! ownership:
//!   credit_score: 700
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

// Re-export main types
pub use defaults::{
    DEFAULT_CREDIT_SCORE, DEFAULT_LOAN_TERM_MONTHS, DEFAULT_MILES_PER_WEEK, DEFAULT_YEARS_OWNED,
};
pub use types::{
    AppConfig, AppConfigBuilder, BrandsConfig, OutputConfig, OwnershipConfig, ScoringConfig,
};
pub use validation::{ConfigError, Validatable};

// Re-export file utilities
pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, user_config_dir, ConfigFileError, ConfigOverrides, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.autorank.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> crate::error::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().unwrap();
        for section in ["scoring", "ownership", "output", "brands"] {
            assert!(schema.contains(section), "schema missing {section}");
        }
    }
}
