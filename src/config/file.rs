//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::reports::ReportFormat;
use crate::scoring::{Category, PriorityMode, StrategyKind, WeightUpdate};
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".autorank.yaml",
    ".autorank.yml",
    "autorank.yaml",
    "autorank.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/autorank/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    // 1. Use explicit path if provided
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        tracing::warn!("Config file {} not found; searching defaults", path.display());
    }

    // 2. Search current directory
    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    // 3. Search git root (if in a repo)
    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    // 4. Search user config directory
    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join("autorank")) {
            return Some(path);
        }
    }

    // 5. Search home directory
    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Directory `config init` writes to when no path is given.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("autorank"))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<ConfigFileError> for crate::error::AutorankError {
    fn from(err: ConfigFileError) -> Self {
        match err {
            ConfigFileError::Io(source) => Self::from(source),
            other => Self::config(other.to_string()),
        }
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

/// Settings given on the command line.
///
/// Each `Some` value (or raised flag) replaces the file's setting, even when
/// it matches the built-in default. Unset fields leave the file alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub strategy: Option<StrategyKind>,
    pub mode: Option<PriorityMode>,
    pub weights: WeightUpdate,
    /// Categories to switch off; categories disabled by the file stay off
    pub disabled: Vec<Category>,
    pub years_owned: Option<u32>,
    pub miles_per_week: Option<f64>,
    pub credit_score: Option<u32>,
    pub loan_term_months: Option<u32>,
    pub treat_as_used: bool,
    pub reference_year: Option<i32>,
    pub format: Option<ReportFormat>,
    pub file: Option<PathBuf>,
    pub no_color: bool,
    pub top: Option<usize>,
    pub breakdown: bool,
}

impl ConfigOverrides {
    /// Layer these overrides onto a loaded config.
    pub fn apply(&self, config: &mut AppConfig) {
        let scoring = &mut config.scoring;
        if let Some(strategy) = self.strategy {
            scoring.strategy = strategy;
        }
        if let Some(mode) = self.mode {
            scoring.mode = mode;
        }
        for (category, weight) in self.weights.iter() {
            scoring.weights.set(category, weight);
        }
        for &category in &self.disabled {
            scoring.enabled.set(category, false);
        }

        let own = &mut config.ownership;
        if let Some(years) = self.years_owned {
            own.years_owned = years;
        }
        if let Some(miles) = self.miles_per_week {
            own.miles_per_week = miles;
        }
        if let Some(score) = self.credit_score {
            own.credit_score = score;
        }
        if let Some(term) = self.loan_term_months {
            own.loan_term_months = term;
        }
        if self.treat_as_used {
            own.treat_as_used = true;
        }
        if self.reference_year.is_some() {
            own.reference_year = self.reference_year;
        }

        let output = &mut config.output;
        if let Some(format) = self.format {
            output.format = format;
        }
        if self.file.is_some() {
            output.file.clone_from(&self.file);
        }
        if self.no_color {
            output.no_color = true;
        }
        if self.top.is_some() {
            output.top = self.top;
        }
        if self.breakdown {
            output.breakdown = true;
        }
    }
}

impl AppConfig {
    /// Load from file, then apply CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        overrides.apply(&mut config);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# autorank configuration
# Place this file at .autorank.yaml in your project root or ~/.config/autorank/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# autorank Configuration File
# ============================
#
# Place it at:
#   - .autorank.yaml in your project root
#   - ~/.config/autorank/autorank.yaml for global config
#
# CLI arguments always override file settings.

# Scoring configuration
scoring:
  # Strategy: weighted, composite
  strategy: weighted
  # Mode: budget, luxury, efficiency, balanced, bootstrap, fundraising, stealth
  mode: balanced
  # Baseline category weights (non-negative)
  weights:
    cost: 3
    tco: 4
    reliability: 3
    style: 2
    fuel: 3
  # Disable a category entirely
  enabled:
    cost: true
    tco: true
    reliability: true
    style: true
    fuel: true

# Ownership and financing assumptions
ownership:
  years_owned: 3
  miles_per_week: 210
  credit_score: 750
  loan_term_months: 60
  registration_per_year: 500
  treat_as_used: false
  # Fix the year used for vehicle age (defaults to the current year)
  # reference_year: 2025

# Output configuration
output:
  # Format: auto, summary, table, json, csv, markdown
  format: auto
  # Output file path (omit for stdout)
  # file: ranking.json
  # Disable colored output
  no_color: false
  # Show only the best N vehicles
  # top: 5
  # Include the population cost breakdown
  breakdown: false

# Brand reference data (merged over the built-in table)
brands:
  overrides: {}
  #   Kia:
  #     prestige: 60
  #     depreciation_curve: moderate
  #     credibility: 55
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".autorank.yaml");
        std::fs::write(&config_path, "scoring:\n  mode: budget\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
scoring:
  mode: luxury
  weights:
    style: 6
ownership:
  credit_score: 700
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.scoring.mode, PriorityMode::Luxury);
        assert_eq!(config.scoring.weights.style, 6.0);
        assert_eq!(config.ownership.credit_score, 700);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_bad_yaml() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("bad.yaml");
        std::fs::write(&config_path, "scoring:\n  mode: [unclosed\n").unwrap();

        let result = load_config_file(&config_path);
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn test_overrides_apply_over_loaded_config() {
        let mut config = AppConfig::builder()
            .weight(Category::Fuel, 7.0)
            .credit_score(680)
            .disable(Category::Fuel)
            .build();
        let overrides = ConfigOverrides {
            mode: Some(PriorityMode::Stealth),
            weights: WeightUpdate::single(Category::Cost, 9.0),
            disabled: vec![Category::Style],
            format: Some(ReportFormat::Json),
            ..ConfigOverrides::default()
        };

        overrides.apply(&mut config);

        assert_eq!(config.scoring.mode, PriorityMode::Stealth);
        assert_eq!(config.scoring.weights.cost, 9.0);
        // Untouched by the overrides
        assert_eq!(config.scoring.weights.fuel, 7.0);
        assert_eq!(config.ownership.credit_score, 680);
        assert!(!config.scoring.enabled.style);
        assert!(!config.scoring.enabled.fuel);
        assert_eq!(config.output.format, ReportFormat::Json);
    }

    #[test]
    fn test_empty_overrides_change_nothing() {
        let mut config = AppConfig::builder()
            .mode(PriorityMode::Luxury)
            .years_owned(6)
            .output_format(ReportFormat::Csv)
            .build();
        let before = config.clone();
        ConfigOverrides::default().apply(&mut config);
        assert_eq!(config, before);
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config();
        assert!(example.contains("scoring:"));
        assert!(example.contains("years_owned"));

        let parsed: AppConfig = serde_yaml::from_str(&example).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn test_full_example_config_parses() {
        let parsed: AppConfig = serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "scoring:\n  strategy: composite").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}
