//! **A library for ranking vehicles by what they actually cost to own.**
//!
//! `autorank` turns a list of vehicle records into an ordered shortlist. It
//! estimates a loan APR for each vehicle, prices the loan, computes a 3-year
//! total cost of ownership, normalizes every scored dimension onto a common
//! scale and blends them with user-tunable weights. Each result carries a
//! short explanation of what the current weights favour.
//!
//! The library powers both a command-line interface (CLI) for direct use and
//! a Rust API for embedding the engine in your own applications.
//!
//! ## Key Features
//!
//! - **Cost Model**: APR heuristic bounded to `[2.9, 15.0]`, amortized loan
//!   financing cost, and a 3-year TCO reported both with and without the
//!   purchase price.
//! - **Two Scoring Strategies**: a weighted average of min-max normalized
//!   categories, and a composite of percentile-ranked ownership cost, brand
//!   credibility and opportunity cost.
//! - **Priority Modes**: presets such as `budget`, `luxury` and `efficiency`
//!   that reshape the weights, and `bootstrap`, `fundraising` and `stealth`
//!   that select a composite profile.
//! - **Live Market Prices**: an optional price feed that supersedes list
//!   prices, matched by make and (fuzzy) model.
//! - **Flexible Reporting**: summary, table, JSON, CSV and Markdown output.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`Vehicle`] is the lenient input form; resolving it with
//!   [`VehicleDefaults`] yields the [`VehicleRecord`] the engines work on.
//! - **[`cost`]**: APR estimation, financing and TCO via [`CostModel`].
//! - **[`scoring`]**: the [`ScoringStrategy`] implementations and the
//!   stateful [`RecommendationSession`].
//! - **[`config`]**: the YAML-backed [`AppConfig`].
//! - **[`pipeline`]**: load, rank and report stages shared by the CLI.
//! - **[`reports`]**: output generators behind [`ReportGenerator`].
//!
//! ## Getting Started
//!
//! ```
//! use autorank::model::Vehicle;
//! use autorank::scoring::RecommendationSession;
//!
//! let vehicles = vec![
//!     Vehicle::new("Toyota", "Camry", 2024).with_price(28_000.0),
//!     Vehicle::new("BMW", "3 Series", 2024).with_price(46_000.0),
//! ];
//!
//! let mut session = RecommendationSession::new();
//! let ranked = session.rank(&vehicles);
//!
//! assert_eq!(ranked[0].rank, 1);
//! for result in &ranked {
//!     println!("{} {:.2} {}", result.name(), result.weighted_score, result.explanation);
//! }
//! ```
//!
//! ### Re-weighting without re-enriching
//!
//! ```
//! use autorank::model::Vehicle;
//! use autorank::scoring::{Category, RecommendationSession, WeightUpdate};
//!
//! let mut session = RecommendationSession::new();
//! session.rank(&[Vehicle::new("Honda", "Civic", 2024)]);
//!
//! session.update_weights(&WeightUpdate::single(Category::Style, 10.0))?;
//! let reranked = session.rerank();
//! assert_eq!(reranked.len(), 1);
//! # Ok::<(), autorank::AutorankError>(())
//! ```
//!
//! ### Estimating an APR
//!
//! ```
//! use autorank::cost::estimate_apr_at;
//!
//! assert_eq!(estimate_apr_at("Toyota", 2025, false, 750, 2025), 4.5);
//! assert_eq!(estimate_apr_at("BMW", 2019, true, 620, 2025), 10.0);
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! This documentation is for the `autorank` library crate. The `autorank`
//! binary exposes `rank`, `apr`, `tco` and `config` subcommands.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Cast safety: counts and ranks are cast to f64 for averaging and
    // percentile math; all values are bounded in practice
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Report renderers are long sequences of writeln! calls
    clippy::too_many_lines,
    // Option structs legitimately use several bools for toggle flags
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    // Money and score comparisons against exact constants are intentional
    clippy::float_cmp,
    // Variable names like `min`/`max` or `tco`/`apr` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod cost;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod scoring;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use config::{BrandsConfig, OutputConfig, OwnershipConfig, ScoringConfig};
pub use cost::{compute_tco, estimate_apr, CostModel, EnrichedVehicle, TcoSummary};
pub use error::{AutorankError, ErrorContext, OptionContext, Result};
pub use model::{FuelType, LivePriceFeed, Vehicle, VehicleDefaults, VehicleFilter, VehicleRecord};
pub use pipeline::{load_vehicles, parse_vehicles_str};
pub use reports::{RankingReport, ReportFormat, ReportGenerator};
pub use scoring::{
    explain, Category, CompositeEngine, PriorityMode, RecommendationSession, ScoredVehicle,
    ScoringStrategy, StrategyKind, WeightVector, WeightedEngine,
};
