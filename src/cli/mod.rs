//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod cost;
mod rank;

pub use cost::{run_apr, run_tco, TcoOptions};
pub use rank::{
    build_filter, ensure_valid, parse_category, parse_weight_assignment, run_rank, RankOptions,
};

// Re-export config types used by handlers
pub use crate::config::{AppConfig, ConfigOverrides};
