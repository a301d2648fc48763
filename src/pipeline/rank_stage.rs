//! Ranking stage.
//!
//! Overlays live prices, filters, enriches and scores a vehicle list with a
//! session built from the application config.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::model::{Vehicle, VehicleFilter};
use crate::reports::RankingReport;

use super::load_live_prices;

/// Run the ranking pipeline over already-loaded vehicles.
///
/// When `live_prices` is given, matching feed entries supersede list prices
/// before the population is resolved.
pub fn compute_ranking(
    config: &AppConfig,
    mut vehicles: Vec<Vehicle>,
    filter: VehicleFilter,
    live_prices: Option<&Path>,
    quiet: bool,
) -> Result<RankingReport> {
    if let Some(path) = live_prices {
        let feed = load_live_prices(path)
            .with_context(|| format!("Failed to load live prices: {}", path.display()))?;
        let summary = feed.apply(&mut vehicles);
        if !quiet {
            tracing::info!(
                "Live prices matched {} vehicle(s) ({} exact, {} fuzzy)",
                summary.matched(),
                summary.exact,
                summary.fuzzy
            );
        }
    }

    let mut session = config.build_session().with_filter(filter);

    if !quiet {
        tracing::info!(
            "Ranking {} vehicle(s) with the {} strategy ({} mode)",
            vehicles.len(),
            session.strategy(),
            session.mode()
        );
    }

    let results = session.rank(&vehicles);
    Ok(RankingReport::from_session(&session, results))
}
