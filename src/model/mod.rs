//! Vehicle data model.
//!
//! [`Vehicle`] is the raw input form with every attribute optional and the
//! legacy field spellings accepted. [`Vehicle::resolve`] applies
//! [`VehicleDefaults`] once, producing the [`VehicleRecord`] the cost model
//! and scoring engines work on:
//!
//! ```ignore
//! let mut vehicles = load_vehicles(&path)?;
//! feed.apply(&mut vehicles);
//! let defaults = VehicleDefaults::default();
//! let records: Vec<VehicleRecord> = vehicles.iter().map(|v| v.resolve(&defaults)).collect();
//! ```

mod filter;
mod market;
mod vehicle;

pub use filter::VehicleFilter;
pub use market::{
    LivePrice, LivePriceEntry, LivePriceFeed, LivePriceMatchSummary, MarketPosition,
    MarketStatus, MODEL_MATCH_THRESHOLD,
};
pub use vehicle::{FuelType, Vehicle, VehicleDefaults, VehicleRecord};
