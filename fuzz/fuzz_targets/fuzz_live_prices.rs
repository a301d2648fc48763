#![no_main]
use libfuzzer_sys::fuzz_target;

use autorank::model::Vehicle;

/// Fuzz live price feed parsing and matching against a fixed vehicle list.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(feed) = autorank::pipeline::parse_live_prices_str(s) {
        let mut vehicles = vec![
            Vehicle::new("Toyota", "Camry", 2024),
            Vehicle::new("Tesla", "Model 3", 2024),
        ];
        let summary = feed.apply(&mut vehicles);
        assert!(summary.matched() + summary.unmatched.len() <= vehicles.len());
    }
});
