#![no_main]
use libfuzzer_sys::fuzz_target;

use autorank::scoring::{RecommendationSession, StrategyKind};

/// Fuzz the full ranking path with whatever vehicles parse.
///
/// Both strategies run over the same population and must assign ranks
/// 1..=n in descending score order.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(vehicles) = autorank::pipeline::parse_vehicles_str(s) else {
        return;
    };
    for strategy in [StrategyKind::Weighted, StrategyKind::Composite] {
        let mut session = RecommendationSession::new().with_strategy(strategy);
        let ranked = session.rank(&vehicles);
        for (i, result) in ranked.iter().enumerate() {
            assert_eq!(result.rank, i + 1);
        }
        for pair in ranked.windows(2) {
            assert!(pair[0].weighted_score.total_cmp(&pair[1].weighted_score).is_ge());
        }
    }
});
