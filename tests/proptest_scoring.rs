//! Property-based tests for the cost model and scoring engines.
//!
//! Checks numeric bounds and ordering invariants over random populations.

use autorank::cost::{estimate_apr_at, financing_cost, CostModel, APR_CEILING, APR_FLOOR};
use autorank::model::Vehicle;
use autorank::scoring::{
    min_max_score, percentile_score, Direction, RecommendationSession, StrategyKind, WeightVector,
};
use proptest::prelude::*;

const MAKES: [&str; 6] = ["Toyota", "BMW", "Tesla", "Honda", "Lexus", "Kia"];

fn vehicle_strategy() -> impl Strategy<Value = Vehicle> {
    (
        0..MAKES.len(),
        2000i32..=2026,
        5_000.0f64..150_000.0,
        0.0f64..70.0,
        (0.0f64..5_000.0, 0.0f64..3_000.0, 0.0f64..5_000.0),
        (0.0f64..=10.0, 0.0f64..=10.0),
    )
        .prop_map(|(make, year, price, dep, (fuel, maint, ins), (rel, style))| {
            Vehicle::new(MAKES[make], "Model", year)
                .with_price(price)
                .with_depreciation(dep)
                .with_running_costs(fuel, maint, ins)
                .with_reliability(rel)
                .with_style(style)
        })
}

fn weights_strategy() -> impl Strategy<Value = WeightVector> {
    (0.0f64..10.0, 0.0f64..10.0, 0.0f64..10.0, 0.0f64..10.0, 0.0f64..10.0).prop_map(
        |(cost, tco, reliability, style, fuel)| WeightVector {
            cost,
            tco,
            reliability,
            style,
            fuel,
        },
    )
}

fn session(weights: WeightVector) -> RecommendationSession {
    RecommendationSession::new()
        .with_cost_model(CostModel::new().at_year(2025))
        .with_weights(weights)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn test_apr_stays_within_bounds(
        make in "\\PC{0,20}",
        year in 1950i32..=2030,
        used in any::<bool>(),
        credit in 300u32..=850,
    ) {
        let apr = estimate_apr_at(&make, year, used, credit, 2025);
        prop_assert!((APR_FLOOR..=APR_CEILING).contains(&apr), "APR {} out of bounds", apr);
    }

    #[test]
    fn test_zero_rate_financing_is_free(principal in 0.0f64..1_000_000.0, term in 0u32..=120) {
        prop_assert_eq!(financing_cost(principal, 0.0, term), 0.0);
    }

    #[test]
    fn test_min_max_stays_on_scale(values in prop::collection::vec(-1e6f64..1e6, 2..50), idx in any::<prop::sample::Index>()) {
        let value = values[idx.index(values.len())];
        for direction in [Direction::HigherIsBetter, Direction::LowerIsBetter] {
            let score = min_max_score(value, &values, direction);
            prop_assert!((0.0..=10.0).contains(&score), "score {} out of range", score);
        }
    }

    #[test]
    fn test_equal_population_is_neutral(value in -1e6f64..1e6, n in 1usize..20) {
        let values = vec![value; n];
        prop_assert_eq!(min_max_score(value, &values, Direction::LowerIsBetter), 5.0);
    }

    #[test]
    fn test_percentile_is_monotonic(
        values in prop::collection::vec(0.0f64..1_000.0, 2..50),
        a in 0.0f64..1_000.0,
        b in 0.0f64..1_000.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo_score = percentile_score(lo, &values, Direction::HigherIsBetter);
        let hi_score = percentile_score(hi, &values, Direction::HigherIsBetter);
        prop_assert!(lo_score <= hi_score);
        prop_assert!((0.0..=100.0).contains(&lo_score));
        prop_assert!((0.0..=100.0).contains(&hi_score));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_weighted_scores_stay_on_scale(
        vehicles in prop::collection::vec(vehicle_strategy(), 0..25),
        weights in weights_strategy(),
    ) {
        let ranked = session(weights).rank(&vehicles);
        prop_assert_eq!(ranked.len(), vehicles.len());
        for result in &ranked {
            prop_assert!(
                (0.0..=10.0).contains(&result.weighted_score),
                "score {} out of range",
                result.weighted_score
            );
        }
    }

    #[test]
    fn test_ranking_is_deterministic(
        vehicles in prop::collection::vec(vehicle_strategy(), 0..25),
        weights in weights_strategy(),
        composite in any::<bool>(),
    ) {
        let strategy = if composite { StrategyKind::Composite } else { StrategyKind::Weighted };
        let first = session(weights).with_strategy(strategy).rank(&vehicles);
        let second = session(weights).with_strategy(strategy).rank(&vehicles);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_results_sorted_descending(
        vehicles in prop::collection::vec(vehicle_strategy(), 0..25),
        weights in weights_strategy(),
        composite in any::<bool>(),
    ) {
        let strategy = if composite { StrategyKind::Composite } else { StrategyKind::Weighted };
        let ranked = session(weights).with_strategy(strategy).rank(&vehicles);
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].weighted_score >= pair[1].weighted_score);
            prop_assert_eq!(pair[0].rank + 1, pair[1].rank);
        }
    }
}
