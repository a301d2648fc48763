//! Cost model tests: APR heuristic, loan financing and TCO figures.

use autorank::cost::{
    current_year, estimate_apr, estimate_apr_at, extended_tco, financing_cost, monthly_payment,
    CostModel, LoanTerms, OwnershipProfile, PopulationCostBreakdown, APR_CEILING, APR_FLOOR,
};
use autorank::model::{Vehicle, VehicleDefaults};

fn camry() -> Vehicle {
    Vehicle::new("Toyota", "Camry", 2025)
        .with_price(30_000.0)
        .with_depreciation(30.0)
        .with_running_costs(1_500.0, 600.0, 1_400.0)
}

mod apr {
    use super::*;

    #[test]
    fn test_current_year_new_vehicle_good_credit() {
        assert_eq!(estimate_apr("Toyota", current_year(), false, 750), 4.5);
    }

    #[test]
    fn test_used_old_luxury_subprime() {
        // 5.5 used + 1.0 age + 3.0 credit + 0.5 luxury
        assert_eq!(estimate_apr("BMW", current_year() - 6, true, 620), 10.0);
    }

    #[test]
    fn test_credit_tiers() {
        assert_eq!(estimate_apr_at("Honda", 2025, false, 680, 2025), 6.0);
        assert_eq!(estimate_apr_at("Honda", 2025, false, 700, 2025), 4.5);
        assert_eq!(estimate_apr_at("Honda", 2025, false, 820, 2025), 4.0);
    }

    #[test]
    fn test_ceiling_and_floor_hold() {
        let worst = estimate_apr_at("Mercedes-Benz", 1990, true, 300, 2025);
        assert_eq!(worst, 12.0);
        assert!(worst <= APR_CEILING);

        let best = estimate_apr_at("Kia", 2025, false, 850, 2025);
        assert_eq!(best, 4.0);
        assert!(best >= APR_FLOOR);
    }

    #[test]
    fn test_luxury_match_is_case_insensitive() {
        assert_eq!(estimate_apr_at("lexus", 2025, false, 750, 2025), 5.0);
        assert_eq!(estimate_apr_at("  AUDI ", 2025, false, 750, 2025), 5.0);
    }
}

mod financing {
    use super::*;

    #[test]
    fn test_zero_rate_is_free() {
        assert_eq!(financing_cost(42_000.0, 0.0, 60), 0.0);
        assert_eq!(monthly_payment(42_000.0, 0.0, 60), 700.0);
    }

    #[test]
    fn test_amortized_interest() {
        assert_eq!(financing_cost(30_000.0, 4.5, 60), 3_557.0);
        let payment = monthly_payment(30_000.0, 4.5, 60);
        assert!((payment - 559.29).abs() < 0.01);
    }

    #[test]
    fn test_longer_terms_cost_more() {
        assert!(financing_cost(30_000.0, 6.0, 72) > financing_cost(30_000.0, 6.0, 48));
    }
}

mod tco {
    use super::*;

    #[test]
    fn test_three_year_tco_excludes_purchase_price() {
        let model = CostModel::new().at_year(2025);
        let enriched = model.enrich(camry().resolve(&VehicleDefaults::default()));

        assert_eq!(enriched.estimated_apr, 4.5);
        assert_eq!(enriched.financing_cost, 3_557.0);
        assert_eq!(enriched.tco, 23_057.0);
        assert_eq!(enriched.tco_including_purchase_price, 54_557.0);
        assert_eq!(enriched.breakdown.depreciation, 9_000.0);
        assert_eq!(enriched.breakdown.registration, 1_500.0);
    }

    #[test]
    fn test_worse_credit_raises_tco() {
        let record = camry().resolve(&VehicleDefaults::default());
        let good = CostModel::new().at_year(2025).compute(&record);
        let poor = CostModel::new()
            .at_year(2025)
            .with_loan(LoanTerms {
                credit_score: 600,
                ..LoanTerms::default()
            })
            .compute(&record);
        assert_eq!(poor.estimated_apr, 7.5);
        assert!(poor.tco > good.tco);
        assert!(poor.financing_cost > good.financing_cost);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let record = Vehicle::default().resolve(&VehicleDefaults::default());
        assert_eq!(record.make, "Unknown");
        assert_eq!(record.price, 25_000.0);
        let enriched = CostModel::new().at_year(2025).enrich(record);
        assert!(enriched.tco > 0.0);
    }

    #[test]
    fn test_extended_tco_scales_with_years_and_mileage() {
        let record = camry().resolve(&VehicleDefaults::default());
        let calm = OwnershipProfile {
            years_owned: 6,
            miles_per_week: 200.0,
        };
        let extended = extended_tco(&record, &calm, 500.0);
        assert_eq!(extended.depreciation, 18_000.0);
        assert_eq!(extended.running_costs, 21_000.0);
        assert_eq!(extended.registration, 3_000.0);
        assert_eq!(extended.mileage_penalty, 0.0);
        assert_eq!(extended.total, 72_000.0);

        let heavy = OwnershipProfile {
            years_owned: 3,
            miles_per_week: 400.0,
        };
        // 20,800 miles a year, 5,800 over the threshold
        let extended = extended_tco(&record, &heavy, 500.0);
        assert!((extended.mileage_penalty - 2_610.0).abs() < 1e-6);
    }

    #[test]
    fn test_population_breakdown_averages() {
        let defaults = VehicleDefaults::default();
        let records = vec![
            camry().resolve(&defaults),
            Vehicle::new("Honda", "Civic", 2025)
                .with_price(20_000.0)
                .with_depreciation(30.0)
                .with_running_costs(1_000.0, 400.0, 1_000.0)
                .resolve(&defaults),
        ];
        let breakdown = PopulationCostBreakdown::from_records(&records, 500.0).unwrap();
        assert_eq!(breakdown.vehicle_count, 2);
        assert_eq!(breakdown.purchase_price, 25_000.0);
        assert_eq!(breakdown.depreciation, 7_500.0);
        assert_eq!(breakdown.fuel, 3_750.0);
        assert_eq!(breakdown.registration, 1_500.0);
        assert!(PopulationCostBreakdown::from_records(&[], 500.0).is_none());
    }
}
