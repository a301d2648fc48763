//! Human-readable justifications for scores.

use serde::{Deserialize, Serialize};

use super::weights::{Category, WeightVector};
use crate::cost::EnrichedVehicle;
use crate::model::FuelType;

/// Explanation attached when every category is disabled or zero-weighted
pub const NO_CATEGORIES_EXPLANATION: &str = "No categories enabled";

/// TCO above which a vehicle carries a high-cost advisory
pub const HIGH_TCO_THRESHOLD: f64 = 30_000.0;
/// Reliability below which a vehicle carries a reliability advisory
pub const LOW_RELIABILITY_THRESHOLD: f64 = 6.0;

/// Phrase for a category name; unknown names read as "overall value".
#[must_use]
pub fn phrase_for(name: &str) -> &'static str {
    Category::from_name(name).map_or("overall value", |c| c.phrase())
}

/// Summarize what the current weights favor.
///
/// Names the two heaviest categories with a positive weight; ties resolve in
/// category order. The weights are expected to be masked already, so
/// disabled categories carry zero.
#[must_use]
pub fn explain(weights: &WeightVector) -> String {
    let mut active: Vec<(Category, f64)> = weights.active().collect();
    // Stable sort keeps enumeration order among equal weights
    active.sort_by(|a, b| b.1.total_cmp(&a.1));

    match active.as_slice() {
        [] => NO_CATEGORIES_EXPLANATION.to_string(),
        [(only, _)] => format!("Best for: {}", only.phrase()),
        [(first, _), (second, _), ..] => {
            format!("Best for: {} + {}", first.phrase(), second.phrase())
        }
    }
}

/// Figures the narrative rules inspect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NarrativeInput {
    pub tco: f64,
    pub credibility: f64,
    pub reliability: f64,
    pub price: f64,
    pub fuel_type: FuelType,
}

/// One ordered narrative rule.
#[derive(Debug, Clone, Copy)]
pub struct NarrativeRule {
    pub name: &'static str,
    pub applies: fn(&NarrativeInput) -> bool,
    pub message: &'static str,
}

/// Message used when no rule applies
pub const DEFAULT_NARRATIVE: &str = "Balanced choice - reasonable across all factors";

fn stealth_wealth(i: &NarrativeInput) -> bool {
    i.tco < 20_000.0 && i.credibility > 70.0 && i.reliability > 7.0
}

fn statement_piece(i: &NarrativeInput) -> bool {
    i.credibility > 85.0 && i.price > 40_000.0
}

fn bootstrap(i: &NarrativeInput) -> bool {
    i.tco < 15_000.0 && i.reliability > 8.0
}

fn tech_flex(i: &NarrativeInput) -> bool {
    i.credibility > 80.0 && i.fuel_type == FuelType::Electric
}

fn workhorse(i: &NarrativeInput) -> bool {
    i.reliability > 8.5 && i.tco < 25_000.0
}

fn low_credibility(i: &NarrativeInput) -> bool {
    i.credibility < 60.0
}

fn risk_play(i: &NarrativeInput) -> bool {
    i.reliability < 6.0
}

/// Narrative rules, evaluated in order. First match wins.
pub static NARRATIVE_RULES: [NarrativeRule; 7] = [
    NarrativeRule {
        name: "stealth-wealth",
        applies: stealth_wealth,
        message: "Stealth wealth play - looks expensive, actually smart TCO",
    },
    NarrativeRule {
        name: "statement-piece",
        applies: statement_piece,
        message: "Statement piece - justifiable for fundraising ROI",
    },
    NarrativeRule {
        name: "bootstrap",
        applies: bootstrap,
        message: "Bootstrap mode - maximize capital efficiency",
    },
    NarrativeRule {
        name: "tech-flex",
        applies: tech_flex,
        message: "Tech founder flex - sustainable + premium image",
    },
    NarrativeRule {
        name: "workhorse",
        applies: workhorse,
        message: "Reliable workhorse - focus on business, not car issues",
    },
    NarrativeRule {
        name: "budget",
        applies: low_credibility,
        message: "Budget mode - may hurt founder credibility",
    },
    NarrativeRule {
        name: "risk-play",
        applies: risk_play,
        message: "Risk play - potential reliability issues ahead",
    },
];

#[must_use]
pub fn narrative(input: &NarrativeInput) -> &'static str {
    NARRATIVE_RULES
        .iter()
        .find(|rule| (rule.applies)(input))
        .map_or(DEFAULT_NARRATIVE, |rule| rule.message)
}

/// Kind of per-vehicle warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdvisoryKind {
    HighTco,
    ReliabilityConcern,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub message: String,
}

#[must_use]
pub fn advisories(vehicle: &EnrichedVehicle) -> Vec<Advisory> {
    let mut out = Vec::new();
    if vehicle.tco > HIGH_TCO_THRESHOLD {
        out.push(Advisory {
            kind: AdvisoryKind::HighTco,
            message: "Consider more economical alternatives if budget is a concern".to_string(),
        });
    }
    if vehicle.record.reliability < LOW_RELIABILITY_THRESHOLD {
        out.push(Advisory {
            kind: AdvisoryKind::ReliabilityConcern,
            message: "Research common issues and consider extended warranty".to_string(),
        });
    }
    out
}

/// 1-10 value rating derived from TCO; cheaper ownership rates higher.
#[must_use]
pub fn value_rating(tco: f64) -> u8 {
    let raw = ((50_000.0 - tco) / 50_000.0 * 10.0).round();
    if raw.is_nan() {
        return 1;
    }
    raw.clamp(1.0, 10.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> NarrativeInput {
        NarrativeInput {
            tco: 30_000.0,
            credibility: 65.0,
            reliability: 7.0,
            price: 30_000.0,
            fuel_type: FuelType::Gas,
        }
    }

    #[test]
    fn test_explain_top_two() {
        assert_eq!(
            explain(&WeightVector::default()),
            "Best for: low total cost + affordable price"
        );
    }

    #[test]
    fn test_explain_ties_use_category_order() {
        assert_eq!(
            explain(&WeightVector::uniform(1.0)),
            "Best for: affordable price + low total cost"
        );
    }

    #[test]
    fn test_explain_single_and_none() {
        let mut w = WeightVector::uniform(0.0);
        w.fuel = 2.0;
        assert_eq!(explain(&w), "Best for: excellent fuel economy");
        assert_eq!(explain(&WeightVector::uniform(0.0)), NO_CATEGORIES_EXPLANATION);
    }

    #[test]
    fn test_phrase_fallback() {
        assert_eq!(phrase_for("reliability"), "proven reliability");
        assert_eq!(phrase_for("towing"), "overall value");
    }

    #[test]
    fn test_narrative_first_match_wins() {
        // Matches both stealth-wealth and bootstrap; the earlier rule wins
        let i = NarrativeInput {
            tco: 12_000.0,
            credibility: 75.0,
            reliability: 9.0,
            ..input()
        };
        assert_eq!(narrative(&i), NARRATIVE_RULES[0].message);
    }

    #[test]
    fn test_narrative_each_rule() {
        let cases = [
            (
                NarrativeInput { credibility: 90.0, price: 60_000.0, ..input() },
                "statement-piece",
            ),
            (
                NarrativeInput { tco: 14_000.0, reliability: 8.5, ..input() },
                "bootstrap",
            ),
            (
                NarrativeInput { credibility: 82.0, fuel_type: FuelType::Electric, ..input() },
                "tech-flex",
            ),
            (
                NarrativeInput { reliability: 9.0, tco: 24_000.0, ..input() },
                "workhorse",
            ),
            (NarrativeInput { credibility: 40.0, ..input() }, "budget"),
            (NarrativeInput { reliability: 5.0, ..input() }, "risk-play"),
        ];
        for (case, expected) in cases {
            let rule = NARRATIVE_RULES
                .iter()
                .find(|r| (r.applies)(&case))
                .map(|r| r.name);
            assert_eq!(rule, Some(expected), "{case:?}");
        }
        assert_eq!(narrative(&input()), DEFAULT_NARRATIVE);
    }

    #[test]
    fn test_value_rating() {
        assert_eq!(value_rating(0.0), 10);
        assert_eq!(value_rating(25_000.0), 5);
        assert_eq!(value_rating(60_000.0), 1);
        assert_eq!(value_rating(-10_000.0), 10);
    }
}
