//! Vehicle scoring and ranking.
//!
//! Two strategies implement [`ScoringStrategy`]:
//!
//! - [`WeightedEngine`]: min-max normalizes price, TCO and fuel cost onto
//!   0-10, takes reliability and style as-is, and blends them with a
//!   user-tunable [`WeightVector`]. Disabled or zero-weighted categories drop
//!   out of both numerator and denominator.
//! - [`CompositeEngine`]: percentile-ranks extended ownership cost, brand
//!   credibility and opportunity cost, and blends them with a
//!   [`CompositeProfile`].
//!
//! [`RecommendationSession`] wraps both with the state an interactive caller
//! needs: weights, enable flags, priority mode, ownership profile, brand
//! table and the percentile cache.
//!
//! # Example
//!
//! ```ignore
//! let mut session = RecommendationSession::new();
//! let ranked = session.rank(&vehicles);
//! session.update_weights(&WeightUpdate::single(Category::Style, 8.0))?;
//! let reranked = session.rerank();
//! ```

mod brand;
mod composite;
mod engine;
mod explain;
mod normalize;
mod session;
mod weights;

pub use brand::{BrandProfile, BrandTable, DepreciationCurve};
pub use composite::{
    brand_profile, credibility_score, opportunity_cost, reliability_penalty, CompositeDetail, CompositeEngine,
    CompositeProfile, CompositeWeights, OPPORTUNITY_RATE, RELIABILITY_BASELINE,
};
pub use engine::{round2, ScoredVehicle, ScoringStrategy, StrategyKind, WeightedEngine};
pub use explain::{
    advisories, explain, narrative, phrase_for, value_rating, Advisory, AdvisoryKind,
    NarrativeInput, NarrativeRule, DEFAULT_NARRATIVE, HIGH_TCO_THRESHOLD,
    LOW_RELIABILITY_THRESHOLD, NARRATIVE_RULES, NO_CATEGORIES_EXPLANATION,
};
pub use normalize::{
    min_max_score, percentile_score, value_range, Direction, PercentileCache, Population,
    NEUTRAL_MIN_MAX_SCORE, NEUTRAL_PERCENTILE,
};
pub use session::{ProfileUpdate, RecommendationSession};
pub use weights::{Category, EnabledCategories, PriorityMode, WeightUpdate, WeightVector};
