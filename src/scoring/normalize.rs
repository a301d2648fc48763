//! Population-relative normalization.
//!
//! Two scales are used: min-max onto `[0, 10]` for the weighted engine and
//! percentile rank onto `[0, 100]` for the composite engine. Both are
//! direction-aware and both degrade to a neutral midpoint when the
//! population carries no spread.

use std::collections::HashMap;
use xxhash_rust::xxh3::xxh3_64;

/// Min-max score when every value is equal or the population is empty
pub const NEUTRAL_MIN_MAX_SCORE: f64 = 5.0;
/// Percentile when the population has at most one member
pub const NEUTRAL_PERCENTILE: f64 = 50.0;

/// Which end of a scale is preferable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Finite minimum and maximum of a population.
#[must_use]
pub fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Scale `value` onto `[0, 10]` relative to `all_values`.
///
/// Lower-is-better scales are inverted so the cheapest vehicle scores 10.
#[must_use]
pub fn min_max_score(value: f64, all_values: &[f64], direction: Direction) -> f64 {
    match value_range(all_values) {
        Some((min, max)) => min_max_in_range(value, min, max, direction),
        None => NEUTRAL_MIN_MAX_SCORE,
    }
}

/// Min-max scaling against a precomputed range.
#[must_use]
pub fn min_max_in_range(value: f64, min: f64, max: f64, direction: Direction) -> f64 {
    let span = max - min;
    if span <= 0.0 || !span.is_finite() {
        return NEUTRAL_MIN_MAX_SCORE;
    }
    let position = (value - min) / span;
    match direction {
        Direction::HigherIsBetter => 10.0 * position,
        Direction::LowerIsBetter => 10.0 * (1.0 - position),
    }
}

/// Percentile rank of `value` within `all_values`, on `[0, 100]`.
///
/// The rank is the index of the first occurrence of `value` in the
/// population sorted from worst to best. A value absent from the population
/// takes the index it would be inserted at.
#[must_use]
pub fn percentile_score(value: f64, all_values: &[f64], direction: Direction) -> f64 {
    let n = all_values.len();
    if n <= 1 {
        return NEUTRAL_PERCENTILE;
    }
    let rank = match direction {
        Direction::HigherIsBetter => all_values.iter().filter(|&&v| v < value).count(),
        Direction::LowerIsBetter => all_values.iter().filter(|&&v| v > value).count(),
    };
    (rank as f64 / (n - 1) as f64 * 100.0).min(100.0)
}

/// A borrowed population together with its content fingerprint.
#[derive(Debug, Clone, Copy)]
pub struct Population<'a> {
    values: &'a [f64],
    fingerprint: u64,
}

impl<'a> Population<'a> {
    #[must_use]
    pub fn new(values: &'a [f64]) -> Self {
        let mut hasher_input = Vec::with_capacity(values.len() * 8);
        for v in values {
            hasher_input.extend_from_slice(&v.to_bits().to_le_bytes());
        }
        Self {
            values,
            fingerprint: xxh3_64(&hasher_input),
        }
    }

    #[must_use]
    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PercentileKey {
    value_bits: u64,
    population: u64,
    direction: Direction,
}

/// Memoized percentile lookups.
///
/// Keys include the population fingerprint, so a stale entry can never be
/// returned for a different population. Clearing only bounds memory.
#[derive(Debug, Clone, Default)]
pub struct PercentileCache {
    entries: HashMap<PercentileKey, f64>,
    hits: u64,
    misses: u64,
}

impl PercentileCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn percentile(&mut self, value: f64, population: &Population<'_>, direction: Direction) -> f64 {
        let key = PercentileKey {
            value_bits: value.to_bits(),
            population: population.fingerprint(),
            direction,
        };
        if let Some(&cached) = self.entries.get(&key) {
            self.hits += 1;
            return cached;
        }
        self.misses += 1;
        let score = percentile_score(value, population.values(), direction);
        self.entries.insert(key, score);
        score
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            tracing::debug!(
                "clearing percentile cache ({} entries, {} hits, {} misses)",
                self.entries.len(),
                self.hits,
                self.misses
            );
        }
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since creation.
    #[must_use]
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
