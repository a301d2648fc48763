//! Brand prestige and credibility reference data.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How quickly a brand's vehicles lose value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DepreciationCurve {
    Steep,
    Moderate,
    Gentle,
    #[default]
    Unknown,
}

/// Reference data for one brand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BrandProfile {
    /// Perceived prestige, 0-100
    pub prestige: f64,
    #[serde(default)]
    pub depreciation_curve: DepreciationCurve,
    /// Baseline credibility, 0-100
    pub credibility: f64,
}

impl BrandProfile {
    /// Profile assumed for brands missing from the table
    pub const UNKNOWN: Self = Self {
        prestige: 50.0,
        depreciation_curve: DepreciationCurve::Unknown,
        credibility: 50.0,
    };

    #[must_use]
    pub const fn new(prestige: f64, depreciation_curve: DepreciationCurve, credibility: f64) -> Self {
        Self {
            prestige,
            depreciation_curve,
            credibility,
        }
    }
}

impl Default for BrandProfile {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

const BUILTIN_BRANDS: &[(&str, BrandProfile)] = &[
    ("Tesla", BrandProfile::new(95.0, DepreciationCurve::Steep, 95.0)),
    ("BMW", BrandProfile::new(85.0, DepreciationCurve::Moderate, 80.0)),
    ("Mercedes", BrandProfile::new(88.0, DepreciationCurve::Moderate, 85.0)),
    ("Audi", BrandProfile::new(82.0, DepreciationCurve::Moderate, 78.0)),
    ("Lexus", BrandProfile::new(80.0, DepreciationCurve::Gentle, 75.0)),
    ("Toyota", BrandProfile::new(65.0, DepreciationCurve::Gentle, 60.0)),
    ("Honda", BrandProfile::new(62.0, DepreciationCurve::Gentle, 58.0)),
    ("Genesis", BrandProfile::new(78.0, DepreciationCurve::Moderate, 72.0)),
    ("Porsche", BrandProfile::new(95.0, DepreciationCurve::Gentle, 90.0)),
    ("Lucid", BrandProfile::new(88.0, DepreciationCurve::Unknown, 85.0)),
    ("Rivian", BrandProfile::new(75.0, DepreciationCurve::Steep, 80.0)),
    ("Polestar", BrandProfile::new(72.0, DepreciationCurve::Moderate, 70.0)),
];

/// Brand lookup table, case-insensitive on brand name.
///
/// Defaults to the built-in table; entries can be added or overridden from
/// configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandTable {
    entries: IndexMap<String, BrandProfile>,
}

impl Default for BrandTable {
    fn default() -> Self {
        Self {
            entries: BUILTIN_BRANDS
                .iter()
                .map(|(name, profile)| ((*name).to_string(), *profile))
                .collect(),
        }
    }
}

impl BrandTable {
    /// A table with no entries; every lookup yields [`BrandProfile::UNKNOWN`].
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert or replace an entry, matching existing names case-insensitively.
    pub fn insert(&mut self, name: impl Into<String>, profile: BrandProfile) {
        let name = name.into();
        let existing = self
            .entries
            .keys()
            .find(|k| k.eq_ignore_ascii_case(name.trim()))
            .cloned();
        match existing {
            Some(key) => {
                self.entries.insert(key, profile);
            }
            None => {
                self.entries.insert(name.trim().to_string(), profile);
            }
        }
    }

    /// Apply overrides on top of the current entries.
    pub fn extend<'a>(&mut self, overrides: impl IntoIterator<Item = (&'a String, &'a BrandProfile)>) {
        for (name, profile) in overrides {
            self.insert(name.clone(), *profile);
        }
    }

    #[must_use]
    pub fn get(&self, brand: &str) -> Option<&BrandProfile> {
        let brand = brand.trim();
        if let Some(profile) = self.entries.get(brand) {
            return Some(profile);
        }
        let exact = self
            .entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(brand))
            .map(|(_, p)| p);
        // "Mercedes-Benz" and similar compound names fall back to their first word
        exact.or_else(|| {
            brand
                .split(['-', ' '])
                .next()
                .filter(|head| head.len() < brand.len())
                .and_then(|head| self.get(head))
        })
    }

    /// Profile for `brand`, or [`BrandProfile::UNKNOWN`].
    #[must_use]
    pub fn lookup(&self, brand: &str) -> BrandProfile {
        self.get(brand).copied().unwrap_or(BrandProfile::UNKNOWN)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BrandProfile)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let table = BrandTable::default();
        assert_eq!(table.len(), 12);
        assert_eq!(table.lookup("Tesla").credibility, 95.0);
        assert_eq!(table.lookup("Porsche").depreciation_curve, DepreciationCurve::Gentle);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = BrandTable::default();
        assert_eq!(table.lookup("bmw"), table.lookup("BMW"));
        assert_eq!(table.lookup("Mercedes-Benz").credibility, 85.0);
    }

    #[test]
    fn test_unknown_brand_defaults() {
        let table = BrandTable::default();
        assert_eq!(table.lookup("Yugo"), BrandProfile::UNKNOWN);
        assert_eq!(BrandTable::empty().lookup("Tesla").credibility, 50.0);
    }

    #[test]
    fn test_override_replaces_existing_entry() {
        let mut table = BrandTable::default();
        table.insert("toyota", BrandProfile::new(70.0, DepreciationCurve::Gentle, 68.0));

        assert_eq!(table.len(), 12);
        assert_eq!(table.lookup("Toyota").credibility, 68.0);

        table.insert("Kia", BrandProfile::new(55.0, DepreciationCurve::Moderate, 52.0));
        assert_eq!(table.len(), 13);
        assert_eq!(table.lookup("KIA").prestige, 55.0);
    }
}
