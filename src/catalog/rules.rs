//! Platform-capability rules: which categories are pruned and which symbols
//! are admitted for a given target.
//!
//! Both the category pruning and the symbol gate hang off the same threshold
//! year, so changing the threshold moves them together.

use crate::error::{CatalogError, UnknownCapabilityLevel};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// First release year whose symbols require a capable target.
pub const RELEASE_THRESHOLD_YEAR: u16 = 2025;

/// Grouping entry in the categories document; not a real category.
pub const ALL_CATEGORY_KEY: &str = "all";
/// Rolling "recently added" bucket, dropped once the threshold release ships.
pub const WHATS_NEW_CATEGORY_KEY: &str = "whatsnew";
/// Has no members upstream; always dropped.
pub const DRAW_CATEGORY_KEY: &str = "draw";
/// Only meaningful from the threshold release on.
pub const VARIABLE_CATEGORY_KEY: &str = "variable";

/// Feature generation of the build target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityLevel {
    /// Target predates the threshold release.
    Legacy,
    /// Target supports the threshold release.
    #[default]
    Current,
}

impl CapabilityLevel {
    pub fn supports_threshold_release(self) -> bool {
        matches!(self, CapabilityLevel::Current)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CapabilityLevel::Legacy => "legacy",
            CapabilityLevel::Current => "current",
        }
    }
}

impl fmt::Display for CapabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CapabilityLevel {
    type Err = UnknownCapabilityLevel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(CapabilityLevel::Legacy),
            "current" => Ok(CapabilityLevel::Current),
            _ => Err(UnknownCapabilityLevel(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogRules {
    capability: CapabilityLevel,
    threshold_year: u16,
}

impl Default for CatalogRules {
    fn default() -> Self {
        Self::new(CapabilityLevel::default())
    }
}

impl CatalogRules {
    pub fn new(capability: CapabilityLevel) -> Self {
        Self {
            capability,
            threshold_year: RELEASE_THRESHOLD_YEAR,
        }
    }

    /// Move the threshold when the availability schema rolls to a new year.
    pub fn with_threshold_year(mut self, threshold_year: u16) -> Self {
        self.threshold_year = threshold_year;
        self
    }

    pub fn capability(&self) -> CapabilityLevel {
        self.capability
    }

    pub fn threshold_year(&self) -> u16 {
        self.threshold_year
    }

    /// Category keys removed after the synthetic category is inserted.
    pub fn pruned_category_keys(&self) -> BTreeSet<&'static str> {
        let mut keys = BTreeSet::from([DRAW_CATEGORY_KEY]);
        if self.capability.supports_threshold_release() {
            keys.insert(WHATS_NEW_CATEGORY_KEY);
        } else {
            keys.insert(VARIABLE_CATEGORY_KEY);
        }
        keys
    }

    /// Whether a symbol released in `release_year` exists on the target.
    pub fn includes(&self, name: &str, release_year: &str) -> Result<bool, CatalogError> {
        let year = parse_release_year(name, release_year)?;
        if year < f64::from(self.threshold_year) {
            return Ok(true);
        }
        Ok(self.capability.supports_threshold_release())
    }
}

/// Parse a release year such as `2021` or `2020.1`.
pub fn parse_release_year(name: &str, release_year: &str) -> Result<f64, CatalogError> {
    match release_year.parse::<f64>() {
        Ok(year) if year.is_finite() => Ok(year),
        _ => Err(CatalogError::MalformedYear {
            name: name.to_string(),
            year: release_year.to_string(),
        }),
    }
}
