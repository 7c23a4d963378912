//! Records decoded from the catalog documents and the joined symbol type.

use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Stable identifier of a category, e.g. `communication`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryKey(pub String);

impl CategoryKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CategoryKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for CategoryKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CategoryKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CategoryKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CategoryKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A named grouping of symbols. Only `key` carries meaning for the builder;
/// `label` and `icon` are passed through for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub key: CategoryKey,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub icon: String,
}

impl Category {
    pub const UNCATEGORIZED_KEY: &'static str = "uncategorized";

    pub fn new(key: impl Into<CategoryKey>) -> Self {
        Self {
            key: key.into(),
            label: String::new(),
            icon: String::new(),
        }
    }

    /// The synthetic fallback category. It never comes from the data files.
    pub fn uncategorized() -> Self {
        Self {
            key: CategoryKey::new(Self::UNCATEGORIZED_KEY),
            label: "Uncategorized".to_string(),
            icon: "questionmark.square.dashed".to_string(),
        }
    }

    pub fn is_uncategorized(&self) -> bool {
        self.key == Self::UNCATEGORIZED_KEY
    }
}

/// Minimum OS version a symbol requires on one platform.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OsVersion {
    pub os: String,
    pub version: String,
}

impl OsVersion {
    pub fn new(os: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            version: version.into(),
        }
    }
}

/// Contents of the `name_availability` document.
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolAvailability {
    /// Symbol name to release year.
    pub symbols: BTreeMap<String, String>,
    /// Release year to OS name to minimum version.
    pub year_to_release: BTreeMap<String, BTreeMap<String, String>>,
}

impl SymbolAvailability {
    /// OS versions for `release_year`, ordered by OS name. Unknown years map
    /// to an empty list.
    pub fn os_versions(&self, release_year: &str) -> Vec<OsVersion> {
        self.year_to_release
            .get(release_year)
            .map(|by_os| {
                by_os
                    .iter()
                    .map(|(os, version)| OsVersion::new(os.clone(), version.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A fully joined symbol record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Symbol {
    pub name: String,
    pub release_year: String,
    /// Shared with the catalog's category list. Never empty.
    #[serde(serialize_with = "serialize_category_keys")]
    pub categories: Vec<Arc<Category>>,
    pub search_terms: Vec<String>,
    pub os_versions: Vec<OsVersion>,
}

impl Symbol {
    pub fn in_category(&self, key: &str) -> bool {
        self.categories.iter().any(|category| category.key == key)
    }

    pub fn category_keys(&self) -> impl Iterator<Item = &CategoryKey> {
        self.categories.iter().map(|category| &category.key)
    }

    /// Case-insensitive substring match on the name and search terms.
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .search_terms
                .iter()
                .any(|term| term.to_lowercase().contains(needle))
    }

    /// Minimum version on `os`, if the symbol's release year lists one.
    pub fn min_version(&self, os: &str) -> Option<&str> {
        self.os_versions
            .iter()
            .find(|entry| entry.os == os)
            .map(|entry| entry.version.as_str())
    }
}

fn serialize_category_keys<S>(categories: &[Arc<Category>], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(categories.iter().map(|category| &category.key))
}
