//! Built catalog and its read-only query surface.
//!
//! A `Catalog` is immutable once built. Symbols are held sorted by name, which
//! lets lookups binary search; categories keep the order produced by the
//! builder with the synthetic `uncategorized` entry first.

use crate::catalog::model::{Category, Symbol};
use crate::catalog::rules::CapabilityLevel;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    capability: CapabilityLevel,
    categories: Vec<Arc<Category>>,
    symbols: Vec<Symbol>,
}

impl Catalog {
    pub(crate) fn new(
        capability: CapabilityLevel,
        categories: Vec<Arc<Category>>,
        symbols: Vec<Symbol>,
    ) -> Self {
        Self {
            capability,
            categories,
            symbols,
        }
    }

    /// Capability level the catalog was built for.
    pub fn capability(&self) -> CapabilityLevel {
        self.capability
    }

    pub fn categories(&self) -> &[Arc<Category>] {
        &self.categories
    }

    /// Symbols in ascending name order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn category(&self, key: &str) -> Option<&Arc<Category>> {
        self.categories.iter().find(|category| category.key == key)
    }

    pub fn symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols
            .binary_search_by(|symbol| symbol.name.as_str().cmp(name))
            .ok()
            .map(|idx| &self.symbols[idx])
    }

    /// Categories restricted to `limited_to`, in catalog order.
    ///
    /// An empty allow-list means no restriction and returns every category.
    /// Keys that match no category are ignored.
    pub fn available_categories<K: AsRef<str>>(&self, limited_to: &[K]) -> Vec<Arc<Category>> {
        if limited_to.is_empty() {
            return self.categories.clone();
        }
        let allowed: BTreeSet<&str> = limited_to.iter().map(|key| key.as_ref()).collect();
        self.categories
            .iter()
            .filter(|category| allowed.contains(category.key.as_str()))
            .cloned()
            .collect()
    }

    /// Symbols that belong to `key`, in name order.
    pub fn symbols_in<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Symbol> + 'a {
        self.symbols.iter().filter(move |symbol| symbol.in_category(key))
    }

    /// Case-insensitive substring search over names and search terms,
    /// optionally limited to one category. A blank query matches everything in
    /// scope. Results stay in name order.
    pub fn search(&self, query: &str, category: Option<&str>) -> Vec<&Symbol> {
        let needle = query.trim().to_lowercase();
        self.symbols
            .iter()
            .filter(|symbol| category.is_none_or(|key| symbol.in_category(key)))
            .filter(|symbol| needle.is_empty() || symbol.matches_lowercase(&needle))
            .collect()
    }

    /// Freeze the catalog for sharing across threads.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
