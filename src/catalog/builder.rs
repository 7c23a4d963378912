//! Joins the four catalog documents into a pruned category list and a gated,
//! name-sorted symbol list.

use crate::catalog::model::{Category, CategoryKey, Symbol, SymbolAvailability};
use crate::catalog::rules::{ALL_CATEGORY_KEY, CapabilityLevel, CatalogRules};
use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::schema_loader::load_document;
use crate::source::{CatalogSource, Resource};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info, warn};

type SymbolCategories = BTreeMap<String, Vec<CategoryKey>>;
type SymbolSearchTerms = BTreeMap<String, Vec<String>>;

/// Builds a [`Catalog`] from a [`CatalogSource`].
///
/// `build` reads every document on each call and returns a fresh value, so a
/// builder can be reused without accumulating symbols.
#[derive(Debug, Clone)]
pub struct CatalogBuilder<S> {
    source: S,
    rules: CatalogRules,
}

impl<S: CatalogSource> CatalogBuilder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            rules: CatalogRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: CatalogRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_capability(mut self, capability: CapabilityLevel) -> Self {
        self.rules = CatalogRules::new(capability).with_threshold_year(self.rules.threshold_year());
        self
    }

    pub fn rules(&self) -> &CatalogRules {
        &self.rules
    }

    pub fn build(&self) -> Result<Catalog, CatalogError> {
        let categories = self.load_categories()?;
        let symbol_categories: SymbolCategories =
            load_document(&self.source, Resource::SymbolCategories)?;
        let symbol_search: SymbolSearchTerms = load_document(&self.source, Resource::SymbolSearch)?;
        let availability: SymbolAvailability =
            load_document(&self.source, Resource::NameAvailability)?;

        let symbols = self.join_symbols(&categories, &symbol_categories, &symbol_search, &availability)?;

        info!(
            capability = %self.rules.capability(),
            categories = categories.len(),
            symbols = symbols.len(),
            "built symbol catalog"
        );
        Ok(Catalog::new(self.rules.capability(), categories, symbols))
    }

    fn load_categories(&self) -> Result<Vec<Arc<Category>>, CatalogError> {
        let mut records: Vec<Category> = load_document(&self.source, Resource::Categories)?;
        records.sort_by(|a, b| a.key.cmp(&b.key));
        records.retain(|category| category.key != ALL_CATEGORY_KEY);

        let before = records.len();
        records.dedup_by(|later, earlier| later.key == earlier.key);
        if records.len() != before {
            warn!(
                dropped = before - records.len(),
                "categories document repeats keys; keeping the first of each"
            );
        }
        records.retain(|category| {
            if category.is_uncategorized() {
                warn!("categories document defines the reserved uncategorized key; ignoring it");
                return false;
            }
            true
        });

        records.insert(0, Category::uncategorized());

        let pruned = self.rules.pruned_category_keys();
        records.retain(|category| {
            let keep = !pruned.contains(category.key.as_str());
            if !keep {
                debug!(key = %category.key, capability = %self.rules.capability(), "pruned category");
            }
            keep
        });

        Ok(records.into_iter().map(Arc::new).collect())
    }

    fn join_symbols(
        &self,
        categories: &[Arc<Category>],
        symbol_categories: &SymbolCategories,
        symbol_search: &SymbolSearchTerms,
        availability: &SymbolAvailability,
    ) -> Result<Vec<Symbol>, CatalogError> {
        let by_key: HashMap<&str, &Arc<Category>> = categories
            .iter()
            .map(|category| (category.key.as_str(), category))
            .collect();
        let uncategorized = categories
            .iter()
            .find(|category| category.is_uncategorized())
            .cloned()
            .unwrap_or_else(|| Arc::new(Category::uncategorized()));

        let mut symbols = Vec::with_capacity(availability.symbols.len());
        let mut withheld = 0usize;
        for (name, release_year) in &availability.symbols {
            let mut resolved: Vec<Arc<Category>> = Vec::new();
            for key in symbol_categories.get(name).into_iter().flatten() {
                if let Some(category) = by_key.get(key.as_str()) {
                    if !resolved.iter().any(|seen| seen.key == category.key) {
                        resolved.push(Arc::clone(*category));
                    }
                }
            }
            if resolved.is_empty() {
                debug!(symbol = %name, "no category key resolved; filing under uncategorized");
                resolved.push(Arc::clone(&uncategorized));
            }

            let symbol = Symbol {
                name: name.clone(),
                release_year: release_year.clone(),
                categories: resolved,
                search_terms: symbol_search.get(name).cloned().unwrap_or_default(),
                os_versions: availability.os_versions(release_year),
            };

            if self.rules.includes(name, release_year)? {
                symbols.push(symbol);
            } else {
                withheld += 1;
            }
        }

        if withheld > 0 {
            debug!(
                withheld,
                threshold_year = self.rules.threshold_year(),
                "withheld symbols unavailable on target"
            );
        }

        symbols.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(symbols)
    }
}
