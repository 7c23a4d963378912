//! Symbol catalog construction.
//!
//! `CatalogBuilder` reads the category, symbol-category, search-term and
//! availability documents from a `CatalogSource`, joins them, applies the
//! capability rules in `rules`, and produces an immutable `Catalog`.

pub mod builder;
pub mod index;
pub mod model;
pub mod rules;

pub use builder::CatalogBuilder;
pub use index::Catalog;
pub use model::{Category, CategoryKey, OsVersion, Symbol, SymbolAvailability};
pub use rules::{
    ALL_CATEGORY_KEY, CapabilityLevel, CatalogRules, DRAW_CATEGORY_KEY, RELEASE_THRESHOLD_YEAR,
    VARIABLE_CATEGORY_KEY, WHATS_NEW_CATEGORY_KEY, parse_release_year,
};

/// Default data directory, relative to the crate root.
pub const DEFAULT_DATA_DIR: &str = "data";
