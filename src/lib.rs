use anyhow::{Context, Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod error;
pub mod schema_loader;
pub mod source;

pub use catalog::{
    CapabilityLevel, Catalog, CatalogBuilder, CatalogRules, Category, CategoryKey, OsVersion,
    RELEASE_THRESHOLD_YEAR, Symbol, SymbolAvailability,
};
pub use error::{CatalogError, UnknownCapabilityLevel};
pub use schema_loader::validate_document;
pub use source::{CatalogSource, DirectorySource, MemorySource, Resource};

const ENV_DATA_DIR: &str = "SYMBOL_CATALOG_DATA_DIR";
const ENV_CAPABILITY: &str = "SYMBOL_CATALOG_CAPABILITY";

fn is_data_dir(candidate: &Path) -> bool {
    candidate.join(Resource::Categories.file_name()).is_file()
}

fn data_dir_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_data_dir(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn env_data_dir() -> Option<PathBuf> {
    match env::var(ENV_DATA_DIR) {
        Ok(value) if !value.trim().is_empty() => Some(PathBuf::from(value)),
        _ => None,
    }
}

/// Bundled data directory shipped next to the crate sources.
pub fn bundled_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(catalog::DEFAULT_DATA_DIR)
}

/// Locate the catalog data directory: `SYMBOL_CATALOG_DATA_DIR`, then the
/// build-time `SYMBOL_CATALOG_DATA_HINT`, then the bundled `data/` directory.
pub fn find_data_dir() -> Result<PathBuf> {
    // A configured directory is used as-is; missing documents surface when the
    // catalog is built.
    if let Some(env_dir) = env_data_dir() {
        return Ok(env_dir);
    }

    if let Some(hint) = option_env!("SYMBOL_CATALOG_DATA_HINT") {
        if let Some(dir) = data_dir_from_hint(hint) {
            return Ok(dir);
        }
    }

    let bundled = bundled_data_dir();
    if is_data_dir(&bundled) {
        return Ok(bundled);
    }

    bail!(
        "Unable to locate symbol catalog data. Set {ENV_DATA_DIR} to a directory containing {}.",
        Resource::Categories.file_name()
    );
}

/// An explicit directory wins; otherwise fall back to discovery.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(dir.to_path_buf()),
        None => find_data_dir(),
    }
}

/// Capability level from `SYMBOL_CATALOG_CAPABILITY`, if set.
pub fn capability_from_env() -> Result<Option<CapabilityLevel>> {
    match env::var(ENV_CAPABILITY) {
        Ok(value) if !value.trim().is_empty() => value
            .parse::<CapabilityLevel>()
            .map(Some)
            .with_context(|| format!("parsing {ENV_CAPABILITY}")),
        _ => Ok(None),
    }
}

/// An explicit level wins, then the environment, then `current`.
pub fn resolve_capability(explicit: Option<CapabilityLevel>) -> Result<CapabilityLevel> {
    if let Some(level) = explicit {
        return Ok(level);
    }
    Ok(capability_from_env()?.unwrap_or_default())
}

/// Build the catalog from the JSON documents in `data_dir`.
pub fn load_catalog(data_dir: &Path, capability: CapabilityLevel) -> Result<Catalog, CatalogError> {
    CatalogBuilder::new(DirectorySource::new(data_dir))
        .with_capability(capability)
        .build()
}

pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
