//! Raw document sources for the catalog builder.
//!
//! A source only knows how to hand back the bytes of a logical document.
//! Decoding and validation happen in `schema_loader`.

use crate::error::CatalogError;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// The four documents a catalog is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resource {
    Categories,
    SymbolCategories,
    SymbolSearch,
    NameAvailability,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Categories,
        Resource::SymbolCategories,
        Resource::SymbolSearch,
        Resource::NameAvailability,
    ];

    /// Logical name, also the file stem on disk.
    pub fn name(self) -> &'static str {
        match self {
            Resource::Categories => "categories",
            Resource::SymbolCategories => "symbol_categories",
            Resource::SymbolSearch => "symbol_search",
            Resource::NameAvailability => "name_availability",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.json", self.name())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Supplies the raw bytes of each catalog document.
pub trait CatalogSource {
    fn read(&self, resource: Resource) -> Result<Vec<u8>, CatalogError>;
}

impl<T: CatalogSource + ?Sized> CatalogSource for &T {
    fn read(&self, resource: Resource) -> Result<Vec<u8>, CatalogError> {
        (**self).read(resource)
    }
}

impl<T: CatalogSource + ?Sized> CatalogSource for Box<T> {
    fn read(&self, resource: Resource) -> Result<Vec<u8>, CatalogError> {
        (**self).read(resource)
    }
}

/// Reads `<dir>/<resource>.json`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, resource: Resource) -> PathBuf {
        self.dir.join(resource.file_name())
    }
}

impl CatalogSource for DirectorySource {
    fn read(&self, resource: Resource) -> Result<Vec<u8>, CatalogError> {
        let path = self.path_for(resource);
        tracing::debug!(%resource, path = %path.display(), "reading catalog document");
        fs::read(&path).map_err(|err| {
            let location = path.display().to_string();
            if err.kind() == ErrorKind::NotFound {
                CatalogError::MissingResource { resource, location }
            } else {
                CatalogError::UnreadableResource {
                    resource,
                    location,
                    source: err,
                }
            }
        })
    }
}

/// In-memory documents keyed by resource.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: BTreeMap<Resource, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resource: Resource, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(resource, contents);
        self
    }

    pub fn insert(&mut self, resource: Resource, contents: impl Into<Vec<u8>>) {
        self.documents.insert(resource, contents.into());
    }
}

impl CatalogSource for MemorySource {
    fn read(&self, resource: Resource) -> Result<Vec<u8>, CatalogError> {
        self.documents
            .get(&resource)
            .cloned()
            .ok_or_else(|| CatalogError::MissingResource {
                resource,
                location: "memory".to_string(),
            })
    }
}
