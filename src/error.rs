//! Error taxonomy for catalog construction.
//!
//! Every variant describes a corrupt or mismatched data artifact. The library
//! never aborts on these; callers decide whether a failed build is fatal.

use crate::source::Resource;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document could not be located.
    #[error("missing catalog resource '{resource}' ({location})")]
    MissingResource { resource: Resource, location: String },

    /// The document exists but reading it failed.
    #[error("unable to read catalog resource '{resource}' ({location})")]
    UnreadableResource {
        resource: Resource,
        location: String,
        #[source]
        source: io::Error,
    },

    /// The document is not valid JSON or does not match its schema.
    #[error("malformed catalog resource '{resource}': {detail}")]
    MalformedResource { resource: Resource, detail: String },

    /// A release year in the availability table is not numeric.
    #[error("symbol '{name}' has non-numeric release year '{year}'")]
    MalformedYear { name: String, year: String },
}

/// Returned when a capability level string is not recognized.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown capability level '{0}', expected 'legacy' or 'current'")]
pub struct UnknownCapabilityLevel(pub String);
