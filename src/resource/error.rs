//! Error types for resource construction.

use thiserror::Error;

use crate::framework::{DocumentError, GenerateError, LoadError};

/// Errors that can occur while turning input into resources.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The input could not be parsed into documents.
    #[error(transparent)]
    Parse(#[from] DocumentError),

    /// A List document's `items` field holds something other than a sequence.
    #[error("items in List is type {found}, expected array")]
    ItemsNotArray { found: &'static str },

    /// A List item could not be re-encoded for parsing.
    #[error("unable to encode List item: {0}")]
    EncodeItem(#[source] serde_json::Error),

    /// Exactly one resource was required.
    #[error("expected 1 resource, found {count} in {input}")]
    Cardinality { count: usize, input: String },

    /// A patch path could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A patch file was loaded but could not be parsed.
    #[error("YAML file [{path}] encounters a format error.\n{source}")]
    MalformedPatch {
        path: String,
        #[source]
        source: Box<ResourceError>,
    },

    /// A generator failed to produce its document.
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

pub type ResourceResult<T> = Result<T, ResourceError>;
