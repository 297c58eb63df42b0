//! # Core Collaborator Contracts
//!
//! This module defines the seams between the resource factory and the
//! components it delegates to.
//!
//! ## Key Types
//!
//! - [`Kunstructured`]: The trait every parsed document implements.
//! - [`KunstructuredFactory`]: Turns bytes or maps into documents.
//! - [`Loader`]: Resolves a path to raw content.
//! - [`Generator`]: Synthesizes ConfigMap and Secret documents.
//! - [`DocumentError`], [`LoadError`], [`GenerateError`]: The error each seam reports.

use std::fmt::Debug;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::model::{ConfigMapArgs, GeneratorOptions, SecretArgs};

// =============================================================================
// 1. THE DOCUMENT ABSTRACTION
// =============================================================================

/// A single parsed configuration document.
///
/// # Architecture Note
/// The factory never looks at a concrete representation. It only needs the
/// declared `kind` (to detect `*List` containers) and a generic keyed view
/// (to read `items`). Everything else on this trait is a provided method built
/// on top of [`Kunstructured::map`].
///
/// Implementations are owned through `Box<dyn Kunstructured>`, which cannot be
/// null, so a resource can never be built around a missing document.
pub trait Kunstructured: Debug + Send + Sync {
    /// The declared `kind`, or an empty string when absent.
    fn kind(&self) -> &str;

    /// The whole document as a JSON-compatible map.
    fn map(&self) -> &Map<String, Value>;

    /// Clones the document behind a fresh box.
    fn box_clone(&self) -> Box<dyn Kunstructured>;

    // --- Provided accessors ---

    /// `metadata.name`, or an empty string when absent.
    fn name(&self) -> &str {
        self.get_field("metadata.name")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// `metadata.namespace`, if set.
    fn namespace(&self) -> Option<&str> {
        self.get_field("metadata.namespace").and_then(Value::as_str)
    }

    /// `apiVersion`, or an empty string when absent.
    fn api_version(&self) -> &str {
        self.map()
            .get("apiVersion")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Looks up a dot-separated path such as `metadata.labels`.
    fn get_field(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.map().get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Canonical JSON encoding of the document.
    fn to_json(&self) -> Result<Vec<u8>, DocumentError> {
        Ok(serde_json::to_vec(self.map())?)
    }

    /// YAML rendering of the document.
    fn to_yaml(&self) -> Result<String, DocumentError> {
        Ok(serde_yaml::to_string(self.map())?)
    }
}

impl Clone for Box<dyn Kunstructured> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

// =============================================================================
// 2. THE COLLABORATORS
// =============================================================================

/// Converts raw input into [`Kunstructured`] documents.
pub trait KunstructuredFactory: Send + Sync {
    /// Wraps an already-validated map. Infallible by contract.
    fn from_map(&self, map: Map<String, Value>) -> Box<dyn Kunstructured>;

    /// Parses a (possibly multi-document) byte stream.
    ///
    /// Returns zero or more documents in stream order.
    fn slice_from_bytes(&self, input: &[u8]) -> Result<Vec<Box<dyn Kunstructured>>, DocumentError>;
}

/// Resolves a path reference to raw bytes.
///
/// Loading is synchronous. Callers that need timeouts or cancellation must
/// build them into their implementation.
pub trait Loader {
    /// The directory relative paths are resolved against.
    fn root(&self) -> &Path;

    /// Reads the full content behind `path`.
    fn load(&self, path: &str) -> Result<Vec<u8>, LoadError>;
}

/// Synthesizes generated documents from declarative arguments.
///
/// The [`Loader`] is supplied per call so file-backed sources resolve against
/// the same root as the rest of the build.
pub trait Generator: Send + Sync {
    fn make_config_map(
        &self,
        loader: &dyn Loader,
        options: Option<&GeneratorOptions>,
        args: &ConfigMapArgs,
    ) -> Result<Box<dyn Kunstructured>, GenerateError>;

    fn make_secret(
        &self,
        loader: &dyn Loader,
        options: Option<&GeneratorOptions>,
        args: &SecretArgs,
    ) -> Result<Box<dyn Kunstructured>, GenerateError>;
}

// =============================================================================
// 3. THE COLLABORATOR ERRORS
// =============================================================================

/// Raw input could not be turned into a document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document is of type {found}, expected a map")]
    NotAnObject { found: &'static str },
    #[error("missing kind in object {object}")]
    MissingKind { object: String },
    #[error("missing metadata.name in object {object}")]
    MissingName { object: String },
}

/// A path could not be resolved to content.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("'{}' doesn't exist", path.display())]
    NotFound { path: PathBuf },
    #[error("security; file '{}' is not in or below '{}'", path.display(), root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },
    #[error("unable to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    /// Classifies an I/O failure on `path`, separating missing files from the rest.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound { path }
        } else {
            LoadError::Io { path, source }
        }
    }
}

/// A generator could not synthesize its document.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("a {kind} generator requires a name")]
    MissingName { kind: &'static str },
    #[error("invalid literal source {literal:?}, expected key=value")]
    InvalidLiteral { literal: String },
    #[error("invalid file source {file:?}, expected [key=]path")]
    InvalidFileSource { file: String },
    #[error("invalid line {line} in env file {file}: {text:?}, expected KEY=VALUE")]
    InvalidEnvLine {
        file: String,
        line: usize,
        text: String,
    },
    #[error("{key:?} is not a valid key name; keys must consist of alphanumerics, '-', '_' or '.'")]
    InvalidKey { key: String },
    #[error("cannot add key {key:?}, another key by that name already exists")]
    DuplicateKey { key: String },
    #[error(transparent)]
    Load(#[from] LoadError),
}
