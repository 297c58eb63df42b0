//! The [`Resource`] type and its identity.

use std::fmt;

use serde_json::{Map, Value};

use crate::framework::Kunstructured;
use crate::model::{GenArgs, GenerationBehavior, GeneratorOptions};

/// A parsed document plus the metadata describing how it was produced.
///
/// Resources are only built by [`ResourceFactory`](super::ResourceFactory).
/// Those returned by `slice_from_bytes` and `from_bytes` never wrap a `*List`;
/// `from_map` and `from_kunstructured` wrap whatever they are given.
#[derive(Debug, Clone)]
pub struct Resource {
    document: Box<dyn Kunstructured>,
    options: GenArgs,
}

impl Resource {
    pub(crate) fn new(document: Box<dyn Kunstructured>, options: GenArgs) -> Self {
        Self { document, options }
    }

    pub fn document(&self) -> &dyn Kunstructured {
        self.document.as_ref()
    }

    pub fn into_document(self) -> Box<dyn Kunstructured> {
        self.document
    }

    pub fn map(&self) -> &Map<String, Value> {
        self.document.map()
    }

    pub fn kind(&self) -> &str {
        self.document.kind()
    }

    pub fn name(&self) -> &str {
        self.document.name()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.document.namespace()
    }

    pub fn id(&self) -> ResId {
        ResId::of(self.document.as_ref())
    }

    pub fn gen_args(&self) -> &GenArgs {
        &self.options
    }

    pub fn behavior(&self) -> GenerationBehavior {
        self.options.behavior()
    }

    pub fn generator_options(&self) -> Option<&GeneratorOptions> {
        self.options.options()
    }

    pub fn is_generated(&self) -> bool {
        self.options.is_generated()
    }

    pub fn needs_hash_suffix(&self) -> bool {
        self.options.needs_hash_suffix()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.document.to_yaml() {
            Ok(yaml) => f.write_str(&yaml),
            Err(_) => write!(f, "{}", self.id()),
        }
    }
}

/// Group, version, kind, name and namespace of a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResId {
    pub group: String,
    pub version: String,
    pub kind: String,
    pub name: String,
    pub namespace: Option<String>,
}

impl ResId {
    pub fn of(document: &dyn Kunstructured) -> Self {
        let (group, version) = match document.api_version().split_once('/') {
            Some((group, version)) => (group.to_string(), version.to_string()),
            None => (String::new(), document.api_version().to_string()),
        };
        Self {
            group,
            version,
            kind: document.kind().to_string(),
            name: document.name().to_string(),
            namespace: document.namespace().map(str::to_string),
        }
    }
}

impl fmt::Display for ResId {
    /// Renders as `group_version_kind|namespace|name`, with `~G`, `~V`, `~K`
    /// and `~X` standing in for empty parts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
            if value.is_empty() {
                placeholder
            } else {
                value
            }
        }
        write!(
            f,
            "{}_{}_{}|{}|{}",
            or(&self.group, "~G"),
            or(&self.version, "~V"),
            or(&self.kind, "~K"),
            or(self.namespace.as_deref().unwrap_or_default(), "~X"),
            or(&self.name, "~N"),
        )
    }
}
