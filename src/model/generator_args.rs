//! Generator and patch arguments as written in a kustomization file.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::GenerationBehavior;

/// Arguments shared by every generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorArgs {
    /// Namespace of the generated object; left unset when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Base name of the generated object.
    pub name: String,

    pub behavior: GenerationBehavior,

    #[serde(flatten)]
    pub kv_sources: KvPairSources,
}

impl GeneratorArgs {
    /// Arguments carrying only a behavior, as attached to generated resources.
    pub fn with_behavior(behavior: GenerationBehavior) -> Self {
        Self {
            behavior,
            ..Default::default()
        }
    }
}

/// Where the key/value pairs of a generated object come from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KvPairSources {
    /// `key=value` pairs.
    #[serde(rename = "literals", skip_serializing_if = "Vec::is_empty")]
    pub literal_sources: Vec<String>,

    /// `path` or `key=path`; the file content becomes the value.
    #[serde(rename = "files", skip_serializing_if = "Vec::is_empty")]
    pub file_sources: Vec<String>,

    /// Files of `KEY=VALUE` lines.
    #[serde(rename = "envs", skip_serializing_if = "Vec::is_empty")]
    pub env_sources: Vec<String>,

    /// Legacy single env file.
    #[serde(rename = "env", skip_serializing_if = "Option::is_none")]
    pub env_source: Option<String>,
}

impl KvPairSources {
    /// Every env file, the legacy single `env` entry last.
    pub fn env_files(&self) -> impl Iterator<Item = &str> {
        self.env_sources
            .iter()
            .map(String::as_str)
            .chain(self.env_source.as_deref())
    }
}

/// Arguments of a `configMapGenerator` entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigMapArgs {
    #[serde(flatten)]
    pub generator_args: GeneratorArgs,
}

/// Arguments of a `secretGenerator` entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecretArgs {
    #[serde(flatten)]
    pub generator_args: GeneratorArgs,

    /// Secret `type`; `Opaque` when unset.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
}

/// Presentation flags applied to every generated object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorOptions {
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
    pub disable_name_suffix_hash: bool,
    pub immutable: bool,
}

/// Path of a strategic-merge patch file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchStrategicMerge(pub String);

impl PatchStrategicMerge {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatchStrategicMerge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PatchStrategicMerge {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for PatchStrategicMerge {
    fn from(path: String) -> Self {
        Self(path)
    }
}
