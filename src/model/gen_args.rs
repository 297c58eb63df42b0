//! Generation metadata carried by every [`Resource`](crate::resource::Resource).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{GeneratorArgs, GeneratorOptions};

/// How a generated object is reconciled with an existing object of the same name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationBehavior {
    #[default]
    #[serde(rename = "", alias = "unspecified")]
    Unspecified,
    Create,
    Merge,
    Replace,
}

impl GenerationBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "unspecified",
            Self::Create => "create",
            Self::Merge => "merge",
            Self::Replace => "replace",
        }
    }
}

impl fmt::Display for GenerationBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a behavior string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown generation behavior {0:?}, expected create, merge or replace")]
pub struct UnknownBehavior(pub String);

impl FromStr for GenerationBehavior {
    type Err = UnknownBehavior;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "unspecified" => Ok(Self::Unspecified),
            "create" => Ok(Self::Create),
            "merge" => Ok(Self::Merge),
            "replace" => Ok(Self::Replace),
            other => Err(UnknownBehavior(other.to_string())),
        }
    }
}

/// Generator arguments and options attached to a resource.
///
/// The default value (no args, no options) marks a resource that was loaded
/// from a manifest rather than produced by a generator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenArgs {
    args: Option<GeneratorArgs>,
    options: Option<GeneratorOptions>,
}

impl GenArgs {
    pub fn new(args: Option<&GeneratorArgs>, options: Option<&GeneratorOptions>) -> Self {
        Self {
            args: args.cloned(),
            options: options.cloned(),
        }
    }

    pub fn args(&self) -> Option<&GeneratorArgs> {
        self.args.as_ref()
    }

    pub fn options(&self) -> Option<&GeneratorOptions> {
        self.options.as_ref()
    }

    /// True when the resource came out of a generator.
    pub fn is_generated(&self) -> bool {
        self.args.is_some()
    }

    pub fn behavior(&self) -> GenerationBehavior {
        self.args
            .as_ref()
            .map(|args| args.behavior)
            .unwrap_or_default()
    }

    /// Generated objects get a content hash appended to their name unless the
    /// options turn it off.
    pub fn needs_hash_suffix(&self) -> bool {
        self.is_generated()
            && !self
                .options
                .as_ref()
                .is_some_and(|options| options.disable_name_suffix_hash)
    }
}
