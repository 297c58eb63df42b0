use std::env;
use std::path::PathBuf;

use serde::Deserialize;

/// Settings for a [`FactorySystem`](super::FactorySystem).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Directory every patch and generator source is resolved against.
    pub root: PathBuf,
}

impl FactoryConfig {
    /// Environment variable read by [`FactoryConfig::from_env`].
    pub const ROOT_ENV: &'static str = "RESOURCE_FACTORY_ROOT";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Reads the root from `RESOURCE_FACTORY_ROOT`, defaulting to the working directory.
    pub fn from_env() -> Self {
        env::var_os(Self::ROOT_ENV)
            .map(Self::new)
            .unwrap_or_default()
    }
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_defaults() {
        let config: FactoryConfig = serde_yaml::from_str("root: /srv/manifests\n").unwrap();
        assert_eq!(config.root, PathBuf::from("/srv/manifests"));

        let config: FactoryConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, FactoryConfig::default());
    }
}
