use std::sync::Arc;

use tracing::info;

use super::FactoryConfig;
use crate::document::YamlDocumentStore;
use crate::framework::{LoadError, Loader};
use crate::generator::KvGenerator;
use crate::loader::FileLoader;
use crate::model::{ConfigMapArgs, GeneratorOptions, PatchStrategicMerge, SecretArgs};
use crate::resource::{Resource, ResourceFactory, ResourceResult};

/// A [`ResourceFactory`] wired to the stock collaborators.
///
/// `FactorySystem` owns:
/// - a [`ResourceFactory`] backed by [`YamlDocumentStore`] and [`KvGenerator`]
/// - a [`FileLoader`] rooted at [`FactoryConfig::root`]
///
/// # Example
///
/// ```ignore
/// let system = FactorySystem::new(&FactoryConfig::new("overlays/prod"))?;
///
/// let resources = system.load_resources("deployment.yaml")?;
/// let patches = system.load_patches(&["replicas.yaml".into()])?;
/// let config = system.generate_config_map(None, &args)?;
/// ```
pub struct FactorySystem {
    pub factory: ResourceFactory,
    pub loader: FileLoader,
}

impl FactorySystem {
    /// Fails when the configured root is not an accessible directory.
    pub fn new(config: &FactoryConfig) -> Result<Self, LoadError> {
        let loader = FileLoader::new(&config.root)?;
        let factory = ResourceFactory::new(Arc::new(YamlDocumentStore), Arc::new(KvGenerator));
        info!(root = %loader.root().display(), "Factory ready");
        Ok(Self { factory, loader })
    }

    /// Loads one manifest file and flattens it.
    pub fn load_resources(&self, path: &str) -> ResourceResult<Vec<Resource>> {
        let content = self.loader.load(path)?;
        self.factory.slice_from_bytes(&content)
    }

    pub fn load_patches(&self, paths: &[PatchStrategicMerge]) -> ResourceResult<Vec<Resource>> {
        self.factory.slice_from_patches(&self.loader, paths)
    }

    pub fn generate_config_map(
        &self,
        options: Option<&GeneratorOptions>,
        args: &ConfigMapArgs,
    ) -> ResourceResult<Resource> {
        self.factory.make_config_map(&self.loader, options, args)
    }

    pub fn generate_secret(
        &self,
        options: Option<&GeneratorOptions>,
        args: &SecretArgs,
    ) -> ResourceResult<Resource> {
        self.factory.make_secret(&self.loader, options, args)
    }
}
