//! # Resource Factory
//!
//! Every way of constructing a [`Resource`] goes through [`ResourceFactory`].
//!
//! ## List Expansion
//!
//! Documents whose kind ends in `List` are containers: their `items` are
//! re-encoded as JSON, parsed again and pushed onto the **back** of a work
//! queue. Leaves are emitted as they are popped from the front. Expansion is
//! therefore breadth-first, and stack depth stays constant however deeply
//! Lists are nested:
//!
//! ```text
//! List[A, List[B, C], D]   →   A, D, B, C
//! ```
//!
//! The `items` field is tri-state: absent or `null` yields nothing, a
//! sequence is expanded, and anything else is
//! [`ResourceError::ItemsNotArray`].

use std::collections::VecDeque;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, instrument, trace, warn};

use super::{Resource, ResourceError, ResourceResult};
use crate::document::value_type_name;
use crate::framework::{Generator, Kunstructured, KunstructuredFactory, Loader};
use crate::model::{
    ConfigMapArgs, GenArgs, GeneratorArgs, GeneratorOptions, PatchStrategicMerge, SecretArgs,
};

const LIST_SUFFIX: &str = "List";
const ITEMS_FIELD: &str = "items";

/// Makes instances of [`Resource`].
///
/// Holds shared, immutable handles to its collaborators, so clones are cheap
/// and every entry point is free of side effects beyond the calls it delegates.
#[derive(Clone)]
pub struct ResourceFactory {
    store: Arc<dyn KunstructuredFactory>,
    generator: Arc<dyn Generator>,
}

impl ResourceFactory {
    pub fn new(store: Arc<dyn KunstructuredFactory>, generator: Arc<dyn Generator>) -> Self {
        Self { store, generator }
    }

    pub fn store(&self) -> &dyn KunstructuredFactory {
        self.store.as_ref()
    }

    /// Wraps a raw map; the resource carries no generation metadata.
    pub fn from_map(&self, map: Map<String, Value>) -> Resource {
        Resource::new(self.store.from_map(map), GenArgs::default())
    }

    /// Wraps a raw map and attaches generation metadata.
    pub fn from_map_and_option(
        &self,
        map: Map<String, Value>,
        args: Option<&GeneratorArgs>,
        options: Option<&GeneratorOptions>,
    ) -> Resource {
        Resource::new(self.store.from_map(map), GenArgs::new(args, options))
    }

    /// Wraps an already-parsed document.
    pub fn from_kunstructured(&self, document: Box<dyn Kunstructured>) -> Resource {
        Resource::new(document, GenArgs::default())
    }

    /// Loads and flattens every patch file, in order.
    ///
    /// Loader failures are returned as-is. Parse failures are wrapped with the
    /// offending path. The first failure aborts the whole call.
    #[instrument(skip_all, fields(patches = paths.len()))]
    pub fn slice_from_patches(
        &self,
        loader: &dyn Loader,
        paths: &[PatchStrategicMerge],
    ) -> ResourceResult<Vec<Resource>> {
        let mut result = Vec::new();
        for path in paths {
            let content = loader.load(path.as_str()).inspect_err(|e| {
                warn!(path = %path, error = %e, "Patch load failed");
            })?;
            let resources = self.slice_from_bytes(&content).map_err(|e| {
                warn!(path = %path, error = %e, "Patch parse failed");
                ResourceError::MalformedPatch {
                    path: path.to_string(),
                    source: Box::new(e),
                }
            })?;
            debug!(path = %path, count = resources.len(), "Patch loaded");
            result.extend(resources);
        }
        Ok(result)
    }

    /// Parses `input` into exactly one resource.
    pub fn from_bytes(&self, input: &[u8]) -> ResourceResult<Resource> {
        let mut result = self.slice_from_bytes(input)?;
        if result.len() != 1 {
            return Err(ResourceError::Cardinality {
                count: result.len(),
                input: String::from_utf8_lossy(input).into_owned(),
            });
        }
        Ok(result.remove(0))
    }

    /// Parses `input` into resources, expanding every `*List` document.
    pub fn slice_from_bytes(&self, input: &[u8]) -> ResourceResult<Vec<Resource>> {
        let mut pending: VecDeque<Box<dyn Kunstructured>> =
            self.store.slice_from_bytes(input)?.into();
        let mut result = Vec::new();

        while let Some(document) = pending.pop_front() {
            if !document.kind().ends_with(LIST_SUFFIX) {
                result.push(self.from_kunstructured(document));
                continue;
            }
            let items = match document.map().get(ITEMS_FIELD) {
                None | Some(Value::Null) => {
                    trace!(kind = document.kind(), "Empty List");
                    continue;
                }
                Some(Value::Array(items)) => items,
                Some(other) => {
                    return Err(ResourceError::ItemsNotArray {
                        found: value_type_name(other),
                    })
                }
            };
            trace!(kind = document.kind(), items = items.len(), "Expanding List");
            for item in items {
                let encoded = serde_json::to_vec(item).map_err(ResourceError::EncodeItem)?;
                // Nested Lists are queued, not expanded in place.
                pending.extend(self.store.slice_from_bytes(&encoded)?);
            }
        }

        debug!(count = result.len(), "Flattened");
        Ok(result)
    }

    /// Generates a ConfigMap and tags it with the caller's behavior and options.
    #[instrument(skip_all, fields(name = %args.generator_args.name))]
    pub fn make_config_map(
        &self,
        loader: &dyn Loader,
        options: Option<&GeneratorOptions>,
        args: &ConfigMapArgs,
    ) -> ResourceResult<Resource> {
        let document = self
            .generator
            .make_config_map(loader, options, args)
            .inspect_err(|e| warn!(error = %e, "ConfigMap generation failed"))?;
        Ok(generated(document, &args.generator_args, options))
    }

    /// Generates a Secret and tags it with the caller's behavior and options.
    #[instrument(skip_all, fields(name = %args.generator_args.name))]
    pub fn make_secret(
        &self,
        loader: &dyn Loader,
        options: Option<&GeneratorOptions>,
        args: &SecretArgs,
    ) -> ResourceResult<Resource> {
        let document = self
            .generator
            .make_secret(loader, options, args)
            .inspect_err(|e| warn!(error = %e, "Secret generation failed"))?;
        Ok(generated(document, &args.generator_args, options))
    }
}

fn generated(
    document: Box<dyn Kunstructured>,
    args: &GeneratorArgs,
    options: Option<&GeneratorOptions>,
) -> Resource {
    let behavior = GeneratorArgs::with_behavior(args.behavior);
    Resource::new(document, GenArgs::new(Some(&behavior), options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{UnstructAdapter, YamlDocumentStore};
    use crate::framework::mock::{MockGenerator, MockLoader};
    use crate::framework::{DocumentError, GenerateError, LoadError};
    use crate::model::GenerationBehavior;
    use serde_json::json;

    fn factory() -> ResourceFactory {
        ResourceFactory::new(Arc::new(YamlDocumentStore), Arc::new(MockGenerator::new()))
    }

    fn names(resources: &[Resource]) -> Vec<&str> {
        resources.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_leaf_document_is_identity() {
        let input = b"apiVersion: v1\nkind: Service\nmetadata:\n  name: web\nspec:\n  ports: [80]\n";
        let resources = factory().slice_from_bytes(input).unwrap();
        assert_eq!(resources.len(), 1);

        let expected = YamlDocumentStore.slice_from_bytes(input).unwrap();
        assert_eq!(resources[0].map(), expected[0].map());
        assert!(!resources[0].is_generated());
    }

    #[test]
    fn test_list_items_keep_order() {
        let input = br#"
kind: List
items:
  - kind: Service
    metadata: {name: a}
  - kind: Deployment
    metadata: {name: b}
  - kind: ConfigMap
    metadata: {name: c}
"#;
        let resources = factory().slice_from_bytes(input).unwrap();
        assert_eq!(names(&resources), vec!["a", "b", "c"]);
        assert!(resources.iter().all(|r| !r.kind().ends_with("List")));
    }

    #[test]
    fn test_nested_lists_expand_breadth_first() {
        let input = br#"
kind: List
items:
  - kind: Pod
    metadata: {name: a}
  - kind: PodList
    items:
      - kind: Pod
        metadata: {name: b}
      - kind: List
        items:
          - kind: Pod
            metadata: {name: e}
      - kind: Pod
        metadata: {name: c}
  - kind: Pod
    metadata: {name: d}
---
kind: Service
metadata: {name: f}
"#;
        let resources = factory().slice_from_bytes(input).unwrap();
        // Top-level siblings first, then each nesting level in turn.
        assert_eq!(names(&resources), vec!["f", "a", "d", "b", "c", "e"]);
    }

    #[test]
    fn test_list_items_keep_line_separator_characters() {
        let leaf = br#"
kind: ConfigMap
metadata: {name: cm}
data: {text: "x\u2028y\u0085z"}
"#;
        let list = br#"
kind: List
items:
  - kind: ConfigMap
    metadata: {name: cm}
    data: {text: "x\u2028y\u0085z"}
"#;
        let direct = factory().slice_from_bytes(leaf).unwrap();
        let expanded = factory().slice_from_bytes(list).unwrap();

        assert_eq!(
            direct[0].document().get_field("data.text"),
            Some(&json!("x\u{2028}y\u{85}z"))
        );
        assert_eq!(expanded.len(), 1);
        assert_eq!(expanded[0].map(), direct[0].map());
    }

    #[test]
    fn test_empty_items_yield_nothing() {
        for input in [
            &b"kind: List\n"[..],
            &b"kind: List\nitems: null\n"[..],
            &b"kind: List\nitems: []\n"[..],
            &b"kind: List\nitems:\n  - kind: List\n"[..],
        ] {
            let resources = factory().slice_from_bytes(input).unwrap();
            assert!(resources.is_empty(), "input: {}", String::from_utf8_lossy(input));
        }
    }

    #[test]
    fn test_non_sequence_items_name_the_type() {
        let err = factory()
            .slice_from_bytes(b"kind: List\nitems: oops\n")
            .unwrap_err();
        assert!(matches!(err, ResourceError::ItemsNotArray { found: "string" }));
        assert_eq!(err.to_string(), "items in List is type string, expected array");

        let err = factory()
            .slice_from_bytes(b"kind: ServiceList\nitems:\n  a: 1\n")
            .unwrap_err();
        assert!(matches!(err, ResourceError::ItemsNotArray { found: "map" }));
    }

    #[test]
    fn test_malformed_item_is_a_parse_error() {
        let err = factory()
            .slice_from_bytes(b"kind: List\nitems:\n  - kind: Service\n")
            .unwrap_err();
        assert!(matches!(
            err,
            ResourceError::Parse(DocumentError::MissingName { .. })
        ));
    }

    #[test]
    fn test_from_bytes_requires_exactly_one() {
        let factory = factory();
        let one = factory
            .from_bytes(b"kind: List\nitems:\n  - kind: Service\n    metadata: {name: a}\n")
            .unwrap();
        assert_eq!(one.name(), "a");

        let err = factory.from_bytes(b"kind: List\n").unwrap_err();
        assert!(matches!(err, ResourceError::Cardinality { count: 0, .. }));

        let two = b"kind: Service\nmetadata: {name: a}\n---\nkind: Service\nmetadata: {name: b}\n";
        let err = factory.from_bytes(two).unwrap_err();
        assert!(matches!(err, ResourceError::Cardinality { count: 2, .. }));
        assert!(err.to_string().starts_with("expected 1 resource, found 2 in kind: Service"));
    }

    #[test]
    fn test_from_map_variants() {
        let factory = factory();
        let map = json!({"kind": "ConfigMap", "metadata": {"name": "cm"}})
            .as_object()
            .cloned()
            .unwrap();

        let plain = factory.from_map(map.clone());
        assert_eq!(plain.kind(), "ConfigMap");
        assert!(!plain.is_generated());

        let args = GeneratorArgs::with_behavior(GenerationBehavior::Merge);
        let options = GeneratorOptions {
            disable_name_suffix_hash: true,
            ..Default::default()
        };
        let tagged = factory.from_map_and_option(map, Some(&args), Some(&options));
        assert_eq!(tagged.behavior(), GenerationBehavior::Merge);
        assert!(!tagged.needs_hash_suffix());
        assert_eq!(tagged.generator_options(), Some(&options));
    }

    #[test]
    fn test_patches_aggregate_in_order() {
        let mut loader = MockLoader::new();
        loader
            .expect_load("one.yaml")
            .return_ok("kind: Service\nmetadata: {name: a}\n");
        loader
            .expect_load("two.yaml")
            .return_ok("kind: List\nitems:\n  - kind: Service\n    metadata: {name: b}\n");

        let paths = vec![PatchStrategicMerge::from("one.yaml"), "two.yaml".into()];
        let resources = factory().slice_from_patches(&loader, &paths).unwrap();
        assert_eq!(names(&resources), vec!["a", "b"]);
        loader.verify();
    }

    #[test]
    fn test_patch_load_failure_is_returned_unwrapped() {
        let mut loader = MockLoader::new();
        loader
            .expect_load("one.yaml")
            .return_ok("kind: Service\nmetadata: {name: a}\n");
        loader.expect_load("two.yaml").return_not_found();
        loader.expect_load("three.yaml").return_ok("kind: Service\nmetadata: {name: c}\n");

        let paths: Vec<PatchStrategicMerge> =
            vec!["one.yaml".into(), "two.yaml".into(), "three.yaml".into()];
        let err = factory().slice_from_patches(&loader, &paths).unwrap_err();
        assert!(matches!(err, ResourceError::Load(LoadError::NotFound { .. })));
        assert_eq!(err.to_string(), "'two.yaml' doesn't exist");

        // three.yaml was never requested.
        assert!(loader.load("three.yaml").is_ok());
        loader.verify();
    }

    #[test]
    fn test_malformed_patch_names_the_path() {
        let mut loader = MockLoader::new();
        loader
            .expect_load("ok.yaml")
            .return_ok("kind: Service\nmetadata: {name: a}\n");
        loader.expect_load("overlays/broken.yaml").return_ok("kind: [\n");

        let paths: Vec<PatchStrategicMerge> = vec!["ok.yaml".into(), "overlays/broken.yaml".into()];
        let err = factory().slice_from_patches(&loader, &paths).unwrap_err();
        assert!(matches!(&err, ResourceError::MalformedPatch { path, .. } if path == "overlays/broken.yaml"));
        assert!(err.to_string().contains("overlays/broken.yaml"));
    }

    #[test]
    fn test_generated_resources_carry_behavior() {
        let generator = MockGenerator::new();
        let config_map = UnstructAdapter::from_value(json!({"kind": "ConfigMap", "metadata": {"name": "cm"}})).unwrap();
        let secret = UnstructAdapter::from_value(json!({"kind": "Secret", "metadata": {"name": "s"}})).unwrap();
        generator.expect_config_map().return_ok(Box::new(config_map));
        generator.expect_secret().return_ok(Box::new(secret));
        let factory = ResourceFactory::new(Arc::new(YamlDocumentStore), Arc::new(generator.clone()));
        let loader = MockLoader::new();

        let mut cm_args = ConfigMapArgs::default();
        cm_args.generator_args.behavior = GenerationBehavior::Merge;
        let options = GeneratorOptions::default();
        let cm = factory.make_config_map(&loader, Some(&options), &cm_args).unwrap();
        assert!(cm.is_generated());
        assert_eq!(cm.behavior(), GenerationBehavior::Merge);
        assert_eq!(cm.generator_options(), Some(&options));

        let secret_args = SecretArgs::default();
        let secret = factory.make_secret(&loader, None, &secret_args).unwrap();
        assert!(secret.is_generated());
        assert_eq!(secret.behavior(), GenerationBehavior::Unspecified);
        assert!(secret.needs_hash_suffix());

        generator.verify();
    }

    #[test]
    fn test_generator_failure_propagates_unchanged() {
        let generator = MockGenerator::new();
        generator
            .expect_secret()
            .return_err(GenerateError::DuplicateKey { key: "a".into() });
        let factory = ResourceFactory::new(Arc::new(YamlDocumentStore), Arc::new(generator));

        let err = factory
            .make_secret(&MockLoader::new(), None, &SecretArgs::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ResourceError::Generate(GenerateError::DuplicateKey { .. })
        ));
    }
}
