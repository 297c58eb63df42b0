//! ConfigMap and Secret synthesis from key/value sources.
//!
//! [`KvGenerator`] is the stock [`Generator`]. It reads literal, file and env
//! sources through the supplied [`Loader`] and returns an [`UnstructAdapter`].
//!
//! - ConfigMap values that are valid UTF-8 land in `data`; anything else is
//!   base64-encoded into `binaryData`.
//! - Secret values are always base64-encoded into `data`.
//! - [`GeneratorOptions`] labels and annotations are merged into `metadata`,
//!   and `immutable: true` is copied to the top-level field.

mod kv;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{Map, Value};
use tracing::debug;

use crate::document::UnstructAdapter;
use crate::framework::{GenerateError, Generator, Kunstructured, Loader};
use crate::model::{ConfigMapArgs, GeneratorArgs, GeneratorOptions, SecretArgs};

const DEFAULT_SECRET_TYPE: &str = "Opaque";

/// Builds ConfigMaps and Secrets from declarative sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct KvGenerator;

impl KvGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator for KvGenerator {
    fn make_config_map(
        &self,
        loader: &dyn Loader,
        options: Option<&GeneratorOptions>,
        args: &ConfigMapArgs,
    ) -> Result<Box<dyn Kunstructured>, GenerateError> {
        let gen = &args.generator_args;
        let mut document = skeleton("ConfigMap", gen)?;

        let mut data = Map::new();
        let mut binary = Map::new();
        for pair in kv::collect_pairs(loader, &gen.kv_sources)? {
            match String::from_utf8(pair.value) {
                Ok(text) => {
                    data.insert(pair.key, Value::String(text));
                }
                Err(raw) => {
                    binary.insert(pair.key, Value::String(STANDARD.encode(raw.into_bytes())));
                }
            }
        }
        if !data.is_empty() {
            document.set_field("data", Value::Object(data));
        }
        if !binary.is_empty() {
            document.set_field("binaryData", Value::Object(binary));
        }

        apply_options(&mut document, options);
        debug!(name = %gen.name, "Generated ConfigMap");
        Ok(Box::new(document))
    }

    fn make_secret(
        &self,
        loader: &dyn Loader,
        options: Option<&GeneratorOptions>,
        args: &SecretArgs,
    ) -> Result<Box<dyn Kunstructured>, GenerateError> {
        let gen = &args.generator_args;
        let mut document = skeleton("Secret", gen)?;
        let secret_type = args.type_.as_deref().unwrap_or(DEFAULT_SECRET_TYPE);
        document.set_field("type", Value::String(secret_type.to_string()));

        let data: Map<String, Value> = kv::collect_pairs(loader, &gen.kv_sources)?
            .into_iter()
            .map(|pair| (pair.key, Value::String(STANDARD.encode(pair.value))))
            .collect();
        if !data.is_empty() {
            document.set_field("data", Value::Object(data));
        }

        apply_options(&mut document, options);
        debug!(name = %gen.name, secret_type, "Generated Secret");
        Ok(Box::new(document))
    }
}

fn skeleton(kind: &'static str, args: &GeneratorArgs) -> Result<UnstructAdapter, GenerateError> {
    if args.name.is_empty() {
        return Err(GenerateError::MissingName { kind });
    }
    let mut document = UnstructAdapter::default();
    document.set_field("apiVersion", Value::String("v1".into()));
    document.set_field("kind", Value::String(kind.into()));
    document.set_field("metadata.name", Value::String(args.name.clone()));
    if let Some(namespace) = &args.namespace {
        document.set_field("metadata.namespace", Value::String(namespace.clone()));
    }
    Ok(document)
}

fn apply_options(document: &mut UnstructAdapter, options: Option<&GeneratorOptions>) {
    let Some(options) = options else {
        return;
    };
    document.set_labels(&options.labels);
    document.set_annotations(&options.annotations);
    if options.immutable {
        document.set_field("immutable", Value::Bool(true));
    }
}
