use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::trace;

use super::{value_type_name, UnstructAdapter};
use crate::framework::{DocumentError, Kunstructured, KunstructuredFactory};

const LIST_SUFFIX: &str = "List";

/// Parses YAML or JSON streams into [`UnstructAdapter`] documents.
///
/// Input that opens with `{` or `[` is decoded as a JSON stream first, so
/// re-encoded List items come back byte-for-byte. YAML documents are separated
/// by `---`. Empty documents are skipped. Every
/// remaining document must be a map with a `kind`, and any non-List document
/// must also carry `metadata.name`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlDocumentStore;

impl YamlDocumentStore {
    pub fn new() -> Self {
        Self
    }
}

impl KunstructuredFactory for YamlDocumentStore {
    fn from_map(&self, map: Map<String, Value>) -> Box<dyn Kunstructured> {
        Box::new(UnstructAdapter::new(map))
    }

    fn slice_from_bytes(&self, input: &[u8]) -> Result<Vec<Box<dyn Kunstructured>>, DocumentError> {
        let mut result: Vec<Box<dyn Kunstructured>> = Vec::new();
        for value in parse_values(input)? {
            let object = match value {
                Value::Null => continue,
                Value::Object(object) if object.is_empty() => continue,
                Value::Object(object) => object,
                other => {
                    return Err(DocumentError::NotAnObject {
                        found: value_type_name(&other),
                    })
                }
            };
            let adapter = UnstructAdapter::new(object);
            validate(&adapter)?;
            trace!(kind = adapter.kind(), name = adapter.name(), "Parsed document");
            result.push(Box::new(adapter));
        }
        Ok(result)
    }
}

/// YAML treats U+0085 and U+2028 as line breaks, so JSON text must not go
/// through the YAML parser. Flow-style YAML such as `{kind: Pod}` fails the
/// JSON pass and is parsed as YAML instead.
fn parse_values(input: &[u8]) -> Result<Vec<Value>, DocumentError> {
    if looks_like_json(input) {
        let decoded: Result<Vec<Value>, serde_json::Error> =
            serde_json::Deserializer::from_slice(input)
                .into_iter::<Value>()
                .collect();
        match decoded {
            Ok(values) => return Ok(values),
            Err(e) => trace!(error = %e, "Not a JSON stream, parsing as YAML"),
        }
    }
    serde_yaml::Deserializer::from_slice(input)
        .map(|document| -> Result<Value, DocumentError> {
            let yaml = serde_yaml::Value::deserialize(document)?;
            Ok(serde_json::to_value(yaml)?)
        })
        .collect()
}

fn looks_like_json(input: &[u8]) -> bool {
    matches!(
        input.iter().find(|b| !b.is_ascii_whitespace()),
        Some(b'{' | b'[')
    )
}

fn validate(document: &UnstructAdapter) -> Result<(), DocumentError> {
    let kind = document.kind();
    if kind.is_empty() {
        return Err(DocumentError::MissingKind {
            object: render(document),
        });
    }
    if kind.ends_with(LIST_SUFFIX) {
        return Ok(());
    }
    if document.name().is_empty() {
        return Err(DocumentError::MissingName {
            object: render(document),
        });
    }
    Ok(())
}

fn render(document: &UnstructAdapter) -> String {
    Value::Object(document.map().clone()).to_string()
}
