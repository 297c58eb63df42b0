use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::framework::Kunstructured;

/// A document held as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnstructAdapter {
    object: Map<String, Value>,
}

impl UnstructAdapter {
    pub fn new(object: Map<String, Value>) -> Self {
        Self { object }
    }

    /// Wraps `value` if it is a JSON object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(object) => Some(Self::new(object)),
            _ => None,
        }
    }

    pub fn map_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.object
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.object
    }

    /// Sets a dot-separated path, creating intermediate maps as needed.
    ///
    /// A non-map value in the middle of the path is replaced by a map.
    pub fn set_field(&mut self, path: &str, value: Value) {
        let segments: Vec<&str> = path.split('.').collect();
        insert_path(&mut self.object, &segments, value);
    }

    /// Merges `labels` into `metadata.labels`.
    pub fn set_labels(&mut self, labels: &BTreeMap<String, String>) {
        self.merge_string_map("labels", labels);
    }

    /// Merges `annotations` into `metadata.annotations`.
    pub fn set_annotations(&mut self, annotations: &BTreeMap<String, String>) {
        self.merge_string_map("annotations", annotations);
    }

    fn merge_string_map(&mut self, field: &str, entries: &BTreeMap<String, String>) {
        if entries.is_empty() {
            return;
        }
        let path = format!("metadata.{field}");
        let mut merged = self
            .get_field(&path)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        for (key, value) in entries {
            merged.insert(key.clone(), Value::String(value.clone()));
        }
        self.set_field(&path, Value::Object(merged));
    }
}

fn insert_path(map: &mut Map<String, Value>, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [last] => {
            map.insert((*last).to_string(), value);
        }
        [head, rest @ ..] => {
            let entry = map
                .entry((*head).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(child) = entry {
                insert_path(child, rest, value);
            }
        }
    }
}

impl Kunstructured for UnstructAdapter {
    fn kind(&self) -> &str {
        self.object
            .get("kind")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    fn map(&self) -> &Map<String, Value> {
        &self.object
    }

    fn box_clone(&self) -> Box<dyn Kunstructured> {
        Box::new(self.clone())
    }
}
