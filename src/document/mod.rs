//! Document representation backed by `serde_json` maps.
//!
//! [`UnstructAdapter`] is the concrete [`Kunstructured`](crate::framework::Kunstructured)
//! and [`YamlDocumentStore`] is the matching
//! [`KunstructuredFactory`](crate::framework::KunstructuredFactory).

pub mod adapter;
pub mod store;

pub use adapter::*;
pub use store::*;

use serde_json::Value;

/// Short name of a JSON value's type, used in error messages.
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "map",
    }
}
