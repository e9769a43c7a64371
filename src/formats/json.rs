//! JSON serializer
//!
//! Secondary output format registered against the same registry as XML.
//! Reserved fossil fields are re-emitted as `_type` / `_fossil` / `id`
//! members, so the document mirrors the producer-side dict shape.

use serde_json::{Map, Number, Value};

use crate::core::convert::scalar_to_text;
use crate::core::error::{FossilError, Result};
use crate::core::models::{
    FieldValue, Fossil, FossilInput, Scalar, SerializeOptions, SerializedPayload,
};
use crate::formats::Serializer;

/// MIME type of JSON payloads
pub const MIME_JSON: &str = "application/json";

/// Serializer for the `json` format
#[derive(Debug)]
pub struct JsonSerializer;

impl JsonSerializer {
    /// Create a new JsonSerializer
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for JsonSerializer {
    fn serialize(
        &self,
        input: FossilInput<'_>,
        options: &SerializeOptions,
    ) -> Result<SerializedPayload> {
        let value = match input {
            FossilInput::Single(fossil) => fossil_value(fossil, "$")?,
            FossilInput::Collection(fossils) => {
                let mut elements = Vec::with_capacity(fossils.len());
                for (index, fossil) in fossils.iter().enumerate() {
                    elements.push(fossil_value(fossil, &format!("$[{index}]"))?);
                }
                Value::Array(elements)
            }
        };

        let content = if options.pretty {
            serde_json::to_vec_pretty(&value)?
        } else {
            serde_json::to_vec(&value)?
        };
        Ok(SerializedPayload {
            content,
            mime_type: MIME_JSON,
        })
    }

    fn mime_type(&self) -> &'static str {
        MIME_JSON
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

fn fossil_value(fossil: &Fossil, path: &str) -> Result<Value> {
    // Same structural requirement as the XML walk: untyped fossils are
    // rejected before any output is produced.
    let type_name = fossil
        .type_name
        .as_deref()
        .ok_or_else(|| FossilError::structural(path, "fossil has no type name"))?;

    let mut object = Map::new();
    object.insert("_type".to_string(), Value::String(type_name.to_string()));
    if let Some(variant) = &fossil.variant {
        object.insert("_fossil".to_string(), Value::String(variant.clone()));
    }
    if let Some(id) = &fossil.id {
        object.insert("id".to_string(), scalar_value(id));
    }

    for (name, value) in fossil.fields() {
        let member = match value {
            FieldValue::Scalar(scalar) => scalar_value(scalar),
            FieldValue::Nested(nested) => fossil_value(nested, &format!("{path}.{name}"))?,
            FieldValue::Items(items) => {
                let mut elements = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    elements.push(fossil_value(item, &format!("{path}.{name}[{index}]"))?);
                }
                Value::Array(elements)
            }
        };
        object.insert(name.to_string(), member);
    }

    Ok(Value::Object(object))
}

fn scalar_value(scalar: &Scalar) -> Value {
    match scalar {
        Scalar::Instant(_) => Value::String(scalar_to_text(scalar)),
        Scalar::Int(value) => Value::Number(Number::from(*value)),
        // Non-finite floats are not JSON numbers; fall back to their
        // decimal text form instead of a silent null
        Scalar::Float(value) => match Number::from_f64(*value) {
            Some(number) => Value::Number(number),
            None => Value::String(scalar_to_text(scalar)),
        },
        Scalar::Bool(value) => Value::Bool(*value),
        Scalar::Text(value) | Scalar::Raw(value) => Value::String(value.clone()),
    }
}
