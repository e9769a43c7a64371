//! Dynamic fossil construction from JSON values
//!
//! Producers that assemble entity snapshots dynamically (request handlers,
//! scripting layers) hand over `serde_json::Value` trees instead of typed
//! fossils. This module validates such a tree and converts it into a
//! [`Fossil`], reporting the offending field path on malformed input.
//!
//! Member order is preserved (`serde_json` runs with `preserve_order`), so
//! JSON object order becomes fossil field order.

use serde_json::Value;

use crate::core::error::{FossilError, Result};
use crate::core::models::{FieldValue, Fossil, Scalar};

/// Reserved member names, never treated as ordinary fields
const RESERVED_KEYS: [&str; 3] = ["_type", "_fossil", "id"];

impl Fossil {
    /// Build a fossil from a dynamic JSON value.
    ///
    /// The value must be a JSON object. `_type` and `_fossil` must be
    /// strings when present; `id` may be a string or a number. Array
    /// members must contain objects only — a scalar list element has no
    /// defined serialization and is rejected as a structural error.
    /// `null` members are skipped, matching producers that omit absent
    /// values.
    pub fn from_json(value: &Value) -> Result<Fossil> {
        fossil_from_value(value, "$")
    }
}

fn fossil_from_value(value: &Value, path: &str) -> Result<Fossil> {
    let object = value
        .as_object()
        .ok_or_else(|| FossilError::structural(path, "fossil value must be a JSON object"))?;

    let mut fossil = match object.get("_type") {
        Some(Value::String(type_name)) => Fossil::new(type_name.clone()),
        Some(_) => return Err(FossilError::structural(path, "`_type` must be a string")),
        None => Fossil::anonymous(),
    };

    match object.get("_fossil") {
        Some(Value::String(variant)) => fossil.variant = Some(variant.clone()),
        Some(_) => return Err(FossilError::structural(path, "`_fossil` must be a string")),
        None => {}
    }

    if let Some(id) = object.get("id") {
        fossil.id = Some(
            scalar_from_value(id, &format!("{path}.id"))?
                .ok_or_else(|| FossilError::structural(path, "`id` must not be null"))?,
        );
    }

    for (name, member) in object {
        if RESERVED_KEYS.contains(&name.as_str()) {
            continue;
        }
        let member_path = format!("{path}.{name}");
        match member {
            Value::Null => continue,
            Value::Object(_) => {
                fossil.set_field(name.as_str(), fossil_from_value(member, &member_path)?);
            }
            Value::Array(elements) => {
                let mut items = Vec::with_capacity(elements.len());
                for (index, element) in elements.iter().enumerate() {
                    let element_path = format!("{member_path}[{index}]");
                    if !element.is_object() {
                        return Err(FossilError::structural(
                            element_path,
                            "list elements must be fossil objects, not scalars",
                        ));
                    }
                    items.push(fossil_from_value(element, &element_path)?);
                }
                fossil.set_field(name.as_str(), items);
            }
            scalar => {
                if let Some(scalar) = scalar_from_value(scalar, &member_path)? {
                    fossil.set_field(name.as_str(), scalar);
                }
            }
        }
    }

    Ok(fossil)
}

/// Convert a terminal JSON value into a scalar. `None` for nulls.
fn scalar_from_value(value: &Value, path: &str) -> Result<Option<Scalar>> {
    let scalar = match value {
        Value::Null => return Ok(None),
        Value::Bool(b) => Scalar::Bool(*b),
        Value::String(s) => Scalar::Text(s.clone()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Scalar::Int(i)
            } else if let Some(f) = n.as_f64() {
                Scalar::Float(f)
            } else {
                // u64 beyond i64::MAX; keep the digits rather than losing them
                Scalar::Text(n.to_string())
            }
        }
        Value::Array(_) | Value::Object(_) => {
            return Err(FossilError::structural(path, "expected a scalar value"))
        }
    };
    Ok(Some(scalar))
}
