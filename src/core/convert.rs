//! Scalar-to-text conversion
//!
//! Terminal values embed into document nodes as text. The match is
//! exhaustive over the closed `Scalar` set, so there is no failure path.

use crate::core::models::Scalar;

/// Convert a terminal value into its textual node representation.
///
/// Temporal instants render as ISO-8601 without timezone normalization
/// (naive instants carry none); numbers and booleans use their canonical
/// decimal / `true`/`false` forms; text passes through unchanged.
pub fn scalar_to_text(value: &Scalar) -> String {
    match value {
        // %.f keeps the subsecond fraction only when it is non-zero,
        // matching isoformat-style output
        Scalar::Instant(instant) => instant.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
        Scalar::Int(value) => value.to_string(),
        Scalar::Float(value) => value.to_string(),
        Scalar::Bool(value) => value.to_string(),
        Scalar::Text(value) | Scalar::Raw(value) => value.clone(),
    }
}
