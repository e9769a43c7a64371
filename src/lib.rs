//! fossilize - Fossil serialization engine
//!
//! This library converts "fossils" (tagged, ordered snapshots of domain
//! entities, built by a producer layer immediately before serialization)
//! into wire formats. Domain types never learn about XML or any other
//! syntax: the walker first turns a fossil into a generic labeled-node
//! tree, and a format-specific emitter renders that tree into bytes plus
//! a MIME type.
//!
//! # Architecture
//!
//! This crate follows the "Library-First" pattern:
//! - **core**: Data model, scalar conversion, tree walker, errors
//! - **formats**: Serializer trait, format registry, XML/JSON emitters
//! - **designer**: The placeholder registry producing values and fossils
//!
//! Serialization is pure and stateless per call; the format registry is
//! the only shared state. Register serializers once at startup, then look
//! them up by name from any thread:
//!
//! ```
//! use fossilize::{register_builtin_formats, serialize, Fossil, SerializeOptions};
//!
//! register_builtin_formats();
//! let fossil = Fossil::new("Event").with_id(5).with_field("title", "Workshop");
//! let payload = serialize("xml", &fossil, &SerializeOptions::default()).unwrap();
//! assert_eq!(payload.mime_type, "text/xml");
//! ```

pub mod core;
pub mod designer;
pub mod formats;

pub use crate::core::error::{FossilError, Result, ResultExt};
pub use crate::core::models::{
    FieldValue, Fossil, FossilInput, NodeContent, Scalar, SerializeOptions, SerializedNode,
    SerializedPayload,
};
pub use crate::formats::{
    get_serializer, register_builtin_formats, register_serializer, registered_formats, Serializer,
};

/// Returns the version of the fossilize library
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Serialize a fossil (or a collection) with a named output format.
///
/// Thin wrapper over the registry lookup plus the serializer call; the
/// format must have been registered beforehand (see
/// [`register_builtin_formats`]).
pub fn serialize<'a>(
    format: &str,
    input: impl Into<FossilInput<'a>>,
    options: &SerializeOptions,
) -> Result<SerializedPayload> {
    let serializer = get_serializer(format)?;
    serializer.serialize(input.into(), options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_serialize_by_format_name() {
        register_builtin_formats();
        let fossil = Fossil::new("Foo").with_field("name", "bar");
        let payload = serialize("xml", &fossil, &SerializeOptions::default()).unwrap();
        assert_eq!(payload.mime_type, "text/xml");
        let text = payload.into_text().unwrap();
        assert!(text.contains("<name>bar</name>"));
    }

    #[test]
    fn test_serialize_unknown_format() {
        register_builtin_formats();
        let fossil = Fossil::new("Foo");
        let result = serialize("yaml", &fossil, &SerializeOptions::default());
        assert!(matches!(result, Err(FossilError::UnknownFormat { .. })));
    }
}
