//! Output format modules
//!
//! Each concrete serializer turns a fossil (or a collection) into one wire
//! format plus its MIME type. Serializers are looked up by name through a
//! process-wide registry so callers can pick the format dynamically, e.g.
//! from a request parameter.
//!
//! Registration is an explicit startup step: call
//! [`register_builtin_formats`] once before the first lookup. After that
//! the registry is only read, so concurrent lookups need no coordination
//! beyond the read lock.

pub mod json;
pub mod xml;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use lazy_static::lazy_static;

use crate::core::error::{FossilError, Result};
use crate::core::models::{FossilInput, SerializeOptions, SerializedPayload};

pub use json::JsonSerializer;
pub use xml::XmlSerializer;

/// Trait for output format serializers
pub trait Serializer: Send + Sync + std::fmt::Debug {
    /// Serialize one fossil or a collection into encoded output
    fn serialize(
        &self,
        input: FossilInput<'_>,
        options: &SerializeOptions,
    ) -> Result<SerializedPayload>;

    /// MIME type of the produced content
    fn mime_type(&self) -> &'static str;

    /// File extension for this format
    fn extension(&self) -> &'static str;
}

lazy_static! {
    static ref REGISTRY: RwLock<HashMap<String, Arc<dyn Serializer>>> =
        RwLock::new(HashMap::new());
}

/// Register a serializer under a format name.
///
/// Names are matched case-insensitively. Re-registering an existing name
/// replaces the serializer and logs a warning: allowed, but usually a
/// configuration smell.
pub fn register_serializer(name: &str, serializer: Arc<dyn Serializer>) {
    let key = name.to_ascii_lowercase();
    let mut registry = REGISTRY.write().expect("format registry poisoned");
    if registry.insert(key.clone(), serializer).is_some() {
        tracing::warn!(format = %key, "output format re-registered, replacing serializer");
    }
}

/// Look up a serializer by format name
pub fn get_serializer(name: &str) -> Result<Arc<dyn Serializer>> {
    let registry = REGISTRY.read().expect("format registry poisoned");
    registry
        .get(&name.to_ascii_lowercase())
        .cloned()
        .ok_or_else(|| FossilError::unknown_format(name))
}

/// Register the built-in serializers (`xml`, `json`).
///
/// Idempotent; existing registrations are left untouched, so this is safe
/// to call from multiple initialization paths.
pub fn register_builtin_formats() {
    let mut registry = REGISTRY.write().expect("format registry poisoned");
    registry
        .entry("xml".to_string())
        .or_insert_with(|| Arc::new(XmlSerializer::new()));
    registry
        .entry("json".to_string())
        .or_insert_with(|| Arc::new(JsonSerializer::new()));
}

/// Names of all registered formats, sorted
pub fn registered_formats() -> Vec<String> {
    let registry = REGISTRY.read().expect("format registry poisoned");
    let mut names: Vec<String> = registry.keys().cloned().collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Fossil;

    #[derive(Debug)]
    struct NullSerializer;

    impl Serializer for NullSerializer {
        fn serialize(
            &self,
            _input: FossilInput<'_>,
            _options: &SerializeOptions,
        ) -> Result<SerializedPayload> {
            Ok(SerializedPayload {
                content: Vec::new(),
                mime_type: "application/octet-stream",
            })
        }

        fn mime_type(&self) -> &'static str {
            "application/octet-stream"
        }

        fn extension(&self) -> &'static str {
            "bin"
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        register_builtin_formats();
        let err = get_serializer("yaml").unwrap_err();
        match err {
            FossilError::UnknownFormat { name } => assert_eq!(name, "yaml"),
            other => panic!("expected unknown format error, got {other:?}"),
        }
    }

    #[test]
    fn test_builtin_formats_resolve() {
        register_builtin_formats();
        assert_eq!(get_serializer("xml").unwrap().mime_type(), "text/xml");
        assert_eq!(
            get_serializer("json").unwrap().mime_type(),
            "application/json"
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        register_builtin_formats();
        assert!(get_serializer("XML").is_ok());
    }

    #[test]
    fn test_reregistration_replaces() {
        register_builtin_formats();
        register_serializer("null-test", Arc::new(NullSerializer));
        register_serializer("null-test", Arc::new(NullSerializer));
        assert_eq!(get_serializer("null-test").unwrap().extension(), "bin");
    }

    #[test]
    fn test_registered_formats_sorted() {
        register_builtin_formats();
        let names = registered_formats();
        let json_pos = names.iter().position(|n| n == "json").unwrap();
        let xml_pos = names.iter().position(|n| n == "xml").unwrap();
        assert!(json_pos < xml_pos);
    }

    #[test]
    fn test_registered_serializer_usable() {
        register_builtin_formats();
        let fossil = Fossil::new("Foo").with_field("name", "bar");
        let serializer = get_serializer("xml").unwrap();
        let payload = serializer
            .serialize((&fossil).into(), &SerializeOptions::default())
            .unwrap();
        assert_eq!(payload.mime_type, "text/xml");
    }
}
