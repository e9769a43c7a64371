//! Integration tests for the process-wide format registry
//!
//! Registration happens once at startup; lookups are concurrent and
//! read-only afterwards.

use std::sync::Arc;
use std::thread;

use fossilize::core::models::{FossilInput, SerializeOptions, SerializedPayload};
use fossilize::core::Result;
use fossilize::{
    get_serializer, register_builtin_formats, register_serializer, registered_formats, Fossil,
    FossilError, Serializer,
};

/// Minimal serializer used to exercise custom registration
#[derive(Debug)]
struct TabSerializer;

impl Serializer for TabSerializer {
    fn serialize(
        &self,
        input: FossilInput<'_>,
        _options: &SerializeOptions,
    ) -> Result<SerializedPayload> {
        let count = match input {
            FossilInput::Single(_) => 1,
            FossilInput::Collection(fossils) => fossils.len(),
        };
        Ok(SerializedPayload {
            content: format!("{count}\n").into_bytes(),
            mime_type: "text/tab-separated-values",
        })
    }

    fn mime_type(&self) -> &'static str {
        "text/tab-separated-values"
    }

    fn extension(&self) -> &'static str {
        "tsv"
    }
}

#[test]
fn test_unknown_format_fails() {
    register_builtin_formats();
    match get_serializer("yaml") {
        Err(FossilError::UnknownFormat { name }) => assert_eq!(name, "yaml"),
        other => panic!("expected UnknownFormat, got {other:?}"),
    }
}

#[test]
fn test_builtin_formats_available() {
    register_builtin_formats();
    let formats = registered_formats();
    assert!(formats.contains(&"xml".to_string()));
    assert!(formats.contains(&"json".to_string()));
}

#[test]
fn test_builtin_registration_is_idempotent() {
    register_builtin_formats();
    register_builtin_formats();
    assert!(get_serializer("xml").is_ok());
}

#[test]
fn test_custom_serializer_registration() {
    register_builtin_formats();
    register_serializer("tsv", Arc::new(TabSerializer));

    let serializer = get_serializer("tsv").unwrap();
    assert_eq!(serializer.extension(), "tsv");

    let fossils = vec![Fossil::new("Foo"), Fossil::new("Bar")];
    let payload = serializer
        .serialize((&fossils).into(), &SerializeOptions::default())
        .unwrap();
    assert_eq!(payload.into_text().unwrap(), "2\n");
}

#[test]
fn test_lookup_is_case_insensitive() {
    register_builtin_formats();
    assert!(get_serializer("XML").is_ok());
    assert!(get_serializer("Json").is_ok());
}

#[test]
fn test_concurrent_lookups() {
    register_builtin_formats();
    let fossil = Arc::new(Fossil::new("Foo").with_field("name", "bar"));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let fossil = Arc::clone(&fossil);
            thread::spawn(move || {
                let serializer = get_serializer("xml").unwrap();
                serializer
                    .serialize((fossil.as_ref()).into(), &SerializeOptions::default())
                    .unwrap()
                    .content
            })
        })
        .collect();

    let outputs: Vec<Vec<u8>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for output in &outputs[1..] {
        assert_eq!(output, &outputs[0]);
    }
}
