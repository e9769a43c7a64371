//! Core data models for fossilize
//!
//! This module contains the fundamental data structures used throughout the
//! engine: the fossil tree itself, the scalar value set, and the generic
//! node tree that sits between the walker and the concrete output formats.

use chrono::NaiveDateTime;
use indexmap::IndexMap;

/// A terminal field value.
///
/// The set is closed on purpose: every variant has a defined textual
/// conversion, so an "unsupported scalar kind" cannot exist at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// A temporal instant without timezone information
    Instant(NaiveDateTime),
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Text value
    Text(String),
    /// Binary payload already decoded to text; passed through verbatim
    Raw(String),
}

impl From<NaiveDateTime> for Scalar {
    fn from(value: NaiveDateTime) -> Self {
        Scalar::Instant(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(value as i64)
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Scalar::Int(value as i64)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

/// The value of a single fossil field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A terminal value
    Scalar(Scalar),
    /// A single nested child entity
    Nested(Fossil),
    /// Zero or more child entities under one field name
    Items(Vec<Fossil>),
}

impl From<Scalar> for FieldValue {
    fn from(value: Scalar) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<Fossil> for FieldValue {
    fn from(value: Fossil) -> Self {
        FieldValue::Nested(value)
    }
}

impl From<Vec<Fossil>> for FieldValue {
    fn from(value: Vec<Fossil>) -> Self {
        FieldValue::Items(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::Scalar(Scalar::Instant(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Scalar(Scalar::Int(value))
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Scalar(Scalar::Int(value as i64))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Scalar(Scalar::Float(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Scalar(Scalar::Bool(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(Scalar::Text(value.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Scalar(Scalar::Text(value))
    }
}

/// A snapshot representation of one domain entity, built by a producer
/// immediately before serialization.
///
/// The reserved keys of the dict-shaped original (`_type`, `_fossil`, `id`)
/// are lifted into dedicated fields; ordinary fields keep their insertion
/// order. The engine reads a fossil once, depth-first, and never mutates it.
///
/// Fossil values must form a finite, acyclic tree. No cycle detection is
/// performed; a cyclic input is a producer bug.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fossil {
    /// Declared entity type name; its lower-cased form becomes the node tag.
    /// Serialization fails with a structural error when absent.
    pub type_name: Option<String>,
    /// Name of the schema variant used to produce this fossil (`_fossil`)
    pub variant: Option<String>,
    /// Entity identifier, rendered as a stringified node attribute
    pub id: Option<Scalar>,
    /// Ordinary fields in insertion order
    pub fields: IndexMap<String, FieldValue>,
}

impl Fossil {
    /// Create a fossil with the given entity type name
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Default::default()
        }
    }

    /// Create a fossil without a type name.
    ///
    /// Such a fossil is rejected at serialization time; this constructor
    /// exists for producers that fill the type in later.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Set the schema variant name
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Set the entity identifier
    pub fn with_id(mut self, id: impl Into<Scalar>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a field, keeping insertion order
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Insert a field in place. Re-inserting an existing name replaces the
    /// value without changing the field's position.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Iterate ordinary fields in insertion order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

/// Content of a generic node: leaves carry text, containers carry children
#[derive(Debug, Clone, PartialEq)]
pub enum NodeContent {
    /// Text payload of a leaf node
    Text(String),
    /// Ordered children of a container node (possibly empty)
    Children(Vec<SerializedNode>),
}

/// A generic labeled tree element, independent of output syntax.
///
/// This is the intermediate the walker produces and the concrete emitters
/// consume: tag name, ordered attributes, and either text or children.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedNode {
    /// Element tag name
    pub tag: String,
    /// Attributes in declaration order
    pub attributes: Vec<(String, String)>,
    /// Text payload or child nodes
    pub content: NodeContent,
}

impl SerializedNode {
    /// Create an empty container node
    pub fn container(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            content: NodeContent::Children(Vec::new()),
        }
    }

    /// Create a leaf node with a text payload
    pub fn leaf(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            content: NodeContent::Text(text.into()),
        }
    }

    /// Append an attribute, preserving declaration order
    pub fn push_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((name.into(), value.into()));
    }

    /// Append a child node. Only meaningful on container nodes.
    pub fn push_child(&mut self, child: SerializedNode) {
        match &mut self.content {
            NodeContent::Children(children) => children.push(child),
            NodeContent::Text(_) => debug_assert!(false, "push_child on a leaf node"),
        }
    }

    /// Child nodes, or an empty slice for leaves
    pub fn children(&self) -> &[SerializedNode] {
        match &self.content {
            NodeContent::Children(children) => children,
            NodeContent::Text(_) => &[],
        }
    }

    /// Text payload, if this is a leaf node
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            NodeContent::Text(text) => Some(text),
            NodeContent::Children(_) => None,
        }
    }

    /// Look up an attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Per-call serialization options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Prepend the format declaration (the XML prolog) when the format has one
    pub declaration: bool,
    /// Emit human-readable, indented output instead of compact output
    pub pretty: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            declaration: true,
            pretty: false,
        }
    }
}

impl SerializeOptions {
    /// Set whether a format declaration is emitted
    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    /// Set pretty-printing
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Encoded output plus its MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedPayload {
    /// UTF-8 encoded document bytes
    pub content: Vec<u8>,
    /// MIME type of the content, e.g. `text/xml`
    pub mime_type: &'static str,
}

impl SerializedPayload {
    /// Consume the payload and return its content as a string
    pub fn into_text(self) -> crate::core::error::Result<String> {
        Ok(String::from_utf8(self.content)?)
    }
}

/// Serializer input: one fossil or a batch of them
#[derive(Debug, Clone, Copy)]
pub enum FossilInput<'a> {
    /// A single fossil
    Single(&'a Fossil),
    /// A collection, wrapped under a single root node by the walker
    Collection(&'a [Fossil]),
}

impl<'a> From<&'a Fossil> for FossilInput<'a> {
    fn from(value: &'a Fossil) -> Self {
        FossilInput::Single(value)
    }
}

impl<'a> From<&'a [Fossil]> for FossilInput<'a> {
    fn from(value: &'a [Fossil]) -> Self {
        FossilInput::Collection(value)
    }
}

impl<'a> From<&'a Vec<Fossil>> for FossilInput<'a> {
    fn from(value: &'a Vec<Fossil>) -> Self {
        FossilInput::Collection(value.as_slice())
    }
}
