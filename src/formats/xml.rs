//! XML serializer
//!
//! Renders the generic node tree into XML syntax with a streaming writer
//! over any `std::io::Write` implementation. Output is UTF-8 and
//! byte-for-byte deterministic for a given input and options.

use std::io::Write;

use crate::core::error::Result;
use crate::core::models::{FossilInput, NodeContent, SerializeOptions, SerializedNode, SerializedPayload};
use crate::core::walker;
use crate::formats::Serializer;

/// MIME type of XML payloads
pub const MIME_XML: &str = "text/xml";

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";
const INDENT: &str = "  ";

/// Serializer for the `xml` format
#[derive(Debug)]
pub struct XmlSerializer;

impl XmlSerializer {
    /// Create a new XmlSerializer
    pub fn new() -> Self {
        Self
    }
}

impl Default for XmlSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for XmlSerializer {
    fn serialize(
        &self,
        input: FossilInput<'_>,
        options: &SerializeOptions,
    ) -> Result<SerializedPayload> {
        let root = match input {
            FossilInput::Single(fossil) => walker::build(fossil)?,
            FossilInput::Collection(fossils) => walker::build_collection(fossils)?,
        };
        tracing::debug!(root = %root.tag, pretty = options.pretty, "rendering xml document");

        let mut content = Vec::new();
        let mut renderer = XmlRenderer::new(&mut content, options.pretty);
        if options.declaration {
            renderer.write_declaration()?;
        }
        renderer.write_node(&root)?;

        Ok(SerializedPayload {
            content,
            mime_type: MIME_XML,
        })
    }

    fn mime_type(&self) -> &'static str {
        MIME_XML
    }

    fn extension(&self) -> &'static str {
        "xml"
    }
}

/// Streaming XML renderer
///
/// Writes directly to the provided `Write` handle; element order,
/// attribute order and whitespace are fully determined by the node tree
/// and the pretty flag.
pub struct XmlRenderer<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> XmlRenderer<W> {
    /// Create a renderer over the given writer
    pub fn new(writer: W, pretty: bool) -> Self {
        Self { writer, pretty }
    }

    /// Write the XML prolog
    pub fn write_declaration(&mut self) -> Result<()> {
        writeln!(self.writer, "{XML_DECLARATION}")?;
        Ok(())
    }

    /// Render a node tree as the document element
    pub fn write_node(&mut self, node: &SerializedNode) -> Result<()> {
        self.write_element(node, 0)
    }

    fn write_element(&mut self, node: &SerializedNode, depth: usize) -> Result<()> {
        if self.pretty {
            for _ in 0..depth {
                write!(self.writer, "{INDENT}")?;
            }
        }

        write!(self.writer, "<{}", node.tag)?;
        for (name, value) in &node.attributes {
            write!(self.writer, " {}=\"{}\"", name, escape_xml_attr(value))?;
        }

        match &node.content {
            NodeContent::Text(text) => {
                write!(
                    self.writer,
                    ">{}</{}>",
                    escape_xml_text(text),
                    node.tag
                )?;
            }
            NodeContent::Children(children) if children.is_empty() => {
                write!(self.writer, "/>")?;
            }
            NodeContent::Children(children) => {
                write!(self.writer, ">")?;
                if self.pretty {
                    writeln!(self.writer)?;
                }
                for child in children {
                    self.write_element(child, depth + 1)?;
                }
                if self.pretty {
                    for _ in 0..depth {
                        write!(self.writer, "{INDENT}")?;
                    }
                }
                write!(self.writer, "</{}>", node.tag)?;
            }
        }

        if self.pretty {
            writeln!(self.writer)?;
        }
        Ok(())
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Consume the renderer and return the inner Write handle
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Escape XML attribute values
fn escape_xml_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Escape XML element text
fn escape_xml_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
