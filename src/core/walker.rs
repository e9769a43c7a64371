//! Fossil tree walker
//!
//! Turns a fossil (or a batch of them) into the generic labeled-node tree
//! consumed by the concrete emitters. The walk is a single depth-first
//! pass; the input must be a finite acyclic tree (producer invariant, not
//! checked here).
//!
//! `build` recurses for clarity. `build_iterative` produces identical
//! output with an explicit stack for inputs of unbounded depth.

use std::collections::VecDeque;

use crate::core::convert::scalar_to_text;
use crate::core::error::{FossilError, Result};
use crate::core::models::{FieldValue, Fossil, NodeContent, SerializedNode};

/// Root path used in structural error messages
const ROOT_PATH: &str = "$";

/// Build the generic node tree for a single fossil
pub fn build(fossil: &Fossil) -> Result<SerializedNode> {
    build_at(fossil, ROOT_PATH)
}

/// Build a root node tagged `collection` wrapping each input fossil in order
pub fn build_collection(fossils: &[Fossil]) -> Result<SerializedNode> {
    let mut root = SerializedNode::container("collection");
    for (index, fossil) in fossils.iter().enumerate() {
        root.push_child(build_at(fossil, &format!("{ROOT_PATH}[{index}]"))?);
    }
    Ok(root)
}

/// Node tag and attributes for a fossil, without its children.
///
/// Attribute order is fixed to declaration order (`fossil`, then `id`) so
/// output is reproducible.
fn node_shell(fossil: &Fossil, path: &str) -> Result<SerializedNode> {
    let type_name = fossil
        .type_name
        .as_deref()
        .ok_or_else(|| FossilError::structural(path, "fossil has no type name"))?;

    let mut node = SerializedNode::container(type_name.to_lowercase());
    if let Some(variant) = &fossil.variant {
        node.push_attribute("fossil", variant);
    }
    if let Some(id) = &fossil.id {
        node.push_attribute("id", scalar_to_text(id));
    }
    Ok(node)
}

fn build_at(fossil: &Fossil, path: &str) -> Result<SerializedNode> {
    let mut node = node_shell(fossil, path)?;

    for (name, value) in fossil.fields() {
        let child = match value {
            FieldValue::Scalar(scalar) => SerializedNode::leaf(name, scalar_to_text(scalar)),
            FieldValue::Nested(nested) => {
                // A single nested fossil is structurally a one-element list:
                // the field name wraps the entity node either way.
                let mut wrapper = SerializedNode::container(name);
                wrapper.push_child(build_at(nested, &format!("{path}.{name}"))?);
                wrapper
            }
            FieldValue::Items(items) => {
                let mut wrapper = SerializedNode::container(name);
                for (index, item) in items.iter().enumerate() {
                    wrapper.push_child(build_at(item, &format!("{path}.{name}[{index}]"))?);
                }
                wrapper
            }
        };
        node.push_child(child);
    }

    Ok(node)
}

/// One suspended fossil expansion: the node under construction plus the
/// child fossils still to expand, each with the index of the field wrapper
/// node it belongs under.
struct Frame<'a> {
    /// Index of this fossil's wrapper node in the parent frame's children
    slot: usize,
    node: SerializedNode,
    pending: VecDeque<(usize, &'a Fossil, String)>,
}

/// Expand one fossil into a frame: shell, scalar leaves and empty field
/// wrappers are materialized immediately; nested fossils are queued.
fn expand<'a>(fossil: &'a Fossil, path: &str, slot: usize) -> Result<Frame<'a>> {
    let mut node = node_shell(fossil, path)?;
    let mut pending = VecDeque::new();

    for (name, value) in fossil.fields() {
        let wrapper_slot = node.children().len();
        match value {
            FieldValue::Scalar(scalar) => {
                node.push_child(SerializedNode::leaf(name, scalar_to_text(scalar)));
            }
            FieldValue::Nested(nested) => {
                node.push_child(SerializedNode::container(name));
                pending.push_back((wrapper_slot, nested, format!("{path}.{name}")));
            }
            FieldValue::Items(items) => {
                node.push_child(SerializedNode::container(name));
                for (index, item) in items.iter().enumerate() {
                    pending.push_back((wrapper_slot, item, format!("{path}.{name}[{index}]")));
                }
            }
        }
    }

    Ok(Frame {
        slot,
        node,
        pending,
    })
}

/// Explicit-stack variant of [`build`], for inputs of unbounded depth.
///
/// Produces a tree identical to the recursive walk: siblings are expanded
/// strictly one after another, so ordering is preserved.
pub fn build_iterative(fossil: &Fossil) -> Result<SerializedNode> {
    let mut stack = vec![expand(fossil, ROOT_PATH, 0)?];

    loop {
        let frame = stack
            .last_mut()
            .ok_or_else(|| FossilError::render("walker stack underflow"))?;

        if let Some((slot, child, path)) = frame.pending.pop_front() {
            let next = expand(child, &path, slot)?;
            stack.push(next);
            continue;
        }

        let done = match stack.pop() {
            Some(frame) => frame,
            None => return Err(FossilError::render("walker stack underflow")),
        };
        match stack.last_mut() {
            Some(parent) => {
                if let NodeContent::Children(children) = &mut parent.node.content {
                    children[done.slot].push_child(done.node);
                }
            }
            None => return Ok(done.node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Scalar;
    use chrono::NaiveDate;

    fn person(name: &str, id: i64) -> Fossil {
        Fossil::new("Person").with_id(id).with_field("name", name)
    }

    #[test]
    fn test_build_basic_structure() {
        let fossil = Fossil::new("Foo").with_id(5).with_field("name", "bar");
        let node = build(&fossil).unwrap();

        assert_eq!(node.tag, "foo");
        assert_eq!(node.attribute("id"), Some("5"));
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].tag, "name");
        assert_eq!(node.children()[0].text(), Some("bar"));
    }

    #[test]
    fn test_build_lowercases_type_name() {
        let node = build(&Fossil::new("ConferenceEvent")).unwrap();
        assert_eq!(node.tag, "conferenceevent");
    }

    #[test]
    fn test_attribute_order_is_fossil_then_id() {
        let fossil = Fossil::new("Foo").with_id(5).with_variant("fooBasic");
        let node = build(&fossil).unwrap();
        let names: Vec<&str> = node.attributes.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["fossil", "id"]);
    }

    #[test]
    fn test_no_reserved_fields_no_attributes() {
        let node = build(&Fossil::new("Foo").with_field("name", "bar")).unwrap();
        assert!(node.attributes.is_empty());
    }

    #[test]
    fn test_missing_type_is_structural_error() {
        let err = build(&Fossil::anonymous().with_field("name", "bar")).unwrap_err();
        assert!(matches!(err, FossilError::Structural { .. }));
    }

    #[test]
    fn test_nested_missing_type_reports_path() {
        let fossil = Fossil::new("Event")
            .with_field("items", vec![person("Ada", 1), Fossil::anonymous()]);
        let err = build(&fossil).unwrap_err();
        match err {
            FossilError::Structural { path, .. } => assert_eq!(path, "$.items[1]"),
            other => panic!("expected structural error, got {other:?}"),
        }
    }

    #[test]
    fn test_list_fan_out() {
        let fossil =
            Fossil::new("Event").with_field("items", vec![person("Ada", 1), person("Grace", 2)]);
        let node = build(&fossil).unwrap();

        let items = &node.children()[0];
        assert_eq!(items.tag, "items");
        assert_eq!(items.children().len(), 2);
        assert_eq!(items.children()[0].attribute("id"), Some("1"));
        assert_eq!(items.children()[1].attribute("id"), Some("2"));
    }

    #[test]
    fn test_empty_list_yields_empty_wrapper() {
        let fossil = Fossil::new("Event").with_field("items", Vec::<Fossil>::new());
        let node = build(&fossil).unwrap();
        assert_eq!(node.children()[0].tag, "items");
        assert!(node.children()[0].children().is_empty());
        assert!(node.children()[0].text().is_none());
    }

    #[test]
    fn test_nested_fossil_wrapped_like_single_element_list() {
        let fossil = Fossil::new("Event").with_field("owner", person("Ada", 1));
        let node = build(&fossil).unwrap();

        let owner = &node.children()[0];
        assert_eq!(owner.tag, "owner");
        assert_eq!(owner.children().len(), 1);
        assert_eq!(owner.children()[0].tag, "person");
    }

    #[test]
    fn test_build_collection_wraps_in_order() {
        let fossils = vec![person("Ada", 1), person("Grace", 2)];
        let node = build_collection(&fossils).unwrap();

        assert_eq!(node.tag, "collection");
        assert!(node.attributes.is_empty());
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.children()[0], build(&fossils[0]).unwrap());
        assert_eq!(node.children()[1], build(&fossils[1]).unwrap());
    }

    #[test]
    fn test_collection_error_path_includes_index() {
        let fossils = vec![person("Ada", 1), Fossil::anonymous()];
        let err = build_collection(&fossils).unwrap_err();
        match err {
            FossilError::Structural { path, .. } => assert_eq!(path, "$[1]"),
            other => panic!("expected structural error, got {other:?}"),
        }
    }

    #[test]
    fn test_iterative_matches_recursive() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let fossil = Fossil::new("Event")
            .with_variant("fullEvent")
            .with_id(7)
            .with_field("title", "Workshop")
            .with_field("startDate", start)
            .with_field("open", true)
            .with_field(
                "sessions",
                vec![
                    Fossil::new("Session")
                        .with_id(1)
                        .with_field("speakers", vec![person("Ada", 10), person("Grace", 11)]),
                    Fossil::new("Session").with_id(2).with_field("empty", Vec::<Fossil>::new()),
                ],
            )
            .with_field("owner", person("Linus", 3));

        assert_eq!(build(&fossil).unwrap(), build_iterative(&fossil).unwrap());
    }

    #[test]
    fn test_iterative_rejects_missing_type_with_path() {
        let fossil = Fossil::new("Event").with_field("owner", Fossil::anonymous());
        let err = build_iterative(&fossil).unwrap_err();
        match err {
            FossilError::Structural { path, .. } => assert_eq!(path, "$.owner"),
            other => panic!("expected structural error, got {other:?}"),
        }
    }

    #[test]
    fn test_iterative_handles_deep_nesting() {
        let mut fossil = Fossil::new("Leaf").with_field("depth", 0);
        for depth in 1..=2000 {
            fossil = Fossil::new("Node")
                .with_field("depth", depth)
                .with_field("child", fossil);
        }
        let node = build_iterative(&fossil).unwrap();
        assert_eq!(node.tag, "node");
    }

    #[test]
    fn test_id_stringified_via_scalar_conversion() {
        let fossil = Fossil::new("Foo").with_id(Scalar::Text("ev-99".to_string()));
        let node = build(&fossil).unwrap();
        assert_eq!(node.attribute("id"), Some("ev-99"));
    }
}
