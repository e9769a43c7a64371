//! Core module for the fossil serialization engine
//!
//! This module provides the foundational types and the format-independent
//! conversion pipeline.
//!
//! # Architecture
//!
//! - `models`: Core data structures (Fossil, Scalar, SerializedNode)
//! - `error`: Error types using thiserror
//! - `convert`: Scalar-to-text conversion
//! - `walker`: Depth-first fossil-to-node-tree conversion
//! - `json`: Dynamic fossil construction from JSON values

pub mod convert;
pub mod error;
pub mod json;
pub mod models;
pub mod walker;

// Re-export commonly used types
pub use convert::scalar_to_text;
pub use error::{FossilError, Result, ResultExt};
pub use models::{
    FieldValue, Fossil, FossilInput, NodeContent, Scalar, SerializeOptions, SerializedNode,
    SerializedPayload,
};
