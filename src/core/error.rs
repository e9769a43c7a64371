//! Error types for fossilize
//!
//! This module provides structured error handling using thiserror.

use thiserror::Error;

/// Result type alias for serialization operations
pub type Result<T> = std::result::Result<T, FossilError>;

/// Errors that can occur while converting fossils into documents
#[derive(Error, Debug)]
pub enum FossilError {
    /// Requested output format was never registered
    #[error("Unknown output format: {name}")]
    UnknownFormat { name: String },

    /// Malformed fossil input (missing type tag, scalar list element, ...)
    #[error("Structural error at {path}: {message}")]
    Structural { path: String, message: String },

    /// Failure while rendering a node tree into its output syntax
    #[error("Render error: {message}")]
    Render { message: String },

    /// JSON conversion error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error from the underlying writer
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 encoding error
    #[error("UTF-8 encoding error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<FossilError>,
    },
}

impl FossilError {
    /// Wrap an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        FossilError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an unknown format error
    pub fn unknown_format(name: impl Into<String>) -> Self {
        FossilError::UnknownFormat { name: name.into() }
    }

    /// Create a structural error for the given field path
    pub fn structural(path: impl Into<String>, message: impl Into<String>) -> Self {
        FossilError::Structural {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a render error
    pub fn render(message: impl Into<String>) -> Self {
        FossilError::Render {
            message: message.into(),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(ctx))
    }
}
