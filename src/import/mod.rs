//! Import functionality
//!
//! Loads an XSD into a [`SchemaDocument`] and walks it for the
//! dataset → table → column structure.

pub mod document;
pub mod xsd;

/// Error during import
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Malformed document: {0}")]
    MalformedDocument(String),
    #[error("IO error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::IoError(err.to_string())
    }
}

// Re-export for convenience
pub use document::{Attribute, Element, SchemaDocument};
pub use xsd::{XSD_NAMESPACE, XsdImporter};
