//! Export functionality
//!
//! Provides exporters for:
//! - SQL (`CREATE TABLE` script)
//! - JSON (discovered tables with their SQL types)

pub mod json;
pub mod sql;

/// Result of an export operation
#[derive(Debug)]
pub struct ExportResult {
    /// Exported content
    pub content: String,
    /// Format identifier
    pub format: String,
}

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("IO error: {0}")]
    IoError(String),
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::IoError(err.to_string())
    }
}

// Re-export for convenience
pub use json::JSONExporter;
pub use sql::SQLExporter;
