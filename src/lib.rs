//! XSD to SQL - converts dataset-shaped XML Schemas into CREATE TABLE scripts
//!
//! Provides:
//! - A schema-type to SQL Server type table
//! - An XSD walker extracting tables and columns
//! - SQL and JSON exporters
//! - A file-to-file conversion pipeline

pub mod convert;
pub mod export;
pub mod import;
pub mod models;
pub mod type_mapping;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use convert::{ConversionSummary, ConvertError, ConvertOptions, Converter, OutputFormat};
pub use export::{ExportError, ExportResult, JSONExporter, SQLExporter};
pub use import::{ImportError, SchemaDocument, XsdImporter};
pub use models::{ColumnDescriptor, TableDescriptor};
pub use type_mapping::TypeMapping;
