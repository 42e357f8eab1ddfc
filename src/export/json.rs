//! JSON exporter
//!
//! Emits the discovered tables as a JSON array, mostly for inspecting what
//! the walker kept and dropped.

use serde::Serialize;

use crate::export::{ExportError, ExportResult};
use crate::models::{ColumnDescriptor, TableDescriptor};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TableView<'a> {
    name: String,
    source_name: &'a str,
    columns: &'a [ColumnDescriptor],
}

/// Exporter for JSON format.
#[derive(Debug, Default, Clone, Copy)]
pub struct JSONExporter;

impl JSONExporter {
    /// Export tables as a pretty-printed JSON array.
    pub fn export(
        &self,
        tables: &[TableDescriptor],
        prefix: &str,
    ) -> Result<ExportResult, ExportError> {
        let views: Vec<TableView<'_>> = tables
            .iter()
            .map(|table| TableView {
                name: table.qualified_name(prefix),
                source_name: &table.name,
                columns: &table.columns,
            })
            .collect();

        let mut content = serde_json::to_string_pretty(&views)?;
        content.push('\n');

        Ok(ExportResult {
            content,
            format: "json".to_string(),
        })
    }
}
