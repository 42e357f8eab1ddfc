//! SQL exporter for generating CREATE TABLE statements from table descriptors.
//!
//! Output targets SQL Server type names. Unless disabled, the last column
//! keeps its trailing comma. Identifiers are written verbatim.

use std::io::Write;

use crate::export::{ExportError, ExportResult};
use crate::models::TableDescriptor;

/// Exporter for SQL CREATE TABLE format.
#[derive(Debug, Clone, Copy)]
pub struct SQLExporter {
    trailing_comma: bool,
}

impl Default for SQLExporter {
    fn default() -> Self {
        Self {
            trailing_comma: true,
        }
    }
}

impl SQLExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep (`true`, default) or drop the comma after the last column.
    pub fn with_trailing_comma(mut self, trailing_comma: bool) -> Self {
        self.trailing_comma = trailing_comma;
        self
    }

    /// Export a table to a CREATE TABLE statement.
    ///
    /// # Example
    ///
    /// ```rust
    /// use xsd_to_sql::export::SQLExporter;
    /// use xsd_to_sql::models::{ColumnDescriptor, TableDescriptor};
    ///
    /// let table = TableDescriptor::new(
    ///     "Customer",
    ///     vec![
    ///         ColumnDescriptor::new("Id", "xs:int", "INT", false),
    ///         ColumnDescriptor::new("Name", "xs:string", "NVARCHAR(MAX)", true),
    ///     ],
    /// );
    ///
    /// let sql = SQLExporter::new().export_table(&table, "Sample");
    /// assert_eq!(
    ///     sql,
    ///     "CREATE TABLE Sample_Customer (\n    Id INT NOT NULL,\n    Name NVARCHAR(MAX) NULL,\n);\n\n"
    /// );
    /// ```
    pub fn export_table(&self, table: &TableDescriptor, prefix: &str) -> String {
        let mut sql = format!("CREATE TABLE {} (\n", table.qualified_name(prefix));

        let last = table.columns.len().saturating_sub(1);
        for (idx, column) in table.columns.iter().enumerate() {
            let separator = if self.trailing_comma || idx < last { "," } else { "" };
            sql.push_str(&format!(
                "    {} {} {}{}\n",
                column.name,
                column.sql_type,
                column.null_clause(),
                separator
            ));
        }

        sql.push_str(");\n\n");
        sql
    }

    /// Export tables, in order, to one script.
    pub fn export(&self, tables: &[TableDescriptor], prefix: &str) -> ExportResult {
        let content = tables
            .iter()
            .map(|table| self.export_table(table, prefix))
            .collect();

        ExportResult {
            content,
            format: "sql".to_string(),
        }
    }

    /// Write tables to `writer` one statement at a time.
    ///
    /// Statements already written stay written if a later write fails.
    pub fn write_to<W: Write>(
        &self,
        tables: &[TableDescriptor],
        prefix: &str,
        writer: &mut W,
    ) -> Result<(), ExportError> {
        for table in tables {
            writer.write_all(self.export_table(table, prefix).as_bytes())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColumnDescriptor;

    fn customer() -> TableDescriptor {
        TableDescriptor::new(
            "Customer",
            vec![
                ColumnDescriptor::new("Id", "xs:int", "INT", false),
                ColumnDescriptor::new("Name", "xs:string", "NVARCHAR(MAX)", true),
            ],
        )
    }

    #[test]
    fn test_export_table_keeps_trailing_comma() {
        let sql = SQLExporter::new().export_table(&customer(), "Sample");
        assert_eq!(
            sql,
            "CREATE TABLE Sample_Customer (\n    Id INT NOT NULL,\n    Name NVARCHAR(MAX) NULL,\n);\n\n"
        );
    }

    #[test]
    fn test_export_table_without_trailing_comma() {
        let sql = SQLExporter::new()
            .with_trailing_comma(false)
            .export_table(&customer(), "Sample");
        assert_eq!(
            sql,
            "CREATE TABLE Sample_Customer (\n    Id INT NOT NULL,\n    Name NVARCHAR(MAX) NULL\n);\n\n"
        );
    }

    #[test]
    fn test_export_empty_table() {
        let table = TableDescriptor::new("Empty", Vec::new());
        assert_eq!(
            SQLExporter::new().export_table(&table, "S"),
            "CREATE TABLE S_Empty (\n);\n\n"
        );
        assert_eq!(
            SQLExporter::new()
                .with_trailing_comma(false)
                .export_table(&table, "S"),
            "CREATE TABLE S_Empty (\n);\n\n"
        );
    }

    #[test]
    fn test_export_preserves_order() {
        let tables = vec![
            TableDescriptor::new("B", Vec::new()),
            TableDescriptor::new("A", Vec::new()),
        ];
        let result = SQLExporter::new().export(&tables, "X");
        assert_eq!(result.format, "sql");
        assert_eq!(
            result.content,
            "CREATE TABLE X_B (\n);\n\nCREATE TABLE X_A (\n);\n\n"
        );
    }

    #[test]
    fn test_write_to_matches_export() {
        let tables = vec![customer(), TableDescriptor::new("Other", Vec::new())];
        let exporter = SQLExporter::new();
        let mut buf = Vec::new();
        exporter.write_to(&tables, "P", &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), exporter.export(&tables, "P").content);
    }

    #[test]
    fn test_export_nothing() {
        assert!(SQLExporter::new().export(&[], "X").content.is_empty());
    }
}
