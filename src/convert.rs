//! XSD file → SQL script pipeline.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::export::{ExportError, JSONExporter, SQLExporter};
use crate::import::{ImportError, SchemaDocument, XsdImporter};
use crate::models::TableDescriptor;
use crate::type_mapping::TypeMapping;

/// Output format of a conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CREATE TABLE script
    #[default]
    Sql,
    /// JSON array of discovered tables
    Json,
}

/// Options for a conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertOptions {
    /// Table name prefix; defaults to the input file name without extension
    pub table_prefix: Option<String>,

    /// Keep the comma after the last column of each table
    pub trailing_comma: bool,

    pub format: OutputFormat,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            table_prefix: None,
            trailing_comma: true,
            format: OutputFormat::Sql,
        }
    }
}

impl ConvertOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom options
    pub fn builder() -> ConvertOptionsBuilder {
        ConvertOptionsBuilder::default()
    }
}

/// Builder for ConvertOptions
#[derive(Debug, Default)]
pub struct ConvertOptionsBuilder {
    options: ConvertOptions,
}

impl ConvertOptionsBuilder {
    pub fn table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.table_prefix = Some(prefix.into());
        self
    }

    pub fn trailing_comma(mut self, trailing_comma: bool) -> Self {
        self.options.trailing_comma = trailing_comma;
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.options.format = format;
        self
    }

    pub fn build(self) -> ConvertOptions {
        self.options
    }
}

/// Errors that can occur during a conversion
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Input could not be read or parsed
    #[error("failed to load schema '{}'", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: ImportError,
    },

    /// Output file could not be created or written
    #[error("failed to write '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: ExportError,
    },

    #[error(transparent)]
    Import(#[from] ImportError),

    /// Rendering failed
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// What a file conversion produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionSummary {
    pub output: PathBuf,
    pub prefix: String,
    pub tables: usize,
    pub columns: usize,
}

/// Converts dataset XSDs to table scripts
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
    mapping: TypeMapping,
}

impl Converter {
    /// Converter using the built-in type mapping
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            mapping: TypeMapping::default(),
        }
    }

    /// Replace the type mapping
    pub fn with_mapping(mut self, mapping: TypeMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn mapping(&self) -> &TypeMapping {
        &self.mapping
    }

    /// Prefix for tables read from `input`: the configured prefix, else the
    /// file name with everything from its last `.` removed (`.xsd` gives an
    /// empty prefix).
    pub fn prefix_for(&self, input: &Path) -> String {
        if let Some(prefix) = &self.options.table_prefix {
            return prefix.clone();
        }

        let file_name = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        match file_name.rfind('.') {
            Some(dot) => file_name[..dot].to_string(),
            None => file_name,
        }
    }

    /// Walk XSD text for its tables.
    pub fn tables(&self, xsd: &str) -> Result<Vec<TableDescriptor>, ImportError> {
        XsdImporter::new(&self.mapping).parse(xsd)
    }

    /// Render tables in the configured format.
    pub fn render(
        &self,
        tables: &[TableDescriptor],
        prefix: &str,
    ) -> Result<String, ExportError> {
        let result = match self.options.format {
            OutputFormat::Sql => self.sql_exporter().export(tables, prefix),
            OutputFormat::Json => JSONExporter.export(tables, prefix)?,
        };
        Ok(result.content)
    }

    fn sql_exporter(&self) -> SQLExporter {
        SQLExporter::new().with_trailing_comma(self.options.trailing_comma)
    }

    /// Convert XSD text to script text.
    pub fn convert_str(&self, xsd: &str, prefix: &str) -> Result<String, ConvertError> {
        let tables = self.tables(xsd)?;
        Ok(self.render(&tables, prefix)?)
    }

    /// Convert the XSD at `input` and write the result to `output`,
    /// replacing any existing file.
    ///
    /// The input is fully loaded and walked before `output` is created, so
    /// a bad input leaves an existing destination untouched.
    pub fn convert_file(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<ConversionSummary, ConvertError> {
        let prefix = self.prefix_for(input);
        let load_error = |source| ConvertError::Load {
            path: input.to_path_buf(),
            source,
        };

        let document = SchemaDocument::load(input).map_err(load_error)?;
        let tables: Vec<TableDescriptor> =
            XsdImporter::new(&self.mapping).tables(&document).collect();

        let write_error = |source: ExportError| ConvertError::Write {
            path: output.to_path_buf(),
            source,
        };
        let file = File::create(output).map_err(|e| write_error(e.into()))?;
        let mut writer = BufWriter::new(file);
        match self.options.format {
            OutputFormat::Sql => self
                .sql_exporter()
                .write_to(&tables, &prefix, &mut writer)
                .map_err(write_error)?,
            OutputFormat::Json => {
                let result = JSONExporter.export(&tables, &prefix)?;
                writer
                    .write_all(result.content.as_bytes())
                    .map_err(|e| write_error(e.into()))?;
            }
        }
        writer.flush().map_err(|e| write_error(e.into()))?;

        let summary = ConversionSummary {
            output: output.to_path_buf(),
            prefix,
            tables: tables.len(),
            columns: tables.iter().map(|t| t.columns.len()).sum(),
        };

        info!(
            input = %input.display(),
            output = %output.display(),
            tables = summary.tables,
            columns = summary.columns,
            "Converted schema"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = ConvertOptions::builder()
            .table_prefix("Orders")
            .trailing_comma(false)
            .format(OutputFormat::Json)
            .build();
        assert_eq!(options.table_prefix.as_deref(), Some("Orders"));
        assert!(!options.trailing_comma);
        assert_eq!(options.format, OutputFormat::Json);

        let defaults = ConvertOptions::new();
        assert!(defaults.trailing_comma);
        assert_eq!(defaults.format, OutputFormat::Sql);
        assert!(defaults.table_prefix.is_none());
    }

    #[test]
    fn test_prefix_from_file_stem() {
        let converter = Converter::new(ConvertOptions::default());
        assert_eq!(converter.prefix_for(Path::new("/data/Orders.xsd")), "Orders");
        assert_eq!(converter.prefix_for(Path::new("Orders.v2.xsd")), "Orders.v2");
        assert_eq!(converter.prefix_for(Path::new("Orders")), "Orders");
        assert_eq!(converter.prefix_for(Path::new("/data/.xsd")), "");
        assert_eq!(converter.prefix_for(Path::new("Orders.")), "Orders");
    }

    #[test]
    fn test_accessors() {
        let options = ConvertOptions::builder().format(OutputFormat::Json).build();
        let converter = Converter::new(options.clone())
            .with_mapping(TypeMapping::from_pairs([("xs:int", "INTEGER")]));

        assert_eq!(converter.options(), &options);
        assert_eq!(converter.mapping().resolve("xs:int"), Some("INTEGER"));
        assert_eq!(converter.mapping().len(), 1);
        assert_eq!(Converter::default().mapping(), TypeMapping::builtin());
    }

    #[test]
    fn test_convert_str_matches_tables_then_render() {
        let xsd = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
              <xs:element name="DS" IsDataSet="true"><xs:complexType><xs:choice>
                <xs:element name="T"><xs:complexType><xs:sequence>
                  <xs:element name="Id" type="xs:int"/>
                </xs:sequence></xs:complexType></xs:element>
              </xs:choice></xs:complexType></xs:element>
            </xs:schema>"#;
        let converter = Converter::default();

        let tables = converter.tables(xsd).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(
            converter.convert_str(xsd, "S").unwrap(),
            converter.render(&tables, "S").unwrap()
        );
    }

    #[test]
    fn test_prefix_override() {
        let converter = Converter::new(ConvertOptions::builder().table_prefix("dbo_X").build());
        assert_eq!(converter.prefix_for(Path::new("Orders.xsd")), "dbo_X");
    }

    #[test]
    fn test_convert_str_rejects_malformed_xml() {
        let converter = Converter::default();
        let err = converter.convert_str("<xs:schema>", "S").unwrap_err();
        assert!(matches!(err, ConvertError::Import(_)));
    }
}
