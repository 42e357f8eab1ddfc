//! XSD primitive type to SQL Server column type lookup.
//!
//! Keys are namespace-qualified type references exactly as they appear in
//! `type` / `base` attributes (`xs:int`, not `int`). Lookup is exact and
//! case-sensitive; an unknown key yields `None`, which callers treat as
//! "drop this column".

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Built-in entries, in XSD datatype-hierarchy order.
pub const BUILTIN_MAPPINGS: &[(&str, &str)] = &[
    ("xs:string", "NVARCHAR(MAX)"),
    ("xs:normalizedString", "NVARCHAR(MAX)"),
    ("xs:token", "NVARCHAR(MAX)"),
    ("xs:base64Binary", "VARBINARY(MAX)"),
    ("xs:hexBinary", "VARBINARY(MAX)"),
    ("xs:integer", "BIGINT"),
    ("xs:positiveInteger", "BIGINT"),
    ("xs:negativeInteger", "BIGINT"),
    ("xs:nonNegativeInteger", "BIGINT"),
    ("xs:nonPositiveInteger", "BIGINT"),
    ("xs:long", "BIGINT"),
    ("xs:int", "INT"),
    ("xs:short", "SMALLINT"),
    ("xs:byte", "TINYINT"),
    ("xs:unsignedLong", "DECIMAL(20, 0)"),
    ("xs:unsignedInt", "BIGINT"),
    ("xs:unsignedShort", "INT"),
    ("xs:unsignedByte", "SMALLINT"),
    ("xs:decimal", "DECIMAL(18, 2)"),
    ("xs:float", "REAL"),
    ("xs:double", "FLOAT"),
    ("xs:boolean", "BIT"),
    ("xs:dateTime", "DATETIME"),
    ("xs:date", "DATE"),
    ("xs:time", "TIME"),
    // ISO 8601 duration text, e.g. P1Y2M3DT4H
    ("xs:duration", "NVARCHAR(50)"),
    ("xs:gYearMonth", "NVARCHAR(7)"),
    ("xs:gYear", "SMALLINT"),
    ("xs:gMonthDay", "NVARCHAR(5)"),
    ("xs:gDay", "NVARCHAR(5)"),
    ("xs:gMonth", "NVARCHAR(5)"),
    ("xs:anyURI", "NVARCHAR(MAX)"),
    ("xs:QName", "NVARCHAR(255)"),
    ("xs:NOTATION", "NVARCHAR(255)"),
    ("xs:ID", "NVARCHAR(255)"),
    ("xs:IDREF", "NVARCHAR(255)"),
    // space-separated lists
    ("xs:IDREFS", "NVARCHAR(MAX)"),
    ("xs:ENTITY", "NVARCHAR(255)"),
    ("xs:ENTITIES", "NVARCHAR(MAX)"),
    ("xs:NMTOKEN", "NVARCHAR(255)"),
    // msdata GUID columns
    ("xs:guid", "UNIQUEIDENTIFIER"),
];

static BUILTIN: Lazy<TypeMapping> =
    Lazy::new(|| TypeMapping::from_pairs(BUILTIN_MAPPINGS.iter().copied()));

/// Immutable schema-type to SQL-type table.
///
/// Converters hold one of these rather than reaching for a global, so a
/// test can hand in its own table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    entries: HashMap<String, String>,
}

impl TypeMapping {
    /// Shared instance of the built-in table
    pub fn builtin() -> &'static TypeMapping {
        &BUILTIN
    }

    /// Build a table from `(schema type, sql type)` pairs; later pairs win.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Translate a schema type reference to its SQL literal.
    pub fn resolve(&self, schema_type: &str) -> Option<&str> {
        self.entries.get(schema_type).map(String::as_str)
    }

    pub fn contains(&self, schema_type: &str) -> bool {
        self.entries.contains_key(schema_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypeMapping {
    fn default() -> Self {
        BUILTIN.clone()
    }
}
