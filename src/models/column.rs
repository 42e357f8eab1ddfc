//! Column descriptor

use serde::{Deserialize, Serialize};

/// A column discovered in a table's `complexType/sequence`.
///
/// `type_name` is the schema type reference as written in the XSD
/// (e.g. `xs:int`); `sql_type` is its translation through the
/// [`TypeMapping`](crate::type_mapping::TypeMapping). Columns only exist
/// once both are known, so neither is optional.
///
/// # Example
///
/// ```rust
/// use xsd_to_sql::models::ColumnDescriptor;
///
/// let column = ColumnDescriptor::new("Id", "xs:int", "INT", false);
/// assert_eq!(column.null_clause(), "NOT NULL");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Column name (the element's `name` attribute)
    pub name: String,
    /// Schema type reference, from `type` or an inline restriction `base`
    pub type_name: String,
    /// Target SQL column type
    pub sql_type: String,
    /// True iff the element declares `minOccurs="0"`
    pub nullable: bool,
}

impl ColumnDescriptor {
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        sql_type: impl Into<String>,
        nullable: bool,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            sql_type: sql_type.into(),
            nullable,
        }
    }

    /// SQL nullability keyword for this column
    pub fn null_clause(&self) -> &'static str {
        if self.nullable { "NULL" } else { "NOT NULL" }
    }
}
