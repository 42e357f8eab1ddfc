//! Table descriptor

use serde::{Deserialize, Serialize};

use super::ColumnDescriptor;

/// A table discovered in a dataset's `complexType/choice`.
///
/// `name` is the element name as written in the schema; the exporters
/// prepend the source prefix when rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableDescriptor {
    /// Table element name
    pub name: String,
    /// Columns in document order
    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Output table name: `{prefix}_{name}`
    pub fn qualified_name(&self, prefix: &str) -> String {
        format!("{}_{}", prefix, self.name)
    }
}
