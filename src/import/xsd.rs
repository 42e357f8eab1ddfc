//! XSD dataset walker
//!
//! Recognizes the `DataSet` schema shape:
//!
//! ```xml
//! <xs:element name="Sample" msdata:IsDataSet="true">
//!   <xs:complexType>
//!     <xs:choice maxOccurs="unbounded">
//!       <xs:element name="Customer">          <!-- table -->
//!         <xs:complexType>
//!           <xs:sequence>
//!             <xs:element name="Id" type="xs:int"/>   <!-- column -->
//! ```
//!
//! Anything that does not fit is skipped: tables without a name, columns
//! without a name, without a resolvable type, or whose type has no SQL
//! mapping. None of these are errors.

use tracing::{debug, trace};

use super::ImportError;
use super::document::{Element, SchemaDocument};
use crate::models::{ColumnDescriptor, TableDescriptor};
use crate::type_mapping::TypeMapping;

/// XML Schema namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Marker attribute (any namespace) flagging a dataset root
const DATASET_MARKER: &str = "IsDataSet";

/// XSD Importer
///
/// Walks a schema document and yields one [`TableDescriptor`] per named
/// table element, resolving column types through a [`TypeMapping`].
///
/// # Example
///
/// ```rust
/// use xsd_to_sql::import::XsdImporter;
/// use xsd_to_sql::type_mapping::TypeMapping;
///
/// let xsd = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
///   <xs:element name="DS" IsDataSet="true"><xs:complexType><xs:choice>
///     <xs:element name="T"><xs:complexType><xs:sequence>
///       <xs:element name="Id" type="xs:int"/>
///     </xs:sequence></xs:complexType></xs:element>
///   </xs:choice></xs:complexType></xs:element>
/// </xs:schema>"#;
///
/// let tables = XsdImporter::new(TypeMapping::builtin()).parse(xsd).unwrap();
/// assert_eq!(tables[0].name, "T");
/// assert_eq!(tables[0].columns[0].sql_type, "INT");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct XsdImporter<'m> {
    mapping: &'m TypeMapping,
}

impl<'m> XsdImporter<'m> {
    pub fn new(mapping: &'m TypeMapping) -> Self {
        Self { mapping }
    }

    /// Parse XSD text and collect its tables.
    pub fn parse(&self, xsd: &str) -> Result<Vec<TableDescriptor>, ImportError> {
        let document = SchemaDocument::parse(xsd)?;
        Ok(self.tables(&document).collect())
    }

    /// Tables of every dataset in `document`, in document order.
    pub fn tables<'a>(
        &'a self,
        document: &'a SchemaDocument,
    ) -> impl Iterator<Item = TableDescriptor> + 'a {
        dataset_elements(document)
            .flat_map(table_elements)
            .filter_map(move |element| self.table(element))
    }

    /// Build a table from a table element, or `None` if it has no name.
    pub fn table(&self, element: &Element) -> Option<TableDescriptor> {
        let name = match element.attribute("name") {
            Some(name) if !name.is_empty() => name,
            _ => {
                debug!("Skipping table element without a name");
                return None;
            }
        };

        let columns = column_elements(element)
            .filter_map(|column| self.column(column))
            .collect::<Vec<_>>();

        debug!(table = name, columns = columns.len(), "Discovered table");
        Some(TableDescriptor::new(name, columns))
    }

    /// Build a column from a column element, or `None` if it is unnamed,
    /// untyped, or typed with something the mapping does not know.
    pub fn column(&self, element: &Element) -> Option<ColumnDescriptor> {
        let name = element.attribute("name").unwrap_or_default();
        let type_name = resolve_type_name(element).unwrap_or_default();

        if name.is_empty() || type_name.is_empty() {
            trace!(column = name, "Dropping column without name or type");
            return None;
        }

        let Some(sql_type) = self.mapping.resolve(type_name) else {
            debug!(column = name, type_name, "Dropping column with unmapped type");
            return None;
        };

        Some(ColumnDescriptor::new(
            name,
            type_name,
            sql_type,
            is_nullable(element),
        ))
    }
}

/// Every XSD `element` carrying an `IsDataSet` attribute whose value
/// contains `true`, at any depth.
///
/// This is a substring test, so `"True"` does not qualify but `"falsetrue"`
/// does. Only the first `IsDataSet` attribute on an element is tested.
pub fn dataset_elements(document: &SchemaDocument) -> impl Iterator<Item = &Element> {
    document.elements().filter(|element| {
        element.is(XSD_NAMESPACE, "element")
            && element
                .attributes_by_local_name(DATASET_MARKER)
                .next()
                .is_some_and(|attr| attr.value.contains("true"))
    })
}

/// `complexType/choice/element` children of a dataset.
pub fn table_elements(dataset: &Element) -> impl Iterator<Item = &Element> {
    dataset
        .children_named(XSD_NAMESPACE, "complexType")
        .flat_map(|ct| ct.children_named(XSD_NAMESPACE, "choice"))
        .flat_map(|choice| choice.children_named(XSD_NAMESPACE, "element"))
}

/// `complexType/sequence/element` children of a table.
pub fn column_elements(table: &Element) -> impl Iterator<Item = &Element> {
    table
        .children_named(XSD_NAMESPACE, "complexType")
        .flat_map(|ct| ct.children_named(XSD_NAMESPACE, "sequence"))
        .flat_map(|seq| seq.children_named(XSD_NAMESPACE, "element"))
}

/// The column's `type` attribute, else the `base` of its first inline
/// `simpleType/restriction`.
///
/// A present-but-empty `type` is returned as is; it does not fall through
/// to the restriction.
pub fn resolve_type_name(column: &Element) -> Option<&str> {
    if let Some(type_name) = column.attribute("type") {
        return Some(type_name);
    }

    column
        .children_named(XSD_NAMESPACE, "simpleType")
        .flat_map(|st| st.children_named(XSD_NAMESPACE, "restriction"))
        .next()
        .and_then(|restriction| restriction.attribute("base"))
}

/// Only a literal `minOccurs="0"` makes a column nullable.
pub fn is_nullable(column: &Element) -> bool {
    column.attribute("minOccurs") == Some("0")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(xml: &str) -> Element {
        let doc = SchemaDocument::parse(&format!(
            r#"<xs:schema xmlns:xs="{}">{}</xs:schema>"#,
            XSD_NAMESPACE, xml
        ))
        .unwrap();
        doc.root().children[0].clone()
    }

    #[test]
    fn test_resolve_direct_type() {
        let el = column(r#"<xs:element name="a" type="xs:int"/>"#);
        assert_eq!(resolve_type_name(&el), Some("xs:int"));
    }

    #[test]
    fn test_resolve_restriction_base() {
        let el = column(
            r#"<xs:element name="a"><xs:simpleType>
                 <xs:restriction base="xs:string"><xs:maxLength value="10"/></xs:restriction>
               </xs:simpleType></xs:element>"#,
        );
        assert_eq!(resolve_type_name(&el), Some("xs:string"));
    }

    #[test]
    fn test_direct_type_wins_over_restriction() {
        let el = column(
            r#"<xs:element name="a" type="xs:int"><xs:simpleType>
                 <xs:restriction base="xs:string"/>
               </xs:simpleType></xs:element>"#,
        );
        assert_eq!(resolve_type_name(&el), Some("xs:int"));
    }

    #[test]
    fn test_empty_type_does_not_fall_through() {
        let el = column(
            r#"<xs:element name="a" type=""><xs:simpleType>
                 <xs:restriction base="xs:string"/>
               </xs:simpleType></xs:element>"#,
        );
        assert_eq!(resolve_type_name(&el), Some(""));
        assert!(XsdImporter::new(TypeMapping::builtin()).column(&el).is_none());
    }

    #[test]
    fn test_unresolvable_type() {
        let el = column(r#"<xs:element name="a"/>"#);
        assert_eq!(resolve_type_name(&el), None);

        let el = column(r#"<xs:element name="a"><xs:simpleType><xs:restriction/></xs:simpleType></xs:element>"#);
        assert_eq!(resolve_type_name(&el), None);
    }

    #[test]
    fn test_nullability() {
        assert!(is_nullable(&column(r#"<xs:element minOccurs="0"/>"#)));
        assert!(!is_nullable(&column(r#"<xs:element minOccurs="1"/>"#)));
        assert!(!is_nullable(&column(r#"<xs:element minOccurs="00"/>"#)));
        assert!(!is_nullable(&column(r#"<xs:element/>"#)));
    }

    #[test]
    fn test_column_filtering() {
        let importer = XsdImporter::new(TypeMapping::builtin());

        let kept = importer
            .column(&column(r#"<xs:element name="Id" type="xs:int" minOccurs="0"/>"#))
            .unwrap();
        assert_eq!(kept, ColumnDescriptor::new("Id", "xs:int", "INT", true));

        assert!(importer.column(&column(r#"<xs:element type="xs:int"/>"#)).is_none());
        assert!(importer.column(&column(r#"<xs:element name="" type="xs:int"/>"#)).is_none());
        assert!(importer.column(&column(r#"<xs:element name="X" type="xs:anyType"/>"#)).is_none());
        assert!(importer.column(&column(r#"<xs:element name="X" type="tns:Custom"/>"#)).is_none());
    }

    #[test]
    fn test_injected_mapping() {
        let mapping = TypeMapping::from_pairs([("tns:Money", "MONEY")]);
        let importer = XsdImporter::new(&mapping);

        let kept = importer
            .column(&column(r#"<xs:element name="Total" type="tns:Money"/>"#))
            .unwrap();
        assert_eq!(kept.sql_type, "MONEY");
        assert!(importer.column(&column(r#"<xs:element name="Id" type="xs:int"/>"#)).is_none());
    }

    #[test]
    fn test_dataset_marker_is_substring_match() {
        let doc = SchemaDocument::parse(&format!(
            r#"<xs:schema xmlns:xs="{ns}" xmlns:msdata="urn:schemas-microsoft-com:xml-msdata">
                 <xs:element name="a" msdata:IsDataSet="true"/>
                 <xs:element name="b" IsDataSet="falsetrue"/>
                 <xs:element name="c" IsDataSet="false"/>
                 <xs:element name="d" IsDataSet="True"/>
                 <xs:element name="e"/>
                 <xs:complexType name="f" IsDataSet="true"/>
               </xs:schema>"#,
            ns = XSD_NAMESPACE
        ))
        .unwrap();

        let names: Vec<&str> = dataset_elements(&doc)
            .filter_map(|e| e.attribute("name"))
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_only_first_dataset_marker_counts() {
        let doc = SchemaDocument::parse(&format!(
            r#"<xs:schema xmlns:xs="{ns}" xmlns:a="urn:a" xmlns:b="urn:b">
                 <xs:element name="skipped" IsDataSet="false" a:IsDataSet="true"/>
                 <xs:element name="kept" a:IsDataSet="true" b:IsDataSet="false"/>
               </xs:schema>"#,
            ns = XSD_NAMESPACE
        ))
        .unwrap();

        let names: Vec<&str> = dataset_elements(&doc)
            .filter_map(|e| e.attribute("name"))
            .collect();
        assert_eq!(names, vec!["kept"]);
    }

    #[test]
    fn test_elements_outside_xsd_namespace_are_ignored() {
        let doc = SchemaDocument::parse(
            r#"<schema><element name="DS" IsDataSet="true"/></schema>"#,
        )
        .unwrap();
        assert_eq!(dataset_elements(&doc).count(), 0);
    }
}
