//! Owned, read-only XML element tree built from quick-xml events.
//!
//! Element names carry their resolved namespace URI. Text, comments and
//! processing instructions are discarded.

use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use quick_xml::encoding::{Decoder, detect_encoding};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::{NsReader, Reader};

use super::ImportError;

/// An attribute as written on an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified name as written, e.g. `msdata:IsDataSet`
    pub name: String,
    /// Name without prefix, e.g. `IsDataSet`
    pub local_name: String,
    /// Unescaped value
    pub value: String,
}

/// An element with its resolved namespace and child elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Namespace URI the element's prefix resolves to, if any
    pub namespace: Option<String>,
    pub local_name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Element>,
}

impl Element {
    /// Value of the attribute with exactly this qualified name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Attributes whose local name matches, in any namespace.
    pub fn attributes_by_local_name<'a>(
        &'a self,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a Attribute> + 'a {
        self.attributes
            .iter()
            .filter(move |a| a.local_name == local_name)
    }

    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local_name == local_name
    }

    /// Direct children with the given namespace and local name.
    pub fn children_named<'a>(
        &'a self,
        namespace: &'a str,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter(move |c| c.is(namespace, local_name))
    }

    /// This element and all of its descendants, in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    fn from_start(
        namespace: ResolveResult<'_>,
        start: &BytesStart<'_>,
        decoder: Decoder,
    ) -> Result<Self, ImportError> {
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| ImportError::ParseError(e.to_string()))?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let value = attr
                .decode_and_unescape_value(decoder)
                .map_err(|e| ImportError::ParseError(e.to_string()))?;
            attributes.push(Attribute {
                name: String::from_utf8_lossy(attr.key.as_ref()).to_string(),
                local_name: String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string(),
                value: value.into_owned(),
            });
        }

        let namespace = match namespace {
            ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).to_string()),
            ResolveResult::Unbound | ResolveResult::Unknown(_) => None,
        };

        Ok(Self {
            namespace,
            local_name: String::from_utf8_lossy(start.local_name().as_ref()).to_string(),
            attributes,
            children: Vec::new(),
        })
    }
}

/// Pre-order iterator over an element subtree
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

/// A fully parsed XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDocument {
    root: Element,
}

impl SchemaDocument {
    /// Parse a document from a string.
    ///
    /// Fails on anything quick-xml rejects (mismatched end tags, bad
    /// attribute syntax, unknown entities), on unclosed elements, and on
    /// input without a root element.
    pub fn parse(xml: &str) -> Result<Self, ImportError> {
        let mut reader = NsReader::from_str(xml);
        reader.config_mut().trim_text(true);
        let decoder = reader.decoder();

        let mut open: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let (element, is_empty) = match reader.read_resolved_event() {
                Ok((ns, Event::Start(e))) => (Element::from_start(ns, &e, decoder)?, false),
                Ok((ns, Event::Empty(e))) => (Element::from_start(ns, &e, decoder)?, true),
                Ok((_, Event::End(_))) => {
                    let closed = open.pop().ok_or_else(|| {
                        ImportError::MalformedDocument("unexpected closing tag".to_string())
                    })?;
                    attach(&mut open, &mut root, closed)?;
                    continue;
                }
                Ok((_, Event::Eof)) => break,
                Ok(_) => continue,
                Err(e) => {
                    return Err(ImportError::ParseError(format!(
                        "XML parsing error at position {}: {}",
                        reader.error_position(),
                        e
                    )));
                }
            };

            if is_empty {
                attach(&mut open, &mut root, element)?;
            } else {
                open.push(element);
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(ImportError::MalformedDocument(format!(
                "element '{}' is never closed",
                unclosed.local_name
            )));
        }

        root.map(|root| Self { root })
            .ok_or_else(|| ImportError::MalformedDocument("missing root element".to_string()))
    }

    /// Read and parse a document from disk, decoding it per its BOM or
    /// XML declaration.
    pub fn load(path: &Path) -> Result<Self, ImportError> {
        let bytes = std::fs::read(path)?;
        Self::parse(&decode(&bytes)?)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Every element in the document, in document order.
    pub fn elements(&self) -> Descendants<'_> {
        self.root.descendants()
    }
}

/// Decode raw document bytes to text.
///
/// A BOM (or the UTF-16 byte pattern of `<?`) decides first; otherwise the
/// `encoding` of the XML declaration, if it names an ASCII-compatible
/// encoding; otherwise UTF-8.
pub fn decode(bytes: &[u8]) -> Result<String, ImportError> {
    let (detected, bom_len) = detect_encoding(bytes).unwrap_or((UTF_8, 0));
    let body = &bytes[bom_len..];

    let encoding = if detected == UTF_8 && bom_len == 0 {
        declared_encoding(body).unwrap_or(UTF_8)
    } else {
        detected
    };

    let (text, had_errors) = encoding.decode_without_bom_handling(body);
    if had_errors {
        return Err(ImportError::ParseError(format!(
            "document is not valid {}",
            encoding.name()
        )));
    }
    Ok(text.into_owned())
}

/// Encoding named by the leading XML declaration.
///
/// UTF-16 labels map to UTF-8 here: bytes that reached this point are not
/// UTF-16.
fn declared_encoding(body: &[u8]) -> Option<&'static Encoding> {
    let mut reader = Reader::from_reader(body);
    match reader.read_event() {
        Ok(Event::Decl(decl)) => decl.encoder().map(Encoding::output_encoding),
        _ => None,
    }
}

fn attach(
    open: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), ImportError> {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(ImportError::MalformedDocument(format!(
                "multiple root elements (second is '{}')",
                element.local_name
            )));
        }
    }
    Ok(())
}
