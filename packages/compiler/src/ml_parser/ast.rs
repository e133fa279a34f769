//! ML Parser AST
//!
//! The element model: a located element tree whose attributes are classified once, at build
//! time, into properties, events and reserved directives.

use crate::parse_util::ParseSourceSpan;
use crate::schema::TypeCatalog;
use indexmap::IndexMap;
use serde::Serialize;

pub const RESERVED_PREFIX: &str = "x:";
pub const XMLNS_PREFIX: &str = "xmlns";
pub const CLASS_ATTR: &str = "x:Class";
pub const DATA_TYPE_ATTR: &str = "x:DataType";
pub const NAME_ATTR: &str = "x:Name";
pub const TYPE_ARGUMENT_ATTR: &str = "x:Type";

const BINDING_OPEN: &str = "{Bind ";
const BINDING_CLOSE: &str = "}";

/// True if the trimmed value has the `{Bind ...}` shape.
pub fn is_binding_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.starts_with(BINDING_OPEN) && trimmed.ends_with(BINDING_CLOSE)
}

/// Values holding both parentheses are treated as code expressions (`Dim.Fill()`).
pub fn looks_like_code_expression(value: &str) -> bool {
    value.contains('(') && value.contains(')')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttributeKind {
    Property,
    Event,
    Reserved,
}

impl AttributeKind {
    pub fn classify(key: &str, value: &str, catalog: &TypeCatalog) -> Self {
        if key.starts_with(RESERVED_PREFIX) || key.starts_with(XMLNS_PREFIX) {
            AttributeKind::Reserved
        } else if catalog.is_known_event_name(key)
            && !is_binding_value(value)
            && !looks_like_code_expression(value)
        {
            AttributeKind::Event
        } else {
            AttributeKind::Property
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub value: String,
    pub kind: AttributeKind,
    pub source_span: ParseSourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    /// Pre-order position in the document; the root is 0.
    pub index: usize,
    /// Local name, namespace prefix stripped.
    pub type_name: String,
    /// Sorted by key.
    pub attributes: IndexMap<String, Attribute>,
    pub children: Vec<Element>,
    /// 1-based line of the element name, 0 if unavailable.
    pub source_line: usize,
    /// 1-based column of the element name, 0 if unavailable.
    pub source_column: usize,
    pub source_span: ParseSourceSpan,
}

impl Element {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(|a| a.value.as_str())
    }

    pub fn explicit_name(&self) -> Option<&str> {
        self.attribute(NAME_ATTR)
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn generic_argument(&self) -> Option<&str> {
        self.attribute(TYPE_ARGUMENT_ATTR)
            .map(str::trim)
            .filter(|arg| !arg.is_empty())
    }

    pub fn property_attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes_of(AttributeKind::Property)
    }

    pub fn event_attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes_of(AttributeKind::Event)
    }

    fn attributes_of(&self, kind: AttributeKind) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .filter(move |(_, attr)| attr.kind == kind)
            .map(|(key, attr)| (key.as_str(), attr.value.as_str()))
    }

    /// Pre-order walk over this element and all descendants.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(element) = stack.pop() {
            out.push(element);
            stack.extend(element.children.iter().rev());
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub root: Element,
    pub source_file_path: String,
    /// Fully qualified class name from `x:Class`.
    pub class_name: String,
    /// `x:DataType`: a property name, or a qualified type resolved to one later.
    pub data_context_hint: Option<String>,
}

impl Document {
    pub fn element_count(&self) -> usize {
        self.root.descendants().len()
    }
}

/// Pre-order element visitor
pub trait Visitor {
    fn visit_element(&mut self, element: &Element);
}

pub fn visit_all(visitor: &mut dyn Visitor, root: &Element) {
    for element in root.descendants() {
        visitor.visit_element(element);
    }
}
