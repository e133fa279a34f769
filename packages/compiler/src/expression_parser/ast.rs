//! Binding expression AST

use serde::Serialize;
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BindingMode {
    #[default]
    OneWay,
    TwoWay,
}

impl BindingMode {
    /// Case-insensitive mode name.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("OneWay") {
            Some(BindingMode::OneWay)
        } else if value.eq_ignore_ascii_case("TwoWay") {
            Some(BindingMode::TwoWay)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingExpression {
    pub property_path: String,
    pub mode: BindingMode,
    /// The path as seen from the generated view, after applying the data-context hint.
    pub source_expression: String,
}

impl BindingExpression {
    /// Text after the last dot of the source expression: the name change notifications carry.
    pub fn source_member(&self) -> &str {
        self.source_expression
            .rsplit_once('.')
            .map(|(_, member)| member)
            .unwrap_or(&self.source_expression)
    }

    /// First segment of the property path.
    pub fn root_segment(&self) -> &str {
        self.property_path
            .split_once('.')
            .map(|(root, _)| root)
            .unwrap_or(&self.property_path)
    }

    pub fn is_qualified(&self) -> bool {
        self.property_path.contains('.')
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundProperty {
    pub property_name: String,
    pub binding: BindingExpression,
    pub is_command: bool,
}

/// One per element that carries at least one binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundControl {
    pub element_index: usize,
    pub element_type_name: String,
    pub field_id: String,
    pub bound_properties: SmallVec<[BoundProperty; 2]>,
}
