//! Field map
//!
//! Element → generated identifier, computed once per emission and indexed by the element's
//! pre-order position. Every later phase reads identifiers and output types from here.

use crate::diagnostics::{messages, Diagnostic, DiagnosticCode};
use crate::error::{CompileError, Result};
use crate::ml_parser::ast::{Document, Element};
use crate::schema::TypeCatalog;
use std::collections::{HashMap, HashSet};

/// Placeholder output type for controls missing from the catalog.
pub const UNKNOWN_OUTPUT_TYPE: &str = "object";
/// How the generated class refers to itself.
pub const SELF_REFERENCE: &str = "this";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSlot {
    pub element_index: usize,
    /// Name used in generated statements.
    pub reference: String,
    /// Declared field name, `None` for an unnamed root.
    pub field_name: Option<String>,
    pub output_type: String,
}

#[derive(Debug, Default)]
pub struct FieldMap {
    slots: Vec<Option<FieldSlot>>,
}

impl FieldMap {
    /// Assign identifiers in document order. Unknown control types are reported once per
    /// element into `diagnostics`.
    pub fn build(
        document: &Document,
        catalog: &TypeCatalog,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Self {
        let elements = document.root.descendants();
        let explicit: HashSet<&str> = elements.iter().filter_map(|e| e.explicit_name()).collect();
        let mut counters: HashMap<&str, usize> = HashMap::new();
        let mut synthesized: HashSet<String> = HashSet::new();
        let mut map = FieldMap::default();

        for element in elements {
            let output_type = resolve_output_type(element, catalog, &document.source_file_path, diagnostics);
            let is_root = element.index == document.root.index;

            let field_name = match element.explicit_name() {
                Some(name) => Some(name.to_string()),
                None if is_root => None,
                None => {
                    let counter = counters.entry(element.type_name.as_str()).or_insert(0);
                    let name = loop {
                        *counter += 1;
                        let candidate = format!("__{}_{}", element.type_name, counter);
                        if !explicit.contains(candidate.as_str()) && !synthesized.contains(&candidate) {
                            break candidate;
                        }
                    };
                    synthesized.insert(name.clone());
                    Some(name)
                }
            };

            let reference = field_name
                .clone()
                .unwrap_or_else(|| SELF_REFERENCE.to_string());
            map.insert(FieldSlot {
                element_index: element.index,
                reference,
                field_name,
                output_type,
            });
        }
        map
    }

    fn insert(&mut self, slot: FieldSlot) {
        let index = slot.element_index;
        if self.slots.len() <= index {
            self.slots.resize(index + 1, None);
        }
        self.slots[index] = Some(slot);
    }

    pub fn slot(&self, element_index: usize) -> Result<&FieldSlot> {
        self.slots
            .get(element_index)
            .and_then(Option::as_ref)
            .ok_or(CompileError::MissingIdentifier(element_index))
    }

    pub fn reference(&self, element_index: usize) -> Result<&str> {
        self.slot(element_index).map(|slot| slot.reference.as_str())
    }

    pub fn output_type(&self, element_index: usize) -> Result<&str> {
        self.slot(element_index).map(|slot| slot.output_type.as_str())
    }

    /// Declared fields in document order.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.slots.iter().flatten().filter_map(|slot| {
            slot.field_name
                .as_deref()
                .map(|name| (slot.output_type.as_str(), name))
        })
    }
}

fn resolve_output_type(
    element: &Element,
    catalog: &TypeCatalog,
    file_path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> String {
    match catalog.output_type_with_generic(&element.type_name, element.generic_argument()) {
        Some(output_type) => output_type,
        None => {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticCode::UnknownControlTypeInGeneration,
                    file_path,
                    messages::unknown_control_type_in_generation(&element.type_name),
                )
                .at(element.source_line, element.source_column),
            );
            UNKNOWN_OUTPUT_TYPE.to_string()
        }
    }
}
