//! Template Validator
//!
//! Single pre-order walk over a parsed document that checks every element against the type
//! catalog and every `{Bind ...}` value against the binding grammar. Never stops early: all
//! diagnostics for the document are collected, in document order.

use crate::diagnostics::{messages, Diagnostic, DiagnosticCode};
use crate::expression_parser::{BindingMode, Parser as BindingParser};
use crate::ml_parser::ast::{is_binding_value, visit_all, AttributeKind, Document, Element, Visitor};
use crate::schema::{ControlDescriptor, TypeCatalog};
use std::collections::HashSet;

/// Validate `document`, returning diagnostics in document pre-order.
pub fn validate(document: &Document, catalog: &TypeCatalog) -> Vec<Diagnostic> {
    let mut validator = TemplateValidator::new(catalog, &document.source_file_path);
    visit_all(&mut validator, &document.root);
    validator.into_diagnostics()
}

pub struct TemplateValidator<'a> {
    catalog: &'a TypeCatalog,
    file_path: &'a str,
    binding_parser: BindingParser,
    seen_names: HashSet<String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> TemplateValidator<'a> {
    pub fn new(catalog: &'a TypeCatalog, file_path: &'a str) -> Self {
        TemplateValidator {
            catalog,
            file_path,
            binding_parser: BindingParser::new(),
            seen_names: HashSet::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn report(&mut self, element: &Element, code: DiagnosticCode, message: String) {
        self.diagnostics.push(
            Diagnostic::new(code, self.file_path, message)
                .at(element.source_line, element.source_column),
        );
    }

    fn check_structure(&mut self, element: &Element, control: &ControlDescriptor) {
        if control.is_container {
            return;
        }
        if element.index == 0 {
            self.report(
                element,
                DiagnosticCode::RootNotContainer,
                messages::root_not_container(&element.type_name),
            );
        } else if !element.children.is_empty() {
            self.report(
                element,
                DiagnosticCode::ChildOfNonContainer,
                messages::child_of_non_container(&element.type_name),
            );
        }
    }

    fn check_name(&mut self, element: &Element) {
        let Some(name) = element.explicit_name() else {
            return;
        };
        if !self.seen_names.insert(name.to_string()) {
            self.report(element, DiagnosticCode::DuplicateName, messages::duplicate_name(name));
        }
    }

    /// `known_type` is false for the stand-in used after an unknown control type; type-specific
    /// lookups are skipped for it so one unknown type yields one diagnostic.
    fn check_property(&mut self, element: &Element, known_type: bool, property: &str, value: &str) {
        if !is_binding_value(value) {
            return;
        }
        let Some(binding) = self.binding_parser.parse_binding(value, None) else {
            self.report(
                element,
                DiagnosticCode::InvalidBindingExpression,
                messages::invalid_binding_expression(value.trim()),
            );
            return;
        };
        if known_type
            && binding.mode == BindingMode::TwoWay
            && self.catalog.resolve_two_way(&element.type_name, property).is_none()
        {
            self.report(
                element,
                DiagnosticCode::UnsupportedTwoWayBinding,
                messages::unsupported_two_way_binding(&element.type_name, property),
            );
        }
    }

    fn check_event(&mut self, element: &Element, known_type: bool, event: &str, handler: &str) {
        if known_type && self.catalog.resolve_event(&element.type_name, event).is_none() {
            self.report(
                element,
                DiagnosticCode::UnknownEvent,
                messages::unknown_event(&element.type_name, event),
            );
        }
        if handler.trim().is_empty() {
            self.report(element, DiagnosticCode::EmptyEventHandler, messages::empty_event_handler(event));
        }
    }
}

impl Visitor for TemplateValidator<'_> {
    fn visit_element(&mut self, element: &Element) {
        let control = self.catalog.resolve_control(&element.type_name).cloned();
        if control.is_none() {
            let known = self.catalog.control_names();
            let message = messages::unknown_control_type(&element.type_name, &known);
            self.report(element, DiagnosticCode::UnknownControlType, message);
        }

        self.check_name(element);
        if let Some(control) = &control {
            self.check_structure(element, control);
        }

        let known_type = control.is_some();
        for (key, attribute) in &element.attributes {
            match attribute.kind {
                AttributeKind::Property => {
                    self.check_property(element, known_type, key, &attribute.value)
                }
                AttributeKind::Event => self.check_event(element, known_type, key, &attribute.value),
                AttributeKind::Reserved => {}
            }
        }
    }
}
