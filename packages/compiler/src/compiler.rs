//! Compiler Main Module
//!
//! The per-document pipeline: parse, validate, emit. Documents are independent, so
//! [`compile_batch`] runs them in parallel.

use crate::config::CompilerOptions;
use crate::diagnostics::{has_blocking, messages, promote_warnings, Diagnostic, DiagnosticCode};
use crate::error::CompileError;
use crate::ml_parser::XmlParser;
use crate::output::CodeEmitter;
use crate::schema::TypeCatalog;
use crate::template_parser::validate;
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, debug_span};

/// Answers "which property of this class has that type", used to turn a qualified
/// `x:DataType` into a member name.
pub trait TypeResolver: Sync {
    fn resolve_property_of_type(&self, class_name: &str, type_name: &str) -> Option<String>;
}

/// Resolves nothing; dotted data-context hints are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTypeResolver;

impl TypeResolver for NoTypeResolver {
    fn resolve_property_of_type(&self, _class_name: &str, _type_name: &str) -> Option<String> {
        None
    }
}

/// Class name → (property name → property type), searched in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MapTypeResolver {
    classes: IndexMap<String, IndexMap<String, String>>,
}

impl MapTypeResolver {
    pub fn new(classes: IndexMap<String, IndexMap<String, String>>) -> Self {
        MapTypeResolver { classes }
    }

    pub fn insert(&mut self, class_name: &str, property: &str, property_type: &str) {
        self.classes
            .entry(class_name.to_string())
            .or_default()
            .insert(property.to_string(), property_type.to_string());
    }
}

impl TypeResolver for MapTypeResolver {
    fn resolve_property_of_type(&self, class_name: &str, type_name: &str) -> Option<String> {
        self.classes
            .get(class_name)?
            .iter()
            .find(|(_, property_type)| property_type.as_str() == type_name)
            .map(|(property, _)| property.clone())
    }
}

/// A bare hint is already a member name; a dotted one is a type looked up on `class_name`.
pub fn resolve_data_context(
    hint: Option<&str>,
    class_name: &str,
    resolver: &dyn TypeResolver,
) -> Option<String> {
    let hint = hint.map(str::trim).filter(|h| !h.is_empty())?;
    if hint.contains('.') {
        resolver.resolve_property_of_type(class_name, hint)
    } else {
        Some(hint.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileOutput {
    /// Generated C#, absent when parsing or validation blocked emission.
    pub generated: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileOutput {
    fn failed(diagnostics: Vec<Diagnostic>) -> Self {
        CompileOutput {
            generated: None,
            diagnostics,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Run the full pipeline over one document.
pub fn compile_document(
    source: &str,
    file_path: &str,
    catalog: &TypeCatalog,
    resolver: &dyn TypeResolver,
    options: &CompilerOptions,
) -> CompileOutput {
    let span = debug_span!("compile_document", path = file_path);
    let _guard = span.enter();

    let document = match XmlParser::new(catalog).parse(source, file_path) {
        Ok(document) => document,
        Err(diagnostic) => {
            debug!(code = %diagnostic.code, "parsing failed");
            return CompileOutput::failed(vec![diagnostic]);
        }
    };
    debug!(elements = document.element_count(), "parsed");

    let mut diagnostics = validate(&document, catalog);
    debug!(diagnostics = diagnostics.len(), "validated");
    if options.treat_warnings_as_errors {
        promote_warnings(&mut diagnostics);
    }
    if has_blocking(&diagnostics, options.treat_warnings_as_errors) {
        return CompileOutput::failed(diagnostics);
    }

    let data_context = resolve_data_context(
        document.data_context_hint.as_deref(),
        &document.class_name,
        resolver,
    );
    match CodeEmitter::new(catalog, options).emit(&document, data_context.as_deref()) {
        Ok(output) => {
            debug!(bytes = output.source.len(), "emitted");
            diagnostics.extend(output.diagnostics);
            CompileOutput {
                generated: Some(output.source),
                diagnostics,
            }
        }
        Err(error) => {
            diagnostics.push(internal_fault(file_path, &error));
            CompileOutput::failed(diagnostics)
        }
    }
}

fn internal_fault(file_path: &str, error: &CompileError) -> Diagnostic {
    Diagnostic::new(
        DiagnosticCode::ParseError,
        file_path,
        messages::parse_error(&error.to_string()),
    )
}

/// One input document: its path and markup text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub path: String,
    pub source: String,
}

/// Compile many documents in parallel. Results come back in input order.
pub fn compile_batch(
    documents: &[SourceDocument],
    catalog: &TypeCatalog,
    resolver: &dyn TypeResolver,
    options: &CompilerOptions,
) -> Vec<CompileOutput> {
    documents
        .par_iter()
        .map(|document| {
            compile_document(&document.source, &document.path, catalog, resolver, options)
        })
        .collect()
}
