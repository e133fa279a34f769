//! XML Parser
//!
//! Document-level entry point: markup text to a [`Document`], or the single diagnostic that
//! stopped parsing.

use super::ast::{Document, CLASS_ATTR, DATA_TYPE_ATTR};
use super::parser::Parser;
use crate::diagnostics::{messages, Diagnostic, DiagnosticCode};
use crate::schema::TypeCatalog;

pub struct XmlParser<'c> {
    parser: Parser<'c>,
}

impl<'c> XmlParser<'c> {
    pub fn new(catalog: &'c TypeCatalog) -> Self {
        XmlParser {
            parser: Parser::new(catalog),
        }
    }

    pub fn parse(&self, source: &str, file_path: &str) -> Result<Document, Diagnostic> {
        if source.trim().is_empty() {
            return Err(Diagnostic::new(
                DiagnosticCode::EmptyDocument,
                file_path,
                messages::empty_document(),
            ));
        }

        let result = self.parser.parse(source);
        if let Some(error) = result.errors.first() {
            return Err(Diagnostic::new(
                DiagnosticCode::MalformedMarkup,
                file_path,
                messages::malformed_markup(&error.msg),
            )
            .at(error.span.start.display_line(), error.span.start.display_col()));
        }

        let Some(root) = result.root else {
            return Err(Diagnostic::new(
                DiagnosticCode::ParseError,
                file_path,
                messages::parse_error("no element tree was produced"),
            ));
        };

        let class_name = root
            .attribute(CLASS_ATTR)
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        if class_name.is_empty() {
            return Err(Diagnostic::new(
                DiagnosticCode::MissingClassName,
                file_path,
                messages::missing_class_name(),
            )
            .at(root.source_line, root.source_column));
        }

        let data_context_hint = root
            .attribute(DATA_TYPE_ATTR)
            .map(str::trim)
            .filter(|hint| !hint.is_empty())
            .map(str::to_string);

        Ok(Document {
            root,
            source_file_path: file_path.to_string(),
            class_name,
            data_context_hint,
        })
    }
}
