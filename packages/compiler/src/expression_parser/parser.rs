//! Binding expression parser
//!
//! Grammar: `"{Bind" WS PropertyPath ("," WS "Mode=" Mode)? "}"`

use super::ast::{BindingExpression, BindingMode};
use once_cell::sync::Lazy;
use regex::Regex;

const BINDING_OPEN: &str = "{Bind ";
const BINDING_CLOSE: char = '}';

static PROPERTY_PATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("valid property path pattern")
});

#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Parser
    }

    /// Parse `input` and resolve its source expression against `data_context_hint`.
    /// Returns `None` when the text is not a well-formed binding.
    pub fn parse_binding(&self, input: &str, data_context_hint: Option<&str>) -> Option<BindingExpression> {
        let trimmed = input.trim();
        let content = trimmed
            .strip_prefix(BINDING_OPEN)?
            .strip_suffix(BINDING_CLOSE)?
            .trim();

        let mut parts = content.split(',');
        let property_path = parts.next()?.trim();
        if !PROPERTY_PATH_RE.is_match(property_path) {
            return None;
        }

        let mut mode = BindingMode::default();
        for part in parts {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };
            if key.trim().eq_ignore_ascii_case("mode") {
                // Unrecognized modes keep the default.
                if let Some(parsed) = BindingMode::parse(value) {
                    mode = parsed;
                }
            }
        }

        Some(BindingExpression {
            property_path: property_path.to_string(),
            mode,
            source_expression: resolve_source_expression(property_path, data_context_hint),
        })
    }
}

/// Dotted paths are already qualified; bare paths go through the hint, or bind to the view.
pub fn resolve_source_expression(property_path: &str, data_context_hint: Option<&str>) -> String {
    match data_context_hint.filter(|hint| !hint.is_empty()) {
        Some(hint) if !property_path.contains('.') => format!("{}.{}", hint, property_path),
        _ => property_path.to_string(),
    }
}
