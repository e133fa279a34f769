//! Literal conversion
//!
//! Attribute text to a C# expression, typed by the property's [`SemanticType`].

use crate::ml_parser::ast::looks_like_code_expression;
use crate::schema::SemanticType;

/// Result of converting one attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Converted(String),
    /// The value did not parse as the declared type and is emitted as written.
    Verbatim { code: String, expected: &'static str },
}

impl Literal {
    pub fn code(&self) -> &str {
        match self {
            Literal::Converted(code) => code,
            Literal::Verbatim { code, .. } => code,
        }
    }
}

pub fn convert_literal(value: &str, semantic_type: Option<&SemanticType>) -> Literal {
    if looks_like_code_expression(value) {
        return Literal::Converted(value.to_string());
    }

    match semantic_type {
        Some(SemanticType::Bool) => Literal::Converted(bool_literal(value)),
        Some(SemanticType::Int) => match value.trim().parse::<i32>() {
            Ok(_) => Literal::Converted(value.trim().to_string()),
            Err(_) => Literal::Verbatim {
                code: value.to_string(),
                expected: "an integer",
            },
        },
        Some(SemanticType::Float) => match float_literal(value.trim()) {
            Some(code) => Literal::Converted(code),
            None => Literal::Verbatim {
                code: value.to_string(),
                expected: "a decimal number",
            },
        },
        Some(SemanticType::Layout) => Literal::Converted(value.to_string()),
        Some(SemanticType::Array) => Literal::Converted(array_literal(value)),
        Some(SemanticType::QualifiedType(full_type)) => match qualified_literal(value.trim(), full_type) {
            Some(code) => Literal::Converted(code),
            None => Literal::Verbatim {
                code: value.to_string(),
                expected: "a member name",
            },
        },
        Some(SemanticType::String) | Some(SemanticType::Command) | None => {
            Literal::Converted(string_literal(value))
        }
    }
}

fn bool_literal(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        "true".to_string()
    } else if trimmed.eq_ignore_ascii_case("false") {
        "false".to_string()
    } else {
        value.to_string()
    }
}

fn float_literal(value: &str) -> Option<String> {
    let parsed = value.parse::<f32>().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    if let Some(whole) = value.strip_suffix('.') {
        Some(format!("{}.0f", whole))
    } else if value.contains(['.', 'e', 'E']) {
        Some(format!("{}f", value))
    } else {
        Some(format!("{}.0f", value))
    }
}

/// `F1` and `Key.F1` both become `Full.Namespace.Key.F1` for a `Full.Namespace.Key` property.
/// `None` when there is no member to name.
fn qualified_literal(value: &str, full_type: &str) -> Option<String> {
    let short_name = full_type.rsplit('.').next().unwrap_or(full_type);
    let member = match value.split_once('.') {
        Some((head, rest)) if head == short_name => rest,
        _ => value,
    };
    if member.is_empty() || member.starts_with('.') || member.ends_with('.') {
        return None;
    }
    Some(format!("{}.{}", full_type, member))
}

fn array_literal(value: &str) -> String {
    let items: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(string_literal)
        .collect();
    if items.is_empty() {
        "System.Array.Empty<string>()".to_string()
    } else {
        format!("new[] {{ {} }}", items.join(", "))
    }
}

pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
