//! Diagnostics
//!
//! Every problem the compiler reports about a document is a [`Diagnostic`]. Codes carry a
//! stable `TUIxxx` id, a kebab-case name and a default severity.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    EmptyDocument,
    MalformedMarkup,
    MissingClassName,
    UnknownControlType,
    InvalidBindingExpression,
    UnsupportedTwoWayBinding,
    UnknownEvent,
    EmptyEventHandler,
    ParseError,
    DuplicateName,
    InvalidPropertyValue,
    ObsoleteEventUsed,
    UnknownControlTypeInGeneration,
    RootNotContainer,
    ChildOfNonContainer,
}

impl DiagnosticCode {
    pub fn id(self) -> &'static str {
        match self {
            DiagnosticCode::EmptyDocument => "TUI001",
            DiagnosticCode::MalformedMarkup => "TUI002",
            DiagnosticCode::MissingClassName => "TUI003",
            DiagnosticCode::UnknownControlType => "TUI004",
            DiagnosticCode::InvalidBindingExpression => "TUI005",
            DiagnosticCode::UnsupportedTwoWayBinding => "TUI006",
            DiagnosticCode::UnknownEvent => "TUI007",
            DiagnosticCode::EmptyEventHandler => "TUI008",
            DiagnosticCode::ParseError => "TUI009",
            DiagnosticCode::DuplicateName => "TUI011",
            DiagnosticCode::InvalidPropertyValue => "TUI012",
            DiagnosticCode::ObsoleteEventUsed => "TUI013",
            DiagnosticCode::UnknownControlTypeInGeneration => "TUI014",
            DiagnosticCode::RootNotContainer => "TUI015",
            DiagnosticCode::ChildOfNonContainer => "TUI016",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DiagnosticCode::EmptyDocument => "empty-document",
            DiagnosticCode::MalformedMarkup => "malformed-markup",
            DiagnosticCode::MissingClassName => "missing-class-name",
            DiagnosticCode::UnknownControlType => "unknown-control-type",
            DiagnosticCode::InvalidBindingExpression => "invalid-binding-expression",
            DiagnosticCode::UnsupportedTwoWayBinding => "unsupported-two-way-binding",
            DiagnosticCode::UnknownEvent => "unknown-event",
            DiagnosticCode::EmptyEventHandler => "empty-event-handler",
            DiagnosticCode::ParseError => "parse-error",
            DiagnosticCode::DuplicateName => "duplicate-name",
            DiagnosticCode::InvalidPropertyValue => "invalid-property-value",
            DiagnosticCode::ObsoleteEventUsed => "obsolete-event-used",
            DiagnosticCode::UnknownControlTypeInGeneration => "unknown-control-type-in-generation",
            DiagnosticCode::RootNotContainer => "root-not-container",
            DiagnosticCode::ChildOfNonContainer => "child-of-non-container",
        }
    }

    pub fn default_severity(self) -> Severity {
        match self {
            DiagnosticCode::UnknownEvent
            | DiagnosticCode::InvalidPropertyValue
            | DiagnosticCode::ObsoleteEventUsed
            | DiagnosticCode::UnknownControlTypeInGeneration
            | DiagnosticCode::RootNotContainer
            | DiagnosticCode::ChildOfNonContainer => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Both unknown-type codes, the one from validation and the one from emission.
    pub fn is_unknown_control_type(self) -> bool {
        matches!(
            self,
            DiagnosticCode::UnknownControlType | DiagnosticCode::UnknownControlTypeInGeneration
        )
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub file_path: String,
    /// 1-based, 0 when unavailable.
    pub line: usize,
    /// 1-based, 0 when unavailable.
    pub column: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, file_path: &str, message: impl Into<String>) -> Self {
        Diagnostic {
            code,
            severity: code.default_severity(),
            file_path: file_path.to_string(),
            line: 0,
            column: 0,
            message: message.into(),
        }
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} {}: {}",
            self.file_path,
            self.line,
            self.column,
            self.severity,
            self.code.id(),
            self.message
        )
    }
}

/// Message builders, one per code that takes arguments.
pub mod messages {
    pub fn empty_document() -> String {
        "The markup document is empty or contains only whitespace".to_string()
    }

    pub fn malformed_markup(detail: &str) -> String {
        format!("Invalid markup: {}", detail)
    }

    pub fn missing_class_name() -> String {
        "The root element must have an x:Class attribute specifying the full class name".to_string()
    }

    pub fn unknown_control_type(type_name: &str, known: &[&str]) -> String {
        format!(
            "Unknown control type '{}'. Supported types: {}.",
            type_name,
            known.join(", ")
        )
    }

    pub fn invalid_binding_expression(value: &str) -> String {
        format!(
            "Invalid binding expression '{}'. Expected format: {{Bind PropertyPath}} or {{Bind PropertyPath, Mode=TwoWay}}.",
            value
        )
    }

    pub fn unsupported_two_way_binding(type_name: &str, property: &str) -> String {
        format!(
            "TwoWay binding is not supported on {}.{}.",
            type_name, property
        )
    }

    pub fn unknown_event(type_name: &str, event: &str) -> String {
        format!("Unknown event '{}' for control type '{}'.", event, type_name)
    }

    pub fn empty_event_handler(event: &str) -> String {
        format!(
            "Event '{}' has an empty handler name. Specify a method name like 'OnButtonClick'.",
            event
        )
    }

    pub fn parse_error(detail: &str) -> String {
        format!("Error compiling markup document: {}", detail)
    }

    pub fn duplicate_name(name: &str) -> String {
        format!(
            "Duplicate x:Name '{}'. Each control must have a unique name within the same document.",
            name
        )
    }

    pub fn invalid_property_value(property: &str, value: &str, expected: &str) -> String {
        format!(
            "Invalid value '{}' for property '{}'. Expected {}; emitted verbatim.",
            value, property, expected
        )
    }

    pub fn obsolete_event_used(event: &str, type_name: &str, replacement: Option<&str>) -> String {
        match replacement {
            Some(replacement) => format!(
                "Event '{}' on '{}' is obsolete. Use '{}' instead.",
                event, type_name, replacement
            ),
            None => format!("Event '{}' on '{}' is obsolete.", event, type_name),
        }
    }

    pub fn unknown_control_type_in_generation(type_name: &str) -> String {
        format!(
            "Unknown control type '{}' during code generation; emitted as 'object'.",
            type_name
        )
    }

    pub fn root_not_container(type_name: &str) -> String {
        format!(
            "Root element '{}' is not a container control and cannot host children.",
            type_name
        )
    }

    pub fn child_of_non_container(type_name: &str) -> String {
        format!("Control '{}' is not a container but has child elements.", type_name)
    }
}

/// True if any diagnostic blocks emission under the given policy.
/// Raise every warning to an error, for documents compiled with warnings treated as errors.
pub fn promote_warnings(diagnostics: &mut [Diagnostic]) {
    for diagnostic in diagnostics.iter_mut() {
        diagnostic.severity = Severity::Error;
    }
}

pub fn has_blocking(diagnostics: &[Diagnostic], warnings_as_errors: bool) -> bool {
    diagnostics
        .iter()
        .any(|d| d.is_error() || warnings_as_errors)
}
