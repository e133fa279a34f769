//! Parse Utilities
//!
//! Source locations and parse errors shared by the markup lexer and tree builder.

use serde::Serialize;

/// A position in the source text. `line` and `col` are 0-based.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub struct ParseLocation {
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl ParseLocation {
    pub fn new(offset: usize, line: usize, col: usize) -> Self {
        ParseLocation { offset, line, col }
    }

    /// 1-based line number used in diagnostics.
    pub fn display_line(&self) -> usize {
        self.line + 1
    }

    /// 1-based column number used in diagnostics.
    pub fn display_col(&self) -> usize {
        self.col + 1
    }
}

impl std::fmt::Display for ParseLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.display_line(), self.display_col())
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub struct ParseSourceSpan {
    pub start: ParseLocation,
    pub end: ParseLocation,
}

impl ParseSourceSpan {
    pub fn new(start: ParseLocation, end: ParseLocation) -> Self {
        ParseSourceSpan { start, end }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ParseError {
    pub span: ParseSourceSpan,
    pub msg: String,
}

impl ParseError {
    pub fn new(span: ParseSourceSpan, msg: impl Into<String>) -> Self {
        ParseError {
            span,
            msg: msg.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.msg, self.span.start)
    }
}
