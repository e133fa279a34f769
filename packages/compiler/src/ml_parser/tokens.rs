//! ML Parser Tokens

use crate::parse_util::ParseSourceSpan;
use serde::Serialize;

/// Token types for XML markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u8)]
pub enum TokenType {
    /// `<name`, parts: `[name]`
    TagOpenStart,
    /// parts: `[name]`
    AttrName,
    /// parts: `[decoded value]`
    AttrValue,
    /// `>`
    TagOpenEnd,
    /// `/>`
    TagOpenEndVoid,
    /// `</name>`, parts: `[name]`
    TagClose,
    /// parts: `[decoded text]`
    Text,
    /// `<![CDATA[...]]>`, parts: `[content]`
    Cdata,
    /// `<!-- ... -->`
    Comment,
    /// `<?target ...?>`, parts: `[target]`
    ProcessingInstruction,
    /// `<!DOCTYPE ...>`
    DocType,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub token_type: TokenType,
    pub parts: Vec<String>,
    pub source_span: ParseSourceSpan,
}

impl Token {
    pub fn new(token_type: TokenType, parts: Vec<String>, source_span: ParseSourceSpan) -> Self {
        Token {
            token_type,
            parts,
            source_span,
        }
    }

    /// First part, or the empty string for part-less tokens.
    pub fn value(&self) -> &str {
        self.parts.first().map(String::as_str).unwrap_or("")
    }
}
