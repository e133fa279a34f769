//! ML Parser
//!
//! Tree builder - converts the token stream into a single-rooted element tree.

use super::ast::{Attribute, AttributeKind, Element};
use super::lexer::tokenize;
use super::tokens::{Token, TokenType};
use crate::chars;
use crate::parse_util::{ParseError, ParseSourceSpan};
use crate::schema::TypeCatalog;
use indexmap::IndexMap;
use std::iter::Peekable;

/// Parse tree result
#[derive(Debug, Clone)]
pub struct ParseTreeResult {
    pub root: Option<Element>,
    pub errors: Vec<ParseError>,
}

impl ParseTreeResult {
    pub fn new(root: Option<Element>, errors: Vec<ParseError>) -> Self {
        ParseTreeResult { root, errors }
    }
}

/// Markup parser. Attributes are classified against `catalog` as elements are built.
pub struct Parser<'c> {
    catalog: &'c TypeCatalog,
}

impl<'c> Parser<'c> {
    pub fn new(catalog: &'c TypeCatalog) -> Self {
        Parser { catalog }
    }

    pub fn parse(&self, source: &str) -> ParseTreeResult {
        let tokenize_result = tokenize(source);
        if !tokenize_result.errors.is_empty() {
            return ParseTreeResult::new(None, tokenize_result.errors);
        }

        let tree_builder = TreeBuilder::new(tokenize_result.tokens, self.catalog);
        ParseTreeResult::new(tree_builder.root, tree_builder.errors)
    }
}

/// Strip a namespace prefix: `ui:Window` -> `Window`.
pub fn local_name(qualified_name: &str) -> &str {
    qualified_name
        .split_once(chars::COLON)
        .map(|(_, local)| local)
        .unwrap_or(qualified_name)
}

struct OpenElement {
    element: Element,
    qualified_name: String,
}

/// Internal tree builder
struct TreeBuilder<'c> {
    tokens: Peekable<std::vec::IntoIter<Token>>,
    catalog: &'c TypeCatalog,
    container_stack: Vec<OpenElement>,
    root: Option<Element>,
    next_index: usize,
    errors: Vec<ParseError>,
}

type BuildResult = Result<(), ParseError>;

impl<'c> TreeBuilder<'c> {
    fn new(tokens: Vec<Token>, catalog: &'c TypeCatalog) -> Self {
        let mut builder = TreeBuilder {
            tokens: tokens.into_iter().peekable(),
            catalog,
            container_stack: Vec::new(),
            root: None,
            next_index: 0,
            errors: Vec::new(),
        };
        builder.build();
        builder
    }

    fn build(&mut self) {
        while let Some(token) = self.tokens.next() {
            let result = match token.token_type {
                TokenType::TagOpenStart => self.consume_element_start_tag(token),
                TokenType::TagClose => self.consume_element_end_tag(token),
                TokenType::Text | TokenType::Cdata => self.consume_text(token),
                TokenType::Comment | TokenType::ProcessingInstruction => Ok(()),
                TokenType::DocType => Err(ParseError::new(
                    token.source_span,
                    "DOCTYPE declarations are not supported",
                )),
                TokenType::Eof => self.consume_eof(token),
                TokenType::AttrName
                | TokenType::AttrValue
                | TokenType::TagOpenEnd
                | TokenType::TagOpenEndVoid => {
                    Err(ParseError::new(token.source_span, "Unexpected token"))
                }
            };

            if let Err(error) = result {
                self.errors.push(error);
                return;
            }
        }
    }

    fn consume_element_start_tag(&mut self, start: Token) -> BuildResult {
        let qualified_name = start.value().to_string();
        if self.container_stack.is_empty() && self.root.is_some() {
            return Err(ParseError::new(
                start.source_span,
                format!("Multiple root elements: \"{}\" follows the root element", qualified_name),
            ));
        }

        let mut raw_attrs: Vec<(String, String, ParseSourceSpan)> = Vec::new();
        let mut end_span = start.source_span;
        let self_closing = loop {
            let Some(token) = self.tokens.next() else {
                return Err(ParseError::new(end_span, "Unexpected end of input"));
            };
            match token.token_type {
                TokenType::AttrName => {
                    let name = token.value().to_string();
                    let value_token = match self.tokens.next_if(|t| t.token_type == TokenType::AttrValue) {
                        Some(value_token) => value_token,
                        None => {
                            return Err(ParseError::new(
                                token.source_span,
                                format!("Attribute \"{}\" is missing a value", name),
                            ))
                        }
                    };
                    if raw_attrs.iter().any(|(existing, _, _)| existing == &name) {
                        return Err(ParseError::new(
                            token.source_span,
                            format!("Duplicate attribute \"{}\"", name),
                        ));
                    }
                    let span = ParseSourceSpan::new(token.source_span.start, value_token.source_span.end);
                    raw_attrs.push((name, value_token.value().to_string(), span));
                }
                TokenType::TagOpenEnd => {
                    end_span = token.source_span;
                    break false;
                }
                TokenType::TagOpenEndVoid => {
                    end_span = token.source_span;
                    break true;
                }
                _ => {
                    return Err(ParseError::new(
                        token.source_span,
                        "Unexpected token in start tag",
                    ))
                }
            }
        };

        let mut attributes = IndexMap::with_capacity(raw_attrs.len());
        for (key, value, source_span) in raw_attrs {
            let kind = AttributeKind::classify(&key, &value, self.catalog);
            attributes.insert(
                key,
                Attribute {
                    value,
                    kind,
                    source_span,
                },
            );
        }
        attributes.sort_keys();

        let location = start.source_span.start;
        let element = Element {
            index: self.next_index,
            type_name: local_name(&qualified_name).to_string(),
            attributes,
            children: Vec::new(),
            source_line: location.display_line(),
            // The name starts one past '<'.
            source_column: location.display_col() + 1,
            source_span: ParseSourceSpan::new(location, end_span.end),
        };
        self.next_index += 1;

        if self_closing {
            self.add_to_parent(element);
        } else {
            self.container_stack.push(OpenElement {
                element,
                qualified_name,
            });
        }
        Ok(())
    }

    fn consume_element_end_tag(&mut self, end: Token) -> BuildResult {
        let name = end.value();
        match self.container_stack.pop() {
            None => Err(ParseError::new(
                end.source_span,
                format!("Unexpected closing tag \"{}\"", name),
            )),
            Some(open) if open.qualified_name != name => Err(ParseError::new(
                end.source_span,
                format!(
                    "Unexpected closing tag \"{}\". Expected \"{}\"",
                    name, open.qualified_name
                ),
            )),
            Some(mut open) => {
                open.element.source_span.end = end.source_span.end;
                self.add_to_parent(open.element);
                Ok(())
            }
        }
    }

    fn consume_text(&mut self, text: Token) -> BuildResult {
        let is_whitespace_only = text.value().chars().all(chars::is_whitespace);
        if self.container_stack.is_empty() && !is_whitespace_only {
            return Err(ParseError::new(
                text.source_span,
                "Text content is not allowed outside the root element",
            ));
        }
        Ok(())
    }

    fn consume_eof(&mut self, eof: Token) -> BuildResult {
        if let Some(open) = self.container_stack.last() {
            return Err(ParseError::new(
                open.element.source_span,
                format!("Unclosed element \"{}\"", open.qualified_name),
            ));
        }
        if self.root.is_none() {
            return Err(ParseError::new(eof.source_span, "No root element found"));
        }
        Ok(())
    }

    fn add_to_parent(&mut self, element: Element) {
        match self.container_stack.last_mut() {
            Some(parent) => parent.element.children.push(element),
            None => self.root = Some(element),
        }
    }
}
