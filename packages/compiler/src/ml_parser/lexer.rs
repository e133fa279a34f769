//! ML Parser Lexer
//!
//! XML tokenizer - converts markup text into tokens. Line endings are normalized to `\n`
//! first, and tokenization stops at the first error.

use super::entities::NAMED_ENTITIES;
use super::tokens::{Token, TokenType};
use crate::chars;
use crate::parse_util::{ParseError, ParseLocation, ParseSourceSpan};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Tokenization result
#[derive(Debug, Clone)]
pub struct TokenizeResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<ParseError>,
}

static CR_OR_CRLF_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n?").expect("valid line ending pattern"));

pub fn normalize_line_endings(source: &str) -> Cow<'_, str> {
    CR_OR_CRLF_REGEXP.replace_all(source, "\n")
}

/// Main tokenization function
pub fn tokenize(source: &str) -> TokenizeResult {
    let normalized = normalize_line_endings(source);
    let mut tokenizer = Tokenizer::new(&normalized);
    tokenizer.tokenize();

    TokenizeResult {
        tokens: tokenizer.tokens,
        errors: tokenizer.errors,
    }
}

#[derive(Debug, Clone, Copy)]
struct CharacterCursor<'a> {
    input: &'a str,
    state: ParseLocation,
}

impl<'a> CharacterCursor<'a> {
    fn new(input: &'a str) -> Self {
        CharacterCursor {
            input,
            state: ParseLocation::default(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.state.offset..]
    }

    fn peek(&self) -> char {
        self.rest().chars().next().unwrap_or(chars::EOF)
    }

    fn at_eof(&self) -> bool {
        self.state.offset >= self.input.len()
    }

    fn advance(&mut self) {
        let Some(ch) = self.rest().chars().next() else {
            return;
        };
        self.state.offset += ch.len_utf8();
        if ch == chars::NEWLINE {
            self.state.line += 1;
            self.state.col = 0;
        } else {
            self.state.col += 1;
        }
    }

    fn get_chars(&self, start: &CharacterCursor<'a>) -> &'a str {
        &self.input[start.state.offset..self.state.offset]
    }

    fn get_span(&self, start: &CharacterCursor<'a>) -> ParseSourceSpan {
        ParseSourceSpan::new(start.state, self.state)
    }
}

struct Tokenizer<'a> {
    cursor: CharacterCursor<'a>,
    tokens: Vec<Token>,
    errors: Vec<ParseError>,
}

type LexResult<T> = Result<T, ParseError>;

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Tokenizer {
            cursor: CharacterCursor::new(input),
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn tokenize(&mut self) {
        while !self.cursor.at_eof() {
            let start = self.cursor;

            let result = if self.attempt_char_code(chars::LT) {
                if self.attempt_str("!--") {
                    self.consume_comment(start)
                } else if self.attempt_str("![CDATA[") {
                    self.consume_cdata(start)
                } else if self.attempt_char_code(chars::BANG) {
                    self.consume_doc_type(start)
                } else if self.attempt_char_code(chars::QUESTION) {
                    self.consume_processing_instruction(start)
                } else if self.attempt_char_code(chars::SLASH) {
                    self.consume_tag_close(start)
                } else {
                    self.consume_tag_open(start)
                }
            } else {
                self.consume_text()
            };

            if let Err(error) = result {
                self.errors.push(error);
                break;
            }
        }

        let end = self.cursor;
        self.push_token(TokenType::Eof, vec![], &end);
    }

    fn push_token(&mut self, token_type: TokenType, parts: Vec<String>, start: &CharacterCursor<'a>) {
        let source_span = self.cursor.get_span(start);
        self.tokens.push(Token::new(token_type, parts, source_span));
    }

    fn attempt_char_code(&mut self, char_code: char) -> bool {
        if !self.cursor.at_eof() && self.cursor.peek() == char_code {
            self.cursor.advance();
            true
        } else {
            false
        }
    }

    fn attempt_str(&mut self, s: &str) -> bool {
        if !self.cursor.rest().starts_with(s) {
            return false;
        }
        for _ in s.chars() {
            self.cursor.advance();
        }
        true
    }

    /// Returns true if any whitespace was consumed.
    fn consume_whitespace(&mut self) -> bool {
        let mut consumed = false;
        while !self.cursor.at_eof() && chars::is_whitespace(self.cursor.peek()) {
            self.cursor.advance();
            consumed = true;
        }
        consumed
    }

    fn create_error(&self, msg: impl Into<String>) -> ParseError {
        ParseError::new(self.cursor.get_span(&self.cursor), msg)
    }

    fn unexpected_character_error(&self) -> ParseError {
        if self.cursor.at_eof() {
            self.create_error("Unexpected end of input")
        } else {
            self.create_error(unexpected_character_error_msg(self.cursor.peek()))
        }
    }

    fn consume_until(&mut self, terminator: &str) -> LexResult<&'a str> {
        let content_start = self.cursor;
        loop {
            if self.cursor.at_eof() {
                return Err(self.unexpected_character_error());
            }
            if self.cursor.rest().starts_with(terminator) {
                let content = self.cursor.get_chars(&content_start);
                self.attempt_str(terminator);
                return Ok(content);
            }
            self.cursor.advance();
        }
    }

    fn consume_comment(&mut self, start: CharacterCursor<'a>) -> LexResult<()> {
        let content = self.consume_until("-->")?.to_string();
        self.push_token(TokenType::Comment, vec![content], &start);
        Ok(())
    }

    fn consume_cdata(&mut self, start: CharacterCursor<'a>) -> LexResult<()> {
        let content = self.consume_until("]]>")?.to_string();
        self.push_token(TokenType::Cdata, vec![content], &start);
        Ok(())
    }

    fn consume_doc_type(&mut self, start: CharacterCursor<'a>) -> LexResult<()> {
        let mut depth = 0usize;
        loop {
            if self.cursor.at_eof() {
                return Err(self.unexpected_character_error());
            }
            let ch = self.cursor.peek();
            self.cursor.advance();
            match ch {
                chars::LBRACKET => depth += 1,
                chars::RBRACKET => depth = depth.saturating_sub(1),
                chars::GT if depth == 0 => break,
                _ => {}
            }
        }
        self.push_token(TokenType::DocType, vec![], &start);
        Ok(())
    }

    fn consume_processing_instruction(&mut self, start: CharacterCursor<'a>) -> LexResult<()> {
        if !chars::is_name_start(self.cursor.peek()) {
            return Err(self.unexpected_character_error());
        }
        let target = self.consume_name();
        self.consume_until("?>")?;
        self.push_token(TokenType::ProcessingInstruction, vec![target], &start);
        Ok(())
    }

    fn consume_name(&mut self) -> String {
        let start = self.cursor;
        while !self.cursor.at_eof() && chars::is_name_part(self.cursor.peek()) {
            self.cursor.advance();
        }
        self.cursor.get_chars(&start).to_string()
    }

    fn consume_tag_open(&mut self, start: CharacterCursor<'a>) -> LexResult<()> {
        if !chars::is_name_start(self.cursor.peek()) {
            return Err(self.unexpected_character_error());
        }
        let name = self.consume_name();
        self.push_token(TokenType::TagOpenStart, vec![name], &start);

        loop {
            let had_whitespace = self.consume_whitespace();
            if self.cursor.at_eof() {
                return Err(self.unexpected_character_error());
            }

            let end_start = self.cursor;
            if self.attempt_char_code(chars::SLASH) {
                if !self.attempt_char_code(chars::GT) {
                    return Err(self.unexpected_character_error());
                }
                self.push_token(TokenType::TagOpenEndVoid, vec![], &end_start);
                return Ok(());
            }
            if self.attempt_char_code(chars::GT) {
                self.push_token(TokenType::TagOpenEnd, vec![], &end_start);
                return Ok(());
            }

            if !had_whitespace {
                return Err(self.create_error("Whitespace is required between attributes"));
            }
            if !chars::is_name_start(self.cursor.peek()) {
                return Err(self.unexpected_character_error());
            }
            self.consume_attribute()?;
        }
    }

    fn consume_attribute(&mut self) -> LexResult<()> {
        let name_start = self.cursor;
        let name = self.consume_name();
        self.push_token(TokenType::AttrName, vec![name.clone()], &name_start);

        self.consume_whitespace();
        if !self.attempt_char_code(chars::EQ) {
            return Err(self.create_error(format!("Attribute \"{}\" is missing a value", name)));
        }
        self.consume_whitespace();

        let quote = self.cursor.peek();
        if self.cursor.at_eof() || !chars::is_quote(quote) {
            return Err(self.create_error(format!("Value of attribute \"{}\" must be quoted", name)));
        }
        let value_start = self.cursor;
        self.cursor.advance();

        let mut value = String::new();
        loop {
            if self.cursor.at_eof() {
                return Err(self.unexpected_character_error());
            }
            let ch = self.cursor.peek();
            if ch == quote {
                self.cursor.advance();
                break;
            }
            match ch {
                chars::LT => {
                    return Err(self.create_error(
                        "The '<' character cannot be used in an attribute value",
                    ));
                }
                chars::AMPERSAND => {
                    let decoded = self.consume_entity()?;
                    value.push_str(&decoded);
                }
                // Attribute-value normalization of literal whitespace.
                chars::TAB | chars::NEWLINE | chars::CR => {
                    value.push(chars::SPACE);
                    self.cursor.advance();
                }
                _ => {
                    value.push(ch);
                    self.cursor.advance();
                }
            }
        }

        self.push_token(TokenType::AttrValue, vec![value], &value_start);
        Ok(())
    }

    fn consume_entity(&mut self) -> LexResult<String> {
        let start = self.cursor;
        self.cursor.advance();

        if self.attempt_char_code(chars::HASH) {
            let is_hex = self.attempt_char_code(chars::x);
            let digits_start = self.cursor;
            while !self.cursor.at_eof()
                && (if is_hex {
                    chars::is_ascii_hex_digit(self.cursor.peek())
                } else {
                    chars::is_digit(self.cursor.peek())
                })
            {
                self.cursor.advance();
            }
            let digits = self.cursor.get_chars(&digits_start);
            let terminated = self.attempt_char_code(chars::SEMICOLON);
            let decoded = u32::from_str_radix(digits, if is_hex { 16 } else { 10 })
                .ok()
                .and_then(char::from_u32);
            return match decoded {
                Some(ch) if terminated => Ok(ch.to_string()),
                _ => Err(ParseError::new(
                    self.cursor.get_span(&start),
                    unparsable_entity_error_msg(self.cursor.get_chars(&start)),
                )),
            };
        }

        let name_start = self.cursor;
        while !self.cursor.at_eof() && chars::is_name_part(self.cursor.peek()) {
            self.cursor.advance();
        }
        let name = self.cursor.get_chars(&name_start);
        if !self.attempt_char_code(chars::SEMICOLON) {
            return Err(ParseError::new(
                self.cursor.get_span(&start),
                unknown_entity_error_msg(self.cursor.get_chars(&start)),
            ));
        }
        NAMED_ENTITIES
            .get(name)
            .map(|decoded| decoded.to_string())
            .ok_or_else(|| {
                ParseError::new(
                    self.cursor.get_span(&start),
                    unknown_entity_error_msg(self.cursor.get_chars(&start)),
                )
            })
    }

    fn consume_text(&mut self) -> LexResult<()> {
        let start = self.cursor;
        let mut text = String::new();
        while !self.cursor.at_eof() && self.cursor.peek() != chars::LT {
            if self.cursor.peek() == chars::AMPERSAND {
                let decoded = self.consume_entity()?;
                text.push_str(&decoded);
            } else {
                text.push(self.cursor.peek());
                self.cursor.advance();
            }
        }
        self.push_token(TokenType::Text, vec![text], &start);
        Ok(())
    }

    fn consume_tag_close(&mut self, start: CharacterCursor<'a>) -> LexResult<()> {
        if !chars::is_name_start(self.cursor.peek()) {
            return Err(self.unexpected_character_error());
        }
        let name = self.consume_name();
        self.consume_whitespace();
        if !self.attempt_char_code(chars::GT) {
            return Err(self.unexpected_character_error());
        }
        self.push_token(TokenType::TagClose, vec![name], &start);
        Ok(())
    }
}

fn unexpected_character_error_msg(char_code: char) -> String {
    format!("Unexpected character \"{}\"", char_code)
}

fn unknown_entity_error_msg(entity_src: &str) -> String {
    format!(
        "Unknown entity \"{}\" - use the \"&#<decimal>;\" or \"&#x<hex>;\" syntax",
        entity_src
    )
}

fn unparsable_entity_error_msg(entity_src: &str) -> String {
    format!(
        "Unable to parse entity \"{}\" - character reference entities must end with \";\"",
        entity_src
    )
}
