/*
 * Character Codes
 *
 * Character constants and classes used by the markup lexer and the emitter.
 */
#![allow(non_upper_case_globals)]

//! Character constants used throughout the compiler

// Special characters
pub const EOF: char = '\0';
pub const TAB: char = '\t';
pub const NEWLINE: char = '\n';
pub const CR: char = '\r'; // Carriage return
pub const SPACE: char = ' ';

// Punctuation
pub const BANG: char = '!';
pub const DQ: char = '"';
pub const HASH: char = '#';
pub const AMPERSAND: char = '&';
pub const SQ: char = '\'';
pub const MINUS: char = '-';
pub const PERIOD: char = '.';
pub const SLASH: char = '/';
pub const COLON: char = ':';
pub const SEMICOLON: char = ';';
pub const LT: char = '<';
pub const EQ: char = '=';
pub const GT: char = '>';
pub const QUESTION: char = '?';

// Brackets
pub const LBRACKET: char = '[';
pub const RBRACKET: char = ']';
pub const UNDERSCORE: char = '_';

// Letters (for quick checks)
pub const A: char = 'A';
pub const F: char = 'F';
pub const Z: char = 'Z';

pub const a: char = 'a';
pub const f: char = 'f';
pub const x: char = 'x';
pub const z: char = 'z';

// Digits
pub const ZERO: char = '0';
pub const NINE: char = '9';

/// Check if character is XML whitespace
pub fn is_whitespace(ch: char) -> bool {
    ch == SPACE || ch == TAB || ch == NEWLINE || ch == CR
}

/// Check if character is a digit
pub fn is_digit(ch: char) -> bool {
    (ZERO..=NINE).contains(&ch)
}

/// Check if character is ASCII letter
pub fn is_ascii_letter(ch: char) -> bool {
    (a..=z).contains(&ch) || (A..=Z).contains(&ch)
}

/// Check if character is ASCII hex digit
pub fn is_ascii_hex_digit(ch: char) -> bool {
    (a..=f).contains(&ch) || (A..=F).contains(&ch) || is_digit(ch)
}

/// Check if character is a quote
pub fn is_quote(ch: char) -> bool {
    ch == SQ || ch == DQ
}

/// Check if character can start an XML name (element or attribute)
pub fn is_name_start(ch: char) -> bool {
    is_ascii_letter(ch) || ch == UNDERSCORE || ch == COLON || (ch as u32) >= 0x80
}

/// Check if character can continue an XML name
pub fn is_name_part(ch: char) -> bool {
    is_name_start(ch) || is_digit(ch) || ch == MINUS || ch == PERIOD
}
