//! ML (Markup Language) Parser Module
//!
//! Markup text to a located, classified element tree

pub mod ast;
pub mod entities;
pub mod lexer;
pub mod parser;
pub mod tokens;
pub mod xml_parser;

pub use ast::*;
pub use lexer::{tokenize, TokenizeResult};
pub use parser::{ParseTreeResult, Parser};
pub use tokens::*;
pub use xml_parser::XmlParser;
