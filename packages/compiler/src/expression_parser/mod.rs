/**
 * Expression Parser Module
 *
 * `{Bind ...}` binding expressions and source-expression resolution
 */
pub mod ast;
pub mod parser;

pub use ast::*;
pub use parser::{resolve_source_expression, Parser};
