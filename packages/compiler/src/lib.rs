#![deny(clippy::all)]

/**
 * Terminal.Gui markup compiler
 *
 * Compiles `.tui.xaml` documents into C# partial classes that build the control tree and
 * wire data bindings
 */

// Core modules
pub mod chars;
pub mod compiler;
mod config;
pub mod diagnostics;
mod error;
pub mod parse_util;
mod version;

// Parser modules
pub mod expression_parser;
pub mod ml_parser;
pub mod template_parser;

// Compilation modules
pub mod output;
pub mod schema;

// Re-exports
pub use compiler::{
    compile_batch, compile_document, resolve_data_context, CompileOutput, MapTypeResolver,
    NoTypeResolver, SourceDocument, TypeResolver,
};
pub use config::CompilerOptions;
pub use diagnostics::{Diagnostic, DiagnosticCode, Severity};
pub use error::{CompileError, Result};
pub use schema::TypeCatalog;
pub use version::{Version, VERSION};
