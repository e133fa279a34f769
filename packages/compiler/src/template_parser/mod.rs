//! Template Parser Module
//!
//! Semantic checks over a parsed element tree

pub mod template_validator;

pub use template_validator::{validate, TemplateValidator};
