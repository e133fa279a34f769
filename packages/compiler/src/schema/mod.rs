//! Schema Module
//!
//! Control, event, property and two-way registry consulted by validation and emission

pub mod terminal_gui_schema;
pub mod type_catalog;

pub use type_catalog::*;
