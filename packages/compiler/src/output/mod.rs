//! Output Module
//!
//! C# code generation for validated documents

pub mod abstract_emitter;
pub mod code_emitter;
pub mod field_map;
pub mod literals;

pub use abstract_emitter::EmitterVisitorContext;
pub use code_emitter::{collect_bound_controls, CodeEmitter, EmitOutput};
pub use field_map::{FieldMap, FieldSlot};
