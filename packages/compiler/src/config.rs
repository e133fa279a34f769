//! Compiler configuration

use serde::{Deserialize, Serialize};

/// Options for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerOptions {
    /// Warnings from validation also suppress emission.
    pub treat_warnings_as_errors: bool,
    /// Spaces per indent level in generated code.
    pub indent_width: usize,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        CompilerOptions {
            treat_warnings_as_errors: false,
            indent_width: 4,
        }
    }
}
