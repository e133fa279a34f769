//! Version
//!
//! Version information for the command-line host.

/// CLI version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version line shown by `tuixc --version`, including the compiler crate's version.
pub fn version_string() -> String {
    format!("{} (compiler {})", VERSION, tui_xaml_compiler::VERSION.full)
}
