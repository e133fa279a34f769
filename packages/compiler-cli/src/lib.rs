#![deny(clippy::all)]

/**
 * Terminal.Gui markup compiler CLI
 *
 * Project configuration, document discovery and the `tuixc` driver
 */
pub use tui_xaml_compiler as compiler;

pub mod compile;
pub mod config;
pub mod logging;
pub mod main_entry;
pub mod perform_compile;
pub mod version;
