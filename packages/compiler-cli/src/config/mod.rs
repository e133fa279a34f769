pub mod project;

pub use project::{ProjectConfig, DEFAULT_INCLUDE, PROJECT_FILE_NAME};
