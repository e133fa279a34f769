use anyhow::Context;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tui_xaml_compiler::{CompilerOptions, MapTypeResolver};

pub const PROJECT_FILE_NAME: &str = "tuixaml.json";
pub const DEFAULT_INCLUDE: &str = "**/*.tui.xaml";

/// Contents of a `tuixaml.json` project file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectConfig {
    pub include: Option<Vec<String>>,
    pub out_dir: Option<String>,
    pub treat_warnings_as_errors: Option<bool>,
    pub indent_width: Option<usize>,
    /// Class name → property name → fully-qualified property type.
    pub types: IndexMap<String, IndexMap<String, String>>,
}

impl ProjectConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read project file {}", path.display()))?;
        let config: ProjectConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse project file {}", path.display()))?;
        Ok(config)
    }

    pub fn include_patterns(&self) -> Vec<String> {
        match &self.include {
            Some(patterns) if !patterns.is_empty() => patterns.clone(),
            _ => vec![DEFAULT_INCLUDE.to_string()],
        }
    }

    /// `outDir` resolved against the directory holding the project file.
    pub fn out_dir_from(&self, base_dir: &Path) -> Option<PathBuf> {
        self.out_dir.as_ref().map(|dir| base_dir.join(dir))
    }

    pub fn compiler_options(&self) -> CompilerOptions {
        let defaults = CompilerOptions::default();
        CompilerOptions {
            treat_warnings_as_errors: self
                .treat_warnings_as_errors
                .unwrap_or(defaults.treat_warnings_as_errors),
            indent_width: self.indent_width.unwrap_or(defaults.indent_width),
        }
    }

    pub fn type_resolver(&self) -> MapTypeResolver {
        MapTypeResolver::new(self.types.clone())
    }
}
