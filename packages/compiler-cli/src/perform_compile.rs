//! Perform Compile
//!
//! Project configuration, document discovery and the compile-and-write driver.

use crate::compile::parallel_compile;
use crate::config::{ProjectConfig, PROJECT_FILE_NAME};
use anyhow::{bail, Context};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tui_xaml_compiler::{CompilerOptions, Diagnostic, MapTypeResolver, TypeCatalog};

/// Suffix appended to the input file name for generated output.
pub const GENERATED_SUFFIX: &str = ".g.cs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// What the command line asked for, before the project file is merged in.
#[derive(Debug, Clone, Default)]
pub struct CommandLineOptions {
    pub paths: Vec<PathBuf>,
    pub project: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub warnings_as_errors: bool,
}

/// Command line merged over the project file.
#[derive(Debug, Clone, Default)]
pub struct ParsedConfiguration {
    pub project: Option<PathBuf>,
    pub root_names: Vec<PathBuf>,
    pub options: CompilerOptions,
    /// `None` writes output next to each input.
    pub out_dir: Option<PathBuf>,
    pub resolver: MapTypeResolver,
}

#[derive(Debug, Default)]
pub struct CompilationResult {
    pub diagnostics: Vec<Diagnostic>,
    pub written: Vec<PathBuf>,
    /// Generated files that could not be written, with the reason.
    pub write_failures: Vec<(PathBuf, String)>,
    pub documents: usize,
}

pub fn read_configuration(cli: &CommandLineOptions) -> anyhow::Result<ParsedConfiguration> {
    let project = cli.project.clone().or_else(|| {
        let default = Path::new(PROJECT_FILE_NAME);
        (cli.paths.is_empty() && default.is_file()).then(|| default.to_path_buf())
    });
    let config = match &project {
        Some(path) => ProjectConfig::load(path)?,
        None => ProjectConfig::default(),
    };
    let base_dir = project
        .as_deref()
        .and_then(Path::parent)
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let include = config.include_patterns();

    let mut root_names = Vec::new();
    if cli.paths.is_empty() {
        root_names.extend(discover_files(&base_dir, &include));
    } else {
        for path in &cli.paths {
            if path.is_dir() {
                root_names.extend(discover_files(path, &include));
            } else if path.is_file() {
                root_names.push(path.clone());
            } else {
                bail!("input path does not exist: {}", path.display());
            }
        }
    }
    root_names.sort();
    root_names.dedup();
    debug!(documents = root_names.len(), "discovered documents");

    let mut options = config.compiler_options();
    if cli.warnings_as_errors {
        options.treat_warnings_as_errors = true;
    }

    Ok(ParsedConfiguration {
        out_dir: cli.out_dir.clone().or_else(|| config.out_dir_from(&base_dir)),
        resolver: config.type_resolver(),
        project,
        root_names,
        options,
    })
}

/// Files under `base_dir` matching any include pattern.
pub fn discover_files(base_dir: &Path, include: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for pattern in include {
        let full_pattern = base_dir.join(pattern);
        let pattern_str = full_pattern.to_string_lossy();
        match glob::glob(&pattern_str) {
            Ok(paths) => files.extend(paths.flatten().filter(|path| path.is_file())),
            Err(error) => warn!(%pattern, %error, "invalid glob pattern"),
        }
    }
    files
}

/// `<dir>/<input file name>.g.cs`, where `<dir>` is `out_dir` or the input's own directory.
pub fn output_path_for(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = out_dir
        .or_else(|| input.parent())
        .unwrap_or_else(|| Path::new("."));
    dir.join(format!("{}{}", file_name, GENERATED_SUFFIX))
}

/// Compile every configured document. Generated files are written unless `check` is set.
pub fn perform_compilation(
    config: &ParsedConfiguration,
    check: bool,
) -> anyhow::Result<CompilationResult> {
    let catalog = TypeCatalog::terminal_gui();
    let outputs = parallel_compile(&config.root_names, &catalog, &config.resolver, &config.options);

    let mut result = CompilationResult {
        documents: outputs.len(),
        ..CompilationResult::default()
    };
    for (input, output) in outputs {
        result.diagnostics.extend(output.diagnostics);
        let Some(generated) = output.generated else {
            continue;
        };
        if check {
            continue;
        }
        let target = output_path_for(&input, config.out_dir.as_deref());
        match write_generated(&target, &generated) {
            Ok(()) => {
                info!(input = %input.display(), output = %target.display(), "wrote generated source");
                result.written.push(target);
            }
            Err(error) => {
                let reason = format!("{:#}", error);
                warn!(output = %target.display(), %reason, "write failed");
                result.write_failures.push((target, reason));
            }
        }
    }
    Ok(result)
}

fn write_generated(target: &Path, generated: &str) -> anyhow::Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(target, generated).with_context(|| format!("failed to write {}", target.display()))
}

pub fn format_diagnostics(diagnostics: &[Diagnostic], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(diagnostics
            .iter()
            .map(Diagnostic::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(diagnostics)?),
    }
}

/// 2 when a generated file could not be written, 1 when any diagnostic is an error, otherwise 0.
pub fn exit_code_from_result(result: &CompilationResult) -> i32 {
    if !result.write_failures.is_empty() {
        2
    } else if result.diagnostics.iter().any(Diagnostic::is_error) {
        1
    } else {
        0
    }
}
