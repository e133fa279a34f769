use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};
use tui_xaml_compiler::diagnostics::messages;
use tui_xaml_compiler::{
    compile_batch, CompileOutput, CompilerOptions, Diagnostic, DiagnosticCode, SourceDocument,
    TypeCatalog, TypeResolver,
};

/// Read every file, then compile the readable ones in parallel. A file that cannot be read
/// becomes a `parse-error` output of its own. Results keep the order of `files`.
pub fn parallel_compile(
    files: &[PathBuf],
    catalog: &TypeCatalog,
    resolver: &dyn TypeResolver,
    options: &CompilerOptions,
) -> Vec<(PathBuf, CompileOutput)> {
    let start = Instant::now();
    info!(files = files.len(), "compiling documents in parallel");

    let reads: Vec<Result<SourceDocument, CompileOutput>> = files
        .iter()
        .map(|path| {
            let file_path = path.to_string_lossy().into_owned();
            match fs::read_to_string(path) {
                Ok(source) => Ok(SourceDocument {
                    path: file_path,
                    source,
                }),
                Err(error) => {
                    warn!(path = %path.display(), %error, "failed to read document");
                    Err(unreadable(&file_path, &error))
                }
            }
        })
        .collect();

    let documents: Vec<SourceDocument> = reads
        .iter()
        .filter_map(|read| read.as_ref().ok().cloned())
        .collect();
    let mut compiled = compile_batch(&documents, catalog, resolver, options).into_iter();
    debug!(elapsed = ?start.elapsed(), "compilation finished");

    files
        .iter()
        .cloned()
        .zip(reads)
        .filter_map(|(path, read)| match read {
            Ok(_) => compiled.next().map(|output| (path, output)),
            Err(failed) => Some((path, failed)),
        })
        .collect()
}

fn unreadable(file_path: &str, error: &std::io::Error) -> CompileOutput {
    CompileOutput {
        generated: None,
        diagnostics: vec![Diagnostic::new(
            DiagnosticCode::ParseError,
            file_path,
            messages::parse_error(&format!("failed to read {}: {}", file_path, error)),
        )],
    }
}
