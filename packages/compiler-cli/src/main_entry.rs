// Main Entry Point
//
// Command-line parsing and the top-level run for `tuixc`.

use crate::logging::init_logging;
use crate::perform_compile::{
    exit_code_from_result, format_diagnostics, perform_compilation, read_configuration,
    CommandLineOptions, OutputFormat,
};
use crate::version::{version_string, VERSION};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing::debug;

/// Exit code for usage errors and host failures (unreadable files, bad project file).
pub const EXIT_FAILURE: i32 = 2;

/// Everything `tuixc` was asked to do.
#[derive(Debug, Clone, Default)]
pub struct TuixcArgs {
    pub command_line: CommandLineOptions,
    pub format: OutputFormat,
    pub check: bool,
    pub verbose: bool,
}

pub fn build_command() -> Command {
    Command::new("tuixc")
        .version(VERSION)
        .about("Compiles Terminal.Gui markup documents into C# partial classes")
        .arg(
            Arg::new("paths")
                .value_name("PATH")
                .num_args(0..)
                .value_parser(value_parser!(PathBuf))
                .help("Markup files or directories to compile"),
        )
        .arg(
            Arg::new("project")
                .short('p')
                .long("project")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Path to tuixaml.json"),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Directory for generated files"),
        )
        .arg(
            Arg::new("warnings-as-errors")
                .long("warnings-as-errors")
                .action(ArgAction::SetTrue)
                .help("Suppress output for documents with warnings"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Diagnostic output format"),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .action(ArgAction::SetTrue)
                .help("Report diagnostics without writing files"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log compilation progress"),
        )
}

fn args_from_matches(matches: &ArgMatches) -> TuixcArgs {
    let format = matches
        .get_one::<String>("format")
        .and_then(|format| OutputFormat::parse(format))
        .unwrap_or_default();
    TuixcArgs {
        command_line: CommandLineOptions {
            paths: matches
                .get_many::<PathBuf>("paths")
                .map(|paths| paths.cloned().collect())
                .unwrap_or_default(),
            project: matches.get_one::<PathBuf>("project").cloned(),
            out_dir: matches.get_one::<PathBuf>("out-dir").cloned(),
            warnings_as_errors: matches.get_flag("warnings-as-errors"),
        },
        format,
        check: matches.get_flag("check"),
        verbose: matches.get_flag("verbose"),
    }
}

/// Parse `args` (program name first).
pub fn read_command_line(args: &[String]) -> Result<TuixcArgs, clap::Error> {
    let matches = build_command().try_get_matches_from(args)?;
    Ok(args_from_matches(&matches))
}

/// Run `tuixc`. Text diagnostics and failures go to `console_error`, JSON diagnostics to
/// `console_out`. Returns the process exit code.
pub fn main_fn<O, E>(args: &[String], console_out: O, console_error: E) -> i32
where
    O: Fn(&str),
    E: Fn(&str),
{
    let parsed = match read_command_line(args) {
        Ok(parsed) => parsed,
        Err(error) => {
            let rendered = error.render().to_string();
            if error.use_stderr() {
                console_error(rendered.trim_end());
            } else {
                console_out(rendered.trim_end());
            }
            return error.exit_code();
        }
    };
    init_logging(parsed.verbose);
    debug!(version = %version_string(), "tuixc starting");

    match run(&parsed, &console_out, &console_error) {
        Ok(code) => code,
        Err(error) => {
            console_error(&format!("error: {:#}", error));
            EXIT_FAILURE
        }
    }
}

fn run<O, E>(parsed: &TuixcArgs, console_out: &O, console_error: &E) -> anyhow::Result<i32>
where
    O: Fn(&str),
    E: Fn(&str),
{
    let config = read_configuration(&parsed.command_line)?;
    debug!(project = ?config.project, out_dir = ?config.out_dir, "configuration read");
    let result = perform_compilation(&config, parsed.check)?;

    match parsed.format {
        OutputFormat::Json => console_out(&format_diagnostics(&result.diagnostics, parsed.format)?),
        OutputFormat::Text if !result.diagnostics.is_empty() => {
            console_error(&format_diagnostics(&result.diagnostics, parsed.format)?)
        }
        OutputFormat::Text => {}
    }
    for (target, reason) in &result.write_failures {
        console_error(&format!("error: could not write {}: {}", target.display(), reason));
    }
    Ok(exit_code_from_result(&result))
}
