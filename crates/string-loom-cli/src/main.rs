// crates/string-loom-cli/src/main.rs
// ============================================================================
// Module: String Loom CLI Entry Point
// Description: Command dispatcher for localization catalog workflows.
// Purpose: Provide safe file handling around the catalog engine operations.
// Dependencies: clap, serde_json, string-loom-core, string-loom-project, thiserror.
// ============================================================================

//! ## Overview
//! The String Loom CLI wires the catalog engine to the filesystem: it reads
//! the catalog and translation inputs with hard size limits, runs exactly
//! one engine operation per invocation, and persists results all-or-nothing.
//! The merge command snapshots the catalog before mutation and restores the
//! snapshot when the write-back fails, so the persisted catalog is never
//! left in a partial state. All user-facing strings are routed through the
//! message catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsString;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use serde_json::Value;
use string_loom_cli::i18n::translate;
use string_loom_cli::t;
use string_loom_core::Catalog;
use string_loom_core::extract_context;
use string_loom_core::generate_template;
use string_loom_core::merge_translations;
use string_loom_core::missing_keys;
use string_loom_core::to_catalog_string;
use string_loom_core::to_pretty_string;
use string_loom_core::translations_from_json;
use string_loom_core::verify_coverage;
use string_loom_project::register_region;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum size of a catalog file read.
const MAX_CATALOG_BYTES: usize = 64 * 1024 * 1024;

/// Maximum size of a translations input file.
const MAX_TRANSLATIONS_BYTES: usize = 16 * 1024 * 1024;

/// Maximum size of a project file read.
const MAX_PROJECT_BYTES: usize = 16 * 1024 * 1024;

/// Suffix appended to the catalog file name for the pre-merge snapshot.
const BACKUP_SUFFIX: &str = ".backup";

/// Message key for catalog file reads.
const KIND_CATALOG: &str = "input.kind.catalog";

/// Message key for translations file reads.
const KIND_TRANSLATIONS: &str = "input.kind.translations";

/// Message key for project file reads.
const KIND_PROJECT: &str = "input.kind.project";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "string-loom", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print per-key translation context (English text, comment, plural
    /// flag) as JSON.
    Context(ContextCommand),
    /// Generate a blank translation template for a target language.
    Template(TemplateCommand),
    /// Merge translated values into the catalog with snapshot protection.
    Merge(MergeCommand),
    /// Report translation coverage per language.
    Verify(VerifyCommand),
    /// Project configuration utilities.
    Region {
        /// Selected region subcommand.
        #[command(subcommand)]
        command: RegionCommand,
    },
}

/// Arguments for the `context` command.
#[derive(Args, Debug)]
struct ContextCommand {
    /// Path to the localization catalog file.
    #[arg(long, value_name = "PATH")]
    catalog: PathBuf,
}

/// Arguments for the `template` command.
#[derive(Args, Debug)]
struct TemplateCommand {
    /// Path to the localization catalog file.
    #[arg(long, value_name = "PATH")]
    catalog: PathBuf,
    /// Target language code (case-sensitive, e.g. `ru` or `pt-BR`).
    #[arg(long, value_name = "CODE")]
    lang: String,
}

/// Arguments for the `merge` command.
#[derive(Args, Debug)]
struct MergeCommand {
    /// Path to the localization catalog file.
    #[arg(long, value_name = "PATH")]
    catalog: PathBuf,
    /// Language code the translations belong to.
    #[arg(long, value_name = "CODE")]
    lang: String,
    /// Path to a JSON file mapping keys to translated values.
    #[arg(long, value_name = "PATH")]
    translations: PathBuf,
    /// Replace existing translations instead of skipping them.
    #[arg(long, action = ArgAction::SetTrue)]
    overwrite: bool,
}

/// Arguments for the `verify` command.
#[derive(Args, Debug)]
struct VerifyCommand {
    /// Path to the localization catalog file.
    #[arg(long, value_name = "PATH")]
    catalog: PathBuf,
    /// Optional language code to list missing keys for.
    #[arg(long, value_name = "CODE")]
    lang: Option<String>,
}

/// Region subcommands.
#[derive(Subcommand, Debug)]
enum RegionCommand {
    /// Register a language code in the project's knownRegions block.
    Add(RegionAddCommand),
}

/// Arguments for `region add`.
#[derive(Args, Debug)]
struct RegionAddCommand {
    /// Path to the project configuration file.
    #[arg(long, value_name = "PATH")]
    project: PathBuf,
    /// Language code to register (quoted automatically when hyphenated).
    #[arg(long, value_name = "CODE")]
    lang: String,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a formatted message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a formatted message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Context(command) => command_context(&command),
        Commands::Template(command) => command_template(&command),
        Commands::Merge(command) => command_merge(&command),
        Commands::Verify(command) => command_verify(&command),
        Commands::Region {
            command,
        } => command_region(&command),
    }
}

/// Prints top-level help when no subcommand is given.
fn show_help() -> CliResult<()> {
    Cli::command()
        .print_long_help()
        .map_err(|err| CliError::new(t!("main.help_failed", error = err)))
}

// ============================================================================
// SECTION: Context Command
// ============================================================================

/// Executes the `context` command.
fn command_context(command: &ContextCommand) -> CliResult<ExitCode> {
    let catalog = load_catalog(&command.catalog)?;
    let context = extract_context(&catalog);
    let rendered = to_pretty_string(&context)
        .map_err(|err| CliError::new(t!("context.render_failed", error = err)))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Template Command
// ============================================================================

/// Executes the `template` command.
fn command_template(command: &TemplateCommand) -> CliResult<ExitCode> {
    let catalog = load_catalog(&command.catalog)?;
    let template = generate_template(&catalog, &command.lang);
    let rendered = to_pretty_string(&template)
        .map_err(|err| CliError::new(t!("template.render_failed", error = err)))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Merge Command
// ============================================================================

/// Executes the `merge` command with snapshot-protected persistence.
fn command_merge(command: &MergeCommand) -> CliResult<ExitCode> {
    let mut catalog = load_catalog(&command.catalog)?;
    let translations_text =
        read_text_with_limit(&command.translations, MAX_TRANSLATIONS_BYTES, KIND_TRANSLATIONS)?;
    let translations_root: Value = serde_json::from_str(&translations_text).map_err(|err| {
        CliError::new(t!(
            "translations.parse_failed",
            path = command.translations.display(),
            error = err
        ))
    })?;
    let translations = translations_from_json(&translations_root).map_err(|err| {
        CliError::new(t!(
            "translations.parse_failed",
            path = command.translations.display(),
            error = err
        ))
    })?;

    let backup = backup_path(&command.catalog);
    fs::copy(&command.catalog, &backup).map_err(|err| {
        CliError::new(t!("merge.backup_failed", path = backup.display(), error = err))
    })?;
    write_stdout_line(&t!("merge.backup_saved", path = backup.display()))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;

    let report = merge_translations(&mut catalog, &command.lang, &translations, command.overwrite);
    for key in &report.missing_keys {
        write_stderr_line(&t!("merge.key_missing", key = quoted_key(key)))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    let rendered = to_catalog_string(&catalog)
        .map_err(|err| CliError::new(t!("merge.render_failed", error = err)))?;
    if let Err(err) = fs::write(&command.catalog, rendered) {
        return Err(match fs::copy(&backup, &command.catalog) {
            Ok(_) => CliError::new(t!(
                "merge.write_failed_restored",
                path = command.catalog.display(),
                error = err
            )),
            Err(restore_err) => CliError::new(t!(
                "merge.restore_failed",
                backup = backup.display(),
                error = restore_err
            )),
        });
    }

    let mut summary = vec![t!("merge.added", count = report.added, lang = command.lang)];
    if report.overwritten > 0 {
        summary.push(t!("merge.overwritten", count = report.overwritten));
    }
    if report.skipped_exists > 0 {
        summary.push(t!("merge.skipped_exists", count = report.skipped_exists));
    }
    if report.skipped_missing > 0 {
        summary.push(t!("merge.skipped_missing", count = report.skipped_missing));
    }
    summary.push(t!(
        "merge.revert_hint",
        backup = backup.display(),
        catalog = command.catalog.display()
    ));
    for line in summary {
        write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Verify Command
// ============================================================================

/// Executes the `verify` command.
fn command_verify(command: &VerifyCommand) -> CliResult<ExitCode> {
    let catalog = load_catalog(&command.catalog)?;
    let coverage = verify_coverage(&catalog);
    for (language, figures) in &coverage {
        write_stdout_line(&t!(
            "verify.line",
            status = figures.status.as_str(),
            lang = language,
            count = figures.translated,
            total = figures.total,
            percent = figures.percent
        ))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }

    if let Some(language) = &command.lang {
        let missing = missing_keys(&catalog, language);
        write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
        if missing.is_empty() {
            write_stdout_line(&t!("verify.all_translated", lang = language))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        } else {
            write_stdout_line(&t!(
                "verify.missing_header",
                count = missing.len(),
                lang = language
            ))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            for key in &missing {
                write_stdout_line(&t!("verify.missing_entry", key = quoted_key(key)))
                    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Region Command
// ============================================================================

/// Executes a `region` subcommand.
fn command_region(command: &RegionCommand) -> CliResult<ExitCode> {
    match command {
        RegionCommand::Add(add) => command_region_add(add),
    }
}

/// Executes `region add`.
fn command_region_add(command: &RegionAddCommand) -> CliResult<ExitCode> {
    let project_text = read_text_with_limit(&command.project, MAX_PROJECT_BYTES, KIND_PROJECT)?;
    let update = register_region(&project_text, &command.lang).map_err(|err| {
        CliError::new(t!("region.patch_failed", path = command.project.display(), error = err))
    })?;
    if update.added {
        fs::write(&command.project, &update.text).map_err(|err| {
            CliError::new(t!("region.write_failed", path = command.project.display(), error = err))
        })?;
        write_stdout_line(&t!("region.added", entry = update.entry))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    } else {
        write_stdout_line(&t!("region.already_present", lang = command.lang))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let read_limit = limit.saturating_add(1);
    let mut limited = file.take(read_limit);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Reads a UTF-8 text file with a size limit and message-catalog kind label.
fn read_text_with_limit(path: &Path, max_bytes: usize, kind_key: &str) -> CliResult<String> {
    let kind = translate(kind_key, Vec::new());
    let bytes = read_bytes_with_limit(path, max_bytes).map_err(|err| match err {
        ReadLimitError::Io(error) => CliError::new(t!(
            "input.read_failed",
            kind = kind,
            path = path.display(),
            error = error
        )),
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(t!(
            "input.read_too_large",
            kind = kind,
            path = path.display(),
            size = size,
            limit = limit
        )),
    })?;
    String::from_utf8(bytes)
        .map_err(|_| CliError::new(t!("input.not_utf8", kind = kind, path = path.display())))
}

/// Loads and parses the catalog file.
fn load_catalog(path: &Path) -> CliResult<Catalog> {
    let text = read_text_with_limit(path, MAX_CATALOG_BYTES, KIND_CATALOG)?;
    Catalog::parse_str(&text)
        .map_err(|err| CliError::new(t!("catalog.parse_failed", path = path.display(), error = err)))
}

/// Computes the sibling snapshot path for a catalog file.
fn backup_path(catalog: &Path) -> PathBuf {
    let mut name = catalog.file_name().map_or_else(|| OsString::from("catalog"), OsString::from);
    name.push(BACKUP_SUFFIX);
    catalog.with_file_name(name)
}

/// Renders a key as a quoted JSON string for display.
fn quoted_key(key: &str) -> String {
    serde_json::to_string(key).unwrap_or_else(|_| key.to_string())
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message with a stream label.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
