//! Formtag: form layout annotation.
//!
//! Formtag records the layout of a scanned form as a three-tier hierarchy:
//! sections contain labels, labels contain inputs, and every element is a
//! rectangle on the page. The hierarchy is edited through a session driven
//! by UI events and exchanged as a flat JSON form document.
//!
//! # Modules
//!
//! - [`model`]: Entity types, rectangles and identifiers
//! - [`store`]: The annotation store with cascading deletes
//! - [`session`]: Draw mode, editing and selection over a store
//! - [`projector`]: List and dropdown view models
//! - [`format`]: Form document export/import and JSON I/O
//! - [`validation`]: Document validation and store integrity checks
//! - [`diff`]: Semantic comparison of form documents
//! - [`error`]: Error types for formtag operations

pub mod diff;
pub mod error;
pub mod format;
pub mod model;
pub mod projector;
pub mod session;
pub mod store;
pub mod validation;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub use error::FormtagError;

use format::{io_json, ExportOptions, FormDocument};
use session::{read_event_script, EditSession, SessionState};

/// The formtag CLI application.
#[derive(Parser)]
#[command(name = "formtag")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log debug output to stderr (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Validate a form document for errors and warnings.
    Validate(ValidateArgs),
    /// Print the annotation list of a form document.
    List(ListArgs),
    /// Import a form document and export it again.
    Normalize(NormalizeArgs),
    /// Run a recorded UI event script and export the result.
    Replay(ReplayArgs),
    /// Compare two form documents.
    Diff(DiffArgs),
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Form document to validate.
    input: PathBuf,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    output: String,
}

/// Arguments for the list subcommand.
#[derive(clap::Args)]
struct ListArgs {
    /// Form document to list.
    input: PathBuf,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    output: String,
}

/// Form metadata overrides shared by the exporting subcommands.
#[derive(clap::Args)]
struct MetaArgs {
    /// Form type written to the output document.
    #[arg(long, env = "FORMTAG_FORM_TYPE")]
    form_type: Option<String>,

    /// Page number written to the output document.
    #[arg(long, env = "FORMTAG_PAGE")]
    page: Option<u32>,
}

/// Arguments for the normalize subcommand.
#[derive(clap::Args)]
struct NormalizeArgs {
    /// Form document to normalize.
    input: PathBuf,

    /// Output file (defaults to stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    meta: MetaArgs,
}

/// Arguments for the replay subcommand.
#[derive(clap::Args)]
struct ReplayArgs {
    /// JSON array of UI events.
    events: PathBuf,

    /// Form document to load before replaying.
    #[arg(long)]
    start: Option<PathBuf>,

    /// Output file (defaults to annotation_<unix millis>.json).
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    meta: MetaArgs,
}

/// Arguments for the diff subcommand.
#[derive(clap::Args)]
struct DiffArgs {
    /// First form document.
    a: PathBuf,

    /// Second form document.
    b: PathBuf,

    /// List the differing items.
    #[arg(long)]
    detail: bool,

    /// Maximum items per detail list.
    #[arg(long, default_value_t = 20)]
    max_items: usize,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    output: String,
}

/// Run the formtag CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), FormtagError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::List(args)) => run_list(args),
        Some(Commands::Normalize(args)) => run_normalize(args),
        Some(Commands::Replay(args)) => run_replay(args),
        Some(Commands::Diff(args)) => run_diff(args),
        None => {
            println!("formtag {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Form layout annotation: sections, labels and inputs.");
            println!();
            println!("Run 'formtag --help' for usage information.");
            Ok(())
        }
    }
}

/// Logs go to stderr so that JSON on stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), FormtagError> {
    let json = serde_json::to_string_pretty(value).map_err(FormtagError::Output)?;
    println!("{}", json);
    Ok(())
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), FormtagError> {
    let doc = io_json::read_document(&args.input)?;

    let opts = validation::ValidateOptions {
        strict: args.strict,
    };
    let report = validation::validate_document(&doc, &opts);

    match args.output.as_str() {
        "json" => print_json(&serde_json::json!({
            "error_count": report.error_count(),
            "warning_count": report.warning_count(),
            "issues": report.issues,
        }))?,
        _ => print!("{}", report),
    }

    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (opts.strict && has_warnings) {
        Err(FormtagError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}

/// Execute the list subcommand.
fn run_list(args: ListArgs) -> Result<(), FormtagError> {
    let doc = io_json::read_document(&args.input)?;
    let store = format::import_document(&doc)?;
    let view = projector::project(&store, &SessionState::Idle);

    match args.output.as_str() {
        "json" => print_json(&view),
        _ => {
            if !doc.form_type.is_empty() {
                println!("{} (page {})", doc.form_type, doc.page_number);
            }
            print!("{}", view);
            Ok(())
        }
    }
}

/// Execute the normalize subcommand.
fn run_normalize(args: NormalizeArgs) -> Result<(), FormtagError> {
    let doc = io_json::read_document(&args.input)?;
    let store = format::import_document(&doc)?;

    let opts = ExportOptions::new(
        args.meta.form_type.unwrap_or_else(|| doc.form_type.clone()),
        args.meta.page.unwrap_or(doc.page_number),
    );
    let normalized = format::export_store(&store, &opts);

    match args.output {
        Some(path) => write_output(&path, &normalized),
        None => print_json(&normalized),
    }
}

/// Execute the replay subcommand.
fn run_replay(args: ReplayArgs) -> Result<(), FormtagError> {
    let events = read_event_script(&args.events)?;
    debug!(events = events.len(), "loaded event script");

    let mut session = EditSession::new();
    if let Some(start) = &args.start {
        let doc = io_json::read_document(start)?;
        session.import_document(&doc)?;
    }
    if args.meta.form_type.is_some() || args.meta.page.is_some() {
        let form_type = args
            .meta
            .form_type
            .unwrap_or_else(|| session.form_type().to_string());
        let page = args.meta.page.unwrap_or(session.page_number());
        session.set_form_meta(form_type, page);
    }

    let summary = session.replay(&events);
    print!("{}", summary);

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(io_json::default_export_file_name()));
    write_output(&path, &session.export())
}

/// Execute the diff subcommand.
fn run_diff(args: DiffArgs) -> Result<(), FormtagError> {
    let a = io_json::read_document(&args.a)?;
    let b = io_json::read_document(&args.b)?;

    let opts = diff::DiffOptions {
        detail: args.detail,
        max_items: args.max_items,
        ..Default::default()
    };
    let report = diff::diff_documents(&a, &b, &opts);

    match args.output.as_str() {
        "json" => print_json(&report),
        _ => {
            print!("{}", report);
            Ok(())
        }
    }
}

fn write_output(path: &Path, doc: &FormDocument) -> Result<(), FormtagError> {
    io_json::write_document(path, doc)?;
    info!(path = %path.display(), fields = doc.fields.len(), "wrote form document");
    println!("Wrote {}", path.display());
    Ok(())
}
