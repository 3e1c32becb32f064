use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use ocr_structure::{
    CopyMode, ExportFormat, ExtractOptions, ExtractedData, ExtractionReport, PageSelection,
    clipboard_payload, extract_with_report, load_pages_from_path, write_export,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "ocr2struct",
    version,
    about = "Extract tables and key-value pairs from OCR results"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract structured data and write it in the chosen format.
    Extract(ExtractArgs),
    /// Print the clipboard payload (transcript or JSON dump) to stdout.
    Copy(CopyArgs),
}

#[derive(Debug, Args)]
struct TuningArgs {
    /// Page selection like 1-3,5.
    #[arg(long)]
    pages: Option<String>,

    /// Drop cells and key-value pairs recognized below this confidence (0-100).
    #[arg(long)]
    min_confidence: Option<f32>,

    /// Vertical distance in pixels under which lines share a row.
    #[arg(long, default_value_t = 15.0)]
    row_tolerance: f32,

    /// Maximum gap in pixels between word starts within one column.
    #[arg(long, default_value_t = 30.0)]
    column_gap: f32,

    /// How far left of a column boundary a word may start and still belong to it.
    #[arg(long, default_value_t = 20.0)]
    column_bias: f32,
}

#[derive(Debug, Args)]
struct ExtractArgs {
    /// Recognition results as a JSON array of pages.
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory.
    #[arg(short, long)]
    output: PathBuf,

    /// Output format: csv, json or text.
    #[arg(long, default_value = "csv")]
    format: String,

    /// Base name for output files. Defaults to the input file stem.
    #[arg(long)]
    name: Option<String>,

    #[command(flatten)]
    tuning: TuningArgs,

    /// Print every warning and log written files.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Args)]
struct CopyArgs {
    /// Recognition results as a JSON array of pages.
    #[arg(short, long)]
    input: PathBuf,

    /// Payload: text or json.
    #[arg(long, default_value = "text")]
    mode: String,

    #[command(flatten)]
    tuning: TuningArgs,
}

fn parse_options(args: &TuningArgs) -> Result<ExtractOptions> {
    let pages = args
        .pages
        .as_deref()
        .map(PageSelection::from_str)
        .transpose()
        .context("failed to parse --pages")?;

    Ok(ExtractOptions {
        pages,
        row_tolerance: args.row_tolerance,
        column_gap: args.column_gap,
        column_left_bias: args.column_bias,
        min_confidence: args.min_confidence,
        ..ExtractOptions::default()
    })
}

fn log_report(report: &ExtractionReport, verbose: bool) {
    if report.warnings.is_empty() {
        return;
    }

    eprintln!("warning: {} issue(s) detected", report.warnings.len());
    if verbose {
        for warning in &report.warnings {
            eprintln!("  - {warning}");
        }
    }
}

fn run_pipeline(input: &Path, tuning: &TuningArgs) -> Result<(ExtractedData, ExtractionReport)> {
    let options = parse_options(tuning)?;
    let pages = load_pages_from_path(input)
        .with_context(|| format!("failed to load recognition results from '{}'", input.display()))?;
    extract_with_report(pages, &options)
        .with_context(|| format!("failed to extract structure from '{}'", input.display()))
}

fn run_extract(args: &ExtractArgs) -> Result<ExtractionReport> {
    let format = ExportFormat::from_str(&args.format)
        .map_err(|error| anyhow!(error))
        .context("failed to parse --format")?;
    let name = match &args.name {
        Some(name) => name.clone(),
        None => args
            .input
            .file_stem()
            .map_or_else(|| "document".to_string(), |stem| stem.to_string_lossy().into_owned()),
    };

    let (data, report) = run_pipeline(&args.input, &args.tuning)?;
    let written = write_export(&args.output, &data, &name, format)
        .with_context(|| format!("failed to write output to '{}'", args.output.display()))?;
    for path in &written {
        tracing::info!(path = %path.display(), "wrote export");
    }

    Ok(report)
}

fn run_copy(args: &CopyArgs) -> Result<()> {
    let mode = CopyMode::from_str(&args.mode)
        .map_err(|error| anyhow!(error))
        .context("failed to parse --mode")?;
    let (data, _) = run_pipeline(&args.input, &args.tuning)?;
    println!("{}", clipboard_payload(&data, mode)?);
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_directives = if verbose {
        "ocr_structure=info,ocr2struct=info"
    } else {
        "ocr_structure=warn,ocr2struct=warn"
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(matches!(&cli.command, Commands::Extract(args) if args.verbose));

    match cli.command {
        Commands::Extract(args) => match run_extract(&args) {
            Ok(report) => {
                log_report(&report, args.verbose);
                if report.table_count + report.key_value_count > 0 {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(2)
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                ExitCode::from(1)
            }
        },
        Commands::Copy(args) => match run_copy(&args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                eprintln!("error: {error:#}");
                ExitCode::from(1)
            }
        },
    }
}
