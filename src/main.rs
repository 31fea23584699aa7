use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use console::style;
use rasterlens::metadata::{ExportFormat, export_report, export_report_to_path, render_report};
use rasterlens::{MetadataAggregator, SourceOptions, collect_sources};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Inspects the binary structure of JPEG, PNG, GIF, BMP, TIFF and PCX images.
#[derive(Parser)]
#[command(name = "rasterlens")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Files, directories or ZIP archives to analyze
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Descend into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Analyze files in parallel
    #[arg(long)]
    parallel: bool,

    /// Treat `.zip` files as plain files instead of expanding them
    #[arg(long)]
    no_archives: bool,

    /// Maximum size per file, in bytes
    #[arg(long)]
    max_file_size: Option<u64>,

    /// Show debug logs
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Txt,
    Csv,
}

impl OutputFormat {
    fn export_format(self) -> Option<ExportFormat> {
        match self {
            OutputFormat::Table => None,
            OutputFormat::Json => Some(ExportFormat::Json),
            OutputFormat::Txt => Some(ExportFormat::Txt),
            OutputFormat::Csv => Some(ExportFormat::Csv),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut options = SourceOptions {
        recursive: cli.recursive,
        include_archives: !cli.no_archives,
        ..SourceOptions::default()
    };
    if let Some(limit) = cli.max_file_size {
        options.max_file_size = limit;
    }

    let sources = collect_sources(&cli.paths, &options).context("could not read inputs")?;
    tracing::info!(files = sources.len(), parallel = cli.parallel, "starting analysis");

    let aggregator: MetadataAggregator = MetadataAggregator::default();
    let records = if cli.parallel {
        aggregator.analyze_all_parallel(&sources)
    } else {
        aggregator.analyze_all(&sources)
    };

    match (cli.format.export_format(), &cli.output) {
        (None, None) => {
            render_header();
            print!("{}", render_report(&records));
        }
        (None, Some(path)) => {
            std::fs::write(path, console::strip_ansi_codes(&render_report(&records)).into_owned())
                .with_context(|| format!("could not write `{}`", path.display()))?;
        }
        (Some(format), None) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            export_report(&records, format, &mut handle)
                .with_context(|| format!("could not generate {} report", format.label()))?;
            handle.flush()?;
        }
        (Some(format), Some(path)) => {
            export_report_to_path(&records, format, path)
                .with_context(|| format!("could not write `{}`", path.display()))?;
            eprintln!(
                "{}",
                style(format!("{} report saved to {}", format.label(), path.display())).dim()
            );
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("rasterlens=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn render_header() {
    let width = 66;
    let border = "═".repeat(width - 2);
    println!("{}", style(format!("╔{}╗", border)).cyan().bold());
    println!(
        "{}",
        style(format!(
            "║ {:^inner_width$} ║",
            "RasterLens | Raster image structure",
            inner_width = width - 4
        ))
        .cyan()
        .bold()
    );
    println!("{}", style(format!("╚{}╝", border)).cyan().bold());
}
