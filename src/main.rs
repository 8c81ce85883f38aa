//! CLI entry point for the sales tier report.
//!
//! Provides subcommands for printing the tiered revenue summary, inspecting
//! a raw CSV, and exporting the cleaned table.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sales_tiers::cleaning::clean;
use sales_tiers::config::ReportConfig;
use sales_tiers::output::{ExportFormat, export_table, print_json};
use sales_tiers::parser::load_table;
use sales_tiers::pipeline::run;
use sales_tiers::stats::TableStats;
use sales_tiers::table::Table;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "sales_tiers")]
#[command(about = "Clean a sales CSV and report revenue tiers per category", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean, aggregate, and print the tiered sales summary
    Summary {
        /// Path to the raw sales CSV
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// JSON file with report settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Column to group by (default: Category)
        #[arg(short, long)]
        key_column: Option<String>,

        /// Column to sum (default: Revenue)
        #[arg(short, long)]
        measure_column: Option<String>,

        /// Wrap width for the narrative section (default: 70)
        #[arg(short, long)]
        width: Option<usize>,

        /// Also write the cleaned table to this path
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Export format: csv or json (anything else falls back to csv)
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Gzip compress the exported file
        #[arg(long, default_value_t = false)]
        gzip: bool,

        /// Log the summary as JSON as well
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show a preview, shape, column types, and numeric statistics of a raw CSV
    Inspect {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Number of preview rows
        #[arg(short = 'n', long, default_value_t = 5)]
        rows: usize,
    },
    /// Clean a CSV and write the result without printing a report
    Clean {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory for the cleaned file
        #[arg(short, long, default_value = "cleaned_data")]
        output_dir: PathBuf,

        /// Output file stem
        #[arg(long, default_value = "sales_cleaned")]
        name: String,

        /// Export format: csv or json (anything else falls back to csv)
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Gzip compress the exported file
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/sales_tiers.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("sales_tiers.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary {
            input,
            config,
            key_column,
            measure_column,
            width,
            export,
            format,
            gzip,
            json,
        } => {
            let base = match config {
                Some(path) => ReportConfig::load(&path)
                    .with_context(|| format!("failed to load config '{}'", path.display()))?,
                None => ReportConfig::default(),
            };
            let config = base.with_overrides(key_column, measure_column, width);

            let raw = read_input(&input)?;
            let output = run(&raw, &config)?;

            println!("{}", output.report);

            if json {
                print_json(&output.summary)?;
            }
            if let Some(path) = export {
                export_table(&path, &output.cleaned, ExportFormat::from_name(&format), gzip)?;
            }
        }
        Commands::Inspect { input, rows } => {
            let raw = read_input(&input)?;
            print_inspection(&raw, rows);
        }
        Commands::Clean {
            input,
            output_dir,
            name,
            format,
            gzip,
        } => {
            let raw = read_input(&input)?;
            let outcome = clean(&raw)?;

            let format = ExportFormat::from_name(&format);
            let mut file_name = format!("{}.{}", name, format.extension());
            if gzip {
                file_name.push_str(".gz");
            }
            let path = output_dir.join(file_name);
            export_table(&path, &outcome.cleaned, format, gzip)?;

            info!(
                cleaned = outcome.cleaned.len(),
                invalid = outcome.invalid.len(),
                missing = outcome.missing.len(),
                path = %path.display(),
                "Cleaned data saved"
            );
        }
    }

    Ok(())
}

/// Loads the raw CSV, attaching the path to any error.
#[tracing::instrument(fields(source = %path.display()))]
fn read_input(path: &Path) -> Result<Table> {
    let table = load_table(path).with_context(|| format!("failed to read '{}'", path.display()))?;
    info!(rows = table.len(), columns = table.width(), "Input loaded");
    Ok(table)
}

fn print_inspection(table: &Table, preview_rows: usize) {
    println!("Dataset Preview:");
    println!("{}", table.columns().join(" | "));
    for row in table.head(preview_rows).rows() {
        let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        println!("{}", cells.join(" | "));
    }

    let stats = TableStats::from_table(table);

    println!("\nDataset Shape (rows, columns):");
    println!("({}, {})", stats.rows, stats.columns);

    println!("\nColumn Types:");
    for col in &stats.column_stats {
        println!(
            "{}: {:?} ({} missing, {:.1}%)",
            col.name, col.column_type, col.missing, col.missing_pct
        );
    }

    println!("\nSummary Statistics:");
    for col in &stats.column_stats {
        if let Some(n) = &col.numeric {
            println!(
                "{}: count={} mean={:.2} std={:.2} min={:.2} max={:.2}",
                col.name, n.count, n.mean, n.std, n.min, n.max
            );
        }
    }
}
