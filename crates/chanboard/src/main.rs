//! chanboard - YouTube channel statistics dashboard

mod cli;

use anyhow::{Context, Result};
use chanboard_core::analytics::{aggregate, aggregate_range, MetricSummary, Series};
use chanboard_core::error::LoadReport;
use chanboard_core::models::{Column, Granularity};
use chanboard_core::{export_series, DashboardConfig, DataStore, ExportFormat};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "chanboard",
    version,
    about = "Terminal dashboard for YouTube channel statistics",
    long_about = "Reads a daily channel export (DATE, VIEWS, WATCH_HOURS, LIKES, SHARES,\n\
                  COMMENTS, SUBSCRIBERS_GAINED, SUBSCRIBERS_LOST) and shows all-time and\n\
                  per-period statistics with bar and area charts.\n\
                  \n\
                  Examples:\n\
                    chanboard                                  # Run TUI (default)\n\
                    chanboard --data stats.csv                 # Use another CSV\n\
                    chanboard summary --granularity weekly     # Print every metric\n\
                    chanboard series views --start 2024-01-01  # One column over time\n\
                    chanboard export views.csv --column views  # Write a series to disk\n\
                    chanboard init-config --styles styles/     # Save current settings\n\
                  \n\
                  Environment Variables:\n\
                    CHANBOARD_DATA                   # Channel CSV path\n\
                    CHANBOARD_STYLES                 # Directory holding style.toml files\n\
                    CHANBOARD_CONFIG                 # Config file path\n\
                    CHANBOARD_LOG                    # Log filter (default: chanboard=info)"
)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Channel CSV (default: ./youtube_channel_data.csv)
    #[arg(long, env = "CHANBOARD_DATA")]
    data: Option<PathBuf>,

    /// Directory holding style.toml and section2_style.toml
    #[arg(long, env = "CHANBOARD_STYLES")]
    styles: Option<PathBuf>,

    /// Config file (default: <config dir>/chanboard/config.toml)
    #[arg(long, env = "CHANBOARD_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Mode {
    /// Run TUI interface (default)
    Tui,
    /// Print every metric's all-time total and latest change
    Summary {
        /// Time frame: daily, weekly, monthly, quarterly
        #[arg(long, short = 'g', default_value = "daily")]
        granularity: Granularity,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one column aggregated per period
    Series {
        /// Column name, e.g. VIEWS or net_subscribers
        column: Column,
        /// Time frame: daily, weekly, monthly, quarterly
        #[arg(long, short = 'g', default_value = "daily")]
        granularity: Granularity,
        /// First date included (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last date included (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write one column's aggregated series to a file
    Export {
        /// Destination file
        output: PathBuf,
        /// Column to export
        #[arg(long, short = 'c', default_value = "VIEWS")]
        column: Column,
        /// Time frame: daily, weekly, monthly, quarterly
        #[arg(long, short = 'g', default_value = "daily")]
        granularity: Granularity,
        /// File format (csv|json)
        #[arg(long, short = 'f', default_value = "csv")]
        format: ExportFormat,
    },
    /// Write the effective settings to the config file
    InitConfig {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mode = cli.mode.unwrap_or(Mode::Tui);

    init_tracing(matches!(mode, Mode::Tui));

    let mut config = DashboardConfig::discover(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }
    if let Some(styles) = cli.styles {
        config.style_dir = styles;
    }

    let store = Arc::new(DataStore::with_defaults(config.data_path.clone()));

    match mode {
        Mode::Tui => run_tui(store, config).await?,
        Mode::Summary { granularity, json } => run_summary(&store, granularity, json)?,
        Mode::Series {
            column,
            granularity,
            start,
            end,
            json,
        } => run_series(&store, column, granularity, start, end, json)?,
        Mode::Export {
            output,
            column,
            granularity,
            format,
        } => run_export(&store, output, column, granularity, format)?,
        Mode::InitConfig { force } => run_init_config(cli.config, &config, force)?,
    }

    Ok(())
}

/// Logs go to a file while the alternate screen is up, to stderr otherwise
fn init_tracing(tui: bool) {
    let filter = EnvFilter::try_from_env("CHANBOARD_LOG")
        .unwrap_or_else(|_| EnvFilter::new("chanboard=info"));

    let writer = if tui {
        match open_log_file() {
            Some(file) => BoxMakeWriter::new(std::sync::Mutex::new(file)),
            None => BoxMakeWriter::new(std::io::sink),
        }
    } else {
        BoxMakeWriter::new(std::io::stderr)
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(!tui)
        .with_target(false)
        .try_init();
}

fn open_log_file() -> Option<std::fs::File> {
    let dir = dirs::cache_dir()?.join("chanboard");
    std::fs::create_dir_all(&dir).ok()?;
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("chanboard.log"))
        .ok()
}

/// Print load errors and stop if the dataset could not be read
fn ensure_loaded(report: &LoadReport) -> Result<()> {
    if !report.has_fatal_errors() {
        return Ok(());
    }

    eprintln!("Fatal errors during data load:");
    for error in report.errors.iter() {
        eprintln!("  - {}: {}", error.source, error.message);
        if let Some(suggestion) = &error.suggestion {
            eprintln!("    hint: {}", suggestion);
        }
    }
    std::process::exit(1);
}

fn run_init_config(path: Option<PathBuf>, config: &DashboardConfig, force: bool) -> Result<()> {
    let path = path
        .or_else(DashboardConfig::default_path)
        .context("Could not determine config directory, pass --config")?;
    cli::write_config(config, &path, force)?;
    println!("✓ Wrote {}", path.display());
    Ok(())
}

async fn run_tui(store: Arc<DataStore>, config: DashboardConfig) -> Result<()> {
    // A missing CSV must stop us before the terminal switches screens
    ensure_loaded(&store.initial_load())?;
    chanboard_tui::run(store, config).await
}

fn run_summary(store: &DataStore, granularity: Granularity, json: bool) -> Result<()> {
    ensure_loaded(&store.initial_load())?;
    let dataset = store.dataset()?;

    let today = chrono::Local::now().date_naive();
    let summaries = MetricSummary::compute_all(&dataset, granularity, today);

    println!("{}", cli::format_summary_table(&summaries, json)?);

    if !json {
        if let (Some(first), Some(last)) = (dataset.min_date(), dataset.max_date()) {
            eprintln!("\n{} days of data, {} to {}", dataset.len(), first, last);
        }
    }

    Ok(())
}

fn run_series(
    store: &DataStore,
    column: Column,
    granularity: Granularity,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    ensure_loaded(&store.initial_load())?;
    let dataset = store.dataset()?;

    let buckets = match (start.or(dataset.min_date()), end.or(dataset.max_date())) {
        (Some(start), Some(end)) => aggregate_range(&dataset, start, end, granularity)?,
        _ => Vec::new(),
    };
    let series = Series::from_buckets(&buckets, column, granularity);

    println!("{}", cli::format_series_table(&series, json)?);

    Ok(())
}

fn run_export(
    store: &DataStore,
    output: PathBuf,
    column: Column,
    granularity: Granularity,
    format: ExportFormat,
) -> Result<()> {
    ensure_loaded(&store.initial_load())?;
    let dataset = store.dataset()?;

    let series = Series::from_buckets(&aggregate(&dataset, granularity), column, granularity);
    export_series(&series, &output, format)?;

    println!(
        "✓ Exported {} {} periods of {} to {}",
        series.points.len(),
        granularity.name().to_lowercase(),
        column,
        output.display()
    );

    Ok(())
}
