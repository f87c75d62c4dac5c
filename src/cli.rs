use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use popdash::analyser::differences::compute_differences;
use popdash::analyser::heatmap::build_heatmap;
use popdash::config::{AppSettings, get_config_path, save_app_config};
use popdash::dashboard::{DashboardFilters, PLACEHOLDER, derive_view};
use popdash::dataset::{PopulationDataset, open};
use popdash::error::DashboardError;
use popdash::report::{render_dashboard, render_differences, render_heatmap};
use popdash::theme::ColorTheme;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "popdash", about = "US state population dashboard")]
pub struct Cli {
    /// Population CSV to load. Defaults to the configured data path.
    #[arg(long, global = true, env = "POPDASH_DATA")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    View(ViewCommand),
    /// List the available color themes
    Themes,
    /// Show or update the stored settings
    Config {
        /// Default population CSV
        #[arg(long)]
        data_path: Option<PathBuf>,

        /// Default color theme
        #[arg(long)]
        theme: Option<String>,

        /// Also write logs to rolling files
        #[arg(long)]
        log_to_file: Option<bool>,

        /// Default ranked table size
        #[arg(long)]
        table_row_limit: Option<usize>,
    },
}

/// Commands that need the population dataset loaded.
#[derive(Subcommand)]
pub enum ViewCommand {
    /// List the years in the dataset, newest first
    Years,
    /// Show the dashboard for a year
    Show {
        /// Year to show. Defaults to the most recent year.
        #[arg(short, long)]
        year: Option<i32>,

        /// Color theme passed to the renderer
        #[arg(short, long)]
        theme: Option<String>,

        /// Maximum rows in the ranked table
        #[arg(long)]
        limit: Option<usize>,

        /// Print the full view as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show year-over-year changes per state
    Diff {
        /// Year to compare with the year before. Defaults to the most recent year.
        #[arg(short, long)]
        year: Option<i32>,

        /// Maximum rows to print
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },
    /// Show the year x state population grid
    Heatmap {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(cli: Cli, settings: AppSettings, out: &mut impl Write) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::View(ViewCommand::Show {
        year: None,
        theme: None,
        limit: None,
        json: false,
    }));

    match command {
        Commands::Themes => {
            for theme in ColorTheme::ALL {
                writeln!(out, "{theme}")?;
            }
            Ok(())
        }
        Commands::Config {
            data_path,
            theme,
            log_to_file,
            table_row_limit,
        } => handle_config(settings, data_path, theme, log_to_file, table_row_limit, out),
        Commands::View(command) => {
            let path = cli.data.unwrap_or_else(|| settings.data_path.clone());
            let dataset = open(&path)
                .with_context(|| format!("Failed to load population data from {}", path.display()))?;
            Ok(run_view(command, &dataset, &settings, out)?)
        }
    }
}

fn run_view(
    command: ViewCommand,
    dataset: &PopulationDataset,
    settings: &AppSettings,
    out: &mut impl Write,
) -> popdash::error::Result<()> {
    match command {
        ViewCommand::Years => {
            for year in dataset.years().into_iter().rev() {
                writeln!(out, "{year}")?;
            }
        }
        ViewCommand::Show {
            year,
            theme,
            limit,
            json,
        } => {
            let filters = build_filters(dataset, settings, year, theme.as_deref())?;
            let view = derive_view(dataset, &filters);
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
            } else {
                let limit = limit.or(settings.table_row_limit);
                write!(out, "{}", render_dashboard(&view, limit))?;
            }
        }
        ViewCommand::Diff { year, limit, json } => {
            let filters = build_filters(dataset, settings, year, None)?;
            let year = filters.selected_year;
            if dataset.is_first_year(year) {
                tracing::info!(year, "No prior year to compare against");
                writeln!(out, "{PLACEHOLDER}")?;
                return Ok(());
            }
            let differences = compute_differences(dataset, year);
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&differences)?)?;
            } else {
                write!(out, "{}", render_differences(&differences, limit))?;
            }
        }
        ViewCommand::Heatmap { json } => {
            let grid = build_heatmap(dataset);
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&grid)?)?;
            } else {
                write!(out, "{}", render_heatmap(&grid))?;
            }
        }
    }
    Ok(())
}

fn build_filters(
    dataset: &PopulationDataset,
    settings: &AppSettings,
    year: Option<i32>,
    theme: Option<&str>,
) -> popdash::error::Result<DashboardFilters> {
    let mut filters = DashboardFilters::for_dataset(dataset, settings.default_theme)
        .ok_or_else(|| DashboardError::Other("Dataset contains no rows".to_owned()))?;
    if let Some(year) = year {
        filters.select_year(dataset, year)?;
    }
    if let Some(theme) = theme {
        filters.select_theme(theme)?;
    }
    Ok(filters)
}

fn handle_config(
    mut settings: AppSettings,
    data_path: Option<PathBuf>,
    theme: Option<String>,
    log_to_file: Option<bool>,
    table_row_limit: Option<usize>,
    out: &mut impl Write,
) -> Result<()> {
    let changed = data_path.is_some()
        || theme.is_some()
        || log_to_file.is_some()
        || table_row_limit.is_some();

    if let Some(path) = data_path {
        settings.data_path = path;
    }
    if let Some(theme) = theme {
        settings.default_theme = theme.parse()?;
    }
    if let Some(flag) = log_to_file {
        settings.log_to_file = flag;
    }
    if let Some(limit) = table_row_limit {
        settings.table_row_limit = Some(limit);
    }

    if changed {
        save_app_config(&settings)?;
        tracing::info!("Saved settings to {}", get_config_path().display());
    }
    writeln!(out, "{}", serde_json::to_string_pretty(&settings)?)?;
    Ok(())
}
