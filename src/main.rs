//! # popdash entry point
//!
//! Loads settings, installs logging, then hands the parsed command line to
//! [`cli::run`]. Without a subcommand the dashboard for the most recent year
//! is printed.
//!
//! ```bash
//! popdash --data data/us-population-2010-2019-reshaped.csv show --year 2019 --theme viridis
//! popdash diff --year 2015 --limit 5
//! popdash show --json > view.json
//! ```

#![warn(clippy::all, rust_2018_idioms)]

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let settings = popdash::config::load_app_config();

    popdash::logging::init(settings.log_to_file)?;
    if settings.log_to_file
        && let Ok(path) = popdash::logging::get_current_log_path()
    {
        tracing::debug!("Writing logs to {}", path.display());
    }

    cli::run(cli, settings, &mut std::io::stdout().lock())
}
