pub mod cli;
pub mod core;
pub mod providers;

use anyhow::Result;
use tracing::{debug, info};

use crate::core::config::AppConfig;

pub enum AppCommand {
    /// Check the calendar and mail the report
    Check { date: Option<String> },
    /// Check the calendar and print the report
    Preview { date: Option<String> },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("IPO watch starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(
        providers = ?config.providers,
        min_offer_amount = config.min_offer_amount,
        utc_offset_hours = config.utc_offset_hours,
        "Loaded config"
    );

    match command {
        AppCommand::Check { date } => cli::check::run(&config, date.as_deref()).await,
        AppCommand::Preview { date } => cli::preview::run(&config, date.as_deref()).await,
    }
}
