use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use ipo_watch::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for ipo_watch::AppCommand {
    fn from(cmd: Commands) -> ipo_watch::AppCommand {
        match cmd {
            Commands::Check { date } => ipo_watch::AppCommand::Check { date },
            Commands::Preview { date } => ipo_watch::AppCommand::Preview { date },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Check today's IPO calendar and email the report
    Check {
        /// Date to check (YYYY-MM-DD) instead of today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Check today's IPO calendar and print the report without sending it
    Preview {
        /// Date to check (YYYY-MM-DD) instead of today
        #[arg(short, long)]
        date: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => ipo_watch::cli::setup::setup_at_path(path),
            None => ipo_watch::cli::setup::setup(),
        },
        Some(cmd) => ipo_watch::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
