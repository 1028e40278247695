use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use eurofx::core::log::init_logging;
use rust_decimal::Decimal;

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

impl From<Commands> for eurofx::AppCommand {
    fn from(cmd: Commands) -> eurofx::AppCommand {
        match cmd {
            Commands::Rate { from, to, amount } => eurofx::AppCommand::Rate {
                from: from.to_uppercase(),
                to: to.to_uppercase(),
                amount,
            },
            Commands::Rates { base } => eurofx::AppCommand::Rates {
                base: base.to_uppercase(),
            },
            Commands::ClearCache => eurofx::AppCommand::ClearCache,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show the exchange rate between two currencies
    Rate {
        /// Currency to convert from, e.g. EUR
        from: String,
        /// Currency to convert to, e.g. USD
        to: String,
        /// Amount to convert
        #[arg(short, long)]
        amount: Option<Decimal>,
    },
    /// List every reference rate for a base currency
    Rates {
        #[arg(short, long, default_value = "EUR")]
        base: String,
    },
    /// Remove cached rates so the next lookup fetches the feed
    ClearCache,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => eurofx::cli::setup::setup(),
        Some(cmd) => eurofx::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
