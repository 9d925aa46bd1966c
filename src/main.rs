use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxcalc::core::CurrencyCode;
use fxcalc::core::log::init_logging;

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

impl From<Commands> for fxcalc::AppCommand {
    fn from(cmd: Commands) -> fxcalc::AppCommand {
        match cmd {
            Commands::Convert { currency, amount } => {
                fxcalc::AppCommand::Convert { currency, amount }
            }
            Commands::Rates => fxcalc::AppCommand::Rates,
            Commands::Interactive { currency } => fxcalc::AppCommand::Interactive { currency },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert a USD amount into a destination currency
    Convert {
        /// Destination currency (KRW, JPY or PHP)
        currency: CurrencyCode,
        /// Amount in USD, between 0 and 10000
        amount: String,
    },
    /// Display the current rate of every destination currency
    Rates,
    /// Enter amounts and switch currencies at a prompt
    Interactive {
        /// Destination currency selected at startup
        #[arg(long)]
        currency: Option<CurrencyCode>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => fxcalc::cli::setup::setup_at_path(path),
            None => fxcalc::cli::setup::setup(),
        },
        Some(cmd) => fxcalc::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
