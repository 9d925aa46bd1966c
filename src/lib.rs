pub mod cli;
pub mod core;
pub mod providers;

pub use crate::core::config;

use crate::cli::ui::TerminalPresenter;
use crate::core::{CurrencyCode, RateStore, Session};
use crate::providers::CurrencyLayerProvider;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        currency: CurrencyCode,
        amount: String,
    },
    Rates,
    Interactive {
        currency: Option<CurrencyCode>,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxcalc starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!(
        base_url = %config.provider.base_url,
        currency = %config.currency,
        "Loaded config"
    );

    let access_key = config.access_key()?;
    let provider = CurrencyLayerProvider::new(&config.provider.base_url, &access_key);
    let store = Arc::new(RateStore::new(provider));

    match command {
        AppCommand::Convert { currency, amount } => {
            let mut presenter = TerminalPresenter::default();
            cli::convert::run(store, currency, &amount, &mut presenter).await
        }
        AppCommand::Rates => cli::rates::run(store).await,
        AppCommand::Interactive { currency } => {
            let session = Session::new(store, currency.unwrap_or(config.currency));
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            cli::interactive::run(session, stdin, &mut TerminalPresenter::default()).await?;
            Ok(())
        }
    }
}
