//! Connects the rate store, the conversion engine and a presenter

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::currency::{CurrencyCode, QuoteProvider};
use super::engine::{ConversionEngine, ConversionState};
use super::error::{AmountError, FetchError};
use super::quotes::FetchResult;
use super::store::RateStore;
use super::view::{NO_FETCH_YET, Presenter, RenderedView};

pub struct Session<P: QuoteProvider> {
    store: Arc<RateStore<P>>,
    engine: ConversionEngine,
}

impl<P: QuoteProvider + 'static> Session<P> {
    pub fn new(store: Arc<RateStore<P>>, initial: CurrencyCode) -> Self {
        let mut engine = ConversionEngine::new(initial);
        if let Some(snapshot) = store.snapshot() {
            engine.on_rates_updated(Arc::clone(&snapshot.quotes));
        }
        Self { store, engine }
    }

    pub fn state(&self) -> &ConversionState {
        self.engine.state()
    }

    pub fn view(&self) -> RenderedView {
        RenderedView {
            currency_label: self.state().selected_currency.label().to_string(),
            rate_line: self.engine.rate_line(),
            amount_line: self.engine.amount_line(),
            last_updated: self
                .store
                .snapshot()
                .map_or(NO_FETCH_YET.to_string(), |s| s.fetched_at_display()),
        }
    }

    /// Spawns a fetch whose result is delivered on `results`.
    ///
    /// Amount and currency events keep working on the held quotes while it runs.
    pub fn spawn_fetch(&self, results: mpsc::UnboundedSender<FetchResult>) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            let result = store.fetch_rates().await;
            if results.send(result).is_err() {
                debug!("Session closed before fetch completed");
            }
        })
    }

    /// Fetches once and waits for the result.
    pub async fn fetch(&mut self, presenter: &mut dyn Presenter) -> Result<(), FetchError> {
        let result = self.store.fetch_rates().await;
        self.apply_fetch(result, presenter)
    }

    /// Applies a fetch result. A failure has already been shown to `presenter` when returned.
    pub fn apply_fetch(
        &mut self,
        result: FetchResult,
        presenter: &mut dyn Presenter,
    ) -> Result<(), FetchError> {
        match result {
            Ok(snapshot) => {
                info!(
                    sequence = snapshot.sequence,
                    quotes = snapshot.quotes.len(),
                    "Exchange rates updated"
                );
                self.engine.on_rates_updated(Arc::clone(&snapshot.quotes));
                presenter.render(&self.view());
                Ok(())
            }
            Err(e) => {
                presenter.notify(&e.notification());
                Err(e)
            }
        }
    }

    pub fn select_currency(&mut self, code: CurrencyCode, presenter: &mut dyn Presenter) {
        self.engine.select_currency(code);
        presenter.render(&self.view());
    }

    /// Applies an amount edit. A rejection has already been shown to `presenter` when returned.
    pub fn set_amount(
        &mut self,
        raw: &str,
        presenter: &mut dyn Presenter,
    ) -> Result<(), AmountError> {
        match self.engine.set_amount(raw) {
            Ok(_) => {
                presenter.render(&self.view());
                Ok(())
            }
            Err(rejection) => {
                presenter.replace_amount_text(&rejection.reverted_text);
                presenter.notify(&rejection.error.notification());
                Err(rejection.error)
            }
        }
    }
}
