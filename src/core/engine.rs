//! Derives the displayed rate and converted amount from the current selections

use std::sync::Arc;
use tracing::debug;

use super::amount::{drop_last_char, parse_amount};
use super::currency::{BASE_CURRENCY, CurrencyCode};
use super::error::AmountError;
use super::format::format_number;
use super::quotes::QuoteTable;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConversionState {
    pub selected_currency: CurrencyCode,
    /// Last accepted amount text; `None` when the field is empty.
    pub entered_amount: Option<String>,
    pub current_rate: f64,
    pub converted_amount: f64,
}

/// A rejected amount edit. State is left as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountRejection {
    pub error: AmountError,
    /// Text the amount field should revert to: the rejected text minus its last character.
    pub reverted_text: String,
    pub last_valid: Option<String>,
}

#[derive(Debug, Default)]
pub struct ConversionEngine {
    state: ConversionState,
    quotes: Option<Arc<QuoteTable>>,
}

impl ConversionEngine {
    pub fn new(initial: CurrencyCode) -> Self {
        Self {
            state: ConversionState {
                selected_currency: initial,
                ..ConversionState::default()
            },
            quotes: None,
        }
    }

    pub fn state(&self) -> &ConversionState {
        &self.state
    }

    pub fn select_currency(&mut self, code: CurrencyCode) -> &ConversionState {
        debug!(currency = %code, "Selecting destination currency");
        self.state.selected_currency = code;
        self.recompute();
        &self.state
    }

    pub fn set_amount(&mut self, raw: &str) -> Result<&ConversionState, AmountRejection> {
        match parse_amount(raw) {
            Ok(value) => {
                self.state.entered_amount = (!raw.is_empty()).then(|| raw.to_string());
                self.state.converted_amount = value * self.state.current_rate;
                Ok(&self.state)
            }
            Err(error) => {
                debug!(raw, %error, "Rejected amount");
                Err(AmountRejection {
                    error,
                    reverted_text: drop_last_char(raw),
                    last_valid: self.state.entered_amount.clone(),
                })
            }
        }
    }

    /// Applies a freshly fetched table to the current selection and amount.
    pub fn on_rates_updated(&mut self, quotes: Arc<QuoteTable>) -> &ConversionState {
        self.quotes = Some(quotes);
        self.recompute();
        &self.state
    }

    fn recompute(&mut self) {
        let code = self.state.selected_currency;
        self.state.current_rate = self.quotes.as_ref().map_or(0.0, |q| q.rate_for(code));

        // Stored amounts were validated when entered.
        let amount = self
            .state
            .entered_amount
            .as_deref()
            .and_then(|raw| parse_amount(raw).ok())
            .unwrap_or(0.0);
        self.state.converted_amount = amount * self.state.current_rate;
    }

    pub fn rate_line(&self) -> String {
        format!(
            "{} {} / {BASE_CURRENCY}",
            format_number(self.state.current_rate),
            self.state.selected_currency
        )
    }

    pub fn amount_line(&self) -> String {
        format!(
            "Receiving amount is {} {}",
            format_number(self.state.converted_amount),
            self.state.selected_currency
        )
    }
}
