//! Failures the conversion pipeline recovers from, and how each is shown to the user

use super::amount::AMOUNT_BOUNDS;

/// Why a quote fetch did not produce a table.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("Response body is not a JSON object")]
    MalformedResponse,

    #[error("Response has no boolean `success` field")]
    MissingSuccessFlag,

    #[error("Provider reported failure (code: {code:?}, info: {info:?})")]
    ProviderReportedFailure {
        code: Option<i64>,
        info: Option<String>,
    },

    #[error("Response has no `quotes` object of numeric rates")]
    MissingQuotes,

    #[error("Request error: {0}")]
    Transport(String),
}

/// Why an entered amount was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("invalid amount")]
    InvalidFormat,

    #[error("amount out of range")]
    OutOfRange,
}

/// A transient alert for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl FetchError {
    pub fn notification(&self) -> Notification {
        let failed = "Could not load exchange rates.";
        match self {
            FetchError::MalformedResponse => {
                Notification::new("Error", format!("{failed}\ncode:100 (unreadable response)"))
            }
            FetchError::MissingSuccessFlag => {
                Notification::new("Error", format!("{failed}\ncode:101 (missing status)"))
            }
            FetchError::MissingQuotes => {
                Notification::new("Error", format!("{failed}\ncode:102 (missing quotes)"))
            }
            FetchError::ProviderReportedFailure { info, .. } => {
                let reason = info.as_deref().unwrap_or("provider rejected the request");
                Notification::new("Error", format!("{failed}\ncode:103 ({reason})"))
            }
            FetchError::Transport(_) => {
                Notification::new("Request Error", "Please contact the administrator.")
            }
        }
    }
}

impl AmountError {
    pub fn notification(&self) -> Notification {
        let (low, high) = AMOUNT_BOUNDS;
        match self {
            AmountError::InvalidFormat => Notification::new(
                "Error",
                "The transfer amount is invalid: enter a number.",
            ),
            AmountError::OutOfRange => Notification::new(
                "Error",
                format!("The transfer amount is out of range: enter {low} to {high} USD."),
            ),
        }
    }
}
