//! Currency definitions and the quote provider abstraction

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use super::error::FetchError;
use super::quotes::QuoteTable;

/// Currency every fetched rate is quoted against.
pub const BASE_CURRENCY: &str = "USD";

/// Destination currencies a transfer can be received in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    #[default]
    Krw,
    Jpy,
    Php,
}

impl CurrencyCode {
    pub const ALL: [CurrencyCode; 3] = [CurrencyCode::Krw, CurrencyCode::Jpy, CurrencyCode::Php];

    pub fn code(&self) -> &'static str {
        match self {
            CurrencyCode::Krw => "KRW",
            CurrencyCode::Jpy => "JPY",
            CurrencyCode::Php => "PHP",
        }
    }

    /// Label shown when picking a destination.
    pub fn label(&self) -> &'static str {
        match self {
            CurrencyCode::Krw => "Korea (KRW)",
            CurrencyCode::Jpy => "Japan (JPY)",
            CurrencyCode::Php => "Philippines (PHP)",
        }
    }

    /// Key of this currency in a USD based quote table, e.g. `USDKRW`.
    pub fn pair_key(&self) -> String {
        format!("{BASE_CURRENCY}{}", self.code())
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "KRW" => Ok(CurrencyCode::Krw),
            "JPY" => Ok(CurrencyCode::Jpy),
            "PHP" => Ok(CurrencyCode::Php),
            _ => Err(anyhow::anyhow!(
                "Unsupported currency: {} (expected one of KRW, JPY, PHP)",
                s
            )),
        }
    }
}

/// Source of USD based quote tables.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_quotes(&self) -> Result<QuoteTable, FetchError>;
}
