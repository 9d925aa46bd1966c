use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::core::currency::QuoteProvider;
use crate::core::error::FetchError;
use crate::core::quotes::QuoteTable;

pub const DEFAULT_BASE_URL: &str = "http://api.currencylayer.com";

/// Parses a `live` endpoint body into a quote table.
fn parse_live_response(body: &str) -> Result<QuoteTable, FetchError> {
    let json: Map<String, Value> =
        serde_json::from_str(body).map_err(|_| FetchError::MalformedResponse)?;

    let success = json
        .get("success")
        .and_then(Value::as_bool)
        .ok_or(FetchError::MissingSuccessFlag)?;

    if !success {
        let error = json.get("error");
        return Err(FetchError::ProviderReportedFailure {
            code: error.and_then(|e| e.get("code")).and_then(Value::as_i64),
            info: error
                .and_then(|e| e.get("info"))
                .and_then(Value::as_str)
                .map(str::to_string),
        });
    }

    let quotes = json
        .get("quotes")
        .and_then(Value::as_object)
        .ok_or(FetchError::MissingQuotes)?;

    let mut table = Vec::with_capacity(quotes.len());
    for (pair, value) in quotes {
        let rate = value.as_f64().ok_or(FetchError::MissingQuotes)?;
        if rate.is_finite() && rate > 0.0 {
            table.push((pair.clone(), rate));
        } else {
            warn!(%pair, rate, "Dropping non-positive quote");
        }
    }
    Ok(table.into_iter().collect())
}

/// Quote provider backed by the currencylayer `live` endpoint.
pub struct CurrencyLayerProvider {
    base_url: String,
    access_key: String,
}

impl CurrencyLayerProvider {
    pub fn new(base_url: &str, access_key: &str) -> Self {
        CurrencyLayerProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_key: access_key.to_string(),
        }
    }

    async fn fetch_body(&self) -> Result<String, FetchError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/live", self.base_url),
            [("access_key", self.access_key.as_str()), ("format", "1")],
        )
        .map_err(|e| {
            FetchError::Transport(format!("Invalid quote endpoint {}: {e}", self.base_url))
        })?;

        let client = reqwest::Client::builder()
            .user_agent("fxcalc/0.1")
            .build()
            .map_err(transport_error)?;
        let response = client.get(url).send().await.map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(FetchError::Transport(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        response.text().await.map_err(transport_error)
    }
}

// Request URLs carry the access key, keep them out of messages.
fn transport_error(e: reqwest::Error) -> FetchError {
    FetchError::Transport(e.without_url().to_string())
}

#[async_trait]
impl QuoteProvider for CurrencyLayerProvider {
    #[instrument(name = "CurrencyLayerFetch", skip(self), fields(base_url = %self.base_url))]
    async fn fetch_quotes(&self) -> Result<QuoteTable, FetchError> {
        debug!("Requesting live quotes from {}/live?access_key=***&format=1", self.base_url);

        let body = self.fetch_body().await?;
        debug!(bytes = body.len(), "Received live quotes response");

        parse_live_response(&body)
    }
}
