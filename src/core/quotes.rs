//! Quote tables and the snapshots the rate store holds

use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::sync::Arc;

use super::currency::CurrencyCode;
use super::error::FetchError;

/// Pair key (e.g. `USDKRW`) to rate, always replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteTable {
    rates: HashMap<String, f64>,
}

impl QuoteTable {
    pub fn new(rates: HashMap<String, f64>) -> Self {
        Self { rates }
    }

    pub fn get(&self, pair_key: &str) -> Option<f64> {
        self.rates.get(pair_key).copied()
    }

    /// Rate for a destination currency, 0.0 when the table has no entry for it.
    pub fn rate_for(&self, code: CurrencyCode) -> f64 {
        self.get(&code.pair_key()).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<(String, f64)> for QuoteTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// The quote table held after a successful fetch.
#[derive(Debug, Clone)]
pub struct QuoteSnapshot {
    pub quotes: Arc<QuoteTable>,
    pub fetched_at: DateTime<Local>,
    /// Issue order of the fetch that produced this snapshot.
    pub sequence: u64,
}

impl QuoteSnapshot {
    /// Fetch time as shown to the user, `yyyy-MM-dd HH:mm`.
    pub fn fetched_at_display(&self) -> String {
        self.fetched_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Outcome of a single fetch attempt.
pub type FetchResult = Result<Arc<QuoteSnapshot>, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rate_lookup_defaults_to_zero() {
        let table: QuoteTable = [("USDKRW".to_string(), 1300.25)].into_iter().collect();

        assert_eq!(table.rate_for(CurrencyCode::Krw), 1300.25);
        assert_eq!(table.rate_for(CurrencyCode::Jpy), 0.0);
        assert_eq!(table.get("USDPHP"), None);
        assert_eq!(table.len(), 1);
        assert!(QuoteTable::default().is_empty());
    }

    #[test]
    fn test_snapshot_timestamp_format() {
        let snapshot = QuoteSnapshot {
            quotes: Arc::new(QuoteTable::default()),
            fetched_at: Local.with_ymd_and_hms(2022, 1, 11, 9, 5, 42).unwrap(),
            sequence: 1,
        };
        assert_eq!(snapshot.fetched_at_display(), "2022-01-11 09:05");
    }
}
