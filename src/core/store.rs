//! Holds the latest quote snapshot and performs fetches

use chrono::Local;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use super::currency::QuoteProvider;
use super::quotes::{FetchResult, QuoteSnapshot};

pub struct RateStore<P: QuoteProvider> {
    provider: P,
    issued: AtomicU64,
    latest: watch::Sender<Option<Arc<QuoteSnapshot>>>,
}

impl<P: QuoteProvider> RateStore<P> {
    pub fn new(provider: P) -> Self {
        let (latest, _) = watch::channel(None);
        Self {
            provider,
            issued: AtomicU64::new(0),
            latest,
        }
    }

    /// The currently held snapshot, if any fetch has succeeded.
    pub fn snapshot(&self) -> Option<Arc<QuoteSnapshot>> {
        self.latest.borrow().clone()
    }

    /// Fetches a new quote table and, on success, replaces the held snapshot.
    ///
    /// On success returns the snapshot held afterwards. When a later-issued fetch already
    /// completed, that newer snapshot is kept and returned. Failures leave the held
    /// snapshot untouched.
    #[instrument(name = "RateFetch", skip(self))]
    pub async fn fetch_rates(&self) -> FetchResult {
        let sequence = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(sequence, "Fetch issued");

        let quotes = match self.provider.fetch_quotes().await {
            Ok(quotes) => quotes,
            Err(e) => {
                warn!(sequence, error = %e, "Fetch failed, keeping previous quotes");
                return Err(e);
            }
        };

        let snapshot = Arc::new(QuoteSnapshot {
            quotes: Arc::new(quotes),
            fetched_at: Local::now(),
            sequence,
        });

        let mut held = Arc::clone(&snapshot);
        self.latest.send_if_modified(|current| {
            let newer = current
                .as_ref()
                .filter(|existing| existing.sequence > sequence)
                .cloned();
            match newer {
                Some(newer) => {
                    debug!(
                        sequence,
                        held = newer.sequence,
                        "Discarding stale quote table"
                    );
                    held = newer;
                    false
                }
                None => {
                    debug!(sequence, quotes = snapshot.quotes.len(), "Quote table replaced");
                    *current = Some(Arc::clone(&snapshot));
                    true
                }
            }
        });

        Ok(held)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::CurrencyCode;
    use crate::core::error::FetchError;
    use crate::core::quotes::QuoteTable;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use tokio::sync::{Mutex, oneshot};

    type Response = (Option<oneshot::Receiver<()>>, Result<QuoteTable, FetchError>);

    /// Replays queued responses, optionally waiting for a release signal first.
    struct ScriptedProvider {
        responses: Mutex<VecDeque<Response>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<Response>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    #[async_trait]
    impl QuoteProvider for ScriptedProvider {
        async fn fetch_quotes(&self) -> Result<QuoteTable, FetchError> {
            let (gate, result) = self
                .responses
                .lock()
                .await
                .pop_front()
                .expect("no scripted response left");
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            result
        }
    }

    fn table(rate: f64) -> QuoteTable {
        [("USDKRW".to_string(), rate)].into_iter().collect()
    }

    #[tokio::test]
    async fn test_successful_fetch_replaces_snapshot() {
        let store = RateStore::new(ScriptedProvider::new(vec![
            (None, Ok(table(1300.0))),
            (None, Ok(table(1310.0))),
        ]));
        assert!(store.snapshot().is_none());

        let first = store.fetch_rates().await.unwrap();
        assert_eq!(first.quotes.rate_for(CurrencyCode::Krw), 1300.0);
        assert_eq!(first.sequence, 1);

        store.fetch_rates().await.unwrap();
        let held = store.snapshot().unwrap();
        assert_eq!(held.quotes.rate_for(CurrencyCode::Krw), 1310.0);
        assert_eq!(held.sequence, 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_snapshot() {
        let failures = [
            FetchError::MalformedResponse,
            FetchError::MissingSuccessFlag,
            FetchError::ProviderReportedFailure {
                code: Some(104),
                info: None,
            },
            FetchError::MissingQuotes,
            FetchError::Transport("timed out".to_string()),
        ];
        let mut responses = vec![(None, Ok(table(1300.0)))];
        responses.extend(failures.iter().cloned().map(|e| (None, Err(e))));
        let store = RateStore::new(ScriptedProvider::new(responses));

        let good = store.fetch_rates().await.unwrap();
        for expected in failures {
            let err = store.fetch_rates().await.unwrap_err();
            assert_eq!(err, expected);
            let held = store.snapshot().unwrap();
            assert!(Arc::ptr_eq(&held, &good));
        }
    }

    #[tokio::test]
    async fn test_stale_fetch_does_not_overwrite_newer() {
        let (release_first, first_gate) = oneshot::channel();
        let store = Arc::new(RateStore::new(ScriptedProvider::new(vec![
            (Some(first_gate), Ok(table(1200.0))),
            (None, Ok(table(1300.0))),
        ])));

        let slow = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.fetch_rates().await }
        });
        // Let the first fetch take its ticket before issuing the second.
        while store.issued.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        let fast = store.fetch_rates().await.unwrap();
        assert_eq!(fast.sequence, 2);

        release_first.send(()).unwrap();
        let slow = slow.await.unwrap().unwrap();

        assert_eq!(slow.sequence, 2);
        assert_eq!(slow.quotes.rate_for(CurrencyCode::Krw), 1300.0);
        assert_eq!(store.snapshot().unwrap().sequence, 2);
    }
}
