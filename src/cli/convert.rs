use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use super::ui;
use crate::core::amount::parse_amount;
use crate::core::{CurrencyCode, Presenter, QuoteProvider, RateStore, Session};

/// Fetches quotes once and shows the conversion of `amount` USD into `currency`.
///
/// Failures are returned rather than shown, the caller reports them once.
pub async fn run<P: QuoteProvider + 'static>(
    store: Arc<RateStore<P>>,
    currency: CurrencyCode,
    amount: &str,
    presenter: &mut dyn Presenter,
) -> Result<()> {
    info!(%currency, amount, "Converting transfer amount");

    // Nothing to fetch for when the amount is unusable.
    if let Err(e) = parse_amount(amount) {
        let message = e.notification().message;
        return Err(e).context(message);
    }

    let pb = ui::new_spinner("Fetching exchange rates...");
    let fetched = store.fetch_rates().await;
    pb.finish_and_clear();
    if let Err(e) = fetched {
        let message = e.notification().message;
        return Err(e).context(message);
    }

    let mut session = Session::new(store, currency);
    session
        .set_amount(amount, presenter)
        .with_context(|| format!("Cannot convert \"{amount}\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Notification, RenderedView};
    use crate::providers::CurrencyLayerProvider;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct RecordingPresenter {
        views: Vec<RenderedView>,
        notifications: Vec<Notification>,
    }

    impl Presenter for RecordingPresenter {
        fn render(&mut self, view: &RenderedView) {
            self.views.push(view.clone());
        }

        fn notify(&mut self, notification: &Notification) {
            self.notifications.push(notification.clone());
        }

        fn replace_amount_text(&mut self, _text: &str) {}
    }

    async fn store_for(
        body: &str,
        expected_requests: u64,
    ) -> (MockServer, Arc<RateStore<CurrencyLayerProvider>>) {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/live"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(expected_requests)
            .mount(&mock_server)
            .await;

        let provider = CurrencyLayerProvider::new(&mock_server.uri(), "test-key");
        (mock_server, Arc::new(RateStore::new(provider)))
    }

    #[tokio::test]
    async fn test_convert_renders_result() {
        let (_server, store) =
            store_for(r#"{"success": true, "quotes": {"USDPHP": 56.2}}"#, 1).await;
        let mut presenter = RecordingPresenter::default();

        run(store, CurrencyCode::Php, "10", &mut presenter)
            .await
            .unwrap();

        let view = presenter.views.last().unwrap();
        assert_eq!(view.amount_line, "Receiving amount is 562 PHP");
        assert!(presenter.notifications.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_reported_once_through_the_error() {
        let (_server, store) = store_for(r#"{"success": false}"#, 1).await;
        let mut presenter = RecordingPresenter::default();

        let err = run(store, CurrencyCode::Krw, "10", &mut presenter)
            .await
            .unwrap_err();

        assert!(presenter.notifications.is_empty());
        assert!(presenter.views.is_empty());
        let report = format!("{err:#}");
        assert!(report.starts_with("Could not load exchange rates."));
        assert!(report.contains("code:103"));
        assert!(report.contains("Provider reported failure"));
    }

    #[tokio::test]
    async fn test_rejected_amount_skips_the_fetch() {
        let (_server, store) = store_for(r#"{"success": true, "quotes": {}}"#, 0).await;
        let mut presenter = RecordingPresenter::default();

        let err = run(Arc::clone(&store), CurrencyCode::Jpy, "20000", &mut presenter)
            .await
            .unwrap_err();

        assert!(presenter.notifications.is_empty());
        assert!(format!("{err:#}").contains("amount out of range"));
        assert!(store.snapshot().is_none());
    }
}
