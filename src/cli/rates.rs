use anyhow::{Context, Result};
use comfy_table::Cell;
use std::sync::Arc;

use super::ui;
use crate::core::format::format_number;
use crate::core::{CurrencyCode, QuoteProvider, QuoteSnapshot, RateStore};

/// Renders every supported destination with its rate against USD.
pub fn display_as_table(snapshot: &QuoteSnapshot) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Destination"),
        ui::header_cell("Pair"),
        ui::header_cell("Rate (per USD)"),
    ]);

    for code in CurrencyCode::ALL {
        let rate = snapshot.quotes.get(&code.pair_key()).map(format_number);
        table.add_row(vec![
            Cell::new(code.label()),
            Cell::new(code.pair_key()),
            ui::rate_cell(rate),
        ]);
    }

    format!(
        "{}\n\n{}\n\n{} {}",
        ui::style_text("Exchange rates", ui::StyleType::Title),
        table,
        ui::style_text("Updated:", ui::StyleType::Label),
        ui::style_text(&snapshot.fetched_at_display(), ui::StyleType::Subtle)
    )
}

/// Fetches quotes once and prints them. A failed fetch is only returned, not printed.
pub async fn run<P: QuoteProvider>(store: Arc<RateStore<P>>) -> Result<()> {
    let pb = ui::new_spinner("Fetching exchange rates...");
    let fetched = store.fetch_rates().await;
    pb.finish_and_clear();

    match fetched {
        Ok(snapshot) => {
            println!("{}", display_as_table(&snapshot));
            Ok(())
        }
        Err(e) => {
            let message = e.notification().message;
            Err(e).context(message)
        }
    }
}
