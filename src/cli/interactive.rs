use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::debug;

use super::ui::{self, TerminalPresenter};
use crate::core::{CurrencyCode, Presenter, QuoteProvider, Session};

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Amount(String),
    Currency(String),
    Refresh,
    Help,
    Quit,
}

fn parse_input(line: &str) -> Input {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.trim().strip_prefix('/') else {
        return Input::Amount(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next().unwrap_or_default(), parts.next()) {
        ("c" | "currency", Some(code)) => Input::Currency(code.to_string()),
        ("r" | "refresh", _) => Input::Refresh,
        ("q" | "quit", _) => Input::Quit,
        _ => Input::Help,
    }
}

fn help_text() -> String {
    let codes: Vec<&str> = CurrencyCode::ALL.iter().map(|c| c.code()).collect();
    ui::style_text(
        &format!(
            "Type a USD amount to convert. /c <{}> selects the destination, /refresh reloads \
             rates, /quit exits.",
            codes.join("|")
        ),
        ui::StyleType::Subtle,
    )
}

/// Runs the prompt loop over `input` until it ends or `/quit` is entered, returning the
/// session as it was left.
///
/// Rates are fetched once in the background at startup; edits apply to whatever quotes are
/// held while a fetch is in flight. A delivered fetch result is applied before the next line.
pub async fn run<P, R>(
    mut session: Session<P>,
    input: R,
    presenter: &mut TerminalPresenter,
) -> Result<Session<P>>
where
    P: QuoteProvider + 'static,
    R: AsyncBufRead + Unpin,
{
    let (results_tx, mut results) = mpsc::unbounded_channel();
    session.spawn_fetch(results_tx.clone());

    println!("{}", help_text());
    presenter.render(&session.view());

    let mut lines = input.lines();
    loop {
        tokio::select! {
            biased;

            Some(result) = results.recv() => {
                // Failures are already shown by the session.
                let _ = session.apply_fetch(result, presenter);
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    debug!("Input closed");
                    break;
                };
                match parse_input(&line) {
                    Input::Amount(raw) => {
                        presenter.amount_text = raw.clone();
                        let _ = session.set_amount(&raw, presenter);
                    }
                    Input::Currency(code) => match code.parse::<CurrencyCode>() {
                        Ok(code) => session.select_currency(code, presenter),
                        Err(e) => {
                            println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error))
                        }
                    },
                    Input::Refresh => {
                        session.spawn_fetch(results_tx.clone());
                    }
                    Input::Help => println!("{}", help_text()),
                    Input::Quit => break,
                }
            }
        }
    }
    Ok(session)
}
