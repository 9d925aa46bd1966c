use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::core::error::Notification;
use crate::core::view::{Presenter, RenderedView};

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Value,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Label => style(text).bold(),
        StyleType::Value => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right aligned rate cell; a missing rate shows as "N/A".
pub fn rate_cell(rate: Option<String>) -> Cell {
    match rate {
        Some(text) => Cell::new(text).set_alignment(CellAlignment::Right),
        None => Cell::new("N/A")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
    }
}

/// Creates a spinner shown while quotes are fetched.
pub fn new_spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Prints session output to the terminal.
#[derive(Default)]
pub struct TerminalPresenter {
    /// Text of the amount field as last typed or reverted.
    pub amount_text: String,
}

impl TerminalPresenter {
    pub fn format_view(view: &RenderedView) -> String {
        format!(
            "{}\n  {} {}\n  {} {}\n  {} {}",
            style_text(&view.currency_label, StyleType::Title),
            style_text("Rate:", StyleType::Label),
            view.rate_line,
            style_text("Amount:", StyleType::Label),
            style_text(&view.amount_line, StyleType::Value),
            style_text("Updated:", StyleType::Label),
            style_text(&view.last_updated, StyleType::Subtle),
        )
    }

    pub fn format_notification(notification: &Notification) -> String {
        format!(
            "{} {}",
            style_text(&format!("[{}]", notification.title), StyleType::Error),
            notification.message.replace('\n', " ")
        )
    }
}

impl Presenter for TerminalPresenter {
    fn render(&mut self, view: &RenderedView) {
        println!("{}", Self::format_view(view));
    }

    fn notify(&mut self, notification: &Notification) {
        println!("{}", Self::format_notification(notification));
    }

    fn replace_amount_text(&mut self, text: &str) {
        self.amount_text = text.to_string();
        println!(
            "{}",
            style_text(&format!("Amount field reverted to \"{text}\""), StyleType::Subtle)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_formatting_contains_lines() {
        console::set_colors_enabled(false);
        let view = RenderedView {
            currency_label: "Japan (JPY)".to_string(),
            rate_line: "150.1 JPY / USD".to_string(),
            amount_line: "Receiving amount is 15,010 JPY".to_string(),
            last_updated: "2022-01-11 09:05".to_string(),
        };

        let text = TerminalPresenter::format_view(&view);
        assert!(text.contains("Japan (JPY)"));
        assert!(text.contains("Rate: 150.1 JPY / USD"));
        assert!(text.contains("Amount: Receiving amount is 15,010 JPY"));
        assert!(text.contains("Updated: 2022-01-11 09:05"));
    }

    #[test]
    fn test_notification_is_single_line() {
        console::set_colors_enabled(false);
        let notification = Notification::new("Error", "Could not load.\ncode:100");
        assert_eq!(
            TerminalPresenter::format_notification(&notification),
            "[Error] Could not load. code:100"
        );
    }

    #[test]
    fn test_replace_amount_text_tracks_field() {
        let mut presenter = TerminalPresenter::default();
        presenter.replace_amount_text("2000");
        assert_eq!(presenter.amount_text, "2000");
    }
}
