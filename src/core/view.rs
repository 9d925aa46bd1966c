//! Rendered output and the presentation layer it is handed to

use super::error::Notification;

/// Shown in place of the fetch time until the first successful fetch.
pub const NO_FETCH_YET: &str = "No lookup yet";

/// Everything the presentation layer displays for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub currency_label: String,
    /// `"<rate> <CODE> / USD"`
    pub rate_line: String,
    /// `"Receiving amount is <amount> <CODE>"`
    pub amount_line: String,
    pub last_updated: String,
}

/// Receives output from a conversion session.
pub trait Presenter {
    fn render(&mut self, view: &RenderedView);

    fn notify(&mut self, notification: &Notification);

    /// Replaces the amount text the user is editing after a rejected edit.
    fn replace_amount_text(&mut self, text: &str);
}
