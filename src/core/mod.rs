//! Core conversion pipeline: quotes, validation, formatting and state

pub mod amount;
pub mod config;
pub mod currency;
pub mod engine;
pub mod error;
pub mod format;
pub mod log;
pub mod quotes;
pub mod session;
pub mod store;
pub mod view;

// Re-export main types for cleaner imports
pub use currency::{CurrencyCode, QuoteProvider};
pub use engine::{ConversionEngine, ConversionState};
pub use error::{AmountError, FetchError, Notification};
pub use quotes::{FetchResult, QuoteSnapshot, QuoteTable};
pub use session::Session;
pub use store::RateStore;
pub use view::{Presenter, RenderedView};
