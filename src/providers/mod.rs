pub mod currencylayer;

pub use currencylayer::CurrencyLayerProvider;
