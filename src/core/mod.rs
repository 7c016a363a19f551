//! Core business logic abstractions

pub mod config;
pub mod currency;
pub mod log;
pub mod notifier;
pub mod outcome;
pub mod quote;

// Re-export main types for cleaner imports
pub use currency::{CurrencyInfo, ExchangeRate, ExchangeRateProvider};
pub use notifier::{Notifier, OutboundMessage};
pub use outcome::FetchOutcome;
pub use quote::{GramPrices, PriceProvider, PriceQuote, QuoteRequest};
