//! Spot price abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt::Display;

/// What to quote: a metal against a currency, optionally on a past date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub metal: String,
    pub currency: String,
    pub date: Option<NaiveDate>,
}

impl Display for QuoteRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.metal, self.currency)?;
        if let Some(date) = self.date {
            write!(f, "@{}", date.format("%Y-%m-%d"))?;
        }
        Ok(())
    }
}

/// Per-gram prices by gold purity.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GramPrices {
    #[serde(rename = "price_gram_24k")]
    pub k24: f64,
    #[serde(rename = "price_gram_22k")]
    pub k22: f64,
    #[serde(rename = "price_gram_21k")]
    pub k21: f64,
    #[serde(rename = "price_gram_18k")]
    pub k18: f64,
    #[serde(rename = "price_gram_14k")]
    pub k14: f64,
    #[serde(rename = "price_gram_10k")]
    pub k10: f64,
}

impl GramPrices {
    /// Rows of (karat label, millesimal fineness, price), purest first.
    pub fn rows(&self) -> [(&'static str, &'static str, f64); 6] {
        [
            ("24K", "999", self.k24),
            ("22K", "916", self.k22),
            ("21K", "875", self.k21),
            ("18K", "750", self.k18),
            ("14K", "585", self.k14),
            ("10K", "416", self.k10),
        ]
    }
}

/// A spot quote as reported by the price provider. Timestamps are epoch seconds
/// in UTC and are only converted for display.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceQuote {
    pub timestamp: i64,
    #[serde(default)]
    pub open_time: Option<i64>,
    pub exchange: String,
    #[serde(default)]
    pub metal: String,
    #[serde(default)]
    pub currency: String,
    pub price: f64,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    #[serde(default, rename = "prev_close_price")]
    pub previous_close: Option<f64>,
    #[serde(rename = "ch")]
    pub change: f64,
    #[serde(rename = "chp")]
    pub change_percent: f64,
    pub ask: f64,
    pub bid: f64,
    #[serde(flatten)]
    pub gram: GramPrices,
}

#[async_trait]
pub trait PriceProvider: Send + Sync {
    async fn fetch_quote(&self, request: &QuoteRequest) -> Result<PriceQuote>;
}
