//! Currency conversion abstractions

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

/// A single base→target rate. `last_update` is already in the display offset.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRate {
    pub base: String,
    pub target: String,
    pub rate: f64,
    pub provider: Option<String>,
    pub last_update: Option<DateTime<FixedOffset>>,
}

impl ExchangeRate {
    /// Units of `base` per one unit of `target`.
    pub fn inverse(&self) -> Option<f64> {
        (self.rate != 0.0 && self.rate.is_finite()).then(|| 1.0 / self.rate)
    }
}

#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    async fn fetch_rate(&self, base: &str, target: &str) -> Result<ExchangeRate>;
}

/// How a currency is shown in messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub symbol: &'a str,
    pub flag: &'a str,
}

impl<'a> CurrencyInfo<'a> {
    /// Unknown codes fall back to the code itself, with no flag.
    pub fn lookup(code: &'a str) -> Self {
        let (name, symbol, flag) = match code {
            "USD" => ("美元", "US$", "🇺🇸"),
            "HKD" => ("港元", "HK$", "🇭🇰"),
            "JPY" => ("日元", "¥", "🇯🇵"),
            "TWD" => ("新台幣", "NT$", "🇹🇼"),
            "CNY" => ("人民幣", "CN¥", "🇨🇳"),
            "EUR" => ("歐元", "€", "🇪🇺"),
            "GBP" => ("英鎊", "£", "🇬🇧"),
            "AUD" => ("澳元", "A$", "🇦🇺"),
            "SGD" => ("新加坡元", "S$", "🇸🇬"),
            "MOP" => ("澳門元", "MOP$", "🇲🇴"),
            _ => (code, code, ""),
        };
        CurrencyInfo {
            code,
            name,
            symbol,
            flag,
        }
    }
}

/// Display name of a precious metal symbol, e.g. `XAU` → `黃金`.
pub fn metal_name(symbol: &str) -> &str {
    match symbol {
        "XAU" => "黃金",
        "XAG" => "白銀",
        "XPT" => "鉑金",
        "XPD" => "鈀金",
        _ => symbol,
    }
}
