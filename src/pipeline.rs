//! The fetch → format → deliver run.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::core::config::{DeliveryMode, ReportConfig};
use crate::core::{
    ExchangeRate, ExchangeRateProvider, FetchOutcome, Notifier, OutboundMessage, PriceProvider,
    PriceQuote, QuoteRequest,
};
use crate::report::{self, Section, SectionKind};

/// What one run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Data sections that made it into the report (the banner is not counted).
    pub sections: usize,
    /// Data sections dropped because their fetch failed.
    pub omitted: usize,
    pub messages_sent: usize,
}

pub struct Pipeline<'a> {
    pub price_provider: &'a dyn PriceProvider,
    pub rate_provider: &'a dyn ExchangeRateProvider,
    pub notifier: &'a dyn Notifier,
}

impl Pipeline<'_> {
    /// Fetch failures only drop their own section. A delivery failure ends the
    /// run with an error and nothing after it is sent.
    pub async fn run(
        &self,
        report: &ReportConfig,
        date: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Result<RunSummary> {
        let request = QuoteRequest {
            metal: report.metal.clone(),
            currency: report.currency.clone(),
            date,
        };
        let quote = fetch_quote(self.price_provider, &request).await;
        let rate = fetch_rate(self.rate_provider, &report.rate.base, &report.rate.target).await;

        let omitted = [!quote.is_available(), !rate.is_available()]
            .iter()
            .filter(|missing| **missing)
            .count();
        let sections = build_sections(report, &quote, &rate, now);
        let data_sections = sections
            .iter()
            .filter(|s| s.kind != SectionKind::Banner)
            .count();

        if data_sections == 0 {
            warn!("No data could be fetched, nothing will be sent");
            return Ok(RunSummary {
                sections: 0,
                omitted,
                messages_sent: 0,
            });
        }

        let messages = compose_messages(&sections, report.delivery);
        let messages_sent = deliver(self.notifier, &messages).await?;
        info!(messages_sent, omitted, "Report delivered");

        Ok(RunSummary {
            sections: data_sections,
            omitted,
            messages_sent,
        })
    }
}

pub async fn fetch_quote(
    provider: &dyn PriceProvider,
    request: &QuoteRequest,
) -> FetchOutcome<PriceQuote> {
    FetchOutcome::from_result("gold price", provider.fetch_quote(request).await)
}

pub async fn fetch_rate(
    provider: &dyn ExchangeRateProvider,
    base: &str,
    target: &str,
) -> FetchOutcome<ExchangeRate> {
    FetchOutcome::from_result("exchange rate", provider.fetch_rate(base, target).await)
}

/// Banner first (when enabled), then every section whose data is available.
pub fn build_sections(
    report: &ReportConfig,
    quote: &FetchOutcome<PriceQuote>,
    rate: &FetchOutcome<ExchangeRate>,
    now: DateTime<Utc>,
) -> Vec<Section> {
    let mut sections = Vec::with_capacity(3);
    if report.include_banner {
        sections.push(Section {
            kind: SectionKind::Banner,
            text: report::format_banner(&now),
        });
    }
    if let Some(quote) = quote.available() {
        sections.push(Section {
            kind: SectionKind::Gold,
            text: report::format_quote(quote),
        });
    }
    if let Some(rate) = rate.available() {
        sections.push(Section {
            kind: SectionKind::Rate,
            text: report::format_rate(rate, &report.rate),
        });
    }
    sections
}

pub fn compose_messages(sections: &[Section], mode: DeliveryMode) -> Vec<OutboundMessage> {
    match mode {
        DeliveryMode::Sequential => sections
            .iter()
            .map(|s| OutboundMessage::new(s.text.clone()))
            .collect(),
        DeliveryMode::Combined if sections.is_empty() => Vec::new(),
        DeliveryMode::Combined => {
            let text = sections
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join("\n\n");
            vec![OutboundMessage::new(text)]
        }
    }
}

/// Sends in order and stops at the first failure.
pub async fn deliver(notifier: &dyn Notifier, messages: &[OutboundMessage]) -> Result<usize> {
    for (i, message) in messages.iter().enumerate() {
        notifier
            .send(message)
            .await
            .with_context(|| format!("Failed to deliver message {} of {}", i + 1, messages.len()))?;
        debug!(index = i + 1, total = messages.len(), "Message sent");
    }
    Ok(messages.len())
}
