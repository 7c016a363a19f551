use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::core::{PriceProvider, PriceQuote, QuoteRequest};

use super::USER_AGENT;

/// Spot prices from goldapi.io, authenticated with an access token header.
pub struct GoldApiProvider {
    base_url: String,
    access_token: String,
}

impl GoldApiProvider {
    pub fn new(base_url: &str, access_token: &str) -> Self {
        GoldApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        }
    }

    fn quote_url(&self, request: &QuoteRequest) -> String {
        let date = request
            .date
            .map(|d| format!("/{}", d.format("%Y%m%d")))
            .unwrap_or_default();
        format!(
            "{}/api/{}/{}{}",
            self.base_url, request.metal, request.currency, date
        )
    }
}

#[async_trait]
impl PriceProvider for GoldApiProvider {
    #[instrument(name = "GoldApiFetch", skip(self), fields(pair = %request))]
    async fn fetch_quote(&self, request: &QuoteRequest) -> Result<PriceQuote> {
        let url = self.quote_url(request);
        debug!("Requesting quote from {}", url);

        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let response = client
            .get(&url)
            .header("x-access-token", &self.access_token)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for {}", e, request))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for {}", response.status(), request));
        }

        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to get response text for {request}"))?;

        let mut quote: PriceQuote = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", request, e))?;

        if quote.metal.is_empty() {
            quote.metal = request.metal.clone();
        }
        if quote.currency.is_empty() {
            quote.currency = request.currency.clone();
        }

        debug!(price = quote.price, exchange = %quote.exchange, "Received quote");
        Ok(quote)
    }
}
