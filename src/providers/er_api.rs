use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

use crate::core::{ExchangeRate, ExchangeRateProvider};
use crate::report::clock;

use super::USER_AGENT;

/// Public open.er-api.com rates. No authentication.
pub struct ErApiProvider {
    base_url: String,
}

impl ErApiProvider {
    pub fn new(base_url: &str) -> Self {
        ErApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    provider: Option<String>,
    time_last_update_utc: Option<String>,
    #[serde(default)]
    rates: HashMap<String, f64>,
}

#[async_trait]
impl ExchangeRateProvider for ErApiProvider {
    #[instrument(name = "ErApiFetch", skip(self))]
    async fn fetch_rate(&self, base: &str, target: &str) -> Result<ExchangeRate> {
        let url = format!("{}/v6/latest/{}", self.base_url, base);
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for base currency: {}", e, base))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for base currency: {}",
                response.status(),
                base
            ));
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", base, e))?;

        if data.result.as_deref() == Some("error") {
            return Err(anyhow!(
                "Provider error: {} for base currency: {}",
                data.error_type.as_deref().unwrap_or("unknown"),
                base
            ));
        }

        let rate = *data
            .rates
            .get(target)
            .ok_or_else(|| anyhow!("No rate found for currency pair: {}/{}", base, target))?;

        let last_update = data.time_last_update_utc.as_deref().and_then(|raw| {
            match DateTime::parse_from_rfc2822(raw) {
                Ok(parsed) => Some(clock::to_display(&parsed)),
                Err(e) => {
                    warn!(raw, error = %e, "Unparsable provider update time, dropping it");
                    None
                }
            }
        });

        Ok(ExchangeRate {
            base: base.to_string(),
            target: target.to_string(),
            rate,
            provider: data.provider,
            last_update,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MOCK_JSON: &str = r#"{
        "result": "success",
        "provider": "https://www.exchangerate-api.com",
        "documentation": "https://www.exchangerate-api.com/docs/free",
        "time_last_update_unix": 1585267200,
        "time_last_update_utc": "Fri, 27 Mar 2020 00:00:00 +0000",
        "time_next_update_utc": "Sat, 28 Mar 2020 00:00:00 +0000",
        "base_code": "JPY",
        "rates": {
            "JPY": 1,
            "HKD": 0.0523,
            "USD": 0.0067
        }
    }"#;

    async fn create_mock_server(base: &str, mock_response: &str, status_code: u16) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/v6/latest/{base}")))
            .respond_with(ResponseTemplate::new(status_code).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_rate_fetch() {
        let mock_server = create_mock_server("JPY", MOCK_JSON, 200).await;
        let provider = ErApiProvider::new(&mock_server.uri());

        let rate = provider.fetch_rate("JPY", "HKD").await.unwrap();
        assert_eq!(rate.base, "JPY");
        assert_eq!(rate.target, "HKD");
        assert_eq!(rate.rate, 0.0523);
        assert_eq!(
            rate.provider.as_deref(),
            Some("https://www.exchangerate-api.com")
        );

        let updated = rate.last_update.expect("update time");
        assert_eq!(updated.offset().local_minus_utc(), 8 * 3600);
        assert_eq!(clock::format_display(&updated), "2020年03月27日 08:00:00");
    }

    #[tokio::test]
    async fn test_missing_target_currency() {
        let mock_server = create_mock_server("JPY", MOCK_JSON, 200).await;
        let provider = ErApiProvider::new(&mock_server.uri());

        let result = provider.fetch_rate("JPY", "XYZ").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "No rate found for currency pair: JPY/XYZ"
        );
    }

    #[tokio::test]
    async fn test_provider_reported_error() {
        let body = r#"{"result": "error", "error-type": "unsupported-code"}"#;
        let mock_server = create_mock_server("ABC", body, 200).await;
        let provider = ErApiProvider::new(&mock_server.uri());

        let result = provider.fetch_rate("ABC", "HKD").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "Provider error: unsupported-code for base currency: ABC"
        );
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = create_mock_server("JPY", "", 500).await;
        let provider = ErApiProvider::new(&mock_server.uri());

        let result = provider.fetch_rate("JPY", "HKD").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error for base currency: JPY"
        );
    }

    #[tokio::test]
    async fn test_unparsable_update_time_is_dropped() {
        let body = r#"{
            "result": "success",
            "time_last_update_utc": "yesterday-ish",
            "rates": {"HKD": 0.0523}
        }"#;
        let mock_server = create_mock_server("JPY", body, 200).await;
        let provider = ErApiProvider::new(&mock_server.uri());

        let rate = provider.fetch_rate("JPY", "HKD").await.unwrap();
        assert_eq!(rate.rate, 0.0523);
        assert!(rate.last_update.is_none());
        assert!(rate.provider.is_none());
    }
}
