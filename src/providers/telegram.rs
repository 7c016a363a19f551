use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::core::{Notifier, OutboundMessage};

use super::USER_AGENT;

/// Sends messages to one chat through the Telegram Bot API.
pub struct TelegramNotifier {
    http: reqwest::Client,
    base_url: String,
    bot_token: String,
    chat_id: String,
}

#[derive(Debug, Serialize)]
struct SendMessageForm<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
    disable_web_page_preview: bool,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(base_url: &str, bot_token: &str, chat_id: &str) -> Result<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(TelegramNotifier {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            bot_token: bot_token.to_string(),
            chat_id: chat_id.to_string(),
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    #[instrument(name = "TelegramSend", skip_all)]
    async fn send(&self, message: &OutboundMessage) -> Result<()> {
        // The token is part of the path, keep it out of logs and errors.
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.bot_token);
        let form = SendMessageForm {
            chat_id: &self.chat_id,
            text: &message.text,
            parse_mode: "HTML",
            disable_web_page_preview: true,
        };
        debug!(
            chat_id = %self.chat_id,
            chars = message.text.chars().count(),
            "Sending message"
        );

        let response = self
            .http
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| e.without_url())
            .context("Telegram sendMessage request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let description = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.description)
                .unwrap_or(body);
            bail!("Telegram sendMessage failed: {status} {description}");
        }
        debug!("Message delivered");
        Ok(())
    }
}

/// Prints messages to stdout instead of delivering them.
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn send(&self, message: &OutboundMessage) -> Result<()> {
        println!("{}\n", message.text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "123456:test-token";

    #[tokio::test]
    async fn test_successful_send() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendMessage")))
            .and(body_string_contains("chat_id=-1001"))
            .and(body_string_contains("parse_mode=HTML"))
            .and(body_string_contains("disable_web_page_preview=true"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"ok":true,"result":{}}"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let notifier = TelegramNotifier::new(&mock_server.uri(), TOKEN, "-1001").unwrap();
        notifier
            .send(&OutboundMessage::new("hello gold"))
            .await
            .expect("send should succeed");
    }

    #[tokio::test]
    async fn test_text_is_form_encoded() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("text=%E2%9C%85+A%26B"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let notifier = TelegramNotifier::new(&mock_server.uri(), TOKEN, "42").unwrap();
        notifier
            .send(&OutboundMessage::new("✅ A&B"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_error_status_is_failure() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string(
                r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
            ))
            .mount(&mock_server)
            .await;

        let notifier = TelegramNotifier::new(&mock_server.uri(), TOKEN, "42").unwrap();
        let err = notifier
            .send(&OutboundMessage::new("hello"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Telegram sendMessage failed: 400 Bad Request Bad Request: chat not found"
        );
        assert!(!format!("{err:#}").contains(TOKEN));
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_kept() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&mock_server)
            .await;

        let notifier = TelegramNotifier::new(&mock_server.uri(), TOKEN, "42").unwrap();
        let err = notifier
            .send(&OutboundMessage::new("hello"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Telegram sendMessage failed: 502 Bad Gateway Bad Gateway"
        );
    }
}
