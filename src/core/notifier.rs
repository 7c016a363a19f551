//! Message delivery abstraction

use anyhow::Result;
use async_trait::async_trait;

/// A chat message body. The chat it goes to is fixed by the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub text: String,
}

impl OutboundMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers one message. Any error means the message was not delivered.
    async fn send(&self, message: &OutboundMessage) -> Result<()>;
}
