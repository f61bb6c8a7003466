//! Content generation boundary for the `content` handler.

use super::client::{ChatClient, ChatMessage};
use super::prompts;
use crate::automation::ContentGenerator;
use crate::{Result, ValetError};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Generates written content (letters, essays, notes) via the chat endpoint.
pub struct ContentWriter {
    client: Arc<ChatClient>,
}

impl ContentWriter {
    pub fn new(client: Arc<ChatClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentGenerator for ContentWriter {
    async fn generate(&self, topic: &str) -> Result<String> {
        debug!("Generating content about {:?}", topic);
        let messages = [
            ChatMessage::system(prompts::CONTENT_SYSTEM),
            ChatMessage::user(topic),
        ];
        let text = self.client.complete(&messages).await?;
        if text.trim().is_empty() {
            return Err(ValetError::ContentError(format!(
                "empty generation for '{topic}'"
            )));
        }
        Ok(text)
    }
}
