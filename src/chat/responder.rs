//! General conversational responder.

use super::client::{ChatClient, ChatMessage};
use super::log::ChatLog;
use super::prompts;
use super::realtime::RealtimeResponder;
use crate::control::ResponseComposer;
use crate::dispatch::ResponseMode;
use crate::utils::text::tidy_answer;
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Composes replies for `general` utterances from the chat history.
pub struct GeneralResponder {
    client: Arc<ChatClient>,
    log: ChatLog,
    user_name: String,
    assistant_name: String,
}

impl GeneralResponder {
    pub fn new(
        client: Arc<ChatClient>,
        log: ChatLog,
        user_name: impl Into<String>,
        assistant_name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            log,
            user_name: user_name.into(),
            assistant_name: assistant_name.into(),
        }
    }

    pub async fn reply(&self, query: &str) -> Result<String> {
        debug!("Composing general reply for {:?}", query);

        let mut messages = vec![
            ChatMessage::system(prompts::chat_system(&self.user_name, &self.assistant_name)),
            ChatMessage::system(prompts::time_preamble()),
        ];
        messages.extend(self.log.messages());
        messages.push(ChatMessage::user(query));

        let answer = tidy_answer(&self.client.complete(&messages).await?);
        self.log.record(query, &answer)?;
        Ok(answer)
    }
}

/// Bundles both responders behind the pipeline's composer seam.
pub struct ChatResponders {
    general: GeneralResponder,
    realtime: RealtimeResponder,
}

impl ChatResponders {
    pub fn new(general: GeneralResponder, realtime: RealtimeResponder) -> Self {
        Self { general, realtime }
    }
}

#[async_trait]
impl ResponseComposer for ChatResponders {
    async fn compose(&self, mode: ResponseMode, query: &str) -> Result<String> {
        match mode {
            ResponseMode::General => self.general.reply(query).await,
            ResponseMode::Realtime => self.realtime.reply(query).await,
        }
    }
}
