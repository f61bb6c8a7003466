//! LLM-backed intent classifier.
//!
//! Turns one raw utterance into the ordered command strings the dispatch
//! layer consumes.

use super::client::{ChatClient, ChatMessage};
use super::prompts;
use crate::control::IntentClassifier;
use crate::{Result, ValetError};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

pub struct LlmClassifier {
    client: Arc<ChatClient>,
}

impl LlmClassifier {
    pub fn new(client: Arc<ChatClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IntentClassifier for LlmClassifier {
    async fn classify(&self, utterance: &str) -> Result<Vec<String>> {
        let messages = [
            ChatMessage::system(prompts::CLASSIFIER_SYSTEM),
            ChatMessage::user(utterance),
        ];
        let response = self
            .client
            .complete(&messages)
            .await
            .map_err(|e| ValetError::ClassifyError(e.to_string()))?;

        let commands = parse_commands(&response);
        if commands.is_empty() {
            return Err(ValetError::ClassifyError(format!(
                "no commands in classifier response {response:?}"
            )));
        }
        debug!("Classified {:?} as {:?}", utterance, commands);
        Ok(commands)
    }
}

/// Split a classifier response into individual lowercase command strings.
fn parse_commands(response: &str) -> Vec<String> {
    response
        .split(&[',', '\n'])
        .map(|part| part.trim().to_lowercase())
        .filter(|part| !part.is_empty())
        .collect()
}
