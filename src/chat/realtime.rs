//! Search-grounded responder for `realtime` utterances.

use super::client::{ChatClient, ChatMessage};
use super::log::ChatLog;
use super::prompts;
use crate::automation::{SearchHit, WebGateway};
use crate::utils::text::tidy_answer;
use crate::Result;
use std::sync::Arc;
use tracing::debug;

/// Composes replies grounded on fresh web search results.
pub struct RealtimeResponder {
    client: Arc<ChatClient>,
    web: Arc<dyn WebGateway>,
    log: ChatLog,
    user_name: String,
    assistant_name: String,
}

impl RealtimeResponder {
    pub fn new(
        client: Arc<ChatClient>,
        web: Arc<dyn WebGateway>,
        log: ChatLog,
        user_name: impl Into<String>,
        assistant_name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            web,
            log,
            user_name: user_name.into(),
            assistant_name: assistant_name.into(),
        }
    }

    pub async fn reply(&self, query: &str) -> Result<String> {
        debug!("Composing realtime reply for {:?}", query);
        let hits = self.web.search(query).await?;

        let mut messages = vec![
            ChatMessage::system(prompts::realtime_system(
                &self.user_name,
                &self.assistant_name,
            )),
            ChatMessage::system(sources_block(query, &hits)),
            ChatMessage::system(prompts::time_preamble()),
        ];
        messages.extend(self.log.messages());
        messages.push(ChatMessage::user(query));

        let answer = tidy_answer(&self.client.complete(&messages).await?);
        self.log.record(query, &answer)?;
        Ok(answer)
    }
}

fn sources_block(query: &str, hits: &[SearchHit]) -> String {
    let mut block = format!("The search results for '{query}' are:\n[start]\n");
    for hit in hits {
        block.push_str(&format!("Title: {}\nLink: {}\n\n", hit.title, hit.url));
    }
    block.push_str("[end]");
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_block_format() {
        let hits = vec![
            SearchHit {
                title: "First".to_string(),
                url: "https://a.example".to_string(),
            },
            SearchHit {
                title: "Second".to_string(),
                url: "https://b.example".to_string(),
            },
        ];
        let block = sources_block("today's news", &hits);
        assert!(block.starts_with("The search results for 'today's news' are:\n[start]"));
        assert!(block.contains("Title: First\nLink: https://a.example"));
        assert!(block.ends_with("[end]"));
    }

    #[test]
    fn test_sources_block_empty() {
        let block = sources_block("q", &[]);
        assert_eq!(block, "The search results for 'q' are:\n[start]\n[end]");
    }
}
