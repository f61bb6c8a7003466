//! Persistent chat log.
//!
//! Role/content history shared between the responders and saved to a JSON
//! file after every exchange so it survives restarts.

use super::client::ChatMessage;
use crate::Result;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub struct ChatLog {
    messages: Arc<RwLock<Vec<ChatMessage>>>,
    path: PathBuf,
}

impl ChatLog {
    /// Open the log at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let messages = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Chat log at {} is corrupt, starting fresh: {}", path.display(), e);
                Vec::new()
            }),
            Err(_) => Vec::new(),
        };

        Ok(Self {
            messages: Arc::new(RwLock::new(messages)),
            path,
        })
    }

    /// Append one user/assistant exchange and persist the log.
    pub fn record(&self, user: &str, assistant: &str) -> Result<()> {
        let mut messages = self.messages.write();
        messages.push(ChatMessage::user(user));
        messages.push(ChatMessage::assistant(assistant));
        let serialized = serde_json::to_string_pretty(&*messages)?;
        drop(messages);

        std::fs::write(&self.path, serialized)?;
        Ok(())
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.read().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}
