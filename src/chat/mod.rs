//! Conversational boundaries: completion client, chat log, responders
//!
//! Everything here talks to the chat completion endpoint. The responders
//! compose the user-facing answer for `general` and `realtime` utterances;
//! the writer and classifier back the automation and routing layers.

mod classifier;
mod client;
mod log;
mod prompts;
mod realtime;
mod responder;
mod writer;

pub use classifier::LlmClassifier;
pub use client::{ChatClient, ChatMessage};
pub use log::ChatLog;
pub use realtime::RealtimeResponder;
pub use responder::{ChatResponders, GeneralResponder};
pub use writer::ContentWriter;
