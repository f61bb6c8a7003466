//! Shared assistant status surface
//!
//! The status channel is the only communication path between the dispatch
//! pipeline and anything rendering status to the user. In-process consumers
//! get a lock-protected store with change notification; external processes
//! poll one text file per slot.

mod channel;
mod state;

pub use channel::{Slot, StatusChannel};
pub use state::{AssistantStatus, MicTrigger};
