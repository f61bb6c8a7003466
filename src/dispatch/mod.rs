//! Command routing and concurrent dispatch
//!
//! Takes a batch of classified command strings, routes each by prefix, and
//! fans the matched handlers out as independent tasks joined at a barrier.

mod dispatcher;
mod router;

pub use dispatcher::{Dispatcher, HandlerOutcome};
pub use router::{route, ActionKind, ResponseMode, Route};
