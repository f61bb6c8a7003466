//! Concurrent fan-out dispatcher.
//!
//! Routes each command in a batch and schedules every matched handler as an
//! independent task. All tasks are joined before the batch returns; a
//! handler failing, erroring, or panicking never cancels its siblings.

use super::router::{route, ActionKind, Route};
use crate::automation::Automation;
use futures::future::join_all;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Result of one dispatched action.
#[derive(Debug, Clone)]
pub struct HandlerOutcome {
    /// The originating command string.
    pub command: String,

    /// The action it routed to.
    pub kind: ActionKind,

    /// Whether the handler reported success.
    pub success: bool,

    /// User-facing text produced by the handler, if any.
    pub payload: Option<String>,

    /// Error text when the handler faulted.
    pub error: Option<String>,
}

impl HandlerOutcome {
    fn failed(command: String, kind: ActionKind, error: String) -> Self {
        Self {
            command,
            kind,
            success: false,
            payload: None,
            error: Some(error),
        }
    }
}

/// Fans matched handlers out as concurrent tasks and gathers their outcomes.
pub struct Dispatcher {
    automation: Arc<Automation>,
}

impl Dispatcher {
    pub fn new(automation: Arc<Automation>) -> Self {
        Self { automation }
    }

    /// Dispatch a batch of classified commands.
    ///
    /// Outcomes are ordered by submission, not completion. Unroutable
    /// commands are dropped with a diagnostic; signal and suppressed
    /// commands produce no outcome. An empty result set is success.
    pub async fn dispatch(&self, commands: &[String]) -> Vec<HandlerOutcome> {
        type Scheduled = (String, ActionKind, JoinHandle<crate::Result<crate::automation::ActionReport>>);

        let mut scheduled: Vec<Scheduled> = Vec::new();
        for command in commands {
            match route(command) {
                Route::Action { kind, argument } => {
                    let automation = Arc::clone(&self.automation);
                    let handle =
                        tokio::spawn(async move { automation.execute(kind, argument).await });
                    scheduled.push((command.clone(), kind, handle));
                }
                Route::Signal { .. } => {}
                Route::Suppressed => {
                    debug!("Suppressed command: {}", command);
                }
                Route::Unroutable => {
                    warn!("No handler found for command: {}", command);
                }
            }
        }

        // Gather at the barrier; completion order does not matter, outcomes
        // keep submission order.
        let joined = join_all(
            scheduled
                .into_iter()
                .map(|(command, kind, handle)| async move { (command, kind, handle.await) }),
        )
        .await;

        let mut outcomes = Vec::with_capacity(joined.len());
        for (command, kind, joined_result) in joined {
            let outcome = match joined_result {
                Ok(Ok(report)) => HandlerOutcome {
                    command,
                    kind,
                    success: report.success,
                    payload: report.detail,
                    error: None,
                },
                Ok(Err(e)) => {
                    warn!("Handler for {:?} failed: {}", kind, e);
                    HandlerOutcome::failed(command, kind, e.to_string())
                }
                Err(e) => {
                    warn!("Handler task for {:?} aborted: {}", kind, e);
                    HandlerOutcome::failed(command, kind, format!("handler task aborted: {e}"))
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }
}
