//! Per-utterance pipeline.
//!
//! One run: capture -> classify -> dispatch -> compose -> speak, publishing
//! each phase to the status channel. `Available` is restored by a drop guard
//! so every exit path, early returns included, hands the loop back exactly
//! one terminal transition.

use super::{IntentClassifier, SpeechInput, SpeechOutput};
use crate::dispatch::{route, Dispatcher, HandlerOutcome, ResponseMode, Route};
use crate::status::{AssistantStatus, Slot, StatusChannel};
use crate::utils::text::normalize_query;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Compose the user-facing answer for a `general` or `realtime` utterance.
#[async_trait]
pub trait ResponseComposer: Send + Sync {
    async fn compose(&self, mode: ResponseMode, query: &str) -> crate::Result<String>;
}

pub struct UtterancePipeline {
    status: Arc<StatusChannel>,
    speech: Arc<dyn SpeechInput>,
    classifier: Arc<dyn IntentClassifier>,
    voice: Arc<dyn SpeechOutput>,
    composer: Arc<dyn ResponseComposer>,
    dispatcher: Dispatcher,
    user_name: String,
    assistant_name: String,
}

impl UtterancePipeline {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        status: Arc<StatusChannel>,
        speech: Arc<dyn SpeechInput>,
        classifier: Arc<dyn IntentClassifier>,
        voice: Arc<dyn SpeechOutput>,
        composer: Arc<dyn ResponseComposer>,
        dispatcher: Dispatcher,
        user_name: impl Into<String>,
        assistant_name: impl Into<String>,
    ) -> Self {
        Self {
            status,
            speech,
            classifier,
            voice,
            composer,
            dispatcher,
            user_name: user_name.into(),
            assistant_name: assistant_name.into(),
        }
    }

    /// Execute one full run.
    pub async fn run(&self) {
        let run_id = Uuid::new_v4();
        info!("Utterance run {} started", run_id);
        let _guard = AvailabilityGuard::new(Arc::clone(&self.status));

        self.status.set_assistant_status(AssistantStatus::Listening);
        let utterance = match self.speech.capture() {
            Ok(u) => u.trim().to_string(),
            Err(e) => {
                warn!("Speech capture failed: {}", e);
                return;
            }
        };
        if utterance.is_empty() {
            return;
        }
        self.status.set(
            Slot::LastUserText,
            &format!("{}: {}", self.user_name, utterance),
        );

        self.status.set_assistant_status(AssistantStatus::Thinking);
        let commands = match self.classifier.classify(&utterance).await {
            Ok(c) => c,
            Err(e) => {
                warn!("Classification failed: {}", e);
                self.finish(&e.user_message());
                return;
            }
        };
        debug!("Classified {:?} into {:?}", utterance, commands);

        let plan = response_plan(&commands);
        let outcomes = self.dispatcher.dispatch(&commands).await;

        let answer = match plan {
            Some((mode, query)) => {
                if mode == ResponseMode::Realtime {
                    self.status.set_assistant_status(AssistantStatus::Searching);
                }
                match self.composer.compose(mode, &normalize_query(&query)).await {
                    Ok(answer) => answer,
                    Err(e) => {
                        warn!("Response composition failed: {}", e);
                        e.user_message()
                    }
                }
            }
            // Command-only utterance: confirm the automation outcomes and
            // return control to the loop.
            None => summarize_outcomes(&outcomes),
        };

        self.finish(&answer);
        debug!("Utterance run {} finished", run_id);
    }

    fn finish(&self, answer: &str) {
        self.status.set(
            Slot::LastAssistantText,
            &format!("{}: {}", self.assistant_name, answer),
        );
        self.status.set_assistant_status(AssistantStatus::Answering);
        if let Err(e) = self.voice.speak(answer) {
            warn!("Speech output failed: {}", e);
        }
    }
}

/// Restores `Available` when dropped.
struct AvailabilityGuard {
    status: Arc<StatusChannel>,
}

impl AvailabilityGuard {
    fn new(status: Arc<StatusChannel>) -> Self {
        Self { status }
    }
}

impl Drop for AvailabilityGuard {
    fn drop(&mut self) {
        self.status.set_assistant_status(AssistantStatus::Available);
    }
}

/// Decide how the reply should be composed.
///
/// `realtime` outranks `general` when both are present; the queries of both
/// are merged into a single question. `None` means a command-only utterance.
fn response_plan(commands: &[String]) -> Option<(ResponseMode, String)> {
    let mut general = false;
    let mut realtime = false;
    let mut queries = Vec::new();

    for command in commands {
        if let Route::Signal { mode, query } = route(command) {
            match mode {
                ResponseMode::General => general = true,
                ResponseMode::Realtime => realtime = true,
            }
            if !query.is_empty() {
                queries.push(query);
            }
        }
    }

    if !general && !realtime {
        return None;
    }
    let mode = if realtime {
        ResponseMode::Realtime
    } else {
        ResponseMode::General
    };
    Some((mode, queries.join(" and ")))
}

/// Confirmation line for a command-only utterance, carrying any handler
/// payloads (e.g. where generated content was saved).
fn summarize_outcomes(outcomes: &[HandlerOutcome]) -> String {
    if outcomes.is_empty() {
        return "Sorry, I could not act on that.".to_string();
    }

    let failed = outcomes.iter().filter(|o| !o.success).count();
    let mut summary = if failed == 0 {
        "Done.".to_string()
    } else {
        format!("Done, but {} of {} actions failed.", failed, outcomes.len())
    };

    for payload in outcomes.iter().filter_map(|o| o.payload.as_deref()) {
        summary.push(' ');
        summary.push_str(payload);
    }
    summary
}
