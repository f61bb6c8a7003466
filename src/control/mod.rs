//! Control loop and per-utterance pipeline
//!
//! The control loop polls the microphone trigger and runs at most one
//! utterance pipeline at a time. A run walks the assistant through
//! `Listening -> Thinking -> (Searching) -> Answering` and always hands
//! `Available` back to the loop, whatever path it exits on.

mod console;
mod pipeline;

pub use console::{ConsoleSpeech, ConsoleVoice};
pub use pipeline::{ResponseComposer, UtterancePipeline};

use crate::status::{AssistantStatus, MicTrigger, Slot, StatusChannel};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{error, info};

/// Produce one raw utterance. External speech input boundary.
pub trait SpeechInput: Send + Sync {
    fn capture(&self) -> crate::Result<String>;
}

/// Turn one utterance into ordered command strings. External classifier
/// boundary; called once per run, no retry.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, utterance: &str) -> crate::Result<Vec<String>>;
}

/// Render the assistant's answer. External speech output boundary.
pub trait SpeechOutput: Send + Sync {
    fn speak(&self, text: &str) -> crate::Result<()>;
}

/// Long-lived loop deciding when a new pipeline run may start.
pub struct ControlLoop {
    status: Arc<StatusChannel>,
    pipeline: UtterancePipeline,
    poll_interval: Duration,
    running: Arc<AtomicBool>,
}

impl ControlLoop {
    pub fn new(
        status: Arc<StatusChannel>,
        pipeline: UtterancePipeline,
        poll_interval: Duration,
    ) -> Self {
        Self {
            status,
            pipeline,
            poll_interval,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Handle that stops the loop at its next poll when cleared.
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Spawn the loop on its own thread with its own runtime.
    pub fn start(self) -> JoinHandle<()> {
        std::thread::spawn(move || {
            let runtime = match Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    error!("Failed to create control loop runtime: {}", e);
                    return;
                }
            };

            info!("Control loop started");
            while self.running.load(Ordering::SeqCst) {
                self.step(&runtime);
            }
            info!("Control loop stopped");
        })
    }

    /// One poll cycle.
    ///
    /// Runs the pipeline at most once, and only when the trigger is armed
    /// and no run is already in flight. After a run, the trigger must clear
    /// before the next one may fire.
    pub fn step(&self, runtime: &Runtime) {
        self.status.poll_mirror(Slot::MicTrigger);

        if self.status.mic_trigger() == MicTrigger::Idle {
            if self.status.assistant_status().is_busy() {
                // Heal stale state left by an interrupted run.
                self.status.set_assistant_status(AssistantStatus::Available);
            } else {
                let _ = self
                    .status
                    .wait_for(Slot::MicTrigger, self.poll_interval, |v| {
                        MicTrigger::parse(v) == MicTrigger::Armed
                    });
            }
            return;
        }

        if self.status.assistant_status().is_busy() {
            // A run is still in flight; refuse double entry.
            let _ = self
                .status
                .wait_for(Slot::AssistantStatus, self.poll_interval, |v| {
                    !AssistantStatus::parse(v).is_busy()
                });
            return;
        }

        runtime.block_on(self.pipeline.run());

        // One arm, one run.
        while self.running.load(Ordering::SeqCst) {
            self.status.poll_mirror(Slot::MicTrigger);
            if self.status.mic_trigger() == MicTrigger::Idle {
                break;
            }
            let _ = self
                .status
                .wait_for(Slot::MicTrigger, self.poll_interval, |v| {
                    MicTrigger::parse(v) == MicTrigger::Idle
                });
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::automation::testing::{FakeApps, FakeKeys, FakeWeb, FailingContent};
    use crate::automation::Automation;
    use crate::dispatch::{Dispatcher, ResponseMode};
    use parking_lot::Mutex;
    use std::path::PathBuf;

    /// Speech input returning a fixed utterance and counting captures.
    pub struct FixedSpeech {
        pub utterance: String,
        pub captures: Mutex<usize>,
    }

    impl FixedSpeech {
        pub fn new(utterance: &str) -> Arc<Self> {
            Arc::new(Self {
                utterance: utterance.to_string(),
                captures: Mutex::new(0),
            })
        }
    }

    impl SpeechInput for FixedSpeech {
        fn capture(&self) -> crate::Result<String> {
            *self.captures.lock() += 1;
            Ok(self.utterance.clone())
        }
    }

    /// Speech input that fails at the boundary.
    pub struct DeafSpeech;

    impl SpeechInput for DeafSpeech {
        fn capture(&self) -> crate::Result<String> {
            Err(crate::ValetError::SpeechError("no input device".to_string()))
        }
    }

    /// Classifier returning fixed commands.
    pub struct FixedClassifier(pub Vec<String>);

    impl FixedClassifier {
        pub fn new(commands: &[&str]) -> Arc<Self> {
            Arc::new(Self(commands.iter().map(|s| s.to_string()).collect()))
        }
    }

    #[async_trait]
    impl IntentClassifier for FixedClassifier {
        async fn classify(&self, _utterance: &str) -> crate::Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    /// Speech output recording what was spoken.
    #[derive(Default)]
    pub struct RecordingVoice {
        pub spoken: Mutex<Vec<String>>,
    }

    impl SpeechOutput for RecordingVoice {
        fn speak(&self, text: &str) -> crate::Result<()> {
            self.spoken.lock().push(text.to_string());
            Ok(())
        }
    }

    /// Composer echoing the mode and query instead of calling a model.
    pub struct EchoComposer;

    #[async_trait]
    impl ResponseComposer for EchoComposer {
        async fn compose(&self, mode: ResponseMode, query: &str) -> crate::Result<String> {
            Ok(format!("{mode:?} answer to {query}"))
        }
    }

    pub fn test_pipeline(
        status: Arc<StatusChannel>,
        speech: Arc<dyn SpeechInput>,
        classifier: Arc<dyn IntentClassifier>,
        voice: Arc<dyn SpeechOutput>,
    ) -> UtterancePipeline {
        let automation = Arc::new(Automation::new(
            Arc::new(FakeApps::default()),
            Arc::new(FakeWeb::default()),
            Arc::new(FailingContent),
            Arc::new(FakeKeys::default()),
            vec!["chrome".to_string()],
            PathBuf::from("/tmp/valet-control-tests"),
        ));
        UtterancePipeline::new(
            status,
            speech,
            classifier,
            voice,
            Arc::new(EchoComposer),
            Dispatcher::new(automation),
            "User",
            "Valet",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    fn looper(
        status: Arc<StatusChannel>,
        speech: Arc<FixedSpeech>,
    ) -> (ControlLoop, Arc<FixedSpeech>) {
        let pipeline = test_pipeline(
            Arc::clone(&status),
            Arc::clone(&speech) as Arc<dyn SpeechInput>,
            FixedClassifier::new(&["system mute"]),
            Arc::new(RecordingVoice::default()),
        );
        (
            ControlLoop::new(status, pipeline, Duration::from_millis(10)),
            speech,
        )
    }

    #[test]
    fn test_idle_trigger_runs_nothing() {
        let status = Arc::new(StatusChannel::in_memory());
        let (control, speech) = looper(Arc::clone(&status), FixedSpeech::new("mute the sound"));
        let runtime = Runtime::new().unwrap();

        control.step(&runtime);
        assert_eq!(*speech.captures.lock(), 0);
    }

    #[test]
    fn test_idle_poll_heals_stale_status() {
        let status = Arc::new(StatusChannel::in_memory());
        status.set_assistant_status(AssistantStatus::Thinking);

        let (control, _) = looper(Arc::clone(&status), FixedSpeech::new("x"));
        let runtime = Runtime::new().unwrap();

        control.step(&runtime);
        assert_eq!(status.assistant_status(), AssistantStatus::Available);
    }

    #[test]
    fn test_busy_status_refuses_second_run() {
        let status = Arc::new(StatusChannel::in_memory());
        status.set_mic_trigger(MicTrigger::Armed);
        status.set_assistant_status(AssistantStatus::Thinking);

        let (control, speech) = looper(Arc::clone(&status), FixedSpeech::new("mute the sound"));
        let runtime = Runtime::new().unwrap();

        control.step(&runtime);
        assert_eq!(*speech.captures.lock(), 0, "pipeline must not start while busy");
    }

    #[test]
    fn test_armed_trigger_runs_once_and_waits_for_clear() {
        let status = Arc::new(StatusChannel::in_memory());
        status.set_mic_trigger(MicTrigger::Armed);

        let (control, speech) = looper(Arc::clone(&status), FixedSpeech::new("mute the sound"));
        let runtime = Runtime::new().unwrap();

        // The input source clears the trigger shortly after the run.
        let clearer = Arc::clone(&status);
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(30));
            clearer.set_mic_trigger(MicTrigger::Idle);
        });

        control.step(&runtime);
        handle.join().unwrap();

        assert_eq!(*speech.captures.lock(), 1);
        assert_eq!(status.assistant_status(), AssistantStatus::Available);
        assert_eq!(status.mic_trigger(), MicTrigger::Idle);

        // The next poll with an idle trigger starts nothing.
        control.step(&runtime);
        assert_eq!(*speech.captures.lock(), 1);
    }
}
