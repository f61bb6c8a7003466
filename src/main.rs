use anyhow::Result;
use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use valet::automation::{Automation, DesktopApps, HttpWeb, RdevInput};
use valet::chat::{
    ChatClient, ChatLog, ChatResponders, ContentWriter, GeneralResponder, LlmClassifier,
    RealtimeResponder,
};
use valet::config::{LlmConfig, ValetConfig};
use valet::control::{ConsoleSpeech, ConsoleVoice, ControlLoop, UtterancePipeline};
use valet::dispatch::Dispatcher;
use valet::status::{AssistantStatus, MicTrigger, Slot, StatusChannel};
use valet::utils::channels::UtteranceChannels;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "valet=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Valet assistant");

    let mut config = ValetConfig::default();
    match LlmConfig::from_env() {
        Ok(llm) => config.llm = llm,
        Err(e) => warn!("{}; running with unauthenticated defaults", e),
    }
    config.validate()?;
    std::fs::create_dir_all(&config.data_dir)?;

    let status = Arc::new(StatusChannel::with_mirror(&config.status_dir)?);
    status.set_mic_trigger(MicTrigger::Idle);
    status.set_assistant_status(AssistantStatus::Available);

    let client = Arc::new(ChatClient::new(config.llm.clone()));
    let log = ChatLog::open(config.data_dir.join("chatlog.json"))?;
    if log.is_empty() {
        status.set(
            Slot::LastAssistantText,
            &format!(
                "{}: Welcome {}. How may I help you?",
                config.assistant_name, config.user_name
            ),
        );
    }

    let web = Arc::new(HttpWeb::new(&config.search)?);
    let automation = Arc::new(Automation::new(
        Arc::new(DesktopApps::new(config.known_apps.clone())),
        Arc::clone(&web) as _,
        Arc::new(ContentWriter::new(Arc::clone(&client))),
        Arc::new(RdevInput::new()),
        config.protected_apps.clone(),
        config.data_dir.clone(),
    ));

    let composer = ChatResponders::new(
        GeneralResponder::new(
            Arc::clone(&client),
            log.clone(),
            &config.user_name,
            &config.assistant_name,
        ),
        RealtimeResponder::new(
            Arc::clone(&client),
            Arc::clone(&web) as _,
            log.clone(),
            &config.user_name,
            &config.assistant_name,
        ),
    );

    let channels = UtteranceChannels::default();
    let pipeline = UtterancePipeline::new(
        Arc::clone(&status),
        Arc::new(ConsoleSpeech::new(channels.utterance_rx.clone())),
        Arc::new(LlmClassifier::new(Arc::clone(&client))),
        Arc::new(ConsoleVoice::new(&config.assistant_name)),
        Arc::new(composer),
        Dispatcher::new(automation),
        &config.user_name,
        &config.assistant_name,
    );

    let control = ControlLoop::new(Arc::clone(&status), pipeline, config.poll_interval);
    let shutdown = control.shutdown_handle();
    let loop_handle = control.start();

    // Console input source: each line arms the trigger, feeds the utterance,
    // and clears the trigger once the run has finished.
    println!("Type a request and press Enter (Ctrl-D to quit).");
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        channels
            .utterance_tx
            .send(line)
            .map_err(|e| anyhow::anyhow!("input channel closed: {e}"))?;
        status.set_mic_trigger(MicTrigger::Armed);

        // Wait for the run to pick up the trigger, then to finish.
        let _ = status.wait_for(Slot::AssistantStatus, Duration::from_secs(5), |v| {
            AssistantStatus::parse(v).is_busy()
        });
        let _ = status.wait_for(Slot::AssistantStatus, Duration::from_secs(300), |v| {
            !AssistantStatus::parse(v).is_busy()
        });
        status.set_mic_trigger(MicTrigger::Idle);
    }

    info!("Input closed, shutting down");
    shutdown.store(false, std::sync::atomic::Ordering::SeqCst);
    status.set_mic_trigger(MicTrigger::Idle);
    let _ = loop_handle.join();

    Ok(())
}
