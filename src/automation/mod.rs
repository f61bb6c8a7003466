//! Action handlers for automation commands
//!
//! Each handler is a single-argument operation behind an external capability
//! seam: OS app launch/terminate, browser navigation, web search, content
//! generation, and key-input simulation. Handlers never observe each other's
//! state; the dispatcher isolates their failures.

mod apps;
mod system;
mod web;

pub use apps::DesktopApps;
pub use system::{MediaKey, RdevInput};
pub use web::{HttpWeb, SearchHit};

use crate::dispatch::ActionKind;
use crate::{Result, ValetError};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Launch and terminate locally installed applications.
pub trait AppGateway: Send + Sync {
    /// Launch an application by fuzzy name match.
    /// `Ok(false)` means no local match; that is not an error.
    fn launch(&self, name: &str) -> Result<bool>;

    /// Terminate a running application by fuzzy name match.
    /// `Ok(false)` means nothing matched.
    fn terminate(&self, name: &str) -> Result<bool>;
}

/// Web search and browser navigation.
#[async_trait]
pub trait WebGateway: Send + Sync {
    /// Search the web and return extracted result hits, best first.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;

    /// Hand a URL or file path to the platform opener.
    fn open_external(&self, target: &str) -> Result<()>;
}

/// Text generation for the content handler.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, topic: &str) -> Result<String>;
}

/// Key-input simulation for system audio control.
pub trait KeyInput: Send + Sync {
    fn tap(&self, key: MediaKey) -> Result<()>;
}

/// Outcome a handler reports back to the dispatcher.
///
/// `success: false` is a reported failure (e.g. nothing to close); boundary
/// faults are returned as `Err` instead and caught at the dispatch layer.
#[derive(Debug, Clone)]
pub struct ActionReport {
    pub success: bool,
    pub detail: Option<String>,
}

impl ActionReport {
    pub fn ok() -> Self {
        Self {
            success: true,
            detail: None,
        }
    }

    pub fn ok_with(detail: impl Into<String>) -> Self {
        Self {
            success: true,
            detail: Some(detail.into()),
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            detail: None,
        }
    }
}

/// The handler suite, wired to its capability gateways.
pub struct Automation {
    apps: Arc<dyn AppGateway>,
    web: Arc<dyn WebGateway>,
    content: Arc<dyn ContentGenerator>,
    input: Arc<dyn KeyInput>,
    protected_apps: Vec<String>,
    content_dir: PathBuf,
}

impl Automation {
    pub fn new(
        apps: Arc<dyn AppGateway>,
        web: Arc<dyn WebGateway>,
        content: Arc<dyn ContentGenerator>,
        input: Arc<dyn KeyInput>,
        protected_apps: Vec<String>,
        content_dir: PathBuf,
    ) -> Self {
        Self {
            apps,
            web,
            content,
            input,
            protected_apps,
            content_dir,
        }
    }

    /// Run the handler for one routed action.
    pub async fn execute(&self, kind: ActionKind, argument: String) -> Result<ActionReport> {
        debug!("Executing {} with argument {:?}", kind, argument);
        match kind {
            ActionKind::OpenApp => self.open_app(&argument).await,
            ActionKind::CloseApp => self.close_app(&argument).await,
            ActionKind::PlayMedia => self.play_media(&argument),
            ActionKind::WebSearch => self.web_search(&argument),
            ActionKind::VideoSearch => self.video_search(&argument),
            ActionKind::WriteContent => self.write_content(&argument).await,
            ActionKind::SystemControl => self.system_control(&argument).await,
        }
    }

    /// Launch a known app; fall back to opening the top web result for the
    /// name. The fallback is best-effort: success is reported once the open
    /// is attempted, without verifying the destination loaded.
    async fn open_app(&self, name: &str) -> Result<ActionReport> {
        let apps = Arc::clone(&self.apps);
        let target = name.to_string();
        let launched = tokio::task::spawn_blocking(move || apps.launch(&target))
            .await
            .map_err(|e| ValetError::LaunchError(e.to_string()))??;

        if launched {
            info!("Launched {}", name);
            return Ok(ActionReport::ok());
        }

        debug!("No local match for {:?}, falling back to web search", name);
        let hits = self.web.search(name).await?;
        let first = hits
            .first()
            .ok_or_else(|| ValetError::WebError(format!("no search results for '{name}'")))?;
        self.web.open_external(&first.url)?;
        Ok(ActionReport::ok())
    }

    /// Terminate a running app unless it is on the protected list.
    async fn close_app(&self, name: &str) -> Result<ActionReport> {
        if self.protected_apps.iter().any(|p| name.contains(p)) {
            debug!("Refusing to close protected app {:?}", name);
            return Ok(ActionReport::ok());
        }

        let apps = Arc::clone(&self.apps);
        let target = name.to_string();
        let closed = tokio::task::spawn_blocking(move || apps.terminate(&target))
            .await
            .map_err(|e| ValetError::CloseError(e.to_string()))??;

        if closed {
            info!("Closed {}", name);
            Ok(ActionReport::ok())
        } else {
            Ok(ActionReport::failed())
        }
    }

    fn play_media(&self, query: &str) -> Result<ActionReport> {
        let url = format!(
            "https://www.youtube.com/results?search_query={}",
            query.replace(' ', "+")
        );
        self.web.open_external(&url)?;
        Ok(ActionReport::ok())
    }

    fn web_search(&self, query: &str) -> Result<ActionReport> {
        let url = format!("https://www.google.com/search?q={}", query.replace(' ', "+"));
        self.web.open_external(&url)?;
        Ok(ActionReport::ok())
    }

    fn video_search(&self, query: &str) -> Result<ActionReport> {
        let url = format!(
            "https://www.youtube.com/results?search_query={}",
            query.replace(' ', "+")
        );
        self.web.open_external(&url)?;
        Ok(ActionReport::ok())
    }

    /// Generate content for a topic, persist it, and open it for the user.
    /// Generation failures propagate; the dispatcher records them as a
    /// failed outcome without touching sibling handlers.
    async fn write_content(&self, topic: &str) -> Result<ActionReport> {
        let text = self.content.generate(topic).await?;

        std::fs::create_dir_all(&self.content_dir)?;
        let path = self
            .content_dir
            .join(format!("{}.txt", crate::utils::text::normalize_topic(topic)));
        std::fs::write(&path, &text)?;
        info!("Saved generated content to {}", path.display());

        if let Err(e) = self.web.open_external(&path.display().to_string()) {
            warn!("Could not open generated content: {}", e);
        }
        Ok(ActionReport::ok_with(format!(
            "Wrote about {} and saved it to {}",
            topic,
            path.display()
        )))
    }

    /// Map the fixed system vocabulary to media key taps. Unrecognized
    /// commands are a silent no-op reported as success.
    async fn system_control(&self, command: &str) -> Result<ActionReport> {
        let key = match command {
            "mute" | "unmute" => MediaKey::VolumeMute,
            "volume up" => MediaKey::VolumeUp,
            "volume down" => MediaKey::VolumeDown,
            other => {
                debug!("Ignoring unrecognized system command: {:?}", other);
                return Ok(ActionReport::ok());
            }
        };

        let input = Arc::clone(&self.input);
        tokio::task::spawn_blocking(move || input.tap(key))
            .await
            .map_err(|e| ValetError::InputError(e.to_string()))??;
        Ok(ActionReport::ok())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use parking_lot::Mutex;

    /// App gateway over fixed installed/running name lists, recording calls.
    #[derive(Default)]
    pub struct FakeApps {
        pub installed: Vec<String>,
        pub running: Vec<String>,
        pub launch_calls: Mutex<Vec<String>>,
        pub terminate_calls: Mutex<Vec<String>>,
    }

    impl FakeApps {
        pub fn with_installed(names: &[&str]) -> Self {
            Self {
                installed: names.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            }
        }

        pub fn with_running(names: &[&str]) -> Self {
            Self {
                running: names.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl AppGateway for FakeApps {
        fn launch(&self, name: &str) -> Result<bool> {
            self.launch_calls.lock().push(name.to_string());
            Ok(self.installed.iter().any(|a| apps::name_matches(a, name)))
        }

        fn terminate(&self, name: &str) -> Result<bool> {
            self.terminate_calls.lock().push(name.to_string());
            Ok(self.running.iter().any(|a| apps::name_matches(a, name)))
        }
    }

    /// Web gateway returning canned hits, recording searches and opens.
    #[derive(Default)]
    pub struct FakeWeb {
        pub hits: Vec<SearchHit>,
        pub searches: Mutex<Vec<String>>,
        pub opened: Mutex<Vec<String>>,
    }

    impl FakeWeb {
        pub fn with_hit(title: &str, url: &str) -> Self {
            Self {
                hits: vec![SearchHit {
                    title: title.to_string(),
                    url: url.to_string(),
                }],
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl WebGateway for FakeWeb {
        async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
            self.searches.lock().push(query.to_string());
            Ok(self.hits.clone())
        }

        fn open_external(&self, target: &str) -> Result<()> {
            self.opened.lock().push(target.to_string());
            Ok(())
        }
    }

    /// Content generator returning a fixed body.
    pub struct FakeContent(pub String);

    #[async_trait]
    impl ContentGenerator for FakeContent {
        async fn generate(&self, _topic: &str) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    /// Content generator that always faults at the boundary.
    pub struct FailingContent;

    #[async_trait]
    impl ContentGenerator for FailingContent {
        async fn generate(&self, _topic: &str) -> Result<String> {
            Err(ValetError::ContentError("generation unavailable".to_string()))
        }
    }

    /// Key input recording taps.
    #[derive(Default)]
    pub struct FakeKeys {
        pub taps: Mutex<Vec<MediaKey>>,
    }

    impl KeyInput for FakeKeys {
        fn tap(&self, key: MediaKey) -> Result<()> {
            self.taps.lock().push(key);
            Ok(())
        }
    }
}
