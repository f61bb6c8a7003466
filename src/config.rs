//! Configuration for the assistant
//!
//! Provides centralized configuration for all components.

use crate::{Result, ValetError};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the chat completion endpoint (OpenAI-compatible)
#[derive(Clone, Debug)]
pub struct LlmConfig {
    /// Completion endpoint URL
    pub api_url: String,

    /// API key (read from the environment, never persisted)
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// Maximum tokens per completion
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            api_key: String::new(),
            model: "llama-3.3-70b-versatile".to_string(),
            max_tokens: 2048,
        }
    }
}

impl LlmConfig {
    /// Create a configuration from environment variables
    ///
    /// Required: VALET_API_KEY
    /// Optional: VALET_API_URL, VALET_MODEL
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("VALET_API_KEY")
            .map_err(|_| ValetError::ConfigError("VALET_API_KEY not set".to_string()))?;
        let mut config = Self::default();
        config.api_key = api_key;
        if let Ok(url) = std::env::var("VALET_API_URL") {
            config.api_url = url;
        }
        if let Ok(model) = std::env::var("VALET_MODEL") {
            config.model = model;
        }
        Ok(config)
    }
}

/// Configuration for the web search boundary
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Search endpoint serving plain HTML results
    pub endpoint: String,

    /// User agent sent with search requests
    pub user_agent: String,

    /// Maximum result links to extract
    pub max_results: usize,

    /// Request timeout
    pub timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://lite.duckduckgo.com/lite/".to_string(),
            user_agent: "Mozilla/5.0 (compatible; Valet/0.1)".to_string(),
            max_results: 5,
            timeout: Duration::from_secs(30),
        }
    }
}

/// A locally installed application the assistant knows how to launch
#[derive(Clone, Debug)]
pub struct KnownApp {
    /// Spoken name, matched fuzzily against the command argument
    pub name: String,

    /// Executable invoked to launch it
    pub exec: String,
}

impl KnownApp {
    pub fn new(name: impl Into<String>, exec: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exec: exec.into(),
        }
    }
}

/// Configuration for the complete assistant
#[derive(Clone, Debug)]
pub struct ValetConfig {
    /// Name the user is addressed by
    pub user_name: String,

    /// Name the assistant answers to
    pub assistant_name: String,

    /// Directory for the chat log and generated content
    pub data_dir: PathBuf,

    /// Directory holding the externally polled status slot files
    pub status_dir: PathBuf,

    /// Control loop idle poll interval
    pub poll_interval: Duration,

    /// Applications that must never be closed (substring match)
    pub protected_apps: Vec<String>,

    /// Registry of locally launchable applications
    pub known_apps: Vec<KnownApp>,

    /// Chat completion settings
    pub llm: LlmConfig,

    /// Web search settings
    pub search: SearchConfig,
}

impl Default for ValetConfig {
    fn default() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("valet");

        Self {
            user_name: "User".to_string(),
            assistant_name: "Valet".to_string(),
            data_dir: base.join("data"),
            status_dir: base.join("status"),
            poll_interval: Duration::from_millis(100),
            protected_apps: vec!["chrome".to_string()],
            known_apps: Vec::new(),
            llm: LlmConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl ValetConfig {
    /// Set both storage directories under a common base
    pub fn with_base_dir(mut self, base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        self.data_dir = base.join("data");
        self.status_dir = base.join("status");
        self
    }

    /// Set the idle poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Add an application to the close exclusion list
    pub fn protect_app(mut self, name: impl Into<String>) -> Self {
        self.protected_apps.push(name.into());
        self
    }

    /// Register a locally launchable application
    pub fn with_known_app(mut self, name: impl Into<String>, exec: impl Into<String>) -> Self {
        self.known_apps.push(KnownApp::new(name, exec));
        self
    }

    /// Set the chat completion configuration
    pub fn with_llm(mut self, llm: LlmConfig) -> Self {
        self.llm = llm;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(ValetError::ConfigError(
                "poll interval must be non-zero".to_string(),
            ));
        }
        if self.search.max_results == 0 {
            return Err(ValetError::ConfigError(
                "search must request at least one result".to_string(),
            ));
        }
        for app in &self.known_apps {
            if app.name.trim().is_empty() || app.exec.trim().is_empty() {
                return Err(ValetError::ConfigError(
                    "known app entries need a name and an executable".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValetConfig::default();
        assert_eq!(config.poll_interval, Duration::from_millis(100));
        assert_eq!(config.protected_apps, vec!["chrome".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ValetConfig::default()
            .with_base_dir("/tmp/valet-test")
            .with_poll_interval(Duration::from_millis(50))
            .protect_app("firefox")
            .with_known_app("calculator", "gnome-calculator");

        assert_eq!(config.data_dir, PathBuf::from("/tmp/valet-test/data"));
        assert_eq!(config.status_dir, PathBuf::from("/tmp/valet-test/status"));
        assert_eq!(config.protected_apps.len(), 2);
        assert_eq!(config.known_apps[0].exec, "gnome-calculator");
    }

    #[test]
    fn test_validate_rejects_zero_poll() {
        let config = ValetConfig::default().with_poll_interval(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_known_app() {
        let config = ValetConfig::default().with_known_app(" ", "");
        assert!(config.validate().is_err());
    }
}
