pub mod automation;
pub mod chat;
pub mod config;
pub mod control;
pub mod dispatch;
pub mod status;
pub mod utils;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ValetError {
    #[error("Speech input error: {0}")]
    SpeechError(String),

    #[error("Classification error: {0}")]
    ClassifyError(String),

    #[error("App launch error: {0}")]
    LaunchError(String),

    #[error("App close error: {0}")]
    CloseError(String),

    #[error("Web request error: {0}")]
    WebError(String),

    #[error("Content generation error: {0}")]
    ContentError(String),

    #[error("Input simulation error: {0}")]
    InputError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<std::io::Error> for ValetError {
    fn from(e: std::io::Error) -> Self {
        ValetError::IOError(e.to_string())
    }
}

impl From<serde_json::Error> for ValetError {
    fn from(e: serde_json::Error) -> Self {
        ValetError::IOError(e.to_string())
    }
}

impl ValetError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Input boundaries may be retried on the next utterance
            ValetError::SpeechError(_) => true,
            ValetError::ClassifyError(_) => true,
            // Handler boundaries are per-command, never fatal to the loop
            ValetError::LaunchError(_) => true,
            ValetError::CloseError(_) => true,
            ValetError::WebError(_) => true,
            ValetError::ContentError(_) => true,
            ValetError::InputError(_) => true,
            ValetError::IOError(_) => false,
            ValetError::ConfigError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            ValetError::SpeechError(_) => {
                "I could not hear that. Please try again.".to_string()
            }
            ValetError::ClassifyError(_) => {
                "I could not work out what you meant. Please rephrase.".to_string()
            }
            ValetError::LaunchError(_) => {
                "I could not open that application.".to_string()
            }
            ValetError::CloseError(_) => {
                "I could not close that application.".to_string()
            }
            ValetError::WebError(_) => {
                "The web request failed. Please check your connection.".to_string()
            }
            ValetError::ContentError(_) => {
                "Content generation failed. Please try again.".to_string()
            }
            ValetError::InputError(_) => {
                "I could not send that system command.".to_string()
            }
            ValetError::IOError(_) => {
                "File system error occurred.".to_string()
            }
            ValetError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ValetError>;
