//! Console stand-ins for the speech boundaries.
//!
//! Real speech recognition and synthesis live in external collaborators;
//! these shims let the assistant run text-only from a terminal.

use super::{SpeechInput, SpeechOutput};
use crate::{Result, ValetError};
use crossbeam_channel::Receiver;

/// Speech input fed by the console frontend through a channel.
pub struct ConsoleSpeech {
    utterances: Receiver<String>,
}

impl ConsoleSpeech {
    pub fn new(utterances: Receiver<String>) -> Self {
        Self { utterances }
    }
}

impl SpeechInput for ConsoleSpeech {
    fn capture(&self) -> Result<String> {
        self.utterances
            .recv()
            .map_err(|e| ValetError::SpeechError(e.to_string()))
    }
}

/// Speech output that prints to the terminal.
pub struct ConsoleVoice {
    assistant_name: String,
}

impl ConsoleVoice {
    pub fn new(assistant_name: impl Into<String>) -> Self {
        Self {
            assistant_name: assistant_name.into(),
        }
    }
}

impl SpeechOutput for ConsoleVoice {
    fn speak(&self, text: &str) -> Result<()> {
        println!("{}: {}", self.assistant_name, text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn test_console_speech_receives_utterance() {
        let (tx, rx) = bounded(1);
        let speech = ConsoleSpeech::new(rx);
        tx.send("hello there".to_string()).unwrap();
        assert_eq!(speech.capture().unwrap(), "hello there");
    }

    #[test]
    fn test_console_speech_errors_when_disconnected() {
        let (tx, rx) = bounded::<String>(1);
        drop(tx);
        let speech = ConsoleSpeech::new(rx);
        assert!(speech.capture().is_err());
    }
}
