use crossbeam_channel::{bounded, Receiver, Sender};

/// Channels connecting the input frontend to the utterance pipeline.
pub struct UtteranceChannels {
    pub utterance_tx: Sender<String>,
    pub utterance_rx: Receiver<String>,
}

impl UtteranceChannels {
    pub fn new(buffer_size: usize) -> Self {
        let (utterance_tx, utterance_rx) = bounded(buffer_size);
        Self {
            utterance_tx,
            utterance_rx,
        }
    }
}

impl Default for UtteranceChannels {
    fn default() -> Self {
        Self::new(8)
    }
}
