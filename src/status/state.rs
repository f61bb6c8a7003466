//! Assistant lifecycle states.
//!
//! Shared between the control loop, the utterance pipeline, and any
//! presentation process polling the status files.

/// Assistant lifecycle status, owned by the pipeline during a run.
///
/// Anything other than `Available` means a run is in flight and the control
/// loop must not start another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssistantStatus {
    #[default]
    Available,
    Listening,
    Thinking,
    Searching,
    Answering,
}

impl AssistantStatus {
    /// Parse a slot value. Unknown or empty values read as `Available` so a
    /// never-written slot does not wedge the loop; the idle self-heal
    /// overwrites stale values anyway.
    pub fn parse(value: &str) -> Self {
        match value.trim().trim_end_matches('.').to_lowercase().as_str() {
            "listening" => Self::Listening,
            "thinking" => Self::Thinking,
            "searching" => Self::Searching,
            "answering" => Self::Answering,
            _ => Self::Available,
        }
    }

    pub fn is_busy(&self) -> bool {
        *self != Self::Available
    }
}

impl std::fmt::Display for AssistantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "Available"),
            Self::Listening => write!(f, "Listening"),
            Self::Thinking => write!(f, "Thinking"),
            Self::Searching => write!(f, "Searching"),
            Self::Answering => write!(f, "Answering"),
        }
    }
}

/// Microphone trigger, owned by the external input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MicTrigger {
    Armed,
    #[default]
    Idle,
}

impl MicTrigger {
    /// Parse a slot value. Accepts the legacy `True`/`False` encoding some
    /// frontends write alongside the canonical `armed`/`idle`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "armed" | "true" => Self::Armed,
            _ => Self::Idle,
        }
    }
}

impl std::fmt::Display for MicTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Armed => write!(f, "armed"),
            Self::Idle => write!(f, "idle"),
        }
    }
}
