//! Prefix-based command routing.
//!
//! A command string carries a prefix tag followed by a free-text argument.
//! Prefixes are matched case-sensitively in a fixed priority order; the first
//! match wins. `general` and `realtime` are response signals consumed by the
//! pipeline, not automation commands.

/// Automation actions a command can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    OpenApp,
    CloseApp,
    PlayMedia,
    WriteContent,
    WebSearch,
    VideoSearch,
    SystemControl,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenApp => write!(f, "open"),
            Self::CloseApp => write!(f, "close"),
            Self::PlayMedia => write!(f, "play"),
            Self::WriteContent => write!(f, "content"),
            Self::WebSearch => write!(f, "google search"),
            Self::VideoSearch => write!(f, "youtube search"),
            Self::SystemControl => write!(f, "system"),
        }
    }
}

/// How the non-automation part of the reply should be composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    General,
    Realtime,
}

/// Result of routing one command string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Dispatch to an action handler with the extracted argument.
    Action { kind: ActionKind, argument: String },
    /// Response signal; composed upstream, never dispatched.
    Signal { mode: ResponseMode, query: String },
    /// Recognized but deliberately not dispatched.
    Suppressed,
    /// No prefix matched.
    Unroutable,
}

enum Target {
    Act(ActionKind),
    Sig(ResponseMode),
}

/// Prefix table in priority order; first match wins.
const PREFIXES: &[(&str, Target)] = &[
    ("open", Target::Act(ActionKind::OpenApp)),
    ("close", Target::Act(ActionKind::CloseApp)),
    ("play", Target::Act(ActionKind::PlayMedia)),
    ("content", Target::Act(ActionKind::WriteContent)),
    ("google search", Target::Act(ActionKind::WebSearch)),
    ("youtube search", Target::Act(ActionKind::VideoSearch)),
    ("system", Target::Act(ActionKind::SystemControl)),
    ("general", Target::Sig(ResponseMode::General)),
    ("realtime", Target::Sig(ResponseMode::Realtime)),
];

/// Sub-phrases of `open` that route to no handler at all.
const SUPPRESSED: &[&str] = &["open it", "open file"];

/// Classify one command string.
pub fn route(command: &str) -> Route {
    if SUPPRESSED.iter().any(|p| command.starts_with(p)) {
        return Route::Suppressed;
    }

    for (prefix, target) in PREFIXES {
        if let Some(rest) = command.strip_prefix(prefix) {
            let argument = rest.trim().to_string();
            return match target {
                Target::Act(kind) => Route::Action {
                    kind: *kind,
                    argument,
                },
                Target::Sig(mode) => Route::Signal {
                    mode: *mode,
                    query: argument,
                },
            };
        }
    }

    Route::Unroutable
}
