//! System prompts for the completion boundaries.

use chrono::Local;

/// System prompt for general conversational replies.
pub fn chat_system(user_name: &str, assistant_name: &str) -> String {
    format!(
        "Hello, I am {user_name}. You are an accurate and advanced AI assistant named \
         {assistant_name} with real-time, up-to-date information from the internet. \
         Answer the question directly and briefly; do not volunteer the time, do not \
         add notes, and never mention your training data."
    )
}

/// System prompt for search-grounded replies.
pub fn realtime_system(user_name: &str, assistant_name: &str) -> String {
    format!(
        "Hello, I am {user_name}. You are an accurate and advanced AI assistant named \
         {assistant_name} with real-time, up-to-date information from the internet. \
         Answer professionally from the provided search results, with proper grammar \
         and punctuation."
    )
}

/// System prompt for the content writer.
pub const CONTENT_SYSTEM: &str =
    "You are a professional content writer. You write letters, applications, essays, \
     notes, songs, poems and code on request. Output only the requested content.";

/// System prompt for the intent classifier.
///
/// The model must emit only command strings from the fixed vocabulary, one or
/// more, comma separated.
pub const CLASSIFIER_SYSTEM: &str = "\
You are a decision model that classifies a user's utterance into commands. \
Respond with one or more commands separated by commas, and nothing else. \
Each command starts with exactly one of these prefixes, followed by the argument:\n\
 - 'general (query)' for conversation answerable without fresh data\n\
 - 'realtime (query)' for questions needing up-to-date information\n\
 - 'open (app name)' to open an application or site\n\
 - 'close (app name)' to close an application\n\
 - 'play (song name)' to play media\n\
 - 'content (topic)' to write content such as a letter or essay\n\
 - 'google search (topic)' to search the web\n\
 - 'youtube search (topic)' to search for videos\n\
 - 'system (mute|unmute|volume up|volume down)' for audio control\n\
An utterance may map to several commands, e.g. 'open chrome and play jazz' \
becomes 'open chrome, play jazz'. When unsure, use 'general (query)'.";

/// Current date and time, offered to the model as context.
pub fn time_preamble() -> String {
    let now = Local::now();
    format!(
        "Use this real-time information if needed:\nDay: {}\nDate: {}\nMonth: {}\nYear: {}\nTime: {} hours, {} minutes, {} seconds.",
        now.format("%A"),
        now.format("%d"),
        now.format("%B"),
        now.format("%Y"),
        now.format("%H"),
        now.format("%M"),
        now.format("%S"),
    )
}
