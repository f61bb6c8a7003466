//! Text normalization helpers for queries, answers, and file names.

const QUESTION_WORDS: &[&str] = &[
    "how", "what", "who", "where", "when", "why", "which", "whose", "whom", "can you", "what's",
    "where's", "how's",
];

/// Normalize a query for the responders: lowercase, trimmed, ending in a
/// question mark when it reads like a question and a full stop otherwise.
pub fn normalize_query(query: &str) -> String {
    let mut q = query.trim().to_lowercase();
    if q.is_empty() {
        return q;
    }

    while q.ends_with('.') || q.ends_with('?') || q.ends_with('!') {
        q.pop();
    }

    let is_question = QUESTION_WORDS
        .iter()
        .any(|w| q.starts_with(&format!("{w} ")) || q.contains(&format!(" {w} ")));
    q.push(if is_question { '?' } else { '.' });
    q
}

/// Strip blank lines from a model answer.
pub fn tidy_answer(answer: &str) -> String {
    answer
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalize a content topic into a file name stem.
pub fn normalize_topic(topic: &str) -> String {
    topic
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '/' && *c != '\\')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_query_question() {
        assert_eq!(normalize_query("what is the time"), "what is the time?");
        assert_eq!(normalize_query("Tell me how it works."), "tell me how it works?");
    }

    #[test]
    fn test_normalize_query_statement() {
        assert_eq!(normalize_query("open the pod bay doors"), "open the pod bay doors.");
        assert_eq!(normalize_query("do it now!"), "do it now.");
    }

    #[test]
    fn test_normalize_query_empty() {
        assert_eq!(normalize_query("   "), "");
    }

    #[test]
    fn test_tidy_answer_strips_blank_lines() {
        assert_eq!(tidy_answer("a\n\n  \nb\n"), "a\nb");
    }

    #[test]
    fn test_normalize_topic() {
        assert_eq!(normalize_topic("Leave Application"), "leaveapplication");
        assert_eq!(normalize_topic("notes/2024"), "notes2024");
    }
}
