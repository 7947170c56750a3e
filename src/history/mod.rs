// Conversation history records and session continuation resolution

use serde::{Deserialize, Serialize};

/// One prior turn supplied by the host.
///
/// The `UUID`, when present, identifies a remote session checkpoint the
/// turn was answered under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "User")]
    pub user: String,

    #[serde(rename = "Message")]
    pub message: String,

    #[serde(rename = "UUID", skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

impl HistoryEntry {
    pub fn new(user: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            message: message.into(),
            uuid: None,
        }
    }

    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }
}

/// Where this invocation sits in the lifecycle of a remote session.
///
/// The host does not flag session state explicitly; it is derived from the
/// shape of the history it sends. A two-entry history (one exchange after
/// title generation) means the session is being established for the first
/// time and has nothing to look up yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionContinuation {
    /// No history: a brand-new session, nothing to look up or persist.
    Fresh,
    /// First real exchange: there is a key to persist the new session
    /// under, but no prior checkpoint to resume.
    Establishing { update: Option<String> },
    /// Normal continuation: resume from `search`, persist under `update`.
    Resuming {
        search: Option<String>,
        update: Option<String>,
    },
}

impl SessionContinuation {
    /// Key to look the prior session up under, if any.
    pub fn search_key(&self) -> Option<&str> {
        match self {
            SessionContinuation::Resuming { search, .. } => search.as_deref(),
            _ => None,
        }
    }

    /// Key to persist the returned session metadata under, if any.
    pub fn update_key(&self) -> Option<&str> {
        match self {
            SessionContinuation::Establishing { update } => update.as_deref(),
            SessionContinuation::Resuming { update, .. } => update.as_deref(),
            SessionContinuation::Fresh => None,
        }
    }
}

/// What actually gets sent to the remote service.
///
/// While a session is being established the whole transcript travels
/// forward, not just the current prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedPrompt {
    Text(String),
    Transcript(Vec<HistoryEntry>),
}

impl ResolvedPrompt {
    /// Every message text under consideration, for file reference scanning.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            ResolvedPrompt::Text(text) => vec![text.as_str()],
            ResolvedPrompt::Transcript(entries) => {
                entries.iter().map(|e| e.message.as_str()).collect()
            }
        }
    }

    /// Render the outgoing message text. Transcripts are serialized as a
    /// JSON array of turns.
    pub fn to_message_text(&self) -> String {
        match self {
            ResolvedPrompt::Text(text) => text.clone(),
            ResolvedPrompt::Transcript(entries) => {
                serde_json::to_string(entries).unwrap_or_default()
            }
        }
    }
}

/// Resolve the history into a continuation state and the prompt to send.
///
/// - Empty history: fresh session, prompt passes through unchanged.
/// - One or two entries: session-establishing. The prompt is appended to
///   the transcript (same speaker as the first entry) and the whole
///   transcript is sent. With two entries, the second entry's UUID is the
///   key to persist under; a single entry is the title-generation turn
///   and persists nothing.
/// - Three or more entries: normal continuation. The third-from-last
///   entry's UUID locates the cached checkpoint, the last entry's UUID is
///   where the refreshed metadata goes.
///
/// A missing UUID on a governing entry yields `None` for that key rather
/// than an error.
pub fn resolve(history: &[HistoryEntry], prompt: &str) -> (ResolvedPrompt, SessionContinuation) {
    match history.len() {
        0 => (
            ResolvedPrompt::Text(prompt.to_string()),
            SessionContinuation::Fresh,
        ),
        1 | 2 => {
            let update = if history.len() == 2 {
                history[1].uuid.clone()
            } else {
                None
            };
            let mut transcript = history.to_vec();
            transcript.push(HistoryEntry::new(history[0].user.clone(), prompt));
            (
                ResolvedPrompt::Transcript(transcript),
                SessionContinuation::Establishing { update },
            )
        }
        len => (
            ResolvedPrompt::Text(prompt.to_string()),
            SessionContinuation::Resuming {
                search: history[len - 3].uuid.clone(),
                update: history[len - 1].uuid.clone(),
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(user: &str, message: &str, uuid: Option<&str>) -> HistoryEntry {
        HistoryEntry {
            user: user.to_string(),
            message: message.to_string(),
            uuid: uuid.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_history_is_fresh() {
        let (prompt, continuation) = resolve(&[], "hello");
        assert_eq!(prompt, ResolvedPrompt::Text("hello".to_string()));
        assert_eq!(continuation, SessionContinuation::Fresh);
        assert!(continuation.search_key().is_none());
        assert!(continuation.update_key().is_none());
    }

    #[test]
    fn test_single_entry_is_title_generation() {
        let history = vec![entry("u", "m1", Some("A"))];
        let (prompt, continuation) = resolve(&history, "p");

        assert_eq!(continuation, SessionContinuation::Establishing { update: None });
        match prompt {
            ResolvedPrompt::Transcript(entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[1], HistoryEntry::new("u", "p"));
            }
            other => panic!("expected transcript, got {:?}", other),
        }
    }

    #[test]
    fn test_two_entries_establish_session() {
        let history = vec![entry("u", "m1", Some("A")), entry("u", "m2", Some("B"))];
        let (prompt, continuation) = resolve(&history, "p");

        assert!(continuation.search_key().is_none());
        assert_eq!(continuation.update_key(), Some("B"));
        match prompt {
            ResolvedPrompt::Transcript(entries) => {
                assert_eq!(entries.len(), 3);
                assert_eq!(entries[2].user, "u");
                assert_eq!(entries[2].message, "p");
                assert_eq!(entries[2].uuid, None);
            }
            other => panic!("expected transcript, got {:?}", other),
        }
    }

    #[test]
    fn test_long_history_resumes() {
        let history = vec![
            entry("u", "m1", Some("A")),
            entry("a", "m2", Some("B")),
            entry("u", "m3", Some("C")),
            entry("a", "m4", Some("D")),
            entry("u", "m5", Some("E")),
        ];
        let (prompt, continuation) = resolve(&history, "p");

        assert_eq!(prompt, ResolvedPrompt::Text("p".to_string()));
        assert_eq!(continuation.search_key(), Some("C"));
        assert_eq!(continuation.update_key(), Some("E"));
    }

    #[test]
    fn test_missing_uuid_resolves_to_none() {
        let history = vec![
            entry("u", "m1", None),
            entry("a", "m2", None),
            entry("u", "m3", Some("E")),
        ];
        let (_, continuation) = resolve(&history, "p");
        assert!(continuation.search_key().is_none());
        assert_eq!(continuation.update_key(), Some("E"));
    }

    #[test]
    fn test_entry_wire_names() {
        let json = serde_json::to_string(&entry("u", "m", Some("A"))).unwrap();
        assert!(json.contains("\"User\""));
        assert!(json.contains("\"Message\""));
        assert!(json.contains("\"UUID\""));

        let back: HistoryEntry =
            serde_json::from_str(r#"{"User":"u","Message":"m"}"#).unwrap();
        assert_eq!(back.uuid, None);
    }

    #[test]
    fn test_transcript_message_text_is_json() {
        let prompt = ResolvedPrompt::Transcript(vec![entry("u", "m", None)]);
        let text = prompt.to_message_text();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["Message"], "m");
    }
}
