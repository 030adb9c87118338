//! Continuity state carried between a story and its sequels.

use serde::{Deserialize, Serialize};

/// What a sequel needs to know about the previous story.
///
/// Produced by the summary extractor after each generation and read back
/// when a request asks for a sequel. Every field degrades gracefully: a
/// missing or empty state simply yields a standalone story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ContinuityState {
    /// Short prose recap of the previous story.
    #[serde(default)]
    pub summary: String,
    /// Named characters worth carrying forward.
    #[serde(default)]
    pub characters: Vec<String>,
    /// Moral of the previous story, if one was stated.
    #[serde(default)]
    pub moral: Option<String>,
    /// Plot threads the previous story left open.
    #[serde(default)]
    pub unresolved_threads: Vec<String>,
    /// Hook the previous story suggested for its sequel.
    #[serde(default)]
    pub sequel_hook: Option<String>,
}

impl ContinuityState {
    /// True when the state carries nothing a sequel prompt could use.
    pub fn is_empty(&self) -> bool {
        self.summary.trim().is_empty()
            && self.characters.is_empty()
            && self.moral.is_none()
            && self.unresolved_threads.is_empty()
            && self.sequel_hook.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_empty() {
        assert!(ContinuityState::default().is_empty());
    }

    #[test]
    fn any_field_makes_state_nonempty() {
        let state = ContinuityState {
            sequel_hook: Some("the owl returns".into()),
            ..ContinuityState::default()
        };
        assert!(!state.is_empty());
    }

    #[test]
    fn tolerates_partial_json() {
        let state: ContinuityState =
            serde_json::from_str(r#"{"summary": "A fox slept."}"#).unwrap();
        assert_eq!(state.summary, "A fox slept.");
        assert!(state.characters.is_empty());
    }
}
