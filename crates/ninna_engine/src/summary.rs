//! Continuity extraction from generated stories.

use crate::{build_summary_request, extract_json, parse_json};
use ninna_core::{ContinuityState, StoryPayload};
use ninna_interface::StoryDriver;
use regex::Regex;
use serde::Deserialize;
use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const FALLBACK_SUMMARY_MAX_CHARS: usize = 260;
const FALLBACK_MAX_CHARACTERS: usize = 4;
const FALLBACK_MORAL: &str = "La gentilezza illumina la notte";

#[derive(Debug, Deserialize)]
struct SummaryDto {
    summary: String,
    #[serde(default)]
    characters: Vec<String>,
    #[serde(default)]
    moral: Option<String>,
    #[serde(default)]
    unresolved_threads: Vec<String>,
}

/// Derives continuity state from a finished story.
///
/// Primary path asks the same drivers as the text gateway with an
/// extraction prompt; when they all fail a deterministic heuristic
/// takes over, so derivation never fails.
pub struct SummaryExtractor {
    drivers: Vec<Arc<dyn StoryDriver>>,
    timeout: Duration,
}

impl SummaryExtractor {
    /// Build an extractor over drivers in fallback order.
    pub fn new(drivers: Vec<Arc<dyn StoryDriver>>, timeout: Duration) -> Self {
        Self { drivers, timeout }
    }

    /// Derive the continuity state for one story.
    #[instrument(skip(self, payload))]
    pub async fn derive(&self, payload: &StoryPayload) -> ContinuityState {
        let story_text = payload.full_text();
        let request = build_summary_request(&story_text);

        let mut state = None;
        for driver in &self.drivers {
            let provider = driver.provider_name();
            match tokio::time::timeout(self.timeout, driver.generate(&request)).await {
                Ok(Ok(response)) => {
                    match extract_json(&response.text).and_then(|json| parse_json::<SummaryDto>(&json))
                    {
                        Ok(dto) => {
                            debug!(provider, "Continuity extracted");
                            state = Some(ContinuityState {
                                summary: dto.summary,
                                characters: dto.characters,
                                moral: dto.moral,
                                unresolved_threads: dto.unresolved_threads,
                                sequel_hook: None,
                            });
                            break;
                        }
                        Err(e) => warn!(provider, error = %e, "Summary output unusable"),
                    }
                }
                Ok(Err(e)) => warn!(provider, error = %e, "Summary generation failed"),
                Err(_) => warn!(provider, "Summary generation timed out"),
            }
        }

        let mut state = state.unwrap_or_else(|| {
            debug!("Using heuristic summary");
            heuristic_summary(&story_text)
        });
        // The story names its own sequel hook; that beats anything the
        // extraction model invents.
        state.sequel_hook = payload.suggested_sequel_hook.clone();
        state
    }
}

/// Deterministic summary used when no driver cooperates.
fn heuristic_summary(story_text: &str) -> ContinuityState {
    let cleaned = story_text.trim();
    if cleaned.is_empty() {
        return ContinuityState {
            moral: Some(FALLBACK_MORAL.to_string()),
            ..ContinuityState::default()
        };
    }

    let sentences = split_sentences(cleaned);
    let mut summary = if sentences.is_empty() {
        cleaned.to_string()
    } else {
        sentences[..sentences.len().min(2)].join(" ")
    };
    if summary.chars().count() > FALLBACK_SUMMARY_MAX_CHARS {
        summary = summary.chars().take(FALLBACK_SUMMARY_MAX_CHARS).collect();
        summary.truncate(summary.trim_end().len());
    }

    let mut characters: Vec<String> = {
        let mut names: Vec<String> = name_regex()
            .find_iter(cleaned)
            .map(|m| m.as_str().trim_matches(['\'', '"']).to_string())
            .collect();
        names.sort();
        names.dedup();
        names
    };
    characters.truncate(FALLBACK_MAX_CHARACTERS);

    ContinuityState {
        summary,
        characters,
        moral: Some(FALLBACK_MORAL.to_string()),
        unresolved_threads: vec![],
        sequel_hook: None,
    }
}

/// Capitalized tokens of three letters or more are name candidates.
fn name_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"\b[A-Z][A-Za-zÀ-ÖØ-öø-ÿ']{2,}\b").expect("Valid name regex")
    })
}

/// Split on sentence-ending punctuation followed by whitespace.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') && chars.peek().is_none_or(|c| c.is_whitespace()) {
            let sentence = current.trim().to_string();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            current.clear();
        }
    }
    let tail = current.trim().to_string();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_takes_first_two_sentences() {
        let state = heuristic_summary(
            "Sofia trovò una lanterna. La lanterna parlava piano! Poi accaddero altre cose. E altre ancora.",
        );
        assert_eq!(state.summary, "Sofia trovò una lanterna. La lanterna parlava piano!");
        assert_eq!(state.moral.as_deref(), Some(FALLBACK_MORAL));
        assert!(state.unresolved_threads.is_empty());
    }

    #[test]
    fn heuristic_caps_summary_length() {
        let long = "Una frase davvero molto lunga che continua. ".repeat(20);
        let state = heuristic_summary(&long);
        assert!(state.summary.chars().count() <= FALLBACK_SUMMARY_MAX_CHARS);
    }

    #[test]
    fn heuristic_collects_at_most_four_names() {
        let state = heuristic_summary(
            "Anna vide Bruno e Carla vicino al fiume. Dario e Elena arrivarono dopo, insieme a Franco.",
        );
        assert_eq!(state.characters.len(), 4);
        // Sorted and deduplicated.
        assert_eq!(state.characters[0], "Anna");
    }

    #[test]
    fn sentence_split_handles_missing_trailing_punctuation() {
        let sentences = split_sentences("Prima frase. Seconda senza punto");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1], "Seconda senza punto");
    }
}
