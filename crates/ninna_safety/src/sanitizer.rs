//! Word-level replacement sanitizer.

use ninna_core::{ControlSettings, StoryPayload};
use ninna_error::{NinnaResult, SafetyError};
use regex::Regex;
use tracing::{debug, instrument};

/// The stock replacement table: frightening vocabulary in the supported
/// languages mapped to gentle synonyms.
pub fn default_replacements() -> Vec<(String, String)> {
    [
        // Italian
        ("morte", "riposo"),
        ("sangue", "rugiada"),
        ("paura", "serenità"),
        ("mostro", "folletto"),
        ("arma", "bacchetta"),
        ("violenza", "dolcezza"),
        // English
        ("dead", "asleep"),
        ("blood", "dew"),
        // Spanish
        ("muerte", "descanso"),
        ("sangre", "rocío"),
        ("miedo", "calma"),
        // French
        ("mort", "repos"),
        ("sang", "rosée"),
        ("peur", "douceur"),
        // Arabic
        ("موت", "نوم"),
        ("دم", "ندى"),
        ("خوف", "هدوء"),
    ]
    .into_iter()
    .map(|(term, synonym)| (term.to_string(), synonym.to_string()))
    .collect()
}

/// Replaces banned vocabulary in story text with safe synonyms.
#[derive(Debug)]
pub struct Sanitizer {
    rules: Vec<(Regex, String)>,
}

impl Sanitizer {
    /// Build a sanitizer from a replacement table.
    ///
    /// # Errors
    ///
    /// Returns an error when a term produces an invalid pattern, or when
    /// a synonym itself matches a banned term; such a table would make
    /// repeated application keep rewriting text.
    pub fn new(table: &[(String, String)]) -> NinnaResult<Self> {
        let mut rules = Vec::with_capacity(table.len());
        for (term, synonym) in table {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(term));
            let regex = Regex::new(&pattern).map_err(|e| {
                SafetyError::new(format!("invalid pattern for term '{}': {}", term, e))
            })?;
            rules.push((regex, synonym.clone()));
        }

        for (_, synonym) in table {
            if let Some((regex, _)) = rules.iter().find(|(regex, _)| regex.is_match(synonym)) {
                return Err(SafetyError::new(format!(
                    "replacement '{}' matches banned pattern '{}'",
                    synonym, regex
                ))
                .into());
            }
        }

        Ok(Self { rules })
    }

    /// Build a sanitizer over the stock table.
    pub fn with_defaults() -> NinnaResult<Self> {
        Self::new(&default_replacements())
    }

    /// Replace every banned term in one text fragment.
    pub fn sanitize_text(&self, text: &str) -> String {
        let mut current = text.to_string();
        for (regex, synonym) in &self.rules {
            current = regex
                .replace_all(&current, |caps: &regex::Captures<'_>| {
                    match_case(&caps[0], synonym)
                })
                .into_owned();
        }
        current
    }

    /// Sanitize a payload under the request's controls.
    ///
    /// A no-op unless `no_scary` is set. Only substitutes words; every
    /// field keeps its shape.
    #[instrument(skip(self, payload))]
    pub fn apply(&self, mut payload: StoryPayload, controls: &ControlSettings) -> StoryPayload {
        if !controls.no_scary {
            return payload;
        }

        let mut replaced = 0usize;
        for field in payload.text_fields_mut() {
            let cleaned = self.sanitize_text(field);
            if cleaned != *field {
                replaced += 1;
                *field = cleaned;
            }
        }
        for entry in payload.list_fields_mut() {
            let cleaned = self.sanitize_text(entry);
            if cleaned != *entry {
                replaced += 1;
                *entry = cleaned;
            }
        }

        if replaced > 0 {
            debug!(fields = replaced, "Sanitized story fields");
        }
        payload
    }
}

/// Carry the matched word's initial capitalization onto the synonym.
fn match_case(matched: &str, synonym: &str) -> String {
    let initial_upper = matched.chars().next().is_some_and(char::is_uppercase);
    if !initial_upper {
        return synonym.to_string();
    }
    let mut chars = synonym.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitizer() -> Sanitizer {
        Sanitizer::with_defaults().unwrap()
    }

    #[test]
    fn replaces_banned_words_case_insensitively() {
        let s = sanitizer();
        assert_eq!(
            s.sanitize_text("La paura della morte"),
            "La serenità della riposo"
        );
        assert_eq!(s.sanitize_text("Paura e buio"), "Serenità e buio");
    }

    #[test]
    fn respects_word_boundaries() {
        let s = sanitizer();
        // "impaurito" and "sanguinoso" contain banned substrings but are
        // not whole-word matches.
        assert_eq!(s.sanitize_text("impaurito"), "impaurito");
        assert_eq!(s.sanitize_text("sanguinoso"), "sanguinoso");
    }

    #[test]
    fn is_idempotent() {
        let s = sanitizer();
        let once = s.sanitize_text("Il mostro aveva paura del sangue.");
        let twice = s.sanitize_text(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn handles_arabic_terms() {
        let s = sanitizer();
        let cleaned = s.sanitize_text("كان هناك خوف كبير");
        assert!(!cleaned.contains("خوف"));
        assert!(cleaned.contains("هدوء"));
    }

    #[test]
    fn rejects_table_that_breaks_idempotency() {
        let table = vec![
            ("paura".to_string(), "morte".to_string()),
            ("morte".to_string(), "riposo".to_string()),
        ];
        assert!(Sanitizer::new(&table).is_err());
    }

    #[test]
    fn apply_honors_no_scary_control() {
        let s = sanitizer();
        let mut payload = StoryPayload::default();
        payload.intro = "C'era un mostro.".into();
        payload.choice_1_options = vec!["Fuggire dalla paura".into()];

        let relaxed = ControlSettings {
            no_scary: false,
            ..ControlSettings::default()
        };
        let untouched = s.apply(payload.clone(), &relaxed);
        assert_eq!(untouched.intro, "C'era un mostro.");

        let strict = ControlSettings::default();
        let cleaned = s.apply(payload, &strict);
        assert_eq!(cleaned.intro, "C'era un folletto.");
        assert_eq!(cleaned.choice_1_options[0], "Fuggire dalla serenità");
    }

    #[test]
    fn apply_covers_panel_prompts() {
        let s = sanitizer();
        let mut payload = StoryPayload::default();
        payload.panel_prompts = vec!["Un mostro spaventoso nel bosco".into()];

        let cleaned = s.apply(payload, &ControlSettings::default());
        assert_eq!(cleaned.panel_prompts[0], "Un folletto spaventoso nel bosco");
    }
}
