//! Narration language allow-list.

use serde::{Deserialize, Serialize};

/// The fixed allow-list of narration languages.
///
/// Requests carrying any other language code are rejected upstream;
/// parsing here is the defensive second line.
///
/// # Examples
///
/// ```
/// use ninna_core::Language;
/// use std::str::FromStr;
///
/// let lang = Language::from_str("it").unwrap();
/// assert_eq!(lang, Language::Italian);
/// assert_eq!(lang.code(), "it");
/// assert!(Language::from_str("xx").is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    /// Arabic ("ar")
    #[serde(rename = "ar")]
    #[strum(serialize = "ar")]
    Arabic,
    /// English ("en")
    #[serde(rename = "en")]
    #[strum(serialize = "en")]
    English,
    /// Spanish ("es")
    #[serde(rename = "es")]
    #[strum(serialize = "es")]
    Spanish,
    /// French ("fr")
    #[serde(rename = "fr")]
    #[strum(serialize = "fr")]
    French,
    /// Italian ("it")
    #[serde(rename = "it")]
    #[strum(serialize = "it")]
    Italian,
}

impl Language {
    /// Two-letter language code used on the wire and in voice maps.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Arabic => "ar",
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::Italian => "it",
        }
    }

    /// English name used inside generation prompts.
    pub fn english_name(&self) -> &'static str {
        match self {
            Language::Arabic => "Arabic",
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::Italian => "Italian",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Italian
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_allow_listed_codes() {
        for (code, lang) in [
            ("ar", Language::Arabic),
            ("en", Language::English),
            ("es", Language::Spanish),
            ("fr", Language::French),
            ("it", Language::Italian),
        ] {
            assert_eq!(Language::from_str(code).unwrap(), lang);
        }
    }

    #[test]
    fn rejects_unknown_codes() {
        assert!(Language::from_str("de").is_err());
        assert!(Language::from_str("").is_err());
    }

    #[test]
    fn serde_round_trip_uses_codes() {
        let json = serde_json::to_string(&Language::Italian).unwrap();
        assert_eq!(json, "\"it\"");
        let back: Language = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Language::Italian);
    }
}
