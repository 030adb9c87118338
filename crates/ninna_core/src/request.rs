//! The validated story generation request.

use crate::Language;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length kept for a single interest entry.
const MAX_INTEREST_LEN: usize = 60;

/// Parent-facing content controls.
///
/// Defaults are the safe configuration: scary content excluded, a
/// kindness lesson woven in, local cultural color encouraged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSettings {
    /// Exclude frightening themes and run the sanitizer.
    #[serde(default = "default_true")]
    pub no_scary: bool,
    /// Weave a kindness lesson into the story.
    #[serde(default = "default_true")]
    pub kindness_lesson: bool,
    /// Prefer settings and references from the child's culture.
    #[serde(default = "default_true")]
    pub cultural_focus: bool,
    /// Include an educational angle.
    #[serde(default)]
    pub educational: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            no_scary: true,
            kindness_lesson: true,
            cultural_focus: true,
            educational: false,
        }
    }
}

/// The child the story is personalized for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChildAttributes {
    /// Child's first name, used in the story and aliased in storage.
    pub name: String,
    /// Age in years.
    pub age: u8,
    /// Tonight's mood, free text ("sleepy", "excited").
    #[serde(default)]
    pub mood: String,
    /// Topics the child likes, normalized before prompting.
    #[serde(default)]
    pub interests: Vec<String>,
}

impl ChildAttributes {
    /// True when the age falls inside the supported 2-12 range.
    pub fn age_is_supported(&self) -> bool {
        (2..=12).contains(&self.age)
    }
}

/// A request for one bedtime story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryRequest {
    /// Guardian email, aliased before it reaches storage.
    pub parent_email: String,
    /// The child the story is for.
    pub child: ChildAttributes,
    /// Content controls.
    #[serde(default)]
    pub controls: ControlSettings,
    /// Narration language.
    #[serde(default)]
    pub language: Language,
    /// Target narration length in minutes.
    #[serde(default = "default_duration")]
    pub target_duration_minutes: u8,
    /// Continue the child's previous story.
    #[serde(default)]
    pub sequel: bool,
    /// Story the sequel follows, recorded for audit only; continuity
    /// always comes from the child's latest saved state.
    #[serde(default)]
    pub previous_story_id: Option<Uuid>,
    /// Preferred narration voice identifier.
    #[serde(default)]
    pub voice: Option<String>,
    /// Storytelling style ("fiaba classica", "avventura").
    #[serde(default)]
    pub style: Option<String>,
    /// Emotional tone ("dolce", "allegro").
    #[serde(default)]
    pub tone: Option<String>,
    /// Topic to teach when `controls.educational` is set.
    #[serde(default)]
    pub educational_topic: Option<String>,
    /// Also produce illustration panel prompts.
    #[serde(default)]
    pub generate_panels: bool,
}

fn default_duration() -> u8 {
    7
}

impl StoryRequest {
    /// True when the duration falls inside the supported 5-10 minute range.
    pub fn duration_is_supported(&self) -> bool {
        (5..=10).contains(&self.target_duration_minutes)
    }
}

/// Normalize a raw interests list: trim whitespace, drop empties, cap
/// entry length, and deduplicate case-insensitively preserving first
/// occurrence order.
///
/// # Examples
///
/// ```
/// use ninna_core::normalize_interests;
///
/// let cleaned = normalize_interests(&[
///     " Dinosauri ".into(),
///     "dinosauri".into(),
///     "".into(),
///     "stelle".into(),
/// ]);
/// assert_eq!(cleaned, vec!["Dinosauri", "stelle"]);
/// ```
pub fn normalize_interests(raw: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    let mut cleaned = Vec::new();
    for entry in raw {
        let trimmed = entry.trim();
        if trimmed.is_empty() {
            continue;
        }
        let capped: String = trimmed.chars().take(MAX_INTEREST_LEN).collect();
        let key = capped.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        cleaned.push(capped);
    }
    cleaned
}
