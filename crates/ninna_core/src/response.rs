//! The assembled story response.

use crate::{AudioClip, ContinuityState, Language, StoryPayload};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything the caller receives for one generated story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryResponse {
    /// Stable identifier of the persisted story.
    pub story_id: Uuid,
    /// The sanitized story payload.
    pub story: StoryPayload,
    /// Narration audio, absent when every synthesis step failed.
    pub audio: Option<AudioClip>,
    /// Voice label that produced the audio, if any.
    pub voice: Option<String>,
    /// Narration language.
    pub language: Language,
    /// Target duration the story was shaped for.
    pub duration_minutes: u8,
    /// When the story was generated.
    pub created_at: DateTime<Utc>,
    /// Stories left in today's quota; `None` for premium accounts.
    pub remaining_quota: Option<u32>,
    /// Continuity saved for the next sequel, when extraction succeeded.
    pub continuity: Option<ContinuityState>,
}
