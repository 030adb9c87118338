//! Stored record types.

use chrono::{DateTime, Utc};
use ninna_core::{AudioClip, ContinuityState, ControlSettings, Language, StoryPayload, StoryRequest};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A guardian account, keyed by the hash of their email.
///
/// Immutable after creation except for the premium flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable identifier.
    pub id: Uuid,
    /// Hex digest of the normalized guardian email.
    pub email_hash: String,
    /// Premium accounts skip the daily quota gate.
    pub premium: bool,
    /// First time this guardian was seen.
    pub created_at: DateTime<Utc>,
}

/// A child profile under one guardian, keyed by a salted name alias.
///
/// Upserts are last-write-wins: siblings sharing a device overwrite
/// each other's mood and interests, and the latest request is the one
/// that matters for tonight's story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildProfile {
    /// Stable identifier.
    pub id: Uuid,
    /// Owning guardian.
    pub identity_id: Uuid,
    /// Salted hex digest of the child's name.
    pub alias_hash: String,
    /// Age in years at last update.
    pub age: u8,
    /// Preferred narration language at last update.
    pub language: Language,
    /// Normalized interests at last update.
    pub interests: Vec<String>,
    /// Content controls at last update.
    pub controls: ControlSettings,
    /// Last upsert time.
    pub updated_at: DateTime<Utc>,
}

/// One generated story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryRecord {
    /// Stable identifier.
    pub id: Uuid,
    /// Guardian the story was generated for.
    pub identity_id: Uuid,
    /// Child the story was personalized for.
    pub child_id: Uuid,
    /// Narration language.
    pub language: Language,
    /// Target duration in minutes.
    pub duration_minutes: u8,
    /// Full originating request, kept for auditability. This is the
    /// only place `previous_story_id` is retained.
    pub request: StoryRequest,
    /// The sanitized payload.
    pub payload: StoryPayload,
    /// Text provider that produced the payload ("openai", "stub", ...).
    pub provider: String,
    /// Narration audio, when a voice adapter produced one.
    pub audio: Option<AudioClip>,
    /// Voice label that narrated it, if audio was produced.
    pub voice: Option<String>,
    /// Generation time, used to order stories per child.
    pub created_at: DateTime<Utc>,
}

/// Continuity state attached to one story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuityRecord {
    /// Story the state was extracted from.
    pub story_id: Uuid,
    /// The extracted state.
    pub state: ContinuityState,
    /// Extraction time.
    pub created_at: DateTime<Utc>,
}
