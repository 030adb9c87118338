//! Repository trait for story persistence.

use crate::{ChildProfile, Identity, StoryRecord};
use async_trait::async_trait;
use ninna_core::{ContinuityState, ControlSettings, Language};
use ninna_error::NinnaResult;
use uuid::Uuid;

/// Persistence operations the orchestrator needs.
///
/// The in-memory backend serves tests and single-process deployments; a
/// database backend implements the same trait without touching the
/// engine.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Find the identity for an email hash, creating it on first sight.
    async fn get_or_create_identity(&self, email_hash: &str) -> NinnaResult<Identity>;

    /// Flip the premium flag, the one mutable identity attribute.
    async fn set_premium(&self, identity_id: Uuid, premium: bool) -> NinnaResult<()>;

    /// Create or overwrite the child profile for `(identity, alias)`.
    ///
    /// Last write wins on every attribute.
    async fn upsert_child(
        &self,
        identity_id: Uuid,
        alias_hash: &str,
        age: u8,
        language: Language,
        interests: &[String],
        controls: ControlSettings,
    ) -> NinnaResult<ChildProfile>;

    /// Persist a generated story.
    async fn create_story(&self, record: StoryRecord) -> NinnaResult<()>;

    /// The child's most recently created story, if any.
    async fn latest_story_for_child(&self, child_id: Uuid) -> NinnaResult<Option<StoryRecord>>;

    /// Attach continuity state to a story, overwriting any previous state.
    async fn save_continuity(&self, story_id: Uuid, state: ContinuityState) -> NinnaResult<()>;

    /// Continuity state attached to one story.
    async fn continuity_for_story(&self, story_id: Uuid)
    -> NinnaResult<Option<ContinuityState>>;

    /// Continuity of the child's most recent story: absent when the
    /// child has no stories or the latest story carries no state.
    async fn latest_continuity(&self, child_id: Uuid) -> NinnaResult<Option<ContinuityState>> {
        match self.latest_story_for_child(child_id).await? {
            Some(story) => self.continuity_for_story(story.id).await,
            None => Ok(None),
        }
    }
}
