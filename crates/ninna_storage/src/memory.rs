//! In-memory repository backend.

use crate::{ChildProfile, ContinuityRecord, Identity, StoryRecord, StoryRepository};
use async_trait::async_trait;
use chrono::Utc;
use ninna_core::{ContinuityState, ControlSettings, Language};
use ninna_error::{NinnaResult, StorageError, StorageErrorKind};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Tables {
    identities: HashMap<String, Identity>,
    children: HashMap<(Uuid, String), ChildProfile>,
    stories: Vec<StoryRecord>,
    continuity: HashMap<Uuid, ContinuityRecord>,
}

/// RwLock-backed repository for tests and single-process deployments.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> NinnaResult<std::sync::RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|e| {
            StorageError::new(StorageErrorKind::Unavailable(format!(
                "repository lock poisoned: {}",
                e
            )))
            .into()
        })
    }

    fn write(&self) -> NinnaResult<std::sync::RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|e| {
            StorageError::new(StorageErrorKind::Unavailable(format!(
                "repository lock poisoned: {}",
                e
            )))
            .into()
        })
    }
}

#[async_trait]
impl StoryRepository for MemoryRepository {
    async fn get_or_create_identity(&self, email_hash: &str) -> NinnaResult<Identity> {
        let mut tables = self.write()?;
        if let Some(identity) = tables.identities.get(email_hash) {
            return Ok(identity.clone());
        }
        let identity = Identity {
            id: Uuid::new_v4(),
            email_hash: email_hash.to_string(),
            premium: false,
            created_at: Utc::now(),
        };
        tables
            .identities
            .insert(email_hash.to_string(), identity.clone());
        Ok(identity)
    }

    async fn set_premium(&self, identity_id: Uuid, premium: bool) -> NinnaResult<()> {
        let mut tables = self.write()?;
        match tables
            .identities
            .values_mut()
            .find(|identity| identity.id == identity_id)
        {
            Some(identity) => {
                identity.premium = premium;
                Ok(())
            }
            None => Err(StorageError::new(StorageErrorKind::NotFound(format!(
                "identity {} not found",
                identity_id
            )))
            .into()),
        }
    }

    async fn upsert_child(
        &self,
        identity_id: Uuid,
        alias_hash: &str,
        age: u8,
        language: Language,
        interests: &[String],
        controls: ControlSettings,
    ) -> NinnaResult<ChildProfile> {
        let mut tables = self.write()?;
        let key = (identity_id, alias_hash.to_string());
        let now = Utc::now();
        let profile = match tables.children.get(&key) {
            Some(existing) => ChildProfile {
                age,
                language,
                interests: interests.to_vec(),
                controls,
                updated_at: now,
                ..existing.clone()
            },
            None => ChildProfile {
                id: Uuid::new_v4(),
                identity_id,
                alias_hash: alias_hash.to_string(),
                age,
                language,
                interests: interests.to_vec(),
                controls,
                updated_at: now,
            },
        };
        tables.children.insert(key, profile.clone());
        Ok(profile)
    }

    async fn create_story(&self, record: StoryRecord) -> NinnaResult<()> {
        let mut tables = self.write()?;
        tables.stories.push(record);
        Ok(())
    }

    async fn latest_story_for_child(&self, child_id: Uuid) -> NinnaResult<Option<StoryRecord>> {
        let tables = self.read()?;
        Ok(tables
            .stories
            .iter()
            .filter(|s| s.child_id == child_id)
            .max_by_key(|s| s.created_at)
            .cloned())
    }

    async fn save_continuity(&self, story_id: Uuid, state: ContinuityState) -> NinnaResult<()> {
        let mut tables = self.write()?;
        tables.continuity.insert(
            story_id,
            ContinuityRecord {
                story_id,
                state,
                created_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn continuity_for_story(
        &self,
        story_id: Uuid,
    ) -> NinnaResult<Option<ContinuityState>> {
        let tables = self.read()?;
        Ok(tables.continuity.get(&story_id).map(|r| r.state.clone()))
    }
}
