//! Repository backend behavior.

use chrono::{Duration, Utc};
use ninna_core::{
    ChildAttributes, ContinuityState, ControlSettings, Language, StoryPayload, StoryRequest,
};
use ninna_storage::{MemoryRepository, StoryRecord, StoryRepository};
use uuid::Uuid;

fn request() -> StoryRequest {
    StoryRequest {
        parent_email: "a@b.com".into(),
        child: ChildAttributes {
            name: "Sofia".into(),
            age: 5,
            mood: String::new(),
            interests: vec![],
        },
        controls: ControlSettings::default(),
        language: Language::Italian,
        target_duration_minutes: 7,
        sequel: false,
        previous_story_id: None,
        voice: None,
        style: None,
        tone: None,
        educational_topic: None,
        generate_panels: false,
    }
}

fn story(child_id: Uuid, identity_id: Uuid, age_minutes: i64) -> StoryRecord {
    StoryRecord {
        id: Uuid::new_v4(),
        identity_id,
        child_id,
        language: Language::Italian,
        duration_minutes: 7,
        request: request(),
        payload: StoryPayload::default(),
        provider: "stub".into(),
        audio: None,
        voice: None,
        created_at: Utc::now() - Duration::minutes(age_minutes),
    }
}

#[tokio::test]
async fn identity_is_created_once_per_email_hash() {
    let repo = MemoryRepository::new();
    let first = repo.get_or_create_identity("abc123").await.unwrap();
    let second = repo.get_or_create_identity("abc123").await.unwrap();
    assert_eq!(first.id, second.id);

    let other = repo.get_or_create_identity("def456").await.unwrap();
    assert_ne!(first.id, other.id);
}

#[tokio::test]
async fn premium_flag_is_the_only_mutable_identity_attribute() {
    let repo = MemoryRepository::new();
    let identity = repo.get_or_create_identity("abc123").await.unwrap();
    assert!(!identity.premium);

    repo.set_premium(identity.id, true).await.unwrap();
    let reloaded = repo.get_or_create_identity("abc123").await.unwrap();
    assert!(reloaded.premium);
    assert_eq!(reloaded.id, identity.id);
    assert_eq!(reloaded.created_at, identity.created_at);

    // Unknown identities are an error, not a silent no-op.
    assert!(repo.set_premium(Uuid::new_v4(), true).await.is_err());
}

#[tokio::test]
async fn child_upsert_is_last_write_wins() {
    let repo = MemoryRepository::new();
    let identity = repo.get_or_create_identity("abc").await.unwrap();

    let first = repo
        .upsert_child(
            identity.id,
            "alias",
            5,
            Language::Italian,
            &["dinosauri".into()],
            ControlSettings::default(),
        )
        .await
        .unwrap();
    let relaxed = ControlSettings {
        no_scary: false,
        ..ControlSettings::default()
    };
    let second = repo
        .upsert_child(
            identity.id,
            "alias",
            6,
            Language::English,
            &["stelle".into()],
            relaxed,
        )
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.age, 6);
    assert_eq!(second.language, Language::English);
    assert_eq!(second.interests, vec!["stelle".to_string()]);
    assert!(!second.controls.no_scary);
}

#[tokio::test]
async fn latest_story_orders_by_created_at() {
    let repo = MemoryRepository::new();
    let identity_id = Uuid::new_v4();
    let child_id = Uuid::new_v4();

    let older = story(child_id, identity_id, 60);
    let newer = story(child_id, identity_id, 5);
    let newer_id = newer.id;

    // Insertion order deliberately reversed.
    repo.create_story(newer).await.unwrap();
    repo.create_story(older).await.unwrap();

    let latest = repo.latest_story_for_child(child_id).await.unwrap().unwrap();
    assert_eq!(latest.id, newer_id);

    assert!(
        repo.latest_story_for_child(Uuid::new_v4())
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn continuity_round_trips_through_latest_story() {
    let repo = MemoryRepository::new();
    let identity_id = Uuid::new_v4();
    let child_id = Uuid::new_v4();

    let record = story(child_id, identity_id, 10);
    let story_id = record.id;
    repo.create_story(record).await.unwrap();

    let state = ContinuityState {
        summary: "Sofia ha incontrato una volpe gentile.".into(),
        characters: vec!["Sofia".into(), "Volpe".into()],
        moral: Some("La gentilezza apre ogni porta.".into()),
        unresolved_threads: vec![],
        sequel_hook: Some("La volpe promette una sorpresa.".into()),
    };
    repo.save_continuity(story_id, state.clone()).await.unwrap();

    let loaded = repo.latest_continuity(child_id).await.unwrap().unwrap();
    assert_eq!(loaded, state);
}

#[tokio::test]
async fn latest_continuity_absent_when_latest_story_has_none() {
    let repo = MemoryRepository::new();
    let identity_id = Uuid::new_v4();
    let child_id = Uuid::new_v4();

    let older = story(child_id, identity_id, 60);
    let older_id = older.id;
    repo.create_story(older).await.unwrap();
    repo.save_continuity(older_id, ContinuityState::default())
        .await
        .unwrap();

    // A newer story without saved state shadows the older one.
    repo.create_story(story(child_id, identity_id, 1))
        .await
        .unwrap();
    assert!(repo.latest_continuity(child_id).await.unwrap().is_none());
}
