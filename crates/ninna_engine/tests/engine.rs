//! End-to-end pipeline scenarios with fake drivers.

mod common;

use common::{FakeDriver, FakeVoice, story_json};
use ninna_core::{ChildAttributes, ControlSettings, Language, StoryRequest};
use ninna_engine::{
    GenerationOutcome, StoryEngine, SummaryExtractor, TextGateway, VoiceGateway,
};
use ninna_interface::{StoryDriver, VoiceDriver};
use ninna_quota::{MemoryQuotaStore, QuotaLedger};
use ninna_safety::Sanitizer;
use ninna_storage::{AuditEvent, MemoryAuditSink, MemoryRepository, StoryRepository};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

struct Harness {
    engine: StoryEngine,
    repository: Arc<MemoryRepository>,
    audit: Arc<MemoryAuditSink>,
}

fn harness(
    drivers: Vec<Arc<dyn StoryDriver>>,
    voices: Vec<Arc<dyn VoiceDriver>>,
    daily_max: u32,
    premium: bool,
) -> Harness {
    let repository = Arc::new(MemoryRepository::new());
    let audit = Arc::new(MemoryAuditSink::new());
    let named = voices.first().cloned();
    let engine = StoryEngine::new(
        repository.clone(),
        audit.clone(),
        QuotaLedger::new(Arc::new(MemoryQuotaStore::new()), daily_max, premium),
        TextGateway::new(drivers.clone(), TIMEOUT),
        VoiceGateway::new(named, None, vec![], HashMap::new(), TIMEOUT),
        SummaryExtractor::new(drivers, TIMEOUT),
        Sanitizer::with_defaults().unwrap(),
    );
    Harness {
        engine,
        repository,
        audit,
    }
}

fn sofia() -> StoryRequest {
    StoryRequest {
        parent_email: "genitore@example.com".into(),
        child: ChildAttributes {
            name: "Sofia".into(),
            age: 5,
            mood: "sleepy".into(),
            interests: vec!["stelle".into()],
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

fn expect_story(outcome: GenerationOutcome) -> ninna_core::StoryResponse {
    match outcome {
        GenerationOutcome::Story(response) => *response,
        GenerationOutcome::Denied => panic!("expected a story, got quota denial"),
    }
}

#[tokio::test]
async fn offline_deployment_still_tells_a_story() {
    let h = harness(vec![], vec![], 3, false);

    let response = expect_story(h.engine.generate(sofia()).await.unwrap());

    assert!(response.story.is_complete());
    assert!(response.audio.is_none());
    assert_eq!(response.remaining_quota, Some(2));
    assert!(response.continuity.is_some());

    // The story and its continuity both landed in storage.
    let identity = h
        .repository
        .get_or_create_identity(&ninna_core::hash_email("genitore@example.com"))
        .await
        .unwrap();
    let child = h
        .repository
        .upsert_child(
            identity.id,
            &ninna_core::hash_alias("Sofia"),
            5,
            Language::Italian,
            &["stelle".to_string()],
            ControlSettings::default(),
        )
        .await
        .unwrap();
    let saved = h
        .repository
        .latest_story_for_child(child.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(saved.id, response.story_id);
    assert_eq!(saved.provider, "stub");
    assert!(
        h.repository
            .latest_continuity(child.id)
            .await
            .unwrap()
            .is_some()
    );

    assert!(h.audit.events().iter().any(|e| matches!(
        e,
        AuditEvent::StoryGenerated { degraded: true, .. }
    )));
}

#[tokio::test]
async fn provider_output_is_parsed_and_sanitized() {
    let driver = Arc::new(FakeDriver::respond("fake-llm", story_json()));
    let h = harness(vec![driver], vec![], 3, false);

    let response = expect_story(h.engine.generate(sofia()).await.unwrap());

    // "paura" from the model was replaced by the sanitizer.
    assert!(response.story.branch_1.contains("serenità"));
    assert!(!response.story.branch_1.contains("paura"));
    assert!(!h.audit.events().iter().any(|e| matches!(
        e,
        AuditEvent::StoryGenerated { degraded: true, .. }
    )));
}

#[tokio::test]
async fn malformed_output_degrades_to_stub_with_audit_trail() {
    let driver = Arc::new(FakeDriver::respond("fake-llm", "not json at all"));
    let h = harness(vec![driver], vec![], 3, false);

    let response = expect_story(h.engine.generate(sofia()).await.unwrap());

    assert!(response.story.is_complete());
    assert!(h.audit.events().iter().any(|e| matches!(
        e,
        AuditEvent::ProviderFallback { from, to } if from == "fake-llm" && to == "stub"
    )));
}

#[tokio::test]
async fn sequel_prompt_carries_previous_summary() {
    let driver = Arc::new(FakeDriver::respond("fake-llm", story_json()));
    let h = harness(vec![driver.clone()], vec![], 3, false);

    expect_story(h.engine.generate(sofia()).await.unwrap());

    let mut sequel = sofia();
    sequel.sequel = true;
    expect_story(h.engine.generate(sequel).await.unwrap());

    let prompts = driver.seen_prompts();
    // Prompts alternate story/summary per generation; the sequel's
    // story prompt must quote the saved summary.
    let sequel_story_prompt = &prompts[2];
    assert!(sequel_story_prompt.contains("Continue the previous story"));
    assert!(sequel_story_prompt.contains("Sofia guardava le stelle"));
}

#[tokio::test]
async fn first_story_prompt_has_no_continuity_context() {
    let driver = Arc::new(FakeDriver::respond("fake-llm", story_json()));
    let h = harness(vec![driver.clone()], vec![], 3, false);

    let mut request = sofia();
    request.sequel = true; // sequel requested but no previous story exists
    expect_story(h.engine.generate(request).await.unwrap());

    assert!(!driver.seen_prompts()[0].contains("Continue the previous story"));
}

#[tokio::test]
async fn quota_denial_leaves_no_story_behind() {
    let h = harness(vec![], vec![], 1, false);

    expect_story(h.engine.generate(sofia()).await.unwrap());
    let outcome = h.engine.generate(sofia()).await.unwrap();
    assert!(matches!(outcome, GenerationOutcome::Denied));

    let identity = h
        .repository
        .get_or_create_identity(&ninna_core::hash_email("genitore@example.com"))
        .await
        .unwrap();
    let child = h
        .repository
        .upsert_child(
            identity.id,
            &ninna_core::hash_alias("Sofia"),
            5,
            Language::Italian,
            &["stelle".to_string()],
            ControlSettings::default(),
        )
        .await
        .unwrap();

    // Only the first story exists.
    let latest = h
        .repository
        .latest_story_for_child(child.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.provider, "stub");
    assert!(h.audit.events().iter().any(|e| matches!(
        e,
        AuditEvent::QuotaDenied { .. }
    )));
}

#[tokio::test]
async fn premium_accounts_have_no_cap() {
    let h = harness(vec![], vec![], 1, true);

    for _ in 0..5 {
        let response = expect_story(h.engine.generate(sofia()).await.unwrap());
        assert_eq!(response.remaining_quota, None);
    }
}

#[tokio::test]
async fn premium_identities_skip_the_quota_gate() {
    // Capped deployment, but this guardian's account is premium.
    let h = harness(vec![], vec![], 1, false);

    let identity = h
        .repository
        .get_or_create_identity(&ninna_core::hash_email("genitore@example.com"))
        .await
        .unwrap();
    h.repository.set_premium(identity.id, true).await.unwrap();

    for _ in 0..3 {
        let response = expect_story(h.engine.generate(sofia()).await.unwrap());
        assert_eq!(response.remaining_quota, None);
    }
}

#[tokio::test]
async fn audio_attaches_when_a_voice_driver_works() {
    let voice: Arc<dyn VoiceDriver> = Arc::new(FakeVoice::respond("fake-voice", vec![1, 2, 3]));
    let h = harness(vec![], vec![voice], 3, false);

    let mut request = sofia();
    request.voice = Some("luna".into());
    let response = expect_story(h.engine.generate(request).await.unwrap());

    assert!(response.audio.is_some());
    assert_eq!(response.voice.as_deref(), Some("luna"));

    // The clip is persisted with the story, not just returned.
    let identity = h
        .repository
        .get_or_create_identity(&ninna_core::hash_email("genitore@example.com"))
        .await
        .unwrap();
    let child = h
        .repository
        .upsert_child(
            identity.id,
            &ninna_core::hash_alias("Sofia"),
            5,
            Language::Italian,
            &["stelle".to_string()],
            ControlSettings::default(),
        )
        .await
        .unwrap();
    let saved = h
        .repository
        .latest_story_for_child(child.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(saved.audio, response.audio);
    assert_eq!(saved.voice.as_deref(), Some("luna"));
}

#[tokio::test]
async fn invalid_requests_are_rejected_up_front() {
    let h = harness(vec![], vec![], 3, false);

    let mut no_name = sofia();
    no_name.child.name = "  ".into();
    assert!(h.engine.generate(no_name).await.is_err());

    let mut too_young = sofia();
    too_young.child.age = 1;
    assert!(h.engine.generate(too_young).await.is_err());

    let mut too_long = sofia();
    too_long.target_duration_minutes = 30;
    assert!(h.engine.generate(too_long).await.is_err());
}
