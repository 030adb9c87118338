//! The generation pipeline.

use crate::{SummaryExtractor, TextGateway, VoiceGateway, build_story_request};
use chrono::Utc;
use ninna_core::{StoryRequest, StoryResponse, hash_alias, hash_email, normalize_interests};
use ninna_error::{EngineError, EngineErrorKind, NinnaResult};
use ninna_quota::{QuotaLedger, QuotaOutcome};
use ninna_safety::Sanitizer;
use ninna_storage::{AuditEvent, AuditSink, StoryRecord, StoryRepository};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Outcome of one generation request.
///
/// Quota denial is a first-class outcome, not an error: callers turn it
/// into their own "come back tomorrow" surface.
#[derive(Debug)]
pub enum GenerationOutcome {
    /// A complete story.
    Story(Box<StoryResponse>),
    /// The guardian's daily quota is exhausted.
    Denied,
}

/// Runs a request through the full pipeline: quota gate, continuity
/// lookup, text generation, sanitization, concurrent audio synthesis
/// and summary extraction, persistence, audit.
pub struct StoryEngine {
    repository: Arc<dyn StoryRepository>,
    audit: Arc<dyn AuditSink>,
    quota: QuotaLedger,
    text: TextGateway,
    voice: VoiceGateway,
    summary: SummaryExtractor,
    sanitizer: Sanitizer,
}

impl StoryEngine {
    /// Wire an engine from its collaborators.
    pub fn new(
        repository: Arc<dyn StoryRepository>,
        audit: Arc<dyn AuditSink>,
        quota: QuotaLedger,
        text: TextGateway,
        voice: VoiceGateway,
        summary: SummaryExtractor,
        sanitizer: Sanitizer,
    ) -> Self {
        Self {
            repository,
            audit,
            quota,
            text,
            voice,
            summary,
            sanitizer,
        }
    }

    /// Generate one story.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid request or when the story record
    /// cannot be persisted. Provider failures never surface here; they
    /// degrade to the stub payload or to absent audio.
    #[instrument(skip(self, request), fields(language = %request.language, sequel = request.sequel))]
    pub async fn generate(&self, request: StoryRequest) -> NinnaResult<GenerationOutcome> {
        validate(&request)?;

        let identity = self
            .repository
            .get_or_create_identity(&hash_email(&request.parent_email))
            .await?;

        let today = Utc::now().date_naive();
        let remaining = if identity.premium {
            debug!("Premium identity, quota gate skipped");
            None
        } else {
            match self.quota.authorize(identity.id, today).await? {
                QuotaOutcome::Allowed { remaining } => remaining,
                QuotaOutcome::Denied => {
                    info!("Daily quota exhausted, request rejected");
                    self.record_audit(AuditEvent::QuotaDenied {
                        identity_id: identity.id,
                    })
                    .await;
                    return Ok(GenerationOutcome::Denied);
                }
            }
        };

        let child = self
            .repository
            .upsert_child(
                identity.id,
                &hash_alias(&request.child.name),
                request.child.age,
                request.language,
                &normalize_interests(&request.child.interests),
                request.controls,
            )
            .await?;

        // A missing or unreadable continuity state degrades to a
        // standalone story rather than failing the request.
        let previous = if request.sequel {
            match self.repository.latest_continuity(child.id).await {
                Ok(state) => state,
                Err(e) => {
                    warn!(error = %e, "Continuity lookup failed, generating standalone story");
                    None
                }
            }
        } else {
            None
        };
        let previous_summary = previous.as_ref().and_then(|state| {
            let summary = state.summary.trim();
            (!summary.is_empty()).then(|| summary.to_string())
        });

        let generate_request = build_story_request(&request, previous_summary.as_deref());
        let outcome = self
            .text
            .generate(
                &generate_request,
                request.language,
                request.target_duration_minutes,
            )
            .await;
        for (from, to) in &outcome.fallbacks {
            self.record_audit(AuditEvent::ProviderFallback {
                from: from.clone(),
                to: to.clone(),
            })
            .await;
        }

        let story = self.sanitizer.apply(outcome.payload, &request.controls);

        let narration = story.narration_text();
        let (audio, continuity) = tokio::join!(
            self.voice
                .synthesize(&narration, request.language, request.voice.as_deref()),
            self.summary.derive(&story),
        );

        let story_id = Uuid::new_v4();
        let created_at = Utc::now();
        self.repository
            .create_story(StoryRecord {
                id: story_id,
                identity_id: identity.id,
                child_id: child.id,
                language: request.language,
                duration_minutes: request.target_duration_minutes,
                request: request.clone(),
                payload: story.clone(),
                provider: outcome.provider.clone(),
                audio: audio.clip.clone(),
                voice: audio.voice.clone(),
                created_at,
            })
            .await?;

        // Best-effort: a story without saved continuity is still a story.
        if let Err(e) = self
            .repository
            .save_continuity(story_id, continuity.clone())
            .await
        {
            warn!(error = %e, "Continuity save failed, sequels will restart");
        }

        self.record_audit(AuditEvent::StoryGenerated {
            story_id,
            identity_id: identity.id,
            provider: outcome.provider.clone(),
            degraded: outcome.degraded,
        })
        .await;

        debug!(%story_id, provider = %outcome.provider, "Story pipeline completed");
        Ok(GenerationOutcome::Story(Box::new(StoryResponse {
            story_id,
            story,
            audio: audio.clip,
            voice: audio.voice,
            language: request.language,
            duration_minutes: request.target_duration_minutes,
            created_at,
            remaining_quota: remaining,
            continuity: Some(continuity),
        })))
    }

    async fn record_audit(&self, event: AuditEvent) {
        if let Err(e) = self.audit.record(event).await {
            warn!(error = %e, "Audit sink rejected event");
        }
    }
}

fn validate(request: &StoryRequest) -> NinnaResult<()> {
    if request.parent_email.trim().is_empty() {
        return Err(EngineError::new(EngineErrorKind::InvalidRequest(
            "parent email must not be empty".to_string(),
        ))
        .into());
    }
    if request.child.name.trim().is_empty() {
        return Err(EngineError::new(EngineErrorKind::InvalidRequest(
            "child name must not be empty".to_string(),
        ))
        .into());
    }
    if !request.child.age_is_supported() {
        return Err(EngineError::new(EngineErrorKind::InvalidRequest(format!(
            "age {} outside supported range 2-12",
            request.child.age
        )))
        .into());
    }
    if !request.duration_is_supported() {
        return Err(EngineError::new(EngineErrorKind::InvalidRequest(format!(
            "duration {} outside supported range 5-10",
            request.target_duration_minutes
        )))
        .into());
    }
    Ok(())
}
