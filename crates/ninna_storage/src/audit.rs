//! Audit trail of notable pipeline events.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ninna_error::NinnaResult;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::info;
use uuid::Uuid;

/// Notable pipeline events worth an audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuditEvent {
    /// A story was generated and persisted.
    StoryGenerated {
        /// Persisted story.
        story_id: Uuid,
        /// Guardian the story belongs to.
        identity_id: Uuid,
        /// Text provider that produced the payload.
        provider: String,
        /// True when every configured provider failed and the stub
        /// supplied the payload.
        degraded: bool,
    },
    /// A request was rejected at the quota gate.
    QuotaDenied {
        /// Guardian whose cap was exhausted.
        identity_id: Uuid,
    },
    /// A provider failed and the gateway moved to the next in line.
    ProviderFallback {
        /// Provider that failed.
        from: String,
        /// Provider tried next ("stub" at the end of the line).
        to: String,
    },
}

/// Destination for audit events.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Record one event with its timestamp.
    async fn record(&self, event: AuditEvent) -> NinnaResult<()>;
}

/// In-memory sink that also logs each event.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    events: Mutex<Vec<(DateTime<Utc>, AuditEvent)>>,
}

impl MemoryAuditSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events, oldest first.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events
            .lock()
            .map(|events| events.iter().map(|(_, e)| e.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn record(&self, event: AuditEvent) -> NinnaResult<()> {
        info!(?event, "Audit event");
        if let Ok(mut events) = self.events.lock() {
            events.push((Utc::now(), event));
        }
        Ok(())
    }
}
