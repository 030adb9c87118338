//! Quota counter storage.

use async_trait::async_trait;
use chrono::NaiveDate;
use ninna_error::{NinnaResult, StorageError, StorageErrorKind};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// Result of one atomic check-and-consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDecision {
    /// A unit was consumed; `remaining` units are left for the day.
    Allowed {
        /// Units left after this consumption.
        remaining: u32,
    },
    /// The daily cap was already reached; nothing was consumed.
    Denied,
}

/// Storage for per-guardian daily counters.
///
/// `check_and_consume` must be atomic: under concurrent calls the
/// counter may never exceed `max`.
#[async_trait]
pub trait QuotaStore: Send + Sync {
    /// Consume one unit for `(identity, date)` if fewer than `max` have
    /// been consumed; otherwise deny without consuming.
    async fn check_and_consume(
        &self,
        identity_id: Uuid,
        date: NaiveDate,
        max: u32,
    ) -> NinnaResult<QuotaDecision>;
}

/// In-memory quota store keyed by `(identity, date)`.
///
/// Counters for past days are left in place; the map is bounded by the
/// process lifetime, which matches the single-deployment scale this
/// serves.
#[derive(Debug, Default)]
pub struct MemoryQuotaStore {
    counters: Mutex<HashMap<(Uuid, NaiveDate), u32>>,
}

impl MemoryQuotaStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuotaStore for MemoryQuotaStore {
    async fn check_and_consume(
        &self,
        identity_id: Uuid,
        date: NaiveDate,
        max: u32,
    ) -> NinnaResult<QuotaDecision> {
        let mut counters = self.counters.lock().map_err(|e| {
            StorageError::new(StorageErrorKind::Unavailable(format!(
                "quota lock poisoned: {}",
                e
            )))
        })?;
        let used = counters.entry((identity_id, date)).or_insert(0);
        if *used >= max {
            return Ok(QuotaDecision::Denied);
        }
        *used += 1;
        Ok(QuotaDecision::Allowed {
            remaining: max - *used,
        })
    }
}
