//! Quota policy over the raw counter store.

use crate::{QuotaDecision, QuotaStore};
use chrono::NaiveDate;
use ninna_error::NinnaResult;
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Default daily story cap for free accounts.
pub const DEFAULT_DAILY_MAX: u32 = 3;

/// Outcome of a quota authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaOutcome {
    /// Generation may proceed. `remaining` is `None` for premium
    /// accounts, which have no daily cap.
    Allowed {
        /// Units left today, absent for premium accounts.
        remaining: Option<u32>,
    },
    /// The daily cap is exhausted.
    Denied,
}

/// Applies the daily cap policy on top of a [`QuotaStore`].
#[derive(Clone)]
pub struct QuotaLedger {
    store: Arc<dyn QuotaStore>,
    daily_max: u32,
    premium: bool,
}

impl QuotaLedger {
    /// Build a ledger over a store.
    ///
    /// When `premium` is set every authorization passes without
    /// consulting the store.
    pub fn new(store: Arc<dyn QuotaStore>, daily_max: u32, premium: bool) -> Self {
        Self {
            store,
            daily_max,
            premium,
        }
    }

    /// Authorize one generation for the guardian on the given date,
    /// consuming a unit when the account is capped.
    #[instrument(skip(self), fields(premium = self.premium, max = self.daily_max))]
    pub async fn authorize(&self, identity_id: Uuid, date: NaiveDate) -> NinnaResult<QuotaOutcome> {
        if self.premium {
            debug!("Premium account, quota bypassed");
            return Ok(QuotaOutcome::Allowed { remaining: None });
        }

        match self
            .store
            .check_and_consume(identity_id, date, self.daily_max)
            .await?
        {
            QuotaDecision::Allowed { remaining } => {
                debug!(remaining, "Quota consumed");
                Ok(QuotaOutcome::Allowed {
                    remaining: Some(remaining),
                })
            }
            QuotaDecision::Denied => {
                debug!("Daily quota exhausted");
                Ok(QuotaOutcome::Denied)
            }
        }
    }
}
