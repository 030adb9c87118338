//! Daily generation quota enforcement.
//!
//! One story consumes one unit from a per-guardian, per-day counter.
//! The check and the increment are a single atomic operation so
//! concurrent requests can never both pass on the last unit.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod ledger;
mod store;

pub use ledger::{DEFAULT_DAILY_MAX, QuotaLedger, QuotaOutcome};
pub use store::{MemoryQuotaStore, QuotaDecision, QuotaStore};
