//! Persistence traits and in-memory backends.
//!
//! Repositories hold aliased identities, child profiles, generated
//! stories, and continuity state. Raw emails and child names never
//! appear in any record; callers hash them first.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod audit;
mod memory;
mod records;
mod repository;

pub use audit::{AuditEvent, AuditSink, MemoryAuditSink};
pub use memory::MemoryRepository;
pub use records::{ChildProfile, ContinuityRecord, Identity, StoryRecord};
pub use repository::StoryRepository;
