//! Core data types for the Ninna story generation library.
//!
//! This crate provides the foundation data types used across all Ninna
//! interfaces: the structured story payload, the validated generation
//! request, continuity state for sequels, identity aliasing, and the
//! generic text-generation message types the provider adapters consume.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod audio;
mod continuity;
mod generate;
mod identity;
mod language;
mod message;
mod request;
mod response;
mod role;
mod story;
mod telemetry;

pub use audio::AudioClip;
pub use continuity::ContinuityState;
pub use generate::{GenerateRequest, GenerateResponse};
pub use identity::{hash_alias, hash_email};
pub use language::Language;
pub use message::Message;
pub use request::{ChildAttributes, ControlSettings, StoryRequest, normalize_interests};
pub use response::StoryResponse;
pub use role::Role;
pub use story::StoryPayload;
pub use telemetry::init_telemetry;
