//! Tracking domain model.
//!
//! # Responsibility
//! - Define the four persisted entities and their write drafts.
//! - Own field validation so every write path shares one rule set.
//!
//! # Invariants
//! - Entity ids are assigned by storage and never reused.
//! - Drafts are normalized (trimmed) and validated before persistence.

pub mod project;
pub mod task;
pub mod time_entry;
pub mod timestamp;
pub mod user;
pub mod validation;

/// Storage-assigned identifier shared by every entity.
pub type EntityId = i64;
