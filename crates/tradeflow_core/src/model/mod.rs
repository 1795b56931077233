//! Entity schema for customer and vendor records.
//!
//! # Responsibility
//! - Define the canonical record shapes persisted by every storage backend.
//! - Own field-level validation shared by both entity kinds.
//! - Define the categorized output shape of the suggestion service.
//!
//! # Invariants
//! - `id` identifies an entity within its collection and never changes once
//!   assigned.
//! - `name`/`email` uniqueness is not enforced; duplicates are valid data.
//! - Validation failures are reported per field, never as a single opaque error.

pub mod customer;
pub mod entity;
pub mod suggestion;
pub mod vendor;
