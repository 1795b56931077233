//! Backend-agnostic repository facade.
//!
//! # Responsibility
//! - Offer the single call point for list/create/update/delete.
//! - Assign identifiers to new records and gate writes on validation.
//!
//! # Invariants
//! - Writes call `Entity::validate()` before touching storage.
//! - No cross-entity uniqueness checks are performed.

pub mod entity_repo;
