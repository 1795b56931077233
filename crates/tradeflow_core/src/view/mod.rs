//! View-state layer between the repository and whatever renders the lists.
//!
//! # Responsibility
//! - Hold the in-memory working set of one entity kind per controller.
//! - Reconcile it with storage in re-fetch or optimistic mode.
//! - Track each mutation as pending/succeeded/failed and emit notifications.
//! - Drive the create/edit form, search filter and two-step delete flows.
//!
//! # Invariants
//! - The working set never diverges from storage for longer than one
//!   pending operation.
//! - A failed mutation leaves the working set as it was before the attempt.

pub mod controller;
pub mod form;
pub mod notification;
pub mod operation;
pub mod search;
pub mod workspace;
