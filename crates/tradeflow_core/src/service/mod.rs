//! External collaborator contracts.
//!
//! # Responsibility
//! - Describe the relation suggestion call as an injectable trait.
//! - Keep prompt text and response decoding next to that contract.

pub mod suggestion;
