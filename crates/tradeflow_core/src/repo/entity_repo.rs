//! Entity repository over an injected storage backend.
//!
//! # Responsibility
//! - Map `list/create/update/delete` one-to-one onto `StorageBackend`.
//! - Generate a random UUID v4 id for records created without one.
//!
//! # Invariants
//! - Validation errors never reach storage.
//! - `update_entity` requires an assigned id.
//! - Backend `NotFound` surfaces as `RepoError::NotFound`.

use crate::model::entity::{Entity, EntityId, ValidationErrors};
use crate::storage::{BackendKind, StorageBackend, StorageError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::time::Instant;
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository-level error for entity persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationErrors),
    NotFound(EntityId),
    /// Update requested for a record that was never assigned an id.
    MissingId,
    Storage(StorageError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "entity not found: {id}"),
            Self::MissingId => write!(f, "entity has no id"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::NotFound(_) | Self::MissingId => None,
        }
    }
}

impl From<ValidationErrors> for RepoError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::NotFound { id, .. } => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}

/// Generates a collision-resistant id (128-bit random, hyphenated text).
pub fn generate_entity_id() -> EntityId {
    Uuid::new_v4().to_string()
}

/// CRUD facade for one entity kind.
pub struct EntityRepository<E, B> {
    backend: B,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity, B: StorageBackend<E>> EntityRepository<E, B> {
    /// Creates a repository using the provided backend implementation.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            _entity: PhantomData,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Fills in a fresh id when `entity` has none. Existing ids are kept.
    pub fn assign_id(&self, entity: &mut E) {
        if !entity.has_id() {
            entity.set_id(generate_entity_id());
        }
    }

    /// Lists all records in backend order.
    pub fn list_entities(&self) -> RepoResult<Vec<E>> {
        let started_at = Instant::now();
        let result = self.backend.list().map_err(RepoError::from);
        match &result {
            Ok(entities) => info!(
                "event=entity_list module=repo status=ok kind={} backend={} count={} duration_ms={}",
                E::KIND,
                self.backend_kind(),
                entities.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => self.log_failure("entity_list", "-", started_at, err),
        }
        result
    }

    /// Validates and stores a new record, assigning an id when missing.
    ///
    /// Returns the stored record, including its id.
    pub fn create_entity(&self, entity: &E) -> RepoResult<E> {
        let started_at = Instant::now();
        entity.validate()?;

        let mut stored = entity.clone();
        self.assign_id(&mut stored);
        match self.backend.create(&stored) {
            Ok(()) => {
                self.log_ok("entity_create", stored.id(), started_at);
                Ok(stored)
            }
            Err(err) => {
                let err = RepoError::from(err);
                self.log_failure("entity_create", stored.id(), started_at, &err);
                Err(err)
            }
        }
    }

    /// Validates and replaces the record keyed by `entity`'s id.
    pub fn update_entity(&self, entity: &E) -> RepoResult<()> {
        let started_at = Instant::now();
        if !entity.has_id() {
            return Err(RepoError::MissingId);
        }
        entity.validate()?;

        let result = self.backend.update(entity).map_err(RepoError::from);
        match &result {
            Ok(()) => self.log_ok("entity_update", entity.id(), started_at),
            Err(err) => self.log_failure("entity_update", entity.id(), started_at, err),
        }
        result
    }

    /// Removes the record with `id`; succeeds when it is already gone.
    pub fn delete_entity(&self, id: &str) -> RepoResult<()> {
        let started_at = Instant::now();
        let result = self.backend.delete(id).map_err(RepoError::from);
        match &result {
            Ok(()) => self.log_ok("entity_delete", id, started_at),
            Err(err) => self.log_failure("entity_delete", id, started_at, err),
        }
        result
    }

    fn log_ok(&self, event: &str, id: &str, started_at: Instant) {
        info!(
            "event={event} module=repo status=ok kind={} backend={} id={id} duration_ms={}",
            E::KIND,
            self.backend_kind(),
            started_at.elapsed().as_millis()
        );
    }

    fn log_failure(&self, event: &str, id: &str, started_at: Instant, err: &RepoError) {
        error!(
            "event={event} module=repo status=error kind={} backend={} id={id} duration_ms={} error={}",
            E::KIND,
            self.backend_kind(),
            started_at.elapsed().as_millis(),
            err
        );
    }
}
