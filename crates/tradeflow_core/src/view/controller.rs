//! View-state controller for one entity kind.
//!
//! # Responsibility
//! - Own the in-memory working set and reconcile it with the repository.
//! - Track every mutation as an operation and turn outcomes into
//!   notifications.
//! - Drive form submission, search, suggestions and the two-step delete.
//!
//! # Invariants
//! - Re-fetch mode: the cached list is dropped after every successful
//!   mutation and reloaded on the next read.
//! - Optimistic mode: the working set is loaded once and mutated in place
//!   (create at front, update by id, delete by id) before persisting.
//! - A failed mutation restores the working set to its pre-mutation state.
//! - Validation failures are returned before any operation is issued; every
//!   other failure, including an unreadable working set, resolves a tracked
//!   operation and queues an error notification.

use crate::model::entity::{Entity, EntityId, ValidationErrors};
use crate::repo::entity_repo::{EntityRepository, RepoError, RepoResult};
use crate::service::suggestion::{SuggestionError, SuggestionService};
use crate::storage::{BackendKind, StorageBackend};
use crate::view::form::EntityForm;
use crate::view::notification::Notification;
use crate::view::operation::{MutationAction, OperationId, OperationTracker, TrackedOperation};
use crate::view::search::filter_entities;
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// How the working set is reconciled with storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Treat memory as a cache; invalidate and re-query after mutations.
    Refetch,
    /// Mutate memory first, then persist the change.
    Optimistic,
}

impl SyncMode {
    /// Mode paired with each backend: documents re-fetch, local blobs are
    /// mirrored optimistically.
    pub fn for_backend(kind: BackendKind) -> Self {
        match kind {
            BackendKind::Remote => Self::Refetch,
            BackendKind::Local => Self::Optimistic,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Refetch => "refetch",
            Self::Optimistic => "optimistic",
        }
    }
}

/// Failure of one view-level interaction.
#[derive(Debug)]
pub enum ControllerError {
    /// Field-level problems; nothing was sent to storage.
    Validation(ValidationErrors),
    Repo(RepoError),
    Suggestion(SuggestionError),
    /// `confirm_delete` was called without a pending delete request.
    NoDeleteCandidate,
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Suggestion(err) => write!(f, "{err}"),
            Self::NoDeleteCandidate => write!(f, "no delete request is pending"),
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Suggestion(err) => Some(err),
            Self::NoDeleteCandidate => None,
        }
    }
}

impl From<ValidationErrors> for ControllerError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ControllerError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(errors) => Self::Validation(errors),
            other => Self::Repo(other),
        }
    }
}

impl From<SuggestionError> for ControllerError {
    fn from(value: SuggestionError) -> Self {
        Self::Suggestion(value)
    }
}

pub type ControllerResult<T> = Result<T, ControllerError>;

/// Confirmation prompt content for a pending delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    pub entity_id: EntityId,
    /// Current name of the candidate, or the kind's generic label if the
    /// record is gone.
    pub display_name: String,
}

/// Working-set owner for one entity kind.
pub struct ViewStateController<E: Entity, B: StorageBackend<E>> {
    repo: EntityRepository<E, B>,
    mode: SyncMode,
    entities: Option<Vec<E>>,
    search_term: String,
    delete_candidate: Option<EntityId>,
    operations: OperationTracker,
    notifications: Vec<Notification>,
}

impl<E: Entity, B: StorageBackend<E>> ViewStateController<E, B> {
    /// Creates a controller in the mode paired with the repository's backend.
    pub fn new(repo: EntityRepository<E, B>) -> Self {
        let mode = SyncMode::for_backend(repo.backend_kind());
        Self::with_mode(repo, mode)
    }

    pub fn with_mode(repo: EntityRepository<E, B>, mode: SyncMode) -> Self {
        Self {
            repo,
            mode,
            entities: None,
            search_term: String::new(),
            delete_candidate: None,
            operations: OperationTracker::new(),
            notifications: Vec::new(),
        }
    }

    pub fn mode(&self) -> SyncMode {
        self.mode
    }

    pub fn repository(&self) -> &EntityRepository<E, B> {
        &self.repo
    }

    /// Whether a list is currently held in memory.
    pub fn is_loaded(&self) -> bool {
        self.entities.is_some()
    }

    /// Returns the working set, loading it from the repository if needed.
    pub fn entities(&mut self) -> ControllerResult<&[E]> {
        Ok(self.working_set()?.as_slice())
    }

    /// Drops the in-memory list and reloads it.
    pub fn refresh(&mut self) -> ControllerResult<&[E]> {
        self.entities = None;
        self.entities()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// The working set filtered by the current search term.
    pub fn visible_entities(&mut self) -> ControllerResult<Vec<E>> {
        let term = self.search_term.clone();
        Ok(filter_entities(self.working_set()?, &term))
    }

    pub fn find(&mut self, id: &str) -> ControllerResult<Option<E>> {
        Ok(self
            .working_set()?
            .iter()
            .find(|entity| entity.id() == id)
            .cloned())
    }

    /// Opens an empty form for a new record.
    pub fn open_create_form(&self) -> EntityForm<E> {
        EntityForm::create()
    }

    /// Opens a pre-filled form for the record with `id`, if it exists.
    pub fn open_edit_form(&mut self, id: &str) -> ControllerResult<Option<EntityForm<E>>> {
        Ok(self.find(id)?.map(|entity| EntityForm::edit(&entity)))
    }

    /// Validates `form` and saves it.
    ///
    /// The record is updated when its id matches one in the working set and
    /// created otherwise. When the list cannot be read, a form carrying an id
    /// is saved as an update so the failure is reported against it.
    pub fn submit_form(&mut self, form: &EntityForm<E>) -> ControllerResult<E> {
        let entity = form.to_entity()?;
        let exists = entity.has_id()
            && match self.working_set() {
                Ok(working) => working.iter().any(|stored| stored.id() == entity.id()),
                Err(_) => true,
            };

        if exists {
            self.update_entity(entity)
        } else {
            self.create_entity(entity)
        }
    }

    /// Requests relation suggestions for `form`.
    ///
    /// Failures produce an error notification and leave the form's fields
    /// unchanged; persistence is never involved.
    pub fn request_suggestions<S>(
        &mut self,
        form: &mut EntityForm<E>,
        service: &S,
    ) -> ControllerResult<()>
    where
        S: SuggestionService + ?Sized,
    {
        match form.request_suggestions(service) {
            Ok(_) => Ok(()),
            Err(err) => {
                let notification = match err {
                    SuggestionError::InputNeeded => Notification::suggestion_input_needed(),
                    _ => Notification::suggestion_failed(),
                };
                self.notifications.push(notification);
                Err(err.into())
            }
        }
    }

    /// Saves a new record and adds it to the front of the working set.
    pub fn create_entity(&mut self, mut entity: E) -> ControllerResult<E> {
        entity.validate()?;
        self.repo.assign_id(&mut entity);

        let op = self
            .operations
            .begin(MutationAction::Create, entity.id(), entity.name());

        let result = match self.mode {
            SyncMode::Optimistic => self.create_optimistic(&entity),
            SyncMode::Refetch => self.repo.create_entity(&entity).map(|stored| {
                self.invalidate();
                stored
            }),
        };

        self.finish(op, MutationAction::Create, entity.name(), result)
    }

    /// Replaces a stored record with `entity`.
    pub fn update_entity(&mut self, entity: E) -> ControllerResult<E> {
        entity.validate()?;

        let op = self
            .operations
            .begin(MutationAction::Update, entity.id(), entity.name());

        let result = match self.mode {
            SyncMode::Optimistic => self.update_optimistic(&entity).map(|()| entity.clone()),
            SyncMode::Refetch => self.repo.update_entity(&entity).map(|()| {
                self.invalidate();
                entity.clone()
            }),
        };

        self.finish(op, MutationAction::Update, entity.name(), result)
    }

    /// Deletes the record with `id`; deleting a missing record succeeds.
    pub fn delete_entity(&mut self, id: &str) -> ControllerResult<()> {
        let name = self.resolve_name(id);

        let op = self
            .operations
            .begin(MutationAction::Delete, id, name.as_str());

        let result = match self.mode {
            SyncMode::Optimistic => self.delete_optimistic(id),
            SyncMode::Refetch => self.repo.delete_entity(id).map(|()| self.invalidate()),
        };

        self.finish(op, MutationAction::Delete, &name, result)
    }

    /// Records `id` as the delete candidate; nothing is deleted yet.
    pub fn request_delete(&mut self, id: impl Into<EntityId>) {
        self.delete_candidate = Some(id.into());
    }

    /// Prompt for the pending delete, if any.
    ///
    /// Reads the candidate's current name from the working set, re-fetching
    /// it if needed.
    pub fn delete_prompt(&mut self) -> Option<DeletePrompt> {
        let id = self.delete_candidate.clone()?;
        let display_name = self.resolve_name(&id);
        Some(DeletePrompt {
            entity_id: id,
            display_name,
        })
    }

    pub fn cancel_delete(&mut self) {
        self.delete_candidate = None;
    }

    /// Deletes the pending candidate. The candidate is cleared either way.
    pub fn confirm_delete(&mut self) -> ControllerResult<()> {
        let id = self
            .delete_candidate
            .take()
            .ok_or(ControllerError::NoDeleteCandidate)?;
        self.delete_entity(&id)
    }

    pub fn operations(&self) -> &OperationTracker {
        &self.operations
    }

    pub fn pending_operations(&self) -> Vec<&TrackedOperation> {
        self.operations.pending().collect()
    }

    /// Whether a mutation is still in flight.
    pub fn is_busy(&self) -> bool {
        self.operations.is_busy()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Removes and returns all queued notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn working_set(&mut self) -> ControllerResult<&Vec<E>> {
        Ok(&*self.working_set_mut()?)
    }

    fn working_set_mut(&mut self) -> RepoResult<&mut Vec<E>> {
        if self.entities.is_none() {
            let loaded = self.repo.list_entities()?;
            debug!(
                "event=view_load module=view status=ok kind={} mode={} count={}",
                E::KIND,
                self.mode.as_str(),
                loaded.len()
            );
            self.entities = Some(loaded);
        }
        Ok(self.entities.get_or_insert_with(Vec::new))
    }

    fn invalidate(&mut self) {
        self.entities = None;
    }

    fn rollback(&mut self, snapshot: Vec<E>, err: RepoError) -> RepoError {
        warn!(
            "event=view_rollback module=view status=error kind={} count={} error={}",
            E::KIND,
            snapshot.len(),
            err
        );
        self.entities = Some(snapshot);
        err
    }

    fn create_optimistic(&mut self, entity: &E) -> RepoResult<E> {
        let working = self.working_set_mut()?;
        let snapshot = working.clone();
        match working.iter().position(|stored| stored.id() == entity.id()) {
            Some(index) => working[index] = entity.clone(),
            None => working.insert(0, entity.clone()),
        }
        self.repo
            .create_entity(entity)
            .map_err(|err| self.rollback(snapshot, err))
    }

    /// Only records already in the working set can be updated.
    fn update_optimistic(&mut self, entity: &E) -> RepoResult<()> {
        let working = self.working_set_mut()?;
        let Some(index) = working.iter().position(|stored| stored.id() == entity.id()) else {
            return Err(RepoError::NotFound(entity.id().to_string()));
        };
        let snapshot = working.clone();
        working[index] = entity.clone();
        self.repo
            .update_entity(entity)
            .map_err(|err| self.rollback(snapshot, err))
    }

    fn delete_optimistic(&mut self, id: &str) -> RepoResult<()> {
        let working = self.working_set_mut()?;
        let snapshot = working.clone();
        working.retain(|stored| stored.id() != id);
        self.repo
            .delete_entity(id)
            .map_err(|err| self.rollback(snapshot, err))
    }

    /// Current name of `id`, or the kind's generic label when the record is
    /// gone or the list cannot be read.
    fn resolve_name(&mut self, id: &str) -> String {
        match self.find(id) {
            Ok(Some(entity)) => entity.name().to_string(),
            Ok(None) => E::KIND.fallback_name().to_string(),
            Err(err) => {
                warn!(
                    "event=view_lookup module=view status=error kind={} id={} error={}",
                    E::KIND,
                    id,
                    err
                );
                E::KIND.fallback_name().to_string()
            }
        }
    }

    fn finish<T>(
        &mut self,
        op: OperationId,
        action: MutationAction,
        name: &str,
        result: Result<T, RepoError>,
    ) -> ControllerResult<T> {
        match result {
            Ok(value) => {
                self.operations.succeed(op);
                self.notifications
                    .push(Notification::mutation_succeeded(E::KIND, action, name));
                Ok(value)
            }
            Err(err) => {
                let message = err.to_string();
                self.operations.fail(op, message.as_str());
                self.notifications.push(Notification::mutation_failed(
                    E::KIND,
                    action,
                    name,
                    &message,
                ));
                Err(err.into())
            }
        }
    }
}
