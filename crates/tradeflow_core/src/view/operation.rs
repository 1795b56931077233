//! Per-mutation lifecycle tracking.
//!
//! # Invariants
//! - Operation ids increase monotonically per tracker.
//! - An operation resolves at most once; later resolutions are ignored.
//! - Only the most recent `MAX_TRACKED_OPERATIONS` resolved entries are kept;
//!   pending entries are never evicted.

use crate::model::entity::EntityId;

const MAX_TRACKED_OPERATIONS: usize = 64;

pub type OperationId = u64;

/// Mutation kinds issued by the view-state controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationAction {
    Create,
    Update,
    Delete,
}

impl MutationAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            Self::Create => "Created",
            Self::Update => "Updated",
            Self::Delete => "Deleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationStatus {
    Pending,
    Succeeded,
    Failed(String),
}

/// One mutation and where it is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedOperation {
    pub id: OperationId,
    pub action: MutationAction,
    pub entity_id: EntityId,
    /// Display name at the time the operation was issued.
    pub entity_name: String,
    pub status: OperationStatus,
}

impl TrackedOperation {
    pub fn is_pending(&self) -> bool {
        self.status == OperationStatus::Pending
    }
}

/// Ordered record of issued mutations.
#[derive(Debug, Default)]
pub struct OperationTracker {
    next_id: OperationId,
    operations: Vec<TrackedOperation>,
}

impl OperationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new pending operation.
    pub fn begin(
        &mut self,
        action: MutationAction,
        entity_id: impl Into<EntityId>,
        entity_name: impl Into<String>,
    ) -> OperationId {
        self.next_id += 1;
        let id = self.next_id;
        self.operations.push(TrackedOperation {
            id,
            action,
            entity_id: entity_id.into(),
            entity_name: entity_name.into(),
            status: OperationStatus::Pending,
        });
        id
    }

    pub fn succeed(&mut self, id: OperationId) {
        self.resolve(id, OperationStatus::Succeeded);
    }

    pub fn fail(&mut self, id: OperationId, message: impl Into<String>) {
        self.resolve(id, OperationStatus::Failed(message.into()));
    }

    pub fn get(&self, id: OperationId) -> Option<&TrackedOperation> {
        self.operations.iter().find(|operation| operation.id == id)
    }

    pub fn pending(&self) -> impl Iterator<Item = &TrackedOperation> {
        self.operations.iter().filter(|operation| operation.is_pending())
    }

    /// Whether any mutation is still in flight; triggering controls stay
    /// disabled while this holds.
    pub fn is_busy(&self) -> bool {
        self.pending().next().is_some()
    }

    /// Most recent operations, oldest first.
    pub fn history(&self) -> &[TrackedOperation] {
        &self.operations
    }

    fn resolve(&mut self, id: OperationId, status: OperationStatus) {
        if let Some(operation) = self
            .operations
            .iter_mut()
            .find(|operation| operation.id == id && operation.is_pending())
        {
            operation.status = status;
        }
        self.evict_resolved();
    }

    fn evict_resolved(&mut self) {
        let mut excess = self.operations.len().saturating_sub(MAX_TRACKED_OPERATIONS);
        self.operations.retain(|operation| {
            if excess > 0 && !operation.is_pending() {
                excess -= 1;
                return false;
            }
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::{MutationAction, OperationStatus, OperationTracker, MAX_TRACKED_OPERATIONS};

    #[test]
    fn operations_move_from_pending_to_resolved_once() {
        let mut tracker = OperationTracker::new();
        let first = tracker.begin(MutationAction::Create, "id-1", "Acme");
        let second = tracker.begin(MutationAction::Delete, "id-2", "Globex");
        assert!(tracker.is_busy());
        assert_eq!(tracker.pending().count(), 2);

        tracker.succeed(first);
        tracker.fail(second, "disk full");
        tracker.succeed(second);

        assert!(!tracker.is_busy());
        assert_eq!(tracker.get(first).unwrap().status, OperationStatus::Succeeded);
        assert_eq!(
            tracker.get(second).unwrap().status,
            OperationStatus::Failed("disk full".to_string())
        );
    }

    #[test]
    fn history_is_bounded_but_keeps_pending_entries() {
        let mut tracker = OperationTracker::new();
        let pending = tracker.begin(MutationAction::Update, "keep", "Keep");
        for index in 0..(MAX_TRACKED_OPERATIONS * 2) {
            let id = tracker.begin(MutationAction::Create, format!("id-{index}"), "x");
            tracker.succeed(id);
        }

        assert!(tracker.history().len() <= MAX_TRACKED_OPERATIONS);
        assert!(tracker.get(pending).unwrap().is_pending());
    }
}
