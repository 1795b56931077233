//! Core domain logic for TradeFlow customers and vendors.
//! This crate owns the entity schema, both storage backends and the
//! view-state reconciliation rules.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod view;

pub use config::AppConfig;
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::customer::Customer;
pub use model::entity::{
    Entity, EntityField, EntityId, EntityKind, EntityProfile, FieldError, ValidationErrors,
};
pub use model::suggestion::{RelatedEntitySuggestions, SuggestionCategory};
pub use model::vendor::Vendor;
pub use repo::entity_repo::{generate_entity_id, EntityRepository, RepoError, RepoResult};
pub use service::suggestion::{
    PromptSuggestionService, SuggestionError, SuggestionService,
};
pub use storage::document::DocumentBackend;
pub use storage::kv::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
pub use storage::local::LocalBackend;
pub use storage::{open_backend, BackendKind, StorageBackend, StorageError, StorageResult};
pub use view::controller::{
    ControllerError, ControllerResult, DeletePrompt, SyncMode, ViewStateController,
};
pub use view::form::EntityForm;
pub use view::notification::{Notification, NotificationKind};
pub use view::workspace::{open_workspace, DynWorkspace, Workspace};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
