//! Top-level view state: the customer and vendor tabs.
//!
//! # Invariants
//! - One search term is shared by both tabs; setting it updates both
//!   controllers.
//! - Each entity kind has exactly one controller and one working set.

use crate::model::customer::Customer;
use crate::model::entity::EntityKind;
use crate::model::vendor::Vendor;
use crate::repo::entity_repo::EntityRepository;
use crate::storage::{open_backend, BackendKind, StorageBackend, StorageResult};
use crate::view::controller::{ControllerResult, ViewStateController};
use crate::view::notification::Notification;
use log::info;
use rusqlite::Connection;

/// Workspace whose backends were chosen at runtime.
pub type DynWorkspace<'conn> = Workspace<
    Box<dyn StorageBackend<Customer> + 'conn>,
    Box<dyn StorageBackend<Vendor> + 'conn>,
>;

/// Opens both tabs over `conn` using the backend selected by `kind`.
pub fn open_workspace(conn: &Connection, kind: BackendKind) -> StorageResult<DynWorkspace<'_>> {
    let customers = open_backend::<Customer>(kind, conn)?;
    let vendors = open_backend::<Vendor>(kind, conn)?;
    info!(
        "event=workspace_open module=view status=ok backend={}",
        kind
    );
    Ok(Workspace::from_backends(customers, vendors))
}

pub struct Workspace<CB, VB>
where
    CB: StorageBackend<Customer>,
    VB: StorageBackend<Vendor>,
{
    customers: ViewStateController<Customer, CB>,
    vendors: ViewStateController<Vendor, VB>,
    active_tab: EntityKind,
    search_term: String,
}

impl<CB, VB> Workspace<CB, VB>
where
    CB: StorageBackend<Customer>,
    VB: StorageBackend<Vendor>,
{
    /// Builds a workspace from two ready controllers. The customers tab is
    /// active and the search term is empty.
    pub fn new(
        customers: ViewStateController<Customer, CB>,
        vendors: ViewStateController<Vendor, VB>,
    ) -> Self {
        let mut workspace = Self {
            customers,
            vendors,
            active_tab: EntityKind::Customer,
            search_term: String::new(),
        };
        workspace.set_search_term("");
        workspace
    }

    /// Wraps each backend in a repository and a controller in its default mode.
    pub fn from_backends(customers: CB, vendors: VB) -> Self {
        Self::new(
            ViewStateController::new(EntityRepository::new(customers)),
            ViewStateController::new(EntityRepository::new(vendors)),
        )
    }

    pub fn customers(&self) -> &ViewStateController<Customer, CB> {
        &self.customers
    }

    pub fn customers_mut(&mut self) -> &mut ViewStateController<Customer, CB> {
        &mut self.customers
    }

    pub fn vendors(&self) -> &ViewStateController<Vendor, VB> {
        &self.vendors
    }

    pub fn vendors_mut(&mut self) -> &mut ViewStateController<Vendor, VB> {
        &mut self.vendors
    }

    pub fn active_tab(&self) -> EntityKind {
        self.active_tab
    }

    /// Switches tabs. The search term carries over.
    pub fn set_active_tab(&mut self, tab: EntityKind) {
        self.active_tab = tab;
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.customers.set_search_term(self.search_term.as_str());
        self.vendors.set_search_term(self.search_term.as_str());
    }

    /// Placeholder for the search box of the active tab.
    pub fn search_placeholder(&self) -> String {
        format!("Search {}s...", self.active_tab.as_str())
    }

    /// Number of records the active tab currently shows.
    pub fn visible_count(&mut self) -> ControllerResult<usize> {
        match self.active_tab {
            EntityKind::Customer => Ok(self.customers.visible_entities()?.len()),
            EntityKind::Vendor => Ok(self.vendors.visible_entities()?.len()),
        }
    }

    /// Whether either tab has a mutation in flight.
    pub fn is_busy(&self) -> bool {
        self.customers.is_busy() || self.vendors.is_busy()
    }

    /// Drains queued notifications from both tabs, customers first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        let mut notifications = self.customers.take_notifications();
        notifications.extend(self.vendors.take_notifications());
        notifications
    }
}

#[cfg(test)]
mod tests {
    use super::Workspace;
    use crate::model::entity::EntityKind;
    use crate::storage::kv::MemoryKeyValueStore;
    use crate::storage::local::LocalBackend;

    #[test]
    fn search_term_is_shared_across_tabs() {
        let mut workspace = Workspace::from_backends(
            LocalBackend::new(MemoryKeyValueStore::new()),
            LocalBackend::new(MemoryKeyValueStore::new()),
        );
        assert_eq!(workspace.search_placeholder(), "Search customers...");

        workspace.set_search_term("globex");
        workspace.set_active_tab(EntityKind::Vendor);

        assert_eq!(workspace.search_placeholder(), "Search vendors...");
        assert_eq!(workspace.customers().search_term(), "globex");
        assert_eq!(workspace.vendors().search_term(), "globex");
        assert_eq!(workspace.visible_count().unwrap(), 0);

        workspace.set_active_tab(EntityKind::Customer);
        assert_eq!(workspace.visible_count().unwrap(), 1);
    }
}
