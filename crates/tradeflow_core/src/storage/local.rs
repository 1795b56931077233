//! Local backend: one serialized collection per entity kind.
//!
//! # Responsibility
//! - Keep the whole collection as a JSON array under the kind's namespaced
//!   key (`tradeflow_customers`, `tradeflow_vendors`).
//! - Seed example records the first time a read finds no stored collection.
//!
//! # Invariants
//! - Every mutation re-serializes and rewrites the full collection.
//! - New records are stored at the front; known ids are replaced in place.
//! - `update` creates or replaces; it never reports `NotFound`.
//! - Seeding happens on first read, never at construction.

use super::kv::KeyValueStore;
use super::{BackendKind, StorageBackend, StorageError, StorageResult};
use crate::model::entity::Entity;
use log::{error, info};
use std::marker::PhantomData;

/// Collection-blob backend over any key-value store.
pub struct LocalBackend<E, S> {
    store: S,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity, S: KeyValueStore> LocalBackend<E, S> {
    /// Wraps `store`. Nothing is read or written until the first call.
    pub fn new(store: S) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn key(&self) -> &'static str {
        E::KIND.storage_key()
    }

    fn load_or_seed(&self) -> StorageResult<Vec<E>> {
        if let Some(blob) = self.store.get_item(self.key())? {
            return decode_collection(self.key(), &blob);
        }

        let seeded = E::seed_records();
        self.persist(&seeded)?;
        info!(
            "event=local_seed module=storage status=ok kind={} count={}",
            E::KIND,
            seeded.len()
        );
        Ok(seeded)
    }

    fn persist(&self, entities: &[E]) -> StorageResult<()> {
        let result = serde_json::to_string(entities)
            .map_err(StorageError::from)
            .and_then(|blob| self.store.set_item(self.key(), &blob));

        if let Err(err) = &result {
            error!(
                "event=local_persist module=storage status=error kind={} count={} error={}",
                E::KIND,
                entities.len(),
                err
            );
        }
        result
    }

    fn upsert(&self, entity: &E) -> StorageResult<()> {
        let mut entities = self.load_or_seed()?;
        match entities.iter().position(|stored| stored.id() == entity.id()) {
            Some(index) => entities[index] = entity.clone(),
            None => entities.insert(0, entity.clone()),
        }
        self.persist(&entities)
    }
}

impl<E: Entity, S: KeyValueStore> StorageBackend<E> for LocalBackend<E, S> {
    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }

    fn list(&self) -> StorageResult<Vec<E>> {
        self.load_or_seed()
    }

    fn create(&self, entity: &E) -> StorageResult<()> {
        self.upsert(entity)
    }

    fn update(&self, entity: &E) -> StorageResult<()> {
        self.upsert(entity)
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let mut entities = self.load_or_seed()?;
        let before = entities.len();
        entities.retain(|stored| stored.id() != id);
        if entities.len() == before {
            return Ok(());
        }
        self.persist(&entities)
    }
}

fn decode_collection<E: Entity>(key: &str, blob: &str) -> StorageResult<Vec<E>> {
    let entities: Vec<E> = serde_json::from_str(blob).map_err(|err| {
        StorageError::InvalidData(format!("cannot decode collection `{key}`: {err}"))
    })?;

    if let Some(position) = entities.iter().position(|entity| !entity.has_id()) {
        return Err(StorageError::InvalidData(format!(
            "record #{position} in `{key}` has no id"
        )));
    }
    Ok(entities)
}
