//! Document backend: one JSON document per record.
//!
//! # Responsibility
//! - Store each record as an independent document in the kind's collection
//!   (`customers`, `vendors`) of the `documents` table.
//! - Serve bulk reads with one query sorted by `name`.
//!
//! # Invariants
//! - `doc_id` equals the entity id; the body never contains `id`.
//! - Mutations touch exactly one document.
//! - `update` of a missing document fails with `NotFound`.

use super::{ensure_connection_ready, BackendKind, StorageBackend, StorageError, StorageResult};
use crate::model::entity::Entity;
use rusqlite::{params, Connection};
use serde_json::Value;
use std::marker::PhantomData;

/// Per-record document storage over SQLite.
pub struct DocumentBackend<'conn, E> {
    conn: &'conn Connection,
    _entity: PhantomData<fn() -> E>,
}

impl<'conn, E: Entity> DocumentBackend<'conn, E> {
    /// Wraps a migrated connection; rejects connections missing `documents`.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        ensure_connection_ready(conn, "documents")?;
        Ok(Self {
            conn,
            _entity: PhantomData,
        })
    }

    fn collection(&self) -> &'static str {
        E::KIND.collection()
    }
}

impl<E: Entity> StorageBackend<E> for DocumentBackend<'_, E> {
    fn kind(&self) -> BackendKind {
        BackendKind::Remote
    }

    fn list(&self) -> StorageResult<Vec<E>> {
        let mut stmt = self.conn.prepare(
            "SELECT doc_id, body
             FROM documents
             WHERE collection = ?1
             ORDER BY json_extract(body, '$.name') ASC, doc_id ASC;",
        )?;
        let mut rows = stmt.query([self.collection()])?;
        let mut entities = Vec::new();

        while let Some(row) = rows.next()? {
            let doc_id: String = row.get("doc_id")?;
            let body: String = row.get("body")?;
            entities.push(decode_document(self.collection(), &doc_id, &body)?);
        }

        Ok(entities)
    }

    fn create(&self, entity: &E) -> StorageResult<()> {
        let body = encode_body(entity)?;
        self.conn.execute(
            "INSERT INTO documents (collection, doc_id, body)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(collection, doc_id) DO UPDATE SET
                body = excluded.body,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![self.collection(), entity.id(), body],
        )?;
        Ok(())
    }

    fn update(&self, entity: &E) -> StorageResult<()> {
        let body = encode_body(entity)?;
        let changed = self.conn.execute(
            "UPDATE documents
             SET
                body = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE collection = ?1
               AND doc_id = ?2;",
            params![self.collection(), entity.id(), body],
        )?;

        if changed == 0 {
            return Err(StorageError::NotFound {
                collection: self.collection(),
                id: entity.id().to_string(),
            });
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        self.conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND doc_id = ?2;",
            params![self.collection(), id],
        )?;
        Ok(())
    }
}

/// Serializes `entity` without its `id`, which lives in `doc_id`.
fn encode_body<E: Entity>(entity: &E) -> StorageResult<String> {
    let mut value = serde_json::to_value(entity)?;
    match value.as_object_mut() {
        Some(fields) => {
            fields.remove("id");
        }
        None => {
            return Err(StorageError::InvalidData(format!(
                "{} does not serialize to an object",
                E::KIND
            )));
        }
    }
    Ok(serde_json::to_string(&value)?)
}

fn decode_document<E: Entity>(collection: &str, doc_id: &str, body: &str) -> StorageResult<E> {
    let invalid = |message: String| {
        StorageError::InvalidData(format!("document {collection}/{doc_id}: {message}"))
    };

    let mut value: Value = serde_json::from_str(body).map_err(|err| invalid(err.to_string()))?;
    let fields = value
        .as_object_mut()
        .ok_or_else(|| invalid("body is not an object".to_string()))?;
    fields.insert("id".to_string(), Value::String(doc_id.to_string()));

    serde_json::from_value(value).map_err(|err| invalid(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{decode_document, encode_body};
    use crate::model::customer::Customer;
    use crate::storage::StorageError;

    #[test]
    fn body_excludes_id_and_decoding_restores_it() {
        let customer = Customer::with_id("doc-1", "Acme", "a@acme.com");
        let body = encode_body(&customer).unwrap();
        assert!(!body.contains("doc-1"));

        let decoded: Customer = decode_document("customers", "doc-1", &body).unwrap();
        assert_eq!(decoded, customer);
    }

    #[test]
    fn decoding_rejects_non_object_bodies() {
        let err = decode_document::<Customer>("customers", "doc-1", "[1, 2]").unwrap_err();
        assert!(matches!(err, StorageError::InvalidData(message) if message.contains("doc-1")));
    }
}
