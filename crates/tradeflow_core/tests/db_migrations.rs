use rusqlite::Connection;
use tradeflow_core::db::migrations::latest_version;
use tradeflow_core::db::{open_db, open_db_in_memory, DbError};
use tradeflow_core::{Customer, DocumentBackend, SqliteKeyValueStore, StorageError};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_items");
    assert_table_exists(&conn, "documents");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("tradeflow.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO kv_items (key, value) VALUES ('marker', '[]');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let value: String = conn_second
        .query_row("SELECT value FROM kv_items WHERE key = 'marker';", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(value, "[]");
}

#[test]
fn opened_connections_wait_on_busy_locks() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("tradeflow.db")).unwrap();

    let timeout_ms: i64 = conn
        .query_row("PRAGMA busy_timeout;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(timeout_ms, 5000);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn backends_reject_unmigrated_connections() {
    let conn = Connection::open_in_memory().unwrap();

    let kv_err = SqliteKeyValueStore::try_new(&conn).err().unwrap();
    assert!(matches!(
        kv_err,
        StorageError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));

    let doc_err = DocumentBackend::<Customer>::try_new(&conn).err().unwrap();
    assert!(matches!(doc_err, StorageError::UninitializedConnection { .. }));
}

#[test]
fn document_bodies_must_be_valid_json() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO documents (collection, doc_id, body) VALUES ('customers', 'c-1', 'not json');",
        [],
    );
    assert!(result.is_err());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
