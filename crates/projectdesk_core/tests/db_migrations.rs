use projectdesk_core::db::migrations::latest_version;
use projectdesk_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in ["customers", "roles", "services", "staff", "statuses", "projects"] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn migrations_seed_reference_data() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(count(&conn, "SELECT COUNT(*) FROM statuses;"), 3);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM roles;"), 3);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM services;"), 2);

    let development_price: String = conn
        .query_row(
            "SELECT hourly_price FROM services WHERE name = 'Development';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(development_price, "150.00");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projectdesk.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    // Seeds must not be applied twice.
    assert_eq!(count(&conn_second, "SELECT COUNT(*) FROM statuses;"), 3);
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
        DbError::SchemaTooNew {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn count(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
