use rusqlite::Connection;
use shoplist_core::db::migrations::{apply_migrations, latest_version};
use shoplist_core::db::{open_db, open_db_in_memory, DbError};
use shoplist_core::{ItemOrigin, ListService, SqliteListStore, STORAGE_KEY};

fn kv_columns(conn: &Connection) -> Vec<(String, bool, bool)> {
    let mut stmt = conn.prepare("PRAGMA table_info(kv_store);").unwrap();
    let columns = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>("name")?,
                row.get::<_, i64>("notnull")? == 1,
                row.get::<_, i64>("pk")? == 1,
            ))
        })
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    columns
}

#[test]
fn fresh_database_gets_kv_store_schema() {
    let conn = open_db_in_memory().unwrap();

    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
    assert_eq!(
        kv_columns(&conn),
        vec![
            ("key".to_string(), true, true),
            ("value".to_string(), true, false),
            ("updated_at".to_string(), true, false),
        ]
    );
}

#[test]
fn updated_at_defaults_to_epoch_millis() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_store (key, value) VALUES ('scratch_key', '{}');",
        [],
    )
    .unwrap();

    let updated_at: i64 = conn
        .query_row(
            "SELECT updated_at FROM kv_store WHERE key = 'scratch_key';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    // Any time after 2020-01-01 in milliseconds.
    assert!(updated_at > 1_577_836_800_000, "got {updated_at}");
}

#[test]
fn rerunning_migrations_keeps_saved_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shoplist.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let mut service = ListService::open(SqliteListStore::new(&conn));
        service.add("Coffee", ItemOrigin::essential("Food basics"));
    }

    let mut conn = Connection::open(&path).unwrap();
    apply_migrations(&mut conn).unwrap();
    apply_migrations(&mut conn).unwrap();

    let rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM kv_store WHERE key = ?1;",
            [STORAGE_KEY],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(rows, 1);

    let service = ListService::open(SqliteListStore::new(&conn));
    assert!(service.contains("coffee"));
}

#[test]
fn database_from_newer_build_is_refused_untouched() {
    let mut conn = Connection::open_in_memory().unwrap();
    let future = latest_version() + 1;
    conn.execute_batch(&format!("PRAGMA user_version = {future};"))
        .unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    assert!(matches!(
        err,
        DbError::UnsupportedSchemaVersion { db_version, latest_supported }
            if db_version == future && latest_supported == latest_version()
    ));

    let has_table: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE name = 'kv_store';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(has_table, 0);
}
