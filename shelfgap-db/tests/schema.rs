use shelfgap_db::{open_database, open_memory};
use tempfile::TempDir;

#[test]
fn memory_database_has_schema() {
    let conn = open_memory().unwrap();
    let count: i32 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN
                 ('franchises', 'entries', 'entry_platforms', 'review_items', 'import_log')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 5);
}

#[test]
fn open_database_creates_file_and_is_reopenable() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("catalog.db");

    {
        let conn = open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO franchises (id, name) VALUES ('mario', 'Mario')",
            [],
        )
        .unwrap();
    }

    // Reopening an existing database must not lose data or re-run creation.
    let conn = open_database(&path).unwrap();
    let name: String = conn
        .query_row("SELECT name FROM franchises WHERE id = 'mario'", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(name, "Mario");
}

#[test]
fn schema_version_is_recorded() {
    let conn = open_memory().unwrap();
    let version: i32 = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(version, shelfgap_db::schema::CURRENT_VERSION);
}

#[test]
fn foreign_keys_are_enforced() {
    let conn = open_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO entries (id, franchise_id, title) VALUES ('x', 'nope', 'X')",
        [],
    );
    assert!(result.is_err());
}
