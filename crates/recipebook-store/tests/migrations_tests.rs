#![allow(clippy::unwrap_used, clippy::expect_used)]

use recipebook_core::ExErrorKind;
use recipebook_store::migrations::{applied_migrations, apply_migrations};
use rusqlite::Connection;
use tempfile::TempDir;

fn setup_db() -> (TempDir, Connection) {
    let dir = TempDir::new().unwrap();
    let conn = Connection::open(dir.path().join("store.db")).unwrap();
    (dir, conn)
}

#[test]
fn test_migrations_create_all_tables() {
    // Given: A fresh database
    let (_dir, mut conn) = setup_db();

    // When: Migrations are applied
    apply_migrations(&mut conn).unwrap();

    // Then: Every table of the schema exists
    for table in [
        "ingredients",
        "recipes",
        "recipe_ingredients",
        "recipe_steps",
        "recipe_revisions",
        "schema_version",
    ] {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1, "missing table {table}");
    }
}

#[test]
fn test_migrations_are_idempotent_across_reopen() {
    // Given: A database migrated once and closed
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.db");
    {
        let mut conn = Connection::open(&path).unwrap();
        apply_migrations(&mut conn).unwrap();
    }

    // When: It is reopened and migrated again
    let mut conn = Connection::open(&path).unwrap();
    apply_migrations(&mut conn).unwrap();

    // Then: Each migration is recorded once
    assert_eq!(applied_migrations(&conn).unwrap(), vec!["001_initial_schema"]);
}

#[test]
fn test_edited_migration_is_rejected() {
    // Given: A migrated database whose recorded checksum no longer matches
    let (_dir, mut conn) = setup_db();
    apply_migrations(&mut conn).unwrap();
    conn.execute(
        "UPDATE schema_version SET checksum = 'deadbeef' WHERE migration_id = '001_initial_schema'",
        [],
    )
    .unwrap();

    // When: Migrations run again
    let err = apply_migrations(&mut conn).unwrap_err();

    // Then: The mismatch is reported
    assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);
    assert!(err.message().contains("Checksum mismatch"));
    assert!(err.message().contains("deadbeef"));
}
