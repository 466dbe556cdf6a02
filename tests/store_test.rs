//! Tests for the SQLite slot store.

use tempfile::NamedTempFile;

use strictly_solitaire::{KvStore, SqliteStore};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready store.
fn setup_test_db() -> (NamedTempFile, SqliteStore) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let store = SqliteStore::open(db_path).expect("Failed to open store");
    (db_file, store)
}

#[test]
fn test_read_missing_slot() {
    let (_db, store) = setup_test_db();
    assert_eq!(store.read("SolDeck").expect("Query failed"), None);
}

#[test]
fn test_write_then_read() {
    let (_db, store) = setup_test_db();
    store.write("SolDeck", "{\"cards\":[]}").expect("Write failed");
    assert_eq!(
        store.read("SolDeck").expect("Query failed").as_deref(),
        Some("{\"cards\":[]}")
    );
}

#[test]
fn test_write_replaces_value() {
    let (_db, store) = setup_test_db();
    store.write("SolHist", "[]").expect("Write failed");
    store.write("SolHist", "[1]").expect("Overwrite failed");
    assert_eq!(store.read("SolHist").expect("Query failed").as_deref(), Some("[1]"));
}

#[test]
fn test_clear_slot() {
    let (_db, store) = setup_test_db();
    store.write("SolHist", "[]").expect("Write failed");
    store.clear("SolHist").expect("Clear failed");
    store.clear("SolHist").expect("Clearing twice is fine");
    assert_eq!(store.read("SolHist").expect("Query failed"), None);
}

#[test]
fn test_slots_are_independent() {
    let (_db, store) = setup_test_db();
    store.write("SolDeck", "deck").expect("Write failed");
    store.write("SolHist", "hist").expect("Write failed");
    store.clear("SolDeck").expect("Clear failed");
    assert_eq!(store.read("SolHist").expect("Query failed").as_deref(), Some("hist"));
}

#[test]
fn test_reopen_keeps_data() {
    let (db, store) = setup_test_db();
    store.write("SolDeck", "deck").expect("Write failed");

    let path = db.path().to_str().expect("Invalid path").to_string();
    let reopened = SqliteStore::open(path).expect("Reopen failed");
    let slot = reopened.slot("SolDeck").expect("Query failed").expect("Slot present");
    assert_eq!(slot.value(), "deck");
}

#[test]
fn test_failure_names_the_slot() {
    let (db, store) = setup_test_db();
    // Removing the file leaves a fresh database with no slots table.
    db.close().expect("Failed to remove temp file");

    let err = store.read("SolDeck").expect_err("Table is gone");
    assert_eq!(err.slot.as_deref(), Some("SolDeck"));
    assert!(err.to_string().contains("slot 'SolDeck'"));
}
