use std::fs;

use picker_engine::{FileTokenStore, TokenStore};
use tempfile::TempDir;

#[test]
fn token_survives_new_store_instance() {
    let temp = TempDir::new().unwrap();
    let store = FileTokenStore::new(temp.path());
    assert!(!store.has());

    store.save("abc.123");
    assert!(store.path().is_file());

    let reopened = FileTokenStore::new(temp.path());
    assert_eq!(reopened.get().as_deref(), Some("abc.123"));
}

#[test]
fn save_creates_missing_directory() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("nested").join("prefs");
    let store = FileTokenStore::new(&dir);
    store.save("tok");
    assert!(dir.is_dir());
    assert!(store.has());
}

#[test]
fn clear_removes_token_and_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let store = FileTokenStore::new(temp.path());
    store.save("tok");
    store.clear();
    assert!(!store.has());
    assert!(!store.path().exists());
    store.clear();
    assert!(!store.has());
}

#[test]
fn whitespace_token_reads_as_absent() {
    let temp = TempDir::new().unwrap();
    let store = FileTokenStore::new(temp.path());
    store.save(" \t ");
    assert_eq!(store.get(), None);
}

#[test]
fn corrupt_file_reads_as_absent() {
    let temp = TempDir::new().unwrap();
    let store = FileTokenStore::new(temp.path());
    fs::write(store.path(), "this is not ron (").unwrap();
    assert_eq!(store.get(), None);

    store.save("fresh");
    assert_eq!(store.get().as_deref(), Some("fresh"));
}
