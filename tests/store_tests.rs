use std::fs;

use studybuddy_bot::store::{ClassEntry, DeadlineEntry, Entry, NoteEntry, RecordStore};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> RecordStore {
    RecordStore::load(dir.path().join("user_data.json"))
}

#[test]
fn get_or_create_is_idempotent_and_first_name_wins() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let first = store.get_or_create(42, "Alice");
    let second = store.get_or_create(42, "Alicia");

    assert_eq!(store.user_count(), 1);
    assert_eq!(first.name, "Alice");
    assert_eq!(second.name, "Alice");
}

#[test]
fn appends_preserve_insertion_order() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.get_or_create(1, "Bob");

    for i in 0..5 {
        store.append(1, Entry::Class(ClassEntry::new("Monday", "10:00", &format!("Subject {i}"))));
        store.append(1, Entry::Deadline(DeadlineEntry::new(&format!("task {i}"), "01.09.2026")));
        store.append(1, Entry::Note(NoteEntry::new(&format!("note {i}"), false)));
    }

    let record = store.user(1).unwrap();
    assert_eq!(record.schedule.len(), 5);
    assert_eq!(record.deadlines.len(), 5);
    assert_eq!(record.notes.len(), 5);
    for i in 0..5 {
        assert_eq!(record.schedule[i].subject, format!("Subject {i}"));
        assert_eq!(record.deadlines[i].name, format!("task {i}"));
        assert_eq!(record.notes[i].text, format!("note {i}"));
    }
}

#[test]
fn append_returns_new_collection_length() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.get_or_create(1, "Bob");

    assert_eq!(store.append(1, Entry::Note(NoteEntry::new("a", false))), 1);
    assert_eq!(store.append(1, Entry::Note(NoteEntry::new("b", true))), 2);
    // Other collections are counted separately
    assert_eq!(store.append(1, Entry::Class(ClassEntry::new("Tue", "9:00", "Math"))), 1);
}

#[test]
fn round_trips_non_ascii_through_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("user_data.json");

    let store = RecordStore::load(&path);
    store.get_or_create(99, "Алиса");
    store.append(99, Entry::Class(ClassEntry::new("понедельник", "10:30", "Матанализ")));
    store.append(99, Entry::Note(NoteEntry::new("купить молоко 🥛", true)));
    let before = store.user(99).unwrap();

    let reloaded = RecordStore::load(&path);
    assert_eq!(reloaded.user_count(), 1);
    assert_eq!(reloaded.user(99).unwrap(), before);
}

#[test]
fn identity_keys_persist_as_strings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("user_data.json");

    let store = RecordStore::load(&path);
    store.get_or_create(12345, "Alice");

    let raw = fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value.get("12345").is_some());
}

#[test]
fn missing_file_loads_as_empty_store() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::load(dir.path().join("does_not_exist.json"));
    assert_eq!(store.user_count(), 0);
}

#[test]
fn empty_file_loads_as_empty_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("user_data.json");
    fs::write(&path, "   \n").unwrap();

    let store = RecordStore::load(&path);
    assert_eq!(store.user_count(), 0);
}

#[test]
fn malformed_file_loads_as_empty_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("user_data.json");
    fs::write(&path, "{ this is not json").unwrap();

    let store = RecordStore::load(&path);
    assert_eq!(store.user_count(), 0);
}

#[test]
fn bad_identity_key_invalidates_the_whole_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("user_data.json");
    // One good record, one unparseable key: per the load rule the
    // whole file falls back to empty rather than partially loading.
    fs::write(
        &path,
        r#"{"42": {"name": "Alice"}, "not-a-number": {"name": "Bob"}}"#,
    )
    .unwrap();

    let store = RecordStore::load(&path);
    assert_eq!(store.user_count(), 0);
}

#[test]
fn store_survives_unwritable_directory() {
    let dir = TempDir::new().unwrap();
    // Path points at a directory, so every write fails; in-memory
    // state must stay authoritative.
    let store = RecordStore::load(dir.path());
    store.get_or_create(1, "Alice");
    store.append(1, Entry::Note(NoteEntry::new("still here", false)));

    assert_eq!(store.user(1).unwrap().notes.len(), 1);
}

#[test]
fn user_ids_are_sorted() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.get_or_create(30, "c");
    store.get_or_create(10, "a");
    store.get_or_create(20, "b");

    assert_eq!(store.user_ids(), vec![10, 20, 30]);
}
