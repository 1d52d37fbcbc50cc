//! Record store integration tests against real collection files.

use serde_json::json;
use tempfile::TempDir;
use venue_content::model::stamp;
use venue_content::{FileRecordStore, Filter, Record, RecordStore};

fn open(dir: &TempDir, name: &str) -> FileRecordStore {
    FileRecordStore::open(dir.path(), name).unwrap()
}

fn titles(records: &[Record]) -> Vec<&str> {
    records.iter().filter_map(|r| r.get_str("title")).collect()
}

#[test]
fn create_then_find_by_id() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir, "events");

    let created = store
        .create(Record::new().with("title", "A").with("price", 12.5))
        .unwrap();
    let found = store.find_by_id(created.id().unwrap()).unwrap().unwrap();
    assert_eq!(found, created);
    assert_eq!(found.get("price"), Some(&json!(12.5)));
}

#[test]
fn created_records_get_id_and_timestamp() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir, "news");

    let a = store.create(Record::new().with("title", "A")).unwrap();
    assert!(!a.id().unwrap().is_empty());
    assert!(stamp::parse_timestamp(a.created_at().unwrap()).is_some());
    assert_eq!(a.get_str("title"), Some("A"));

    store.create(Record::new().with("title", "B")).unwrap();
    assert_eq!(titles(&store.find_all(&Filter::new()).unwrap()), vec!["A", "B"]);
}

#[test]
fn update_then_find_by_id() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir, "events");

    let a = store.create(Record::new().with("title", "A").with("venue", "Hall")).unwrap();
    let id = a.id().unwrap();
    let updated = store.update(id, Record::new().with("title", "A2")).unwrap().unwrap();

    let found = store.find_by_id(id).unwrap().unwrap();
    assert_eq!(found, updated);
    assert_eq!(found.get_str("title"), Some("A2"));
    assert_eq!(found.get_str("venue"), Some("Hall"));
    assert_eq!(found.created_at(), a.created_at());
    let created_at = stamp::parse_timestamp(found.created_at().unwrap()).unwrap();
    let updated_at = stamp::parse_timestamp(found.updated_at().unwrap()).unwrap();
    assert!(updated_at > created_at);
}

#[test]
fn update_unknown_id_is_none() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir, "events");
    store.create(Record::new().with("title", "A")).unwrap();
    assert_eq!(store.update("missing", Record::new().with("title", "X")).unwrap(), None);
}

#[test]
fn delete_is_idempotent_in_effect() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir, "gallery");
    let a = store.create(Record::new().with("title", "A")).unwrap();
    store.create(Record::new().with("title", "B")).unwrap();

    assert!(store.delete(a.id().unwrap()).unwrap());
    assert_eq!(store.count(&Filter::new()).unwrap(), 1);
    assert!(!store.delete(a.id().unwrap()).unwrap());
    assert_eq!(store.count(&Filter::new()).unwrap(), 1);
}

#[test]
fn category_filter_keeps_relative_order() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir, "gallery");
    for (title, category) in [("1", "bats"), ("2", "live"), ("3", "bats"), ("4", "gurney"), ("5", "bats")] {
        store
            .create(Record::new().with("title", title).with("category", category))
            .unwrap();
    }
    let bats = store.find_all(&Filter::new().category("bats")).unwrap();
    assert_eq!(titles(&bats), vec!["1", "3", "5"]);
}

#[test]
fn limit_takes_first_items_in_order() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir, "news");
    let records: Vec<Record> = (0..25)
        .map(|i| Record::new().with("id", i.to_string()).with("title", format!("t{}", i)))
        .collect();
    store.save_all(&records).unwrap();

    let first = store.find_all(&Filter::new().limit(10)).unwrap();
    assert_eq!(first.len(), 10);
    assert_eq!(first, records[..10].to_vec());
}

#[test]
fn save_all_of_load_all_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir, "events");
    let a = store.create(Record::new().with("title", "A").with("tags", json!(["x", "y"]))).unwrap();
    store.update(a.id().unwrap(), Record::new().with("status", "past")).unwrap();
    store.create(Record::new().with("title", "B").with("published", false)).unwrap();

    let before = store.load_all().unwrap();
    let bytes_before = std::fs::read(store.path()).unwrap();
    store.save_all(&before).unwrap();

    assert_eq!(store.load_all().unwrap(), before);
    assert_eq!(std::fs::read(store.path()).unwrap(), bytes_before);
}

#[test]
fn reopened_store_sees_persisted_records() {
    let dir = TempDir::new().unwrap();
    let id = {
        let store = open(&dir, "contacts");
        store.create(Record::new().with("name", "Jo")).unwrap().id().unwrap().to_string()
    };
    let store = open(&dir, "contacts");
    assert_eq!(store.find_by_id(&id).unwrap().unwrap().get_str("name"), Some("Jo"));
}

#[test]
fn collections_are_separate_files() {
    let dir = TempDir::new().unwrap();
    open(&dir, "events").create(Record::new().with("title", "E")).unwrap();
    open(&dir, "news").create(Record::new().with("title", "N")).unwrap();

    assert!(dir.path().join("events.json").exists());
    assert!(dir.path().join("news.json").exists());
    assert_eq!(titles(&open(&dir, "events").load_all().unwrap()), vec!["E"]);
}
