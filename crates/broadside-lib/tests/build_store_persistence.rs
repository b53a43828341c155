use std::time::Instant;

use broadside_lib::builds::{BuildStore, STORAGE_KEY, STORAGE_VERSION};
use broadside_lib::model::Build;
use broadside_lib::storage::FileStore;
use broadside_lib::Archetype;
use serde_json::{json, Value};
use tempfile::tempdir;

#[test]
fn builds_survive_a_store_reopen() {
    let dir = tempdir().unwrap();

    let created = {
        let storage = FileStore::open(dir.path()).unwrap();
        let mut store = BuildStore::open(storage);
        let created = store.create(Build::template(String::new(), Archetype::Brawler, 0));
        store.flush();
        created
    };

    let storage = FileStore::open(dir.path()).unwrap();
    let store = BuildStore::open(storage);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&created.id).unwrap().name, "New Build");
}

#[test]
fn legacy_container_is_migrated_on_first_open() {
    let dir = tempdir().unwrap();
    let v1 = json!({
        "version": 1,
        "builds": [{
            "id": "build_legacy",
            "name": "Old Hand",
            "archetype": "trade",
            "tier": 2,
            "shipId": "7",
            "weapons": {},
            "strategy": "",
            "upgrades": [],
            "strengths": [],
            "weaknesses": [],
            "createdAt": 1,
            "updatedAt": 1
        }]
    });
    std::fs::write(
        dir.path().join(format!("{STORAGE_KEY}.json")),
        v1.to_string(),
    )
    .unwrap();

    let storage = FileStore::open(dir.path()).unwrap();
    let store = BuildStore::open(storage);
    assert_eq!(store.builds()[0].ship_id, Some(7));

    // The migrated container hits disk immediately, not on the next save.
    let text = std::fs::read_to_string(dir.path().join(format!("{STORAGE_KEY}.json"))).unwrap();
    let container: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(container["version"], json!(STORAGE_VERSION));
    assert_eq!(container["builds"][0]["shipId"], json!(7));
}

#[test]
fn export_then_import_round_trips_with_fresh_ids() {
    let dir = tempdir().unwrap();
    let storage = FileStore::open(dir.path()).unwrap();
    let mut store = BuildStore::open(storage);
    let original = store.create(Build::template(String::new(), Archetype::Kite, 10));

    let exported = store.export(None);

    let other_dir = tempdir().unwrap();
    let other_storage = FileStore::open(other_dir.path()).unwrap();
    let mut other = BuildStore::open(other_storage);
    let report = other.import_at(&exported, 20, Instant::now());

    assert_eq!(report.imported, 1);
    assert!(report.errors.is_empty());
    assert_ne!(other.builds()[0].id, original.id);
    assert_eq!(other.builds()[0].name, original.name);
    assert_eq!(other.builds()[0].archetype, Archetype::Kite);
}
