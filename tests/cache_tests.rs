// Session cache tests - public API only

use gemini_webchat::cache::SessionCache;
use serde_json::json;

#[test]
fn test_first_open_creates_valid_empty_object() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sessions.json");
    assert!(!path.exists());

    let cache = SessionCache::open(&path).unwrap();
    assert!(cache.is_empty());

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed, json!({}));
}

#[test]
fn test_opaque_metadata_round_trips_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sessions.json");

    // Whatever shape the remote client produces is stored as-is.
    let metadata = json!({
        "cid": "c_0123",
        "rid": null,
        "chunks": [1, 2, {"deep": true}]
    });

    let mut cache = SessionCache::open(&path).unwrap();
    cache.insert("B", metadata.clone());
    cache.persist().unwrap();

    let reloaded = SessionCache::open(&path).unwrap();
    assert_eq!(reloaded.get("B"), Some(&metadata));
    assert_eq!(reloaded.len(), 1);
}

#[test]
fn test_unparseable_file_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sessions.json");
    std::fs::write(&path, "][ definitely not json").unwrap();

    let cache = SessionCache::open(&path).unwrap();
    assert!(cache.is_empty());

    // Persisting afterwards restores a valid file.
    cache.persist().unwrap();
    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed, json!({}));
}

#[test]
fn test_last_writer_wins() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sessions.json");

    // Two handles loaded from the same file, no locking: the second
    // persist overwrites the first wholesale.
    let mut first = SessionCache::open(&path).unwrap();
    let mut second = SessionCache::open(&path).unwrap();

    first.insert("A", json!("from-first"));
    first.persist().unwrap();

    second.insert("B", json!("from-second"));
    second.persist().unwrap();

    let reloaded = SessionCache::open(&path).unwrap();
    assert!(reloaded.get("A").is_none());
    assert_eq!(reloaded.get("B"), Some(&json!("from-second")));
}
