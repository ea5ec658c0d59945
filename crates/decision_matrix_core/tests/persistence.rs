use decision_matrix_core::persistence::{parse_collection, serialize_collection};
use decision_matrix_core::{
    MemoryStorage, PersistError, ProjectStore, SqliteStorage, Storage, StorageError, StoredFormat,
    PROJECTS_KEY,
};

fn populated_store() -> ProjectStore<MemoryStorage> {
    let mut store = ProjectStore::new(MemoryStorage::new());
    store.create_new_project(Some("first"));
    let option = store.add_option("A");
    let criterion = store.add_criteria("cost", Some(2.5));
    store.set_evaluation(&option, &criterion, 4.25);
    store.create_new_project(Some("second"));
    store.add_option("B");
    store
}

#[test]
fn load_after_save_restores_identical_collection() {
    let store = populated_store();
    let saved = store.collection().clone();

    let mut reloaded = ProjectStore::new(store.storage().clone());
    assert_eq!(reloaded.load().unwrap(), StoredFormat::Current);
    assert_eq!(reloaded.collection(), &saved);
}

#[test]
fn stored_blob_uses_wire_field_names() {
    let store = populated_store();
    let text = store.storage().get(PROJECTS_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    let active_id = value["activeProjectId"].as_str().unwrap();
    let project = &value["projects"][active_id];
    assert!(project["createdAt"].is_string());
    assert!(project["updatedAt"].is_string());
    assert!(project["options"][0]["name"].is_string());
    assert!(project["criteria"].is_array());
    assert!(project["evaluations"].is_object());
}

#[test]
fn legacy_single_project_is_migrated_and_written_back() {
    let legacy = r#"{
        "name": "Old layout",
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-02T00:00:00.000Z",
        "options": [{"id": "o1", "name": "A"}],
        "criteria": [{"id": "c1", "name": "Cost", "weight": 5}],
        "evaluations": {"o1": {"c1": 4}}
    }"#;
    let mut storage = MemoryStorage::new();
    storage.set(PROJECTS_KEY, legacy).unwrap();

    let mut store = ProjectStore::new(storage);
    assert_eq!(store.load().unwrap(), StoredFormat::Legacy);

    let collection = store.collection();
    assert_eq!(collection.projects.len(), 1);
    let project = store.active_project().unwrap();
    assert!(!project.id.is_empty());
    assert_eq!(project.name, "Old layout");
    assert_eq!(project.updated_at, "2024-01-02T00:00:00.000Z");
    assert_eq!(project.evaluation("o1", "c1"), Some(4.0));

    let rewritten = store.storage().get(PROJECTS_KEY).unwrap().unwrap();
    let (reparsed, format) = parse_collection(&rewritten).unwrap();
    assert_eq!(format, StoredFormat::Current);
    assert_eq!(&reparsed, collection);
}

/// Storage whose reads succeed and whose writes always fail.
struct ReadOnlyStorage(MemoryStorage);

impl Storage for ReadOnlyStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.get(key)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Backend("quota exceeded".to_string()))
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Backend("quota exceeded".to_string()))
    }
}

#[test]
fn legacy_data_loads_even_when_write_back_fails() {
    let legacy = r#"{"id":"old1","name":"Old layout","options":[{"id":"o1","name":"A"}],"criteria":[]}"#;
    let mut storage = MemoryStorage::new();
    storage.set(PROJECTS_KEY, legacy).unwrap();

    let mut store = ProjectStore::new(ReadOnlyStorage(storage));
    assert_eq!(store.load().unwrap(), StoredFormat::Legacy);

    let project = store.active_project().unwrap();
    assert_eq!(project.id, "old1");
    assert_eq!(project.options[0].name, "A");
    assert_eq!(
        store.storage().get(PROJECTS_KEY).unwrap().as_deref(),
        Some(legacy)
    );
}

#[test]
fn integer_scores_reload_as_floats() {
    let stored = r#"{"activeProjectId":"p1","projects":{"p1":{"id":"p1","name":"p","createdAt":"2024-01-01T00:00:00.000Z","updatedAt":"2024-01-01T00:00:00.000Z","options":[{"id":"o1","name":"A"}],"criteria":[{"id":"c1","name":"Cost","weight":5}],"evaluations":{"o1":{"c1":4}}}}}"#;
    let (collection, format) = parse_collection(stored).unwrap();
    assert_eq!(format, StoredFormat::Current);

    let resaved = serialize_collection(&collection).unwrap();
    let value: serde_json::Value = serde_json::from_str(&resaved).unwrap();
    let project = &value["projects"]["p1"];
    assert_eq!(project["criteria"][0]["weight"].as_f64(), Some(5.0));
    assert_eq!(project["evaluations"]["o1"]["c1"].as_f64(), Some(4.0));
    assert!(resaved.contains(r#""weight":5.0"#));

    let (reparsed, _) = parse_collection(&resaved).unwrap();
    assert_eq!(reparsed, collection);
}

#[test]
fn legacy_project_keeps_existing_id() {
    let legacy = r#"{"id":"keepme","name":"x","options":[],"criteria":[]}"#;
    let (collection, _) = parse_collection(legacy).unwrap();
    assert_eq!(collection.active_project_id.as_deref(), Some("keepme"));
    assert!(collection.projects["keepme"].evaluations.is_empty());
}

#[test]
fn corrupt_blob_reports_failure_and_keeps_memory_state() {
    let mut store = populated_store();
    let before = store.collection().clone();
    store.storage_mut().set(PROJECTS_KEY, "{not json").unwrap();

    let err = store.load().unwrap_err();
    assert!(matches!(err, PersistError::Json(_)));
    assert_eq!(store.collection(), &before);
}

#[test]
fn missing_blob_reports_missing() {
    let mut store = ProjectStore::new(MemoryStorage::new());
    assert!(matches!(store.load(), Err(PersistError::Missing)));
    assert!(store.active_project().is_none());
}

#[test]
fn dangling_active_id_is_healed_on_load() {
    let store = populated_store();
    let mut collection = store.collection().clone();
    collection.active_project_id = Some("vanished".to_string());
    let mut storage = MemoryStorage::new();
    storage
        .set(PROJECTS_KEY, &serialize_collection(&collection).unwrap())
        .unwrap();

    let mut reloaded = ProjectStore::new(storage);
    reloaded.load().unwrap();
    let active = reloaded.active_project_id().unwrap();
    assert!(collection.projects.contains_key(active));
}

#[test]
fn empty_collection_heals_to_new_project() {
    let mut storage = MemoryStorage::new();
    storage
        .set(PROJECTS_KEY, r#"{"activeProjectId":null,"projects":{}}"#)
        .unwrap();

    let mut store = ProjectStore::new(storage);
    store.load().unwrap();
    assert_eq!(store.collection().projects.len(), 1);
    assert_eq!(store.active_project().unwrap().name, "New Project");
}

#[test]
fn sqlite_storage_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("matrix.sqlite3");

    let saved = {
        let mut store = ProjectStore::new(SqliteStorage::open(&path).unwrap());
        store.create_new_project(Some("on disk"));
        store.add_option("A");
        store.collection().clone()
    };

    let mut store = ProjectStore::new(SqliteStorage::open(&path).unwrap());
    assert_eq!(store.load().unwrap(), StoredFormat::Current);
    assert_eq!(store.collection(), &saved);
}

#[test]
fn sqlite_storage_overwrites_and_removes() {
    let mut storage = SqliteStorage::open_in_memory().unwrap();
    assert_eq!(storage.get("k").unwrap(), None);

    storage.set("k", "one").unwrap();
    storage.set("k", "two").unwrap();
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("two"));

    storage.remove("k").unwrap();
    assert_eq!(storage.get("k").unwrap(), None);
}
