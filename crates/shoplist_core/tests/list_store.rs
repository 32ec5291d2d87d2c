use shoplist_core::db::{open_db, open_db_in_memory};
use shoplist_core::{
    load_or_empty, EffectiveItem, ItemId, ItemOrigin, ItemSource, ListService, ListStore,
    MemoryListStore, SqliteListStore, StoreError, STORAGE_KEY,
};
use uuid::Uuid;

fn sample_items() -> Vec<EffectiveItem> {
    let mut service = ListService::open(MemoryListStore::new());
    service.add("Milk", ItemOrigin::essential("Food basics"));
    service.add("Bread", ItemOrigin::essential("Food basics"));
    service.add("Toothpaste", ItemOrigin::essential("Bathroom"));
    service.add("Candles", ItemOrigin::Custom);
    service.snapshot().to_vec()
}

#[test]
fn empty_database_loads_empty_list() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteListStore::new(&conn);
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn save_then_load_roundtrips_items_and_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteListStore::new(&conn);
    let items = sample_items();

    store.save(&items).unwrap();
    assert_eq!(store.load().unwrap(), items);

    store.save(&items[..1]).unwrap();
    assert_eq!(store.load().unwrap(), items[..1].to_vec());
}

#[test]
fn list_survives_reopening_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shoplist.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let mut service = ListService::open(SqliteListStore::new(&conn));
        service.add("Batteries", ItemOrigin::essential("Home"));
        service.add("Birthday card", ItemOrigin::Custom);
    }

    let conn = open_db(&path).unwrap();
    let service = ListService::open(SqliteListStore::new(&conn));
    let names: Vec<_> = service
        .snapshot()
        .iter()
        .map(|item| item.name.as_str())
        .collect();
    assert_eq!(names, vec!["Batteries", "Birthday card"]);
}

#[test]
fn stored_value_uses_fixed_key_and_wire_schema() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteListStore::new(&conn);
    store.save(&sample_items()).unwrap();

    let raw: String = conn
        .query_row(
            "SELECT value FROM kv_store WHERE key = ?1;",
            [STORAGE_KEY],
            |row| row.get(0),
        )
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let effective = value["effective"].as_array().unwrap();
    assert_eq!(effective.len(), 4);
    assert_eq!(effective[0]["source"], "essential");
    assert_eq!(effective[0]["name"], "Bread");
    assert_eq!(effective[0]["group"], "Food basics");
    assert!(effective[0]["createdAt"].is_i64());
    assert_eq!(effective[3]["source"], "custom");
    assert!(effective[3].get("group").is_none());
}

#[test]
fn corrupt_stored_value_is_error_and_falls_back_to_empty() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_store (key, value) VALUES (?1, ?2);",
        [STORAGE_KEY, "{\"effective\": null}"],
    )
    .unwrap();

    let store = SqliteListStore::new(&conn);
    assert!(matches!(
        store.load().unwrap_err(),
        StoreError::InvalidData(_)
    ));
    assert!(load_or_empty(&store).is_empty());
}

#[test]
fn hand_edited_state_is_deduplicated_and_sorted() {
    let raw = serde_json::json!({
        "effective": [
            {
                "id": Uuid::new_v4().to_string(),
                "name": "Zebra feed",
                "source": "custom",
                "createdAt": 3
            },
            {
                "id": Uuid::new_v4().to_string(),
                "name": "Milk",
                "source": "essential",
                "group": "Food basics",
                "createdAt": 1
            },
            {
                "id": Uuid::new_v4().to_string(),
                "name": "milk",
                "source": "custom",
                "createdAt": 2
            }
        ],
        "extra": true
    });

    let store = MemoryListStore::with_raw(raw.to_string());
    let items = store.load().unwrap();
    let summary: Vec<_> = items
        .iter()
        .map(|item| (item.name.as_str(), item.source))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Milk", ItemSource::Essential),
            ("Zebra feed", ItemSource::Custom)
        ]
    );
}

#[test]
fn opaque_ids_and_fractional_timestamps_are_kept() {
    let raw = r#"{"effective":[
        {"id":"a3f9c1e018c3f1a2b","name":"Milk","source":"essential","group":"Food basics","createdAt":1700000000000},
        {"id":"lq2x9","name":"Candles","source":"custom","createdAt":1700000000123.7},
        {"id":"7","name":"Baking paper","source":"essential","group":"","createdAt":5}
    ]}"#;

    let mut service = ListService::open(MemoryListStore::with_raw(raw));
    assert_eq!(service.len(), 3);

    let milk = ItemId::from("a3f9c1e018c3f1a2b");
    assert_eq!(service.get(&milk).unwrap().created_at, 1_700_000_000_000);
    let candles = service.get(&ItemId::from("lq2x9")).unwrap();
    assert_eq!(candles.created_at, 1_700_000_000_123);
    let paper = service.get(&ItemId::from("7")).unwrap();
    assert_eq!(paper.group, None);

    assert!(service.remove_by_id(&milk));
    let saved: serde_json::Value =
        serde_json::from_str(&service.store().raw().unwrap()).unwrap();
    let ids: Vec<_> = saved["effective"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["7", "lq2x9"]);
}
