#![cfg(feature = "json")]

use chrono::Utc;
use crm_repo::build_repo;
use crm_repo::json::JsonFileStorage;
use crm_types::domain::client::Client;
use crm_types::domain::order::Order;
use crm_types::ports::repository::Repository;
use crm_types::ports::storage::{Storage, StorageError};
use rust_decimal::Decimal;

fn ann() -> Client {
    Client::new(1, "Ann".into(), "ann@x.com".into(), Utc::now()).unwrap()
}

#[tokio::test]
async fn missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::<Client>::new(dir.path().join("clients.json"));
    assert!(storage.load().await.is_empty());
}

#[tokio::test]
async fn malformed_or_null_content_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clients.json");

    for body in ["", "null", "{not json", r#"{"id": 1}"#, r#"[{"id": "one"}]"#] {
        std::fs::write(&path, body).unwrap();
        let storage = JsonFileStorage::<Client>::new(&path);
        assert!(storage.load().await.is_empty(), "body {body:?}");
    }
}

#[tokio::test]
async fn save_writes_pretty_camel_case_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("clients.json");
    let storage = JsonFileStorage::<Client>::new(&path);
    storage.save(&[ann()]).await.unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains('\n'));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let first = &value.as_array().unwrap()[0];
    assert_eq!(first["name"], "Ann");
    assert_eq!(first["email"], "ann@x.com");
    assert!(first.get("createdAt").is_some());
}

#[tokio::test]
async fn save_overwrites_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::<Client>::new(dir.path().join("clients.json"));
    let bob = Client::new(2, "Bob".into(), "bob@x.com".into(), Utc::now()).unwrap();

    storage.save(&[ann(), bob.clone()]).await.unwrap();
    storage.save(&[bob.clone()]).await.unwrap();

    assert_eq!(storage.load().await, vec![bob]);
}

#[tokio::test]
async fn write_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    // The target path is an existing directory, so the write cannot succeed.
    let storage = JsonFileStorage::<Client>::new(dir.path());
    let err = storage.save(&[ann()]).await.unwrap_err();
    assert!(matches!(err, StorageError::Write { .. }));
}

#[tokio::test]
async fn repository_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.json");

    let repo = build_repo::<Order>(&path).await;
    let now = Utc::now();
    repo.add(Order::new(1, 1, "Widget".into(), Decimal::from(100), now).unwrap())
        .await;
    repo.add(Order::new(2, 3, "Gadget".into(), Decimal::new(1250, 2), now).unwrap())
        .await;
    repo.save().await.unwrap();

    let fresh = build_repo::<Order>(&path).await;
    assert_eq!(fresh.get_all().await, repo.get_all().await);
    assert_eq!(fresh.next_id().await, Some(3));
}
