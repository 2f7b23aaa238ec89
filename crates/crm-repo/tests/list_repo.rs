#![cfg(feature = "memory")]

use chrono::Utc;
use crm_repo::list::ListRepository;
use crm_repo::memory::InMemoryStorage;
use crm_types::domain::client::Client;
use crm_types::ports::repository::Repository;

fn client(id: u64, name: &str) -> Client {
    Client::new(
        id,
        name.into(),
        format!("{}@example.com", name.to_lowercase()),
        Utc::now(),
    )
    .unwrap()
}

#[tokio::test]
async fn adds_are_visible_in_insertion_order() {
    let repo = ListRepository::load(InMemoryStorage::<Client>::new()).await;
    assert!(repo.get_all().await.is_empty());

    repo.add(client(2, "Bob")).await;
    repo.add(client(1, "Ann")).await;
    repo.add(client(3, "Cid")).await;

    let names: Vec<_> = repo.get_all().await.into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Bob", "Ann", "Cid"]);
}

#[tokio::test]
async fn next_id_tracks_largest_id() {
    let repo = ListRepository::load(InMemoryStorage::<Client>::new()).await;
    assert_eq!(repo.next_id().await, Some(1));

    repo.add(client(1, "Ann")).await;
    assert_eq!(repo.next_id().await, Some(2));

    repo.add(client(7, "Bob")).await;
    assert_eq!(repo.next_id().await, Some(8));
}

#[tokio::test]
async fn get_by_id_returns_first_match_or_none() {
    let repo = ListRepository::load(InMemoryStorage::<Client>::new()).await;
    repo.add(client(1, "Ann")).await;
    repo.add(client(2, "Bob")).await;

    let found = repo.get_by_id(2).await.unwrap();
    assert_eq!(found.name, "Bob");
    assert!(repo.get_by_id(42).await.is_none());
}

#[tokio::test]
async fn unsaved_adds_do_not_reach_storage() {
    let storage = InMemoryStorage::<Client>::new();
    let repo = ListRepository::load(storage.clone()).await;
    repo.add(client(1, "Ann")).await;

    let fresh = ListRepository::load(storage).await;
    assert!(fresh.get_all().await.is_empty());
}

#[tokio::test]
async fn save_then_reload_round_trips() {
    let storage = InMemoryStorage::<Client>::new();
    let repo = ListRepository::load(storage.clone()).await;
    repo.add(client(1, "Ann")).await;
    repo.add(client(2, "Bob")).await;
    repo.save().await.unwrap();

    let fresh = ListRepository::load(storage).await;
    assert_eq!(fresh.get_all().await, repo.get_all().await);
}

#[tokio::test]
async fn storage_changes_after_load_are_invisible() {
    let storage = InMemoryStorage::with_items(vec![client(1, "Ann")]);
    let repo = ListRepository::load(storage.clone()).await;

    let other = ListRepository::load(storage).await;
    other.add(client(2, "Bob")).await;
    other.save().await.unwrap();

    assert_eq!(repo.get_all().await.len(), 1);
    assert_eq!(repo.next_id().await, Some(2));
}

#[tokio::test]
async fn discard_removes_latest_unsaved_add() {
    let storage = InMemoryStorage::<Client>::new();
    let repo = ListRepository::load(storage.clone()).await;
    repo.add(client(1, "Ann")).await;
    repo.add(client(2, "Bob")).await;

    let dropped = repo.discard(2).await.unwrap();
    assert_eq!(dropped.name, "Bob");
    assert!(repo.discard(2).await.is_none());
    assert_eq!(repo.next_id().await, Some(2));

    repo.save().await.unwrap();
    let fresh = ListRepository::load(storage).await;
    let names: Vec<_> = fresh.get_all().await.into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Ann"]);
}

#[tokio::test]
async fn next_id_is_none_at_largest_id() {
    let storage = InMemoryStorage::with_items(vec![client(u64::MAX, "Max")]);
    let repo = ListRepository::load(storage).await;
    assert_eq!(repo.next_id().await, None);
}
