#[cfg(not(any(feature = "json", feature = "memory")))]
compile_error!("Enable a storage feature: `json` or `memory`.");

use crm_types::domain::entity::Entity;
use std::path::Path;

pub mod cached;
#[cfg(feature = "json")]
pub mod json;
pub mod list;
#[cfg(feature = "memory")]
pub mod memory;

pub use cached::CachedRepository;
pub use list::ListRepository;

/// Storage adapter used by [`build_repo`]: JSON files when available.
#[cfg(feature = "json")]
pub type Store<T> = json::JsonFileStorage<T>;
#[cfg(all(feature = "memory", not(feature = "json")))]
pub type Store<T> = memory::InMemoryStorage<T>;

pub type Repo<T> = ListRepository<T, Store<T>>;

#[cfg(feature = "json")]
pub async fn build_repo<T: Entity>(path: &Path) -> Repo<T> {
    ListRepository::load(json::JsonFileStorage::new(path)).await
}

// Memory-only builds ignore the location.
#[cfg(all(feature = "memory", not(feature = "json")))]
pub async fn build_repo<T: Entity>(_: &Path) -> Repo<T> {
    ListRepository::load(memory::InMemoryStorage::new()).await
}
