use async_trait::async_trait;
use crm_types::domain::entity::{Entity, EntityId};
use crm_types::ports::repository::Repository;
use crm_types::ports::storage::StorageError;
use dashmap::DashMap;
use tracing::trace;

/// Read-through cache in front of another repository.
///
/// Only `get_by_id` hits are cached. Any `add` or `discard` drops the whole
/// cache.
pub struct CachedRepository<T, R> {
    inner: R,
    cache: DashMap<EntityId, T>,
}

impl<T: Entity, R: Repository<T>> CachedRepository<T, R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<T: Entity, R: Repository<T>> Repository<T> for CachedRepository<T, R> {
    async fn get_all(&self) -> Vec<T> {
        self.inner.get_all().await
    }

    async fn get_by_id(&self, id: EntityId) -> Option<T> {
        if let Some(hit) = self.cache.get(&id) {
            trace!(id, "cache hit");
            return Some(hit.value().clone());
        }
        let fetched = self.inner.get_by_id(id).await?;
        self.cache.insert(id, fetched.clone());
        Some(fetched)
    }

    async fn add(&self, entity: T) {
        self.inner.add(entity).await;
        self.cache.clear();
    }

    async fn discard(&self, id: EntityId) -> Option<T> {
        let removed = self.inner.discard(id).await;
        self.cache.clear();
        removed
    }

    async fn next_id(&self) -> Option<EntityId> {
        self.inner.next_id().await
    }

    async fn save(&self) -> Result<(), StorageError> {
        self.inner.save().await
    }
}
