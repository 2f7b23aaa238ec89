use async_trait::async_trait;
use crm_types::domain::entity::{self, Entity, EntityId};
use crm_types::ports::repository::Repository;
use crm_types::ports::storage::{Storage, StorageError};
use tokio::sync::RwLock;

/// In-memory list loaded once from a storage adapter.
///
/// Changes made to the storage after construction are not observed; build a
/// new repository to pick them up.
pub struct ListRepository<T, S> {
    items: RwLock<Vec<T>>,
    storage: S,
}

impl<T: Entity, S: Storage<T>> ListRepository<T, S> {
    pub async fn load(storage: S) -> Self {
        let items = storage.load().await;
        Self {
            items: RwLock::new(items),
            storage,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[async_trait]
impl<T: Entity, S: Storage<T>> Repository<T> for ListRepository<T, S> {
    async fn get_all(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    async fn get_by_id(&self, id: EntityId) -> Option<T> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    async fn add(&self, entity: T) {
        self.items.write().await.push(entity);
    }

    async fn discard(&self, id: EntityId) -> Option<T> {
        let mut items = self.items.write().await;
        let pos = items.iter().rposition(|item| item.id() == id)?;
        Some(items.remove(pos))
    }

    async fn next_id(&self) -> Option<EntityId> {
        entity::next_id(self.items.read().await.iter())
    }

    async fn save(&self) -> Result<(), StorageError> {
        let items = self.items.read().await;
        self.storage.save(&items).await
    }
}
