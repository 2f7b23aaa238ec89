use async_trait::async_trait;
use crm_types::ports::storage::{Storage, StorageError};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Storage kept in process memory. Clones share the same saved snapshot, so a
/// repository rebuilt over a clone sees what the previous one saved.
#[derive(Clone)]
pub struct InMemoryStorage<T> {
    saved: Arc<RwLock<Vec<T>>>,
}

impl<T> InMemoryStorage<T> {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            saved: Arc::new(RwLock::new(items)),
        }
    }
}

impl<T> Default for InMemoryStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> Storage<T> for InMemoryStorage<T> {
    async fn load(&self) -> Vec<T> {
        self.saved.read().await.clone()
    }

    async fn save(&self, items: &[T]) -> Result<(), StorageError> {
        *self.saved.write().await = items.to_vec();
        Ok(())
    }
}
