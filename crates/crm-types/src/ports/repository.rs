use async_trait::async_trait;

use super::storage::StorageError;
use crate::domain::entity::{Entity, EntityId};

/// The mutation surface over one entity type's collection.
///
/// Writes only touch memory until `save` is called.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync + 'static {
    /// Snapshot of the collection in insertion order.
    async fn get_all(&self) -> Vec<T>;
    async fn get_by_id(&self, id: EntityId) -> Option<T>;
    async fn add(&self, entity: T);
    /// Drop the most recently added entity with this id, undoing an add
    /// whose save failed.
    async fn discard(&self, id: EntityId) -> Option<T>;
    /// `None` when the id space is used up.
    async fn next_id(&self) -> Option<EntityId>;
    async fn save(&self) -> Result<(), StorageError>;
}
