use serde::de::DeserializeOwned;
use serde::Serialize;

pub type EntityId = u64;

/// A persisted record identified by an integer id.
///
/// Repositories are generic over this trait; the id accessor is the only
/// behaviour they need from the record itself.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn id(&self) -> EntityId;
}

/// Next id for a collection: one past the largest id, or `1` when empty.
///
/// `None` once the largest id is `EntityId::MAX`; ids are never wrapped.
pub fn next_id<'a, T: Entity + 'a>(items: impl IntoIterator<Item = &'a T>) -> Option<EntityId> {
    match items.into_iter().map(Entity::id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}
