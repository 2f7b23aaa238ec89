use async_trait::async_trait;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Whole-collection persistence for one entity type.
///
/// `load` never fails: an absent or unreadable backing store is an empty
/// collection. `save` replaces the stored collection in its entirety.
#[async_trait]
pub trait Storage<T>: Send + Sync + 'static {
    async fn load(&self) -> Vec<T>;
    async fn save(&self, items: &[T]) -> Result<(), StorageError>;
}
