use async_trait::async_trait;
use crm_types::domain::entity::Entity;
use crm_types::ports::storage::{Storage, StorageError};
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One JSON file holding the whole collection as a pretty-printed array.
///
/// Saves overwrite the file in place; there is no atomic rename, so a crash
/// mid-write can leave a truncated file behind (which then loads as empty).
pub struct JsonFileStorage<T> {
    path: PathBuf,
    _entity: PhantomData<fn() -> T>,
}

impl<T> JsonFileStorage<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _entity: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> Clone for JsonFileStorage<T> {
    fn clone(&self) -> Self {
        Self::new(self.path.clone())
    }
}

#[async_trait]
impl<T: Entity> Storage<T> for JsonFileStorage<T> {
    async fn load(&self) -> Vec<T> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no data file, starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable data file, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Option<Vec<T>>>(&bytes) {
            Ok(Some(items)) => {
                debug!(path = %self.path.display(), count = items.len(), "loaded collection");
                items
            }
            Ok(None) => {
                warn!(path = %self.path.display(), "data file holds null, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "malformed data file, starting empty");
                Vec::new()
            }
        }
    }

    async fn save(&self, items: &[T]) -> Result<(), StorageError> {
        let write_err = |source: std::io::Error| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
            }
        }

        let body = serde_json::to_vec_pretty(items)?;
        tokio::fs::write(&self.path, body).await.map_err(write_err)?;
        debug!(path = %self.path.display(), count = items.len(), "saved collection");
        Ok(())
    }
}
