use nd_core::{ArticleStore, Error, Result};
use std::sync::Arc;

pub mod backends;

pub use backends::*;

#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    fn get_error_message() -> &'static str;
    async fn new() -> Result<Self>
    where
        Self: Sized;
}

/// Build a storage backend from its CLI name.
pub async fn create_storage(backend: &str) -> Result<Arc<dyn ArticleStore>> {
    match backend {
        "memory" => Ok(Arc::new(MemoryStorage::new().await?)),
        #[cfg(feature = "sqlite")]
        "sqlite" => Ok(Arc::new(SqliteStorage::new().await?)),
        other => Err(Error::Storage(format!("Unknown storage backend: {}", other))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::StorageBackend;
}
