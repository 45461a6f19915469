use super::entities::{FavoriteEntry, ProgressKey, ProgressRecord};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Persistence port for the user's favorites.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    async fn upsert(&self, entry: FavoriteEntry) -> AppResult<()>;
    async fn delete(&self, content_id: &str) -> AppResult<bool>;
    async fn exists(&self, content_id: &str) -> AppResult<bool>;
    async fn get_all(&self) -> AppResult<Vec<FavoriteEntry>>;
}

/// Persistence port for playback and reading progress.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    async fn find(&self, key: &ProgressKey) -> AppResult<Option<ProgressRecord>>;
    async fn upsert(&self, record: ProgressRecord) -> AppResult<()>;
}
