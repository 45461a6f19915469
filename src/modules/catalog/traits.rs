use crate::modules::catalog::domain::{Chapter, Episode, MediaContent, MediaType};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Read-only port to the remote content API.
///
/// All fetches are paginated or keyed lookups; an empty page means the end of
/// the listing. Implementations surface failures as `AppError`, never panic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch one page of a type-specific listing. Empty result = no more pages.
    async fn fetch_content(&self, media_type: MediaType, page: u32)
        -> AppResult<Vec<MediaContent>>;

    /// Full-text search, optionally narrowed to one media type.
    async fn search(
        &self,
        query: &str,
        media_type: Option<MediaType>,
    ) -> AppResult<Vec<MediaContent>>;

    async fn fetch_episodes(&self, content_id: &str) -> AppResult<Vec<Episode>>;

    async fn fetch_chapters(&self, content_id: &str) -> AppResult<Vec<Chapter>>;
}
