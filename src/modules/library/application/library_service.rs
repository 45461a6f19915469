use crate::modules::catalog::domain::MediaType;
use crate::modules::library::domain::{
    FavoriteEntry, FavoriteRepository, ProgressKey, ProgressRecord, ProgressRepository,
};
use crate::shared::errors::{AppError, AppResult};
use crate::log_debug;
use std::sync::Arc;

/// User library facade: favorites plus watch and reading progress.
///
/// Progress is stored last-write-wins per [`ProgressKey`]; a slot that was
/// never written reads back as `0.0`.
pub struct LibraryService {
    favorites: Arc<dyn FavoriteRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl LibraryService {
    pub fn new(
        favorites: Arc<dyn FavoriteRepository>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            favorites,
            progress,
        }
    }

    pub async fn add_favorite(
        &self,
        content_id: &str,
        title: &str,
        media_type: MediaType,
    ) -> AppResult<()> {
        let entry = FavoriteEntry::new(content_id, title, media_type);
        self.favorites.upsert(entry).await?;
        log_debug!("Added favorite {}", content_id);
        Ok(())
    }

    /// Remove a favorite; removing an absent entry is a no-op.
    pub async fn remove_favorite(&self, content_id: &str) -> AppResult<()> {
        let removed = self.favorites.delete(content_id).await?;
        if !removed {
            log_debug!("Favorite {} was not present, nothing removed", content_id);
        }
        Ok(())
    }

    pub async fn is_favorite(&self, content_id: &str) -> AppResult<bool> {
        self.favorites.exists(content_id).await
    }

    /// All favorites, most recently added first.
    pub async fn favorites(&self) -> AppResult<Vec<FavoriteEntry>> {
        self.favorites.get_all().await
    }

    /// Stored progress fraction for a slot, `0.0` when nothing was saved.
    pub async fn get_progress(&self, key: &ProgressKey) -> AppResult<f64> {
        let record = self.progress.find(key).await?;
        Ok(record.map(|r| r.progress).unwrap_or(0.0))
    }

    /// Persist a progress fraction. Values must be finite and in `[0.0, 1.0]`.
    pub async fn set_progress(&self, key: &ProgressKey, progress: f64) -> AppResult<()> {
        if !progress.is_finite() || !(0.0..=1.0).contains(&progress) {
            return Err(AppError::InvalidInput(format!(
                "Progress must be a fraction between 0 and 1, got {}",
                progress
            )));
        }

        self.progress
            .upsert(ProgressRecord::new(key, progress))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::library::domain::repositories::{
        MockFavoriteRepository, MockProgressRepository,
    };

    fn service_with_progress(progress: MockProgressRepository) -> LibraryService {
        LibraryService::new(Arc::new(MockFavoriteRepository::new()), Arc::new(progress))
    }

    #[tokio::test]
    async fn unseen_slot_reads_back_as_zero() {
        let mut progress = MockProgressRepository::new();
        progress.expect_find().returning(|_| Ok(None));

        let service = service_with_progress(progress);
        let key = ProgressKey::for_episode("show-1", "ep-1").unwrap();

        assert_eq!(service.get_progress(&key).await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn out_of_range_progress_is_rejected_without_touching_storage() {
        let mut progress = MockProgressRepository::new();
        progress.expect_upsert().times(0);

        let service = service_with_progress(progress);
        let key = ProgressKey::for_episode("show-1", "ep-1").unwrap();

        for value in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            let result = service.set_progress(&key, value).await;
            assert!(matches!(result, Err(AppError::InvalidInput(_))));
        }
    }

    #[tokio::test]
    async fn boundary_fractions_are_accepted() {
        let mut progress = MockProgressRepository::new();
        progress.expect_upsert().times(2).returning(|_| Ok(()));

        let service = service_with_progress(progress);
        let key = ProgressKey::for_chapter("manga-1", "ch-1").unwrap();

        service.set_progress(&key, 0.0).await.unwrap();
        service.set_progress(&key, 1.0).await.unwrap();
    }

    #[tokio::test]
    async fn removing_missing_favorite_is_a_noop() {
        let mut favorites = MockFavoriteRepository::new();
        favorites.expect_delete().returning(|_| Ok(false));

        let service =
            LibraryService::new(Arc::new(favorites), Arc::new(MockProgressRepository::new()));

        service.remove_favorite("missing").await.unwrap();
    }
}
