use crate::modules::catalog::domain::{MediaContent, MediaType};
use crate::modules::catalog::traits::CatalogClient;
use crate::shared::errors::AppResult;
use crate::{log_debug, log_warn};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Items per type-specific shelf.
pub const SHELF_LIMIT: usize = 10;
/// Items in the merged "recently updated" row.
pub const RECENTLY_UPDATED_LIMIT: usize = 20;

/// Types merged into the "recently updated" row.
const RECENT_TYPES: [MediaType; 3] = [MediaType::Anime, MediaType::Drama, MediaType::Manga];

/// Observable state of the home screen.
#[derive(Debug, Clone, Default)]
pub struct HomeScreenState {
    pub popular_anime: Vec<MediaContent>,
    pub popular_dramas: Vec<MediaContent>,
    pub recently_updated: Vec<MediaContent>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Home-screen aggregation over the content API.
///
/// Shelves are per-type top-N; the "recently updated" row merges the
/// type-specific fetches, sorts by release date descending and truncates only
/// after the merge.
pub struct HomeScreen {
    client: Arc<dyn CatalogClient>,
    state: Mutex<HomeScreenState>,
}

impl HomeScreen {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self {
            client,
            state: Mutex::new(HomeScreenState::default()),
        }
    }

    pub async fn state(&self) -> HomeScreenState {
        self.state.lock().await.clone()
    }

    pub async fn load(&self) -> AppResult<()> {
        {
            let mut state = self.state.lock().await;
            if state.is_loading {
                log_debug!("Home screen load already in flight, ignoring trigger");
                return Ok(());
            }
            state.is_loading = true;
            state.error = None;
        }

        let fetches = RECENT_TYPES.iter().map(|media_type| {
            let client = Arc::clone(&self.client);
            let media_type = *media_type;
            async move { (media_type, client.fetch_content(media_type, 1).await) }
        });
        let results = join_all(fetches).await;

        let mut state = self.state.lock().await;
        state.is_loading = false;

        let mut merged: Vec<MediaContent> = Vec::new();
        for (media_type, result) in results {
            match result {
                Ok(items) => {
                    match media_type {
                        MediaType::Anime => {
                            state.popular_anime =
                                items.iter().take(SHELF_LIMIT).cloned().collect();
                        }
                        MediaType::Drama => {
                            state.popular_dramas =
                                items.iter().take(SHELF_LIMIT).cloned().collect();
                        }
                        _ => {}
                    }
                    merged.extend(items);
                }
                Err(e) => {
                    log_warn!("Home screen fetch for {} failed: {}", media_type, e);
                    if state.error.is_none() {
                        state.error = Some(e.to_string());
                    }
                }
            }
        }

        // Truncation happens after the merge and sort, never per source.
        merged.sort_by(|a, b| b.release_date.cmp(&a.release_date));
        merged.truncate(RECENTLY_UPDATED_LIMIT);
        state.recently_updated = merged;

        Ok(())
    }

    /// Clear the surfaced error and reload everything.
    pub async fn retry(&self) -> AppResult<()> {
        self.state.lock().await.error = None;
        self.load().await
    }
}
