use crate::modules::catalog::domain::value_objects::{
    default_filter_groups, CatalogFilter, FilterGroup, SortOption, GENRE_GROUP, SEASON_GROUP,
    STATUS_GROUP,
};
use crate::modules::catalog::domain::{MediaContent, MediaType};
use crate::modules::catalog::traits::CatalogClient;
use crate::shared::errors::AppResult;
use crate::{log_debug, log_warn};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Observable state of one catalog screen.
#[derive(Debug, Clone)]
pub struct CatalogState {
    pub content: Vec<MediaContent>,
    pub filter: CatalogFilter,
    pub filter_groups: Vec<FilterGroup>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub has_more_content: bool,
    pub current_page: u32,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            filter: CatalogFilter::default(),
            filter_groups: default_filter_groups(),
            is_loading: false,
            error: None,
            has_more_content: true,
            current_page: 1,
        }
    }
}

/// Paginated, filterable catalog listing.
///
/// At most one page load is in flight; triggers that arrive while loading are
/// ignored so pages cannot append out of order. An empty page marks the end of
/// the listing and turns further load triggers into no-ops.
pub struct CatalogBrowser {
    client: Arc<dyn CatalogClient>,
    state: Mutex<CatalogState>,
}

impl CatalogBrowser {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self {
            client,
            state: Mutex::new(CatalogState::default()),
        }
    }

    /// Snapshot of the current screen state.
    pub async fn state(&self) -> CatalogState {
        self.state.lock().await.clone()
    }

    /// Load the next page of the current listing.
    pub async fn load_next_page(&self) -> AppResult<()> {
        self.load_content(false).await
    }

    /// Drop loaded pages and reload from page 1.
    pub async fn refresh(&self) -> AppResult<()> {
        self.load_content(true).await
    }

    async fn load_content(&self, refresh: bool) -> AppResult<()> {
        let (media_type, page) = {
            let mut state = self.state.lock().await;

            // Guard before any reset: a refresh during an in-flight load must
            // not wipe the list the pending completion will append into.
            if state.is_loading {
                log_debug!("Catalog load already in flight, ignoring trigger");
                return Ok(());
            }

            if refresh {
                state.content.clear();
                state.current_page = 1;
                state.has_more_content = true;
                state.error = None;
            }

            if !state.has_more_content {
                return Ok(());
            }

            state.is_loading = true;
            state.error = None;
            (state.filter.media_type, state.current_page)
        };

        let result = self.client.fetch_content(media_type, page).await;

        let mut state = self.state.lock().await;
        state.is_loading = false;

        match result {
            Ok(items) if items.is_empty() => {
                state.has_more_content = false;
            }
            Ok(items) => {
                state.content.extend(items);
                state.current_page += 1;
            }
            Err(e) => {
                log_warn!("Catalog page {} load failed: {}", page, e);
                state.error = Some(e.to_string());
            }
        }

        Ok(())
    }

    /// Re-run the listing with the currently selected filters.
    pub async fn apply_filters(&self) -> AppResult<()> {
        self.load_content(true).await
    }

    pub async fn set_media_type(&self, media_type: MediaType) {
        self.state.lock().await.filter.media_type = media_type;
    }

    pub async fn set_sort(&self, sort_by: SortOption) {
        self.state.lock().await.filter.sort_by = sort_by;
    }

    /// Toggle one filter row and mirror the selection into the query filter.
    pub async fn toggle_filter(&self, group_id: &str, filter_id: i32) {
        let mut state = self.state.lock().await;

        let Some(group) = state
            .filter_groups
            .iter_mut()
            .find(|group| group.id == group_id)
        else {
            return;
        };
        let Some(row) = group
            .filters
            .iter_mut()
            .find(|filter| filter.id == filter_id)
        else {
            return;
        };

        row.is_selected = !row.is_selected;
        let name = row.name.clone();
        let selected = row.is_selected;

        match group_id {
            GENRE_GROUP => {
                if selected {
                    state.filter.genres.insert(name);
                } else {
                    state.filter.genres.remove(&name);
                }
            }
            STATUS_GROUP => {
                state.filter.status = selected.then_some(name);
            }
            SEASON_GROUP => {
                state.filter.season = selected.then_some(name);
            }
            _ => {}
        }
    }

    /// Restore the default filter state and clear all selections.
    pub async fn reset_filters(&self) {
        let mut state = self.state.lock().await;

        state.filter = CatalogFilter::default();
        for group in &mut state.filter_groups {
            for filter in &mut group.filters {
                filter.is_selected = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::traits::MockCatalogClient;
    use crate::shared::errors::AppError;
    use chrono::Utc;

    fn content(id: &str) -> MediaContent {
        MediaContent {
            id: id.to_string(),
            title: format!("Title {}", id),
            original_title: None,
            description: String::new(),
            media_type: MediaType::Anime,
            cover_image: String::new(),
            rating: 7.0,
            release_date: Utc::now(),
            genres: Vec::new(),
            status: "Ongoing".to_string(),
            is_favorite: false,
            episodes: None,
            chapters: None,
        }
    }

    #[tokio::test]
    async fn appends_pages_and_advances_page_counter() {
        let mut mock = MockCatalogClient::new();
        mock.expect_fetch_content()
            .returning(|_, page| Ok(vec![content(&format!("p{}", page))]));

        let browser = CatalogBrowser::new(Arc::new(mock));
        browser.load_next_page().await.unwrap();
        browser.load_next_page().await.unwrap();

        let state = browser.state().await;
        assert_eq!(state.content.len(), 2);
        assert_eq!(state.current_page, 3);
        assert!(state.has_more_content);
    }

    #[tokio::test]
    async fn empty_page_ends_pagination_and_further_loads_are_noops() {
        let mut mock = MockCatalogClient::new();
        mock.expect_fetch_content().times(1).returning(|_, _| Ok(vec![]));

        let browser = CatalogBrowser::new(Arc::new(mock));
        browser.load_next_page().await.unwrap();

        assert!(!browser.state().await.has_more_content);

        // Would panic via times(1) if these reached the client.
        browser.load_next_page().await.unwrap();
        browser.load_next_page().await.unwrap();
    }

    #[tokio::test]
    async fn fetch_failure_populates_error_and_stops_load() {
        let mut mock = MockCatalogClient::new();
        mock.expect_fetch_content()
            .returning(|_, _| Err(AppError::ExternalServiceError("offline".to_string())));

        let browser = CatalogBrowser::new(Arc::new(mock));
        browser.load_next_page().await.unwrap();

        let state = browser.state().await;
        assert!(state.error.is_some());
        assert!(!state.is_loading);
        assert!(state.content.is_empty());
    }

    #[tokio::test]
    async fn toggle_filter_mirrors_into_query_filter() {
        let mock = MockCatalogClient::new();
        let browser = CatalogBrowser::new(Arc::new(mock));

        browser.toggle_filter(GENRE_GROUP, 1).await;
        browser.toggle_filter(STATUS_GROUP, 101).await;
        let state = browser.state().await;
        assert!(state.filter.genres.contains("Action"));
        assert_eq!(state.filter.status.as_deref(), Some("Ongoing"));

        browser.toggle_filter(GENRE_GROUP, 1).await;
        browser.toggle_filter(STATUS_GROUP, 101).await;
        let state = browser.state().await;
        assert!(state.filter.genres.is_empty());
        assert!(state.filter.status.is_none());
    }

    #[tokio::test]
    async fn reset_restores_defaults_and_clears_selections() {
        let mock = MockCatalogClient::new();
        let browser = CatalogBrowser::new(Arc::new(mock));

        browser.toggle_filter(GENRE_GROUP, 2).await;
        browser.set_media_type(MediaType::Manga).await;
        browser.reset_filters().await;

        let state = browser.state().await;
        assert_eq!(state.filter.media_type, MediaType::Anime);
        assert!(state.filter.genres.is_empty());
        assert!(state
            .filter_groups
            .iter()
            .flat_map(|g| g.filters.iter())
            .all(|f| !f.is_selected));
    }
}
