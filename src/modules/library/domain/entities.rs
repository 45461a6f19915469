use crate::modules::catalog::domain::MediaType;
use crate::shared::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A piece of content the user has marked as a favorite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub content_id: String,
    pub title: String,
    pub media_type: MediaType,
    pub date_added: DateTime<Utc>,
}

impl FavoriteEntry {
    pub fn new(content_id: &str, title: &str, media_type: MediaType) -> Self {
        Self {
            content_id: content_id.to_string(),
            title: title.to_string(),
            media_type,
            date_added: Utc::now(),
        }
    }
}

/// Identifies one progress slot: a content item plus at most one of an
/// episode or a chapter. Content-level progress has neither.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProgressKey {
    content_id: String,
    episode_id: Option<String>,
    chapter_id: Option<String>,
}

impl ProgressKey {
    pub fn new(
        content_id: &str,
        episode_id: Option<&str>,
        chapter_id: Option<&str>,
    ) -> AppResult<Self> {
        if content_id.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Content id cannot be empty".to_string(),
            ));
        }
        if episode_id.is_some() && chapter_id.is_some() {
            return Err(AppError::InvalidInput(
                "Progress cannot target both an episode and a chapter".to_string(),
            ));
        }

        Ok(Self {
            content_id: content_id.to_string(),
            episode_id: episode_id.map(str::to_string),
            chapter_id: chapter_id.map(str::to_string),
        })
    }

    pub fn for_content(content_id: &str) -> AppResult<Self> {
        Self::new(content_id, None, None)
    }

    pub fn for_episode(content_id: &str, episode_id: &str) -> AppResult<Self> {
        Self::new(content_id, Some(episode_id), None)
    }

    pub fn for_chapter(content_id: &str, chapter_id: &str) -> AppResult<Self> {
        Self::new(content_id, None, Some(chapter_id))
    }

    pub fn content_id(&self) -> &str {
        &self.content_id
    }

    pub fn episode_id(&self) -> Option<&str> {
        self.episode_id.as_deref()
    }

    pub fn chapter_id(&self) -> Option<&str> {
        self.chapter_id.as_deref()
    }
}

/// Stored progress for one [`ProgressKey`], as a fraction in `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub content_id: String,
    pub episode_id: Option<String>,
    pub chapter_id: Option<String>,
    pub progress: f64,
    pub last_updated: DateTime<Utc>,
}

impl ProgressRecord {
    pub fn new(key: &ProgressKey, progress: f64) -> Self {
        Self {
            content_id: key.content_id().to_string(),
            episode_id: key.episode_id().map(str::to_string),
            chapter_id: key.chapter_id().map(str::to_string),
            progress,
            last_updated: Utc::now(),
        }
    }

    pub fn key(&self) -> AppResult<ProgressKey> {
        ProgressKey::new(
            &self.content_id,
            self.episode_id.as_deref(),
            self.chapter_id.as_deref(),
        )
    }
}
