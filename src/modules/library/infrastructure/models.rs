use crate::modules::catalog::domain::MediaType;
use crate::modules::library::domain::{FavoriteEntry, ProgressRecord};
use crate::schema::{favorites, watch_progress};
use crate::shared::errors::AppResult;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use std::str::FromStr;

#[derive(Debug, Clone, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = favorites)]
pub struct FavoriteRow {
    pub content_id: String,
    pub title: String,
    pub media_type: String,
    pub date_added: DateTime<Utc>,
}

impl FavoriteRow {
    pub fn from_entry(entry: &FavoriteEntry) -> Self {
        Self {
            content_id: entry.content_id.clone(),
            title: entry.title.clone(),
            media_type: entry.media_type.as_str().to_string(),
            date_added: entry.date_added,
        }
    }

    pub fn into_entry(self) -> AppResult<FavoriteEntry> {
        Ok(FavoriteEntry {
            content_id: self.content_id,
            title: self.title,
            media_type: MediaType::from_str(&self.media_type)?,
            date_added: self.date_added,
        })
    }
}

#[derive(Debug, Clone, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = watch_progress)]
pub struct ProgressRow {
    pub id: String,
    pub content_id: String,
    pub episode_id: Option<String>,
    pub chapter_id: Option<String>,
    pub progress: f64,
    pub last_updated: DateTime<Utc>,
}

impl ProgressRow {
    pub fn from_record(record: &ProgressRecord) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content_id: record.content_id.clone(),
            episode_id: record.episode_id.clone(),
            chapter_id: record.chapter_id.clone(),
            progress: record.progress,
            last_updated: record.last_updated,
        }
    }

    pub fn into_record(self) -> ProgressRecord {
        ProgressRecord {
            content_id: self.content_id,
            episode_id: self.episode_id,
            chapter_id: self.chapter_id,
            progress: self.progress,
            last_updated: self.last_updated,
        }
    }
}
