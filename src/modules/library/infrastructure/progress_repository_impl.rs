use diesel::prelude::*;
use std::sync::Arc;
use tokio::task;

use super::models::ProgressRow;
use crate::modules::library::domain::{ProgressKey, ProgressRecord, ProgressRepository};
use crate::schema::watch_progress;
use crate::shared::errors::AppResult;
use crate::shared::Database;
use async_trait::async_trait;

pub struct ProgressRepositoryImpl {
    db: Arc<Database>,
}

impl ProgressRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

type ProgressQuery<'a> = watch_progress::BoxedQuery<'a, diesel::sqlite::Sqlite>;

/// Null-aware filter for one progress slot. A missing episode or chapter id
/// must match NULL, not any row for the content.
fn scoped_to_key<'a>(key: &ProgressKey) -> ProgressQuery<'a> {
    let mut query = watch_progress::table
        .filter(watch_progress::content_id.eq(key.content_id().to_string()))
        .into_boxed();

    query = match key.episode_id() {
        Some(episode_id) => query.filter(watch_progress::episode_id.eq(episode_id.to_string())),
        None => query.filter(watch_progress::episode_id.is_null()),
    };
    query = match key.chapter_id() {
        Some(chapter_id) => query.filter(watch_progress::chapter_id.eq(chapter_id.to_string())),
        None => query.filter(watch_progress::chapter_id.is_null()),
    };

    query
}

#[async_trait]
impl ProgressRepository for ProgressRepositoryImpl {
    async fn find(&self, key: &ProgressKey) -> AppResult<Option<ProgressRecord>> {
        let db = Arc::clone(&self.db);
        let key = key.clone();

        let row = task::spawn_blocking(move || -> AppResult<Option<ProgressRow>> {
            let mut conn = db.get_connection()?;

            let row = scoped_to_key(&key)
                .first::<ProgressRow>(&mut conn)
                .optional()?;
            Ok(row)
        })
        .await??;

        Ok(row.map(ProgressRow::into_record))
    }

    async fn upsert(&self, record: ProgressRecord) -> AppResult<()> {
        let db = Arc::clone(&self.db);
        let key = record.key()?;

        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;

            let existing = scoped_to_key(&key)
                .select(watch_progress::id)
                .first::<String>(&mut conn)
                .optional()?;

            match existing {
                Some(id) => {
                    diesel::update(watch_progress::table.find(id))
                        .set((
                            watch_progress::progress.eq(record.progress),
                            watch_progress::last_updated.eq(record.last_updated),
                        ))
                        .execute(&mut conn)?;
                }
                None => {
                    let row = ProgressRow::from_record(&record);
                    diesel::insert_into(watch_progress::table)
                        .values(&row)
                        .execute(&mut conn)?;
                }
            }

            Ok(())
        })
        .await??;

        Ok(())
    }
}
