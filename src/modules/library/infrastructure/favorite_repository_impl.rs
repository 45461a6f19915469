use diesel::prelude::*;
use std::sync::Arc;
use tokio::task;

use super::models::FavoriteRow;
use crate::modules::library::domain::{FavoriteEntry, FavoriteRepository};
use crate::schema::favorites;
use crate::shared::errors::AppResult;
use crate::shared::Database;
use async_trait::async_trait;

pub struct FavoriteRepositoryImpl {
    db: Arc<Database>,
}

impl FavoriteRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FavoriteRepository for FavoriteRepositoryImpl {
    async fn upsert(&self, entry: FavoriteEntry) -> AppResult<()> {
        let db = Arc::clone(&self.db);
        let row = FavoriteRow::from_entry(&entry);

        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;

            diesel::replace_into(favorites::table)
                .values(&row)
                .execute(&mut conn)?;

            Ok(())
        })
        .await??;

        Ok(())
    }

    async fn delete(&self, content_id: &str) -> AppResult<bool> {
        let db = Arc::clone(&self.db);
        let content_id = content_id.to_string();

        let deleted = task::spawn_blocking(move || -> AppResult<usize> {
            let mut conn = db.get_connection()?;

            let count = diesel::delete(favorites::table.find(content_id)).execute(&mut conn)?;
            Ok(count)
        })
        .await??;

        Ok(deleted > 0)
    }

    async fn exists(&self, content_id: &str) -> AppResult<bool> {
        let db = Arc::clone(&self.db);
        let content_id = content_id.to_string();

        task::spawn_blocking(move || -> AppResult<bool> {
            let mut conn = db.get_connection()?;

            use diesel::dsl::exists;
            use diesel::select;

            let found = select(exists(favorites::table.find(content_id)))
                .get_result::<bool>(&mut conn)?;
            Ok(found)
        })
        .await?
    }

    async fn get_all(&self) -> AppResult<Vec<FavoriteEntry>> {
        let db = Arc::clone(&self.db);

        let rows = task::spawn_blocking(move || -> AppResult<Vec<FavoriteRow>> {
            let mut conn = db.get_connection()?;

            let rows = favorites::table
                .order(favorites::date_added.desc())
                .load::<FavoriteRow>(&mut conn)?;
            Ok(rows)
        })
        .await??;

        rows.into_iter().map(FavoriteRow::into_entry).collect()
    }
}
