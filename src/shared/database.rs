use crate::log_info;
use crate::shared::errors::AppError;
use crate::shared::utils::logger::LogContext;
use diesel::r2d2::{self, ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::env;
use std::time::Duration;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const DATABASE_PATH_VAR: &str = "ANILAB_DATABASE_PATH";
const DEFAULT_DATABASE_PATH: &str = "anilab.db";

#[derive(Debug)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Open (or create) the local store at the given path and run pending
    /// migrations.
    pub fn new(database_path: &str) -> Result<Self, AppError> {
        let db = Self::build(database_path, Self::optimal_pool_size())?;

        log_info!(
            "Local store initialized at {} (pool size {})",
            database_path,
            db.pool.max_size()
        );

        Ok(db)
    }

    /// Resolve the store location from the environment (`ANILAB_DATABASE_PATH`),
    /// falling back to a file in the working directory.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let path =
            env::var(DATABASE_PATH_VAR).unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string());

        if path.trim().is_empty() {
            return Err(AppError::DatabaseError(format!(
                "{} is set but empty",
                DATABASE_PATH_VAR
            )));
        }

        Self::new(&path)
    }

    /// Volatile store for tests. A single pooled connection, since every
    /// SQLite `:memory:` connection is its own database.
    pub fn in_memory() -> Result<Self, AppError> {
        Self::build(":memory:", 1)
    }

    /// Create a Database instance from an existing pool (useful for testing)
    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    fn build(database_url: &str, max_size: u32) -> Result<Self, AppError> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);

        let pool = r2d2::Pool::builder()
            .max_size(max_size)
            .connection_timeout(Duration::from_secs(10))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to create connection pool: {}", e))
            })?;

        let db = Self { pool };
        db.run_migrations()?;

        Ok(db)
    }

    fn run_migrations(&self) -> Result<(), AppError> {
        let mut conn = self.get_connection()?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::DatabaseError(format!("Failed to run migrations: {}", e)))?;
        Ok(())
    }

    /// Pool sizing for an embedded single-user store: a handful of
    /// connections is plenty.
    fn optimal_pool_size() -> u32 {
        let cpu_count = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);

        std::cmp::min(cpu_count, 4) as u32
    }

    pub fn get_connection(&self) -> Result<DbConnection, AppError> {
        let start = std::time::Instant::now();

        match self.pool.get() {
            Ok(conn) => {
                let duration = start.elapsed().as_millis() as u64;
                if duration > 100 {
                    LogContext::db_operation("connection_acquire", "pool", Some(duration));
                }
                Ok(conn)
            }
            Err(e) => {
                LogContext::error_with_context(
                    &e,
                    "Failed to acquire database connection from pool",
                );
                Err(AppError::from(e))
            }
        }
    }

    /// Get the underlying connection pool (useful for testing and repository initialization)
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}
