pub mod modules;
mod schema;
pub mod shared;

pub use modules::catalog::{CatalogBrowser, CatalogClient, ContentApiClient, HomeScreen};
pub use modules::library::{FavoriteRepositoryImpl, LibraryService, ProgressRepositoryImpl};
pub use modules::player::{MediaPipeline, PlaybackSession, PlayerController};
pub use shared::errors::{AppError, AppResult};
pub use shared::Database;
