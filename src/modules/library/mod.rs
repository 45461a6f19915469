pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::LibraryService;
pub use domain::{FavoriteEntry, FavoriteRepository, ProgressKey, ProgressRecord, ProgressRepository};
pub use infrastructure::{FavoriteRepositoryImpl, ProgressRepositoryImpl};
