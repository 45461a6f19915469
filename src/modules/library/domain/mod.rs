pub mod entities;
pub mod repositories;

pub use entities::{FavoriteEntry, ProgressKey, ProgressRecord};
pub use repositories::{FavoriteRepository, ProgressRepository};
