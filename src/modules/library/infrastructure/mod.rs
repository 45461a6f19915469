pub mod favorite_repository_impl;
pub mod models;
pub mod progress_repository_impl;

pub use favorite_repository_impl::FavoriteRepositoryImpl;
pub use progress_repository_impl::ProgressRepositoryImpl;
