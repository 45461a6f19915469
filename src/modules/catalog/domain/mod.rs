pub mod entities;
pub mod value_objects;

pub use entities::{Chapter, Episode, MediaContent};
pub use value_objects::{CatalogFilter, MediaType, SortOption};
