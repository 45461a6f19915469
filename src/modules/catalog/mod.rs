pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod traits;

pub use application::{CatalogBrowser, CatalogState, HomeScreen, HomeScreenState};
pub use domain::{Chapter, Episode, MediaContent, MediaType};
pub use infrastructure::ContentApiClient;
pub use traits::CatalogClient;
