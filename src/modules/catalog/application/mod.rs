pub mod catalog_browser;
pub mod home_screen;

pub use catalog_browser::{CatalogBrowser, CatalogState};
pub use home_screen::{HomeScreen, HomeScreenState};
