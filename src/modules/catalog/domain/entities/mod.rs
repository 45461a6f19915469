pub mod media_content;

pub use media_content::{Chapter, Episode, MediaContent};
