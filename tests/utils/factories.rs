/// Test data factories with sensible defaults.
use anilab::modules::catalog::domain::{Episode, MediaContent, MediaType};
use chrono::{DateTime, Duration, Utc};

pub struct ContentFactory {
    id: String,
    title: String,
    media_type: MediaType,
    rating: f64,
    release_date: DateTime<Utc>,
    genres: Vec<String>,
    status: String,
}

impl ContentFactory {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: format!("Title {}", id),
            media_type: MediaType::Anime,
            rating: 7.5,
            release_date: Utc::now(),
            genres: vec!["Action".to_string()],
            status: "Ongoing".to_string(),
        }
    }

    pub fn with_type(mut self, media_type: MediaType) -> Self {
        self.media_type = media_type;
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn released_days_ago(mut self, days: i64) -> Self {
        self.release_date = Utc::now() - Duration::days(days);
        self
    }

    pub fn build(self) -> MediaContent {
        MediaContent {
            id: self.id,
            title: self.title,
            original_title: None,
            description: "A test synopsis".to_string(),
            media_type: self.media_type,
            cover_image: "https://cdn.example/cover.jpg".to_string(),
            rating: self.rating,
            release_date: self.release_date,
            genres: self.genres,
            status: self.status,
            is_favorite: false,
            episodes: None,
            chapters: None,
        }
    }
}

pub fn episode(id: &str, number: u32, duration: f64) -> Episode {
    Episode {
        id: id.to_string(),
        number,
        title: format!("Episode {}", number),
        duration,
        streaming_url: format!("https://cdn.example/{}.m3u8", id),
        watch_progress: 0.0,
    }
}
