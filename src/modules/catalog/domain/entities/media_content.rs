use crate::modules::catalog::domain::value_objects::MediaType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unit of media in the catalog: a series of episodes (video family) or
/// chapters (reading family). Wire format matches the content API, which
/// serializes camelCase keys and a `type` discriminator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaContent {
    pub id: String,
    pub title: String,
    pub original_title: Option<String>,
    pub description: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub cover_image: String,
    pub rating: f64,
    pub release_date: DateTime<Utc>,
    pub genres: Vec<String>,
    pub status: String,
    #[serde(default)]
    pub is_favorite: bool,

    // Populated for anime/drama/cartoon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episodes: Option<Vec<Episode>>,

    // Populated for manga/comic/light novels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapters: Option<Vec<Chapter>>,
}

/// A watchable unit within video content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: String,
    pub number: u32,
    pub title: String,
    /// Duration in seconds.
    pub duration: f64,
    #[serde(rename = "streamingURL")]
    pub streaming_url: String,
    /// Watched fraction in [0, 1].
    #[serde(default)]
    pub watch_progress: f64,
}

/// A readable unit within manga/comic/light novel content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub number: u32,
    pub title: String,
    /// Page image URLs in reading order.
    pub pages: Vec<String>,
    /// Read fraction in [0, 1].
    #[serde(default)]
    pub read_progress: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_api_payload() {
        let payload = r#"{
            "id": "c-42",
            "title": "Cosmic Drift",
            "originalTitle": "コズミック・ドリフト",
            "description": "A crew adrift between stations.",
            "type": "anime",
            "coverImage": "https://cdn.example/c-42.jpg",
            "rating": 8.4,
            "releaseDate": "2024-04-07T00:00:00Z",
            "genres": ["Sci-Fi", "Drama"],
            "status": "Ongoing",
            "isFavorite": false,
            "episodes": [
                {
                    "id": "e-1",
                    "number": 1,
                    "title": "Departure",
                    "duration": 1420.0,
                    "streamingURL": "https://cdn.example/e-1.m3u8",
                    "watchProgress": 0.0
                }
            ]
        }"#;

        let content: MediaContent = serde_json::from_str(payload).unwrap();

        assert_eq!(content.media_type, MediaType::Anime);
        assert!(content.media_type.is_video());
        assert!(content.chapters.is_none());

        let episodes = content.episodes.unwrap();
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].streaming_url, "https://cdn.example/e-1.m3u8");
    }

    #[test]
    fn progress_fields_default_to_zero() {
        let payload = r#"{
            "id": "ch-1",
            "number": 1,
            "title": "Opening",
            "pages": ["https://cdn.example/p1.png"]
        }"#;

        let chapter: Chapter = serde_json::from_str(payload).unwrap();
        assert_eq!(chapter.read_progress, 0.0);
    }
}
