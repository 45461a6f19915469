use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of media a piece of content belongs to. Video kinds carry episodes,
/// reading kinds carry chapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MediaType {
    Anime,
    Drama,
    Cartoon,
    Manga,
    Comic,
    LightNovel,
}

impl MediaType {
    /// Wire value, also used as the API path segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Anime => "anime",
            MediaType::Drama => "drama",
            MediaType::Cartoon => "cartoon",
            MediaType::Manga => "manga",
            MediaType::Comic => "comic",
            MediaType::LightNovel => "lightNovel",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MediaType::Anime => "Anime",
            MediaType::Drama => "Drama",
            MediaType::Cartoon => "Cartoon",
            MediaType::Manga => "Manga",
            MediaType::Comic => "Comic",
            MediaType::LightNovel => "Light Novel",
        }
    }

    /// Watchable content (episodes family).
    pub fn is_video(&self) -> bool {
        matches!(self, MediaType::Anime | MediaType::Drama | MediaType::Cartoon)
    }

    /// Readable content (chapters family).
    pub fn is_reading(&self) -> bool {
        !self.is_video()
    }

    pub fn all() -> &'static [MediaType] {
        &[
            MediaType::Anime,
            MediaType::Drama,
            MediaType::Cartoon,
            MediaType::Manga,
            MediaType::Comic,
            MediaType::LightNovel,
        ]
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for MediaType {
    type Err = crate::shared::errors::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anime" => Ok(MediaType::Anime),
            "drama" => Ok(MediaType::Drama),
            "cartoon" => Ok(MediaType::Cartoon),
            "manga" => Ok(MediaType::Manga),
            "comic" => Ok(MediaType::Comic),
            "lightNovel" | "light_novel" => Ok(MediaType::LightNovel),
            other => Err(crate::shared::errors::AppError::InvalidInput(format!(
                "Unknown media type: {}",
                other
            ))),
        }
    }
}
