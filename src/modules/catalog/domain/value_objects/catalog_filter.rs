use super::media_type::MediaType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Sort order for catalog queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOption {
    Popularity,
    Rating,
    Newest,
    Oldest,
    NameAsc,
    NameDesc,
}

impl SortOption {
    /// Query-parameter value understood by the content API.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Popularity => "popularity",
            SortOption::Rating => "rating",
            SortOption::Newest => "newest",
            SortOption::Oldest => "oldest",
            SortOption::NameAsc => "nameAsc",
            SortOption::NameDesc => "nameDesc",
        }
    }
}

/// Mutable catalog query state. Session-scoped; `Default` is the reset state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFilter {
    pub media_type: MediaType,
    pub sort_by: SortOption,
    pub genres: HashSet<String>,
    pub status: Option<String>,
    pub year: Option<i32>,
    pub season: Option<String>,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            media_type: MediaType::Anime,
            sort_by: SortOption::Popularity,
            genres: HashSet::new(),
            status: None,
            year: None,
            season: None,
        }
    }
}

/// A single selectable filter row shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub id: i32,
    pub name: String,
    pub is_selected: bool,
}

impl Filter {
    pub fn new(id: i32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            is_selected: false,
        }
    }
}

/// Filters grouped by category (genres, status, season).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroup {
    pub id: String,
    pub title: String,
    pub filters: Vec<Filter>,
}

impl FilterGroup {
    pub fn new(id: &str, title: &str, filters: Vec<Filter>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            filters,
        }
    }
}

pub const GENRE_GROUP: &str = "genres";
pub const STATUS_GROUP: &str = "status";
pub const SEASON_GROUP: &str = "season";

/// The filter groups offered by the catalog screen.
pub fn default_filter_groups() -> Vec<FilterGroup> {
    vec![
        FilterGroup::new(
            GENRE_GROUP,
            "Genres",
            vec![
                Filter::new(1, "Action"),
                Filter::new(2, "Comedy"),
                Filter::new(3, "Drama"),
                Filter::new(4, "Fantasy"),
                Filter::new(5, "Romance"),
                Filter::new(6, "Sci-Fi"),
                Filter::new(7, "Slice of Life"),
                Filter::new(8, "Adventure"),
                Filter::new(9, "Psychological"),
                Filter::new(10, "Shounen"),
            ],
        ),
        FilterGroup::new(
            STATUS_GROUP,
            "Status",
            vec![
                Filter::new(101, "Ongoing"),
                Filter::new(102, "Completed"),
                Filter::new(103, "Announced"),
            ],
        ),
        FilterGroup::new(
            SEASON_GROUP,
            "Season",
            vec![
                Filter::new(201, "Winter"),
                Filter::new(202, "Spring"),
                Filter::new(203, "Summer"),
                Filter::new(204, "Fall"),
            ],
        ),
    ]
}
