pub mod catalog_filter;
pub mod media_type;

pub use catalog_filter::{
    default_filter_groups, CatalogFilter, Filter, FilterGroup, SortOption, GENRE_GROUP,
    SEASON_GROUP, STATUS_GROUP,
};
pub use media_type::MediaType;
