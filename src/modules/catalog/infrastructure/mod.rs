pub mod api_client;
pub mod http;
pub mod response_cache;

pub use api_client::ContentApiClient;
pub use response_cache::ResponseCache;
