use super::http::{HttpHandler, RetryConfig};
use super::response_cache::ResponseCache;
use crate::modules::catalog::domain::{Chapter, Episode, MediaContent, MediaType};
use crate::modules::catalog::traits::CatalogClient;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use crate::shared::utils::RateLimiter;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::env;
use std::sync::Arc;
use std::time::Instant;

const API_BASE_URL_VAR: &str = "ANILAB_API_BASE_URL";
const DEFAULT_BASE_URL: &str = "https://api.anilabx.xyz";
const USER_AGENT: &str = "AniLab-Client/1.0";

/// HTTP client for the AniLab content API.
pub struct ContentApiClient {
    client: Client,
    base_url: String,
    rate_limiter: RateLimiter,
    cache: Arc<ResponseCache>,
    retry: RetryConfig,
}

impl ContentApiClient {
    pub fn new() -> AppResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Base URL override, used by tests and self-hosted deployments.
    pub fn with_base_url(base_url: &str) -> AppResult<Self> {
        let client = HttpHandler::create_client(30, USER_AGENT)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            rate_limiter: RateLimiter::new(4.0), // polite ceiling for a mobile client
            cache: Arc::new(ResponseCache::default()),
            retry: RetryConfig::default(),
        })
    }

    /// Resolve the base URL from the environment (`ANILAB_API_BASE_URL`).
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        match env::var(API_BASE_URL_VAR) {
            Ok(url) if !url.trim().is_empty() => Self::with_base_url(&url),
            _ => Self::new(),
        }
    }

    fn listing_endpoint(&self, media_type: MediaType, page: u32) -> String {
        format!("{}/{}?page={}", self.base_url, media_type.as_str(), page)
    }

    fn search_endpoint(&self, query: &str, media_type: Option<MediaType>) -> String {
        let mut endpoint = format!("{}/search?q={}", self.base_url, urlencoding::encode(query));
        if let Some(media_type) = media_type {
            endpoint.push_str(&format!("&type={}", media_type.as_str()));
        }
        endpoint
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> AppResult<Vec<T>> {
        let url = Url::parse(endpoint)
            .map_err(|e| AppError::InvalidInput(format!("Invalid request URL: {}", e)))?;

        self.rate_limiter.wait().await;

        let start = Instant::now();
        let response = HttpHandler::execute_with_retry(
            || self.client.get(url.clone()).send(),
            &self.retry,
            endpoint,
        )
        .await?;

        let items = response
            .json::<Vec<T>>()
            .await
            .map_err(|e| AppError::SerializationError(format!("Failed to parse response: {}", e)))?;

        LogContext::api_call(endpoint, "ok", Some(start.elapsed().as_millis() as u64));

        Ok(items)
    }
}

#[async_trait]
impl CatalogClient for ContentApiClient {
    async fn fetch_content(
        &self,
        media_type: MediaType,
        page: u32,
    ) -> AppResult<Vec<MediaContent>> {
        let cache_key = format!("{}:{}", media_type.as_str(), page);
        if let Some(cached) = self.cache.get(&cache_key) {
            return Ok(cached);
        }

        let endpoint = self.listing_endpoint(media_type, page);
        let items: Vec<MediaContent> = self.get_json(&endpoint).await?;

        self.cache.insert(cache_key, items.clone());
        Ok(items)
    }

    async fn search(
        &self,
        query: &str,
        media_type: Option<MediaType>,
    ) -> AppResult<Vec<MediaContent>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let cache_key = format!(
            "search:{}:{}",
            query.trim(),
            media_type.map(|t| t.as_str()).unwrap_or("any")
        );
        if let Some(cached) = self.cache.get(&cache_key) {
            return Ok(cached);
        }

        let endpoint = self.search_endpoint(query.trim(), media_type);
        let items: Vec<MediaContent> = self.get_json(&endpoint).await?;

        self.cache.insert(cache_key, items.clone());
        Ok(items)
    }

    async fn fetch_episodes(&self, content_id: &str) -> AppResult<Vec<Episode>> {
        let endpoint = format!("{}/content/{}/episodes", self.base_url, content_id);
        self.get_json(&endpoint).await
    }

    async fn fetch_chapters(&self, content_id: &str) -> AppResult<Vec<Chapter>> {
        let endpoint = format!("{}/content/{}/chapters", self.base_url, content_id);
        self.get_json(&endpoint).await
    }
}
