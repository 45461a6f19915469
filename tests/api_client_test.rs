//! Live content API tests.
//!
//! These hit the real API and are ignored by default. Run them explicitly:
//! `cargo test --test api_client_test -- --ignored`

use anilab::modules::catalog::domain::MediaType;
use anilab::modules::catalog::infrastructure::ContentApiClient;
use anilab::modules::catalog::traits::CatalogClient;

#[tokio::test]
#[ignore]
async fn fetches_first_anime_page() {
    let client = ContentApiClient::from_env().unwrap();

    let items = client.fetch_content(MediaType::Anime, 1).await.unwrap();
    assert!(!items.is_empty());
    assert!(items.iter().all(|item| item.media_type.is_video()));

    println!("Fetched {} anime entries", items.len());
}

#[tokio::test]
#[ignore]
async fn search_returns_matching_results() {
    let client = ContentApiClient::from_env().unwrap();

    let items = client.search("one", Some(MediaType::Anime)).await.unwrap();
    println!("Search returned {} entries", items.len());
}

#[tokio::test]
#[ignore]
async fn repeated_fetch_is_served_from_cache() {
    let client = ContentApiClient::from_env().unwrap();

    let first = client.fetch_content(MediaType::Manga, 1).await.unwrap();
    let second = client.fetch_content(MediaType::Manga, 1).await.unwrap();
    assert_eq!(first.len(), second.len());
}
