use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Port to the platform playback engine.
///
/// Implementations wrap whatever actually decodes and renders media; the
/// player layer only drives transport. All positions and durations are in
/// seconds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaPipeline: Send + Sync {
    /// Load a stream and return its duration in seconds.
    async fn load(&self, streaming_url: &str) -> AppResult<f64>;
    async fn play(&self) -> AppResult<()>;
    async fn pause(&self) -> AppResult<()>;
    async fn seek(&self, position: f64) -> AppResult<()>;
    async fn set_rate(&self, rate: f32) -> AppResult<()>;
    /// Current playback position in seconds.
    async fn position(&self) -> AppResult<f64>;
    async fn release(&self) -> AppResult<()>;
}
