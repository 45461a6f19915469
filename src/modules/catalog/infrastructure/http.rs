use crate::log_warn;
use crate::shared::errors::{AppError, AppResult};
use rand::Rng;
use reqwest::StatusCode;
use std::time::Duration;
use tokio::time::sleep;

/// Retry configuration for content API calls
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// No retries, for tests and latency-sensitive callers.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponential =
            self.base_delay.as_millis() as f64 * self.backoff_multiplier.powi(attempt as i32);
        let mut delay_ms = exponential.min(self.max_delay.as_millis() as f64);

        if self.jitter {
            delay_ms *= rand::thread_rng().gen_range(0.8..1.2);
        }

        Duration::from_millis(delay_ms as u64)
    }
}

/// Only transient failures are worth retrying; contract violations
/// (bad input, decode mismatches) fail the same way every time.
pub fn is_retryable(error: &AppError) -> bool {
    matches!(
        error,
        AppError::ExternalServiceError(_) | AppError::RateLimitError(_)
    )
}

/// HTTP plumbing shared by API client operations.
pub struct HttpHandler;

impl HttpHandler {
    /// Create an HTTP client with consistent timeout/user-agent configuration.
    pub fn create_client(timeout_secs: u64, user_agent: &str) -> AppResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to create HTTP client: {}", e))
            })
    }

    /// Map response status codes onto the crate error taxonomy.
    pub fn check_status(status: StatusCode) -> AppResult<()> {
        match status {
            StatusCode::OK => Ok(()),
            StatusCode::TOO_MANY_REQUESTS => Err(AppError::RateLimitError(
                "Content API rate limit exceeded".to_string(),
            )),
            StatusCode::NOT_FOUND => Err(AppError::NotFound("Resource not found".to_string())),
            StatusCode::BAD_REQUEST => {
                Err(AppError::ApiError("Bad request to content API".to_string()))
            }
            StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::BAD_GATEWAY
            | StatusCode::GATEWAY_TIMEOUT => Err(AppError::ExternalServiceError(
                "Content API unavailable".to_string(),
            )),
            _ => Err(AppError::ApiError(format!(
                "Unexpected status code: {}",
                status
            ))),
        }
    }

    /// Execute an HTTP request with retry on transient failures, then apply
    /// the status mapping.
    pub async fn execute_with_retry<F, Fut>(
        request_fn: F,
        config: &RetryConfig,
        operation_name: &str,
    ) -> AppResult<reqwest::Response>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        let mut attempt = 0;

        loop {
            let outcome: AppResult<reqwest::Response> = match request_fn().await {
                Ok(response) => Self::check_status(response.status()).map(|_| response),
                Err(e) => Err(AppError::from(e)),
            };

            match outcome {
                Ok(response) => return Ok(response),
                Err(error) => {
                    if !is_retryable(&error) || attempt >= config.max_retries {
                        return Err(error);
                    }

                    let delay = config.delay_for_attempt(attempt);
                    log_warn!(
                        "{} failed on attempt {} ({}), retrying in {:?}",
                        operation_name,
                        attempt + 1,
                        error,
                        delay
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
