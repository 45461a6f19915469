use crate::modules::player::domain::{MediaPipeline, PlayerState};
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::LogContext;
use crate::{log_debug, log_warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

const POSITION_TICK: Duration = Duration::from_millis(500);

/// Drives a [`MediaPipeline`] and publishes [`PlayerState`] over a watch
/// channel.
///
/// A background ticker polls the pipeline position every 500ms while playing,
/// so observers see time advance without polling themselves. `play` and
/// `pause` flip `is_playing` before the pipeline call returns, which keeps
/// the toggle responsive on slow pipelines.
pub struct PlayerController {
    pipeline: Arc<dyn MediaPipeline>,
    state_tx: watch::Sender<PlayerState>,
    ticker_cancel: CancellationToken,
    released: AtomicBool,
}

impl PlayerController {
    pub fn new(pipeline: Arc<dyn MediaPipeline>) -> Self {
        let (state_tx, _) = watch::channel(PlayerState::default());
        let ticker_cancel = CancellationToken::new();

        Self::spawn_position_ticker(
            Arc::clone(&pipeline),
            state_tx.clone(),
            ticker_cancel.clone(),
        );

        Self {
            pipeline,
            state_tx,
            ticker_cancel,
            released: AtomicBool::new(false),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PlayerState> {
        self.state_tx.subscribe()
    }

    pub fn state(&self) -> PlayerState {
        self.state_tx.borrow().clone()
    }

    /// Reset state and load a new stream. A load failure lands in the
    /// published state as well as in the returned error.
    pub async fn prepare(&self, streaming_url: &str) -> AppResult<()> {
        self.state_tx.send_replace(PlayerState {
            is_loading: true,
            ..PlayerState::default()
        });

        match self.pipeline.load(streaming_url).await {
            Ok(duration) => {
                self.state_tx.send_modify(|state| {
                    state.is_loading = false;
                    state.duration = duration;
                    state.current_time = 0.0;
                });
                LogContext::playback_event(streaming_url, "loaded");
                Ok(())
            }
            Err(e) => {
                self.state_tx.send_modify(|state| {
                    state.is_loading = false;
                    state.error = Some(e.to_string());
                });
                Err(e)
            }
        }
    }

    pub async fn play(&self) -> AppResult<()> {
        self.state_tx.send_modify(|state| state.is_playing = true);

        if let Err(e) = self.pipeline.play().await {
            log_warn!("Pipeline play failed: {}", e);
            self.state_tx
                .send_modify(|state| state.error = Some(e.to_string()));
            return Err(e);
        }
        Ok(())
    }

    pub async fn pause(&self) -> AppResult<()> {
        self.state_tx.send_modify(|state| state.is_playing = false);

        if let Err(e) = self.pipeline.pause().await {
            log_warn!("Pipeline pause failed: {}", e);
            self.state_tx
                .send_modify(|state| state.error = Some(e.to_string()));
            return Err(e);
        }
        Ok(())
    }

    /// Seek to an absolute position, clamped to the loaded duration.
    pub async fn seek(&self, position: f64) -> AppResult<()> {
        let duration = self.state_tx.borrow().duration;
        let target = if duration > 0.0 {
            position.clamp(0.0, duration)
        } else {
            position.max(0.0)
        };

        self.pipeline.seek(target).await?;
        self.state_tx
            .send_modify(|state| state.current_time = target);
        Ok(())
    }

    pub async fn set_rate(&self, rate: f32) -> AppResult<()> {
        self.pipeline.set_rate(rate).await
    }

    /// Stop the ticker and release the pipeline. Safe to call more than once.
    pub async fn release(&self) -> AppResult<()> {
        if self.released.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        self.ticker_cancel.cancel();
        self.pipeline.release().await
    }

    fn spawn_position_ticker(
        pipeline: Arc<dyn MediaPipeline>,
        state_tx: watch::Sender<PlayerState>,
        cancel: CancellationToken,
    ) {
        tokio::spawn(async move {
            let mut ticker = interval(POSITION_TICK);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        if !state_tx.borrow().is_playing {
                            continue;
                        }

                        let position = match pipeline.position().await {
                            Ok(position) => position,
                            Err(e) => {
                                log_debug!("Position poll failed: {}", e);
                                continue;
                            }
                        };

                        // The pipeline call yields, so re-check before
                        // publishing into a torn-down channel.
                        if cancel.is_cancelled() {
                            break;
                        }

                        state_tx.send_if_modified(|state| {
                            let clamped = if state.duration > 0.0 {
                                position.min(state.duration)
                            } else {
                                position
                            };
                            if (state.current_time - clamped).abs() < f64::EPSILON {
                                return false;
                            }
                            state.current_time = clamped;
                            true
                        });
                    }
                }
            }
        });
    }
}

impl Drop for PlayerController {
    fn drop(&mut self) {
        self.ticker_cancel.cancel();
    }
}
