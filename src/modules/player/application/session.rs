use crate::modules::library::application::LibraryService;
use crate::modules::library::domain::ProgressKey;
use crate::modules::player::application::controller::PlayerController;
use crate::modules::player::domain::{SessionPhase, SessionSnapshot};
use crate::shared::errors::AppResult;
use crate::{log_debug, log_warn};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::time::{interval, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Controls fade out this long after the last interaction.
pub const CONTROLS_HIDE_DELAY: Duration = Duration::from_secs(3);
/// Skip buttons jump this many seconds.
pub const SKIP_STEP_SECS: f64 = 10.0;

const WORKER_TICK: Duration = Duration::from_millis(500);
/// Progress is persisted once per 5-second bucket of playback time.
const PROGRESS_BUCKET_SECS: u64 = 5;

/// One viewing of one episode: wires the transport to saved progress and to
/// the on-screen controls.
///
/// The session resumes from the stored fraction of the duration, mirrors
/// controller state into a [`SessionSnapshot`] watch channel, persists
/// progress at most once per [`PROGRESS_BUCKET_SECS`] of playback, and hides
/// the controls [`CONTROLS_HIDE_DELAY`] after the last interaction.
pub struct PlaybackSession {
    controller: Arc<PlayerController>,
    library: Arc<LibraryService>,
    key: ProgressKey,
    snapshot_tx: watch::Sender<SessionSnapshot>,
    cancel: CancellationToken,
    started: AtomicBool,
    finished: AtomicBool,
    last_bucket: AtomicU64,
    last_interaction: Mutex<Instant>,
}

impl PlaybackSession {
    pub fn new(
        controller: Arc<PlayerController>,
        library: Arc<LibraryService>,
        key: ProgressKey,
    ) -> Self {
        let (snapshot_tx, _) = watch::channel(SessionSnapshot::default());

        Self {
            controller,
            library,
            key,
            snapshot_tx,
            cancel: CancellationToken::new(),
            started: AtomicBool::new(false),
            finished: AtomicBool::new(false),
            last_bucket: AtomicU64::new(u64::MAX),
            last_interaction: Mutex::new(Instant::now()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Load the stream, seek to the saved position and start mirroring
    /// controller state. Only the first call does anything.
    pub async fn start(self: &Arc<Self>, streaming_url: &str) -> AppResult<()> {
        if self.started.swap(true, Ordering::SeqCst) {
            log_debug!("Session already started, ignoring");
            return Ok(());
        }

        self.snapshot_tx.send_modify(|snap| {
            snap.phase = SessionPhase::Preparing;
            snap.is_loading = true;
            snap.error = None;
        });

        if let Err(e) = self.controller.prepare(streaming_url).await {
            self.snapshot_tx.send_modify(|snap| {
                snap.phase = SessionPhase::Idle;
                snap.is_loading = false;
                snap.error = Some(e.to_string());
            });
            return Err(e);
        }

        let duration = self.controller.state().duration;

        // Stored progress is a fraction of the duration, not a timestamp.
        let resume_at = match self.library.get_progress(&self.key).await {
            Ok(fraction) if fraction > 0.0 && duration > 0.0 => fraction * duration,
            Ok(_) => 0.0,
            Err(e) => {
                log_warn!("Could not read saved progress: {}", e);
                0.0
            }
        };
        if resume_at > 0.0 {
            self.controller.seek(resume_at).await?;
        }

        self.touch_controls().await;
        self.snapshot_tx.send_modify(|snap| {
            snap.phase = SessionPhase::Ready;
            snap.is_loading = false;
            snap.duration = duration;
            snap.current_time = resume_at;
            snap.show_controls = true;
        });

        let session = Arc::clone(self);
        tokio::spawn(async move { session.run_worker().await });

        Ok(())
    }

    pub async fn toggle_play_pause(&self) -> AppResult<()> {
        self.touch_controls().await;

        let phase = self.snapshot_tx.borrow().phase;
        match phase {
            SessionPhase::Ready | SessionPhase::Paused => {
                self.snapshot_tx
                    .send_modify(|snap| snap.phase = SessionPhase::Playing);
                self.controller.play().await
            }
            SessionPhase::Playing => {
                self.snapshot_tx
                    .send_modify(|snap| snap.phase = SessionPhase::Paused);
                self.controller.pause().await
            }
            _ => Ok(()),
        }
    }

    pub async fn skip_forward(&self) -> AppResult<()> {
        self.skip_by(SKIP_STEP_SECS).await
    }

    pub async fn skip_backward(&self) -> AppResult<()> {
        self.skip_by(-SKIP_STEP_SECS).await
    }

    async fn skip_by(&self, delta: f64) -> AppResult<()> {
        self.touch_controls().await;

        let (current, duration) = {
            let snap = self.snapshot_tx.borrow();
            (snap.current_time, snap.duration)
        };
        let target = if duration > 0.0 {
            (current + delta).clamp(0.0, duration)
        } else {
            (current + delta).max(0.0)
        };

        self.controller.seek(target).await?;
        self.snapshot_tx
            .send_modify(|snap| snap.current_time = target);
        Ok(())
    }

    pub async fn seek_to(&self, position: f64) -> AppResult<()> {
        self.touch_controls().await;
        self.controller.seek(position).await?;

        let applied = self.controller.state().current_time;
        self.snapshot_tx
            .send_modify(|snap| snap.current_time = applied);
        Ok(())
    }

    /// Change playback speed. Deliberately does not touch the controls
    /// timer, the speed menu stays out of the fade logic.
    pub async fn set_rate(&self, rate: f32) -> AppResult<()> {
        self.controller.set_rate(rate).await
    }

    pub async fn toggle_controls(&self) {
        let showing = self.snapshot_tx.borrow().show_controls;
        if showing {
            self.snapshot_tx
                .send_modify(|snap| snap.show_controls = false);
        } else {
            self.touch_controls().await;
            self.snapshot_tx
                .send_modify(|snap| snap.show_controls = true);
        }
    }

    /// Register an interaction: show the controls and restart the fade timer.
    pub async fn touch_controls(&self) {
        *self.last_interaction.lock().await = Instant::now();
        self.snapshot_tx.send_if_modified(|snap| {
            if snap.show_controls {
                return false;
            }
            snap.show_controls = true;
            true
        });
    }

    /// Persist the final position and release the pipeline. Runs once no
    /// matter how often it is called, and is safe before `start`.
    pub async fn cleanup(&self) -> AppResult<()> {
        if self.finished.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        self.cancel.cancel();

        if self.started.load(Ordering::SeqCst) {
            let state = self.controller.state();
            self.persist_progress(state.current_time, state.duration)
                .await;
        }

        self.snapshot_tx.send_modify(|snap| {
            snap.phase = SessionPhase::Ended;
            snap.is_loading = false;
        });

        self.controller.release().await
    }

    async fn run_worker(self: Arc<Self>) {
        let mut rx = self.controller.subscribe();
        let mut ticker = interval(WORKER_TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let state = rx.borrow_and_update().clone();
                    self.mirror_player_state(&state).await;
                }
                _ = ticker.tick() => {
                    self.maybe_hide_controls().await;
                }
            }
        }
    }

    async fn mirror_player_state(&self, state: &crate::modules::player::domain::PlayerState) {
        self.snapshot_tx.send_modify(|snap| {
            snap.current_time = state.current_time;
            snap.duration = state.duration;
            snap.is_loading = state.is_loading;
            if state.error.is_some() {
                snap.error = state.error.clone();
            }

            if state.duration > 0.0 && state.current_time >= state.duration {
                snap.phase = SessionPhase::Ended;
            } else if matches!(snap.phase, SessionPhase::Playing | SessionPhase::Paused) {
                snap.phase = if state.is_playing {
                    SessionPhase::Playing
                } else {
                    SessionPhase::Paused
                };
            }
        });

        self.persist_if_due(state.current_time, state.duration)
            .await;
    }

    async fn persist_if_due(&self, current_time: f64, duration: f64) {
        if duration <= 0.0 || current_time < 0.0 {
            return;
        }

        let bucket = current_time as u64 / PROGRESS_BUCKET_SECS;
        let previous = self.last_bucket.swap(bucket, Ordering::SeqCst);
        if previous == bucket {
            return;
        }

        self.persist_progress(current_time, duration).await;
    }

    /// Best effort: a storage failure never interrupts playback.
    async fn persist_progress(&self, current_time: f64, duration: f64) {
        if duration <= 0.0 {
            return;
        }

        let fraction = (current_time / duration).clamp(0.0, 1.0);
        if let Err(e) = self.library.set_progress(&self.key, fraction).await {
            log_warn!("Failed to persist progress: {}", e);
        }
    }

    async fn maybe_hide_controls(&self) {
        // The fade countdown runs regardless of play state; only an
        // interaction resets it.
        if !self.snapshot_tx.borrow().show_controls {
            return;
        }

        let idle_for = self.last_interaction.lock().await.elapsed();
        if idle_for >= CONTROLS_HIDE_DELAY {
            self.snapshot_tx
                .send_modify(|snap| snap.show_controls = false);
        }
    }
}
