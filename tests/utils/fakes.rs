/// In-memory fakes for timing-sensitive tests.
///
/// These stay on the async runtime (no blocking pool hops), so tests that
/// drive the paused tokio clock stay deterministic.
use anilab::modules::catalog::domain::{Chapter, Episode, MediaContent, MediaType};
use anilab::modules::catalog::traits::CatalogClient;
use anilab::modules::library::domain::{
    FavoriteEntry, FavoriteRepository, ProgressKey, ProgressRecord, ProgressRepository,
};
use anilab::modules::player::domain::MediaPipeline;
use anilab::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use tokio::time::Instant;

// ---------------------------------------------------------------------------
// Playback pipeline
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct SimState {
    loaded: bool,
    playing: bool,
    base: f64,
    started_at: Option<Instant>,
    rate: f64,
}

/// A playback engine that advances position with the (possibly paused) tokio
/// clock.
pub struct SimulatedPipeline {
    state: Mutex<SimState>,
    duration: f64,
    fail_load: bool,
    pub releases: AtomicUsize,
}

impl SimulatedPipeline {
    pub fn with_duration(duration: f64) -> Self {
        Self {
            state: Mutex::new(SimState {
                loaded: false,
                playing: false,
                base: 0.0,
                started_at: None,
                rate: 1.0,
            }),
            duration,
            fail_load: false,
            releases: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        let mut pipeline = Self::with_duration(0.0);
        pipeline.fail_load = true;
        pipeline
    }

    fn current_position(state: &SimState) -> f64 {
        let elapsed = state
            .started_at
            .map(|t| t.elapsed().as_secs_f64() * state.rate)
            .unwrap_or(0.0);
        state.base + elapsed
    }
}

#[async_trait]
impl MediaPipeline for SimulatedPipeline {
    async fn load(&self, _streaming_url: &str) -> AppResult<f64> {
        if self.fail_load {
            return Err(AppError::PlaybackError("stream unavailable".to_string()));
        }

        let mut state = self.state.lock().unwrap();
        state.loaded = true;
        state.base = 0.0;
        state.started_at = None;
        Ok(self.duration)
    }

    async fn play(&self) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        if !state.playing {
            state.playing = true;
            state.started_at = Some(Instant::now());
        }
        Ok(())
    }

    async fn pause(&self) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.playing {
            state.base = Self::current_position(&state);
            state.playing = false;
            state.started_at = None;
        }
        Ok(())
    }

    async fn seek(&self, position: f64) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        state.base = position;
        if state.playing {
            state.started_at = Some(Instant::now());
        }
        Ok(())
    }

    async fn set_rate(&self, rate: f32) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        state.base = Self::current_position(&state);
        state.rate = rate as f64;
        if state.playing {
            state.started_at = Some(Instant::now());
        }
        Ok(())
    }

    async fn position(&self) -> AppResult<f64> {
        let state = self.state.lock().unwrap();
        Ok(Self::current_position(&state))
    }

    async fn release(&self) -> AppResult<()> {
        self.releases.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        state.playing = false;
        state.started_at = None;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Library stores
// ---------------------------------------------------------------------------

type SlotKey = (String, Option<String>, Option<String>);

#[derive(Default)]
pub struct InMemoryProgressRepository {
    records: Mutex<HashMap<SlotKey, ProgressRecord>>,
}

impl InMemoryProgressRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn slot(key: &ProgressKey) -> SlotKey {
        (
            key.content_id().to_string(),
            key.episode_id().map(str::to_string),
            key.chapter_id().map(str::to_string),
        )
    }
}

#[async_trait]
impl ProgressRepository for InMemoryProgressRepository {
    async fn find(&self, key: &ProgressKey) -> AppResult<Option<ProgressRecord>> {
        Ok(self.records.lock().unwrap().get(&Self::slot(key)).cloned())
    }

    async fn upsert(&self, record: ProgressRecord) -> AppResult<()> {
        let key = record.key()?;
        self.records
            .lock()
            .unwrap()
            .insert(Self::slot(&key), record);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryFavoriteRepository {
    entries: Mutex<HashMap<String, FavoriteEntry>>,
}

impl InMemoryFavoriteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryFavoriteRepository {
    async fn upsert(&self, entry: FavoriteEntry) -> AppResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(entry.content_id.clone(), entry);
        Ok(())
    }

    async fn delete(&self, content_id: &str) -> AppResult<bool> {
        Ok(self.entries.lock().unwrap().remove(content_id).is_some())
    }

    async fn exists(&self, content_id: &str) -> AppResult<bool> {
        Ok(self.entries.lock().unwrap().contains_key(content_id))
    }

    async fn get_all(&self) -> AppResult<Vec<FavoriteEntry>> {
        let mut entries: Vec<_> = self.entries.lock().unwrap().values().cloned().collect();
        entries.sort_by(|a, b| b.date_added.cmp(&a.date_added));
        Ok(entries)
    }
}

// ---------------------------------------------------------------------------
// Catalog client
// ---------------------------------------------------------------------------

/// Scriptable catalog client. Pages are served in order; an optional gate
/// blocks each fetch until the test releases it.
pub struct FakeCatalogClient {
    pages: Mutex<Vec<AppResult<Vec<MediaContent>>>>,
    gate: Option<Arc<Notify>>,
    pub calls: AtomicUsize,
}

impl FakeCatalogClient {
    pub fn new(pages: Vec<AppResult<Vec<MediaContent>>>) -> Self {
        Self {
            pages: Mutex::new(pages),
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn gated(pages: Vec<AppResult<Vec<MediaContent>>>, gate: Arc<Notify>) -> Self {
        Self {
            pages: Mutex::new(pages),
            gate: Some(gate),
            calls: AtomicUsize::new(0),
        }
    }

    fn next_page(&self) -> AppResult<Vec<MediaContent>> {
        let mut pages = self.pages.lock().unwrap();
        if pages.is_empty() {
            Ok(Vec::new())
        } else {
            pages.remove(0)
        }
    }
}

#[async_trait]
impl CatalogClient for FakeCatalogClient {
    async fn fetch_content(
        &self,
        _media_type: MediaType,
        _page: u32,
    ) -> AppResult<Vec<MediaContent>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.next_page()
    }

    async fn search(
        &self,
        _query: &str,
        _media_type: Option<MediaType>,
    ) -> AppResult<Vec<MediaContent>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.next_page()
    }

    async fn fetch_episodes(&self, _content_id: &str) -> AppResult<Vec<Episode>> {
        Ok(Vec::new())
    }

    async fn fetch_chapters(&self, _content_id: &str) -> AppResult<Vec<Chapter>> {
        Ok(Vec::new())
    }
}
