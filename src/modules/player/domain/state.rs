use serde::Serialize;

/// Transport-level player state, published by the controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub is_playing: bool,
    pub current_time: f64,
    pub duration: f64,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
            is_loading: false,
            error: None,
        }
    }
}

/// Lifecycle of one playback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    Idle,
    Preparing,
    Ready,
    Playing,
    Paused,
    Ended,
}

/// Screen-facing session state: transport plus controls visibility.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub current_time: f64,
    pub duration: f64,
    pub is_loading: bool,
    pub error: Option<String>,
    pub show_controls: bool,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Idle,
            current_time: 0.0,
            duration: 0.0,
            is_loading: false,
            error: None,
            show_controls: true,
        }
    }
}

impl SessionSnapshot {
    pub fn is_playing(&self) -> bool {
        self.phase == SessionPhase::Playing
    }
}
