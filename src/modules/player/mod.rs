pub mod application;
pub mod domain;

pub use application::{PlaybackSession, PlayerController};
pub use domain::{MediaPipeline, PlayerState, SessionPhase, SessionSnapshot};
