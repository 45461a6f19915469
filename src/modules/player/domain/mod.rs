pub mod pipeline;
pub mod state;

pub use pipeline::MediaPipeline;
pub use state::{PlayerState, SessionPhase, SessionSnapshot};
