pub mod controller;
pub mod session;

pub use controller::PlayerController;
pub use session::PlaybackSession;
