//! Playback boundary for the formation viewer.
//!
//! This crate connects a video player to the sync engine:
//! - [`PlaybackClock`]: what the viewer reads from the player
//! - [`PlaybackDriver`]: polls the clock while playing and publishes samples
//! - [`SyncSession`]: turns samples into formation frames
//! - [`ApiLoader`]: one-time player API initialization shared by all viewers

pub mod clock;
pub mod config;
pub mod demo;
pub mod driver;
pub mod error;
pub mod loader;
pub mod session;
pub mod state;

pub use clock::{PlaybackClock, SimulatedClock};
pub use config::PlayerConfig;
pub use driver::{PlaybackDriver, PlaybackSample};
pub use error::{PlayerError, PlayerResult};
pub use loader::ApiLoader;
pub use session::SyncSession;
pub use state::PlayerState;
