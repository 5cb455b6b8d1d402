//! Formation timeline synchronization engine.
//!
//! Given formations (timestamped member positions) and a playback time, this
//! crate finds the active formation interval and computes where each member
//! stands. Every function here is pure: inputs are borrowed and never
//! modified, and results depend only on the arguments, so scrubbing or
//! seeking needs no special handling.
//!
//! - [`locator`]: active `(current, next)` interval for a time
//! - [`interpolator`]: per-member coordinates (linear blend or snap)
//! - [`movement`]: arrows towards the next formation
//! - [`timeline`]: timeline bar markers and seeking
//! - [`sync`]: per-tick frame combining all of the above

pub mod interpolator;
pub mod locator;
pub mod movement;
pub mod progress;
pub mod sync;
pub mod timeline;

pub use interpolator::{interpolate, interpolate_with, InterpolationPolicy};
pub use locator::{locate, FormationWindow};
pub use movement::{movement_arrows, MovementArrow, DEFAULT_ARROW_DEADZONE};
pub use progress::{lerp, progress, sorted_by_time};
pub use sync::{FormationSync, SyncFrame};
pub use timeline::{markers, playback_percent, seek_time, TimelineMarker};
