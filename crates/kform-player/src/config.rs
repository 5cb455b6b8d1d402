//! Viewer configuration.

use std::time::Duration;

use kform_sync::{FormationSync, InterpolationPolicy, DEFAULT_ARROW_DEADZONE};

/// Viewer configuration.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// How often playback time is sampled while playing
    pub poll_interval: Duration,
    /// How members move between formations
    pub interpolation: InterpolationPolicy,
    /// Minimum per-axis move (stage percent) that gets an arrow
    pub arrow_deadzone: f64,
    /// Length of simulated playback in the demo viewer
    pub demo_duration: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            interpolation: InterpolationPolicy::Linear,
            arrow_deadzone: DEFAULT_ARROW_DEADZONE,
            demo_duration: Duration::from_secs(12),
        }
    }
}

impl PlayerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            poll_interval: std::env::var("KFORM_POLL_INTERVAL_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|ms: &u64| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_interval),
            interpolation: std::env::var("KFORM_INTERPOLATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.interpolation),
            arrow_deadzone: std::env::var("KFORM_ARROW_DEADZONE")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|d: &f64| d.is_finite() && *d >= 0.0)
                .unwrap_or(defaults.arrow_deadzone),
            demo_duration: std::env::var("KFORM_DEMO_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.demo_duration),
        }
    }

    /// Frame builder configured with this policy and deadzone.
    pub fn engine(&self) -> FormationSync {
        FormationSync::new(self.interpolation, self.arrow_deadzone)
    }
}
