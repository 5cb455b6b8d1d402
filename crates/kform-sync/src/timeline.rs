//! Timeline bar helpers: playback progress, formation markers and seeking.

use kform_models::{format_time, Formation, FormationId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::progress::sorted_by_time;

/// A formation's marker on the timeline bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineMarker {
    pub formation_id: FormationId,
    /// Tooltip, e.g. `Chorus (1:05)`
    pub label: String,
    /// Offset along the bar, 0-100
    pub percent: f64,
    /// Playback has reached this formation
    pub active: bool,
}

/// Percentage of the video already played. Zero while the duration is unknown.
pub fn playback_percent(current_time: f64, duration: f64) -> f64 {
    if duration > 0.0 {
        current_time / duration * 100.0
    } else {
        0.0
    }
}

/// Markers for every formation in time order.
pub fn markers(formations: &[Formation], current_time: f64, duration: f64) -> Vec<TimelineMarker> {
    sorted_by_time(formations)
        .into_iter()
        .map(|f| TimelineMarker {
            formation_id: f.id.clone(),
            label: format!("{} ({})", f.display_name(), format_time(f.time)),
            percent: playback_percent(f.time, duration),
            active: current_time >= f.time,
        })
        .collect()
}

/// Playback time for a click at `fraction` (0-1) along the bar.
///
/// Returns `None` while the duration is unknown.
pub fn seek_time(fraction: f64, duration: f64) -> Option<f64> {
    if duration > 0.0 && fraction.is_finite() {
        Some(fraction.clamp(0.0, 1.0) * duration)
    } else {
        None
    }
}
