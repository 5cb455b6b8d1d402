//! Per-tick frame assembly.
//!
//! [`FormationSync`] runs the locator and interpolator for one playback time
//! and bundles everything the viewer draws for that tick.

use kform_models::{Formation, FormationId, InterpolatedPosition, Member};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::interpolator::{interpolate_with, InterpolationPolicy};
use crate::locator::locate;
use crate::movement::{movement_arrows, MovementArrow, DEFAULT_ARROW_DEADZONE};

/// Everything rendered for one playback time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncFrame {
    /// Playback time this frame was computed for
    pub time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_formation_id: Option<FormationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_formation_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_formation_id: Option<FormationId>,
    pub positions: Vec<InterpolatedPosition>,
    pub arrows: Vec<MovementArrow>,
}

impl SyncFrame {
    /// True when no formation is available.
    pub fn is_empty(&self) -> bool {
        self.current_formation_id.is_none()
    }
}

/// Stateless frame builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationSync {
    policy: InterpolationPolicy,
    arrow_deadzone: f64,
}

impl Default for FormationSync {
    fn default() -> Self {
        Self {
            policy: InterpolationPolicy::Linear,
            arrow_deadzone: DEFAULT_ARROW_DEADZONE,
        }
    }
}

impl FormationSync {
    pub fn new(policy: InterpolationPolicy, arrow_deadzone: f64) -> Self {
        Self { policy, arrow_deadzone }
    }

    pub fn policy(&self) -> InterpolationPolicy {
        self.policy
    }

    pub fn arrow_deadzone(&self) -> f64 {
        self.arrow_deadzone
    }

    /// Compute the frame for `current_time`.
    pub fn frame(&self, formations: &[Formation], members: &[Member], current_time: f64) -> SyncFrame {
        let window = locate(formations, current_time);
        let Some(current) = window.current else {
            return SyncFrame {
                time: current_time,
                ..SyncFrame::default()
            };
        };

        let positions = interpolate_with(self.policy, current, window.next, current_time, members);
        let arrows = movement_arrows(current, window.next, members, self.arrow_deadzone);

        trace!(
            time = current_time,
            current = %current.id,
            next = ?window.next.map(|f| f.id.as_str()),
            positions = positions.len(),
            "Computed formation frame"
        );

        SyncFrame {
            time: current_time,
            current_formation_id: Some(current.id.clone()),
            current_formation_name: current.name.clone(),
            next_formation_id: window.next.map(|f| f.id.clone()),
            positions,
            arrows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kform_models::Position;

    fn fixture() -> (Vec<Formation>, Vec<Member>) {
        let formations = vec![
            Formation::new("intro", 0.0, vec![Position::new("a", 20.0, 50.0)]).with_name("Intro"),
            Formation::new("verse", 4.0, vec![Position::new("a", 60.0, 50.0)]),
        ];
        let members = vec![Member::new("a", "artist", "Luna", "#FF6B9D", 1)];
        (formations, members)
    }

    #[test]
    fn test_frame_linear() {
        let (formations, members) = fixture();
        let frame = FormationSync::default().frame(&formations, &members, 1.0);

        assert_eq!(frame.current_formation_id.as_ref().map(|id| id.as_str()), Some("intro"));
        assert_eq!(frame.current_formation_name.as_deref(), Some("Intro"));
        assert_eq!(frame.next_formation_id.as_ref().map(|id| id.as_str()), Some("verse"));
        assert_eq!(frame.positions[0].x, 30.0);
        assert_eq!(frame.arrows.len(), 1);
    }

    #[test]
    fn test_frame_snap() {
        let (formations, members) = fixture();
        let sync = FormationSync::new(InterpolationPolicy::Snap, DEFAULT_ARROW_DEADZONE);
        let frame = sync.frame(&formations, &members, 3.0);
        assert_eq!(frame.positions[0].x, 20.0);
    }

    #[test]
    fn test_frame_empty() {
        let frame = FormationSync::default().frame(&[], &[], 12.0);
        assert!(frame.is_empty());
        assert!(frame.positions.is_empty());
        assert_eq!(frame.time, 12.0);
    }

    #[test]
    fn test_frame_serializes_camel_case() {
        let (formations, members) = fixture();
        let frame = FormationSync::default().frame(&formations, &members, 8.0);
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["currentFormationId"], "verse");
        assert!(json.get("nextFormationId").is_none());
    }
}
