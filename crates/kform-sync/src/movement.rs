//! Movement arrows from the current formation to the next.
//!
//! The viewer overlays an arrow per member showing where they are heading.
//! Members that barely move get no arrow so the stage is not cluttered with
//! zero-length markers.

use kform_models::{find_member, Formation, Member, MemberId, StagePoint};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Minimum displacement (stage percent, per axis) that earns an arrow.
pub const DEFAULT_ARROW_DEADZONE: f64 = 1.0;

/// A member's movement between two formations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovementArrow {
    pub member_id: MemberId,
    /// Member display color
    pub color: String,
    pub from: StagePoint,
    pub to: StagePoint,
}

impl MovementArrow {
    /// Straight-line length in stage percent.
    pub fn length(&self) -> f64 {
        (self.to.x - self.from.x).hypot(self.to.y - self.from.y)
    }
}

/// Arrows for members that move between `current` and `next`.
///
/// A member gets an arrow when it is known, appears in both formations, and
/// moves at least `deadzone` along either axis.
pub fn movement_arrows(
    current: &Formation,
    next: Option<&Formation>,
    members: &[Member],
    deadzone: f64,
) -> Vec<MovementArrow> {
    let Some(next) = next else {
        return Vec::new();
    };

    current
        .positions
        .iter()
        .filter_map(|from| {
            let member = find_member(members, &from.member_id)?;
            let to = next.position_of(&from.member_id)?;

            let moved = (to.x - from.x).abs() >= deadzone || (to.y - from.y).abs() >= deadzone;
            moved.then(|| MovementArrow {
                member_id: from.member_id.clone(),
                color: member.color.clone(),
                from: StagePoint::new(from.x, from.y),
                to: StagePoint::new(to.x, to.y),
            })
        })
        .collect()
}
