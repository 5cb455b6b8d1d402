//! Position interpolation.
//!
//! Turns the active formation interval into renderable member positions.
//! Two policies exist and exactly one is used per call:
//!
//! - [`InterpolationPolicy::Linear`] blends each member from its position in
//!   the current formation towards its position in the next one. This is the
//!   product default: members glide between formations.
//! - [`InterpolationPolicy::Snap`] shows the current formation as authored, so
//!   formation changes are hard cuts.
//!
//! Positions referencing a member that is not in the members list are stale
//! authoring data; they are skipped without affecting the other members.

use std::fmt;
use std::str::FromStr;

use kform_models::{find_member, Formation, InterpolatedPosition, Member, Position};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::progress::{lerp, progress};

/// How member positions move between formations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationPolicy {
    /// Blend linearly towards the next formation
    #[default]
    Linear,
    /// Hold the current formation until the next one starts
    Snap,
}

impl InterpolationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterpolationPolicy::Linear => "linear",
            InterpolationPolicy::Snap => "snap",
        }
    }
}

impl fmt::Display for InterpolationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InterpolationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" | "smooth" => Ok(Self::Linear),
            "snap" | "discrete" | "cut" => Ok(Self::Snap),
            other => Err(format!("unknown interpolation policy '{}'", other)),
        }
    }
}

/// Interpolate member positions with the default (linear) policy.
pub fn interpolate(
    current: &Formation,
    next: Option<&Formation>,
    current_time: f64,
    members: &[Member],
) -> Vec<InterpolatedPosition> {
    interpolate_with(InterpolationPolicy::Linear, current, next, current_time, members)
}

/// Interpolate member positions with an explicit policy.
pub fn interpolate_with(
    policy: InterpolationPolicy,
    current: &Formation,
    next: Option<&Formation>,
    current_time: f64,
    members: &[Member],
) -> Vec<InterpolatedPosition> {
    match (policy, next) {
        (InterpolationPolicy::Snap, _) | (InterpolationPolicy::Linear, None) => {
            join_members(current.positions.iter().map(|p| (p, p.x, p.y)), members)
        }
        (InterpolationPolicy::Linear, Some(next)) => {
            let p = progress(current.time, next.time, current_time);

            let blended = current.positions.iter().map(|from| match next.position_of(&from.member_id) {
                Some(to) => (from, lerp(from.x, to.x, p), lerp(from.y, to.y, p)),
                None => (from, from.x, from.y),
            });
            join_members(blended, members)
        }
    }
}

// Lookups are first-wins, matching `Formation::position_of`.
fn join_members<'a>(
    coords: impl Iterator<Item = (&'a Position, f64, f64)>,
    members: &[Member],
) -> Vec<InterpolatedPosition> {
    coords
        .filter_map(|(pos, x, y)| match find_member(members, &pos.member_id) {
            Some(member) => Some(InterpolatedPosition {
                member_id: pos.member_id.clone(),
                x,
                y,
                member: member.clone(),
            }),
            None => {
                trace!(member_id = %pos.member_id, "Skipping position for unknown member");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members() -> Vec<Member> {
        vec![
            Member::new("a", "artist", "Luna", "#FF6B9D", 1),
            Member::new("b", "artist", "Hana", "#4ECDC4", 2),
        ]
    }

    fn pair() -> (Formation, Formation) {
        (
            Formation::new("f1", 0.0, vec![Position::new("a", 0.0, 0.0)]),
            Formation::new("f2", 10.0, vec![Position::new("a", 100.0, 100.0)]),
        )
    }

    fn coords(result: &[InterpolatedPosition]) -> Vec<(&str, f64, f64)> {
        result.iter().map(|p| (p.member_id.as_str(), p.x, p.y)).collect()
    }

    #[test]
    fn test_midpoint() {
        let (current, next) = pair();
        let result = interpolate(&current, Some(&next), 5.0, &members());
        assert_eq!(coords(&result), vec![("a", 50.0, 50.0)]);
        assert_eq!(result[0].member.name, "Luna");
    }

    #[test]
    fn test_clamps_at_and_after_next() {
        let (current, next) = pair();
        for t in [10.0, 15.0, 1000.0] {
            let result = interpolate(&current, Some(&next), t, &members());
            assert_eq!(coords(&result), vec![("a", 100.0, 100.0)]);
        }
    }

    #[test]
    fn test_clamps_before_current() {
        let (current, next) = pair();
        let result = interpolate(&current, Some(&next), -5.0, &members());
        assert_eq!(coords(&result), vec![("a", 0.0, 0.0)]);
    }

    #[test]
    fn test_no_next_passthrough() {
        let current = Formation::new(
            "f1",
            3.0,
            vec![Position::new("a", 12.0, 34.0), Position::new("b", 56.0, 78.0)],
        );

        for t in [0.0, 3.0, 99.0] {
            let result = interpolate(&current, None, t, &members());
            assert_eq!(coords(&result), vec![("a", 12.0, 34.0), ("b", 56.0, 78.0)]);
            assert_eq!(result[1].member.name, "Hana");
        }
    }

    #[test]
    fn test_member_missing_from_next_holds() {
        let current = Formation::new(
            "f1",
            0.0,
            vec![Position::new("a", 0.0, 0.0), Position::new("b", 20.0, 20.0)],
        );
        let next = Formation::new("f2", 10.0, vec![Position::new("a", 10.0, 10.0)]);

        let result = interpolate(&current, Some(&next), 5.0, &members());
        assert_eq!(coords(&result), vec![("a", 5.0, 5.0), ("b", 20.0, 20.0)]);
    }

    #[test]
    fn test_unknown_member_is_skipped() {
        let current = Formation::new(
            "f1",
            0.0,
            vec![
                Position::new("ghost", 1.0, 1.0),
                Position::new("a", 0.0, 0.0),
            ],
        );
        let next = Formation::new(
            "f2",
            10.0,
            vec![Position::new("ghost", 9.0, 9.0), Position::new("a", 10.0, 10.0)],
        );

        let result = interpolate(&current, Some(&next), 5.0, &members());
        assert_eq!(coords(&result), vec![("a", 5.0, 5.0)]);

        let result = interpolate(&current, None, 5.0, &members());
        assert_eq!(coords(&result), vec![("a", 0.0, 0.0)]);
    }

    #[test]
    fn test_zero_duration_snaps_to_next() {
        let current = Formation::new("f1", 5.0, vec![Position::new("a", 0.0, 0.0)]);
        let next = Formation::new("f2", 5.0, vec![Position::new("a", 40.0, 60.0)]);

        let result = interpolate(&current, Some(&next), 5.0, &members());
        assert_eq!(coords(&result), vec![("a", 40.0, 60.0)]);
    }

    #[test]
    fn test_snap_policy_ignores_next() {
        let (current, next) = pair();
        let result = interpolate_with(InterpolationPolicy::Snap, &current, Some(&next), 7.5, &members());
        assert_eq!(coords(&result), vec![("a", 0.0, 0.0)]);
    }

    #[test]
    fn test_idempotent() {
        let (current, next) = pair();
        let first = interpolate(&current, Some(&next), 2.5, &members());
        let second = interpolate(&current, Some(&next), 2.5, &members());
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_entries_use_first() {
        let current = Formation::new("f1", 0.0, vec![Position::new("a", 0.0, 0.0)]);
        let next = Formation::new(
            "f2",
            10.0,
            vec![Position::new("a", 100.0, 0.0), Position::new("a", 0.0, 100.0)],
        );
        let mut roster = members();
        roster.push(Member::new("a", "artist", "Impostor", "#000000", 9));

        let result = interpolate(&current, Some(&next), 10.0, &roster);
        assert_eq!(coords(&result), vec![("a", 100.0, 0.0)]);
        assert_eq!(result[0].member.name, "Luna");

        let arrows = crate::movement_arrows(&current, Some(&next), &roster, 1.0);
        assert_eq!((arrows[0].to.x, arrows[0].to.y), (result[0].x, result[0].y));
        assert_eq!(arrows[0].color, result[0].member.color);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("Linear".parse::<InterpolationPolicy>(), Ok(InterpolationPolicy::Linear));
        assert_eq!(" snap ".parse::<InterpolationPolicy>(), Ok(InterpolationPolicy::Snap));
        assert!("bezier".parse::<InterpolationPolicy>().is_err());
        assert_eq!(InterpolationPolicy::default(), InterpolationPolicy::Linear);
    }
}
