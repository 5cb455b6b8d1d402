//! Formation models.
//!
//! A formation is a timestamped snapshot of where every member stands.
//! Coordinates are stage percentages: `x` 0 = left edge, 100 = right edge;
//! `y` 0 = top edge, 100 = bottom edge. The models do not clamp; clamping is
//! an authoring concern (see [`crate::stage`]).

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::{FormationDataId, FormationId, MemberId, VideoId};
use crate::member::Member;

/// One member's coordinate within a formation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub member_id: MemberId,
    /// Percentage of stage width
    pub x: f64,
    /// Percentage of stage height
    pub y: f64,
}

impl Position {
    pub fn new(member_id: impl Into<MemberId>, x: f64, y: f64) -> Self {
        Self {
            member_id: member_id.into(),
            x,
            y,
        }
    }
}

/// A named, timestamped set of member positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Formation {
    pub id: FormationId,
    /// Seconds from the start of the video
    pub time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub positions: Vec<Position>,
}

impl Formation {
    pub fn new(id: impl Into<FormationId>, time: f64, positions: Vec<Position>) -> Self {
        Self {
            id: id.into(),
            time,
            name: None,
            positions,
        }
    }

    /// Set the display label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Position of a member in this formation, if present.
    pub fn position_of(&self, member_id: &MemberId) -> Option<&Position> {
        self.positions.iter().find(|p| &p.member_id == member_id)
    }

    /// Label for display, falling back to a generic one.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Formation")
    }
}

/// A position resolved against its member, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterpolatedPosition {
    pub member_id: MemberId,
    pub x: f64,
    pub y: f64,
    pub member: Member,
}

/// The formation set authored for one video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormationData {
    pub id: FormationDataId,
    pub video_id: VideoId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributor_name: Option<String>,
    #[serde(default)]
    pub formations: Vec<Formation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
