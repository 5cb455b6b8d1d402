//! Artist and member models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::{ArtistId, MemberId};

/// Colors handed out to newly added members, in order.
pub const DEFAULT_MEMBER_COLORS: [&str; 6] = [
    "#FF6B9D", "#4ECDC4", "#FFE66D", "#95E1D3", "#FF8B5A", "#B8A9C9",
];

/// A performer belonging to an artist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub artist_id: ArtistId,
    pub name: String,
    /// Display color as `#RRGGBB`
    pub color: String,
    /// Display-sort hint
    pub order: u32,
}

impl Member {
    pub fn new(
        id: impl Into<MemberId>,
        artist_id: impl Into<ArtistId>,
        name: impl Into<String>,
        color: impl Into<String>,
        order: u32,
    ) -> Self {
        Self {
            id: id.into(),
            artist_id: artist_id.into(),
            name: name.into(),
            color: color.into(),
            order,
        }
    }
}

/// Palette color for the member at `index` (wraps around).
pub fn default_member_color(index: usize) -> &'static str {
    DEFAULT_MEMBER_COLORS[index % DEFAULT_MEMBER_COLORS.len()]
}

/// Check a `#RGB` or `#RRGGBB` hex color string.
pub fn is_hex_color(color: &str) -> bool {
    let Some(digits) = color.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Find a member by id in a members list.
pub fn find_member<'a>(members: &'a [Member], id: &MemberId) -> Option<&'a Member> {
    members.iter().find(|m| &m.id == id)
}

/// An artist (group) with its members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    #[serde(default)]
    pub members: Vec<Member>,
    pub created_at: DateTime<Utc>,
}

impl Artist {
    /// Members sorted by their display order.
    pub fn members_in_order(&self) -> Vec<&Member> {
        let mut members: Vec<&Member> = self.members.iter().collect();
        members.sort_by_key(|m| m.order);
        members
    }
}
