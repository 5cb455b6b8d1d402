//! Raw persistence rows.
//!
//! These mirror the relational schema column for column (snake_case, string
//! ids, signed display orders). Nothing here is trusted: rows reach the
//! domain only through [`crate::mapping`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Table rows
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRow {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRow {
    pub id: String,
    pub artist_id: String,
    pub name: String,
    pub color: String,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRow {
    pub id: String,
    pub artist_id: String,
    pub youtube_video_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationDataRow {
    pub id: String,
    pub video_id: String,
    pub contributor_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationRow {
    pub id: String,
    pub formation_data_id: String,
    pub time: f64,
    pub name: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRow {
    pub id: String,
    pub formation_id: String,
    pub member_id: String,
    pub x: f64,
    pub y: f64,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Joined query results
// ============================================================================

/// Artist with its members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistWithMembers {
    #[serde(flatten)]
    pub artist: ArtistRow,
    #[serde(default)]
    pub members: Vec<MemberRow>,
}

/// Video with its artist and the artist's members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoWithArtist {
    #[serde(flatten)]
    pub video: VideoRow,
    pub artist: ArtistWithMembers,
}

/// Formation with its positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationWithPositions {
    #[serde(flatten)]
    pub formation: FormationRow,
    #[serde(default)]
    pub positions: Vec<PositionRow>,
}

/// Formation data with every relation needed by the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullFormationData {
    #[serde(flatten)]
    pub data: FormationDataRow,
    pub video: VideoWithArtist,
    #[serde(default)]
    pub formations: Vec<FormationWithPositions>,
}

// ============================================================================
// Write payloads
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMember {
    pub artist_id: String,
    pub name: String,
    pub color: String,
    pub display_order: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVideo {
    pub artist_id: String,
    pub youtube_video_id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFormation {
    pub formation_data_id: String,
    pub time: f64,
    pub name: Option<String>,
    pub display_order: i32,
}

/// Partial formation update. `name: Some(None)` clears the label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormationUpdate {
    pub time: Option<f64>,
    pub name: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPosition {
    pub formation_id: String,
    pub member_id: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_row_deserializes_flattened() {
        let json = r#"{
            "id": "fd-1",
            "video_id": "v-1",
            "contributor_name": null,
            "created_at": "2024-01-15T00:00:00Z",
            "updated_at": "2024-01-15T00:00:00Z",
            "video": {
                "id": "v-1",
                "artist_id": "a-1",
                "youtube_video_id": "dQw4w9WgXcQ",
                "title": "Starlight",
                "created_at": "2024-01-15T00:00:00Z",
                "artist": {
                    "id": "a-1",
                    "name": "STELLAR",
                    "created_at": "2024-01-01T00:00:00Z",
                    "members": []
                }
            },
            "formations": [{
                "id": "f-1",
                "formation_data_id": "fd-1",
                "time": 4.5,
                "name": "Opening",
                "display_order": 0,
                "created_at": "2024-01-15T00:00:00Z",
                "positions": []
            }]
        }"#;

        let data: FullFormationData = serde_json::from_str(json).unwrap();
        assert_eq!(data.data.video_id, "v-1");
        assert_eq!(data.video.artist.artist.name, "STELLAR");
        assert_eq!(data.formations[0].formation.time, 4.5);
    }
}
