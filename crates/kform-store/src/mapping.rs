//! Validated conversion from persistence rows to domain models.
//!
//! A row that would put NaN times, non-finite coordinates, blank ids or
//! malformed colors into the engine is rejected here with a [`MappingError`].

use kform_models::{
    is_hex_color, resolve_youtube_id, Artist, Formation, FormationData, Member, Position, Video,
};

use crate::error::MappingError;
use crate::rows::{
    ArtistWithMembers, FormationWithPositions, FullFormationData, MemberRow, PositionRow, VideoRow,
};

fn require(value: &str, table: &'static str, field: &'static str) -> Result<(), MappingError> {
    if value.trim().is_empty() {
        Err(MappingError::BlankField { table, field })
    } else {
        Ok(())
    }
}

impl TryFrom<&MemberRow> for Member {
    type Error = MappingError;

    fn try_from(row: &MemberRow) -> Result<Self, Self::Error> {
        require(&row.id, "members", "id")?;
        require(&row.artist_id, "members", "artist_id")?;

        if !is_hex_color(&row.color) {
            return Err(MappingError::InvalidColor {
                member_id: row.id.clone(),
                color: row.color.clone(),
            });
        }

        let order = u32::try_from(row.display_order).map_err(|_| MappingError::InvalidOrder {
            member_id: row.id.clone(),
            order: row.display_order,
        })?;

        Ok(Member::new(
            row.id.as_str(),
            row.artist_id.as_str(),
            row.name.as_str(),
            row.color.as_str(),
            order,
        ))
    }
}

impl TryFrom<&ArtistWithMembers> for Artist {
    type Error = MappingError;

    fn try_from(row: &ArtistWithMembers) -> Result<Self, Self::Error> {
        require(&row.artist.id, "artists", "id")?;

        let members = row
            .members
            .iter()
            .map(Member::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Artist {
            id: row.artist.id.as_str().into(),
            name: row.artist.name.clone(),
            members,
            created_at: row.artist.created_at,
        })
    }
}

impl TryFrom<&VideoRow> for Video {
    type Error = MappingError;

    fn try_from(row: &VideoRow) -> Result<Self, Self::Error> {
        require(&row.id, "videos", "id")?;
        require(&row.artist_id, "videos", "artist_id")?;

        let youtube_video_id =
            resolve_youtube_id(&row.youtube_video_id).map_err(|e| MappingError::InvalidYoutubeId {
                video_id: row.id.clone(),
                reason: e.to_string(),
            })?;

        Ok(Video {
            id: row.id.as_str().into(),
            artist_id: row.artist_id.as_str().into(),
            youtube_video_id,
            title: row.title.clone(),
            created_at: row.created_at,
        })
    }
}

impl TryFrom<&PositionRow> for Position {
    type Error = MappingError;

    fn try_from(row: &PositionRow) -> Result<Self, Self::Error> {
        require(&row.member_id, "positions", "member_id")?;

        if !row.x.is_finite() || !row.y.is_finite() {
            return Err(MappingError::InvalidCoordinate {
                position_id: row.id.clone(),
                x: row.x,
                y: row.y,
            });
        }

        Ok(Position::new(row.member_id.as_str(), row.x, row.y))
    }
}

impl TryFrom<&FormationWithPositions> for Formation {
    type Error = MappingError;

    fn try_from(row: &FormationWithPositions) -> Result<Self, Self::Error> {
        let formation = &row.formation;
        require(&formation.id, "formations", "id")?;

        if !formation.time.is_finite() || formation.time < 0.0 {
            return Err(MappingError::InvalidTime {
                formation_id: formation.id.clone(),
                time: formation.time,
            });
        }

        let positions = row
            .positions
            .iter()
            .map(Position::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Formation {
            id: formation.id.as_str().into(),
            time: formation.time,
            name: formation.name.clone().filter(|n| !n.trim().is_empty()),
            positions,
        })
    }
}

/// Everything the viewer needs for one video, in domain types.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoTimeline {
    pub video: Video,
    pub artist: Artist,
    pub formation_data: FormationData,
}

impl VideoTimeline {
    pub fn members(&self) -> &[Member] {
        &self.artist.members
    }

    pub fn formations(&self) -> &[Formation] {
        &self.formation_data.formations
    }
}

impl TryFrom<&FullFormationData> for VideoTimeline {
    type Error = MappingError;

    fn try_from(row: &FullFormationData) -> Result<Self, Self::Error> {
        require(&row.data.id, "formation_data", "id")?;

        let video = Video::try_from(&row.video.video)?;
        let artist = Artist::try_from(&row.video.artist)?;
        let formations = row
            .formations
            .iter()
            .map(Formation::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(VideoTimeline {
            video,
            artist,
            formation_data: FormationData {
                id: row.data.id.as_str().into(),
                video_id: row.data.video_id.as_str().into(),
                contributor_name: row.data.contributor_name.clone(),
                formations,
                created_at: row.data.created_at,
                updated_at: row.data.updated_at,
            },
        })
    }
}
