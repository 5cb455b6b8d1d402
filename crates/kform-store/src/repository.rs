//! Repository trait for the formation store.
//!
//! Mirrors the query surface of the relational backend. Lookups of a single
//! row return `Ok(None)` when it does not exist; updates of a missing row are
//! [`crate::StoreError::NotFound`].

use async_trait::async_trait;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::mapping::VideoTimeline;
use crate::rows::{
    ArtistRow, ArtistWithMembers, FormationDataRow, FormationRow, FormationUpdate,
    FullFormationData, MemberRow, MemberUpdate, NewFormation, NewMember, NewPosition, NewVideo,
    PositionRow, PositionUpdate, VideoRow, VideoWithArtist,
};

#[async_trait]
pub trait FormationRepository: Send + Sync {
    // Artists

    /// All artists with members, ordered by name.
    async fn list_artists(&self) -> StoreResult<Vec<ArtistWithMembers>>;
    async fn get_artist(&self, id: &str) -> StoreResult<Option<ArtistWithMembers>>;
    async fn create_artist(&self, name: &str) -> StoreResult<ArtistRow>;

    // Members

    async fn create_member(&self, member: NewMember) -> StoreResult<MemberRow>;
    async fn update_member(&self, id: &str, update: MemberUpdate) -> StoreResult<MemberRow>;

    // Videos

    /// All videos with artists, newest first.
    async fn list_videos(&self) -> StoreResult<Vec<VideoWithArtist>>;
    async fn get_video(&self, id: &str) -> StoreResult<Option<VideoWithArtist>>;
    async fn create_video(&self, video: NewVideo) -> StoreResult<VideoRow>;

    // Formation data

    /// Formation data for a video with formations sorted by time.
    async fn get_formation_data_by_video(&self, video_id: &str) -> StoreResult<Option<FullFormationData>>;
    async fn create_formation_data(
        &self,
        video_id: &str,
        contributor_name: Option<&str>,
    ) -> StoreResult<FormationDataRow>;

    // Formations

    async fn create_formation(&self, formation: NewFormation) -> StoreResult<FormationRow>;
    async fn update_formation(&self, id: &str, update: FormationUpdate) -> StoreResult<FormationRow>;
    /// Delete a formation and its positions.
    async fn delete_formation(&self, id: &str) -> StoreResult<()>;

    // Positions

    async fn create_position(&self, position: NewPosition) -> StoreResult<PositionRow>;
    async fn update_position(&self, id: &str, update: PositionUpdate) -> StoreResult<PositionRow>;
    /// Insert or update positions keyed by `(formation_id, member_id)`.
    async fn upsert_positions(&self, positions: Vec<NewPosition>) -> StoreResult<Vec<PositionRow>>;
}

/// Load a video's formation timeline as validated domain values.
///
/// Returns `Ok(None)` when no formation data exists for the video.
pub async fn load_timeline<R>(repo: &R, video_id: &str) -> StoreResult<Option<VideoTimeline>>
where
    R: FormationRepository + ?Sized,
{
    let Some(row) = repo.get_formation_data_by_video(video_id).await? else {
        debug!(video_id, "No formation data for video");
        return Ok(None);
    };

    let timeline = VideoTimeline::try_from(&row).map_err(StoreError::from)?;
    debug!(
        video_id,
        formations = timeline.formations().len(),
        members = timeline.members().len(),
        "Loaded formation timeline"
    );
    Ok(Some(timeline))
}
