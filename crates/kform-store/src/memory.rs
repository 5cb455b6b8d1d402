//! In-memory repository.
//!
//! Backs tests and the demo viewer. Tables are plain vectors behind a single
//! [`RwLock`], so rows keep insertion order and each call sees a consistent
//! snapshot. Foreign keys and unique keys are checked the way the relational
//! schema declares them; deleting a formation cascades to its positions.

use async_trait::async_trait;
use chrono::Utc;
use kform_models::{is_hex_color, resolve_youtube_id};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::repository::FormationRepository;
use crate::rows::{
    ArtistRow, ArtistWithMembers, FormationDataRow, FormationRow, FormationUpdate,
    FormationWithPositions, FullFormationData, MemberRow, MemberUpdate, NewFormation, NewMember,
    NewPosition, NewVideo, PositionRow, PositionUpdate, VideoRow, VideoWithArtist,
};

#[derive(Debug, Default)]
struct Tables {
    artists: Vec<ArtistRow>,
    members: Vec<MemberRow>,
    videos: Vec<VideoRow>,
    formation_data: Vec<FormationDataRow>,
    formations: Vec<FormationRow>,
    positions: Vec<PositionRow>,
}

impl Tables {
    fn artist_with_members(&self, artist: &ArtistRow) -> ArtistWithMembers {
        let mut members: Vec<MemberRow> = self
            .members
            .iter()
            .filter(|m| m.artist_id == artist.id)
            .cloned()
            .collect();
        members.sort_by_key(|m| m.display_order);

        ArtistWithMembers {
            artist: artist.clone(),
            members,
        }
    }

    fn video_with_artist(&self, video: &VideoRow) -> Option<VideoWithArtist> {
        let artist = self.artists.iter().find(|a| a.id == video.artist_id)?;
        Some(VideoWithArtist {
            video: video.clone(),
            artist: self.artist_with_members(artist),
        })
    }

    fn has_position(&self, formation_id: &str, member_id: &str) -> bool {
        self.positions
            .iter()
            .any(|p| p.formation_id == formation_id && p.member_id == member_id)
    }

    fn check_position_keys(&self, position: &NewPosition) -> StoreResult<()> {
        if !self.formations.iter().any(|f| f.id == position.formation_id) {
            return Err(StoreError::foreign_key(format!("formation {}", position.formation_id)));
        }
        if !self.members.iter().any(|m| m.id == position.member_id) {
            return Err(StoreError::foreign_key(format!("member {}", position.member_id)));
        }
        Ok(())
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// Write-side checks mirror the read-side rules in `mapping`.

fn check_color(color: &str) -> StoreResult<()> {
    if is_hex_color(color) {
        Ok(())
    } else {
        Err(StoreError::invalid_input(format!("member color must be #RGB or #RRGGBB, got '{}'", color)))
    }
}

fn check_order(order: i32) -> StoreResult<()> {
    if order < 0 {
        return Err(StoreError::invalid_input(format!("display order must not be negative, got {}", order)));
    }
    Ok(())
}

fn check_time(time: f64) -> StoreResult<()> {
    if !time.is_finite() || time < 0.0 {
        return Err(StoreError::invalid_input(format!(
            "formation time must be a non-negative number, got {}",
            time
        )));
    }
    Ok(())
}

fn check_coordinate(value: f64) -> StoreResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(StoreError::invalid_input(format!("position coordinate must be finite, got {}", value)))
    }
}

/// Repository keeping every table in memory.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FormationRepository for MemoryRepository {
    async fn list_artists(&self) -> StoreResult<Vec<ArtistWithMembers>> {
        let tables = self.tables.read().await;
        let mut artists: Vec<ArtistWithMembers> =
            tables.artists.iter().map(|a| tables.artist_with_members(a)).collect();
        artists.sort_by(|a, b| a.artist.name.cmp(&b.artist.name));
        Ok(artists)
    }

    async fn get_artist(&self, id: &str) -> StoreResult<Option<ArtistWithMembers>> {
        let tables = self.tables.read().await;
        Ok(tables
            .artists
            .iter()
            .find(|a| a.id == id)
            .map(|a| tables.artist_with_members(a)))
    }

    async fn create_artist(&self, name: &str) -> StoreResult<ArtistRow> {
        if name.trim().is_empty() {
            return Err(StoreError::invalid_input("artist name is required"));
        }

        let row = ArtistRow {
            id: new_id(),
            name: name.trim().to_string(),
            created_at: Utc::now(),
        };
        self.tables.write().await.artists.push(row.clone());
        debug!(artist_id = %row.id, "Created artist");
        Ok(row)
    }

    async fn create_member(&self, member: NewMember) -> StoreResult<MemberRow> {
        check_color(&member.color)?;
        check_order(member.display_order)?;

        let mut tables = self.tables.write().await;
        if !tables.artists.iter().any(|a| a.id == member.artist_id) {
            return Err(StoreError::foreign_key(format!("artist {}", member.artist_id)));
        }

        let row = MemberRow {
            id: new_id(),
            artist_id: member.artist_id,
            name: member.name,
            color: member.color,
            display_order: member.display_order,
            created_at: Utc::now(),
        };
        tables.members.push(row.clone());
        debug!(member_id = %row.id, artist_id = %row.artist_id, "Created member");
        Ok(row)
    }

    async fn update_member(&self, id: &str, update: MemberUpdate) -> StoreResult<MemberRow> {
        if let Some(color) = &update.color {
            check_color(color)?;
        }
        if let Some(order) = update.display_order {
            check_order(order)?;
        }

        let mut tables = self.tables.write().await;
        let row = tables
            .members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::not_found(format!("member {}", id)))?;

        if let Some(name) = update.name {
            row.name = name;
        }
        if let Some(color) = update.color {
            row.color = color;
        }
        if let Some(order) = update.display_order {
            row.display_order = order;
        }
        Ok(row.clone())
    }

    async fn list_videos(&self) -> StoreResult<Vec<VideoWithArtist>> {
        let tables = self.tables.read().await;
        let mut videos: Vec<VideoWithArtist> = tables
            .videos
            .iter()
            .filter_map(|v| tables.video_with_artist(v))
            .collect();
        // Newest first; later inserts win ties.
        videos.reverse();
        videos.sort_by(|a, b| b.video.created_at.cmp(&a.video.created_at));
        Ok(videos)
    }

    async fn get_video(&self, id: &str) -> StoreResult<Option<VideoWithArtist>> {
        let tables = self.tables.read().await;
        Ok(tables
            .videos
            .iter()
            .find(|v| v.id == id)
            .and_then(|v| tables.video_with_artist(v)))
    }

    async fn create_video(&self, video: NewVideo) -> StoreResult<VideoRow> {
        resolve_youtube_id(&video.youtube_video_id)
            .map_err(|e| StoreError::invalid_input(format!("video: {}", e)))?;

        let mut tables = self.tables.write().await;
        if !tables.artists.iter().any(|a| a.id == video.artist_id) {
            return Err(StoreError::foreign_key(format!("artist {}", video.artist_id)));
        }

        let row = VideoRow {
            id: new_id(),
            artist_id: video.artist_id,
            youtube_video_id: video.youtube_video_id,
            title: video.title,
            created_at: Utc::now(),
        };
        tables.videos.push(row.clone());
        debug!(video_id = %row.id, youtube_id = %row.youtube_video_id, "Created video");
        Ok(row)
    }

    async fn get_formation_data_by_video(&self, video_id: &str) -> StoreResult<Option<FullFormationData>> {
        let tables = self.tables.read().await;
        let Some(data) = tables.formation_data.iter().find(|d| d.video_id == video_id) else {
            return Ok(None);
        };
        let Some(video) = tables
            .videos
            .iter()
            .find(|v| v.id == data.video_id)
            .and_then(|v| tables.video_with_artist(v))
        else {
            return Ok(None);
        };

        let mut formations: Vec<FormationWithPositions> = tables
            .formations
            .iter()
            .filter(|f| f.formation_data_id == data.id)
            .map(|f| FormationWithPositions {
                formation: f.clone(),
                positions: tables
                    .positions
                    .iter()
                    .filter(|p| p.formation_id == f.id)
                    .cloned()
                    .collect(),
            })
            .collect();
        formations.sort_by(|a, b| a.formation.time.total_cmp(&b.formation.time));

        Ok(Some(FullFormationData {
            data: data.clone(),
            video,
            formations,
        }))
    }

    async fn create_formation_data(
        &self,
        video_id: &str,
        contributor_name: Option<&str>,
    ) -> StoreResult<FormationDataRow> {
        let mut tables = self.tables.write().await;
        if !tables.videos.iter().any(|v| v.id == video_id) {
            return Err(StoreError::foreign_key(format!("video {}", video_id)));
        }
        if tables.formation_data.iter().any(|d| d.video_id == video_id) {
            return Err(StoreError::conflict(format!("formation data for video {}", video_id)));
        }

        let now = Utc::now();
        let row = FormationDataRow {
            id: new_id(),
            video_id: video_id.to_string(),
            contributor_name: contributor_name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        tables.formation_data.push(row.clone());
        Ok(row)
    }

    async fn create_formation(&self, formation: NewFormation) -> StoreResult<FormationRow> {
        check_time(formation.time)?;

        let mut tables = self.tables.write().await;
        if !tables.formation_data.iter().any(|d| d.id == formation.formation_data_id) {
            return Err(StoreError::foreign_key(format!(
                "formation data {}",
                formation.formation_data_id
            )));
        }

        let row = FormationRow {
            id: new_id(),
            formation_data_id: formation.formation_data_id,
            time: formation.time,
            name: formation.name,
            display_order: formation.display_order,
            created_at: Utc::now(),
        };
        tables.formations.push(row.clone());
        Ok(row)
    }

    async fn update_formation(&self, id: &str, update: FormationUpdate) -> StoreResult<FormationRow> {
        if let Some(time) = update.time {
            check_time(time)?;
        }

        let mut tables = self.tables.write().await;
        let row = tables
            .formations
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| StoreError::not_found(format!("formation {}", id)))?;

        if let Some(time) = update.time {
            row.time = time;
        }
        if let Some(name) = update.name {
            row.name = name;
        }
        Ok(row.clone())
    }

    async fn delete_formation(&self, id: &str) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.formations.len();
        tables.formations.retain(|f| f.id != id);
        if tables.formations.len() == before {
            // Deleting a missing row is not an error for the backend either.
            return Ok(());
        }

        tables.positions.retain(|p| p.formation_id != id);
        debug!(formation_id = id, "Deleted formation");
        Ok(())
    }

    async fn create_position(&self, position: NewPosition) -> StoreResult<PositionRow> {
        check_coordinate(position.x)?;
        check_coordinate(position.y)?;

        let mut tables = self.tables.write().await;
        tables.check_position_keys(&position)?;
        if tables.has_position(&position.formation_id, &position.member_id) {
            return Err(StoreError::conflict(format!(
                "position for member {} in formation {}",
                position.member_id, position.formation_id
            )));
        }

        let row = PositionRow {
            id: new_id(),
            formation_id: position.formation_id,
            member_id: position.member_id,
            x: position.x,
            y: position.y,
            created_at: Utc::now(),
        };
        tables.positions.push(row.clone());
        Ok(row)
    }

    async fn update_position(&self, id: &str, update: PositionUpdate) -> StoreResult<PositionRow> {
        for value in update.x.into_iter().chain(update.y) {
            check_coordinate(value)?;
        }

        let mut tables = self.tables.write().await;
        let row = tables
            .positions
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found(format!("position {}", id)))?;

        if let Some(x) = update.x {
            row.x = x;
        }
        if let Some(y) = update.y {
            row.y = y;
        }
        Ok(row.clone())
    }

    async fn upsert_positions(&self, positions: Vec<NewPosition>) -> StoreResult<Vec<PositionRow>> {
        let mut tables = self.tables.write().await;
        for position in &positions {
            check_coordinate(position.x)?;
            check_coordinate(position.y)?;
            tables.check_position_keys(position)?;
        }

        let mut written = Vec::with_capacity(positions.len());
        for position in positions {
            let existing = tables
                .positions
                .iter_mut()
                .find(|p| p.formation_id == position.formation_id && p.member_id == position.member_id);

            let row = match existing {
                Some(row) => {
                    row.x = position.x;
                    row.y = position.y;
                    row.clone()
                }
                None => {
                    let row = PositionRow {
                        id: new_id(),
                        formation_id: position.formation_id,
                        member_id: position.member_id,
                        x: position.x,
                        y: position.y,
                        created_at: Utc::now(),
                    };
                    tables.positions.push(row.clone());
                    row
                }
            };
            written.push(row);
        }

        debug!(count = written.len(), "Upserted positions");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> (MemoryRepository, MemberRow, FormationRow) {
        let repo = MemoryRepository::new();
        let artist = repo.create_artist("STELLAR").await.unwrap();
        let member = repo
            .create_member(NewMember {
                artist_id: artist.id.clone(),
                name: "Luna".to_string(),
                color: "#FF6B9D".to_string(),
                display_order: 0,
            })
            .await
            .unwrap();
        let video = repo
            .create_video(NewVideo {
                artist_id: artist.id,
                youtube_video_id: "dQw4w9WgXcQ".to_string(),
                title: "Starlight".to_string(),
            })
            .await
            .unwrap();
        let data = repo.create_formation_data(&video.id, None).await.unwrap();
        let formation = repo
            .create_formation(NewFormation {
                formation_data_id: data.id,
                time: 0.0,
                name: None,
                display_order: 0,
            })
            .await
            .unwrap();
        (repo, member, formation)
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let repo = MemoryRepository::new();
        let err = repo
            .create_member(NewMember {
                artist_id: "missing".to_string(),
                name: "Luna".to_string(),
                color: "#FF6B9D".to_string(),
                display_order: 0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ForeignKey(_)));
    }

    #[tokio::test]
    async fn test_position_unique_key() {
        let (repo, member, formation) = seeded().await;
        let position = NewPosition {
            formation_id: formation.id.clone(),
            member_id: member.id.clone(),
            x: 10.0,
            y: 20.0,
        };

        repo.create_position(position.clone()).await.unwrap();
        let err = repo.create_position(position).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_upsert_updates_in_place() {
        let (repo, member, formation) = seeded().await;
        let first = repo
            .create_position(NewPosition {
                formation_id: formation.id.clone(),
                member_id: member.id.clone(),
                x: 10.0,
                y: 20.0,
            })
            .await
            .unwrap();

        let written = repo
            .upsert_positions(vec![NewPosition {
                formation_id: formation.id.clone(),
                member_id: member.id.clone(),
                x: 70.0,
                y: 80.0,
            }])
            .await
            .unwrap();

        assert_eq!(written.len(), 1);
        assert_eq!(written[0].id, first.id);
        assert_eq!((written[0].x, written[0].y), (70.0, 80.0));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = MemoryRepository::new();
        let err = repo
            .update_formation("missing", FormationUpdate::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_cascades_positions() {
        let (repo, member, formation) = seeded().await;
        repo.create_position(NewPosition {
            formation_id: formation.id.clone(),
            member_id: member.id,
            x: 1.0,
            y: 2.0,
        })
        .await
        .unwrap();

        repo.delete_formation(&formation.id).await.unwrap();
        assert!(repo.tables.read().await.positions.is_empty());
    }

    #[tokio::test]
    async fn test_writes_reject_unloadable_values() {
        let (repo, member, formation) = seeded().await;

        let err = repo
            .update_member(
                &member.id,
                MemberUpdate {
                    color: Some("pink".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));

        for time in [-5.0, f64::NAN, f64::INFINITY] {
            let err = repo
                .update_formation(
                    &formation.id,
                    FormationUpdate {
                        time: Some(time),
                        ..Default::default()
                    },
                )
                .await
                .unwrap_err();
            assert!(matches!(err, StoreError::InvalidInput(_)), "time {} was accepted", time);
        }

        let err = repo
            .upsert_positions(vec![NewPosition {
                formation_id: formation.id.clone(),
                member_id: member.id.clone(),
                x: f64::NAN,
                y: 0.0,
            }])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));

        // Nothing was written by the rejected calls.
        let tables = repo.tables.read().await;
        assert_eq!(tables.members[0].color, "#FF6B9D");
        assert_eq!(tables.formations[0].time, 0.0);
        assert!(tables.positions.is_empty());
    }
}
