//! Unsaved editor state and its save flow.
//!
//! An [`EditorDraft`] holds members and formations under locally generated
//! ids. Saving creates the artist, members, video, formation data,
//! formations and positions in that order, translating local member ids to
//! stored ones as it goes.

use std::collections::HashMap;

use kform_models::{
    default_formation_slot, default_member_color, is_hex_color, resolve_youtube_id, Formation,
    FormationId, Member, MemberId, Position, StageBounds, StagePoint, YoutubeIdError,
    NEW_MEMBER_SLOT,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::repository::FormationRepository;
use crate::rows::{NewFormation, NewMember, NewPosition, NewVideo};

/// Result type for draft operations.
pub type DraftResult<T> = Result<T, DraftError>;

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Invalid YouTube video: {0}")]
    Youtube(#[from] YoutubeIdError),

    #[error("Add at least one member before saving")]
    NoMembers,

    #[error("Add at least one formation before saving")]
    NoFormations,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid formation time: {0}")]
    InvalidTime(f64),

    #[error("Invalid member color: {0}")]
    InvalidColor(String),

    #[error("Invalid stage point: ({x}, {y})")]
    InvalidPoint { x: f64, y: f64 },

    #[error("Unknown member: {0}")]
    UnknownMember(MemberId),

    #[error("Unknown formation: {0}")]
    UnknownFormation(FormationId),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

fn check_time(time: f64) -> DraftResult<f64> {
    if time.is_finite() && time >= 0.0 {
        Ok(time)
    } else {
        Err(DraftError::InvalidTime(time))
    }
}

fn check_color(color: &str) -> DraftResult<()> {
    if is_hex_color(color) {
        Ok(())
    } else {
        Err(DraftError::InvalidColor(color.to_string()))
    }
}

/// Ids of the rows written by [`EditorDraft::save`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDraft {
    pub artist_id: String,
    pub video_id: String,
    pub formation_data_id: String,
    pub formations: usize,
    pub positions: usize,
}

/// Formation editor state before it is persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorDraft {
    pub youtube_video_id: String,
    pub video_title: String,
    pub artist_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributor_name: Option<String>,
    #[serde(default)]
    members: Vec<Member>,
    #[serde(default)]
    formations: Vec<Formation>,
    #[serde(default)]
    selected_formation: Option<FormationId>,
}

impl EditorDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the video from a bare id or any supported YouTube URL.
    pub fn set_video(&mut self, input: &str) -> DraftResult<()> {
        self.youtube_video_id = resolve_youtube_id(input)?;
        Ok(())
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Formations in time order.
    pub fn formations(&self) -> &[Formation] {
        &self.formations
    }

    pub fn selected_formation(&self) -> Option<&Formation> {
        let id = self.selected_formation.as_ref()?;
        self.formations.iter().find(|f| &f.id == id)
    }

    pub fn select_formation(&mut self, id: &FormationId) -> DraftResult<()> {
        if !self.formations.iter().any(|f| &f.id == id) {
            return Err(DraftError::UnknownFormation(id.clone()));
        }
        self.selected_formation = Some(id.clone());
        Ok(())
    }

    // Members

    /// Add a member with the next default name and palette color. Every
    /// existing formation gets the member at the stage center.
    pub fn add_member(&mut self) -> MemberId {
        let index = self.members.len();
        let member = Member::new(
            MemberId::new(),
            "",
            format!("Member {}", index + 1),
            default_member_color(index),
            index as u32,
        );
        let id = member.id.clone();

        for formation in &mut self.formations {
            formation
                .positions
                .push(Position::new(id.clone(), NEW_MEMBER_SLOT.x, NEW_MEMBER_SLOT.y));
        }
        self.members.push(member);

        debug!(member_id = %id, "Added draft member");
        id
    }

    pub fn update_member(
        &mut self,
        id: &MemberId,
        name: Option<String>,
        color: Option<String>,
    ) -> DraftResult<()> {
        if let Some(color) = &color {
            check_color(color)?;
        }

        let member = self
            .members
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| DraftError::UnknownMember(id.clone()))?;

        if let Some(name) = name {
            member.name = name;
        }
        if let Some(color) = color {
            member.color = color;
        }
        Ok(())
    }

    /// Remove a member and its position from every formation.
    pub fn delete_member(&mut self, id: &MemberId) -> DraftResult<()> {
        let before = self.members.len();
        self.members.retain(|m| &m.id != id);
        if self.members.len() == before {
            return Err(DraftError::UnknownMember(id.clone()));
        }

        for formation in &mut self.formations {
            formation.positions.retain(|p| &p.member_id != id);
        }
        Ok(())
    }

    // Formations

    /// Add a formation at `time` with members in their default slots and select it.
    pub fn add_formation(&mut self, time: f64) -> DraftResult<FormationId> {
        let time = check_time(time)?;
        let positions = self
            .members
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let slot = default_formation_slot(i);
                Position::new(m.id.clone(), slot.x, slot.y)
            })
            .collect();

        let formation = Formation::new(FormationId::new(), time, positions)
            .with_name(format!("Formation {}", self.formations.len() + 1));
        let id = formation.id.clone();

        self.formations.push(formation);
        self.sort_formations();
        self.selected_formation = Some(id.clone());

        debug!(formation_id = %id, time, "Added draft formation");
        Ok(id)
    }

    /// Remove a formation. If it was selected, the first remaining one is selected.
    pub fn delete_formation(&mut self, id: &FormationId) -> DraftResult<()> {
        let before = self.formations.len();
        self.formations.retain(|f| &f.id != id);
        if self.formations.len() == before {
            return Err(DraftError::UnknownFormation(id.clone()));
        }

        if self.selected_formation.as_ref() == Some(id) {
            self.selected_formation = self.formations.first().map(|f| f.id.clone());
        }
        Ok(())
    }

    /// Move a formation in time, keeping the list sorted.
    pub fn set_formation_time(&mut self, id: &FormationId, time: f64) -> DraftResult<()> {
        let time = check_time(time)?;
        self.formation_mut(id)?.time = time;
        self.sort_formations();
        Ok(())
    }

    pub fn rename_formation(&mut self, id: &FormationId, name: impl Into<String>) -> DraftResult<()> {
        self.formation_mut(id)?.name = Some(name.into());
        Ok(())
    }

    /// Place a member in the selected formation, clamped to the stage.
    pub fn move_member(&mut self, member_id: &MemberId, point: StagePoint) -> DraftResult<()> {
        let Some(selected) = self.selected_formation.clone() else {
            return Ok(());
        };
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(DraftError::InvalidPoint { x: point.x, y: point.y });
        }
        let point = StageBounds::INPUT.clamp(point);

        let formation = self.formation_mut(&selected)?;
        let position = formation
            .positions
            .iter_mut()
            .find(|p| &p.member_id == member_id)
            .ok_or_else(|| DraftError::UnknownMember(member_id.clone()))?;
        position.x = point.x;
        position.y = point.y;
        Ok(())
    }

    fn formation_mut(&mut self, id: &FormationId) -> DraftResult<&mut Formation> {
        self.formations
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or_else(|| DraftError::UnknownFormation(id.clone()))
    }

    fn sort_formations(&mut self) {
        self.formations.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    // Saving

    /// Check the draft has everything a save needs.
    pub fn validate(&self) -> DraftResult<()> {
        if self.artist_name.trim().is_empty() {
            return Err(DraftError::MissingField("artist name"));
        }
        if self.youtube_video_id.trim().is_empty() {
            return Err(DraftError::MissingField("YouTube video"));
        }
        if self.members.is_empty() {
            return Err(DraftError::NoMembers);
        }
        if self.formations.is_empty() {
            return Err(DraftError::NoFormations);
        }

        // A deserialized draft skips the setters, so recheck what they guard.
        for member in &self.members {
            check_color(&member.color)?;
        }
        for formation in &self.formations {
            check_time(formation.time)?;
            if let Some(p) = formation.positions.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
                return Err(DraftError::InvalidPoint { x: p.x, y: p.y });
            }
        }
        Ok(())
    }

    /// Persist the draft and return the stored ids.
    ///
    /// Positions whose member has no stored counterpart are skipped.
    pub async fn save<R>(&self, repo: &R) -> DraftResult<SavedDraft>
    where
        R: FormationRepository + ?Sized,
    {
        self.validate()?;
        let youtube_video_id = resolve_youtube_id(&self.youtube_video_id)?;

        let artist = repo.create_artist(&self.artist_name).await?;

        let mut member_ids: HashMap<&MemberId, String> = HashMap::with_capacity(self.members.len());
        for (i, member) in self.members.iter().enumerate() {
            let row = repo
                .create_member(NewMember {
                    artist_id: artist.id.clone(),
                    name: member.name.clone(),
                    color: member.color.clone(),
                    display_order: i as i32,
                })
                .await?;
            member_ids.insert(&member.id, row.id);
        }

        let video = repo
            .create_video(NewVideo {
                artist_id: artist.id.clone(),
                youtube_video_id,
                title: self.video_title.clone(),
            })
            .await?;

        let data = repo
            .create_formation_data(&video.id, self.contributor_name.as_deref())
            .await?;

        let mut positions = 0usize;
        for (i, formation) in self.formations.iter().enumerate() {
            let row = repo
                .create_formation(NewFormation {
                    formation_data_id: data.id.clone(),
                    time: formation.time,
                    name: formation.name.clone().filter(|n| !n.is_empty()),
                    display_order: i as i32,
                })
                .await?;

            for position in &formation.positions {
                let Some(member_id) = member_ids.get(&position.member_id) else {
                    warn!(member_id = %position.member_id, "Skipping position for unsaved member");
                    continue;
                };
                repo.create_position(NewPosition {
                    formation_id: row.id.clone(),
                    member_id: member_id.clone(),
                    x: position.x,
                    y: position.y,
                })
                .await?;
                positions += 1;
            }
        }

        info!(
            artist_id = %artist.id,
            video_id = %video.id,
            formations = self.formations.len(),
            positions,
            "Saved formation draft"
        );

        Ok(SavedDraft {
            artist_id: artist.id,
            video_id: video.id,
            formation_data_id: data.id,
            formations: self.formations.len(),
            positions,
        })
    }
}
