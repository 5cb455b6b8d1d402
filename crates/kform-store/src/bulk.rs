//! Saving a whole formation timeline in one call.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::repository::FormationRepository;
use crate::rows::{FormationDataRow, NewFormation, NewPosition};

/// One member's position inside a [`FormationInput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionInput {
    pub member_id: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormationInput {
    pub time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub positions: Vec<PositionInput>,
}

/// Request to store a video's formation data with all formations and positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFormationRequest {
    pub video_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributor_name: Option<String>,
    #[serde(default)]
    pub formations: Vec<FormationInput>,
}

impl SaveFormationRequest {
    /// Parse a request from its JSON form.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Create the formation data row, then every formation in request order with
/// `display_order` set to its index, then each formation's positions.
pub async fn save_full_formation<R>(repo: &R, request: SaveFormationRequest) -> StoreResult<FormationDataRow>
where
    R: FormationRepository + ?Sized,
{
    if let Some(bad) = request.formations.iter().find(|f| !f.time.is_finite() || f.time < 0.0) {
        return Err(StoreError::invalid_input(format!(
            "formation time must be a non-negative number, got {}",
            bad.time
        )));
    }

    let data = repo
        .create_formation_data(&request.video_id, request.contributor_name.as_deref())
        .await?;

    let formation_count = request.formations.len();
    let mut position_count = 0usize;

    for (index, input) in request.formations.into_iter().enumerate() {
        let display_order = i32::try_from(index)
            .map_err(|_| StoreError::invalid_input("too many formations"))?;

        let formation = repo
            .create_formation(NewFormation {
                formation_data_id: data.id.clone(),
                time: input.time,
                name: input.name.filter(|n| !n.is_empty()),
                display_order,
            })
            .await?;

        for position in input.positions {
            repo.create_position(NewPosition {
                formation_id: formation.id.clone(),
                member_id: position.member_id,
                x: position.x,
                y: position.y,
            })
            .await?;
            position_count += 1;
        }
    }

    info!(
        video_id = %request.video_id,
        formation_data_id = %data.id,
        formations = formation_count,
        positions = position_count,
        "Saved formation data"
    );
    Ok(data)
}
