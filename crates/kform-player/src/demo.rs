//! Bundled sample timeline for the demo viewer.
//!
//! The sample names members instead of referencing ids, since ids are only
//! known once the rows exist.

use std::collections::HashMap;

use kform_store::{
    save_full_formation, FormationInput, FormationRepository, NewMember, NewVideo, PositionInput,
    SaveFormationRequest, StoreError,
};
use serde::Deserialize;
use tracing::info;

use crate::error::PlayerResult;

const STELLAR_SAMPLE: &str = include_str!("../data/stellar.json");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Sample {
    artist: String,
    members: Vec<SampleMember>,
    video: SampleVideo,
    contributor_name: Option<String>,
    formations: Vec<SampleFormation>,
}

#[derive(Debug, Deserialize)]
struct SampleMember {
    name: String,
    color: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SampleVideo {
    youtube_video_id: String,
    title: String,
}

#[derive(Debug, Deserialize)]
struct SampleFormation {
    time: f64,
    name: Option<String>,
    positions: Vec<SamplePosition>,
}

#[derive(Debug, Deserialize)]
struct SamplePosition {
    member: String,
    x: f64,
    y: f64,
}

/// Store the bundled sample and return the new video's id.
pub async fn seed_sample<R>(repo: &R) -> PlayerResult<String>
where
    R: FormationRepository + ?Sized,
{
    let sample: Sample = serde_json::from_str(STELLAR_SAMPLE)?;

    let artist = repo.create_artist(&sample.artist).await?;
    let mut member_ids = HashMap::with_capacity(sample.members.len());
    for (i, member) in sample.members.into_iter().enumerate() {
        let row = repo
            .create_member(NewMember {
                artist_id: artist.id.clone(),
                name: member.name.clone(),
                color: member.color,
                display_order: i as i32 + 1,
            })
            .await?;
        member_ids.insert(member.name, row.id);
    }

    let video = repo
        .create_video(NewVideo {
            artist_id: artist.id.clone(),
            youtube_video_id: sample.video.youtube_video_id,
            title: sample.video.title,
        })
        .await?;

    let formations = sample
        .formations
        .into_iter()
        .map(|f| {
            let positions = f
                .positions
                .into_iter()
                .map(|p| {
                    let member_id = member_ids.get(&p.member).cloned().ok_or_else(|| {
                        StoreError::invalid_input(format!("sample member '{}' is not defined", p.member))
                    })?;
                    Ok(PositionInput { member_id, x: p.x, y: p.y })
                })
                .collect::<Result<Vec<_>, StoreError>>()?;
            Ok(FormationInput { time: f.time, name: f.name, positions })
        })
        .collect::<Result<Vec<_>, StoreError>>()?;

    save_full_formation(
        repo,
        SaveFormationRequest {
            video_id: video.id.clone(),
            contributor_name: sample.contributor_name,
            formations,
        },
    )
    .await?;

    info!(artist = %artist.name, video_id = %video.id, "Seeded sample timeline");
    Ok(video.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kform_store::{load_timeline, MemoryRepository};

    #[tokio::test]
    async fn test_seed_sample() {
        let repo = MemoryRepository::new();
        let video_id = seed_sample(&repo).await.unwrap();

        let timeline = load_timeline(&repo, &video_id).await.unwrap().unwrap();
        assert_eq!(timeline.artist.name, "STELLAR");
        assert_eq!(timeline.members().len(), 4);
        assert_eq!(timeline.formations().len(), 10);
        assert_eq!(timeline.formations()[9].display_name(), "Finale");
        assert!(timeline.formations().iter().all(|f| f.positions.len() == 4));
    }
}
