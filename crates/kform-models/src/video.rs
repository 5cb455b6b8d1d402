//! Video models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::{ArtistId, VideoId};
use crate::youtube::youtube_watch_url;

/// A YouTube video registered for an artist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: VideoId,
    pub artist_id: ArtistId,
    /// 11-character YouTube video ID
    pub youtube_video_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl Video {
    /// Canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        youtube_watch_url(&self.youtube_video_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        let video = Video {
            id: VideoId::from("video-sample"),
            artist_id: ArtistId::from("artist-stellar"),
            youtube_video_id: "dQw4w9WgXcQ".to_string(),
            title: "STELLAR - Starlight (Dance Practice)".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(video.watch_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }
}
