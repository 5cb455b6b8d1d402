//! Shared data models for formation timelines.
//!
//! This crate provides Serde-serializable types for:
//! - Artists, members and videos
//! - Formations and their member positions
//! - Typed identifiers
//! - Playback time formatting and stage geometry helpers
//! - YouTube video ID resolution

pub mod formation;
pub mod ids;
pub mod member;
pub mod stage;
pub mod time;
pub mod video;
pub mod youtube;

// Re-export common types
pub use formation::{Formation, FormationData, InterpolatedPosition, Position};
pub use ids::{ArtistId, FormationDataId, FormationId, MemberId, VideoId};
pub use member::{default_member_color, find_member, is_hex_color, Artist, Member, DEFAULT_MEMBER_COLORS};
pub use stage::{
    default_formation_slot, nudge, pointer_to_stage, StageBounds, StagePoint, StageRect, NEW_MEMBER_SLOT,
};
pub use time::{format_time, parse_time, TimeParseError};
pub use video::Video;
pub use youtube::{resolve_youtube_id, YoutubeIdError, YoutubeIdResult};
