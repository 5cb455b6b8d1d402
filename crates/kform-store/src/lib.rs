//! Persistence boundary for formation timelines.
//!
//! This crate provides:
//! - Raw row types mirroring the relational schema
//! - Validated mapping from rows to domain models
//! - The [`FormationRepository`] trait and an in-memory implementation
//! - Bulk save of a video's formations and the editor draft save flow

pub mod bulk;
pub mod draft;
pub mod error;
pub mod mapping;
pub mod memory;
pub mod repository;
pub mod rows;

pub use bulk::{save_full_formation, FormationInput, PositionInput, SaveFormationRequest};
pub use draft::{DraftError, DraftResult, EditorDraft, SavedDraft};
pub use error::{MappingError, StoreError, StoreResult};
pub use mapping::VideoTimeline;
pub use memory::MemoryRepository;
pub use repository::{load_timeline, FormationRepository};
pub use rows::{
    ArtistRow, ArtistWithMembers, FormationDataRow, FormationRow, FormationUpdate,
    FormationWithPositions, FullFormationData, MemberRow, MemberUpdate, NewFormation, NewMember,
    NewPosition, NewVideo, PositionRow, PositionUpdate, VideoRow, VideoWithArtist,
};
