//! Strongly typed identifiers.
//!
//! Every entity in the formation store is keyed by an opaque string. The
//! newtypes keep member ids from being compared against formation ids by
//! accident while staying `#[serde(transparent)]` on the wire.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Generate a new random ID.
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Create from an existing string.
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Get the inner string.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True when the id is empty or whitespace only.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// Unique identifier for an artist (group).
    ArtistId
);

string_id!(
    /// Unique identifier for a group member.
    MemberId
);

string_id!(
    /// Unique identifier for a registered video.
    VideoId
);

string_id!(
    /// Unique identifier for the formation set authored for one video.
    FormationDataId
);

string_id!(
    /// Unique identifier for a single formation.
    FormationId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(MemberId::new(), MemberId::new());
    }

    #[test]
    fn test_blank_detection() {
        assert!(FormationId::from("  ").is_blank());
        assert!(!FormationId::from("formation-1").is_blank());
    }

    #[test]
    fn test_transparent_serialization() {
        let id = MemberId::from("member-luna");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"member-luna\"");
    }
}
