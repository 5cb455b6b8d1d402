//! YouTube video ID handling.
//!
//! Authoring accepts either a bare video ID or any common YouTube URL; both
//! resolve to the 11-character ID stored on [`crate::Video`].

use thiserror::Error;

/// Length of every YouTube video ID.
pub const YOUTUBE_ID_LEN: usize = 11;

/// Errors that can occur while resolving a YouTube video ID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YoutubeIdError {
    #[error("input is empty")]
    Empty,
    #[error("URL is not a YouTube URL")]
    NotYoutube,
    #[error("video ID not found in URL")]
    NotFound,
    #[error("invalid video ID '{0}'")]
    InvalidId(String),
}

pub type YoutubeIdResult<T> = Result<T, YoutubeIdError>;

/// URL markers that precede a video ID, in lookup order.
const ID_MARKERS: [&str; 6] = ["?v=", "&v=", "youtu.be/", "/embed/", "/shorts/", "/v/"];

/// Resolve user input (bare ID or URL) to a validated video ID.
///
/// # Examples
/// ```
/// use kform_models::youtube::resolve_youtube_id;
/// assert_eq!(resolve_youtube_id("dQw4w9WgXcQ").unwrap(), "dQw4w9WgXcQ");
/// assert_eq!(resolve_youtube_id("https://youtu.be/dQw4w9WgXcQ?t=30").unwrap(), "dQw4w9WgXcQ");
/// ```
pub fn resolve_youtube_id(input: &str) -> YoutubeIdResult<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(YoutubeIdError::Empty);
    }

    if is_valid_youtube_id(input) {
        return Ok(input.to_string());
    }

    extract_youtube_id(input)
}

/// Extract the video ID from a YouTube URL.
pub fn extract_youtube_id(url: &str) -> YoutubeIdResult<String> {
    let lowered = url.to_ascii_lowercase();
    if !lowered.contains("youtube.com") && !lowered.contains("youtu.be") {
        return Err(YoutubeIdError::NotYoutube);
    }

    let id = ID_MARKERS
        .iter()
        .find_map(|marker| {
            let start = url.find(marker)? + marker.len();
            id_segment(&url[start..])
        })
        .ok_or(YoutubeIdError::NotFound)?;

    if is_valid_youtube_id(&id) {
        Ok(id)
    } else {
        Err(YoutubeIdError::InvalidId(id))
    }
}

/// Canonical watch URL for a video ID.
pub fn youtube_watch_url(id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", id)
}

/// Check the ID shape: 11 characters of `[A-Za-z0-9_-]`.
pub fn is_valid_youtube_id(id: &str) -> bool {
    id.len() == YOUTUBE_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn id_segment(rest: &str) -> Option<String> {
    let end = rest
        .find(|c: char| matches!(c, '&' | '#' | '?' | '/'))
        .unwrap_or(rest.len());
    let segment = rest[..end].trim();
    (!segment.is_empty()).then(|| segment.to_string())
}
