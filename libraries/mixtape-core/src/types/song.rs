/// Song domain type
use serde::{Deserialize, Serialize};

/// Default title for a freshly added song
pub const DEFAULT_SONG_TITLE: &str = "Untitled";

/// Default artist for a freshly added song
pub const DEFAULT_SONG_ARTIST: &str = "?";

/// Default video reference for a freshly added song
pub const DEFAULT_SONG_VIDEO_ID: &str = "dQw4w9WgXcQ";

/// A single entry in a playlist.
///
/// Songs carry no identity of their own; they are addressed by positional
/// index within their playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Song title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// External video reference
    #[serde(rename = "youTubeId")]
    pub you_tube_id: String,
}

impl Song {
    /// Create a new song
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        you_tube_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            you_tube_id: you_tube_id.into(),
        }
    }

    /// The placeholder song appended by "add new song"
    pub fn placeholder() -> Self {
        Self::new(DEFAULT_SONG_TITLE, DEFAULT_SONG_ARTIST, DEFAULT_SONG_VIDEO_ID)
    }
}
