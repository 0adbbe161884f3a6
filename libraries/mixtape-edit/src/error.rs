/// Edit session error types
use thiserror::Error;

/// Result type alias using `EditError`
pub type Result<T> = std::result::Result<T, EditError>;

/// Errors raised by the playlist edit session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// A song index fell outside the current song sequence
    #[error("Song index {index} out of bounds (playlist has {len} songs)")]
    IndexOutOfBounds { index: usize, len: usize },
}
