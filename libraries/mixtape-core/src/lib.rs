//! Mixtape Core
//!
//! Platform-agnostic domain types, invariants, and storage traits for the
//! Mixtape playlist-sharing service.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Playlist`, `Song`, `Comment`, `User`, `Viewer`
//! - **Visibility & Rating Rules**: publish lifecycle, reaction toggles,
//!   listen-once tracking, as methods on `Playlist`
//! - **Storage Traits**: `PlaylistStore`, `UserStore`
//! - **Error Handling**: unified `MixtapeError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use mixtape_core::types::{Playlist, Song};
//!
//! let songs = vec![Song::new("Africa", "Toto", "FTQbiNvZqaY")];
//! let mut playlist = Playlist::new("Road Trip", "alice@example.com", "alice", songs);
//!
//! playlist.publish(1_700_000_000_000);
//! playlist.toggle_like("bob@example.com");
//! assert_eq!(playlist.ratings.likes, 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{MixtapeError, Result};
pub use storage::{resolve_unique_name, PlaylistStore, UserStore};

// Export all types
pub use types::{
    // Playlist and friends
    sort_playlists, Playlist, PublishState, Ratings, SortKey, DRAFT_SENTINEL,
    // Song
    Song,
    // Comment
    Comment,
    // Identity
    User, Viewer, GUEST_USERNAME,
    // Ids
    CommentId, PlaylistId, UserId,
};
