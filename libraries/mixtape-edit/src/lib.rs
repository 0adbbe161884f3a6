//! Mixtape - Playlist Editing
//!
//! Client-side editing model for Mixtape playlists:
//! - The four reversible song edits (create / remove / move / update)
//! - A linear undo/redo transaction stack
//! - An edit session that owns the in-memory playlist and flushes every
//!   mutation upstream through a FIFO persistence queue
//!
//! # Architecture
//!
//! `mixtape-edit` is transport-agnostic: persistence goes through the
//! [`PlaylistWriter`] trait, so the same session drives an HTTP client or an
//! in-process store equally well. Edits are synchronous against the
//! in-memory playlist; persistence is asynchronous but serialized, so
//! snapshots for the playlist under edit never interleave.
//!
//! # Example
//!
//! ```rust,no_run
//! use mixtape_core::types::{Playlist, Song};
//! use mixtape_edit::{EditSession, PlaylistWriter};
//! use std::sync::Arc;
//!
//! # async fn example(writer: Arc<dyn PlaylistWriter>) {
//! let playlist = Playlist::new("Road Trip", "alice@example.com", "alice", Vec::new());
//! let mut session = EditSession::open(playlist, writer);
//!
//! session.add_new_song();
//! session.add_new_song();
//! session.move_song(0, 1).unwrap();
//!
//! session.undo();
//! assert!(session.can_redo());
//!
//! let playlist = session.close().await;
//! assert_eq!(playlist.songs.len(), 2);
//! # }
//! ```

mod error;
mod persist;
mod session;
mod stack;
mod transaction;

// Public exports
pub use error::{EditError, Result};
pub use persist::PlaylistWriter;
pub use session::EditSession;
pub use stack::TransactionStack;
pub use transaction::SongTransaction;
