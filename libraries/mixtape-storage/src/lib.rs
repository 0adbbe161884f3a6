//! Mixtape Storage
//!
//! `SQLite`-backed document store for Mixtape.
//!
//! Playlists are persisted as JSON documents with the queried fields
//! (owner, name, publish state) mirrored into indexed columns; users live
//! in a plain table. The [`Database`] type implements the storage traits
//! from `mixtape-core`.
//!
//! # Example
//!
//! ```rust,no_run
//! use mixtape_storage::Database;
//! use mixtape_core::PlaylistStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new("sqlite://mixtape.db").await?;
//! let published = db.find_published().await?;
//! # Ok(())
//! # }
//! ```

mod database;
mod error;

// Vertical slices
pub mod playlists;
pub mod users;

pub use database::Database;
pub use error::{Result, StorageError};
