/// API route modules
pub mod auth;
pub mod comments;
pub mod health;
pub mod playlists;
pub mod reactions;
