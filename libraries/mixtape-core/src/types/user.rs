/// User and viewer identity types
use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display name shared by every guest session
pub const GUEST_USERNAME: &str = "guest";

/// Registered user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Email address, the durable identity key
    pub email: String,

    /// Public display name, unique across accounts
    pub username: String,

    /// Bcrypt password hash
    pub password_hash: String,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user account
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::generate(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            username: username.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }
}

/// The identity making a request, distinct from a playlist's owner.
///
/// A guest is a shared pseudo-identity: it may read published content but
/// never create, update, delete, rate, or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    /// User id of the account behind this viewer
    pub user_id: UserId,

    /// Email address; empty for guests
    pub email: String,

    /// Display name
    pub username: String,

    /// Whether this viewer is the shared guest identity
    pub is_guest: bool,
}

impl Viewer {
    /// Viewer for a registered user
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
            is_guest: false,
        }
    }

    /// The shared guest viewer
    pub fn guest() -> Self {
        Self {
            user_id: UserId::new("guest"),
            email: String::new(),
            username: GUEST_USERNAME.to_string(),
            is_guest: true,
        }
    }
}
