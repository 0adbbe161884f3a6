/// Server services
pub mod auth;
pub mod sanitizer;

pub use auth::AuthService;
pub use sanitizer::{SanitizedText, Sanitizer};
