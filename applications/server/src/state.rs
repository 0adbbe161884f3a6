/// Shared application state
use crate::config::CommunitySettings;
use crate::services::{AuthService, Sanitizer};
use mixtape_storage::Database;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub auth_service: Arc<AuthService>,
    pub sanitizer: Arc<Sanitizer>,
    pub community: CommunitySettings,
}

impl AppState {
    pub fn new(
        db: Arc<Database>,
        auth_service: Arc<AuthService>,
        sanitizer: Arc<Sanitizer>,
        community: CommunitySettings,
    ) -> Self {
        Self {
            db,
            auth_service,
            sanitizer,
            community,
        }
    }
}
