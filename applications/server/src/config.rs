/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_community")]
    pub community: CommunitySettings,

    #[serde(default = "default_rate_limit")]
    pub rate_limit: RateLimitSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration_hours")]
    pub jwt_expiration_hours: u64,

    #[serde(default = "default_jwt_refresh_expiration_days")]
    pub jwt_refresh_expiration_days: u64,
}

/// Community interaction policy
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct CommunitySettings {
    /// Whether owners may like/dislike their own published playlists.
    /// The upstream client never offered owners the buttons, so this
    /// defaults to off.
    #[serde(default)]
    pub allow_owner_reactions: bool,
}

/// Sliding-window rate limit settings, per limiter
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct RateLimitSettings {
    /// Playlist create/update/delete and comment writes
    #[serde(default = "default_write_max")]
    pub write_max: usize,

    #[serde(default = "default_write_window_secs")]
    pub write_window_secs: u64,

    /// Like/dislike toggles, scoped per playlist
    #[serde(default = "default_reaction_max")]
    pub reaction_max: usize,

    #[serde(default = "default_reaction_window_secs")]
    pub reaction_window_secs: u64,

    /// Listen registrations, scoped per playlist
    #[serde(default = "default_listen_max")]
    pub listen_max: usize,

    #[serde(default = "default_listen_window_secs")]
    pub listen_window_secs: u64,
}

impl ServerConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        let config_path = PathBuf::from("config.toml");
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        // Override with environment variables (prefixed with MIXTAPE_)
        settings = settings.add_source(
            config::Environment::with_prefix("MIXTAPE")
                .separator("_")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set MIXTAPE_AUTH_JWT_SECRET)".to_string(),
            ));
        }

        if self.rate_limit.write_max == 0
            || self.rate_limit.reaction_max == 0
            || self.rate_limit.listen_max == 0
        {
            return Err(ServerError::Config(
                "Rate limit maximums must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/mixtape.db".to_string()
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        jwt_expiration_hours: default_jwt_expiration_hours(),
        jwt_refresh_expiration_days: default_jwt_refresh_expiration_days(),
    }
}

fn default_jwt_expiration_hours() -> u64 {
    1
}

fn default_jwt_refresh_expiration_days() -> u64 {
    30
}

fn default_community() -> CommunitySettings {
    CommunitySettings {
        allow_owner_reactions: false,
    }
}

fn default_rate_limit() -> RateLimitSettings {
    RateLimitSettings {
        write_max: default_write_max(),
        write_window_secs: default_write_window_secs(),
        reaction_max: default_reaction_max(),
        reaction_window_secs: default_reaction_window_secs(),
        listen_max: default_listen_max(),
        listen_window_secs: default_listen_window_secs(),
    }
}

fn default_write_max() -> usize {
    30
}

fn default_write_window_secs() -> u64 {
    5 * 60
}

fn default_reaction_max() -> usize {
    60
}

fn default_reaction_window_secs() -> u64 {
    60 * 60
}

fn default_listen_max() -> usize {
    20
}

fn default_listen_window_secs() -> u64 {
    30 * 60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
            community: default_community(),
            rate_limit: default_rate_limit(),
        }
    }
}
