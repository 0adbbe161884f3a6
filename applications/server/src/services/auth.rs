/// Authentication service - JWT and password handling
use crate::error::{Result, ServerError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use mixtape_core::{UserId, Viewer, GUEST_USERNAME};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct AuthService {
    secret: String,
    access_token_expiration: Duration,
    refresh_token_expiration: Duration,
}

/// Token claims carry the full viewer identity so the middleware can
/// reconstruct it without a database round trip.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub is_guest: bool,
    pub exp: i64, // Expiration time
    pub iat: i64, // Issued at
    pub token_type: TokenType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl AuthService {
    pub fn new(secret: String, access_expiration_hours: u64, refresh_expiration_days: u64) -> Self {
        Self {
            secret,
            access_token_expiration: Duration::hours(access_expiration_hours as i64),
            refresh_token_expiration: Duration::days(refresh_expiration_days as i64),
        }
    }

    /// Hash a password using bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(ServerError::from)
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }

    /// Create an access token for `viewer`
    pub fn create_access_token(&self, viewer: &Viewer) -> Result<String> {
        self.create_token(viewer, TokenType::Access, self.access_token_expiration)
    }

    /// Create a refresh token for `viewer`
    pub fn create_refresh_token(&self, viewer: &Viewer) -> Result<String> {
        self.create_token(viewer, TokenType::Refresh, self.refresh_token_expiration)
    }

    /// Verify and decode a token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    /// Verify that a token is an access token and recover the viewer
    pub fn verify_access_token(&self, token: &str) -> Result<Viewer> {
        let claims = self.verify_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(ServerError::Auth("Invalid token type".to_string()));
        }
        Ok(Self::viewer_from_claims(claims))
    }

    /// Verify that a token is a refresh token and recover the viewer
    pub fn verify_refresh_token(&self, token: &str) -> Result<Viewer> {
        let claims = self.verify_token(token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(ServerError::Auth("Invalid token type".to_string()));
        }
        Ok(Self::viewer_from_claims(claims))
    }

    fn viewer_from_claims(claims: Claims) -> Viewer {
        if claims.is_guest {
            // Guest sessions share one fixed pseudo-identity regardless of
            // what an old or tampered token carries.
            Viewer::guest()
        } else {
            Viewer {
                user_id: UserId::new(claims.sub),
                email: claims.email,
                username: claims.username,
                is_guest: false,
            }
        }
    }

    fn create_token(
        &self,
        viewer: &Viewer,
        token_type: TokenType,
        expiration: Duration,
    ) -> Result<String> {
        let now = Utc::now();
        let exp = now + expiration;

        let claims = Claims {
            sub: viewer.user_id.as_str().to_string(),
            email: viewer.email.clone(),
            username: if viewer.is_guest {
                GUEST_USERNAME.to_string()
            } else {
                viewer.username.clone()
            },
            is_guest: viewer.is_guest,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            token_type,
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), &claims, &encoding_key).map_err(ServerError::from)
    }
}
