/// Authentication middleware
use crate::{error::ServerError, services::AuthService};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};
use mixtape_core::Viewer;
use std::sync::Arc;

/// Extension type to store the authenticated viewer in the request.
/// Can be used as an extractor in handlers. Guests authenticate like any
/// other viewer; handlers reject them where mutation is involved.
#[derive(Debug, Clone)]
pub struct AuthenticatedViewer(pub Viewer);

impl AuthenticatedViewer {
    pub fn viewer(&self) -> &Viewer {
        &self.0
    }
}

/// Middleware that extracts and validates JWT from Authorization header
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // Check Bearer prefix
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // Verify token
    let viewer = auth_service.verify_access_token(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        StatusCode::UNAUTHORIZED
    })?;

    // Insert viewer into request extensions
    request.extensions_mut().insert(AuthenticatedViewer(viewer));

    Ok(next.run(request).await)
}

/// Implement FromRequestParts so AuthenticatedViewer can be used as an extractor
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedViewer
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedViewer>()
            .cloned()
            .ok_or_else(|| ServerError::Auth("Not authenticated".to_string()))
    }
}
