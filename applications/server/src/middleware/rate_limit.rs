/// Sliding-window rate limiting middleware
///
/// In-process, keyed by viewer id with a client-IP fallback, optionally
/// scoped to the request path so per-playlist limiters stay independent.
/// State is per limiter instance; there is no cross-process coordination,
/// which is acceptable for a single-instance deployment.
use crate::error::ServerError;
use crate::middleware::AuthenticatedViewer;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Sliding time window over request timestamps, one log per key
#[derive(Clone)]
pub struct RateLimiter {
    window: Duration,
    max: usize,
    scope_by_path: bool,
    message: &'static str,
    log: Arc<Mutex<HashMap<String, VecDeque<Instant>>>>,
}

impl RateLimiter {
    /// Limiter keyed by viewer alone
    pub fn new(window: Duration, max: usize, message: &'static str) -> Self {
        Self {
            window,
            max,
            scope_by_path: false,
            message,
            log: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Limiter keyed by viewer and request path, so each playlist gets its
    /// own budget
    pub fn scoped_by_path(window: Duration, max: usize, message: &'static str) -> Self {
        Self {
            scope_by_path: true,
            ..Self::new(window, max, message)
        }
    }

    /// Record a hit for `key`; returns seconds to wait when over budget
    fn check(&self, key: &str, now: Instant) -> Result<(), u64> {
        let mut log = self.log.lock().unwrap_or_else(|e| e.into_inner());
        let timestamps = log.entry(key.to_string()).or_default();

        while timestamps
            .front()
            .is_some_and(|t| now.duration_since(*t) > self.window)
        {
            timestamps.pop_front();
        }
        timestamps.push_back(now);

        if timestamps.len() > self.max {
            let oldest = timestamps[0];
            let retry_after = self
                .window
                .saturating_sub(now.duration_since(oldest))
                .as_secs()
                .max(1);
            return Err(retry_after);
        }

        Ok(())
    }

    fn key_for(&self, request: &Request) -> String {
        let viewer_key = request
            .extensions()
            .get::<AuthenticatedViewer>()
            .map(|auth| format!("user:{}", auth.viewer().user_id))
            .unwrap_or_else(|| format!("ip:{}", client_ip(request)));

        if self.scope_by_path {
            format!("{}|{}", request.uri().path(), viewer_key)
        } else {
            viewer_key
        }
    }
}

fn client_ip(request: &Request) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware entry point; layer after authentication so the viewer key is
/// available
pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let key = limiter.key_for(&request);

    if let Err(retry_after) = limiter.check(&key, Instant::now()) {
        tracing::warn!(key = %key, "Rate limit exceeded");
        return Err(ServerError::RateLimited {
            message: limiter.message.to_string(),
            retry_after,
        });
    }

    Ok(next.run(request).await)
}
