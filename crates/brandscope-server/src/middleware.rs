use std::{
    collections::HashSet,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::ApiError;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id for one request; echoed in `x-request-id` and response `meta`.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Bearer tokens accepted on the report routes.
#[derive(Debug, Clone)]
pub struct AuthState {
    api_keys: Arc<HashSet<String>>,
    pub enabled: bool,
}

impl AuthState {
    /// Reads `BRANDSCOPE_API_KEYS`. See [`AuthState::from_keys`].
    pub fn from_env(is_development: bool) -> anyhow::Result<Self> {
        let raw = std::env::var("BRANDSCOPE_API_KEYS").unwrap_or_default();
        Self::from_keys(&raw, is_development)
    }

    /// Parses a comma-separated token list.
    ///
    /// An empty list turns auth off in development and is a startup error
    /// anywhere else.
    pub fn from_keys(raw: &str, is_development: bool) -> anyhow::Result<Self> {
        let keys: HashSet<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect();

        match (keys.is_empty(), is_development) {
            (false, _) => Ok(Self {
                api_keys: Arc::new(keys),
                enabled: true,
            }),
            (true, true) => {
                tracing::warn!("no BRANDSCOPE_API_KEYS; report routes are open in development");
                Ok(Self {
                    api_keys: Arc::new(HashSet::new()),
                    enabled: false,
                })
            }
            (true, false) => anyhow::bail!(
                "BRANDSCOPE_API_KEYS must list at least one bearer token outside development"
            ),
        }
    }

    fn allows(&self, token: &str) -> bool {
        self.api_keys.contains(token)
    }
}

/// Counter for one fixed window. The window restarts on the first request
/// after it expires; there is no carry-over between windows.
#[derive(Debug)]
struct FixedWindow {
    opened_at: Instant,
    admitted: usize,
}

impl FixedWindow {
    fn new(now: Instant) -> Self {
        Self {
            opened_at: now,
            admitted: 0,
        }
    }

    /// Counts the request and reports whether it fits under `limit`.
    fn admit(&mut self, now: Instant, limit: usize, length: Duration) -> bool {
        if now.duration_since(self.opened_at) >= length {
            *self = Self::new(now);
        }
        if self.admitted >= limit {
            return false;
        }
        self.admitted += 1;
        true
    }
}

/// Process-wide request budget shared by every protected route.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    current: Arc<Mutex<FixedWindow>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            current: Arc::new(Mutex::new(FixedWindow::new(Instant::now()))),
        }
    }

    async fn admit(&self) -> bool {
        self.current
            .lock()
            .await
            .admit(Instant::now(), self.max_requests, self.window)
    }
}

fn request_id_of(req: &Request) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default()
}

/// Reuses the caller's `x-request-id` or mints a UUID v4, then stores it as
/// a [`RequestId`] extension and mirrors it on the response.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));
    let mut res = next.run(req).await;
    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, val);
    }
    res
}

/// Rejects report requests without a listed bearer token (401).
pub async fn require_bearer_auth(
    State(auth): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    if !auth.enabled {
        return next.run(req).await;
    }

    match bearer_token(req.headers().get(AUTHORIZATION)) {
        Some(token) if auth.allows(token) => next.run(req).await,
        _ => ApiError::new(
            request_id_of(&req),
            "unauthorized",
            "missing or invalid bearer token",
        )
        .into_response(),
    }
}

/// Rejects requests over the shared budget (429).
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    if rate_limit.admit().await {
        return next.run(req).await;
    }
    tracing::warn!(
        path = %req.uri().path(),
        limit = rate_limit.max_requests,
        "rate limit exceeded"
    );
    ApiError::new(request_id_of(&req), "rate_limited", "rate limit exceeded").into_response()
}

fn bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    let (scheme, token) = value?.to_str().ok()?.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
