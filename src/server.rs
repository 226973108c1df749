//! HTTP surface for translation lookups.
//!
//! ## Endpoints
//!
//! - `GET /translate?q=<term>&limit=<n>`: ranked Japanese translations
//! - `GET /healthz`: liveness plus the enabled source list
//!
//! Individual source failures never reach this layer; a lookup where every
//! source fails is still `200` with an empty result.

use axum::Router;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

use kotoba_translate::{MAX_LIMIT, SourceId, TranslateConfig};

use crate::cache::{CacheKey, LookupCache};
use crate::config::AppConfig;
use crate::error::{AppError, Result};

/// Limit used when the query omits it or it is not a number.
pub const DEFAULT_LIMIT: usize = 5;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Query string of `GET /translate`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslateParams {
    /// English headword.
    #[serde(default)]
    pub q: Option<String>,
    /// Requested result count, kept raw so non-numeric input falls back
    /// to the default instead of failing extraction.
    #[serde(default)]
    pub limit: Option<String>,
}

/// Body of every `GET /translate` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateResponse {
    /// Whether the lookup completed.
    pub ok: bool,
    /// Ranked translations, present when `ok`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Vec<String>>,
    /// Machine-readable error code, present when not `ok`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranslateResponse {
    fn success(result: Vec<String>) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    fn failure(code: &str) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(code.to_owned()),
        }
    }
}

/// Body of `GET /healthz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `true` while the server is up.
    pub ok: bool,
    /// Sources each lookup queries.
    pub sources: Vec<SourceId>,
}

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// Shared state for axum handlers.
#[derive(Clone)]
struct AppState {
    translate: Arc<TranslateConfig>,
    cache: LookupCache,
}

// ---------------------------------------------------------------------------
// TranslateServer
// ---------------------------------------------------------------------------

/// Translation HTTP server running in a background task.
pub struct TranslateServer {
    /// The address the server is listening on.
    addr: SocketAddr,
    /// Handle to the background server task.
    handle: JoinHandle<()>,
}

impl TranslateServer {
    /// Start the server.
    ///
    /// Binds to `{server.host}:{server.port}` (use port `0` for auto-assign)
    /// and begins serving in a background tokio task.
    ///
    /// # Errors
    ///
    /// Returns an error if the translate config is invalid or the TCP
    /// listener cannot bind.
    pub async fn start(config: &AppConfig) -> Result<Self> {
        config.translate.validate()?;
        let app = router(config);

        let bind_addr = config.bind_addr();
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| AppError::Server(format!("bind to {bind_addr} failed: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| AppError::Server(format!("failed to get local addr: {e}")))?;

        info!(
            sources = ?config.translate.sources,
            cache_ttl_seconds = config.server.cache_ttl_seconds,
            "translate server listening on http://{addr}"
        );

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("translate server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for TranslateServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Build the router for `config`.
pub fn router(config: &AppConfig) -> Router {
    let state = AppState {
        translate: Arc::new(config.translate.clone()),
        cache: LookupCache::new(config.server.cache_ttl_seconds),
    };
    Router::new()
        .route("/translate", get(handle_translate))
        .route("/healthz", get(handle_health))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse the raw `limit` parameter.
///
/// Missing, non-numeric and zero values become [`DEFAULT_LIMIT`]; anything
/// else is truncated and clamped into `1..=10`.
pub fn parse_limit(raw: Option<&str>) -> usize {
    let requested = raw
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite() && *n != 0.0);
    match requested {
        Some(n) => n.clamp(1.0, MAX_LIMIT as f64) as usize,
        None => DEFAULT_LIMIT,
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// `GET /translate`: ranked translations for `q`.
async fn handle_translate(
    State(state): State<AppState>,
    query: std::result::Result<Query<TranslateParams>, QueryRejection>,
) -> (StatusCode, Json<TranslateResponse>) {
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable query string");
            return (
                StatusCode::BAD_REQUEST,
                Json(TranslateResponse::failure("missing_query")),
            );
        }
    };
    let term = params.q.as_deref().map(str::trim).unwrap_or_default();
    if term.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(TranslateResponse::failure("missing_query")),
        );
    }
    let limit = parse_limit(params.limit.as_deref());

    let key = CacheKey::new(term, limit);
    if let Some(hit) = state.cache.get(&key).await {
        tracing::debug!(limit, terms = hit.len(), "cache hit");
        return (StatusCode::OK, Json(TranslateResponse::success(hit.texts())));
    }

    // A panic inside the lookup surfaces as a JoinError rather than
    // tearing down the connection.
    let config = Arc::clone(&state.translate);
    let owned_term = term.to_owned();
    let task =
        tokio::spawn(async move { kotoba_translate::lookup(&owned_term, limit, &config).await });

    match task.await {
        Ok(Ok(result)) => {
            tracing::debug!(limit, terms = result.len(), "lookup served");
            let texts = result.texts();
            state.cache.insert(key, result).await;
            (StatusCode::OK, Json(TranslateResponse::success(texts)))
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TranslateResponse::failure("server_error")),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "lookup task aborted");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TranslateResponse::failure("server_error")),
            )
        }
    }
}

/// `GET /healthz`: liveness and enabled sources.
async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        sources: state.translate.sources.clone(),
    })
}
