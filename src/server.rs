//! HTTP surface.
//!
//! Two routes:
//!
//! - `GET /crop?src=<url>&focus=left|right&width=700&height=700` — the
//!   service itself.
//! - `GET /health` — liveness probe, answers `{"ok": true}`.
//!
//! Response policy: validation failures are a 400 carrying the specific
//! message; anything that fails after normalization is a 500 with a generic
//! body. The full error is logged, never returned — callers cannot tell a
//! fetch failure from a decode failure, which keeps internal topology out
//! of responses.
//!
//! Successful responses are aggressively cacheable: the parameter-derived
//! ETag plus `Cache-Control: immutable`. A matching `If-None-Match` header
//! short-circuits to 304 before any network access — the tag does not
//! depend on the fetched bytes, so there is nothing to fetch.

use crate::codec::ImageCodec;
use crate::config::ServiceConfig;
use crate::etag::derive_etag;
use crate::fetch::HttpFetcher;
use crate::params::{RawParams, normalize};
use crate::pipeline;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderName, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;

const CACHE_CONTROL_VALUE: &str = "public, max-age=31536000, immutable";

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub fetcher: HttpFetcher,
    pub codec: ImageCodec,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config: Arc::new(config),
            fetcher: HttpFetcher::new(),
            codec: ImageCodec::new(),
        }
    }
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/crop", get(crop))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

async fn crop(
    State(state): State<AppState>,
    Query(raw): Query<RawParams>,
    headers: HeaderMap,
) -> Response {
    let cfg = match normalize(&raw, &state.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response();
        }
    };

    // Conditional requests resolve before the fetch: the tag is a function
    // of the parameters alone.
    let etag = derive_etag(&cfg);
    if if_none_match_hits(&headers, &etag) {
        return (StatusCode::NOT_MODIFIED, cache_headers(&etag)).into_response();
    }

    match pipeline::process(&cfg, &state.config, &state.fetcher, &state.codec).await {
        Ok(result) => {
            tracing::info!(
                url = %cfg.source_url,
                focus = cfg.focus.as_str(),
                bytes = result.bytes.len(),
                "served crop"
            );
            (StatusCode::OK, cache_headers(&result.etag), result.bytes).into_response()
        }
        Err(err) => {
            // Full detail stays in the logs; the body stays generic.
            tracing::error!(url = %cfg.source_url, error = %err, "crop pipeline failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to process image" })),
            )
                .into_response()
        }
    }
}

fn cache_headers(etag: &str) -> [(HeaderName, String); 3] {
    [
        (header::CONTENT_TYPE, "image/jpeg".to_string()),
        (header::CACHE_CONTROL, CACHE_CONTROL_VALUE.to_string()),
        (header::ETAG, etag.to_string()),
    ]
}

fn if_none_match_hits(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == etag)
}
