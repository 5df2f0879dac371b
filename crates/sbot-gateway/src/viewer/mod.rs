//! Message viewer sub-application.
//!
//! A self-contained router that renders messages from the node. It is
//! mounted under a prefix (`/view/` by default) and builds its links relative
//! to that prefix.
//!
//! ## Routes
//!
//! - `GET {base}{key}` - Message page
//! - `GET {base}{key}.json` - Raw message JSON
//!
//! Only this router answers cross-origin reads; the invitation routes stay
//! same-origin.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{Method, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use sbot_gateway_core::{Error, Node, is_message_key, metrics};
use tower_http::cors::{Any, CorsLayer};

use crate::error::GatewayError;
use crate::render;
use crate::routes::html_response;

/// Options for mounting the viewer.
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    /// Prefix the viewer is mounted under, with leading and trailing slash.
    pub base: String,
}

#[derive(Clone)]
struct ViewerState {
    node: Arc<dyn Node>,
    base: Arc<str>,
}

/// Build the viewer router. Mount it with `Router::nest` at the base prefix
/// (without its trailing slash).
pub fn router(node: Arc<dyn Node>, options: ViewerOptions) -> Router {
    Router::new()
        .route("/{*key}", get(view_message))
        .with_state(ViewerState {
            node,
            base: options.base.into(),
        })
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET]),
        )
}

/// Render a message, or its raw JSON when the key carries a `.json` suffix.
async fn view_message(
    State(viewer): State<ViewerState>,
    Path(key): Path<String>,
) -> Result<Response, GatewayError> {
    let key = key.trim();

    if let Some(bare) = key.strip_suffix(".json") {
        let message = fetch(&viewer, bare).await?;
        let body = serde_json::to_string_pretty(&message)
            .map_err(|e| GatewayError::Internal(e.into()))?;
        return Ok((
            [
                (header::CONTENT_TYPE, "application/json; charset=utf-8"),
                (header::CACHE_CONTROL, "public, max-age=3600"),
            ],
            body,
        )
            .into_response());
    }

    let message = fetch(&viewer, key).await?;
    let html = render::message::render(key, &message, &viewer.base).into_string();

    // Messages are immutable once published.
    Ok(html_response(html, "public, max-age=3600", true))
}

async fn fetch(viewer: &ViewerState, key: &str) -> Result<serde_json::Value, GatewayError> {
    if !is_message_key(key) {
        metrics::increment_outcome(metrics::VIEWER_REQUESTS, "not_found");
        return Err(GatewayError::NotFound(key.to_string()));
    }

    tracing::debug!(key = %key, "fetching message");
    match viewer.node.message(key).await {
        Ok(message) => {
            metrics::increment_outcome(metrics::VIEWER_REQUESTS, "ok");
            Ok(message)
        }
        Err(Error::NotFound(_)) => {
            metrics::increment_outcome(metrics::VIEWER_REQUESTS, "not_found");
            Err(GatewayError::NotFound(key.to_string()))
        }
        Err(err) => {
            metrics::increment_outcome(metrics::VIEWER_REQUESTS, "error");
            Err(err.into())
        }
    }
}
