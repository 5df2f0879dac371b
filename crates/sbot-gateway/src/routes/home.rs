//! Identity page handler.

use axum::extract::State;
use axum::response::Response;
use sbot_gateway_core::metrics;

use super::html_response;
use crate::render;
use crate::state::AppState;

/// Render the pub's identity with its precomputed QR code.
pub async fn identity_page(State(state): State<AppState>) -> Response {
    metrics::increment(metrics::IDENTITY_VIEWS, 1);
    let html = render::identity::render(&state.identity).into_string();
    html_response(html, "public, max-age=300", true)
}
