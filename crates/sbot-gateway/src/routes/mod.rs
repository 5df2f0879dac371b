//! Route definitions for the gateway.
//!
//! ## Routes
//!
//! - `GET /` - Identity page
//! - `GET /invited` - Fresh invitation (HTML)
//! - `GET /invited/json` - Fresh invitation (JSON)
//! - `GET /health` - Health check (JSON)
//! - `GET /robots.txt` - Crawler instructions
//! - `GET {viewer_base}*` - Message viewer
//! - anything else - Static files from the public directory

mod health;
mod home;
mod invited;

use axum::Router;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tower_http::services::ServeDir;

use crate::render;
use crate::state::AppState;

pub use invited::InvitationResponse;

/// Build the gateway router with `viewer` mounted at the configured base.
pub fn router(state: AppState, viewer: Router) -> Router {
    let mount = state.config.viewer_mount().to_string();
    let public_dir = state.config.public_dir.clone();

    Router::new()
        .route("/", get(home::identity_page))
        .route("/invited", get(invited::invited_page))
        .route("/invited/json", get(invited::invited_json))
        .route("/health", get(health::health_check))
        .route("/robots.txt", get(robots_txt))
        .with_state(state)
        .nest(&mount, viewer)
        .fallback_service(ServeDir::new(public_dir))
}

/// Serve robots.txt. Invitation pages must never be fetched by crawlers:
/// every fetch spends an invitation.
async fn robots_txt() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "User-agent: *\nDisallow: /invited\n",
    )
}

/// Build an HTML response with security and cache headers.
///
/// With `etag` set, an xxh3 hash of the body is sent as a strong `ETag`.
pub(crate) fn html_response(html: String, cache_control: &'static str, etag: bool) -> Response {
    let mut headers = HeaderMap::new();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );

    // Security headers
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(render::components::CSP_HEADER),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(cache_control));

    if etag {
        let hash = xxhash_rust::xxh3::xxh3_64(html.as_bytes());
        let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));
        if let Ok(val) = HeaderValue::from_str(&etag) {
            headers.insert(header::ETAG, val);
        }
    }

    (StatusCode::OK, headers, html).into_response()
}
