//! sbot-gateway - HTTP front door for a Scuttlebutt pub.
//!
//! Publishes the pub's identity as a QR code, issues single-use invitations
//! on demand (as an HTML page with a QR code, or as JSON), and mounts a
//! small message viewer.
//!
//! # Architecture
//!
//! - **Node**: [`sbot_gateway_core::Node`], usually an
//!   [`SbotClient`](sbot_gateway_core::SbotClient) driving the `sbot` CLI
//! - **Issue**: every invite request builds its own
//!   [`InviteSource`](sbot_gateway_core::InviteSource) and takes exactly one
//!   invitation from it
//! - **Render**: maud templates with inline SVG QR codes
//!
//! # Routes
//!
//! ```text
//! GET /               identity page
//! GET /invited        fresh invitation (HTML)
//! GET /invited/json   fresh invitation (JSON)
//! GET /view/{key}     message viewer
//! ```

pub mod config;
pub mod error;
pub mod qr;
pub mod render;
pub mod routes;
pub mod state;
pub mod viewer;

#[cfg(test)]
mod testing;

use axum::Router;

pub use config::{Config, InviteFailurePolicy};
pub use error::GatewayError;
pub use routes::router;
pub use state::AppState;

/// Build the full gateway: routes plus the viewer mounted at the configured
/// base.
pub fn app(state: AppState) -> Router {
    let viewer = viewer::router(
        state.node.clone(),
        viewer::ViewerOptions {
            base: state.config.viewer_base.clone(),
        },
    );
    router(state, viewer)
}
