//! Prometheus metrics helpers for the gateway.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sbot_gateway_core::metrics::{init_metrics, start_metrics_server};
//!
//! let handle = init_metrics()?;
//! start_metrics_server(9091, handle).await?;
//! ```
//!
//! Metric names are prefixed with `gateway_` and suffixed with their unit
//! (`_total` for counters).

use std::net::SocketAddr;

use axum::{Router, routing::get};
use metrics::describe_counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Invitations handed to a renderer.
pub const INVITES_CREATED: &str = "gateway_invites_created_total";
/// Invitation requests that ended in an error.
pub const INVITE_FAILURES: &str = "gateway_invite_failures_total";
/// Identity page views.
pub const IDENTITY_VIEWS: &str = "gateway_identity_views_total";
/// Requests served by the message viewer.
pub const VIEWER_REQUESTS: &str = "gateway_viewer_requests_total";

/// Install the Prometheus recorder and register metric descriptions.
///
/// Fails if a recorder is already installed.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    register_metrics();
    Ok(handle)
}

/// Like [`init_metrics`] but returns `None` if the recorder is already installed.
#[cfg(test)]
fn try_init_metrics() -> Option<PrometheusHandle> {
    init_metrics().ok()
}

/// Serve `GET /metrics` on `port` from a background task.
///
/// The listener is bound before returning so that a port conflict surfaces
/// to the caller.
pub async fn start_metrics_server(
    port: u16,
    handle: PrometheusHandle,
) -> Result<(), std::io::Error> {
    let app = Router::new().route(
        "/metrics",
        get(move || {
            let handle = handle.clone();
            async move { handle.render() }
        }),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Metrics server listening on http://{}/metrics", addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "metrics server stopped");
        }
    });

    Ok(())
}

fn register_metrics() {
    describe_counter!(INVITES_CREATED, "Invitations created and handed to a renderer");
    describe_counter!(INVITE_FAILURES, "Invitation requests that failed");
    describe_counter!(IDENTITY_VIEWS, "Identity page views");
    describe_counter!(
        VIEWER_REQUESTS,
        "Message viewer requests (label: outcome)"
    );
}

/// Increment a counter.
#[inline]
pub fn increment(name: &'static str, count: u64) {
    metrics::counter!(name).increment(count);
}

/// Increment a counter carrying an `outcome` label.
#[inline]
pub fn increment_outcome(name: &'static str, outcome: &'static str) {
    metrics::counter!(name, "outcome" => outcome).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Once;

    static INIT: Once = Once::new();

    fn ensure_metrics_init() {
        INIT.call_once(|| {
            let _ = try_init_metrics();
        });
    }

    #[test]
    fn test_try_init_metrics_idempotent() {
        let handle1 = try_init_metrics();
        let handle2 = try_init_metrics();
        assert!(handle1.is_none() || handle2.is_none());
    }

    #[test]
    fn test_increment_does_not_panic() {
        ensure_metrics_init();
        increment(INVITES_CREATED, 0);
        increment(INVITES_CREATED, 1);
        increment(INVITE_FAILURES, 100);
    }

    #[test]
    fn test_increment_outcome_does_not_panic() {
        ensure_metrics_init();
        increment_outcome(VIEWER_REQUESTS, "ok");
        increment_outcome(VIEWER_REQUESTS, "not_found");
    }

    #[test]
    fn test_register_metrics_is_repeatable() {
        ensure_metrics_init();
        register_metrics();
        register_metrics();
    }
}
