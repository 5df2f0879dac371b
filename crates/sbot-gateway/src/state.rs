//! Application state shared across all request handlers.

use std::sync::Arc;

use sbot_gateway_core::Node;

use crate::config::Config;
use crate::error::GatewayError;
use crate::qr::ScannableCode;

/// Called once when invitation creation fails under
/// [`InviteFailurePolicy::Exit`](crate::config::InviteFailurePolicy::Exit).
pub type FatalHandler = Arc<dyn Fn(&sbot_gateway_core::Error) + Send + Sync>;

/// The node's identity and its QR code, computed once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub code: ScannableCode,
}

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The node invitations are issued from.
    pub node: Arc<dyn Node>,

    /// Application configuration.
    pub config: Arc<Config>,

    /// Precomputed identity code; never recomputed.
    pub identity: Arc<Identity>,

    /// Process-level reporter for invitation failures.
    pub fatal: FatalHandler,
}

impl AppState {
    /// Create the application state, rendering the identity QR code.
    pub fn new(config: Config, node: Arc<dyn Node>) -> Result<Self, GatewayError> {
        let id = node.id().to_string();
        let code = ScannableCode::render(&id)?;

        tracing::info!(
            id = %id,
            qr_size = code.size,
            invite_failure = ?config.invite_failure,
            "application state initialized"
        );

        Ok(Self {
            node,
            config: Arc::new(config),
            identity: Arc::new(Identity { id, code }),
            fatal: Arc::new(report_and_exit),
        })
    }

    /// Replace the fatal handler (used by tests to observe failures).
    pub fn with_fatal_handler(mut self, handler: FatalHandler) -> Self {
        self.fatal = handler;
        self
    }
}

/// Log the failure and terminate the process.
fn report_and_exit(err: &sbot_gateway_core::Error) {
    tracing::error!(error = %err, "invitation creation failed, exiting");
    std::process::exit(1);
}
