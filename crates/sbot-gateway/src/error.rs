//! Error types for the gateway.
//!
//! Errors are rendered as simple HTML error pages, since every route except
//! `/invited/json` serves HTML.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, html};

/// Gateway error type.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The requested message does not exist on the node.
    #[error("not found: {0}")]
    NotFound(String),

    /// The node could not create an invitation.
    #[error("invitation unavailable: {0}")]
    Invitation(#[source] sbot_gateway_core::Error),

    /// Any other failure talking to the node.
    #[error("node error: {0}")]
    Node(#[from] sbot_gateway_core::Error),

    /// The QR code could not be built for a value (e.g. too long).
    #[error("could not render QR code: {0}")]
    Code(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl GatewayError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Invitation(_) | Self::Node(_) => StatusCode::BAD_GATEWAY,
            Self::Code(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (title, message) = match &self {
            Self::NotFound(key) => (
                "Not Found",
                format!("This pub has no message with key {key}."),
            ),
            Self::Invitation(_) => (
                "No Invitation",
                "The pub could not create an invitation right now. Please try again later."
                    .to_string(),
            ),
            Self::Node(err) => {
                tracing::error!(error = %err, "node error");
                (
                    "Pub Unavailable",
                    "The pub did not answer. Please try again later.".to_string(),
                )
            }
            Self::Code(err) => {
                tracing::error!(error = %err, "qr rendering error");
                (
                    "Internal Error",
                    "An internal error occurred. Please try again later.".to_string(),
                )
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    "Internal Error",
                    "An internal error occurred. Please try again later.".to_string(),
                )
            }
        };

        let markup = html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (title) }
                    meta name="robots" content="noindex";
                    style { (maud::PreEscaped(crate::render::components::ERROR_CSS)) }
                }
                body {
                    main class="error-page" {
                        h1 { (title) }
                        p { (message) }
                        a href="/" { "Back to the pub" }
                    }
                }
            }
        };

        (status, markup).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command_error() -> sbot_gateway_core::Error {
        sbot_gateway_core::Error::Command {
            command: "invite.create 1".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "boom".to_string(),
        }
    }

    #[test]
    fn error_display_not_found() {
        let err = GatewayError::NotFound("%abc.sha256".to_string());
        assert_eq!(err.to_string(), "not found: %abc.sha256");
    }

    #[test]
    fn error_display_invitation() {
        let err = GatewayError::Invitation(command_error());
        assert_eq!(
            err.to_string(),
            "invitation unavailable: `invite.create 1` failed (exit status: 1): boom"
        );
    }

    #[test]
    fn error_from_core_is_node() {
        let err: GatewayError = command_error().into();
        assert!(matches!(err, GatewayError::Node(_)));
    }

    #[test]
    fn error_into_response_not_found() {
        let response = GatewayError::NotFound("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn error_into_response_invitation() {
        let response = GatewayError::Invitation(command_error()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn error_into_response_internal() {
        let response = GatewayError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
