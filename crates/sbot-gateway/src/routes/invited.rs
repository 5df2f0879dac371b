//! Invitation handlers.
//!
//! Each request issues exactly one fresh invitation and hands it to a single
//! renderer: the HTML page or the JSON body.

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use sbot_gateway_core::{Invitation, issue_invitation};
use serde::Serialize;

use super::html_response;
use crate::config::InviteFailurePolicy;
use crate::error::GatewayError;
use crate::render;
use crate::state::AppState;

/// Invitations are single-use; nothing may cache them.
const NO_STORE: &str = "no-store";

/// Body of `GET /invited/json`.
#[derive(Debug, Clone, Serialize)]
pub struct InvitationResponse {
    pub invitation: Invitation,
}

/// `GET /invited`: HTML page with the invitation and its QR code.
pub async fn invited_page(State(state): State<AppState>) -> Result<Response, GatewayError> {
    let invitation = issue(&state).await?;
    let html = render::invited::render(&invitation).into_string();
    Ok(html_response(html, NO_STORE, false))
}

/// `GET /invited/json`: `{"invitation": "..."}`.
pub async fn invited_json(State(state): State<AppState>) -> Response {
    match issue(&state).await {
        Ok(invitation) => (
            [(header::CACHE_CONTROL, NO_STORE)],
            Json(InvitationResponse { invitation }),
        )
            .into_response(),
        Err(err) => (
            err.status(),
            [(header::CACHE_CONTROL, NO_STORE)],
            Json(serde_json::json!({ "error": "invitation unavailable" })),
        )
            .into_response(),
    }
}

/// Issue one invitation, applying the configured failure policy.
///
/// Under [`InviteFailurePolicy::Exit`] the fatal handler runs before this
/// returns; it does not return in production.
async fn issue(state: &AppState) -> Result<Invitation, GatewayError> {
    match issue_invitation(state.node.clone()).await {
        Ok(invitation) => Ok(invitation),
        Err(err) => {
            match state.config.invite_failure {
                InviteFailurePolicy::Exit => (state.fatal)(&err),
                InviteFailurePolicy::Respond => {
                    tracing::error!(error = %err, "invitation creation failed");
                }
            }
            Err(GatewayError::Invitation(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn invitation_response_serializes_compactly() {
        let body = InvitationResponse {
            invitation: "invite-xyz".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"invitation":"invite-xyz"}"#
        );
    }

    #[test]
    fn invitation_error_is_bad_gateway() {
        let err = GatewayError::Invitation(sbot_gateway_core::Error::Empty);
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }
}
