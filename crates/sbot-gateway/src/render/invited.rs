//! Invitation page: one freshly created invitation and its QR code.

use maud::{Markup, html};

use super::components::{copy_field, page_shell, qr_svg};
use crate::qr::ScannableCode;

/// Render the invitation page. The QR code is derived from `invitation` here
/// and never reused.
///
/// The invitation is already spent on the node, so a code that cannot be
/// built only drops the QR code from the page.
pub fn render(invitation: &str) -> Markup {
    let code = match ScannableCode::render(invitation) {
        Ok(code) => Some(code),
        Err(e) => {
            tracing::warn!(
                error = %e,
                len = invitation.len(),
                "invitation spent but not encodable as a QR code, showing text only"
            );
            None
        }
    };

    let body = html! {
        h1 { "You're invited" }
        p class="lead" { "This invitation can be used once." }
        @if let Some(code) = &code {
            (qr_svg(code, "Invitation QR code"))
        }
        (copy_field(invitation))
        ol class="steps" {
            li { "Open your Scuttlebutt app." }
            li { "Choose " strong { "Join a pub" } " or " strong { "Redeem invite" } "." }
            li { "Scan the code above, or paste the invitation." }
        }
        a href="/" { "Back to the pub" }
    };

    page_shell(
        "Your invitation",
        "A single-use invitation to this Scuttlebutt pub.",
        body,
    )
}
