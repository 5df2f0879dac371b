//! Identity page: the pub's feed id and its QR code.

use maud::{Markup, html};

use super::components::{copy_field, page_shell, qr_svg};
use crate::state::Identity;

/// Render the identity page.
pub fn render(identity: &Identity) -> Markup {
    let body = html! {
        h1 { "Scuttlebutt pub" }
        p class="lead" { "Scan the code to follow this pub from your app." }
        (qr_svg(&identity.code, "Pub identity QR code"))
        (copy_field(&identity.id))
        a class="button" href="/invited" { "Get an invitation" }
    };

    page_shell(
        "Scuttlebutt pub",
        "Identity and invitations for this Scuttlebutt pub.",
        body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::ScannableCode;

    fn identity(id: &str) -> Identity {
        Identity {
            id: id.to_string(),
            code: ScannableCode::render(id).unwrap(),
        }
    }

    #[test]
    fn render_contains_id_and_code() {
        let identity = identity("@abc123=.ed25519");
        let html = render(&identity).into_string();
        assert!(html.contains("@abc123=.ed25519"));
        assert!(html.contains(&identity.code.path));
        assert!(html.contains(&format!("0 0 {0} {0}", identity.code.size)));
    }

    #[test]
    fn render_links_to_invitation() {
        let html = render(&identity("@abc123=.ed25519")).into_string();
        assert!(html.contains(r#"href="/invited""#));
    }
}
