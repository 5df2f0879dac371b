//! The node abstraction the gateway sits in front of.

use async_trait::async_trait;

use crate::Result;

/// A single-use pairing token issued by the node.
pub type Invitation = String;

/// A Scuttlebutt server the gateway publishes and issues invitations for.
///
/// Implementations must be cheap to share behind an `Arc`; every request
/// handler holds a clone.
#[async_trait]
pub trait Node: Send + Sync {
    /// The node's own feed id (e.g. `@<base64>.ed25519`). Constant for the
    /// lifetime of the process.
    fn id(&self) -> &str;

    /// Create invitations valid for `count` uses.
    async fn create_invitations(&self, count: u32) -> Result<Invitation>;

    /// Fetch a message by key, as the node's JSON representation.
    async fn message(&self, key: &str) -> Result<serde_json::Value>;
}

/// Whether `key` is a message sigil: `%<base64>.sha256`.
///
/// Keys are handed to the node as command arguments, so anything else
/// (notably a leading `-`) must be rejected before it gets there.
pub fn is_message_key(key: &str) -> bool {
    key.strip_prefix('%')
        .and_then(|rest| rest.strip_suffix(".sha256"))
        .is_some_and(|body| {
            !body.is_empty()
                && body
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_key_accepts_sigil() {
        assert!(is_message_key("%Zm9vYmFy+/9=.sha256"));
        assert!(is_message_key("%abc=.sha256"));
    }

    #[test]
    fn test_message_key_rejects_options() {
        assert!(!is_message_key("--host=evil.example"));
        assert!(!is_message_key("-x"));
        assert!(!is_message_key("%--host=evil.sha256"));
    }

    #[test]
    fn test_message_key_rejects_other_sigils() {
        assert!(!is_message_key("@abc123=.ed25519"));
        assert!(!is_message_key("&blob=.sha256"));
        assert!(!is_message_key("%.sha256"));
        assert!(!is_message_key("%abc=.sha256 extra"));
    }
}
