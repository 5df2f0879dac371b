//! Invitation issuance as a pull source.

use std::sync::Arc;

use async_trait::async_trait;

use crate::metrics;
use crate::pull::{Signal, Source, take_one};
use crate::{Error, Invitation, Node, Result};

/// Whether the single invitation read has happened yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Pending,
    Settled,
}

/// A pull source that creates one invitation on its first `Next` read.
///
/// Each instance talks to the node at most once. After that read settles
/// (value or error), or after the consumer sends `End` or `Abort`, further
/// `Next` reads produce nothing.
pub struct InviteSource {
    node: Arc<dyn Node>,
    uses: u32,
    state: State,
}

impl InviteSource {
    /// Source for an invitation valid for `uses` redemptions.
    pub fn new(node: Arc<dyn Node>, uses: u32) -> Self {
        Self {
            node,
            uses,
            state: State::Pending,
        }
    }
}

#[async_trait]
impl Source for InviteSource {
    type Item = Invitation;
    type Error = Error;

    async fn read(&mut self, signal: Signal<Error>) -> Option<Result<Invitation>> {
        match signal {
            Signal::End => {
                self.state = State::Settled;
                None
            }
            Signal::Abort(err) => {
                self.state = State::Settled;
                Some(Err(err))
            }
            Signal::Next if self.state == State::Settled => None,
            Signal::Next => {
                self.state = State::Settled;
                Some(self.node.create_invitations(self.uses).await)
            }
        }
    }
}

/// Create a fresh single-use invitation.
///
/// Builds a new [`InviteSource`] for this call alone and takes exactly one
/// item from it.
pub async fn issue_invitation(node: Arc<dyn Node>) -> Result<Invitation> {
    match take_one(InviteSource::new(node, 1)).await {
        Ok(Some(invitation)) => {
            metrics::increment(metrics::INVITES_CREATED, 1);
            tracing::debug!("invitation created");
            Ok(invitation)
        }
        Ok(None) => {
            metrics::increment(metrics::INVITE_FAILURES, 1);
            Err(Error::Empty)
        }
        Err(err) => {
            metrics::increment(metrics::INVITE_FAILURES, 1);
            Err(err)
        }
    }
}
