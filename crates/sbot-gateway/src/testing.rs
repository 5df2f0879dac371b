//! Test doubles shared by the gateway's unit tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use sbot_gateway_core::{Error, Invitation, Node, Result};

use crate::config::{Config, InviteFailurePolicy};
use crate::state::{AppState, FatalHandler};

/// In-memory node with a fixed identity and invitation.
pub struct FakeNode {
    id: String,
    invitation: Option<String>,
    messages: HashMap<String, serde_json::Value>,
    message_failure: bool,
    invite_calls: AtomicUsize,
    message_calls: AtomicUsize,
}

impl FakeNode {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            invitation: Some("invite-xyz".to_string()),
            messages: HashMap::new(),
            message_failure: false,
            invite_calls: AtomicUsize::new(0),
            message_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_invitation(mut self, invitation: &str) -> Self {
        self.invitation = Some(invitation.to_string());
        self
    }

    /// Every invitation request fails with a command error.
    pub fn failing_invites(mut self) -> Self {
        self.invitation = None;
        self
    }

    /// Every message lookup fails with a command error.
    pub fn failing_messages(mut self) -> Self {
        self.message_failure = true;
        self
    }

    pub fn with_message(mut self, key: &str, message: serde_json::Value) -> Self {
        self.messages.insert(key.to_string(), message);
        self
    }

    pub fn invite_calls(&self) -> usize {
        self.invite_calls.load(Ordering::SeqCst)
    }

    pub fn message_calls(&self) -> usize {
        self.message_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Node for FakeNode {
    fn id(&self) -> &str {
        &self.id
    }

    async fn create_invitations(&self, count: u32) -> Result<Invitation> {
        self.invite_calls.fetch_add(1, Ordering::SeqCst);
        match &self.invitation {
            Some(invitation) => Ok(invitation.clone()),
            None => Err(Error::Command {
                command: format!("invite.create {count}"),
                status: "exit status: 1".to_string(),
                stderr: "server has no public address".to_string(),
            }),
        }
    }

    async fn message(&self, key: &str) -> Result<serde_json::Value> {
        self.message_calls.fetch_add(1, Ordering::SeqCst);
        if self.message_failure {
            return Err(Error::Command {
                command: format!("get {key}"),
                status: "exit status: 1".to_string(),
                stderr: "connection refused".to_string(),
            });
        }
        self.messages
            .get(key)
            .cloned()
            .ok_or_else(|| Error::NotFound(key.to_string()))
    }
}

/// Records every error handed to the fatal handler instead of exiting.
#[derive(Clone, Default)]
pub struct FatalRecorder {
    errors: Arc<Mutex<Vec<String>>>,
}

impl FatalRecorder {
    pub fn handler(&self) -> FatalHandler {
        let errors = self.errors.clone();
        Arc::new(move |err: &Error| errors.lock().unwrap().push(err.to_string()))
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

/// App state around `node` with a recording fatal handler.
pub fn state_with(
    node: Arc<FakeNode>,
    policy: InviteFailurePolicy,
) -> (AppState, FatalRecorder) {
    let config = Config {
        public_dir: "/nonexistent/public".into(),
        invite_failure: policy,
        ..Config::default()
    };
    let recorder = FatalRecorder::default();
    let state = AppState::new(config, node)
        .unwrap()
        .with_fatal_handler(recorder.handler());
    (state, recorder)
}
