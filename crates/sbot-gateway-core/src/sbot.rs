//! [`Node`] implementation backed by the `sbot` command-line client.
//!
//! Every call spawns `sbot <method> <args...>` and parses its standard
//! output as JSON, which is how the CLI prints muxrpc results.

use std::path::{Path, PathBuf};
use std::process::Output;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use crate::{Error, Invitation, Node, Result, is_message_key};

/// Reply to `sbot whoami`.
#[derive(Debug, Deserialize)]
struct WhoAmI {
    id: String,
}

/// A Scuttlebutt server reached through its CLI.
#[derive(Debug, Clone)]
pub struct SbotClient {
    bin: PathBuf,
    id: String,
}

impl SbotClient {
    /// Resolve the node's identity with `whoami` and keep it for the
    /// lifetime of the client.
    pub async fn connect(bin: impl Into<PathBuf>) -> Result<Self> {
        let bin = bin.into();
        let stdout = run(&bin, &["whoami"]).await?;
        let id = parse_whoami(&stdout)?;
        tracing::info!(bin = %bin.display(), id = %id, "connected to sbot");
        Ok(Self { bin, id })
    }

    /// Build a client with an already-known identity, without calling the node.
    pub fn with_id(bin: impl Into<PathBuf>, id: impl Into<String>) -> Self {
        Self {
            bin: bin.into(),
            id: id.into(),
        }
    }
}

#[async_trait]
impl Node for SbotClient {
    fn id(&self) -> &str {
        &self.id
    }

    async fn create_invitations(&self, count: u32) -> Result<Invitation> {
        let count = count.to_string();
        let stdout = run(&self.bin, &["invite.create", &count]).await?;
        parse_invitation(&stdout)
    }

    async fn message(&self, key: &str) -> Result<serde_json::Value> {
        if !is_message_key(key) {
            return Err(Error::NotFound(key.to_string()));
        }
        let stdout = run(&self.bin, &["get", key]).await?;
        Ok(serde_json::from_slice(&stdout)?)
    }
}

/// Run the CLI and return its standard output, mapping failures to [`Error`].
async fn run(bin: &Path, args: &[&str]) -> Result<Vec<u8>> {
    tracing::debug!(bin = %bin.display(), args = ?args, "running sbot command");
    let output = Command::new(bin).args(args).output().await?;
    check_output(args, output)
}

fn check_output(args: &[&str], output: Output) -> Result<Vec<u8>> {
    if output.status.success() {
        return Ok(output.stdout);
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.contains("NotFound") {
        let key = args.get(1).copied().unwrap_or_default();
        return Err(Error::NotFound(key.to_string()));
    }

    Err(Error::Command {
        command: args.join(" "),
        status: output.status.to_string(),
        stderr,
    })
}

fn parse_whoami(stdout: &[u8]) -> Result<String> {
    let reply: WhoAmI = serde_json::from_slice(stdout)?;
    Ok(reply.id)
}

/// `invite.create` prints the invitation as a JSON string literal.
fn parse_invitation(stdout: &[u8]) -> Result<Invitation> {
    Ok(serde_json::from_slice(stdout)?)
}
