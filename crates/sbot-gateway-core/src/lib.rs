//! Core types and primitives for the sbot gateway.
//!
//! This crate provides:
//! - The [`Node`] abstraction over a Scuttlebutt server (identity, invitations, messages)
//! - [`SbotClient`], a `Node` backed by the `sbot` command-line client
//! - Pull-source primitives ([`Source`], [`Take`], [`drain`], [`take_one`])
//! - [`InviteSource`], which exposes invitation creation as a pull source
//! - Prometheus metrics helpers
//! - Shared error types

mod error;
mod invite;
pub mod metrics;
mod node;
pub mod pull;
mod sbot;

pub use error::{Error, Result};
pub use invite::{InviteSource, issue_invitation};
pub use node::{Invitation, Node, is_message_key};
pub use pull::{Signal, Source, Take, drain, take_one};
pub use sbot::SbotClient;
