//! Wire types for foosbot.
//!
//! This crate defines what comes in and what goes out:
//!
//! - **Types** ([`SlashCommand`], [`CommandRequest`], [`Command`],
//!   [`Reply`], [`SlackMessage`]): the inbound form body, the parsed
//!   command handed to the dispatcher, and the reply it produces.
//! - **Rendering** ([`Renderer`] trait, [`SlackRenderer`]): how a
//!   platform-agnostic [`Reply`] becomes the chat platform's message.
//! - **Errors** ([`ProtocolError`]): what can go wrong while parsing
//!   or encoding.
//!
//! # Architecture
//!
//! The protocol layer sits between the HTTP server (raw bytes) and the
//! game layer (session transitions). It knows nothing about signatures
//! or rosters.
//!
//! ```text
//! HTTP (bytes) → Protocol (CommandRequest) → Room (Reply) → Protocol (SlackMessage)
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod error;
mod render;
mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use error::ProtocolError;
pub use render::{Renderer, SlackRenderer};
pub use types::{Attachment, Command, CommandRequest, Reply, SlackMessage, SlashCommand, UserId};
