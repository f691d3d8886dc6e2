//! # foosbot
//!
//! A Slack slash-command bot that gathers four players for a
//! table-football match and splits them into two teams.
//!
//! This crate wires the layers together behind an HTTP server:
//! signature check → form parsing → game transition → JSON reply.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use foosbot::prelude::*;
//!
//! # async fn start() -> Result<(), FoosbotError> {
//! let config = ServerConfig::from_env()?;
//! let server = FoosbotServer::builder()
//!     .config(&config)
//!     .build(config.verifier())
//!     .await?;
//! server.run().await
//! # }
//! ```

mod config;
mod error;
mod handler;
mod server;

pub use config::{ConfigError, ServerConfig};
pub use error::FoosbotError;
pub use server::{FoosbotServer, FoosbotServerBuilder};

/// Everything needed to configure and run a server.
pub mod prelude {
    pub use crate::{ConfigError, FoosbotError, FoosbotServer, FoosbotServerBuilder, ServerConfig};
    pub use foosbot_protocol::{
        Command, CommandRequest, Renderer, Reply, SlackMessage,
        SlackRenderer, UserId,
    };
    pub use foosbot_room::{GameCoordinator, GameRules, RulesError};
    pub use foosbot_session::{
        sign, AuthError, Authenticator, SignatureVerifier, VerifierConfig,
        SIGNATURE_HEADER, TIMESTAMP_HEADER,
    };
}
