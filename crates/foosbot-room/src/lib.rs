//! Game rules for foosbot.
//!
//! Everything that decides *what happens* when a verified command
//! arrives lives here. The session crate guards the state; this crate
//! computes each transition.
//!
//! # Key types
//!
//! - [`dispatch`]: the state machine: (session, command) → (session, reply)
//! - [`assign`] / [`Teams`]: split a full roster into two teams
//! - [`GameCoordinator`]: runs `dispatch` atomically against a
//!   [`SessionStore`](foosbot_session::SessionStore)
//! - [`GameRules`]: team size and the "missing player" glyphs

mod config;
mod coordinator;
mod dispatch;
mod error;
mod teams;

pub use config::{GameRules, EXPLAIN_MESSAGE};
pub use coordinator::GameCoordinator;
pub use dispatch::dispatch;
pub use error::{PreconditionError, RulesError};
pub use teams::{assign, Teams};
