//! Request authentication and session state for foosbot.
//!
//! This crate owns the two things every command touches before any game
//! rule runs:
//!
//! 1. **Authentication**: proving a request came from the chat
//!    platform ([`Authenticator`] trait, [`SignatureVerifier`])
//! 2. **Session state**: the one game being collected, its state and
//!    roster ([`Session`]), behind a lock ([`SessionStore`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Room Layer (above)  ← runs transitions inside SessionStore::with_session
//!     ↕
//! Session Layer (this crate)  ← verifies requests, guards the session
//!     ↕
//! Protocol Layer (below)  ← provides UserId
//! ```

mod auth;
mod error;
mod session;
mod store;

pub use auth::{
    check_freshness, sign, verify, Authenticator, SignatureVerifier,
    VerifierConfig, SIGNATURE_HEADER, SIGNATURE_VERSION, TIMESTAMP_HEADER,
};
pub use error::AuthError;
pub use session::{FairnessScore, Session, SessionState};
pub use store::SessionStore;
