//! Unified error type for the foosbot server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use foosbot_protocol::ProtocolError;
use foosbot_room::{PreconditionError, RulesError};
use foosbot_session::AuthError;

use crate::ConfigError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
///
/// As a handler return type it also decides the HTTP status, see
/// [`status`](Self::status).
#[derive(Debug, thiserror::Error)]
pub enum FoosbotError {
    /// The request isn't signed by the platform (or the body couldn't
    /// be read).
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The form body is malformed, or the reply couldn't be encoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A transition hit an internal invariant breach.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// Startup configuration is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The game rules can never complete a game.
    #[error(transparent)]
    Rules(#[from] RulesError),

    /// Binding or serving the listener failed.
    #[error("server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl FoosbotError {
    /// The HTTP status a request failing with this error gets.
    ///
    /// - `401`: authentication failures
    /// - `400`: malformed command forms
    /// - `500`: everything that is our fault, not the caller's
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::Protocol(ProtocolError::Parse(_)) => StatusCode::BAD_REQUEST,
            Self::Protocol(ProtocolError::Encode(_))
            | Self::Precondition(_)
            | Self::Config(_)
            | Self::Rules(_)
            | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for FoosbotError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Auth details stay in the log; the caller only learns it was
        // rejected.
        let body = match &self {
            Self::Auth(e) => {
                tracing::warn!(error = %e, "rejected unauthenticated request");
                "unauthorized".to_string()
            }
            Self::Protocol(ProtocolError::Parse(_)) => {
                tracing::warn!(error = %self, "rejected malformed request");
                self.to_string()
            }
            _ => {
                tracing::error!(error = %self, "request failed");
                "internal error".to_string()
            }
        };
        (status, body).into_response()
    }
}
