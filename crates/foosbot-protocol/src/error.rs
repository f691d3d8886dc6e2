//! Error types for the protocol layer.
//!
//! Each crate in foosbot defines its own error enum. When you see a
//! `ProtocolError`, you know the problem is in the shape of the request
//! or the reply, not in the signature or the game state.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The form body is missing a required field or is not valid
    /// `application/x-www-form-urlencoded` data.
    ///
    /// This is a request-level rejection: the dispatcher never sees it.
    #[error("malformed command request: {0}")]
    Parse(String),

    /// Serializing the reply to JSON failed.
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),
}

impl From<serde_urlencoded::de::Error> for ProtocolError {
    fn from(err: serde_urlencoded::de::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
