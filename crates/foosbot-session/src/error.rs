//! Error types for the session layer.

/// Reasons a request fails authentication.
///
/// Any of these rejects the request before the dispatcher runs, so the
/// session is never touched by an unauthenticated request.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The recomputed HMAC doesn't match the one in the signature header.
    /// Also returned when the header's digest isn't valid hex.
    #[error("request signature does not match")]
    BadSignature,

    /// A signature header is missing, isn't UTF-8, or doesn't carry the
    /// `v0=` prefix. Also covers a non-numeric timestamp when the
    /// freshness window is enabled.
    #[error("malformed signature headers: {0}")]
    MalformedHeaders(String),

    /// The request body couldn't be read in full.
    #[error("failed to read request body: {0}")]
    BodyReadFailed(String),

    /// The signed timestamp is outside the configured freshness window.
    #[error("request timestamp is {age_secs}s away from server time")]
    StaleTimestamp { age_secs: u64 },
}
