//! Request signing: proving a webhook came from the chat platform.
//!
//! The platform and the bot share a secret. For every request the
//! platform computes
//!
//! ```text
//! HMAC-SHA256(secret, "v0:" + timestamp + ":" + body)
//! ```
//!
//! and sends it hex-encoded as `X-Slack-Signature: v0=<hex>`, with the
//! timestamp in `X-Slack-Request-Timestamp`. We recompute the MAC over
//! the exact bytes we received and compare in constant time.
//!
//! # Why a trait?
//!
//! The HTTP layer is generic over [`Authenticator`]. Production uses
//! [`SignatureVerifier`]; tests can plug in their own implementation
//! without touching the server code.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// Version tag that prefixes both the signed base string and the header.
pub const SIGNATURE_VERSION: &str = "v0";

/// Header carrying the Unix timestamp (seconds) the request was signed at.
pub const TIMESTAMP_HEADER: &str = "X-Slack-Request-Timestamp";

/// Header carrying `v0=<hex digest>`.
pub const SIGNATURE_HEADER: &str = "X-Slack-Signature";

// ---------------------------------------------------------------------------
// Free functions: the signing scheme itself
// ---------------------------------------------------------------------------

fn mac_for(secret: &[u8], timestamp: &str, body: &[u8]) -> HmacSha256 {
    // HMAC is defined for keys of any length (long keys are hashed,
    // short ones padded), so `new_from_slice` cannot fail here.
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(SIGNATURE_VERSION.as_bytes());
    mac.update(b":");
    mac.update(timestamp.as_bytes());
    mac.update(b":");
    mac.update(body);
    mac
}

/// Computes the signature header value (`v0=<hex>`) for a request.
///
/// This is what the platform does on its side; we use it in tests and
/// in tooling that replays requests against a local server.
pub fn sign(secret: &[u8], timestamp: &str, body: &[u8]) -> String {
    let digest = mac_for(secret, timestamp, body).finalize().into_bytes();
    format!("{SIGNATURE_VERSION}={}", hex::encode(digest))
}

/// Verifies a signed request body.
///
/// Returns the body unchanged on success, so callers can chain straight
/// into parsing.
///
/// # Errors
/// - [`AuthError::MalformedHeaders`]: a header is absent, or the
///   signature doesn't start with `v0=`
/// - [`AuthError::BadSignature`]: the digest isn't hex, or doesn't match
pub fn verify<'a>(
    body: &'a [u8],
    timestamp: Option<&str>,
    signature: Option<&str>,
    secret: &[u8],
) -> Result<&'a [u8], AuthError> {
    let timestamp = timestamp
        .ok_or_else(|| AuthError::MalformedHeaders(format!("missing {TIMESTAMP_HEADER}")))?;
    let signature = signature
        .ok_or_else(|| AuthError::MalformedHeaders(format!("missing {SIGNATURE_HEADER}")))?;

    let hex_digest = signature
        .strip_prefix(SIGNATURE_VERSION)
        .and_then(|rest| rest.strip_prefix('='))
        .ok_or_else(|| {
            AuthError::MalformedHeaders(format!(
                "{SIGNATURE_HEADER} must start with {SIGNATURE_VERSION}="
            ))
        })?;

    let expected = hex::decode(hex_digest).map_err(|_| AuthError::BadSignature)?;

    // `verify_slice` compares in constant time, so the response time
    // doesn't leak how many leading bytes of a forged MAC were right.
    mac_for(secret, timestamp, body)
        .verify_slice(&expected)
        .map_err(|_| AuthError::BadSignature)?;

    Ok(body)
}

/// Checks that a signed timestamp is within `max_age` of `now`.
///
/// Clock skew cuts both ways, so a timestamp too far in the future is
/// rejected just like a stale one.
///
/// # Errors
/// - [`AuthError::MalformedHeaders`]: timestamp isn't decimal seconds
/// - [`AuthError::StaleTimestamp`]: outside the window
pub fn check_freshness(
    timestamp: &str,
    now: SystemTime,
    max_age: Duration,
) -> Result<(), AuthError> {
    let signed_at: u64 = timestamp.trim().parse().map_err(|_| {
        AuthError::MalformedHeaders(format!("{TIMESTAMP_HEADER} is not a Unix timestamp"))
    })?;
    let now_secs = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let age_secs = now_secs.abs_diff(signed_at);
    if age_secs > max_age.as_secs() {
        return Err(AuthError::StaleTimestamp { age_secs });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Authenticator trait
// ---------------------------------------------------------------------------

/// Decides whether an inbound request is trusted.
///
/// # Trait bounds
///
/// - `Send + Sync` → one authenticator is shared by every request task.
/// - `'static` → it lives as long as the server.
///
/// Verification is synchronous and touches no shared mutable state, so
/// any number of requests may verify in parallel.
pub trait Authenticator: Send + Sync + 'static {
    /// Verifies `body` against the two signature headers (either may be
    /// absent). Returns the body on success.
    fn verify<'a>(
        &self,
        body: &'a [u8],
        timestamp: Option<&str>,
        signature: Option<&str>,
    ) -> Result<&'a [u8], AuthError>;
}

// ---------------------------------------------------------------------------
// SignatureVerifier
// ---------------------------------------------------------------------------

/// Settings for [`SignatureVerifier`].
#[derive(Debug, Clone, Default)]
pub struct VerifierConfig {
    /// Reject requests whose signed timestamp is further than this from
    /// the server clock.
    ///
    /// Default: `None`, no freshness check. Replayed requests with a
    /// valid signature are accepted.
    pub max_request_age: Option<Duration>,
}

/// The production [`Authenticator`]: HMAC-SHA256 with a shared secret.
pub struct SignatureVerifier {
    secret: Vec<u8>,
    config: VerifierConfig,
}

impl SignatureVerifier {
    /// Creates a verifier with the default config (no freshness window).
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self::with_config(secret, VerifierConfig::default())
    }

    /// Creates a verifier with explicit settings.
    pub fn with_config(secret: impl Into<Vec<u8>>, config: VerifierConfig) -> Self {
        Self { secret: secret.into(), config }
    }
}

// Hand-written so the secret never ends up in a log line.
impl fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("secret", &"<redacted>")
            .field("config", &self.config)
            .finish()
    }
}

impl Authenticator for SignatureVerifier {
    fn verify<'a>(
        &self,
        body: &'a [u8],
        timestamp: Option<&str>,
        signature: Option<&str>,
    ) -> Result<&'a [u8], AuthError> {
        let body = verify(body, timestamp, signature, &self.secret)?;

        if let (Some(max_age), Some(ts)) = (self.config.max_request_age, timestamp) {
            check_freshness(ts, SystemTime::now(), max_age)?;
        }

        Ok(body)
    }
}
