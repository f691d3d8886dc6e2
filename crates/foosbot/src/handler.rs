//! Per-request handlers: authentication, parsing, and dispatch.
//!
//! Every request gets its own Tokio task running one of these. The flow
//! for a slash command is:
//!   1. Read the body (once, up to the size limit)
//!   2. Verify the signature headers against the raw bytes
//!   3. Parse the form → `CommandRequest`
//!   4. Run the transition on the shared session
//!   5. Render the reply as JSON
//!
//! Any failure in steps 1–3 rejects the request before the session is
//! touched.

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use foosbot_protocol::SlashCommand;
use foosbot_session::{AuthError, Authenticator, SIGNATURE_HEADER, TIMESTAMP_HEADER};

use crate::server::ServerState;
use crate::FoosbotError;

/// Liveness probe: authenticates the request and answers `pong`.
pub(crate) async fn ping<A: Authenticator>(
    State(state): State<Arc<ServerState<A>>>,
    headers: HeaderMap,
    body: Body,
) -> Result<&'static str, FoosbotError> {
    let body = read_body(body, state.max_body_bytes).await?;
    authenticate(&state.auth, &headers, &body)?;
    tracing::debug!("ping");
    Ok("pong")
}

/// The slash-command endpoint.
pub(crate) async fn command<A: Authenticator>(
    State(state): State<Arc<ServerState<A>>>,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, FoosbotError> {
    let body = read_body(body, state.max_body_bytes).await?;
    let verified = authenticate(&state.auth, &headers, &body)?;

    let request = SlashCommand::from_form(verified)?.into_request();
    tracing::info!(
        command = %request.command,
        user = %request.user_name,
        user_id = %request.user_id,
        "command received"
    );

    let reply = state.game.handle(&request).await?;
    let json = state.renderer.to_json(&reply)?;

    Ok(([(header::CONTENT_TYPE, "application/json")], json).into_response())
}

/// Reads the whole body into memory, failing past `limit` bytes.
async fn read_body(body: Body, limit: usize) -> Result<Bytes, AuthError> {
    axum::body::to_bytes(body, limit)
        .await
        .map_err(|e| AuthError::BodyReadFailed(e.to_string()))
}

/// Checks the signature headers against the raw body.
///
/// A header that isn't valid UTF-8 is treated as absent.
fn authenticate<'a, A: Authenticator>(
    auth: &A,
    headers: &HeaderMap,
    body: &'a [u8],
) -> Result<&'a [u8], AuthError> {
    let header_str = |name: &str| headers.get(name).and_then(|value| value.to_str().ok());
    auth.verify(body, header_str(TIMESTAMP_HEADER), header_str(SIGNATURE_HEADER))
}
