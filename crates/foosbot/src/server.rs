//! `FoosbotServer` builder and server loop.
//!
//! This is the entry point for running the bot. It ties together all
//! the layers: HTTP → signature check → protocol → game coordinator.

use std::future::Future;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use foosbot_protocol::SlackRenderer;
use foosbot_room::{GameCoordinator, GameRules};
use foosbot_session::{Authenticator, SignatureVerifier};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::DEFAULT_MAX_BODY_BYTES;
use crate::handler::{command, ping};
use crate::{FoosbotError, ServerConfig};

/// Shared server state passed to each request handler.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks. The only
/// mutable part, the session, is locked inside the coordinator.
pub(crate) struct ServerState<A: Authenticator> {
    pub(crate) game: GameCoordinator,
    pub(crate) auth: A,
    pub(crate) renderer: SlackRenderer,
    pub(crate) max_body_bytes: usize,
}

/// Builder for configuring and starting a foosbot server.
///
/// # Example
///
/// ```rust,ignore
/// use foosbot::prelude::*;
///
/// let server = FoosbotServer::builder()
///     .bind("0.0.0.0:9000")
///     .build(SignatureVerifier::new("secret"))
///     .await?;
/// server.run().await
/// ```
pub struct FoosbotServerBuilder {
    bind_addr: String,
    rules: GameRules,
    max_body_bytes: usize,
}

impl FoosbotServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:9000".to_string(),
            rules: GameRules::default(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the game rules (team size, notice glyphs).
    pub fn rules(mut self, rules: GameRules) -> Self {
        self.rules = rules;
        self
    }

    /// Sets the request body limit.
    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Applies the bind address and body limit from a [`ServerConfig`].
    ///
    /// The secret and freshness window go into the authenticator, see
    /// [`ServerConfig::verifier`].
    pub fn config(self, config: &ServerConfig) -> Self {
        self.bind(&config.bind_addr.to_string())
            .max_body_bytes(config.max_body_bytes)
    }

    /// Binds the listener and builds the server with the given
    /// authenticator.
    ///
    /// # Errors
    /// Returns [`FoosbotError::Rules`] if the rules can never complete a
    /// game, or [`FoosbotError::Io`] if the address can't be bound.
    pub async fn build<A: Authenticator>(self, auth: A) -> Result<FoosbotServer<A>, FoosbotError> {
        let game = GameCoordinator::new(self.rules)?;
        let listener = TcpListener::bind(&self.bind_addr).await?;
        tracing::info!(addr = %self.bind_addr, "HTTP listener bound");

        let state = Arc::new(ServerState {
            game,
            auth,
            renderer: SlackRenderer,
            max_body_bytes: self.max_body_bytes,
        });

        Ok(FoosbotServer { listener, state })
    }
}

impl Default for FoosbotServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound foosbot server.
///
/// Call [`run()`](Self::run) to start serving requests.
pub struct FoosbotServer<A: Authenticator> {
    listener: TcpListener,
    state: Arc<ServerState<A>>,
}

impl FoosbotServer<SignatureVerifier> {
    /// Creates a new builder.
    ///
    /// Lives on the production instantiation so `FoosbotServer::builder()`
    /// needs no type annotation. The builder itself can still build a
    /// server around any [`Authenticator`].
    pub fn builder() -> FoosbotServerBuilder {
        FoosbotServerBuilder::new()
    }
}

impl<A: Authenticator> FoosbotServer<A> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves requests until the process is terminated.
    ///
    /// Each request runs on its own Tokio task. A failing request only
    /// fails itself; the loop keeps going.
    pub async fn run(self) -> Result<(), FoosbotError> {
        self.run_until(std::future::pending()).await
    }

    /// Serves requests until `shutdown` completes, then stops accepting
    /// new connections and lets in-flight requests finish.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), FoosbotError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!("foosbot server running");
        axum::serve(self.listener, router(self.state))
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("foosbot server stopped");
        Ok(())
    }
}

/// Builds the HTTP routes.
///
/// `/ping` answers any GET or POST that passes authentication; `/` is
/// the slash-command endpoint.
pub(crate) fn router<A: Authenticator>(state: Arc<ServerState<A>>) -> Router {
    Router::new()
        .route("/ping", get(ping::<A>).post(ping::<A>))
        .route("/", post(command::<A>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
