//! Game coordinator: runs commands against the shared session.

use foosbot_protocol::{CommandRequest, Reply};
use foosbot_session::{Session, SessionStore};

use crate::{dispatch, GameRules, PreconditionError, RulesError};

/// Owns the session store and the rules, and applies each command as
/// one atomic transition.
///
/// This is the entry point for higher layers (the HTTP handler). Share
/// it between request tasks with `Arc<GameCoordinator>`.
#[derive(Debug, Default)]
pub struct GameCoordinator {
    store: SessionStore,
    rules: GameRules,
}

impl GameCoordinator {
    /// Creates a coordinator with a fresh `NoGame` session.
    ///
    /// # Errors
    /// Returns [`RulesError`] if `rules` can never complete a game.
    pub fn new(rules: GameRules) -> Result<Self, RulesError> {
        Self::resume(rules, Session::new())
    }

    /// Creates a coordinator that continues from `session`, e.g. one
    /// taken with [`snapshot`](Self::snapshot).
    ///
    /// # Errors
    /// Returns [`RulesError`] if `rules` can never complete a game.
    pub fn resume(rules: GameRules, session: Session) -> Result<Self, RulesError> {
        rules.validate()?;
        Ok(Self {
            store: SessionStore::from_session(session),
            rules,
        })
    }

    /// Applies one verified command and returns the reply.
    ///
    /// The whole read-modify-write happens under the store's lock, so
    /// concurrent commands are applied one after another, never
    /// interleaved.
    ///
    /// # Errors
    /// Returns [`PreconditionError`] if the transition hit an internal
    /// invariant breach. The session is left exactly as it was.
    pub async fn handle(&self, request: &CommandRequest) -> Result<Reply, PreconditionError> {
        let result = self
            .store
            .with_session(|session| dispatch(session, request, &self.rules, &mut rand::rng()))
            .await;

        if let Err(e) = &result {
            tracing::error!(
                error = %e,
                command = %request.command,
                user = %request.user_id,
                "transition failed, session left unchanged"
            );
        }
        result
    }

    /// Returns a copy of the current session.
    pub async fn snapshot(&self) -> Session {
        self.store.snapshot().await
    }

    /// The rules this coordinator plays by.
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }
}
