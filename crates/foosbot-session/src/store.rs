//! The session store: the single, lock-guarded home of the [`Session`].
//!
//! # Concurrency note
//!
//! Every request runs on its own Tokio task, possibly on different
//! threads, and they all share one session. The store wraps it in a
//! `tokio::sync::Mutex` and only exposes it through
//! [`with_session`](SessionStore::with_session): the lock is held for the
//! whole read-modify-write, so two `/play` requests can never both read
//! "3 players" and both think they were the 4th.
//!
//! There is no `get_mut`: callers can't hold the session across an
//! `.await` or leave it half-updated.

use tokio::sync::Mutex;

use crate::{Session, SessionState};

/// Owns the process-wide [`Session`].
///
/// Share it between tasks with `Arc<SessionStore>`.
#[derive(Debug, Default)]
pub struct SessionStore {
    session: Mutex<Session>,
}

impl SessionStore {
    /// Creates a store holding the initial (`NoGame`) session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `session`.
    pub fn from_session(session: Session) -> Self {
        Self { session: Mutex::new(session) }
    }

    /// Runs one atomic transition.
    ///
    /// Acquires the lock, hands the current session to `transition`, and:
    /// - on `Ok((next, out))` stores `next` and returns `out`;
    /// - on `Err(e)` keeps the current session unchanged and returns `e`.
    ///
    /// `transition` is a plain (non-async) closure, so nothing can
    /// `.await` while the lock is held.
    pub async fn with_session<F, T, E>(&self, transition: F) -> Result<T, E>
    where
        F: FnOnce(&Session) -> Result<(Session, T), E>,
    {
        let mut session = self.session.lock().await;
        let (next, out) = transition(&session)?;

        if next.state() != session.state() {
            tracing::info!(
                from = %session.state(),
                to = %next.state(),
                "session state changed"
            );
        }
        debug_assert!(
            (next.state() == SessionState::NoGame) == next.is_empty(),
            "NoGame must have an empty roster and Collecting a non-empty one"
        );

        *session = next;
        Ok(out)
    }

    /// Returns a copy of the current session.
    pub async fn snapshot(&self) -> Session {
        self.session.lock().await.clone()
    }
}
