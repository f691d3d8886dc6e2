//! Session types: the one game the bot is collecting players for.
//!
//! A session tracks:
//! - WHAT state the game is in ([`SessionState`])
//! - WHO has joined, and the random [`FairnessScore`] each player drew
//!   on joining (the roster)
//!
//! Sessions are values. Transitions build a new `Session` from the old
//! one instead of mutating it in place, so a transition that fails
//! half-way can simply be thrown away.

use std::collections::HashMap;
use std::fmt;

use foosbot_protocol::UserId;

/// A random value drawn once per player when they join, used only to
/// order players when splitting them into teams.
pub type FairnessScore = u64;

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The lifecycle state of the session.
///
/// ```text
///   NoGame ──(new)──→ Collecting ──(4th player / reset / last giveup)──→ NoGame
/// ```
///
/// - **NoGame**: nothing open. The roster is always empty.
/// - **Collecting**: a game is open and 1–3 players have joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    NoGame,
    Collecting,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoGame => write!(f, "NoGame"),
            Self::Collecting => write!(f, "Collecting"),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The process-wide game session.
///
/// Fields are private: the constructors and roster operations below are
/// the only way to build one, and each of them keeps
/// `state == NoGame ⇔ roster is empty`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    state: SessionState,
    roster: HashMap<UserId, FairnessScore>,
}

impl Session {
    /// The initial session: no game, nobody joined.
    pub fn new() -> Self {
        Self::default()
    }

    /// A freshly opened game with its creator as the only player.
    pub fn collecting(creator: UserId, score: FairnessScore) -> Self {
        let mut roster = HashMap::new();
        roster.insert(creator, score);
        Self {
            state: SessionState::Collecting,
            roster,
        }
    }

    /// Returns a copy of this session with `user` added.
    ///
    /// Adding to a `NoGame` session opens a game. Re-adding a player who
    /// is already on the roster keeps their original score.
    pub fn with_player(&self, user: UserId, score: FairnessScore) -> Self {
        let mut roster = self.roster.clone();
        roster.entry(user).or_insert(score);
        Self {
            state: SessionState::Collecting,
            roster,
        }
    }

    /// Returns a copy of this session with `user` removed.
    ///
    /// Removing the last player closes the game.
    pub fn without_player(&self, user: &UserId) -> Self {
        let mut roster = self.roster.clone();
        roster.remove(user);
        let state = if roster.is_empty() {
            SessionState::NoGame
        } else {
            SessionState::Collecting
        };
        Self { state, roster }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The roster: every joined player and their fairness score.
    pub fn roster(&self) -> &HashMap<UserId, FairnessScore> {
        &self.roster
    }

    /// Returns `true` if `user` has joined.
    pub fn contains(&self, user: &UserId) -> bool {
        self.roster.contains_key(user)
    }

    /// Number of players who have joined.
    pub fn len(&self) -> usize {
        self.roster.len()
    }

    /// Returns `true` if nobody has joined.
    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// Joined players in a stable order (sorted by id).
    ///
    /// The roster is a `HashMap`, whose iteration order changes from run
    /// to run. Anything user-visible should go through this instead.
    pub fn players(&self) -> Vec<&UserId> {
        let mut players: Vec<_> = self.roster.keys().collect();
        players.sort();
        players
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(id: &str) -> UserId {
        UserId::new(id)
    }

    #[test]
    fn test_new_session_is_no_game_and_empty() {
        let session = Session::new();
        assert_eq!(session.state(), SessionState::NoGame);
        assert!(session.is_empty());
    }

    #[test]
    fn test_collecting_has_single_creator() {
        let session = Session::collecting(uid("U1"), 7);
        assert_eq!(session.state(), SessionState::Collecting);
        assert_eq!(session.len(), 1);
        assert_eq!(session.roster()[&uid("U1")], 7);
    }

    #[test]
    fn test_with_player_leaves_original_untouched() {
        let before = Session::collecting(uid("U1"), 1);
        let after = before.with_player(uid("U2"), 2);
        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn test_with_player_existing_keeps_first_score() {
        let session = Session::collecting(uid("U1"), 1).with_player(uid("U1"), 99);
        assert_eq!(session.len(), 1);
        assert_eq!(session.roster()[&uid("U1")], 1);
    }

    #[test]
    fn test_with_player_on_no_game_opens_game() {
        let session = Session::new().with_player(uid("U1"), 5);
        assert_eq!(session.state(), SessionState::Collecting);
    }

    #[test]
    fn test_without_last_player_returns_to_no_game() {
        let session = Session::collecting(uid("U1"), 1).without_player(&uid("U1"));
        assert_eq!(session.state(), SessionState::NoGame);
        assert!(session.is_empty());
    }

    #[test]
    fn test_without_absent_player_is_unchanged() {
        let before = Session::collecting(uid("U1"), 1);
        let after = before.without_player(&uid("U2"));
        assert_eq!(before, after);
    }

    #[test]
    fn test_players_sorted_by_id() {
        let session = Session::collecting(uid("c"), 1)
            .with_player(uid("a"), 2)
            .with_player(uid("b"), 3);
        let ids: Vec<_> = session.players().iter().map(|u| u.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_session_state_display() {
        assert_eq!(SessionState::NoGame.to_string(), "NoGame");
        assert_eq!(SessionState::Collecting.to_string(), "Collecting");
    }
}
