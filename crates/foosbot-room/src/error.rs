//! Error types for the room layer.

/// An internal invariant was violated while computing a transition.
///
/// This is a bug, not bad user input. The request that hit it fails,
/// the stored session stays as it was, and the server keeps serving.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreconditionError {
    /// Team assignment was asked to split a roster of the wrong size.
    #[error("cannot form teams: expected {expected} players, got {actual}")]
    RosterSize { expected: usize, actual: usize },
}

/// [`GameRules`](crate::GameRules) that can never complete a game.
///
/// Checked once when a coordinator is built, so a server never starts
/// with them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// Teams need at least one player.
    #[error("team_size must be at least 1")]
    ZeroTeamSize,

    /// Two teams of this size don't fit in a `usize`.
    #[error("team_size {0} is too large")]
    TeamSizeTooLarge(usize),
}
