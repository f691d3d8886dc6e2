//! Game rules and the static help text.

use crate::RulesError;

// ---------------------------------------------------------------------------
// GameRules
// ---------------------------------------------------------------------------

/// Settings for a game.
///
/// The defaults describe a table-football match: two teams of two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRules {
    /// Players per team. Must be at least 1, see [`validate`](Self::validate).
    pub team_size: usize,

    /// Glyphs for the "the game needs N more players" notice. One is
    /// picked at random per missing player, so the notice reads e.g.
    /// `:man::woman::man:` for three open slots.
    pub missing_glyphs: Vec<String>,
}

impl GameRules {
    /// Number of players that completes a game (two full teams).
    pub fn players_per_game(&self) -> usize {
        self.team_size.saturating_mul(2)
    }

    /// Checks that a full roster can be split into two teams.
    ///
    /// # Errors
    /// [`RulesError::ZeroTeamSize`] for empty teams,
    /// [`RulesError::TeamSizeTooLarge`] if two teams overflow `usize`.
    pub fn validate(&self) -> Result<(), RulesError> {
        match self.team_size {
            0 => Err(RulesError::ZeroTeamSize),
            n if n.checked_mul(2).is_none() => Err(RulesError::TeamSizeTooLarge(n)),
            _ => Ok(()),
        }
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            team_size: 2,
            missing_glyphs: vec![":man:".into(), ":woman:".into()],
        }
    }
}

// ---------------------------------------------------------------------------
// Static replies
// ---------------------------------------------------------------------------

/// The reply to `/explain`, identical in every state.
pub const EXPLAIN_MESSAGE: &str = "Available commands:\n\
    \t*/new*\t\tStarts a new game\n\
    \t*/play*\t\tJoins current game\n\
    \t*/giveup*\tAbandon current game\n\
    \t*/reset*\t\tHard reset\n\
    \t*/current*\t\tShow status\n";
