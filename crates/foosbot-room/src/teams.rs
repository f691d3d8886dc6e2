//! Team assignment: splitting a full roster into two teams.
//!
//! Every player drew a random [`FairnessScore`] when they joined. Sorting
//! by that score gives a random but reproducible order; the lower half
//! plays the upper half.

use std::collections::HashMap;

use foosbot_protocol::UserId;
use foosbot_session::FairnessScore;

use crate::PreconditionError;

/// Two disjoint teams formed from one roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teams {
    /// The lowest-scoring players.
    pub left: Vec<UserId>,
    /// The highest-scoring players.
    pub right: Vec<UserId>,
}

impl Teams {
    /// Formats the match-up line: `[<@a> - <@b>] vs. [<@c> - <@d>]`.
    pub fn headline(&self) -> String {
        format!("[{}] vs. [{}]", mentions(&self.left), mentions(&self.right))
    }

    /// Every player on either team.
    pub fn players(&self) -> impl Iterator<Item = &UserId> {
        self.left.iter().chain(self.right.iter())
    }
}

fn mentions(team: &[UserId]) -> String {
    team.iter()
        .map(UserId::mention)
        .collect::<Vec<_>>()
        .join(" - ")
}

/// Splits a roster of exactly `2 * team_size` players into two teams.
///
/// Players are sorted ascending by score, ties broken by user id so equal
/// scores still produce one deterministic answer. The first `team_size`
/// form [`Teams::left`], the rest form [`Teams::right`].
///
/// # Errors
/// Returns [`PreconditionError::RosterSize`] if the roster doesn't hold
/// exactly `2 * team_size` players (or `team_size` is 0).
pub fn assign(
    roster: &HashMap<UserId, FairnessScore>,
    team_size: usize,
) -> Result<Teams, PreconditionError> {
    let expected = team_size.saturating_mul(2);
    if team_size == 0 || roster.len() != expected {
        return Err(PreconditionError::RosterSize { expected, actual: roster.len() });
    }

    let mut ranked: Vec<(&UserId, FairnessScore)> =
        roster.iter().map(|(user, score)| (user, *score)).collect();
    ranked.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));

    let mut ordered = ranked.into_iter().map(|(user, _)| user.clone());
    let left: Vec<UserId> = ordered.by_ref().take(team_size).collect();
    let right: Vec<UserId> = ordered.collect();

    Ok(Teams { left, right })
}
