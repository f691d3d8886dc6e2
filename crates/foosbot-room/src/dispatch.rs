//! The command dispatcher: the bot's state machine.
//!
//! [`dispatch`] is a pure function. Given the current session and one
//! verified command it returns the next session and the reply, and
//! touches nothing else. The caller decides where the session lives
//! (see [`GameCoordinator`](crate::GameCoordinator)).
//!
//! ```text
//!              /new                       4th /play → teams
//!   NoGame ───────────→ Collecting ─────────────────────────→ NoGame
//!                        │   ↑  │     /reset, last /giveup       ↑
//!                        │   └──┘ /play, /giveup (others left)   │
//!                        └───────────────────────────────────────┘
//! ```

use foosbot_protocol::{Command, CommandRequest, Reply, UserId};
use foosbot_session::{FairnessScore, Session, SessionState};
use rand::Rng;

use crate::{assign, GameRules, PreconditionError, EXPLAIN_MESSAGE};

const NOTIFY_CHANNEL: &str = "<!here>";

/// Computes the transition for one command.
///
/// Every (state, command) pair has a reply, so the only error is an
/// internal invariant breach ([`PreconditionError`]). The fairness score
/// of a joining player and the glyphs of the "needs N more" notice
/// come from `rng`.
pub fn dispatch<R: Rng + ?Sized>(
    session: &Session,
    request: &CommandRequest,
    rules: &GameRules,
    rng: &mut R,
) -> Result<(Session, Reply), PreconditionError> {
    let user = &request.user_id;

    match (session.state(), &request.command) {
        (_, Command::Explain) => Ok((session.clone(), Reply::new(EXPLAIN_MESSAGE))),

        (state, Command::Unknown(raw)) => {
            tracing::info!(%state, command = %raw, %user, "unrecognized command");
            Ok((session.clone(), unrecognized()))
        }

        // --- NoGame -------------------------------------------------------
        (SessionState::NoGame, Command::New) => {
            tracing::info!(user = %request.user_name, user_id = %user, "new game created");
            let next = Session::collecting(user.clone(), fresh_score(rng));
            let reply = Reply::new(format!(
                "{NOTIFY_CHANNEL} User {} just started a new game",
                user.mention()
            ))
            .with_detail("Use */play* to join");
            Ok((next, reply))
        }

        (
            SessionState::NoGame,
            Command::Play | Command::GiveUp | Command::Reset | Command::Current,
        ) => {
            tracing::debug!(command = %request.command, %user, "no open game");
            let reply = Reply::new(format!("{} There is no open game", user.mention()))
                .with_detail("Use the */new* command to start a new one");
            Ok((session.clone(), reply))
        }

        // --- Collecting ---------------------------------------------------
        (SessionState::Collecting, Command::Play) => play(session, request, rules, rng),

        (SessionState::Collecting, Command::GiveUp) => {
            Ok(give_up(session, request, rules, rng))
        }

        (SessionState::Collecting, Command::Reset) => {
            tracing::info!(user = %request.user_name, players = session.len(), "game reset");
            let reply = Reply::new(format!("{NOTIFY_CHANNEL} Game has been canceled!"));
            Ok((Session::new(), reply))
        }

        (SessionState::Collecting, Command::New) => {
            tracing::debug!(players = session.len(), "game already created");
            let reply = Reply::new("Game already created")
                .with_detail(missing_notice(open_slots(session, rules), rules, rng));
            Ok((session.clone(), reply))
        }

        (SessionState::Collecting, Command::Current) => {
            let players: Vec<String> = session.players().into_iter().map(UserId::mention).collect();
            let reply = Reply::new(format!("Current players: [{}]", players.join(", ")))
                .with_detail("Use */play* to join");
            Ok((session.clone(), reply))
        }
    }
}

fn play<R: Rng + ?Sized>(
    session: &Session,
    request: &CommandRequest,
    rules: &GameRules,
    rng: &mut R,
) -> Result<(Session, Reply), PreconditionError> {
    let user = &request.user_id;

    if session.contains(user) {
        tracing::info!(user = %request.user_name, "already signed up");
        let reply = Reply::new(format!(
            "{} you have already been added to the current game",
            user.mention()
        ))
        .with_detail(missing_notice(open_slots(session, rules), rules, rng));
        return Ok((session.clone(), reply));
    }

    let joined = session.with_player(user.clone(), fresh_score(rng));
    tracing::info!(user = %request.user_name, players = joined.len(), "player joined");

    if joined.len() >= rules.players_per_game() {
        let teams = assign(joined.roster(), rules.team_size)?;
        tracing::info!(teams = %teams.headline(), "game is on");
        let reply = Reply::new(teams.headline()).with_detail(format!(
            "{NOTIFY_CHANNEL} :bell::soccer: *Game is on!* :bell::soccer:"
        ));
        return Ok((Session::new(), reply));
    }

    let reply = Reply::new(format!(
        "{} you have been added to the current game",
        user.mention()
    ))
    .with_detail(missing_notice(open_slots(&joined, rules), rules, rng));
    Ok((joined, reply))
}

fn give_up<R: Rng + ?Sized>(
    session: &Session,
    request: &CommandRequest,
    rules: &GameRules,
    rng: &mut R,
) -> (Session, Reply) {
    let user = &request.user_id;

    if !session.contains(user) {
        tracing::info!(user = %request.user_name, "never signed up");
        let reply = Reply::new(format!("{} you are not in the current game", user.mention()));
        return (session.clone(), reply);
    }

    let remaining = session.without_player(user);
    tracing::info!(user = %request.user_name, players = remaining.len(), "player left");

    let headline = format!("{NOTIFY_CHANNEL} {} Just abandoned the game", user.mention());
    let detail = if remaining.is_empty() {
        "No players left: game has been canceled!".to_string()
    } else {
        missing_notice(open_slots(&remaining, rules), rules, rng)
    };
    (remaining, Reply::new(headline).with_detail(detail))
}

fn fresh_score<R: Rng + ?Sized>(rng: &mut R) -> FairnessScore {
    rng.random()
}

fn open_slots(session: &Session, rules: &GameRules) -> usize {
    rules.players_per_game().saturating_sub(session.len())
}

/// `<!here> The game needs :man::woman: more players`, one random glyph
/// per open slot.
fn missing_notice<R: Rng + ?Sized>(open: usize, rules: &GameRules, rng: &mut R) -> String {
    let glyphs: String = if rules.missing_glyphs.is_empty() {
        open.to_string()
    } else {
        (0..open)
            .map(|_| {
                let i = rng.random_range(0..rules.missing_glyphs.len());
                rules.missing_glyphs[i].as_str()
            })
            .collect()
    };
    format!("{NOTIFY_CHANNEL} The game needs {glyphs} more players")
}

fn unrecognized() -> Reply {
    Reply::new("Unrecognized command")
        .with_detail("Use */explain* for a list of all available commands")
}
