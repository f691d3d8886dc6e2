//! Integration tests for the game coordinator: full command flows and
//! concurrent access to the shared session.

use std::collections::HashSet;
use std::sync::Arc;

use foosbot_protocol::{Command, CommandRequest, UserId};
use foosbot_room::{GameCoordinator, GameRules, PreconditionError, RulesError};
use foosbot_session::{Session, SessionState};
use tokio::task::JoinSet;

// =========================================================================
// Helpers
// =========================================================================

fn req(command: Command, user: &str) -> CommandRequest {
    CommandRequest::new(command, user, user.to_lowercase())
}

fn coordinator() -> Arc<GameCoordinator> {
    Arc::new(GameCoordinator::new(GameRules::default()).unwrap())
}

/// Opens a game for `creator` and has each of `others` join it.
async fn open_with(game: &GameCoordinator, creator: &str, others: &[&str]) {
    game.handle(&req(Command::New, creator)).await.unwrap();
    for user in others {
        game.handle(&req(Command::Play, user)).await.unwrap();
    }
}

// =========================================================================
// Sequential flows
// =========================================================================

#[tokio::test]
async fn test_four_players_form_two_disjoint_teams() {
    let game = coordinator();

    game.handle(&req(Command::New, "U1")).await.unwrap();
    assert_eq!(game.snapshot().await.len(), 1);

    for (user, size) in [("U2", 2), ("U3", 3)] {
        game.handle(&req(Command::Play, user)).await.unwrap();
        let session = game.snapshot().await;
        assert_eq!(session.state(), SessionState::Collecting);
        assert_eq!(session.len(), size);
    }

    let reply = game.handle(&req(Command::Play, "U4")).await.unwrap();
    let session = game.snapshot().await;
    assert_eq!(session.state(), SessionState::NoGame);
    assert!(session.is_empty());

    // "[<@a> - <@b>] vs. [<@c> - <@d>]"
    let (left, right) = reply
        .headline
        .split_once(" vs. ")
        .expect("headline should pair two teams");
    let team = |side: &str| -> HashSet<String> {
        side.trim_matches(|c: char| c == '[' || c == ']')
            .split(" - ")
            .map(str::to_string)
            .collect()
    };
    let (left, right) = (team(left), team(right));
    assert_eq!(left.len(), 2);
    assert_eq!(right.len(), 2);
    assert!(left.is_disjoint(&right));

    let everyone: HashSet<String> = left.union(&right).cloned().collect();
    let expected: HashSet<String> = ["U1", "U2", "U3", "U4"]
        .iter()
        .map(|u| UserId::new(*u).mention())
        .collect();
    assert_eq!(everyone, expected);
}

#[tokio::test]
async fn test_new_game_after_teams_formed_starts_fresh() {
    let game = coordinator();
    open_with(&game, "U1", &["U2", "U3", "U4"]).await;

    game.handle(&req(Command::New, "U5")).await.unwrap();
    let session = game.snapshot().await;
    assert_eq!(session.players(), [&UserId::new("U5")]);
}

#[tokio::test]
async fn test_reset_then_commands_see_no_game() {
    let game = coordinator();
    open_with(&game, "U1", &["U2"]).await;

    let reply = game.handle(&req(Command::Reset, "U3")).await.unwrap();
    assert_eq!(reply.headline, "<!here> Game has been canceled!");

    let reply = game.handle(&req(Command::Play, "U1")).await.unwrap();
    assert_eq!(reply.headline, "<@U1> There is no open game");
    assert!(game.snapshot().await.is_empty());
}

#[tokio::test]
async fn test_failed_transition_leaves_session_intact() {
    // Four players still collecting can't happen through commands: the
    // 4th join forms teams. A 5th join can't be split two against two.
    let full = Session::collecting(UserId::new("U1"), 1)
        .with_player(UserId::new("U2"), 2)
        .with_player(UserId::new("U3"), 3)
        .with_player(UserId::new("U4"), 4);
    let game = GameCoordinator::resume(GameRules::default(), full.clone()).unwrap();

    let result = game.handle(&req(Command::Play, "U5")).await;
    assert_eq!(result, Err(PreconditionError::RosterSize { expected: 4, actual: 5 }));

    // The request failed; the session and the coordinator did not.
    assert_eq!(game.snapshot().await, full);
    let reply = game.handle(&req(Command::Current, "U1")).await.unwrap();
    assert_eq!(reply.headline, "Current players: [<@U1>, <@U2>, <@U3>, <@U4>]");
}

#[test]
fn test_unplayable_rules_are_rejected() {
    let zero = GameRules { team_size: 0, ..GameRules::default() };
    assert_eq!(GameCoordinator::new(zero).unwrap_err(), RulesError::ZeroTeamSize);

    let huge = GameRules { team_size: usize::MAX, ..GameRules::default() };
    assert_eq!(
        GameCoordinator::new(huge).unwrap_err(),
        RulesError::TeamSizeTooLarge(usize::MAX)
    );
}

// =========================================================================
// Concurrency
// =========================================================================

/// Fires one `/play` per user, all at once, on the multi-threaded runtime.
async fn play_concurrently(game: &Arc<GameCoordinator>, users: Vec<String>) {
    let mut tasks = JoinSet::new();
    for user in users {
        let game = Arc::clone(game);
        tasks.spawn(async move {
            game.handle(&req(Command::Play, &user)).await.unwrap()
        });
    }
    while let Some(joined) = tasks.join_next().await {
        joined.expect("play task panicked");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_plays_below_capacity_lose_no_updates() {
    for _ in 0..50 {
        let game = coordinator();
        game.handle(&req(Command::New, "creator")).await.unwrap();

        play_concurrently(&game, vec!["a".into(), "b".into()]).await;

        let session = game.snapshot().await;
        assert_eq!(session.state(), SessionState::Collecting);
        assert_eq!(session.len(), 3);
        for user in ["creator", "a", "b"] {
            assert!(session.contains(&UserId::new(user)));
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_plays_filling_roster_form_exactly_one_game() {
    for existing in 1..=3usize {
        let game = coordinator();
        let others: Vec<String> = (1..existing).map(|i| format!("early{i}")).collect();
        let others: Vec<&str> = others.iter().map(String::as_str).collect();
        open_with(&game, "early0", &others).await;

        let open = 4 - existing;
        let mut tasks = JoinSet::new();
        for i in 0..open {
            let game = Arc::clone(&game);
            tasks.spawn(async move {
                game.handle(&req(Command::Play, &format!("late{i}")))
                    .await
                    .unwrap()
            });
        }

        let mut games_on = 0;
        while let Some(reply) = tasks.join_next().await {
            if reply.unwrap().headline.contains(" vs. ") {
                games_on += 1;
            }
        }

        // Exactly one join completed the roster, and it reset the session.
        assert_eq!(games_on, 1, "existing = {existing}");
        assert!(game.snapshot().await.is_empty());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_plays_join_once() {
    let game = coordinator();
    game.handle(&req(Command::New, "U1")).await.unwrap();

    play_concurrently(&game, vec!["U2".to_string(); 8]).await;

    let session = game.snapshot().await;
    assert_eq!(session.len(), 2);
    assert_eq!(session.state(), SessionState::Collecting);
}
