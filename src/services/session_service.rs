use tracing::{debug, info};

use crate::{
    dto::{
        session::{
            AddPathRequest, CreateGameRequest, GameSnapshot, JoinGameRequest, LeaveGameRequest,
            LeaveGameResponse, ResetGameRequest, SessionClosed, StartGameRequest,
            UpdateGameRequest,
        },
        validation::validate_game_code,
    },
    error::ServiceError,
    state::{
        SharedState,
        session::{Departure, PathOutcome},
        store::SessionUpdate,
    },
};

/// Create a fresh game with the caller as leader.
///
/// A join code is generated unless the caller supplied one.
pub fn create_game(
    state: &SharedState,
    request: CreateGameRequest,
) -> Result<GameSnapshot, ServiceError> {
    let CreateGameRequest {
        leader_name,
        player_id,
        game_code,
    } = request;

    let leader_name = require_field(leader_name, "leader name")?;
    let player_id = require_field(player_id, "player id")?;

    let session = match game_code {
        Some(code) => {
            let code = normalize_code(&code)?;
            state
                .sessions()
                .create_with_code(code, player_id, leader_name)
                .map_err(|err| ServiceError::InvalidState(err.to_string()))?
        }
        None => state.sessions().create(player_id, leader_name),
    };

    debug!(code = %session.code, "game created");
    Ok(session.into())
}

/// Add a player to an existing game. Joining twice with the same id is a
/// no-op returning the current snapshot.
pub fn join_game(
    state: &SharedState,
    request: JoinGameRequest,
) -> Result<GameSnapshot, ServiceError> {
    let JoinGameRequest {
        game_code,
        player_id,
        player_name,
    } = request;

    let code = normalize_code(&game_code)?;
    let player_id = require_field(player_id, "player id")?;
    let player_name = require_field(player_name, "player name")?;

    let (added, session) = state
        .sessions()
        .with_session(&code, |game| {
            let added = game.add_player(player_id, player_name);
            ((added, game.clone()), SessionUpdate::Keep)
        })
        .ok_or_else(|| unknown_game(&code))?;

    if added {
        debug!(code = %code, "player joined game");
    }
    Ok(session.into())
}

/// Remove a player from a game.
///
/// The last departure closes the session; a departing leader hands the role
/// to the earliest-joined survivor.
pub fn leave_game(
    state: &SharedState,
    request: LeaveGameRequest,
) -> Result<LeaveGameResponse, ServiceError> {
    let LeaveGameRequest {
        game_code,
        player_id,
    } = request;

    let code = normalize_code(&game_code)?;
    let player_id = require_field(player_id, "player id")?;

    let outcome = state
        .sessions()
        .with_session(&code, |game| match game.remove_player(&player_id) {
            Err(err) => (Err(err), SessionUpdate::Keep),
            Ok(Departure::Empty) => (Ok(None), SessionUpdate::Remove),
            Ok(Departure::Remaining { promoted }) => {
                (Ok(Some((game.clone(), promoted))), SessionUpdate::Keep)
            }
        })
        .ok_or_else(|| unknown_game(&code))?;

    match outcome? {
        None => {
            debug!(code = %code, "last player left; game closed");
            Ok(LeaveGameResponse::Closed(SessionClosed::new()))
        }
        Some((session, promoted)) => {
            if let Some(leader) = promoted {
                debug!(code = %code, leader = %leader, "leadership transferred");
            }
            Ok(LeaveGameResponse::Remaining(session.into()))
        }
    }
}

/// Replace the configured articles while the game is still in the lobby.
pub fn update_game(
    state: &SharedState,
    request: UpdateGameRequest,
) -> Result<GameSnapshot, ServiceError> {
    let UpdateGameRequest {
        game_code,
        start_article,
        target_article,
    } = request;

    let code = normalize_code(&game_code)?;

    let updated = state
        .sessions()
        .with_session(&code, |game| {
            let result = game
                .set_articles(start_article, target_article)
                .map(|()| game.clone());
            (result, SessionUpdate::Keep)
        })
        .ok_or_else(|| unknown_game(&code))?;

    Ok(updated?.into())
}

/// Start the race with the given articles.
pub fn start_game(
    state: &SharedState,
    request: StartGameRequest,
) -> Result<GameSnapshot, ServiceError> {
    let StartGameRequest {
        game_code,
        start_article,
        target_article,
    } = request;

    let code = normalize_code(&game_code)?;
    let start_article = require_field(start_article, "start article")?;
    let target_article = require_field(target_article, "target article")?;

    let started = state
        .sessions()
        .with_session(&code, |game| {
            let result = game
                .start(start_article, target_article)
                .map(|()| game.clone());
            (result, SessionUpdate::Keep)
        })
        .ok_or_else(|| unknown_game(&code))?;

    let session = started?;
    info!(code = %code, "race started");
    Ok(session.into())
}

/// Record the article a player navigated to, finishing the race when it is
/// the target.
pub fn record_path(
    state: &SharedState,
    request: AddPathRequest,
) -> Result<GameSnapshot, ServiceError> {
    let AddPathRequest {
        game_code,
        player_id,
        article_name,
    } = request;

    let code = normalize_code(&game_code)?;
    let player_id = require_field(player_id, "player id")?;
    let article_name = require_field(article_name, "article name")?;

    let recorded = state
        .sessions()
        .with_session(&code, |game| {
            let result = game
                .record_path(&player_id, article_name)
                .map(|outcome| (outcome, game.clone()));
            (result, SessionUpdate::Keep)
        })
        .ok_or_else(|| unknown_game(&code))?;

    let (outcome, session) = recorded?;
    if outcome == PathOutcome::Won {
        info!(code = %code, winner = %player_id, "race finished");
    }
    Ok(session.into())
}

/// Return a game to the lobby for a rematch, keeping players and articles.
pub fn reset_game(
    state: &SharedState,
    request: ResetGameRequest,
) -> Result<GameSnapshot, ServiceError> {
    let ResetGameRequest { game_code } = request;

    let code = normalize_code(&game_code)?;

    let session = state
        .sessions()
        .with_session(&code, |game| {
            game.reset();
            (game.clone(), SessionUpdate::Keep)
        })
        .ok_or_else(|| unknown_game(&code))?;

    debug!(code = %code, "game reset");
    Ok(session.into())
}

/// Current snapshot of a game. Pure read, safe to poll.
pub fn game_info(state: &SharedState, game_code: &str) -> Result<GameSnapshot, ServiceError> {
    let code = normalize_code(game_code)?;

    state
        .sessions()
        .get(&code)
        .map(Into::into)
        .ok_or_else(|| unknown_game(&code))
}

/// Uppercase a raw join code and check its shape.
fn normalize_code(raw: &str) -> Result<String, ServiceError> {
    let code = raw.trim().to_uppercase();
    if let Err(err) = validate_game_code(&code) {
        let message = err
            .message
            .map(|message| message.to_string())
            .unwrap_or_else(|| format!("invalid game code `{raw}`"));
        return Err(ServiceError::InvalidInput(message));
    }
    Ok(code)
}

fn require_field(value: String, field: &str) -> Result<String, ServiceError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(ServiceError::InvalidInput(format!(
            "{field} must not be empty"
        )));
    }
    Ok(value)
}

fn unknown_game(code: &str) -> ServiceError {
    ServiceError::NotFound(format!("game `{code}` not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, dto::session::RaceStateDto, state::AppState};

    fn state() -> SharedState {
        AppState::new(AppConfig::default(), None)
    }

    fn create(state: &SharedState, name: &str, id: &str) -> GameSnapshot {
        create_game(
            state,
            CreateGameRequest {
                leader_name: name.into(),
                player_id: id.into(),
                game_code: None,
            },
        )
        .unwrap()
    }

    fn join(state: &SharedState, code: &str, id: &str, name: &str) -> GameSnapshot {
        join_game(
            state,
            JoinGameRequest {
                game_code: code.into(),
                player_id: id.into(),
                player_name: name.into(),
            },
        )
        .unwrap()
    }

    fn start(state: &SharedState, code: &str, from: &str, to: &str) -> GameSnapshot {
        start_game(
            state,
            StartGameRequest {
                game_code: code.into(),
                start_article: from.into(),
                target_article: to.into(),
            },
        )
        .unwrap()
    }

    fn add_path(
        state: &SharedState,
        code: &str,
        id: &str,
        article: &str,
    ) -> Result<GameSnapshot, ServiceError> {
        record_path(
            state,
            AddPathRequest {
                game_code: code.into(),
                player_id: id.into(),
                article_name: article.into(),
            },
        )
    }

    fn leave(state: &SharedState, code: &str, id: &str) -> Result<LeaveGameResponse, ServiceError> {
        leave_game(
            state,
            LeaveGameRequest {
                game_code: code.into(),
                player_id: id.into(),
            },
        )
    }

    #[test]
    fn full_race_between_two_players() {
        let state = state();

        let game = create(&state, "Ann", "ann-1");
        let code = game.code.clone();
        assert_eq!(game.state, RaceStateDto::Waiting);
        assert_eq!(game.players.len(), 1);
        assert!(game.players[0].is_leader);

        let game = join(&state, &code, "bob-1", "Bob");
        assert_eq!(game.players.len(), 2);
        assert!(!game.players[1].is_leader);

        let game = start(&state, &code, "Coffee", "Moon");
        assert_eq!(game.state, RaceStateDto::Playing);
        assert!(game.start_time.is_some());
        assert!(game.end_time.is_none());

        let game = add_path(&state, &code, "ann-1", "Tea").unwrap();
        assert_eq!(game.state, RaceStateDto::Playing);
        assert!(game.players.iter().all(|p| !p.is_winner));

        let game = add_path(&state, &code, "ann-1", "Moon").unwrap();
        assert_eq!(game.state, RaceStateDto::Finished);
        assert!(game.end_time.is_some());
        let ann = game.players.iter().find(|p| p.id == "ann-1").unwrap();
        assert!(ann.is_winner);
        assert_eq!(ann.paths, vec!["Tea", "Moon"]);

        // Bob's in-flight click after the finish converges on the result.
        let game = add_path(&state, &code, "bob-1", "Moon").unwrap();
        assert_eq!(game.state, RaceStateDto::Finished);
        let bob = game.players.iter().find(|p| p.id == "bob-1").unwrap();
        assert!(!bob.is_winner);
        assert!(bob.paths.is_empty());

        let game = reset_game(
            &state,
            ResetGameRequest {
                game_code: code.clone(),
            },
        )
        .unwrap();
        assert_eq!(game.state, RaceStateDto::Waiting);
        assert_eq!(game.start_article, "Coffee");
        assert_eq!(game.target_article, "Moon");
        assert!(game.players.iter().all(|p| p.paths.is_empty()));
        assert!(game.players.iter().all(|p| !p.is_winner));
        assert!(game.start_time.is_none());
        assert!(game.end_time.is_none());
    }

    #[test]
    fn caller_chosen_codes_are_normalized() {
        let state = state();

        let game = create_game(
            &state,
            CreateGameRequest {
                leader_name: "Ann".into(),
                player_id: "ann-1".into(),
                game_code: Some(" ab12cd ".into()),
            },
        )
        .unwrap();

        assert_eq!(game.code, "AB12CD");

        // Lookups are case-insensitive too.
        let info = game_info(&state, "Ab12Cd").unwrap();
        assert_eq!(info.code, "AB12CD");
    }

    #[test]
    fn taken_codes_conflict() {
        let state = state();
        create_game(
            &state,
            CreateGameRequest {
                leader_name: "Ann".into(),
                player_id: "ann-1".into(),
                game_code: Some("AB12CD".into()),
            },
        )
        .unwrap();

        let err = create_game(
            &state,
            CreateGameRequest {
                leader_name: "Bob".into(),
                player_id: "bob-1".into(),
                game_code: Some("AB12CD".into()),
            },
        )
        .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidState(_)));
    }

    #[test]
    fn malformed_codes_are_rejected() {
        let state = state();

        let err = game_info(&state, "TOO LONG CODE").unwrap_err();

        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[test]
    fn joining_twice_returns_the_same_roster() {
        let state = state();
        let game = create(&state, "Ann", "ann-1");
        let code = game.code;

        join(&state, &code, "bob-1", "Bob");
        let game = join(&state, &code, "bob-1", "Bobby");

        assert_eq!(game.players.len(), 2);
        assert_eq!(game.players[1].name, "Bob");
    }

    #[test]
    fn joining_an_unknown_game_fails() {
        let state = state();

        let err = join_game(
            &state,
            JoinGameRequest {
                game_code: "ZZZZZ9".into(),
                player_id: "bob-1".into(),
                player_name: "Bob".into(),
            },
        )
        .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn leader_departure_promotes_the_next_player() {
        let state = state();
        let game = create(&state, "Ann", "ann-1");
        let code = game.code;
        join(&state, &code, "bob-1", "Bob");
        join(&state, &code, "cid-1", "Cid");

        let response = leave(&state, &code, "ann-1").unwrap();

        let LeaveGameResponse::Remaining(game) = response else {
            panic!("expected a surviving session");
        };
        let leaders: Vec<_> = game.players.iter().filter(|p| p.is_leader).collect();
        assert_eq!(leaders.len(), 1);
        assert_eq!(leaders[0].id, "bob-1");
    }

    #[test]
    fn last_departure_closes_the_game() {
        let state = state();
        let game = create(&state, "Ann", "ann-1");
        let code = game.code;

        let response = leave(&state, &code, "ann-1").unwrap();

        assert!(matches!(response, LeaveGameResponse::Closed(_)));
        assert!(matches!(
            game_info(&state, &code),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn leaving_with_an_unknown_player_fails() {
        let state = state();
        let game = create(&state, "Ann", "ann-1");

        let err = leave(&state, &game.code, "ghost").unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(game_info(&state, &game.code).unwrap().players.len(), 1);
    }

    #[test]
    fn update_replaces_articles_in_the_lobby() {
        let state = state();
        let game = create(&state, "Ann", "ann-1");
        let code = game.code;

        let game = update_game(
            &state,
            UpdateGameRequest {
                game_code: code.clone(),
                start_article: "Coffee".into(),
                target_article: "Moon".into(),
            },
        )
        .unwrap();

        assert_eq!(game.start_article, "Coffee");
        assert_eq!(game.target_article, "Moon");
        assert_eq!(game.state, RaceStateDto::Waiting);
    }

    #[test]
    fn update_conflicts_once_the_race_started() {
        let state = state();
        let game = create(&state, "Ann", "ann-1");
        let code = game.code;
        start(&state, &code, "Coffee", "Moon");

        let err = update_game(
            &state,
            UpdateGameRequest {
                game_code: code.clone(),
                start_article: "Tea".into(),
                target_article: "Sun".into(),
            },
        )
        .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidState(_)));
        let info = game_info(&state, &code).unwrap();
        assert_eq!(info.start_article, "Coffee");
    }

    #[test]
    fn starting_twice_conflicts() {
        let state = state();
        let game = create(&state, "Ann", "ann-1");
        let code = game.code;
        start(&state, &code, "Coffee", "Moon");

        let err = start_game(
            &state,
            StartGameRequest {
                game_code: code,
                start_article: "Tea".into(),
                target_article: "Sun".into(),
            },
        )
        .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidState(_)));
    }

    #[test]
    fn starting_with_blank_articles_is_rejected() {
        let state = state();
        let game = create(&state, "Ann", "ann-1");

        let err = start_game(
            &state,
            StartGameRequest {
                game_code: game.code,
                start_article: "  ".into(),
                target_article: "Moon".into(),
            },
        )
        .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[test]
    fn recording_before_the_start_conflicts() {
        let state = state();
        let game = create(&state, "Ann", "ann-1");

        let err = add_path(&state, &game.code, "ann-1", "Tea").unwrap_err();

        assert!(matches!(err, ServiceError::InvalidState(_)));
    }

    #[test]
    fn info_reads_are_idempotent() {
        let state = state();
        let game = create(&state, "Ann", "ann-1");
        let code = game.code;
        start(&state, &code, "Coffee", "Moon");

        let first = serde_json::to_value(game_info(&state, &code).unwrap()).unwrap();
        let second = serde_json::to_value(game_info(&state, &code).unwrap()).unwrap();

        assert_eq!(first, second);
    }
}
