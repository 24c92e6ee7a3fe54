//! Route handlers for the race session lifecycle.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use validator::Validate;

use crate::{
    dto::session::{
        AddPathRequest, CreateGameRequest, GameSnapshot, InfoParams, JoinGameRequest,
        LeaveGameRequest, LeaveGameResponse, ResetGameRequest, StartGameRequest,
        UpdateGameRequest,
    },
    error::AppError,
    services::session_service,
    state::SharedState,
};

/// Routes covering creation, membership and racing for game sessions.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/games/create", post(create_game))
        .route("/games/join", post(join_game))
        .route("/games/leave", post(leave_game))
        .route("/games/update", post(update_game))
        .route("/games/start", post(start_game))
        .route("/games/addpath", post(add_path))
        .route("/games/reset", post(reset_game))
        .route("/games/info", get(game_info))
}

/// Create a new game with the caller as leader.
#[utoipa::path(
    post,
    path = "/api/v1/games/create",
    tag = "game",
    request_body = CreateGameRequest,
    responses(
        (status = 200, description = "Game created", body = GameSnapshot),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Requested code already in use")
    )
)]
pub async fn create_game(
    State(state): State<SharedState>,
    Json(payload): Json<CreateGameRequest>,
) -> Result<Json<GameSnapshot>, AppError> {
    payload.validate()?;
    let snapshot = session_service::create_game(&state, payload)?;
    Ok(Json(snapshot))
}

/// Join an existing game by code.
#[utoipa::path(
    post,
    path = "/api/v1/games/join",
    tag = "game",
    request_body = JoinGameRequest,
    responses(
        (status = 200, description = "Joined, full roster returned", body = GameSnapshot),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Unknown game code")
    )
)]
pub async fn join_game(
    State(state): State<SharedState>,
    Json(payload): Json<JoinGameRequest>,
) -> Result<Json<GameSnapshot>, AppError> {
    payload.validate()?;
    let snapshot = session_service::join_game(&state, payload)?;
    Ok(Json(snapshot))
}

/// Leave a game, promoting a new leader or closing the session.
#[utoipa::path(
    post,
    path = "/api/v1/games/leave",
    tag = "game",
    request_body = LeaveGameRequest,
    responses(
        (status = 200, description = "Remaining roster, or a closure marker", body = LeaveGameResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Unknown game or player")
    )
)]
pub async fn leave_game(
    State(state): State<SharedState>,
    Json(payload): Json<LeaveGameRequest>,
) -> Result<Json<LeaveGameResponse>, AppError> {
    payload.validate()?;
    let response = session_service::leave_game(&state, payload)?;
    Ok(Json(response))
}

/// Replace the start and target articles while the game is waiting.
#[utoipa::path(
    post,
    path = "/api/v1/games/update",
    tag = "game",
    request_body = UpdateGameRequest,
    responses(
        (status = 200, description = "Articles updated", body = GameSnapshot),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Unknown game code"),
        (status = 409, description = "Game already started")
    )
)]
pub async fn update_game(
    State(state): State<SharedState>,
    Json(payload): Json<UpdateGameRequest>,
) -> Result<Json<GameSnapshot>, AppError> {
    payload.validate()?;
    let snapshot = session_service::update_game(&state, payload)?;
    Ok(Json(snapshot))
}

/// Start the race, pinning articles and the start time.
#[utoipa::path(
    post,
    path = "/api/v1/games/start",
    tag = "game",
    request_body = StartGameRequest,
    responses(
        (status = 200, description = "Race started", body = GameSnapshot),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Unknown game code"),
        (status = 409, description = "Game already started")
    )
)]
pub async fn start_game(
    State(state): State<SharedState>,
    Json(payload): Json<StartGameRequest>,
) -> Result<Json<GameSnapshot>, AppError> {
    payload.validate()?;
    let snapshot = session_service::start_game(&state, payload)?;
    Ok(Json(snapshot))
}

/// Record an article visit for a racer, finishing the race on the target.
#[utoipa::path(
    post,
    path = "/api/v1/games/addpath",
    tag = "game",
    request_body = AddPathRequest,
    responses(
        (status = 200, description = "Visit recorded", body = GameSnapshot),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Unknown game or player"),
        (status = 409, description = "Game not started yet")
    )
)]
pub async fn add_path(
    State(state): State<SharedState>,
    Json(payload): Json<AddPathRequest>,
) -> Result<Json<GameSnapshot>, AppError> {
    payload.validate()?;
    let snapshot = session_service::record_path(&state, payload)?;
    Ok(Json(snapshot))
}

/// Reset a game back to the lobby, keeping its articles.
#[utoipa::path(
    post,
    path = "/api/v1/games/reset",
    tag = "game",
    request_body = ResetGameRequest,
    responses(
        (status = 200, description = "Game reset", body = GameSnapshot),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Unknown game code")
    )
)]
pub async fn reset_game(
    State(state): State<SharedState>,
    Json(payload): Json<ResetGameRequest>,
) -> Result<Json<GameSnapshot>, AppError> {
    payload.validate()?;
    let snapshot = session_service::reset_game(&state, payload)?;
    Ok(Json(snapshot))
}

/// Read the current snapshot of a game.
#[utoipa::path(
    get,
    path = "/api/v1/games/info",
    tag = "game",
    params(
        ("gameCode" = String, Query, description = "Join code of the targeted game")
    ),
    responses(
        (status = 200, description = "Current snapshot", body = GameSnapshot),
        (status = 400, description = "Malformed game code"),
        (status = 404, description = "Unknown game code")
    )
)]
pub async fn game_info(
    State(state): State<SharedState>,
    Query(params): Query<InfoParams>,
) -> Result<Json<GameSnapshot>, AppError> {
    let snapshot = session_service::game_info(&state, &params.game_code)?;
    Ok(Json(snapshot))
}
