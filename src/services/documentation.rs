use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Wiki Sprint Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::session::create_game,
        crate::routes::session::join_game,
        crate::routes::session::leave_game,
        crate::routes::session::update_game,
        crate::routes::session::start_game,
        crate::routes::session::add_path,
        crate::routes::session::reset_game,
        crate::routes::session::game_info,
        crate::routes::hint::hint,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::session::CreateGameRequest,
            crate::dto::session::JoinGameRequest,
            crate::dto::session::LeaveGameRequest,
            crate::dto::session::UpdateGameRequest,
            crate::dto::session::StartGameRequest,
            crate::dto::session::AddPathRequest,
            crate::dto::session::ResetGameRequest,
            crate::dto::session::GameSnapshot,
            crate::dto::session::PlayerSnapshot,
            crate::dto::session::RaceStateDto,
            crate::dto::session::SessionClosed,
            crate::dto::session::LeaveGameResponse,
            crate::dto::hint::HintRequest,
            crate::dto::hint::HintResponse,
            crate::dto::hint::LinkSimilarity,
            crate::dto::hint::Closeness,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "game", description = "Race session lifecycle operations"),
        (name = "hint", description = "Semantic hint ranking"),
    )
)]
pub struct ApiDoc;
