use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dto::format_system_time,
    state::session::{Player, RaceSession, RaceState},
};

/// Payload creating a fresh game with its creator as leader.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    /// Display name of the creating player.
    #[validate(length(min = 1, message = "leader name must not be empty"))]
    pub leader_name: String,
    /// Client-generated identifier of the creating player.
    #[serde(rename = "playerID")]
    #[validate(length(min = 1, message = "player id must not be empty"))]
    pub player_id: String,
    /// Caller-chosen join code; a fresh one is generated when omitted.
    #[serde(default)]
    pub game_code: Option<String>,
}

/// Payload adding a player to an existing game.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JoinGameRequest {
    /// Join code of the targeted game.
    #[validate(length(min = 1, message = "game code must not be empty"))]
    pub game_code: String,
    /// Client-generated identifier of the joining player.
    #[serde(rename = "playerID")]
    #[validate(length(min = 1, message = "player id must not be empty"))]
    pub player_id: String,
    /// Display name of the joining player.
    #[validate(length(min = 1, message = "player name must not be empty"))]
    pub player_name: String,
}

/// Payload removing a player from a game.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LeaveGameRequest {
    /// Join code of the targeted game.
    #[validate(length(min = 1, message = "game code must not be empty"))]
    pub game_code: String,
    /// Identifier of the departing player.
    #[serde(rename = "playerID")]
    #[validate(length(min = 1, message = "player id must not be empty"))]
    pub player_id: String,
}

/// Payload replacing the configured articles while in the lobby.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGameRequest {
    /// Join code of the targeted game.
    #[validate(length(min = 1, message = "game code must not be empty"))]
    pub game_code: String,
    /// Article every player will start from.
    pub start_article: String,
    /// Article that will end the race.
    pub target_article: String,
}

/// Payload starting the race.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StartGameRequest {
    /// Join code of the targeted game.
    #[validate(length(min = 1, message = "game code must not be empty"))]
    pub game_code: String,
    /// Article every player starts from.
    #[validate(length(min = 1, message = "start article must not be empty"))]
    pub start_article: String,
    /// Article that ends the race.
    #[validate(length(min = 1, message = "target article must not be empty"))]
    pub target_article: String,
}

/// Payload recording the article a player just navigated to.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddPathRequest {
    /// Join code of the targeted game.
    #[validate(length(min = 1, message = "game code must not be empty"))]
    pub game_code: String,
    /// Identifier of the navigating player.
    #[serde(rename = "playerID")]
    #[validate(length(min = 1, message = "player id must not be empty"))]
    pub player_id: String,
    /// Title of the visited article.
    #[validate(length(min = 1, message = "article name must not be empty"))]
    pub article_name: String,
}

/// Payload returning a finished game to the lobby.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetGameRequest {
    /// Join code of the targeted game.
    #[validate(length(min = 1, message = "game code must not be empty"))]
    pub game_code: String,
}

/// Query parameters of the info endpoint.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InfoParams {
    /// Join code of the targeted game.
    pub game_code: String,
}

/// Wire representation of the race lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RaceStateDto {
    /// Lobby phase, articles can still change.
    Waiting,
    /// Race in progress.
    Playing,
    /// A player reached the target.
    Finished,
}

impl From<RaceState> for RaceStateDto {
    fn from(state: RaceState) -> Self {
        match state {
            RaceState::Waiting => RaceStateDto::Waiting,
            RaceState::Playing => RaceStateDto::Playing,
            RaceState::Finished => RaceStateDto::Finished,
        }
    }
}

/// Public projection of a player inside a snapshot.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    /// Client-generated identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether this player leads the session.
    pub is_leader: bool,
    /// Whether this player won the current race.
    pub is_winner: bool,
    /// Article titles visited during the current race, in order.
    pub paths: Vec<String>,
}

impl From<Player> for PlayerSnapshot {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            name: player.name,
            is_leader: player.is_leader,
            is_winner: player.is_winner,
            paths: player.paths,
        }
    }
}

/// Full state of a race session, returned by every game endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Join code identifying the session.
    pub code: String,
    /// Players in join order.
    pub players: Vec<PlayerSnapshot>,
    /// Lifecycle state.
    pub state: RaceStateDto,
    /// Article every player starts from; empty while unconfigured.
    pub start_article: String,
    /// Article that ends the race; empty while unconfigured.
    pub target_article: String,
    /// RFC3339 moment the race started, or null.
    pub start_time: Option<String>,
    /// RFC3339 moment the race finished, or null.
    pub end_time: Option<String>,
}

impl From<RaceSession> for GameSnapshot {
    fn from(session: RaceSession) -> Self {
        Self {
            code: session.code,
            players: session.players.into_values().map(Into::into).collect(),
            state: session.state.into(),
            start_article: session.start_article,
            target_article: session.target_article,
            start_time: session.started_at.map(format_system_time),
            end_time: session.finished_at.map(format_system_time),
        }
    }
}

/// Marker payload sent when the last player left and the session was dropped.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionClosed {
    /// Always `session_closed`.
    pub status: String,
}

impl SessionClosed {
    /// Build the closed marker.
    pub fn new() -> Self {
        Self {
            status: "session_closed".to_string(),
        }
    }
}

impl Default for SessionClosed {
    fn default() -> Self {
        Self::new()
    }
}

/// Response of the leave endpoint: the surviving session or the closed marker.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum LeaveGameResponse {
    /// Players remain; carries the updated session.
    Remaining(GameSnapshot),
    /// The departing player was the last one.
    Closed(SessionClosed),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> RaceSession {
        let mut game = RaceSession::new("AB12CD".into(), "p1".into(), "Ann".into());
        game.add_player("p2".into(), "Bob".into());
        game.start("Coffee".into(), "Moon".into()).unwrap();
        game.record_path("p1", "Tea".into()).unwrap();
        game
    }

    #[test]
    fn snapshot_serializes_with_the_wire_field_names() {
        let snapshot = GameSnapshot::from(sample_session());

        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(value["code"], "AB12CD");
        assert_eq!(value["state"], "playing");
        assert_eq!(value["startArticle"], "Coffee");
        assert_eq!(value["targetArticle"], "Moon");
        assert!(value["startTime"].is_string());
        assert!(value["endTime"].is_null());

        let players = value["players"].as_array().unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0]["id"], "p1");
        assert_eq!(players[0]["isLeader"], true);
        assert_eq!(players[0]["isWinner"], false);
        assert_eq!(players[0]["paths"], serde_json::json!(["Tea"]));
        assert_eq!(players[1]["id"], "p2");
        assert_eq!(players[1]["isLeader"], false);
    }

    #[test]
    fn snapshot_preserves_join_order() {
        let mut game = RaceSession::new("AB12CD".into(), "p1".into(), "Ann".into());
        game.add_player("p3".into(), "Cid".into());
        game.add_player("p2".into(), "Bob".into());

        let snapshot = GameSnapshot::from(game);

        let ids: Vec<&str> = snapshot.players.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3", "p2"]);
    }

    #[test]
    fn closed_marker_serializes_as_a_status_object() {
        let response = LeaveGameResponse::Closed(SessionClosed::new());

        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value, serde_json::json!({ "status": "session_closed" }));
    }

    #[test]
    fn camel_case_requests_deserialize() {
        let request: JoinGameRequest = serde_json::from_str(
            r#"{"gameCode": "AB12CD", "playerID": "p2", "playerName": "Bob"}"#,
        )
        .unwrap();

        assert_eq!(request.game_code, "AB12CD");
        assert_eq!(request.player_id, "p2");
        assert_eq!(request.player_name, "Bob");
    }
}
