use std::fmt;
use std::time::SystemTime;

use indexmap::IndexMap;
use thiserror::Error;

/// Lifecycle phase of a race session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceState {
    /// Lobby: players gather, articles can still change.
    Waiting,
    /// Race in progress, paths are being recorded.
    Playing,
    /// A player reached the target article.
    Finished,
}

impl RaceState {
    /// Lowercase wire name of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            RaceState::Waiting => "waiting",
            RaceState::Playing => "playing",
            RaceState::Finished => "finished",
        }
    }
}

impl fmt::Display for RaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player info tracked during a race session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Opaque client-generated identifier, unique within the session.
    pub id: String,
    /// Display name chosen by the player, not required to be unique.
    pub name: String,
    /// Whether this player currently leads the session.
    pub is_leader: bool,
    /// Whether this player won the current race.
    pub is_winner: bool,
    /// Ordered article titles visited during the current race.
    pub paths: Vec<String>,
}

impl Player {
    fn new(id: String, name: String, is_leader: bool) -> Self {
        Self {
            id,
            name,
            is_leader,
            is_winner: false,
            paths: Vec::new(),
        }
    }
}

/// Aggregated state for one multiplayer race, keyed by its join code.
#[derive(Debug, Clone)]
pub struct RaceSession {
    /// Six-character uppercase alphanumeric join code, primary key.
    pub code: String,
    /// Participating players keyed by id, in join order.
    pub players: IndexMap<String, Player>,
    /// Current lifecycle phase.
    pub state: RaceState,
    /// Article every player starts from; empty until configured.
    pub start_article: String,
    /// Article that ends the race; empty until configured.
    pub target_article: String,
    /// When the race left the lobby, if it has.
    pub started_at: Option<SystemTime>,
    /// When the winning article was recorded, if the race is over.
    pub finished_at: Option<SystemTime>,
}

/// Invalid operations against a single session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The referenced player is not a member of the session.
    #[error("player `{player_id}` is not part of game `{code}`")]
    UnknownPlayer {
        /// Session join code.
        code: String,
        /// Identifier that was looked up.
        player_id: String,
    },
    /// The operation is not allowed in the session's current state.
    #[error("cannot {action} while game `{code}` is {state}")]
    InvalidTransition {
        /// Session join code.
        code: String,
        /// Human-readable name of the rejected operation.
        action: &'static str,
        /// State the session was in when the operation arrived.
        state: RaceState,
    },
}

/// What happened to the session after a player left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Departure {
    /// Other players remain. Carries the id of the newly promoted leader
    /// when leadership moved.
    Remaining {
        /// Id of the player promoted to leader, if any.
        promoted: Option<String>,
    },
    /// The departing player was the last one; the session should be dropped.
    Empty,
}

/// Outcome of recording an article on a player's path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOutcome {
    /// Article appended; the race continues.
    Recorded,
    /// Article matched the target; the player won and the race finished.
    Won,
    /// The race was already over; nothing changed.
    AlreadyOver,
}

impl RaceSession {
    /// Build a fresh waiting session with its creator as sole leader.
    pub fn new(code: String, leader_id: String, leader_name: String) -> Self {
        let mut players = IndexMap::new();
        players.insert(
            leader_id.clone(),
            Player::new(leader_id, leader_name, true),
        );

        Self {
            code,
            players,
            state: RaceState::Waiting,
            start_article: String::new(),
            target_article: String::new(),
            started_at: None,
            finished_at: None,
        }
    }

    /// Add a non-leader player. Returns `false` without touching anything
    /// when the id is already a member, so repeated joins are idempotent.
    pub fn add_player(&mut self, id: String, name: String) -> bool {
        if self.players.contains_key(&id) {
            return false;
        }

        self.players
            .insert(id.clone(), Player::new(id, name, false));
        true
    }

    /// Remove a player, promoting the earliest-joined survivor when the
    /// leader departs.
    pub fn remove_player(&mut self, player_id: &str) -> Result<Departure, SessionError> {
        // shift_remove keeps join order for the survivors.
        let Some(removed) = self.players.shift_remove(player_id) else {
            return Err(SessionError::UnknownPlayer {
                code: self.code.clone(),
                player_id: player_id.to_string(),
            });
        };

        if self.players.is_empty() {
            return Ok(Departure::Empty);
        }

        let mut promoted = None;
        if removed.is_leader {
            if let Some((id, player)) = self.players.iter_mut().next() {
                player.is_leader = true;
                promoted = Some(id.clone());
            }
        }

        Ok(Departure::Remaining { promoted })
    }

    /// Replace both articles while still in the lobby.
    pub fn set_articles(
        &mut self,
        start_article: String,
        target_article: String,
    ) -> Result<(), SessionError> {
        if self.state != RaceState::Waiting {
            return Err(SessionError::InvalidTransition {
                code: self.code.clone(),
                action: "update articles",
                state: self.state,
            });
        }

        self.start_article = start_article;
        self.target_article = target_article;
        Ok(())
    }

    /// Leave the lobby: pin the articles and start the clock.
    pub fn start(
        &mut self,
        start_article: String,
        target_article: String,
    ) -> Result<(), SessionError> {
        if self.state != RaceState::Waiting {
            return Err(SessionError::InvalidTransition {
                code: self.code.clone(),
                action: "start the race",
                state: self.state,
            });
        }

        self.start_article = start_article;
        self.target_article = target_article;
        self.state = RaceState::Playing;
        self.started_at = Some(SystemTime::now());
        Ok(())
    }

    /// Append an article to a player's path, detecting a win on the target.
    ///
    /// A finished race accepts the call but changes nothing: the losing
    /// racer's in-flight click must converge on the final snapshot.
    pub fn record_path(
        &mut self,
        player_id: &str,
        article: String,
    ) -> Result<PathOutcome, SessionError> {
        match self.state {
            RaceState::Finished => return Ok(PathOutcome::AlreadyOver),
            RaceState::Waiting => {
                return Err(SessionError::InvalidTransition {
                    code: self.code.clone(),
                    action: "record a path",
                    state: self.state,
                });
            }
            RaceState::Playing => {}
        }

        let Some(player) = self.players.get_mut(player_id) else {
            return Err(SessionError::UnknownPlayer {
                code: self.code.clone(),
                player_id: player_id.to_string(),
            });
        };

        let won = article == self.target_article;
        player.paths.push(article);

        if won {
            player.is_winner = true;
            self.state = RaceState::Finished;
            self.finished_at = Some(SystemTime::now());
            return Ok(PathOutcome::Won);
        }

        Ok(PathOutcome::Recorded)
    }

    /// Return to the lobby for a rematch: clear paths, winner flags and
    /// timestamps while keeping players and articles.
    pub fn reset(&mut self) {
        for player in self.players.values_mut() {
            player.paths.clear();
            player.is_winner = false;
        }
        self.state = RaceState::Waiting;
        self.started_at = None;
        self.finished_at = None;
    }

    /// Current leader, if any. Sessions with players always have exactly one.
    pub fn leader(&self) -> Option<&Player> {
        self.players.values().find(|player| player.is_leader)
    }

    /// Player that won the current race, if it is over.
    pub fn winner(&self) -> Option<&Player> {
        self.players.values().find(|player| player.is_winner)
    }
}
