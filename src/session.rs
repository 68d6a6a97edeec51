//! Caller-owned game flow for one room.
//!
//! The client itself is stateless; this module keeps the little state a front
//! end needs (who is to move, the latest board, whether the game is over) and
//! re-derives everything else from the server through a [`GameApi`].

use crate::api::GameApi;
use crate::error::ClientError;
use crate::types::{normalize_id, Board, MoveOutcome, Player, Position};
use derive_more::{Display, Error};
use tracing::{debug, info, instrument, warn};

/// Where the game stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Moves are being accepted.
    InPlay,
    /// Board full, nobody won.
    Draw,
    /// The given player won.
    Won(Player),
}

impl Phase {
    /// Returns true once the game has ended.
    pub fn is_over(&self) -> bool {
        !matches!(self, Phase::InPlay)
    }
}

/// Failure while driving a game.
#[derive(Debug, Clone, Display, Error)]
pub enum SessionError {
    /// A client operation failed.
    #[display("{}", _0.kind)]
    Client(ClientError),
    /// The room does not hold exactly two players.
    #[display("Two players are required to start the game, found {}", found)]
    PlayerCount {
        /// Number of players the server reported.
        found: usize,
    },
    /// The server named a winner that is not in this room.
    #[display("Winner {} is not a player in this room", winner_id)]
    UnknownWinner {
        /// Identifier the server returned.
        winner_id: String,
    },
    /// The game has already ended.
    #[display("The game is over")]
    GameOver,
}

impl From<ClientError> for SessionError {
    fn from(err: ClientError) -> Self {
        SessionError::Client(err)
    }
}

/// A game in progress between the two players of a room.
#[derive(Debug, Clone)]
pub struct GameSession {
    room_id: String,
    players: [Player; 2],
    active: usize,
    board: Board,
    phase: Phase,
}

impl GameSession {
    /// Fetches the room's players and starts a game if there are exactly two.
    #[instrument(skip(api))]
    pub fn start(api: &impl GameApi, room_id: &str) -> Result<Self, SessionError> {
        let room_id = normalize_id(room_id).to_string();
        let players = api.get_players(&room_id)?;

        let players: [Player; 2] = players.try_into().map_err(|players: Vec<Player>| {
            warn!(count = players.len(), "Invalid number of players");
            SessionError::PlayerCount {
                found: players.len(),
            }
        })?;

        info!(
            room_id = %room_id,
            first = %players[0],
            second = %players[1],
            "Game started"
        );
        Ok(Self {
            room_id,
            players,
            active: 0,
            board: Board::new(),
            phase: Phase::InPlay,
        })
    }

    /// Plays the active player's mark, then asks the server for the outcome.
    #[instrument(skip(self, api), fields(room_id = %self.room_id))]
    pub fn play(&mut self, api: &impl GameApi, pos: Position) -> Result<&Phase, SessionError> {
        if self.phase.is_over() {
            return Err(SessionError::GameOver);
        }

        let player = &self.players[self.active];
        let board = api.make_play(&self.room_id, player.player_id(), pos.row(), pos.col())?;
        info!(player = %player, position = %pos, "Placed mark");
        self.board = board;

        self.settle(api)
    }

    /// Asks the server for the outcome of the last move and applies it.
    ///
    /// Safe to call again after a failure; the turn only passes on `Continue`.
    #[instrument(skip(self, api), fields(room_id = %self.room_id))]
    pub fn settle(&mut self, api: &impl GameApi) -> Result<&Phase, SessionError> {
        if self.phase.is_over() {
            return Ok(&self.phase);
        }

        match api.decide_result(&self.room_id)? {
            MoveOutcome::Continue => {
                self.active = 1 - self.active;
                debug!(next = %self.players[self.active], "Switched player");
            }
            MoveOutcome::Draw => {
                info!("Game ended: Stalemate");
                self.phase = Phase::Draw;
            }
            MoveOutcome::Winner(winner_id) => {
                let winner = self
                    .players
                    .iter()
                    .find(|p| p.has_id(&winner_id))
                    .cloned()
                    .ok_or_else(|| {
                        warn!(winner_id = %winner_id, "Winner is not in this room");
                        SessionError::UnknownWinner {
                            winner_id: winner_id.clone(),
                        }
                    })?;
                info!(winner = %winner, "Game ended with a winner");
                self.phase = Phase::Won(winner);
            }
        }
        Ok(&self.phase)
    }

    /// Room the game is played in.
    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Both players in join order.
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Player whose turn it is.
    pub fn active_player(&self) -> &Player {
        &self.players[self.active]
    }

    /// Latest board returned by the server.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }
}
