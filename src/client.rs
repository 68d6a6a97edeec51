//! Blocking HTTP client for the tic-tac-toe game server.

use crate::api::GameApi;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientErrorKind};
use crate::response::{decode_board, decode_outcome, decode_players};
use crate::status::{NullSink, StatusSink};
use crate::types::{normalize_id, Board, MoveOutcome, Player, Position};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{StatusCode, Url};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Confirmation returned when the server adds a player without a body.
pub const PLAYER_ADDED: &str = "Player added successfully";

const CREATED: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED];
const CREATED_OR_EMPTY: &[StatusCode] = &[
    StatusCode::OK,
    StatusCode::CREATED,
    StatusCode::NO_CONTENT,
];
const FETCHED: &[StatusCode] = &[StatusCode::OK];

#[derive(Debug, Serialize)]
struct CreatePlayerRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct PlayerRequest<'a> {
    player_id: &'a str,
}

#[derive(Debug, Serialize)]
struct MakePlayRequest<'a> {
    player_id: &'a str,
    row: u8,
    col: u8,
}

/// Status and fully read body of one exchange.
#[derive(Debug)]
struct RawResponse {
    status: StatusCode,
    body: String,
}

/// HTTP client for the game server.
///
/// Holds no game state: every operation issues one request, reads the whole
/// response and translates it into a typed result or a [`ClientError`].
#[derive(Clone)]
pub struct GameClient {
    base_url: Url,
    client: Client,
    sink: Arc<dyn StatusSink>,
}

impl std::fmt::Debug for GameClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl GameClient {
    /// Creates a client from configuration.
    #[instrument(skip(config), fields(server_url = %config.server_url()))]
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(config.server_url()).map_err(|e| {
            error!(error = %e, "Invalid server URL");
            ClientError::validation(format!(
                "Invalid server URL {}: {}",
                config.server_url(),
                e
            ))
        })?;

        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ClientError::validation(format!(
                "Server URL must be an http(s) URL, got {}",
                base_url
            )));
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout() {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| {
            error!(error = %e, "Failed to build HTTP client");
            ClientError::new(ClientErrorKind::Transport(format!(
                "Failed to build HTTP client: {}",
                e
            )))
        })?;

        info!(base_url = %base_url, "Game client ready");
        Ok(Self {
            base_url,
            client,
            sink: Arc::new(NullSink),
        })
    }

    /// Routes status lines to `sink`.
    pub fn with_status_sink(mut self, sink: impl StatusSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the URL for a path below the base URL, encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::validation("Server URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a request and reads the whole body before looking at the status.
    fn send(&self, operation: &'static str, request: RequestBuilder) -> Result<RawResponse, ClientError> {
        let response = request.send().map_err(|e| {
            error!(operation, error = %e, "Failed to send request");
            ClientError::new(ClientErrorKind::Transport(format!(
                "Failed to send {} request: {}",
                operation, e
            )))
        })?;

        let status = response.status();
        let body = response.text().map_err(|e| {
            error!(operation, error = %e, "Failed to read response body");
            ClientError::new(ClientErrorKind::BodyRead(e.to_string()))
        })?;

        debug!(operation, status = %status, body = %body, "Received response");
        Ok(RawResponse { status, body })
    }

    /// Fails with the status text and body unless the status is accepted.
    fn accept(
        &self,
        operation: &'static str,
        raw: RawResponse,
        accepted: &[StatusCode],
    ) -> Result<RawResponse, ClientError> {
        if accepted.contains(&raw.status) {
            return Ok(raw);
        }
        warn!(operation, status = %raw.status, body = %raw.body, "Server rejected request");
        Err(ClientError::new(ClientErrorKind::Server {
            code: raw.status.as_u16(),
            status: raw.status.to_string(),
            body: raw.body,
        }))
    }

    /// Mirrors an error onto the status sink and hands it back.
    fn report<T>(&self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        if let Err(e) = &result {
            self.sink.status(&format!("Error: {}", e.kind));
        }
        result
    }

    fn require(value: &str, what: &str) -> Result<(), ClientError> {
        if value.is_empty() {
            return Err(ClientError::validation(format!("{} is empty", what)));
        }
        Ok(())
    }

    fn try_create_player(&self, name: &str) -> Result<String, ClientError> {
        if name.is_empty() {
            return Err(ClientError::validation("Please enter a player name"));
        }

        let url = self.endpoint(&["players"])?;
        let raw = self.send(
            "create player",
            self.client.post(url).json(&CreatePlayerRequest { name }),
        )?;
        let raw = self.accept("create player", raw, CREATED)?;

        info!(name, player_id = %raw.body, "Created player");
        self.sink.status(&format!(
            "Player created successfully! Player ID: {}",
            raw.body
        ));
        Ok(raw.body)
    }

    fn try_create_room(&self, player_id: &str) -> Result<String, ClientError> {
        let player_id = normalize_id(player_id);
        Self::require(player_id, "Player ID")?;

        let url = self.endpoint(&["rooms"])?;
        let raw = self.send(
            "create room",
            self.client.post(url).json(&PlayerRequest { player_id }),
        )?;
        let raw = self.accept("create room", raw, CREATED)?;

        info!(player_id, room_id = %raw.body, "Created room");
        self.sink
            .status(&format!("Room created successfully! Room ID: {}", raw.body));
        Ok(raw.body)
    }

    fn try_add_player(&self, room_id: &str, player_id: &str) -> Result<String, ClientError> {
        let room_id = normalize_id(room_id);
        let player_id = normalize_id(player_id);
        if room_id.is_empty() || player_id.is_empty() {
            return Err(ClientError::validation(
                "Please enter both room ID and player ID",
            ));
        }

        let url = self.endpoint(&["rooms", room_id, "players", "add"])?;
        let raw = self.send(
            "add player",
            self.client.put(url).json(&PlayerRequest { player_id }),
        )?;
        let raw = self.accept("add player", raw, CREATED_OR_EMPTY)?;

        let confirmation = if raw.status == StatusCode::NO_CONTENT {
            PLAYER_ADDED.to_string()
        } else {
            raw.body
        };
        info!(room_id, player_id, confirmation = %confirmation, "Added player to room");
        self.sink.status(&format!(
            "Player added to room {}: {}",
            room_id, confirmation
        ));
        Ok(confirmation)
    }

    fn try_get_players(&self, room_id: &str) -> Result<Vec<Player>, ClientError> {
        let room_id = normalize_id(room_id);
        Self::require(room_id, "Room ID")?;

        let url = self.endpoint(&["rooms", room_id, "players"])?;
        let raw = self.send("get players", self.client.get(url))?;
        let raw = self.accept("get players", raw, FETCHED)?;
        let players = decode_players(&raw.body)?;

        info!(room_id, count = players.len(), "Fetched players");
        self.sink.status(&format!(
            "Fetched {} players for room {}",
            players.len(),
            room_id
        ));
        Ok(players)
    }

    fn try_make_play(
        &self,
        room_id: &str,
        player_id: &str,
        row: u8,
        col: u8,
    ) -> Result<Board, ClientError> {
        let room_id = normalize_id(room_id);
        let player_id = normalize_id(player_id);
        if room_id.is_empty() || player_id.is_empty() {
            return Err(ClientError::validation("Room ID or player ID is empty"));
        }
        let pos = Position::new(row, col)?;

        let url = self.endpoint(&["rooms", room_id, "board"])?;
        let payload = MakePlayRequest {
            player_id,
            row: pos.row(),
            col: pos.col(),
        };
        let raw = self.send("make play", self.client.put(url).json(&payload))?;
        let raw = self.accept("make play", raw, CREATED)?;
        let board = decode_board(&raw.body)?;

        info!(room_id, player_id, row, col, "Play accepted");
        debug!(board = %board, "Board state");
        self.sink
            .status(&format!("Move accepted at row {}, col {}", row, col));
        Ok(board)
    }

    fn try_decide_result(&self, room_id: &str) -> Result<MoveOutcome, ClientError> {
        let room_id = normalize_id(room_id);
        Self::require(room_id, "Room ID")?;

        let url = self.endpoint(&["rooms", room_id, "board"])?;
        let raw = self.send("decide result", self.client.get(url))?;
        let raw = self.accept("decide result", raw, FETCHED)?;
        debug!(body = %raw.body, "Received decide result response");
        let outcome = decode_outcome(&raw.body)?;

        info!(room_id, outcome = %outcome, "Decided result");
        self.sink.status(&format!("Result: {}", outcome));
        Ok(outcome)
    }
}

impl GameApi for GameClient {
    #[instrument(skip(self))]
    fn create_player(&self, name: &str) -> Result<String, ClientError> {
        self.report(self.try_create_player(name))
    }

    #[instrument(skip(self))]
    fn create_room(&self, player_id: &str) -> Result<String, ClientError> {
        self.report(self.try_create_room(player_id))
    }

    #[instrument(skip(self))]
    fn add_player(&self, room_id: &str, player_id: &str) -> Result<String, ClientError> {
        self.report(self.try_add_player(room_id, player_id))
    }

    #[instrument(skip(self))]
    fn get_players(&self, room_id: &str) -> Result<Vec<Player>, ClientError> {
        self.report(self.try_get_players(room_id))
    }

    #[instrument(skip(self))]
    fn make_play(
        &self,
        room_id: &str,
        player_id: &str,
        row: u8,
        col: u8,
    ) -> Result<Board, ClientError> {
        self.report(self.try_make_play(room_id, player_id, row, col))
    }

    #[instrument(skip(self))]
    fn decide_result(&self, room_id: &str) -> Result<MoveOutcome, ClientError> {
        self.report(self.try_decide_result(room_id))
    }
}
