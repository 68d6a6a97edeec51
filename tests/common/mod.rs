//! Local HTTP servers for exercising the client over real sockets.

#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tictactoe_client::{ClientConfig, GameClient};

/// Serves `router` on an ephemeral port from a background runtime.
///
/// The listener is bound before returning, so requests may be sent at once.
pub fn serve(router: Router) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    listener.set_nonblocking(true).expect("set nonblocking");
    let addr = listener.local_addr().expect("local addr");

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("build runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
            axum::serve(listener, router).await.expect("serve");
        });
    });

    format!("http://{}", addr)
}

/// Client pointed at `url` with a short timeout.
pub fn client_for(url: &str) -> GameClient {
    let config = ClientConfig::default()
        .with_server_url(url)
        .with_timeout_secs(5);
    GameClient::new(&config).expect("client")
}

/// One request as seen by the canned server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

impl RecordedRequest {
    /// Body parsed as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

/// Answers every request with the same status and body and records it.
pub struct CannedServer {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl CannedServer {
    pub fn start(status: u16, body: &str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let status = StatusCode::from_u16(status).expect("valid status");
        let body = body.to_string();

        let router = Router::new().fallback(move |method: Method, uri: Uri, payload: String| {
            let recorded = Arc::clone(&recorded);
            let body = body.clone();
            async move {
                recorded.lock().unwrap().push(RecordedRequest {
                    method: method.to_string(),
                    path: uri.path().to_string(),
                    body: payload,
                });
                (status, body)
            }
        });

        Self {
            url: serve(router),
            requests,
        }
    }

    pub fn client(&self) -> GameClient {
        client_for(&self.url)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Returns a URL nothing is listening on.
pub fn closed_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

// ---------------------------------------------------------------------------
// In-memory game server with the same endpoints as the real one
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Room {
    first: String,
    second: Option<String>,
    cells: [[&'static str; 3]; 3],
    turn: usize,
}

#[derive(Debug, Default)]
struct Game {
    names: HashMap<String, String>,
    rooms: HashMap<String, Room>,
    next_id: u64,
}

impl Game {
    fn new_id(&mut self) -> String {
        self.next_id += 1;
        format!("00000000-0000-4000-8000-{:012}", self.next_id)
    }
}

type Shared = Arc<Mutex<Game>>;

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct PlayerBody {
    player_id: String,
}

#[derive(Deserialize)]
struct PlayBody {
    player_id: String,
    row: i64,
    col: i64,
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "detail": message }))).into_response()
}

fn winner_symbol(cells: &[[&'static str; 3]; 3]) -> Option<&'static str> {
    let lines = [
        [(0, 0), (0, 1), (0, 2)],
        [(1, 0), (1, 1), (1, 2)],
        [(2, 0), (2, 1), (2, 2)],
        [(0, 0), (1, 0), (2, 0)],
        [(0, 1), (1, 1), (2, 1)],
        [(0, 2), (1, 2), (2, 2)],
        [(0, 0), (1, 1), (2, 2)],
        [(0, 2), (1, 1), (2, 0)],
    ];
    lines.iter().find_map(|line| {
        let first = cells[line[0].0][line[0].1];
        (first != " " && line.iter().all(|&(r, c)| cells[r][c] == first)).then_some(first)
    })
}

async fn create_player(State(game): State<Shared>, Json(body): Json<NameBody>) -> Response {
    let mut game = game.lock().unwrap();
    let id = game.new_id();
    game.names.insert(id.clone(), body.name);
    (StatusCode::CREATED, Json(id)).into_response()
}

async fn create_room(State(game): State<Shared>, Json(body): Json<PlayerBody>) -> Response {
    let mut game = game.lock().unwrap();
    if !game.names.contains_key(&body.player_id) {
        return detail(StatusCode::NOT_FOUND, "Player with given id not found");
    }
    let room_id = game.new_id();
    let room = Room {
        first: body.player_id,
        cells: [[" "; 3]; 3],
        ..Room::default()
    };
    game.rooms.insert(room_id.clone(), room);
    (StatusCode::CREATED, Json(room_id)).into_response()
}

async fn add_player(
    State(game): State<Shared>,
    Path(room_id): Path<String>,
    Json(body): Json<PlayerBody>,
) -> Response {
    let mut game = game.lock().unwrap();
    if !game.names.contains_key(&body.player_id) {
        return detail(StatusCode::NOT_FOUND, "Player with given id not found");
    }
    let Some(room) = game.rooms.get_mut(&room_id) else {
        return detail(StatusCode::NOT_FOUND, "Room with given id not found");
    };
    if room.second.is_some() {
        return detail(
            StatusCode::NOT_ACCEPTABLE,
            "Room cannot have more than two players",
        );
    }
    if room.first == body.player_id {
        return detail(
            StatusCode::NOT_ACCEPTABLE,
            "Room cannot have multiple instances of the same player",
        );
    }
    room.second = Some(body.player_id);
    StatusCode::NO_CONTENT.into_response()
}

async fn get_players(State(game): State<Shared>, Path(room_id): Path<String>) -> Response {
    let game = game.lock().unwrap();
    let Some(room) = game.rooms.get(&room_id) else {
        return detail(StatusCode::NOT_FOUND, "Room with given id not found");
    };
    let Some(second) = &room.second else {
        return detail(StatusCode::BAD_REQUEST, "Room is required to have two players");
    };
    let players: Vec<_> = [(&room.first, "X"), (second, "O")]
        .into_iter()
        .map(|(id, symbol)| {
            serde_json::json!({ "player_id": id, "name": game.names[id], "symbol": symbol })
        })
        .collect();
    Json(players).into_response()
}

async fn make_play(
    State(game): State<Shared>,
    Path(room_id): Path<String>,
    Json(body): Json<PlayBody>,
) -> Response {
    let mut game = game.lock().unwrap();
    if !game.names.contains_key(&body.player_id) {
        return detail(StatusCode::NOT_FOUND, "Player with given id not found");
    }
    let Some(room) = game.rooms.get_mut(&room_id) else {
        return detail(StatusCode::NOT_FOUND, "Room with given id not found");
    };
    let seat = if body.player_id == room.first { 0 } else { 1 };
    if seat != room.turn % 2 {
        return detail(StatusCode::FORBIDDEN, "Player tried acting outside their turn");
    }
    if !(1..=3).contains(&body.row) || !(1..=3).contains(&body.col) {
        return detail(StatusCode::NOT_ACCEPTABLE, "Player's input was incorrect");
    }
    let cell = &mut room.cells[body.row as usize - 1][body.col as usize - 1];
    if *cell != " " {
        return detail(StatusCode::BAD_REQUEST, "Player attempted an impossible play");
    }
    *cell = if seat == 0 { "X" } else { "O" };
    room.turn += 1;
    Json(room.cells).into_response()
}

async fn decide_result(State(game): State<Shared>, Path(room_id): Path<String>) -> Response {
    let game = game.lock().unwrap();
    let Some(room) = game.rooms.get(&room_id) else {
        return detail(StatusCode::NOT_FOUND, "Room with given id not found");
    };
    match winner_symbol(&room.cells) {
        Some("X") => Json(room.first.clone()).into_response(),
        Some(_) => Json(room.second.clone().unwrap_or_default()).into_response(),
        None if room.cells.iter().flatten().all(|c| *c != " ") => {
            Json(serde_json::json!({ "next_turn": "NO" })).into_response()
        }
        None => Json(serde_json::json!({ "next_turn": "YES" })).into_response(),
    }
}

/// Starts the in-memory game server and returns its URL.
pub fn start_game_server() -> String {
    let router = Router::new()
        .route("/players", post(create_player))
        .route("/rooms", post(create_room))
        .route("/rooms/{room_id}/players/add", put(add_player))
        .route("/rooms/{room_id}/players", get(get_players))
        .route("/rooms/{room_id}/board", put(make_play).get(decide_result))
        .with_state(Shared::default());
    serve(router)
}
