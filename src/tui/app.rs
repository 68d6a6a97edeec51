//! Application state and key handling.
//!
//! The screens mirror the game's lifecycle: the start screen registers a
//! player and opens a room, the room screen fills it, and the game screen
//! drives a [`GameSession`].

use crossterm::event::KeyCode;
use tictactoe_client::{
    normalize_id, GameApi, GameSession, Phase, Position, SessionError, StatusLine,
};
use tracing::{debug, info, instrument, warn};

use super::input::{digit_position, move_cursor};

/// Screen currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Player and room setup.
    Start,
    /// Filling an open room.
    Room,
    /// Board view.
    Game,
}

/// Focused input on the start screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartField {
    /// Name of the player to create.
    Name,
    /// Player that will own a new room.
    PlayerId,
    /// Room to open.
    RoomId,
}

impl StartField {
    fn next(self) -> Self {
        match self {
            StartField::Name => StartField::PlayerId,
            StartField::PlayerId => StartField::RoomId,
            StartField::RoomId => StartField::Name,
        }
    }

    fn previous(self) -> Self {
        match self {
            StartField::Name => StartField::RoomId,
            StartField::PlayerId => StartField::Name,
            StartField::RoomId => StartField::PlayerId,
        }
    }
}

/// Main application state.
pub struct App<A> {
    api: A,
    status: StatusLine,
    screen: Screen,
    focus: StartField,
    name: String,
    player_id: String,
    room_id: String,
    open_room: String,
    second_player_id: String,
    game: Option<GameSession>,
    cursor: Position,
    should_quit: bool,
}

impl<A: GameApi> App<A> {
    /// Creates a new application on the start screen.
    pub fn new(api: A, status: StatusLine) -> Self {
        Self {
            api,
            status,
            screen: Screen::Start,
            focus: StartField::Name,
            name: String::new(),
            player_id: String::new(),
            room_id: String::new(),
            open_room: String::new(),
            second_player_id: String::new(),
            game: None,
            cursor: Position::default(),
            should_quit: false,
        }
    }

    /// Handles one key press.
    #[instrument(skip(self), fields(screen = ?self.screen))]
    pub fn on_key(&mut self, key: KeyCode) {
        match self.screen {
            Screen::Start => self.on_start_key(key),
            Screen::Room => self.on_room_key(key),
            Screen::Game => self.on_game_key(key),
        }
    }

    fn on_start_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.previous(),
            KeyCode::Char(c) => self.focused_input().push(c),
            KeyCode::Backspace => {
                self.focused_input().pop();
            }
            KeyCode::Enter => match self.focus {
                StartField::Name => self.create_player(),
                StartField::PlayerId => self.create_room(),
                StartField::RoomId => self.enter_room(),
            },
            _ => {}
        }
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focus {
            StartField::Name => &mut self.name,
            StartField::PlayerId => &mut self.player_id,
            StartField::RoomId => &mut self.room_id,
        }
    }

    fn create_player(&mut self) {
        if let Ok(id) = self.api.create_player(&self.name) {
            info!(player_id = %id, "Player created");
            self.player_id = id;
            self.focus = StartField::PlayerId;
        }
    }

    fn create_room(&mut self) {
        if let Ok(id) = self.api.create_room(&self.player_id) {
            info!(room_id = %id, "Room created");
            self.room_id = id;
            self.focus = StartField::RoomId;
        }
    }

    fn enter_room(&mut self) {
        let room = normalize_id(&self.room_id);
        if room.is_empty() {
            warn!("Room ID is empty");
            self.status.set("Error: Please enter a room ID");
            return;
        }
        self.open_room = room.to_string();
        self.screen = Screen::Room;
        self.status.set(format!("Room: {}", self.open_room));
    }

    fn on_room_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.screen = Screen::Start;
                self.status.clear();
            }
            KeyCode::Char(c) => self.second_player_id.push(c),
            KeyCode::Backspace => {
                self.second_player_id.pop();
            }
            KeyCode::Enter => {
                if let Ok(confirmation) =
                    self.api.add_player(&self.open_room, &self.second_player_id)
                {
                    debug!(confirmation = %confirmation, "Second player added");
                }
            }
            KeyCode::F(2) => self.start_game(),
            _ => {}
        }
    }

    fn start_game(&mut self) {
        match GameSession::start(&self.api, &self.open_room) {
            Ok(game) => {
                self.status.set(turn_message(&game));
                self.game = Some(game);
                self.cursor = Position::default();
                self.screen = Screen::Game;
            }
            Err(e) => self.report(e),
        }
    }

    fn on_game_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.game = None;
                self.screen = Screen::Room;
                self.status.clear();
            }
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('r') => self.recheck(),
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.play(self.cursor),
            other => {
                if let Some(pos) = digit_position(other) {
                    self.cursor = pos;
                    self.play(pos);
                }
            }
        }
    }

    fn play(&mut self, pos: Position) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        self.status.clear();
        let result = game.play(&self.api, pos).cloned();
        self.show_phase(result);
    }

    /// Asks the server again for the outcome of the last accepted move.
    fn recheck(&mut self) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        self.status.clear();
        let result = game.settle(&self.api).cloned();
        self.show_phase(result);
    }

    fn show_phase(&self, result: Result<Phase, SessionError>) {
        let message = match result {
            Ok(Phase::InPlay) => self.game.as_ref().map(turn_message).unwrap_or_default(),
            Ok(Phase::Draw) => "Stalemate: No winner!".to_string(),
            Ok(Phase::Won(winner)) => format!("Winner: {}!", winner.name()),
            Err(e) => {
                self.report(e);
                return;
            }
        };
        self.status.set(message);
    }

    /// Shows session failures the client has not already reported.
    fn report(&self, err: SessionError) {
        match err {
            SessionError::Client(e) => debug!(error = %e, "Client error already reported"),
            other => {
                warn!(error = %other, "Session error");
                self.status.set(format!("Error: {}", other));
            }
        }
    }

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Focused start-screen input.
    pub fn focus(&self) -> StartField {
        self.focus
    }

    /// Start-screen inputs: name, player id, room id.
    pub fn start_inputs(&self) -> [(StartField, &str); 3] {
        [
            (StartField::Name, self.name.as_str()),
            (StartField::PlayerId, self.player_id.as_str()),
            (StartField::RoomId, self.room_id.as_str()),
        ]
    }

    /// Room shown on the room screen.
    pub fn open_room_id(&self) -> &str {
        &self.open_room
    }

    /// Second player input on the room screen.
    pub fn second_player_id(&self) -> &str {
        &self.second_player_id
    }

    /// Running game, if any.
    pub fn game(&self) -> Option<&GameSession> {
        self.game.as_ref()
    }

    /// Board cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Latest status message.
    pub fn status(&self) -> String {
        self.status.get()
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Requests exit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

fn turn_message(game: &GameSession) -> String {
    format!("Current player: {}", game.active_player())
}
