//! Game operations as seen by callers.

use crate::error::ClientError;
use crate::types::{Board, MoveOutcome, Player};

/// The game server's operations.
///
/// Every call is synchronous and independent; implementors keep no game state
/// between calls.
pub trait GameApi {
    /// Registers a player and returns the server-assigned identifier.
    fn create_player(&self, name: &str) -> Result<String, ClientError>;

    /// Creates a room owned by a player and returns the room identifier.
    fn create_room(&self, player_id: &str) -> Result<String, ClientError>;

    /// Adds a player to a room and returns a confirmation message.
    fn add_player(&self, room_id: &str, player_id: &str) -> Result<String, ClientError>;

    /// Lists the players of a room in join order.
    fn get_players(&self, room_id: &str) -> Result<Vec<Player>, ClientError>;

    /// Places the player's mark at 1-indexed `row`, `col` and returns the board.
    fn make_play(
        &self,
        room_id: &str,
        player_id: &str,
        row: u8,
        col: u8,
    ) -> Result<Board, ClientError>;

    /// Asks whether the game continues, is drawn, or has a winner.
    fn decide_result(&self, room_id: &str) -> Result<MoveOutcome, ClientError>;
}

impl<A: GameApi + ?Sized> GameApi for &A {
    fn create_player(&self, name: &str) -> Result<String, ClientError> {
        (**self).create_player(name)
    }

    fn create_room(&self, player_id: &str) -> Result<String, ClientError> {
        (**self).create_room(player_id)
    }

    fn add_player(&self, room_id: &str, player_id: &str) -> Result<String, ClientError> {
        (**self).add_player(room_id, player_id)
    }

    fn get_players(&self, room_id: &str) -> Result<Vec<Player>, ClientError> {
        (**self).get_players(room_id)
    }

    fn make_play(
        &self,
        room_id: &str,
        player_id: &str,
        row: u8,
        col: u8,
    ) -> Result<Board, ClientError> {
        (**self).make_play(room_id, player_id, row, col)
    }

    fn decide_result(&self, room_id: &str) -> Result<MoveOutcome, ClientError> {
        (**self).decide_result(room_id)
    }
}
