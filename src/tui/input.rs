//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;
use tictactoe_client::Position;

/// Moves cursor based on arrow keys, stopping at the board edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1).max(1), col),
        KeyCode::Down => ((row + 1).min(3), col),
        KeyCode::Left => (row, col.saturating_sub(1).max(1)),
        KeyCode::Right => (row, (col + 1).min(3)),
        _ => return cursor,
    };
    Position::new(row, col).unwrap_or(cursor)
}

/// Maps keypad digits 1-9 to board positions in reading order.
pub fn digit_position(key: KeyCode) -> Option<Position> {
    match key {
        KeyCode::Char(c) => c
            .to_digit(10)
            .filter(|d| (1..=9).contains(d))
            .and_then(|d| Position::from_index(d as usize - 1)),
        _ => None,
    }
}
