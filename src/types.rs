//! Core domain types shared by the client and the game flow.

use crate::error::ClientError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// Removes surrounding whitespace and quote characters from an identifier.
///
/// Identifiers are often captured from a raw response body that is itself a
/// JSON string (`"\"3f2c...\""`), so both forms must address the same entity.
pub fn normalize_id(id: &str) -> &str {
    id.trim().trim_matches('"').trim()
}

/// A player as reported by the server for a room.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Player {
    /// Server-assigned identifier.
    player_id: String,
    /// Display name.
    name: String,
    /// Mark assigned within the room (`X` or `O`).
    symbol: String,
}

impl Player {
    /// Creates a player record.
    pub fn new(
        player_id: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            player_id: player_id.into(),
            name: name.into(),
            symbol: symbol.into(),
        }
    }

    /// Returns true if `id` names this player, ignoring surrounding quotes.
    pub fn has_id(&self, id: &str) -> bool {
        normalize_id(&self.player_id) == normalize_id(id)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}

/// A square on the board as it travels over the wire.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::AsRefStr,
)]
pub enum Cell {
    /// Unoccupied square.
    #[default]
    #[serde(rename = " ")]
    #[strum(serialize = " ")]
    Empty,
    /// Square marked by the first player.
    X,
    /// Square marked by the second player.
    O,
}

impl Cell {
    /// Returns true if nobody has played here.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// A 1-indexed board coordinate, valid by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Creates a position, rejecting coordinates outside `1..=3`.
    #[track_caller]
    #[instrument]
    pub fn new(row: u8, col: u8) -> Result<Self, ClientError> {
        if !(1..=3).contains(&row) || !(1..=3).contains(&col) {
            return Err(ClientError::validation(format!(
                "Row and column must be between 1 and 3, got row={} col={}",
                row, col
            )));
        }
        Ok(Self { row, col })
    }

    /// Converts from a row-major index (0-8).
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= 9 {
            return None;
        }
        Some(Self {
            row: (index / 3) as u8 + 1,
            col: (index % 3) as u8 + 1,
        })
    }

    /// Converts to a row-major index (0-8).
    pub fn to_index(self) -> usize {
        (self.row as usize - 1) * 3 + (self.col as usize - 1)
    }

    /// Row, 1-3.
    pub fn row(self) -> u8 {
        self.row
    }

    /// Column, 1-3.
    pub fn col(self) -> u8 {
        self.col
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { row: 1, col: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, col {}", self.row, self.col)
    }
}

/// Authoritative 3x3 board snapshot returned by the server.
///
/// Deserializes only from exactly three rows of exactly three cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    rows: [[Cell; 3]; 3],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from rows.
    pub fn from_rows(rows: [[Cell; 3]; 3]) -> Self {
        Self { rows }
    }

    /// Gets the cell at a position.
    pub fn get(&self, pos: Position) -> Cell {
        self.rows[pos.row as usize - 1][pos.col as usize - 1]
    }

    /// Returns the rows, top to bottom.
    pub fn rows(&self) -> &[[Cell; 3]; 3] {
        &self.rows
    }

    /// Returns true if every cell is empty.
    pub fn is_clear(&self) -> bool {
        self.rows.iter().flatten().all(|cell| cell.is_empty())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f, "---+---+---")?;
            }
            writeln!(
                f,
                " {} | {} | {} ",
                row[0].as_ref(),
                row[1].as_ref(),
                row[2].as_ref()
            )?;
        }
        Ok(())
    }
}

/// Result of asking the server whether the game is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nobody has won and free cells remain; the next turn proceeds.
    Continue,
    /// The board is full with no winner.
    Draw,
    /// The game is over; carries the winning player's identifier.
    Winner(String),
}

impl MoveOutcome {
    /// Returns true for `Draw` and `Winner`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MoveOutcome::Continue)
    }
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveOutcome::Continue => write!(f, "Continue"),
            MoveOutcome::Draw => write!(f, "Draw"),
            MoveOutcome::Winner(id) => write!(f, "Winner: {}", id),
        }
    }
}
