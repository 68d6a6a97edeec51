//! Command-line interface for tictactoe_client.

use clap::{Parser, Subcommand};

/// Tic-tac-toe client - play against a remote game server
#[derive(Parser, Debug)]
#[command(name = "tictactoe_client")]
#[command(about = "Client for a networked tic-tac-toe server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the client configuration file
    #[arg(short, long, global = true, default_value = "tictactoe_client.toml")]
    pub config: std::path::PathBuf,

    /// Game server URL, overrides the config file and environment
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a player and print its identifier
    CreatePlayer {
        /// Display name
        name: String,
    },

    /// Create a room owned by a player and print the room identifier
    CreateRoom {
        /// Identifier of the owning player
        player_id: String,
    },

    /// Add a second player to a room
    AddPlayer {
        /// Room identifier
        room_id: String,
        /// Identifier of the joining player
        player_id: String,
    },

    /// List the players of a room
    Players {
        /// Room identifier
        room_id: String,
    },

    /// Place a player's mark and print the board
    Play {
        /// Room identifier
        room_id: String,
        /// Identifier of the moving player
        player_id: String,
        /// Row, 1-3
        row: u8,
        /// Column, 1-3
        col: u8,
    },

    /// Ask whether the game continues, is drawn, or has a winner
    Result {
        /// Room identifier
        room_id: String,
    },

    /// Run the terminal UI
    Tui,
}
