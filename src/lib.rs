//! Tic-tac-toe client library - typed access to a remote game server
//!
//! All game state lives on the server. This crate turns game actions into
//! HTTP requests and server responses into typed results or typed errors.
//!
//! # Architecture
//!
//! - **Client**: [`GameClient`], a stateless blocking HTTP client
//! - **Api**: [`GameApi`], the operation set the client implements
//! - **Session**: [`GameSession`], caller-owned turn tracking for one room
//! - **Status**: [`StatusSink`], a human-readable side channel for front ends
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_client::{ClientConfig, GameApi, GameClient, GameSession, Position};
//!
//! # fn example() -> anyhow::Result<()> {
//! let client = GameClient::new(&ClientConfig::default())?;
//! let alice = client.create_player("Alice")?;
//! let bob = client.create_player("Bob")?;
//! let room = client.create_room(&alice)?;
//! client.add_player(&room, &bob)?;
//!
//! let mut game = GameSession::start(&client, &room)?;
//! game.play(&client, Position::new(1, 1)?)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod api;
mod client;
mod config;
mod error;
mod response;
mod session;
mod status;
mod types;

// Crate-level exports - Operations
pub use api::GameApi;
pub use client::{GameClient, PLAYER_ADDED};

// Crate-level exports - Configuration
pub use config::{ClientConfig, ConfigError, SERVER_URL_ENV};

// Crate-level exports - Errors
pub use error::{ClientError, ClientErrorKind};

// Crate-level exports - Wire decoding
pub use response::{decode_board, decode_outcome, decode_players};

// Crate-level exports - Game flow
pub use session::{GameSession, Phase, SessionError};

// Crate-level exports - Status side channel
pub use status::{NullSink, StatusLine, StatusSink};

// Crate-level exports - Domain types
pub use types::{normalize_id, Board, Cell, MoveOutcome, Player, Position};
