//! Decoding of server response bodies into domain types.

use crate::error::{ClientError, ClientErrorKind};
use crate::types::{Board, MoveOutcome, Player};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

/// Continuation flag reported while no winner exists yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
enum NextTurn {
    /// Game goes on.
    Yes,
    /// Stalemate.
    No,
}

/// Decodes the player list of a room.
///
/// Each player's symbol must be a single character.
#[instrument(skip(body))]
pub fn decode_players(body: &str) -> Result<Vec<Player>, ClientError> {
    let players: Vec<Player> = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, body = %body, "Failed to parse players response");
        ClientError::decode(format!("Failed to parse players response: {}", e))
    })?;

    if let Some(player) = players.iter().find(|p| p.symbol().chars().count() != 1) {
        warn!(symbol = %player.symbol(), "Player symbol is not a single character");
        return Err(ClientError::decode(format!(
            "Player {} has invalid symbol {:?}",
            player.player_id(),
            player.symbol()
        )));
    }

    Ok(players)
}

/// Decodes a full 3x3 board snapshot.
#[instrument(skip(body))]
pub fn decode_board(body: &str) -> Result<Board, ClientError> {
    serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, body = %body, "Failed to parse board response");
        ClientError::decode(format!("Failed to parse board response: {}", e))
    })
}

/// Decodes the polymorphic result endpoint body.
///
/// The endpoint returns either a JSON string holding the winner's identifier
/// or an object `{"next_turn": "YES" | "NO"}`. There is no discriminator
/// field, so the shape is chosen from the first non-whitespace byte before
/// any typed parse is attempted.
#[instrument(skip(body))]
pub fn decode_outcome(body: &str) -> Result<MoveOutcome, ClientError> {
    match body.trim_start().as_bytes().first() {
        Some(b'"') => decode_winner(body),
        Some(b'{') => decode_next_turn(body),
        _ => {
            warn!(body = %body, "Unexpected decide result response format");
            Err(ClientError::new(ClientErrorKind::AmbiguousResponse(
                body.to_string(),
            )))
        }
    }
}

fn decode_winner(body: &str) -> Result<MoveOutcome, ClientError> {
    let winner_id: String = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "Failed to parse winner ID");
        ClientError::decode(format!("Failed to parse winner ID: {}", e))
    })?;

    if winner_id.trim().is_empty() {
        warn!("Winner ID is empty");
        return Err(ClientError::decode("Winner ID is empty"));
    }

    debug!(winner_id = %winner_id, "Parsed winner ID");
    Ok(MoveOutcome::Winner(winner_id))
}

fn decode_next_turn(body: &str) -> Result<MoveOutcome, ClientError> {
    let mut object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(body)
        .map_err(|e| {
            warn!(error = %e, "Failed to parse next turn response");
            ClientError::decode(format!("Failed to parse next turn response: {}", e))
        })?;

    let value = object.remove("next_turn").ok_or_else(|| {
        warn!(body = %body, "Object has no next_turn field");
        ClientError::new(ClientErrorKind::AmbiguousResponse(body.to_string()))
    })?;

    let next_turn = NextTurn::deserialize(&value).map_err(|e| {
        warn!(value = %value, "Invalid next_turn value");
        ClientError::decode(format!("Invalid next_turn value {}: {}", value, e))
    })?;

    debug!(?next_turn, "Parsed next turn");
    Ok(match next_turn {
        NextTurn::Yes => MoveOutcome::Continue,
        NextTurn::No => MoveOutcome::Draw,
    })
}
