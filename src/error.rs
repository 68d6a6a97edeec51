//! Error types for game client operations.

use derive_more::{Display, Error};
use tracing::instrument;

/// Reason a client operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ClientErrorKind {
    /// Input rejected locally; no request was sent.
    #[display("Validation failed: {}", _0)]
    Validation(String),
    /// The request could not be sent or the connection failed.
    #[display("Transport failure: {}", _0)]
    Transport(String),
    /// The response body could not be read in full.
    #[display("Failed to read response body: {}", _0)]
    BodyRead(String),
    /// The server answered with a status the operation does not accept.
    #[display("Server responded with status: {}, Details: {}", status, body)]
    Server {
        /// Numeric status code.
        code: u16,
        /// Status text, e.g. `404 Not Found`.
        status: String,
        /// Raw response body.
        body: String,
    },
    /// The body did not have the expected JSON shape.
    #[display("Failed to decode response: {}", _0)]
    Decode(String),
    /// The body matched none of the recognized result shapes.
    #[display("Unexpected response format: {}", _0)]
    AmbiguousResponse(String),
}

/// Game client error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct ClientError {
    /// What went wrong.
    pub kind: ClientErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ClientError {
    /// Creates a new client error with caller location tracking.
    #[track_caller]
    #[instrument(skip(kind))]
    pub fn new(kind: ClientErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for a local validation failure.
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Validation(message.into()))
    }

    /// Shorthand for a decoding failure.
    #[track_caller]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Decode(message.into()))
    }
}

impl From<ClientErrorKind> for ClientError {
    #[track_caller]
    fn from(kind: ClientErrorKind) -> Self {
        Self::new(kind)
    }
}
