//! Error types for the protocol layer.
//!
//! Each crate in the workspace defines its own error enum. When you see a
//! `ProtocolError`, you know the problem is in the shape of the data, not
//! in game rules or session state.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A game id string is not a valid UUID.
    ///
    /// Callers usually treat this the same as an unknown game: a
    /// malformed id can never name a live session.
    #[error("invalid game id: {0}")]
    InvalidGameId(String),
}
