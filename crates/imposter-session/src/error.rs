//! Error types for the session layer.

use imposter_protocol::{GameId, PlayerNumber};

/// Errors that can occur during session management.
///
/// These cover lookups, the one-shot reveal, and building a session
/// with a valid roster.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No live session exists for this id.
    /// Either it never existed, or it expired and was swept.
    #[error("game {0} not found")]
    NotFound(GameId),

    /// The player number is outside `1..=num_players`.
    #[error("player {player} is not in 1..={num_players}")]
    InvalidPlayerNumber {
        player: PlayerNumber,
        num_players: u32,
    },

    /// The player already revealed their role in this game.
    /// A reveal happens exactly once per player.
    #[error("player {0} has already revealed")]
    AlreadyRevealed(PlayerNumber),

    /// The session's player count and imposter set don't fit together.
    #[error("invalid roster: {0}")]
    InvalidRoster(String),
}
