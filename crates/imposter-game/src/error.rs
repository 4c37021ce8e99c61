//! The error taxonomy reported by every game operation.

use imposter_protocol::{GameId, PlayerNumber};
use imposter_session::SessionError;
use imposter_words::WordsError;

/// Broad class of a [`GameError`], used to pick a transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad client input. Safe to retry after fixing the input.
    Invalid,
    /// Unknown category or game.
    NotFound,
    /// A state conflict (the player already revealed).
    Conflict,
    /// The request is valid but asks for too much data.
    TooLarge,
    /// Server-side fault. Details are logged, never returned.
    ServerFault,
}

/// Everything that can go wrong creating, revealing, or solving a game.
///
/// The `Display` text is for humans; [`kind`](Self::kind) is the
/// machine-stable identifier clients should match on.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("categoryIds (or categoryId) is required")]
    MissingCategory,

    #[error("numPlayers must be an integer between {min} and {max}")]
    InvalidPlayerCount { min: u32, max: u32 },

    #[error("numImposters must be >= 1 and < numPlayers")]
    InvalidImposterCount,

    #[error("hintsEnabled must be boolean")]
    InvalidFlag,

    #[error("Too many categories selected")]
    TooManyCategories,

    #[error("Too many custom categories")]
    TooManyCustomCategories,

    /// The id names neither a custom nor a built-in category.
    #[error("One or more categoryIds are unknown")]
    UnknownCategory(String),

    /// The selected categories exist but contain no words. This is a
    /// configuration fault on the server side, not a client mistake.
    #[error("Selected categories have no words configured")]
    EmptyWordSet,

    #[error("Too many words in selected categories")]
    TooManyWords(usize),

    #[error("Word too long")]
    WordTooLong,

    #[error("Hint too long")]
    HintTooLong,

    #[error("Game not found")]
    SessionNotFound(GameId),

    #[error("playerNumber must be 1..{num_players}")]
    InvalidPlayerNumber { num_players: u32 },

    #[error("This player has already revealed")]
    AlreadyRevealed(PlayerNumber),

    /// An invariant broke somewhere below the service.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GameError {
    /// The stable identifier of this error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCategory => "MissingCategory",
            Self::InvalidPlayerCount { .. } => "InvalidPlayerCount",
            Self::InvalidImposterCount => "InvalidImposterCount",
            Self::InvalidFlag => "InvalidFlag",
            Self::TooManyCategories => "TooManyCategories",
            Self::TooManyCustomCategories => "TooManyCustomCategories",
            Self::UnknownCategory(_) => "UnknownCategory",
            Self::EmptyWordSet => "EmptyWordSet",
            Self::TooManyWords(_) => "TooManyWords",
            Self::WordTooLong => "WordTooLong",
            Self::HintTooLong => "HintTooLong",
            Self::SessionNotFound(_) => "SessionNotFound",
            Self::InvalidPlayerNumber { .. } => "InvalidPlayerNumber",
            Self::AlreadyRevealed(_) => "AlreadyRevealed",
            Self::Internal(_) => "Internal",
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::UnknownCategory(_) | Self::SessionNotFound(_) => ErrorClass::NotFound,
            Self::AlreadyRevealed(_) => ErrorClass::Conflict,
            Self::TooManyWords(_) => ErrorClass::TooLarge,
            Self::EmptyWordSet | Self::Internal(_) => ErrorClass::ServerFault,
            _ => ErrorClass::Invalid,
        }
    }
}

impl From<SessionError> for GameError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(id) => Self::SessionNotFound(id),
            SessionError::InvalidPlayerNumber { num_players, .. } => {
                Self::InvalidPlayerNumber { num_players }
            }
            SessionError::AlreadyRevealed(player) => Self::AlreadyRevealed(player),
            SessionError::InvalidRoster(reason) => {
                Self::Internal(format!("invalid roster: {reason}"))
            }
        }
    }
}

impl From<WordsError> for GameError {
    fn from(err: WordsError) -> Self {
        match err {
            // The randomly chosen source category was empty even though
            // the union of selected categories was not.
            WordsError::EmptyPool(_) => Self::EmptyWordSet,
            other => Self::Internal(other.to_string()),
        }
    }
}
