//! Core domain types shared by every layer.
//!
//! These are the values that get serialized to JSON, sent over HTTP,
//! and deserialized on the other side, and they are also the values the core
//! services pass between each other.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for one game session.
///
/// This is a "newtype wrapper" around a UUID. Wrapping it means you can't
/// accidentally pass some other string where a game id is expected, and
/// function signatures like `fn reveal(id: &GameId, ...)` document
/// themselves.
///
/// `#[serde(transparent)]` serializes it as the bare UUID string, so a
/// `GameId` looks like `"5f0c…"` in JSON, not `{ "0": "5f0c…" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub Uuid);

impl GameId {
    /// Generates a fresh random (v4) game id.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parsing is how ids arrive from URL paths (`/games/{id}/reveal`).
impl FromStr for GameId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ProtocolError::InvalidGameId(s.to_string()))
    }
}

/// A 1-based seat number within one game.
///
/// Players are anonymous: the game only knows "player 1", "player 2",
/// and so on up to the session's player count.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerNumber(pub u32);

impl fmt::Display for PlayerNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Words and categories
// ---------------------------------------------------------------------------

/// One secret word, with an optional hint shown to imposters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl WordEntry {
    /// Shorthand for a word with a hint.
    pub fn new(word: impl Into<String>, hint: Option<&str>) -> Self {
        Self {
            word: word.into(),
            hint: hint.map(str::to_string),
        }
    }
}

/// A named list of words.
///
/// Categories come from two places: the built-in catalog loaded at
/// startup, and ad-hoc custom categories sent along with a
/// `POST /games` request. Both use this same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub words: Vec<WordEntry>,
}

/// The public listing of a category: `GET /categories` never ships the
/// words themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
}

impl From<&Category> for CategorySummary {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// What a player learns when they reveal.
///
/// Serialized in lowercase (`"imposter"` / `"player"`), matching the
/// `role` field of the reveal response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Imposter,
    Player,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Imposter => write!(f, "imposter"),
            Self::Player => write!(f, "player"),
        }
    }
}
