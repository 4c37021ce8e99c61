//! Request and response bodies for every HTTP endpoint.
//!
//! Request bodies are deliberately loose: scalar fields are kept as raw
//! [`serde_json::Value`]s so that the game layer can report *which* field
//! was wrong (and in which order the checks ran) instead of failing the
//! whole body on the first type mismatch. Response bodies are strict.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Category, GameId, PlayerNumber, Role};

// ---------------------------------------------------------------------------
// POST /games
// ---------------------------------------------------------------------------

/// Body of `POST /games`, exactly as the client sent it.
///
/// Either `categoryIds` (preferred) or the legacy single `categoryId` names
/// the categories to draw from. `customCategories` may define extra
/// categories inline; they shadow built-ins with the same id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameBody {
    pub category_ids: Option<Value>,
    pub category_id: Option<Value>,
    pub num_players: Option<Value>,
    pub num_imposters: Option<Value>,
    pub hints_enabled: Option<Value>,
    pub custom_categories: Option<Vec<Category>>,
}

/// Response of `POST /games`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameResponse {
    pub game_id: GameId,
    pub num_players: u32,
}

// ---------------------------------------------------------------------------
// POST /games/{id}/reveal
// ---------------------------------------------------------------------------

/// Body of `POST /games/{id}/reveal`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealBody {
    pub player_number: Option<Value>,
}

/// What one player sees after revealing.
///
/// Internally tagged on `role`, so the two shapes on the wire are:
///
/// ```text
/// { "role": "imposter", "hint": "..." | null }
/// { "role": "player",   "word": "..." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RevealResponse {
    Imposter { hint: Option<String> },
    Player { word: String },
}

impl RevealResponse {
    pub fn role(&self) -> Role {
        match self {
            Self::Imposter { .. } => Role::Imposter,
            Self::Player { .. } => Role::Player,
        }
    }
}

// ---------------------------------------------------------------------------
// GET /games/{id}/solution, /health, errors
// ---------------------------------------------------------------------------

/// Response of `GET /games/{id}/solution`. `imposters` is sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionResponse {
    pub word: String,
    pub imposters: Vec<PlayerNumber>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// The body of every non-2xx response.
///
/// `kind` is the machine-stable error identifier (e.g.
/// `"InvalidPlayerCount"`); `error` is for humans and may change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Reads a JSON value as an integer.
///
/// JSON has a single number type, so `5` and `5.0` are the same value to
/// most clients. Both are accepted; `5.5`, `"5"` and `true` are not.
pub fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    // Beyond 2^53 an f64 no longer holds every integer exactly.
    if f.fract() == 0.0 && f.abs() <= 9_007_199_254_740_991.0 {
        Some(f as i64)
    } else {
        None
    }
}
