//! Boundary validation for `POST /games`.
//!
//! The raw [`CreateGameBody`] keeps every scalar as an untyped JSON value.
//! [`CreateGameRequest::parse`] checks those values in a fixed order and
//! produces a strongly typed request; the service never sees anything
//! that didn't pass through here.
//!
//! Check order (the first failure wins):
//!
//! ```text
//! 1. category ids present        → MissingCategory
//! 2. numPlayers integer in range → InvalidPlayerCount
//! 3. numImposters in 1..players  → InvalidImposterCount
//! 4. hintsEnabled is boolean     → InvalidFlag
//! 5. id / custom category counts → TooManyCategories / TooManyCustomCategories
//! ```
//!
//! Checks that need the catalog (unknown ids, word limits) run later in
//! [`GameService::create`](crate::GameService::create).

use imposter_protocol::{Category, CreateGameBody, as_integer};
use serde_json::Value;

use crate::{GameError, ServiceConfig};

/// A `POST /games` request that passed shape validation.
#[derive(Debug, Clone)]
pub struct CreateGameRequest {
    category_ids: Vec<String>,
    num_players: u32,
    num_imposters: u32,
    hints_enabled: bool,
    custom_categories: Vec<Category>,
}

impl CreateGameRequest {
    /// Builds a request from already-typed values.
    pub fn new(
        category_ids: Vec<String>,
        num_players: i64,
        num_imposters: i64,
        hints_enabled: bool,
        custom_categories: Vec<Category>,
        config: &ServiceConfig,
    ) -> Result<Self, GameError> {
        validate(
            category_ids,
            Some(num_players),
            Some(num_imposters),
            Some(hints_enabled),
            custom_categories,
            config,
        )
    }

    /// Validates a raw request body.
    pub fn parse(body: CreateGameBody, config: &ServiceConfig) -> Result<Self, GameError> {
        let category_ids = requested_ids(body.category_ids.as_ref(), body.category_id.as_ref());
        validate(
            category_ids,
            body.num_players.as_ref().and_then(as_integer),
            body.num_imposters.as_ref().and_then(as_integer),
            body.hints_enabled.as_ref().and_then(Value::as_bool),
            body.custom_categories.unwrap_or_default(),
            config,
        )
    }

    /// Requested category ids, in the order they were selected.
    pub fn category_ids(&self) -> &[String] {
        &self.category_ids
    }

    pub fn num_players(&self) -> u32 {
        self.num_players
    }

    pub fn num_imposters(&self) -> u32 {
        self.num_imposters
    }

    pub fn hints_enabled(&self) -> bool {
        self.hints_enabled
    }

    pub fn custom_categories(&self) -> &[Category] {
        &self.custom_categories
    }
}

/// `categoryIds` wins when it is a non-empty array; otherwise fall back
/// to the legacy single `categoryId`.
fn requested_ids(category_ids: Option<&Value>, category_id: Option<&Value>) -> Vec<String> {
    if let Some(Value::Array(ids)) = category_ids {
        if !ids.is_empty() {
            return ids
                .iter()
                .map(|id| match id {
                    Value::String(s) => s.clone(),
                    // Non-string ids can't match anything; they surface
                    // later as UnknownCategory.
                    other => other.to_string(),
                })
                .collect();
        }
    }

    // Falsy values count as absent; anything else is an id, stringified
    // like the elements of `categoryIds`.
    match category_id {
        Some(Value::String(id)) if !id.is_empty() => vec![id.clone()],
        None | Some(Value::Null | Value::Bool(false) | Value::String(_)) => Vec::new(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Vec::new(),
        Some(other) => vec![other.to_string()],
    }
}

fn validate(
    category_ids: Vec<String>,
    num_players: Option<i64>,
    num_imposters: Option<i64>,
    hints_enabled: Option<bool>,
    custom_categories: Vec<Category>,
    config: &ServiceConfig,
) -> Result<CreateGameRequest, GameError> {
    if category_ids.is_empty() {
        return Err(GameError::MissingCategory);
    }

    let num_players = num_players
        .filter(|n| (i64::from(config.min_players)..=i64::from(config.max_players)).contains(n))
        .ok_or(GameError::InvalidPlayerCount {
            min: config.min_players,
            max: config.max_players,
        })?;

    let num_imposters = num_imposters
        .filter(|n| *n >= 1 && *n < num_players)
        .ok_or(GameError::InvalidImposterCount)?;

    let hints_enabled = hints_enabled.ok_or(GameError::InvalidFlag)?;

    if category_ids.len() > config.max_category_ids {
        return Err(GameError::TooManyCategories);
    }
    if custom_categories.len() > config.max_custom_categories {
        return Err(GameError::TooManyCustomCategories);
    }

    // Both counts are bounded by `max_players` (a u32), so these can't fail.
    let num_players = u32::try_from(num_players).map_err(|e| GameError::Internal(e.to_string()))?;
    let num_imposters =
        u32::try_from(num_imposters).map_err(|e| GameError::Internal(e.to_string()))?;

    Ok(CreateGameRequest {
        category_ids,
        num_players,
        num_imposters,
        hints_enabled,
        custom_categories,
    })
}
