//! Request handlers: one per route, each a thin shim over [`GameService`].
//!
//! Handlers take bodies as `Result<Json<T>, JsonRejection>` so a bad body
//! is reported through [`ApiError`] instead of axum's plain-text rejection.
//! The reveal route reads a bad body as an empty one.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use imposter_game::GameService;
use imposter_protocol::{
    CategorySummary, CreateGameBody, CreateGameResponse, ErrorBody, GameId, HealthResponse,
    RevealBody, RevealResponse, SolutionResponse,
};

use crate::ApiError;

/// Shared handler state.
pub(crate) type SharedService = Arc<GameService>;

/// `GET /health`
pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// `GET /categories`
pub(crate) async fn list_categories(
    State(service): State<SharedService>,
) -> Json<Vec<CategorySummary>> {
    Json(service.categories())
}

/// `POST /games`
pub(crate) async fn create_game(
    State(service): State<SharedService>,
    body: Result<Json<CreateGameBody>, JsonRejection>,
) -> Result<Json<CreateGameResponse>, ApiError> {
    let Json(body) = body?;
    let created = service.create_from_body(body).await?;
    Ok(Json(created))
}

/// `POST /games/{id}/reveal`
pub(crate) async fn reveal(
    State(service): State<SharedService>,
    Path(id): Path<String>,
    body: Result<Json<RevealBody>, JsonRejection>,
) -> Result<Json<RevealResponse>, ApiError> {
    let game_id = parse_game_id(&id)?;
    // An unreadable body carries no player number. The service then
    // reports the unknown game or the invalid number, in that order.
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!(%game_id, error = %rejection.body_text(), "unreadable reveal body");
            RevealBody::default()
        }
    };
    let response = service.reveal_from_body(&game_id, body).await?;
    Ok(Json(response))
}

/// `GET /games/{id}/solution`
pub(crate) async fn solution(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<Json<SolutionResponse>, ApiError> {
    let game_id = parse_game_id(&id)?;
    let solution = service.solution(&game_id).await?;
    Ok(Json(solution))
}

/// Any route not matched above.
pub(crate) async fn not_found() -> Response {
    let body = ErrorBody {
        error: "Not found".to_string(),
        kind: None,
    };
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

/// An id that isn't a UUID can't name a live game.
fn parse_game_id(raw: &str) -> Result<GameId, ApiError> {
    raw.parse().map_err(|_| {
        tracing::debug!(id = raw, "unparseable game id");
        ApiError::UnknownGame
    })
}

