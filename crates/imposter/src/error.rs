//! Error types of the HTTP layer.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use imposter_game::{ErrorClass, GameError};
use imposter_protocol::ErrorBody;
use imposter_words::WordsError;

/// Top-level error for server startup.
///
/// Startup code (config, catalog loading, binding) deals with this single
/// type; the `#[from]` attributes let `?` convert sub-crate errors.
#[derive(Debug, thiserror::Error)]
pub enum ImposterError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Words(#[from] WordsError),

    /// Binding or serving the listener failed.
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A configuration value that couldn't be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// An error leaving a request handler.
///
/// Every variant renders as `{ "error": ..., "kind": ... }` with a status
/// picked from the error's class. Server faults are logged and replaced
/// by a generic message.
#[derive(Debug)]
pub enum ApiError {
    Game(GameError),
    /// The body wasn't valid JSON or didn't have the expected shape.
    MalformedBody(JsonRejection),
    /// The path id isn't a game id at all.
    UnknownGame,
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        Self::Game(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection)
    }
}

pub(crate) const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, kind) = match self {
            Self::MalformedBody(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "malformed request body");
                (
                    StatusCode::BAD_REQUEST,
                    "Malformed JSON body".to_string(),
                    "MalformedBody",
                )
            }
            Self::UnknownGame => (
                StatusCode::NOT_FOUND,
                "Game not found".to_string(),
                "SessionNotFound",
            ),
            Self::Game(err) => {
                let status = status_for(err.class());
                if status.is_server_error() {
                    tracing::error!(error = %err, kind = err.kind(), "request failed");
                    (status, INTERNAL_ERROR_MESSAGE.to_string(), err.kind())
                } else {
                    (status, err.to_string(), err.kind())
                }
            }
        };

        let body = ErrorBody {
            error,
            kind: Some(kind.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

fn status_for(class: ErrorClass) -> StatusCode {
    match class {
        ErrorClass::Invalid => StatusCode::BAD_REQUEST,
        ErrorClass::NotFound => StatusCode::NOT_FOUND,
        ErrorClass::Conflict => StatusCode::CONFLICT,
        ErrorClass::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorClass::ServerFault => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
