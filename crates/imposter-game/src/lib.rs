//! Game session lifecycle for the imposter game backend.
//!
//! This is the component the HTTP layer calls directly. It validates
//! incoming requests, picks the word and the imposters, and runs the
//! one-shot reveal protocol on top of the session store.
//!
//! # Key types
//!
//! - [`GameService`] — create / reveal / solution
//! - [`CreateGameRequest`] — a validated `POST /games` body
//! - [`ServiceConfig`] — limits and the optional RNG seed
//! - [`GameError`] — the stable error taxonomy every endpoint reports

mod config;
mod error;
mod request;
mod service;

pub use config::ServiceConfig;
pub use error::{ErrorClass, GameError};
pub use request::CreateGameRequest;
pub use service::GameService;
