//! # Imposter
//!
//! HTTP backend for a pass-and-play social deduction party game.
//!
//! A host creates a game for N players. The server draws a secret word
//! from the chosen categories and marks some players as imposters. Each
//! player then reveals their role exactly once: regular players see the
//! word, imposters see only an optional hint. The host can fetch the
//! solution at the end.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use imposter::prelude::*;
//!
//! # async fn start() -> Result<(), ImposterError> {
//! let server = ImposterServer::builder()
//!     .config(ServerConfig::from_env()?)
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod config;
mod error;
mod handler;
mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ConfigError, ImposterError};
pub use server::{ImposterServer, ImposterServerBuilder, router};

/// Everything needed to run or test a server.
pub mod prelude {
    pub use crate::{ApiError, ConfigError, ImposterError, ImposterServer, ServerConfig, router};
    pub use imposter_game::{CreateGameRequest, GameError, GameService, ServiceConfig};
    pub use imposter_protocol::{
        Category, CategorySummary, CreateGameBody, CreateGameResponse, ErrorBody, GameId,
        PlayerNumber, RevealBody, RevealResponse, Role, SolutionResponse, WordEntry,
    };
    pub use imposter_session::{SessionStore, StoreConfig};
    pub use imposter_words::Catalog;
}
