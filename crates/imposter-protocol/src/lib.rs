//! Wire protocol for the imposter game backend.
//!
//! This crate defines the "language" that clients and the server speak:
//!
//! - **Types** ([`GameId`], [`PlayerNumber`], [`WordEntry`], [`Category`],
//!   [`Role`]) — the domain values that travel on the wire.
//! - **Wire bodies** ([`CreateGameBody`], [`RevealBody`], [`RevealResponse`],
//!   etc.) — the exact JSON shapes of each HTTP endpoint.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while parsing
//!   identifiers and loosely-typed JSON values.
//!
//! # Architecture
//!
//! The protocol layer sits below everything else. It doesn't know about
//! sessions, word pools or HTTP routing. It only knows what the data
//! looks like.
//!
//! ```text
//! HTTP (axum) → Protocol (bodies) → Game service → Session store / Word allocator
//! ```

mod error;
mod types;
mod wire;

pub use error::ProtocolError;
pub use types::{Category, CategorySummary, GameId, PlayerNumber, Role, WordEntry};
pub use wire::{
    CreateGameBody, CreateGameResponse, ErrorBody, HealthResponse,
    RevealBody, RevealResponse, SolutionResponse, as_integer,
};
