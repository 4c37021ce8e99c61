//! Game session storage for the imposter game backend.
//!
//! This crate handles the lifecycle of a game once it exists:
//!
//! 1. **Session state** — who the imposters are, what the word is, and
//!    which players have already revealed ([`GameSession`])
//! 2. **Storage** — a concurrent id → session map ([`SessionStore`])
//! 3. **Expiry** — a background sweeper that drops games older than the
//!    configured time-to-live ([`SweeperHandle`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Game service (above)  ← builds sessions, asks the store to reveal
//!     ↕
//! Session layer (this crate)  ← owns every live GameSession
//!     ↕
//! Protocol layer (below)  ← provides GameId, PlayerNumber, WordEntry
//! ```

mod error;
mod session;
mod store;
mod sweeper;

pub use error::SessionError;
pub use session::{GameSession, RevealState, StoreConfig};
pub use store::SessionStore;
pub use sweeper::SweeperHandle;
