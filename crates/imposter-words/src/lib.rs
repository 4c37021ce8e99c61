//! Word sources for the imposter game backend.
//!
//! This crate owns everything about *which* word a game gets:
//!
//! 1. **Catalog** — the built-in, read-only list of categories
//!    ([`Catalog`]), loaded once at startup.
//! 2. **Allocation** — per-category word bags that never repeat a word
//!    until every word in the category has been served ([`WordAllocator`]).
//!
//! # How it fits in the stack
//!
//! ```text
//! Game service (above)  ← registers category words, draws one per game
//!     ↕
//! Words layer (this crate)  ← catalog + shuffled bags
//!     ↕
//! Protocol layer (below)  ← provides WordEntry, Category
//! ```

mod allocator;
mod catalog;
mod error;

pub use allocator::{WordAllocator, WordPool};
pub use catalog::Catalog;
pub use error::WordsError;
