//! The session store: every live game, keyed by id.
//!
//! # Concurrency note
//!
//! Unlike most of the workspace's state, `SessionStore` IS shared: every
//! request handler and the background sweeper hold the same `Arc`. It
//! uses two levels of locking:
//!
//! ```text
//! RwLock<HashMap<GameId, Slot>>     ← map shape: insert / lookup / purge
//!            │
//!            └─ Slot = Arc<Mutex<Option<GameSession>>>   ← one game's state
//! ```
//!
//! - Lookups take the map **read** lock just long enough to clone the
//!   slot's `Arc`, then work under the slot mutex. Reveals on different
//!   games never contend; reveals on the same game serialize, which makes
//!   each check-and-set atomic.
//! - The sweeper takes the map **write** lock, then locks each slot. An
//!   expired slot is emptied (`None`) before it's removed, so a reveal
//!   that grabbed the slot just before the purge either finishes first or
//!   sees `None` and reports `NotFound`. It never mutates a game that has
//!   already been dropped.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use imposter_protocol::{GameId, PlayerNumber, RevealResponse, SolutionResponse};
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

use crate::{GameSession, SessionError, StoreConfig, SweeperHandle};

/// One game's storage cell. `None` once the sweeper has claimed it.
type Slot = Arc<Mutex<Option<GameSession>>>;

/// Owns all live game sessions.
///
/// ## Lifecycle
///
/// ```text
/// insert() ──→ reveal() / solution() ... ──→ purge_expired()
///    │                                           │
///    ▼                                           ▼
/// [live]  ─────────(age > ttl)─────────→  [gone: NotFound]
/// ```
pub struct SessionStore {
    sessions: RwLock<HashMap<GameId, Slot>>,
    config: StoreConfig,
}

impl SessionStore {
    /// Creates a new, empty store with the given expiry config.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Stores a fully built session and returns its id.
    ///
    /// The session is complete before it becomes visible, so no reader
    /// can ever observe a half-constructed game.
    pub async fn insert(&self, session: GameSession) -> GameId {
        let id = session.id();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(Some(session))));
        tracing::debug!(game_id = %id, "session stored");
        id
    }

    /// Returns a snapshot of a live session.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] if the id is unknown, expired,
    /// or already swept.
    pub async fn get(&self, id: &GameId) -> Result<GameSession, SessionError> {
        self.with_session(id, |session| Ok(session.clone())).await
    }

    /// Runs `f` on a live session while holding that session's lock.
    ///
    /// This is the building block for every atomic per-game operation:
    /// whatever `f` checks and changes happens as one unit.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] (converted into `E`) if the
    /// session is unknown or expired; otherwise whatever `f` returns.
    pub async fn with_session<T, E, F>(&self, id: &GameId, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut GameSession) -> Result<T, E>,
        E: From<SessionError>,
    {
        let slot = self
            .sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(SessionError::NotFound(*id))?;

        let mut guard = slot.lock().await;
        let session = match guard.as_mut() {
            Some(session) if !session.is_expired(Instant::now(), self.config.ttl) => session,
            // Swept, or past its TTL and waiting for the next sweep.
            _ => return Err(SessionError::NotFound(*id).into()),
        };

        f(session)
    }

    /// Reveals one player's role (see [`GameSession::reveal`]).
    pub async fn reveal(
        &self,
        id: &GameId,
        player: PlayerNumber,
    ) -> Result<RevealResponse, SessionError> {
        self.with_session(id, |session| session.reveal(player)).await
    }

    /// The word and sorted imposter list of a game. No state change.
    pub async fn solution(&self, id: &GameId) -> Result<SolutionResponse, SessionError> {
        self.with_session(id, |session| Ok(session.solution())).await
    }

    /// Removes every session older than the TTL at `now`.
    ///
    /// Returns the ids that were removed.
    pub async fn purge_expired(&self, now: Instant) -> Vec<GameId> {
        let ttl = self.config.ttl;
        let mut sessions = self.sessions.write().await;
        let mut purged = HashSet::new();

        for (id, slot) in sessions.iter() {
            let mut guard = slot.lock().await;
            let expired = match guard.as_ref() {
                Some(session) => session.is_expired(now, ttl),
                None => true,
            };
            if expired {
                if let Some(session) = guard.take() {
                    tracing::debug!(
                        game_id = %id,
                        categories = ?session.category_ids(),
                        revealed = session.revealed().len(),
                        players = session.num_players(),
                        "session expired"
                    );
                }
                purged.insert(*id);
            }
        }

        sessions.retain(|id, _| !purged.contains(id));

        if !purged.is_empty() {
            tracing::info!(
                purged = purged.len(),
                remaining = sessions.len(),
                "expired games purged"
            );
        }

        purged.into_iter().collect()
    }

    /// Starts the background sweeper for this store.
    ///
    /// The sweeper purges once immediately, then every
    /// `config.sweep_interval`. It stops when the returned handle is
    /// dropped.
    pub fn spawn_sweeper(self: &Arc<Self>) -> SweeperHandle {
        SweeperHandle::spawn(Arc::clone(self))
    }

    /// Number of stored sessions (including expired ones not yet swept).
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}
