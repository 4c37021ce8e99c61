//! Session types: the data structures that represent one game.
//!
//! A "session" is the server's record of a single play of the game. It
//! tracks:
//! - WHAT the secret word is (and its hint)
//! - WHO the imposters are (by player number)
//! - WHICH players have already revealed their role
//! - WHEN the game was created (so we know when to expire it)

use std::collections::BTreeSet;
use std::time::Duration;

use imposter_protocol::{GameId, PlayerNumber, RevealResponse, SolutionResponse, WordEntry};
use tokio::time::Instant;

use crate::SessionError;

// ---------------------------------------------------------------------------
// StoreConfig
// ---------------------------------------------------------------------------

/// Configuration for session expiry.
///
/// The defaults match the reference deployment: games live for 45 minutes
/// and the sweeper runs every 5 minutes.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// A session older than this is expired.
    pub ttl: Duration,

    /// How often the background sweeper purges expired sessions.
    pub sweep_interval: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(45 * 60),
            sweep_interval: Duration::from_secs(5 * 60),
        }
    }
}

// ---------------------------------------------------------------------------
// RevealState
// ---------------------------------------------------------------------------

/// Per-player reveal state. One instance per player number per session.
///
/// ```text
///   Unrevealed ──(reveal)──→ Revealed   (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Unrevealed,
    Revealed,
}

// ---------------------------------------------------------------------------
// GameSession
// ---------------------------------------------------------------------------

/// One game: fixed roster, fixed word, and a growing set of reveals.
///
/// Everything except `revealed` is fixed at construction. `revealed`
/// only ever grows, and only through [`reveal`](Self::reveal).
#[derive(Debug, Clone)]
pub struct GameSession {
    id: GameId,
    category_ids: Vec<String>,
    num_players: u32,
    hints_enabled: bool,
    chosen: WordEntry,
    imposters: BTreeSet<PlayerNumber>,
    revealed: BTreeSet<PlayerNumber>,
    created_at: Instant,
}

impl GameSession {
    /// Builds a session with nobody revealed yet.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidRoster`] unless
    /// `1 <= imposters.len() < num_players` and every imposter is in
    /// `1..=num_players`.
    pub fn new(
        id: GameId,
        category_ids: Vec<String>,
        num_players: u32,
        hints_enabled: bool,
        chosen: WordEntry,
        imposters: BTreeSet<PlayerNumber>,
        created_at: Instant,
    ) -> Result<Self, SessionError> {
        let count = imposters.len();
        if count == 0 || count >= num_players as usize {
            return Err(SessionError::InvalidRoster(format!(
                "{count} imposters for {num_players} players"
            )));
        }
        if let Some(outside) = imposters.iter().find(|p| p.0 < 1 || p.0 > num_players) {
            return Err(SessionError::InvalidRoster(format!(
                "imposter {outside} is not in 1..={num_players}"
            )));
        }

        Ok(Self {
            id,
            category_ids,
            num_players,
            hints_enabled,
            chosen,
            imposters,
            revealed: BTreeSet::new(),
            created_at,
        })
    }

    /// Reveals a player's role. Works exactly once per player.
    ///
    /// Imposters get the hint (only when hints are enabled, and only if the
    /// word has one); everyone else gets the word.
    ///
    /// # Errors
    /// - [`SessionError::InvalidPlayerNumber`] — not in `1..=num_players`
    /// - [`SessionError::AlreadyRevealed`] — this player already revealed;
    ///   nothing changes
    pub fn reveal(&mut self, player: PlayerNumber) -> Result<RevealResponse, SessionError> {
        match self.reveal_state(player) {
            None => {
                return Err(SessionError::InvalidPlayerNumber {
                    player,
                    num_players: self.num_players,
                });
            }
            Some(RevealState::Revealed) => return Err(SessionError::AlreadyRevealed(player)),
            Some(RevealState::Unrevealed) => {}
        }

        self.revealed.insert(player);

        if self.imposters.contains(&player) {
            let hint = if self.hints_enabled {
                self.chosen.hint.clone()
            } else {
                None
            };
            Ok(RevealResponse::Imposter { hint })
        } else {
            Ok(RevealResponse::Player {
                word: self.chosen.word.clone(),
            })
        }
    }

    /// The reveal state of one player, or `None` if the number is out of range.
    pub fn reveal_state(&self, player: PlayerNumber) -> Option<RevealState> {
        if player.0 < 1 || player.0 > self.num_players {
            None
        } else if self.revealed.contains(&player) {
            Some(RevealState::Revealed)
        } else {
            Some(RevealState::Unrevealed)
        }
    }

    /// The word and the imposters (ascending). Read-only.
    pub fn solution(&self) -> SolutionResponse {
        SolutionResponse {
            word: self.chosen.word.clone(),
            imposters: self.imposters.iter().copied().collect(),
        }
    }

    /// `true` once the session is older than `ttl` at `now`.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.created_at) > ttl
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    /// Selected category ids, in selection order.
    pub fn category_ids(&self) -> &[String] {
        &self.category_ids
    }

    pub fn num_players(&self) -> u32 {
        self.num_players
    }

    pub fn num_imposters(&self) -> u32 {
        self.imposters.len() as u32
    }

    pub fn chosen(&self) -> &WordEntry {
        &self.chosen
    }

    pub fn imposters(&self) -> &BTreeSet<PlayerNumber> {
        &self.imposters
    }

    pub fn revealed(&self) -> &BTreeSet<PlayerNumber> {
        &self.revealed
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }
}
