//! Game service: creates games and runs the reveal protocol.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use imposter_protocol::{
    Category, CategorySummary, CreateGameBody, CreateGameResponse, GameId, PlayerNumber,
    RevealBody, RevealResponse, SolutionResponse, as_integer,
};
use imposter_session::{GameSession, SessionStore};
use imposter_words::{Catalog, WordAllocator};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::{CreateGameRequest, GameError, ServiceConfig};

/// Orchestrates game creation and reveals.
///
/// Owns the word allocator and its own RNG; shares the catalog and the
/// session store with the rest of the server. Constructed once at
/// startup and handed to the HTTP layer behind an `Arc`.
pub struct GameService {
    catalog: Arc<Catalog>,
    sessions: Arc<SessionStore>,
    words: Mutex<WordAllocator>,
    /// Source-category pick and imposter selection.
    rng: Mutex<StdRng>,
    config: ServiceConfig,
}

impl GameService {
    pub fn new(catalog: Arc<Catalog>, sessions: Arc<SessionStore>, config: ServiceConfig) -> Self {
        let (words, rng) = match config.seed {
            Some(seed) => (
                WordAllocator::seeded(seed),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
            ),
            None => (WordAllocator::new(), StdRng::from_os_rng()),
        };

        Self {
            catalog,
            sessions,
            words: Mutex::new(words),
            rng: Mutex::new(rng),
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// The `{id, name}` listing of the built-in catalog.
    pub fn categories(&self) -> Vec<CategorySummary> {
        self.catalog.summaries()
    }

    /// Validates a raw body, then creates the game.
    pub async fn create_from_body(
        &self,
        body: CreateGameBody,
    ) -> Result<CreateGameResponse, GameError> {
        let request = CreateGameRequest::parse(body, &self.config)?;
        self.create(request).await
    }

    /// Creates a new game.
    ///
    /// Resolves every requested category (custom definitions shadow
    /// built-ins), checks the word limits, registers each category's words
    /// with the allocator, draws one word from a randomly chosen requested
    /// category, and picks the imposters.
    ///
    /// # Errors
    /// - [`GameError::UnknownCategory`] — an id resolves to nothing
    /// - [`GameError::EmptyWordSet`] — the selected categories have no words
    /// - [`GameError::TooManyWords`] — more words than `config.max_words`
    /// - [`GameError::WordTooLong`] / [`GameError::HintTooLong`]
    pub async fn create(
        &self,
        request: CreateGameRequest,
    ) -> Result<CreateGameResponse, GameError> {
        let selected = self.resolve_categories(&request)?;
        self.check_words(&request, &selected)?;

        // Pick the source category and the imposters under one lock.
        let (source, imposters) = {
            let mut rng = self.rng.lock().await;
            let source = rng.random_range(0..selected.len());
            let imposters =
                pick_imposters(&mut *rng, request.num_imposters(), request.num_players());
            (source, imposters)
        };

        // Checked before any pool is registered, so a failed create leaves
        // the allocator untouched.
        let source_id = &request.category_ids()[source];
        if selected[source].words.is_empty() {
            tracing::error!(category = %source_id, "source category has no words configured");
            return Err(GameError::EmptyWordSet);
        }

        let chosen = {
            let mut words = self.words.lock().await;
            for (id, category) in request.category_ids().iter().zip(&selected) {
                words.register(id, category.words.clone());
            }
            words.draw(source_id)?
        };

        let session = GameSession::new(
            GameId::new_v4(),
            request.category_ids().to_vec(),
            request.num_players(),
            request.hints_enabled(),
            chosen,
            imposters,
            Instant::now(),
        )?;
        let game_id = self.sessions.insert(session).await;

        tracing::info!(
            %game_id,
            players = request.num_players(),
            imposters = request.num_imposters(),
            categories = ?request.category_ids(),
            "game created"
        );

        Ok(CreateGameResponse {
            game_id,
            num_players: request.num_players(),
        })
    }

    /// Reveals a player's role from a raw `{ playerNumber }` body.
    pub async fn reveal_from_body(
        &self,
        game_id: &GameId,
        body: RevealBody,
    ) -> Result<RevealResponse, GameError> {
        let player = body.player_number.as_ref().and_then(as_integer);
        self.reveal_checked(game_id, player).await
    }

    /// Reveals a player's role. Succeeds once per player; the side effect
    /// is irreversible.
    ///
    /// # Errors
    /// - [`GameError::SessionNotFound`] — unknown or expired game
    /// - [`GameError::InvalidPlayerNumber`] — not in `1..=num_players`
    /// - [`GameError::AlreadyRevealed`] — this player already revealed
    pub async fn reveal(
        &self,
        game_id: &GameId,
        player_number: i64,
    ) -> Result<RevealResponse, GameError> {
        self.reveal_checked(game_id, Some(player_number)).await
    }

    /// The session lookup comes first, so an unknown game reports
    /// `SessionNotFound` even when the player number is also bad.
    async fn reveal_checked(
        &self,
        game_id: &GameId,
        player_number: Option<i64>,
    ) -> Result<RevealResponse, GameError> {
        let response = self
            .sessions
            .with_session(game_id, |session| {
                let num_players = session.num_players();
                let player = player_number
                    .and_then(|n| u32::try_from(n).ok())
                    .filter(|n| (1..=num_players).contains(n))
                    .map(PlayerNumber)
                    .ok_or(GameError::InvalidPlayerNumber { num_players })?;
                session.reveal(player).map_err(GameError::from)
            })
            .await?;

        tracing::debug!(%game_id, player = ?player_number, "player revealed");
        Ok(response)
    }

    /// The word and sorted imposter numbers. Read-only.
    pub async fn solution(&self, game_id: &GameId) -> Result<SolutionResponse, GameError> {
        Ok(self.sessions.solution(game_id).await?)
    }

    /// Looks every requested id up, custom categories first.
    fn resolve_categories<'a>(
        &'a self,
        request: &'a CreateGameRequest,
    ) -> Result<Vec<&'a Category>, GameError> {
        let custom: HashMap<&str, &Category> = request
            .custom_categories()
            .iter()
            .map(|category| (category.id.as_str(), category))
            .collect();

        request
            .category_ids()
            .iter()
            .map(|id| {
                custom
                    .get(id.as_str())
                    .copied()
                    .or_else(|| self.catalog.get(id))
                    .ok_or_else(|| GameError::UnknownCategory(id.clone()))
            })
            .collect()
    }

    /// Word-set checks over the union of the selected categories.
    fn check_words(
        &self,
        request: &CreateGameRequest,
        selected: &[&Category],
    ) -> Result<(), GameError> {
        let total: usize = selected.iter().map(|category| category.words.len()).sum();
        if total == 0 {
            tracing::error!(
                categories = ?request.category_ids(),
                "selected categories have no words configured"
            );
            return Err(GameError::EmptyWordSet);
        }
        if total > self.config.max_words {
            return Err(GameError::TooManyWords(total));
        }

        for entry in selected.iter().flat_map(|category| &category.words) {
            if entry.word.chars().count() > self.config.max_word_chars {
                return Err(GameError::WordTooLong);
            }
            if let Some(hint) = &entry.hint {
                if hint.chars().count() > self.config.max_hint_chars {
                    return Err(GameError::HintTooLong);
                }
            }
        }
        Ok(())
    }
}

/// Picks `count` distinct player numbers from `1..=num_players`.
///
/// Rejection sampling: draw, retry on duplicate. `count < num_players`
/// is guaranteed by request validation, so this always terminates.
fn pick_imposters<R: Rng + ?Sized>(
    rng: &mut R,
    count: u32,
    num_players: u32,
) -> BTreeSet<PlayerNumber> {
    let mut chosen = BTreeSet::new();
    while chosen.len() < count as usize {
        chosen.insert(PlayerNumber(rng.random_range(1..=num_players)));
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use imposter_protocol::WordEntry;

    #[test]
    fn test_pick_imposters_returns_exact_distinct_count() {
        let mut rng = StdRng::seed_from_u64(0);
        for num_players in 3..=20u32 {
            for count in 1..num_players {
                let picked = pick_imposters(&mut rng, count, num_players);
                assert_eq!(picked.len(), count as usize);
                assert!(picked.iter().all(|p| (1..=num_players).contains(&p.0)));
            }
        }
    }

    fn category(id: &str, words: &[&str]) -> Category {
        Category {
            id: id.into(),
            name: id.into(),
            words: words.iter().map(|w| WordEntry::new(*w, None)).collect(),
        }
    }

    #[tokio::test]
    async fn test_create_empty_source_category_leaves_allocator_untouched() {
        let catalog = Catalog::new(vec![category("blank", &[]), category("full", &["a", "b"])])
            .unwrap();
        let mut failures = 0;

        for seed in 0..32 {
            let svc = GameService::new(
                Arc::new(catalog.clone()),
                Arc::new(SessionStore::default()),
                ServiceConfig::seeded(seed),
            );
            let request = CreateGameRequest::new(
                vec!["blank".into(), "full".into()],
                3,
                1,
                false,
                Vec::new(),
                svc.config(),
            )
            .unwrap();

            match svc.create(request).await {
                Ok(created) => {
                    let word = svc.solution(&created.game_id).await.unwrap().word;
                    assert!(word == "a" || word == "b", "{word}");
                }
                Err(GameError::EmptyWordSet) => {
                    failures += 1;
                    let words = svc.words.lock().await;
                    assert!(words.is_empty(), "seed {seed}: no pool registered");
                    assert!(svc.sessions.is_empty().await);
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert!(failures > 0, "some seed picks the empty category");
    }

    #[test]
    fn test_pick_imposters_covers_every_seat_eventually() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = BTreeSet::new();
        for _ in 0..200 {
            seen.extend(pick_imposters(&mut rng, 1, 5));
        }
        assert_eq!(seen.len(), 5);
    }
}
