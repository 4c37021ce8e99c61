//! Limits and randomness settings for the game service.

/// Configuration for [`GameService`](crate::GameService).
///
/// The defaults are the limits of the reference deployment. Tests use
/// `seed` to make word and imposter selection reproducible.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Smallest allowed player count.
    pub min_players: u32,

    /// Largest allowed player count.
    pub max_players: u32,

    /// Maximum number of category ids in one request.
    pub max_category_ids: usize,

    /// Maximum number of inline custom categories in one request.
    pub max_custom_categories: usize,

    /// Maximum size of the union of words across selected categories.
    pub max_words: usize,

    /// Maximum word length, in characters.
    pub max_word_chars: usize,

    /// Maximum hint length, in characters.
    pub max_hint_chars: usize,

    /// Fixed RNG seed. `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            min_players: 3,
            max_players: 20,
            max_category_ids: 10,
            max_custom_categories: 50,
            max_words: 5000,
            max_word_chars: 64,
            max_hint_chars: 140,
            seed: None,
        }
    }
}

impl ServiceConfig {
    /// Default limits with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}
