//! The built-in category catalog.
//!
//! The catalog is read-only once loaded. The default set of categories is
//! compiled into the binary from `data/categories.json`; operators can
//! replace it with their own file of the same schema.

use std::collections::HashMap;
use std::path::Path;

use imposter_protocol::{Category, CategorySummary};

use crate::WordsError;

/// The categories shipped with the binary.
const BUILTIN_CATALOG: &str = include_str!("../data/categories.json");

/// An ordered, read-only set of categories with O(1) lookup by id.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Categories in file order (this is the order `GET /categories` lists).
    categories: Vec<Category>,

    /// Index from category id to its position in `categories`.
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog from an explicit list of categories.
    ///
    /// # Errors
    /// Returns [`WordsError::DuplicateCategory`] if two categories share
    /// an id.
    pub fn new(categories: Vec<Category>) -> Result<Self, WordsError> {
        let mut index = HashMap::with_capacity(categories.len());
        for (position, category) in categories.iter().enumerate() {
            if index.insert(category.id.clone(), position).is_some() {
                return Err(WordsError::DuplicateCategory(category.id.clone()));
            }
        }
        Ok(Self { categories, index })
    }

    /// Loads the catalog compiled into the binary.
    pub fn builtin() -> Result<Self, WordsError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parses a catalog from a JSON array of categories.
    pub fn from_json(json: &str) -> Result<Self, WordsError> {
        let categories: Vec<Category> = serde_json::from_str(json)?;
        Self::new(categories)
    }

    /// Reads and parses a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, WordsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| WordsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            categories = catalog.len(),
            "loaded category catalog"
        );
        Ok(catalog)
    }

    /// Looks up a category by id.
    pub fn get(&self, id: &str) -> Option<&Category> {
        self.index.get(id).map(|&position| &self.categories[position])
    }

    /// The `{id, name}` listing of every category, in catalog order.
    pub fn summaries(&self) -> Vec<CategorySummary> {
        self.categories.iter().map(CategorySummary::from).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imposter_protocol::WordEntry;

    fn category(id: &str, words: &[&str]) -> Category {
        Category {
            id: id.into(),
            name: id.to_uppercase(),
            words: words.iter().map(|w| WordEntry::new(*w, None)).collect(),
        }
    }

    #[test]
    fn test_builtin_parses_and_has_animals() {
        let catalog = Catalog::builtin().expect("embedded catalog must parse");
        let animals = catalog.get("animals").expect("animals is built in");
        assert!(!animals.words.is_empty());
        assert!(animals.words.iter().all(|w| w.hint.is_some()));
    }

    #[test]
    fn test_builtin_words_fit_length_limits() {
        let catalog = Catalog::builtin().unwrap();
        for category in catalog.iter() {
            for entry in &category.words {
                assert!(entry.word.chars().count() <= 64, "{}", entry.word);
                if let Some(hint) = &entry.hint {
                    assert!(hint.chars().count() <= 140, "{hint}");
                }
            }
        }
    }

    #[test]
    fn test_new_duplicate_id_returns_error() {
        let result = Catalog::new(vec![category("a", &["x"]), category("a", &["y"])]);
        assert!(matches!(result, Err(WordsError::DuplicateCategory(id)) if id == "a"));
    }

    #[test]
    fn test_summaries_preserve_order() {
        let catalog =
            Catalog::new(vec![category("zeta", &["z"]), category("alpha", &["a"])]).unwrap();
        let ids: Vec<_> = catalog.summaries().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_get_unknown_returns_none() {
        let catalog = Catalog::new(vec![category("a", &["x"])]).unwrap();
        assert!(catalog.get("b").is_none());
    }

    #[test]
    fn test_from_json_malformed_returns_parse_error() {
        let result = Catalog::from_json(r#"[{"id": "a"}]"#);
        assert!(matches!(result, Err(WordsError::Parse(_))));
    }

    #[test]
    fn test_from_path_missing_file_returns_io_error() {
        let result = Catalog::from_path("/definitely/not/here/categories.json");
        assert!(matches!(result, Err(WordsError::Io { .. })));
    }
}
