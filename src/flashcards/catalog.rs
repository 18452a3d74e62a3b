//! In-memory deck collection backed by [`FlashcardStorage`]
//!
//! Every mutation updates the in-memory map first and then writes a full
//! snapshot, so a failed write can only lose the latest change.

use indexmap::IndexMap;
use rand::Rng;

use super::errors::{FlashcardError, Result};
use super::models::{Deck, DeckId};
use super::parser::DeckParser;
use super::session::StudySession;
use super::storage::FlashcardStorage;
use crate::storage::KeyValueStore;

/// A freshly imported deck and the number of lines that were dropped
#[derive(Debug)]
pub struct Imported<'a> {
    pub deck: &'a Deck,
    pub skipped: usize,
}

pub struct DeckCatalog<S> {
    storage: FlashcardStorage<S>,
    decks: IndexMap<DeckId, Deck>,
}

impl<S: KeyValueStore> DeckCatalog<S> {
    /// Load the saved collection from `store`
    pub fn open(store: S) -> Self {
        let storage = FlashcardStorage::new(store);
        let decks = storage.load();
        log::info!("Opened deck catalog with {} decks", decks.len());
        Self { storage, decks }
    }

    pub fn storage(&self) -> &FlashcardStorage<S> {
        &self.storage
    }

    /// Decks in the order they were added
    pub fn list_decks(&self) -> Vec<&Deck> {
        self.decks.values().collect()
    }

    pub fn get(&self, id: &DeckId) -> Option<&Deck> {
        self.decks.get(id)
    }

    pub fn len(&self) -> usize {
        self.decks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    /// Append `deck` and persist the collection
    pub fn add_deck(&mut self, deck: Deck) -> Result<&Deck> {
        if self.decks.contains_key(&deck.id) {
            return Err(FlashcardError::DuplicateDeck(deck.id));
        }

        let id = deck.id.clone();
        log::info!("Adding deck '{}' ({} cards)", deck.name, deck.len());
        self.decks.insert(id.clone(), deck);
        self.storage.save(&self.decks)?;

        self.decks
            .get(&id)
            .ok_or(FlashcardError::DeckNotFound(id))
    }

    /// Parse `raw` and add the resulting deck
    pub fn import(&mut self, raw: &str, source_name: &str, parser: &DeckParser) -> Result<Imported<'_>> {
        let (deck, skipped) = parser.parse_counted(raw, source_name);
        if deck.is_empty() {
            log::warn!("Imported '{}' contains no usable cards", source_name);
        }

        let deck = self.add_deck(deck)?;
        Ok(Imported { deck, skipped })
    }

    /// Remove a deck and persist the collection
    pub fn delete_deck(&mut self, id: &DeckId) -> Result<Deck> {
        let deck = self
            .decks
            .shift_remove(id)
            .ok_or_else(|| FlashcardError::DeckNotFound(id.clone()))?;

        log::info!("Deleted deck '{}'", deck.name);
        self.storage.save(&self.decks)?;
        Ok(deck)
    }

    /// Start a study session over a deck
    pub fn select_deck(&self, id: &DeckId) -> Result<StudySession<'_>> {
        self.select_deck_with_rng(id, &mut rand::thread_rng())
    }

    pub fn select_deck_with_rng<R: Rng + ?Sized>(
        &self,
        id: &DeckId,
        rng: &mut R,
    ) -> Result<StudySession<'_>> {
        let deck = self
            .decks
            .get(id)
            .ok_or_else(|| FlashcardError::DeckNotFound(id.clone()))?;
        StudySession::start(deck, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::models::CardRecord;
    use crate::flashcards::storage::DECKS_KEY;
    use crate::storage::{FailingStorage, FileStorage, MemoryStorage};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn deck(id: &str, cards: usize) -> Deck {
        Deck {
            id: DeckId::from(id),
            name: format!("deck {}", id),
            cards: (0..cards)
                .map(|i| CardRecord::new([format!("q{}", i)], format!("a{}", i)).unwrap())
                .collect(),
        }
    }

    #[test]
    fn test_add_persists_snapshot() {
        let store = MemoryStorage::new();
        let mut catalog = DeckCatalog::open(&store);

        catalog.add_deck(deck("one", 2)).unwrap();
        catalog.add_deck(deck("two", 1)).unwrap();

        let reopened = DeckCatalog::open(&store);
        let decks = reopened.list_decks();
        let names: Vec<&str> = decks.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["deck one", "deck two"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let store = MemoryStorage::new();
        let mut catalog = DeckCatalog::open(&store);

        catalog.add_deck(deck("one", 2)).unwrap();
        let result = catalog.add_deck(deck("one", 5));

        assert!(matches!(result, Err(FlashcardError::DuplicateDeck(_))));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(&DeckId::from("one")).unwrap().len(), 2);
    }

    #[test]
    fn test_import_parses_and_adds() {
        let store = MemoryStorage::new();
        let mut catalog = DeckCatalog::open(&store);

        let imported = catalog
            .import("cat;gato,meow\n\n,missing\ngood,", "animals.csv", &DeckParser::new())
            .unwrap();
        assert_eq!(imported.deck.name, "animals");
        assert_eq!(imported.deck.len(), 1);
        assert_eq!(imported.skipped, 2);
        assert!(store.contains_key(DECKS_KEY));
    }

    #[test]
    fn test_import_keeps_empty_deck() {
        let store = MemoryStorage::new();
        let mut catalog = DeckCatalog::open(&store);

        let id = catalog.import("", "blank.csv", &DeckParser::new()).unwrap().deck.id.clone();
        assert!(catalog.get(&id).unwrap().is_empty());
        assert!(matches!(
            catalog.select_deck(&id),
            Err(FlashcardError::EmptyDeck(_))
        ));
    }

    #[test]
    fn test_delete_last_deck_removes_key() {
        let temp_dir = TempDir::new().unwrap();
        let file_storage = FileStorage::new(temp_dir.path().to_path_buf());
        let mut catalog = DeckCatalog::open(&file_storage);

        catalog.add_deck(deck("one", 1)).unwrap();
        assert!(temp_dir.path().join("decks.json").exists());

        let removed = catalog.delete_deck(&DeckId::from("one")).unwrap();
        assert_eq!(removed.name, "deck one");
        assert!(catalog.is_empty());
        assert!(!temp_dir.path().join("decks.json").exists());
        assert!(catalog.storage().load().is_empty());
    }

    #[test]
    fn test_delete_keeps_remaining_order() {
        let store = MemoryStorage::new();
        let mut catalog = DeckCatalog::open(&store);
        for id in ["a", "b", "c"] {
            catalog.add_deck(deck(id, 1)).unwrap();
        }

        catalog.delete_deck(&DeckId::from("b")).unwrap();

        let reopened = DeckCatalog::open(&store);
        let decks = reopened.list_decks();
        let ids: Vec<&str> = decks.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_failed_save_keeps_change_in_memory() {
        let store = FailingStorage::default();
        let mut catalog = DeckCatalog::open(&store);
        catalog.add_deck(deck("kept", 1)).unwrap();

        store.set_failing(true);
        let added = catalog.add_deck(deck("unsaved", 2));
        assert!(matches!(added, Err(FlashcardError::Storage(_))));
        assert_eq!(catalog.get(&DeckId::from("unsaved")).unwrap().len(), 2);

        let deleted = catalog.delete_deck(&DeckId::from("kept"));
        assert!(matches!(deleted, Err(FlashcardError::Storage(_))));
        assert!(catalog.get(&DeckId::from("kept")).is_none());
        assert_eq!(catalog.len(), 1);

        // The last successful snapshot is still what a fresh catalog sees
        store.set_failing(false);
        let reopened = DeckCatalog::open(&store);
        let decks = reopened.list_decks();
        let ids: Vec<&str> = decks.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["kept"]);
    }

    #[test]
    fn test_open_with_unreadable_store_starts_empty() {
        let store = FailingStorage::failing();
        let catalog = DeckCatalog::open(&store);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_delete_unknown_deck() {
        let mut catalog = DeckCatalog::open(MemoryStorage::new());
        let result = catalog.delete_deck(&DeckId::from("missing"));
        assert!(matches!(result, Err(FlashcardError::DeckNotFound(_))));
    }

    #[test]
    fn test_select_deck() {
        let store = MemoryStorage::new();
        let mut catalog = DeckCatalog::open(&store);
        catalog.add_deck(deck("one", 3)).unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        let session = catalog
            .select_deck_with_rng(&DeckId::from("one"), &mut rng)
            .unwrap();
        assert_eq!(session.position(), (1, 3));
        assert_eq!(session.stats().remaining, 3);

        assert!(matches!(
            catalog.select_deck(&DeckId::from("nope")),
            Err(FlashcardError::DeckNotFound(_))
        ));
    }

    #[test]
    fn test_open_with_corrupt_store_starts_empty() {
        let store = MemoryStorage::new();
        store.set(DECKS_KEY, "[{\"id\": 1}]").unwrap();

        let mut catalog = DeckCatalog::open(&store);
        assert!(catalog.is_empty());

        // The next write replaces the corrupt value with a full snapshot
        catalog.add_deck(deck("fresh", 1)).unwrap();
        assert_eq!(DeckCatalog::open(&store).len(), 1);
    }
}
