//! Persistence for the deck collection
//!
//! The whole collection lives under a single key as a JSON array:
//! ```text
//! decks -> [{ "id": "...", "name": "...", "cards": [{ "front": [...], "back": "..." }] }]
//! ```
//! An empty collection is represented by the absence of the key.

use indexmap::IndexMap;
use serde::Deserialize;

use super::models::{CardRecord, Deck, DeckId, RawCard};
use crate::storage::{KeyValueStore, Result};

/// Key holding the serialized deck collection
pub const DECKS_KEY: &str = "decks";

/// Deck as found on disk; cards are validated one by one on load
#[derive(Deserialize)]
struct StoredDeck {
    id: DeckId,
    name: String,
    #[serde(default)]
    cards: Vec<RawCard>,
}

impl StoredDeck {
    fn into_deck(self) -> Deck {
        let cards: Vec<CardRecord> = self
            .cards
            .into_iter()
            .filter_map(|raw| match CardRecord::try_from(raw) {
                Ok(card) => Some(card),
                Err(e) => {
                    log::warn!("Dropping invalid card in deck '{}': {}", self.name, e);
                    None
                }
            })
            .collect();

        Deck {
            id: self.id,
            name: self.name,
            cards,
        }
    }
}

/// Storage manager for the deck collection
pub struct FlashcardStorage<S> {
    store: S,
}

impl<S: KeyValueStore> FlashcardStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load every persisted deck, in stored order
    ///
    /// Never fails: a missing key yields an empty collection, and an
    /// unreadable or corrupt value is logged and treated as empty. Cards
    /// with a blank label or answer are dropped. A deck whose id repeats an
    /// earlier one is kept under a fresh id.
    pub fn load(&self) -> IndexMap<DeckId, Deck> {
        let content = match self.store.get(DECKS_KEY) {
            Ok(Some(content)) => content,
            Ok(None) => return IndexMap::new(),
            Err(e) => {
                log::error!("Failed to read saved decks: {}", e);
                return IndexMap::new();
            }
        };

        match serde_json::from_str::<Vec<StoredDeck>>(&content) {
            Ok(stored) => {
                log::debug!("Loaded {} decks", stored.len());
                let mut decks = IndexMap::with_capacity(stored.len());
                for deck in stored.into_iter().map(StoredDeck::into_deck) {
                    insert_unique(&mut decks, deck);
                }
                decks
            }
            Err(e) => {
                log::error!("Error parsing saved decks: {}", e);
                IndexMap::new()
            }
        }
    }

    /// Replace the persisted collection with `decks`
    ///
    /// An empty collection removes the key instead of writing `[]`.
    pub fn save(&self, decks: &IndexMap<DeckId, Deck>) -> Result<()> {
        if decks.is_empty() {
            self.store.remove(DECKS_KEY)?;
            log::debug!("Removed saved decks");
            return Ok(());
        }

        let snapshot: Vec<&Deck> = decks.values().collect();
        let content = serde_json::to_string_pretty(&snapshot)?;
        self.store.set(DECKS_KEY, &content)?;
        log::debug!("Saved {} decks", decks.len());
        Ok(())
    }
}

fn insert_unique(decks: &mut IndexMap<DeckId, Deck>, mut deck: Deck) {
    while decks.contains_key(&deck.id) {
        let fresh = DeckId::generate();
        log::warn!("Duplicate deck id {} for '{}', re-keyed as {}", deck.id, deck.name, fresh);
        deck.id = fresh;
    }
    decks.insert(deck.id.clone(), deck);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::models::CardRecord;
    use crate::storage::{FailingStorage, FileStorage, MemoryStorage};
    use tempfile::TempDir;

    fn sample_decks() -> IndexMap<DeckId, Deck> {
        let decks = vec![
            Deck {
                id: DeckId::from("b"),
                name: "animals".to_string(),
                cards: vec![
                    CardRecord::new(["cat", "gato"], "meow").unwrap(),
                    CardRecord::new(["dog"], "woof").unwrap(),
                ],
            },
            Deck {
                id: DeckId::from("a"),
                name: "empty".to_string(),
                cards: Vec::new(),
            },
        ];
        decks.into_iter().map(|d| (d.id.clone(), d)).collect()
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let storage = FlashcardStorage::new(MemoryStorage::new());
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_value_is_empty() {
        let store = MemoryStorage::new();
        store.set(DECKS_KEY, "{not json").unwrap();

        let storage = FlashcardStorage::new(store);
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_save_and_load_preserves_order() {
        let storage = FlashcardStorage::new(MemoryStorage::new());
        storage.save(&sample_decks()).unwrap();

        let loaded = storage.load();
        let ids: Vec<&str> = loaded.keys().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(loaded, sample_decks());
    }

    #[test]
    fn test_save_is_idempotent() {
        let storage = FlashcardStorage::new(MemoryStorage::new());
        storage.save(&sample_decks()).unwrap();

        storage.save(&storage.load()).unwrap();
        let first = storage.store().get(DECKS_KEY).unwrap();
        storage.save(&storage.load()).unwrap();
        let second = storage.store().get(DECKS_KEY).unwrap();

        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_save_empty_removes_key() {
        let storage = FlashcardStorage::new(MemoryStorage::new());
        storage.save(&sample_decks()).unwrap();
        assert!(storage.store().contains_key(DECKS_KEY));

        storage.save(&IndexMap::new()).unwrap();
        assert!(!storage.store().contains_key(DECKS_KEY));
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_reads_legacy_timestamp_ids_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let file_storage = FileStorage::new(temp_dir.path().to_path_buf());
        file_storage
            .set(
                DECKS_KEY,
                r#"[{"id":"1727000000000","name":"verbs","cards":[{"front":["ir","verb"],"back":"to go"}]}]"#,
            )
            .unwrap();

        let storage = FlashcardStorage::new(file_storage);
        let loaded = storage.load();
        let deck = &loaded[&DeckId::from("1727000000000")];
        assert_eq!(deck.name, "verbs");
        assert_eq!(deck.cards[0].annotations(), &["verb".to_string()]);
    }

    #[test]
    fn test_load_read_error_is_empty() {
        let store = FailingStorage::default();
        FlashcardStorage::new(&store).save(&sample_decks()).unwrap();

        store.set_failing(true);
        assert!(FlashcardStorage::new(&store).load().is_empty());
    }

    #[test]
    fn test_load_drops_invalid_cards() {
        let store = MemoryStorage::new();
        store
            .set(
                DECKS_KEY,
                r#"[
                    {"id":"1","name":"mixed","cards":[
                        {"front":[""],"back":"missing"},
                        {"front":["gato"],"back":"cat"},
                        {"front":[],"back":""}
                    ]},
                    {"id":"2","name":"nameless"}
                ]"#,
            )
            .unwrap();

        let loaded = FlashcardStorage::new(store).load();
        assert_eq!(loaded.len(), 2);

        let mixed = &loaded[&DeckId::from("1")];
        assert_eq!(mixed.len(), 1);
        assert_eq!(mixed.cards[0].primary(), "gato");
        assert!(loaded[&DeckId::from("2")].is_empty());
    }

    #[test]
    fn test_load_rekeys_duplicate_ids() {
        let store = MemoryStorage::new();
        store
            .set(
                DECKS_KEY,
                r#"[{"id":"1","name":"a","cards":[]},{"id":"1","name":"b","cards":[]}]"#,
            )
            .unwrap();

        let storage = FlashcardStorage::new(store);
        let loaded = storage.load();
        let names: Vec<&str> = loaded.values().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(loaded[&DeckId::from("1")].name, "a");

        // The next save keeps both decks
        storage.save(&loaded).unwrap();
        assert_eq!(storage.load().len(), 2);
    }
}
