//! Cypress: import flashcard decks from delimited text and quiz yourself on them.

pub mod config;
pub mod flashcards;
pub mod preferences;
pub mod storage;

pub use flashcards::{DeckCatalog, FlashcardError};
pub use preferences::Preferences;
pub use storage::{FileStorage, KeyValueStore, MemoryStorage, StorageError};
