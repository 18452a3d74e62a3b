//! Flashcard error types

use thiserror::Error;

use super::models::DeckId;
use super::session::SessionState;
use crate::storage::StorageError;

/// Errors surfaced by the deck catalog and study sessions
#[derive(Debug, Error)]
pub enum FlashcardError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Deck not found: {0}")]
    DeckNotFound(DeckId),

    #[error("Deck already exists: {0}")]
    DuplicateDeck(DeckId),

    #[error("Deck has no cards: {0}")]
    EmptyDeck(DeckId),

    #[error("Cannot {operation} while session is {state}")]
    InvalidTransition {
        operation: &'static str,
        state: SessionState,
    },
}

/// Result type alias for flashcard operations
pub type Result<T> = std::result::Result<T, FlashcardError>;
