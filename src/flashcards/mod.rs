//! Flashcard decks and study sessions for Cypress
//!
//! This module provides:
//! - Import of delimited text files into decks
//! - Persistence of the deck collection as a single JSON snapshot
//! - The deck catalog (add, delete, list, select)
//! - The study session state machine and its running stats

pub mod catalog;
pub mod errors;
pub mod models;
pub mod parser;
pub mod session;
pub mod storage;

pub use catalog::{DeckCatalog, Imported};
pub use errors::{FlashcardError, Result};
pub use models::*;
pub use parser::{parse_deck, CommaPolicy, DeckParser, ParsedRecords};
pub use session::{AnswerFeedback, SessionState, SessionStats, StepOutcome, StudySession};
pub use storage::FlashcardStorage;
