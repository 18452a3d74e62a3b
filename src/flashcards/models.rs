//! Data models for the flashcard system

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque deck identifier
///
/// Freshly imported decks get a UUIDv7 string, which is time-ordered and
/// unique within the process. Any string is accepted on load so that ids
/// written by earlier versions (millisecond timestamps) keep working.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckId(String);

impl DeckId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DeckId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DeckId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for DeckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single card: one or more front labels and the expected answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCard")]
pub struct CardRecord {
    front: Vec<String>,
    back: String,
}

impl CardRecord {
    /// Build a card, returning `None` if any label or the answer is blank.
    /// Labels and answer are trimmed.
    pub fn new<I, S>(front: I, back: impl AsRef<str>) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let front: Vec<String> = front
            .into_iter()
            .map(|label| label.as_ref().trim().to_string())
            .collect();
        let back = back.as_ref().trim().to_string();

        if front.is_empty() || front.iter().any(|label| label.is_empty()) || back.is_empty() {
            return None;
        }

        Some(Self { front, back })
    }

    pub fn front(&self) -> &[String] {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }

    /// The primary term shown on the card
    pub fn primary(&self) -> &str {
        self.front.first().map(String::as_str).unwrap_or_default()
    }

    /// Secondary labels such as part of speech or transliteration
    pub fn annotations(&self) -> &[String] {
        self.front.get(1..).unwrap_or_default()
    }
}

/// Card fields as found on disk, before validation
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawCard {
    #[serde(default)]
    pub front: Vec<String>,
    #[serde(default)]
    pub back: String,
}

impl TryFrom<RawCard> for CardRecord {
    type Error = String;

    fn try_from(raw: RawCard) -> Result<Self, Self::Error> {
        CardRecord::new(&raw.front, &raw.back)
            .ok_or_else(|| format!("card {:?} -> {:?} has a blank label or answer", raw.front, raw.back))
    }
}

/// A named collection of cards imported from one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    #[serde(default)]
    pub cards: Vec<CardRecord>,
}

impl Deck {
    pub fn new(name: String, cards: Vec<CardRecord>) -> Self {
        Self {
            id: DeckId::generate(),
            name,
            cards,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
