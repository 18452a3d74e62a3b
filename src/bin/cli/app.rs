use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use cypress_lib::config::{self, Settings};
use cypress_lib::flashcards::{Deck, DeckCatalog, DeckId};
use cypress_lib::{FileStorage, Preferences};

/// Shared application state for CLI commands
pub struct App {
    pub data_dir: PathBuf,
    pub settings: Settings,
    pub catalog: DeckCatalog<FileStorage>,
    pub preferences: Preferences<FileStorage>,
}

impl App {
    /// Initialize from the given data directory, or the default one
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = config::resolve_data_dir(data_dir)
            .context("Failed to get data directory")?;

        let storage = FileStorage::new(data_dir.clone());
        storage.init()
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

        let settings = config::load_settings(&data_dir)
            .context("Failed to read settings.json")?;
        log::debug!("Using data directory {} with {:?}", data_dir.display(), settings);

        Ok(Self {
            catalog: DeckCatalog::open(storage),
            preferences: Preferences::new(FileStorage::new(data_dir.clone())),
            data_dir,
            settings,
        })
    }

    /// Find a deck by id, name, or case-insensitive name prefix
    pub fn find_deck(&self, query: &str) -> Result<DeckId> {
        let decks = self.catalog.list_decks();

        if let Some(deck) = decks.iter().find(|d| d.id.as_str() == query) {
            return Ok(deck.id.clone());
        }

        let query_lower = query.to_lowercase();

        // Exact match first
        let exact: Vec<&&Deck> = decks.iter()
            .filter(|d| d.name.to_lowercase() == query_lower)
            .collect();
        if exact.len() == 1 {
            return Ok(exact[0].id.clone());
        }

        // Prefix match
        let matches: Vec<&&Deck> = decks.iter()
            .filter(|d| d.name.to_lowercase().starts_with(&query_lower))
            .collect();

        match matches.len() {
            0 => bail!("No deck matching '{}'. Available decks:\n{}", query, list_names(&decks)),
            1 => Ok(matches[0].id.clone()),
            _ => bail!("Ambiguous deck name '{}'. Matches:\n{}", query,
                matches.iter().map(|d| format!("  - {} [{}]", d.name, d.id)).collect::<Vec<_>>().join("\n")),
        }
    }
}

fn list_names(decks: &[&Deck]) -> String {
    if decks.is_empty() {
        return "  (no decks, import one first)".to_string();
    }
    decks.iter()
        .map(|d| format!("  - {}", d.name))
        .collect::<Vec<_>>()
        .join("\n")
}
