//! Display preferences, kept apart from the deck collection

use crate::storage::{KeyValueStore, Result};

/// Key holding the display mode flag
pub const DARK_MODE_KEY: &str = "darkMode";

pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Whether dark mode is on; anything unreadable counts as off
    pub fn dark_mode(&self) -> bool {
        match self.store.get(DARK_MODE_KEY) {
            Ok(Some(value)) => serde_json::from_str(value.trim()).unwrap_or_else(|e| {
                log::warn!("Ignoring invalid {} value {:?}: {}", DARK_MODE_KEY, value, e);
                false
            }),
            Ok(None) => false,
            Err(e) => {
                log::warn!("Failed to read {}: {}", DARK_MODE_KEY, e);
                false
            }
        }
    }

    pub fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        self.store
            .set(DARK_MODE_KEY, &serde_json::to_string(&enabled)?)
    }

    /// Flip the flag and return the new value
    pub fn toggle_dark_mode(&self) -> Result<bool> {
        let enabled = !self.dark_mode();
        self.set_dark_mode(enabled)?;
        Ok(enabled)
    }
}
