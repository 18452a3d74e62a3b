//! User settings and data directory resolution

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::flashcards::parser::{CommaPolicy, DeckParser, DEFAULT_STRIP_EXTENSIONS};
use crate::storage::{FileStorage, Result};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "CYPRESS_DATA_DIR";

/// Import settings, read from `settings.json` in the data directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// How to treat lines with more than two comma-separated fields
    pub comma_policy: CommaPolicy,
    /// File extensions removed from a file name to form the deck name
    pub strip_extensions: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            comma_policy: CommaPolicy::default(),
            strip_extensions: DEFAULT_STRIP_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl Settings {
    pub fn parser(&self) -> DeckParser {
        DeckParser::new()
            .with_comma_policy(self.comma_policy)
            .with_strip_extensions(self.strip_extensions.clone())
    }
}

/// Get the settings file path
pub fn get_settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("settings.json")
}

/// Load settings, falling back to defaults when the file is absent
pub fn load_settings(data_dir: &Path) -> Result<Settings> {
    let settings_path = get_settings_path(data_dir);

    if !settings_path.exists() {
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(&settings_path)?;
    let settings: Settings = serde_json::from_str(&content)?;
    Ok(settings)
}

/// Save settings to file
pub fn save_settings(data_dir: &Path, settings: &Settings) -> Result<()> {
    fs::create_dir_all(data_dir)?;
    let content = serde_json::to_string_pretty(settings)?;
    fs::write(get_settings_path(data_dir), content)?;
    Ok(())
}

/// Pick the data directory: explicit path first, then the platform default
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => FileStorage::default_data_dir(),
    }
}
