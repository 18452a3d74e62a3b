use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &mut App, file: &Path, format: &OutputFormat, use_color: bool) -> Result<()> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let source_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    let parser = app.settings.parser();
    let imported = app.catalog.import(&raw, &source_name, &parser)
        .context("Failed to save imported deck")?;
    let deck = imported.deck;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": deck.id,
                "name": deck.name,
                "cardCount": deck.len(),
                "skippedLines": imported.skipped,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Imported deck \"{}\" ({} cards)", deck.name, deck.len());
            if imported.skipped > 0 {
                println!("  Skipped {} malformed lines", imported.skipped);
            }
            if deck.is_empty() {
                println!("  {}", terminal::paint("Warning: the deck has no cards and cannot be studied", Color::YELLOW, use_color));
            }
            println!("  ID: {}", deck.id);
        }
    }

    Ok(())
}
