use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let decks = app.catalog.list_decks();

    match format {
        OutputFormat::Json => {
            let output: Vec<_> = decks.iter()
                .map(|deck| serde_json::json!({
                    "id": deck.id,
                    "name": deck.name,
                    "cardCount": deck.len(),
                }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if decks.is_empty() {
                println!("(no decks)");
                return Ok(());
            }
            for deck in &decks {
                let id = terminal::paint(&format!("[{}]", deck.id), Color::GRAY, use_color);
                println!("{} ({} cards) {}", deck.name, deck.len(), id);
            }
        }
    }

    Ok(())
}
