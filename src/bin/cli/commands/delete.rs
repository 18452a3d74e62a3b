use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, query: &str, format: &OutputFormat) -> Result<()> {
    let id = app.find_deck(query)?;
    let deck = app.catalog.delete_deck(&id)
        .context("Failed to delete deck")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": deck.id,
                "name": deck.name,
                "remainingDecks": app.catalog.len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Deleted deck \"{}\"", deck.name);
        }
    }

    Ok(())
}
