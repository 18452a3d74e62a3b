use anyhow::{Context, Result};

use crate::app::App;
use crate::{OutputFormat, ThemeChange};

pub fn run(app: &App, change: Option<ThemeChange>, format: &OutputFormat) -> Result<()> {
    let dark = match change {
        None => app.preferences.dark_mode(),
        Some(ThemeChange::Dark) => {
            app.preferences.set_dark_mode(true).context("Failed to save theme")?;
            true
        }
        Some(ThemeChange::Light) => {
            app.preferences.set_dark_mode(false).context("Failed to save theme")?;
            false
        }
        Some(ThemeChange::Toggle) => app.preferences.toggle_dark_mode()
            .context("Failed to save theme")?,
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "darkMode": dark })),
        OutputFormat::Plain => println!("{}", if dark { "dark" } else { "light" }),
    }

    Ok(())
}
