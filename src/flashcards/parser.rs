//! Delimited text import
//!
//! Each line is one record: `<front>,<back>`, where `<front>` is a
//! `;`-separated list of labels. Whitespace around every field is ignored
//! and malformed lines are skipped.

use serde::{Deserialize, Serialize};

use super::models::{CardRecord, Deck};

/// Extensions stripped from the source name when naming a deck
pub const DEFAULT_STRIP_EXTENSIONS: &[&str] = &[".csv", ".tsv", ".txt"];

/// What to do with lines that have more than one comma
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommaPolicy {
    /// Skip the line as malformed
    #[default]
    Reject,
    /// Keep the first two fields and drop the rest
    Truncate,
}

/// Cards recovered from a text file
#[derive(Debug, Clone, Default)]
pub struct ParsedRecords {
    pub cards: Vec<CardRecord>,
    /// Non-blank lines that did not produce a card
    pub skipped: usize,
}

#[derive(Debug, Clone)]
pub struct DeckParser {
    comma_policy: CommaPolicy,
    strip_extensions: Vec<String>,
}

impl Default for DeckParser {
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

impl DeckParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comma_policy(mut self, policy: CommaPolicy) -> Self {
        self.comma_policy = policy;
        self
    }

    pub fn with_strip_extensions(mut self, extensions: Vec<String>) -> Self {
        self.strip_extensions = extensions;
        self
    }

    /// Parse `raw` into a new deck named after `source_name`
    ///
    /// A file with no usable lines produces a deck with zero cards.
    pub fn parse(&self, raw: &str, source_name: &str) -> Deck {
        self.parse_counted(raw, source_name).0
    }

    /// Like [`DeckParser::parse`], also returning how many lines were skipped
    pub fn parse_counted(&self, raw: &str, source_name: &str) -> (Deck, usize) {
        let records = self.parse_records(raw);
        let deck = Deck::new(self.deck_name(source_name), records.cards);
        (deck, records.skipped)
    }

    pub fn parse_records(&self, raw: &str) -> ParsedRecords {
        let mut parsed = ParsedRecords::default();
        // Spreadsheet exports often start with a byte order mark
        let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

        for (line_no, line) in raw.split('\n').enumerate() {
            match self.parse_line(line) {
                Some(card) => parsed.cards.push(card),
                None if line.trim().is_empty() => {}
                None => {
                    log::debug!("Skipping malformed line {}: {:?}", line_no + 1, line);
                    parsed.skipped += 1;
                }
            }
        }

        parsed
    }

    fn parse_line(&self, line: &str) -> Option<CardRecord> {
        let mut tokens = line.split(',');
        let front_spec = tokens.next()?;
        let back = tokens.next()?;

        if self.comma_policy == CommaPolicy::Reject && tokens.next().is_some() {
            return None;
        }

        CardRecord::new(front_spec.split(';'), back)
    }

    /// Derive a deck name from a file name or path
    pub fn deck_name(&self, source_name: &str) -> String {
        let file_name = source_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(source_name);

        let stem = self
            .strip_extensions
            .iter()
            .find_map(|ext| strip_suffix_ignore_case(file_name, ext))
            .unwrap_or(file_name);

        stem.trim().to_string()
    }
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    if suffix.is_empty() || suffix.len() > name.len() {
        return None;
    }

    let split = name.len() - suffix.len();
    let (stem, tail) = (name.get(..split)?, name.get(split..)?);
    tail.eq_ignore_ascii_case(suffix).then_some(stem)
}

/// Parse with default options
pub fn parse_deck(raw: &str, source_name: &str) -> Deck {
    DeckParser::default().parse(raw, source_name)
}
