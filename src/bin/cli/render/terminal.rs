use cypress_lib::flashcards::{CardRecord, SessionStats};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in `color` when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Render the front of a card
///
/// The primary term comes first, the first annotation below it, and any
/// further annotations joined on a third line.
pub fn render_front(card: &CardRecord, use_color: bool) -> Vec<String> {
    let mut lines = vec![paint(card.primary(), Color::BOLD, use_color)];

    let annotations = card.annotations();
    if let Some(first) = annotations.first() {
        lines.push(paint(first, Color::GRAY, use_color));
    }
    if annotations.len() > 1 {
        lines.push(paint(&annotations[1..].join(", "), Color::DIM, use_color));
    }

    lines
}

/// Render "n of m" progress
pub fn render_progress(position: (usize, usize), use_color: bool) -> String {
    let (current, total) = position;
    paint(&format!("{} of {}", current, total), Color::DIM, use_color)
}

pub fn render_stats(stats: &SessionStats, use_color: bool) -> Vec<String> {
    vec![
        paint("Statistics", Color::BOLD, use_color),
        format!("  Correct:   {}", stats.correct),
        format!("  Incorrect: {}", stats.incorrect),
        format!("  Remaining: {}", stats.remaining),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_front_layouts() {
        let single = CardRecord::new(["gato"], "cat").unwrap();
        assert_eq!(render_front(&single, false), vec!["gato"]);

        let double = CardRecord::new(["gato", "noun"], "cat").unwrap();
        assert_eq!(render_front(&double, false), vec!["gato", "noun"]);

        let many = CardRecord::new(["猫", "neko", "noun", "common"], "cat").unwrap();
        assert_eq!(render_front(&many, false), vec!["猫", "neko", "noun, common"]);
    }

    #[test]
    fn test_paint_respects_color_flag() {
        assert_eq!(paint("x", Color::RED, false), "x");
        assert_eq!(paint("x", Color::RED, true), "\x1b[31mx\x1b[0m");
    }
}
