//! Study session state machine
//!
//! A session walks once through a shuffled copy of a deck's card order:
//!
//! ```text
//!            submit_answer            advance (more cards)
//! InProgress ─────────────> Checked ─────────────────────> InProgress
//!     │                        │
//!     │ finish_early           │ advance (last card) / finish_early
//!     └───────────> Complete <─┘
//!                      │ replay
//!                      └──────> InProgress
//! ```
//!
//! "Idle" is the absence of a session. The session only borrows its deck.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use super::errors::{FlashcardError, Result};
use super::models::{CardRecord, Deck};

/// Where the session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for an answer to the current card
    InProgress,
    /// The current card has been answered
    Checked { correct: bool },
    /// The pass is over; stats are frozen until replay
    Complete,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => f.write_str("in progress"),
            Self::Checked { .. } => f.write_str("checked"),
            Self::Complete => f.write_str("complete"),
        }
    }
}

/// Running tally for one pass
///
/// `correct + incorrect + remaining` always equals the deck size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub correct: usize,
    pub incorrect: usize,
    pub remaining: usize,
}

impl SessionStats {
    fn fresh(total: usize) -> Self {
        Self {
            correct: 0,
            incorrect: 0,
            remaining: total,
        }
    }

    pub fn answered(&self) -> usize {
        self.correct + self.incorrect
    }
}

/// Feedback for the most recently checked card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback<'a> {
    pub correct: bool,
    pub expected: &'a str,
}

/// Result of the combined submit-or-advance action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Checked { correct: bool },
    Advanced,
    Completed,
}

/// Compare an answer with the expected one: trimmed, case-insensitive, exact
pub fn answers_match(given: &str, expected: &str) -> bool {
    normalize(given) == normalize(expected)
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// One quiz pass over a deck
#[derive(Debug, Clone)]
pub struct StudySession<'a> {
    deck: &'a Deck,
    order: Vec<usize>,
    cursor: usize,
    state: SessionState,
    stats: SessionStats,
}

impl<'a> StudySession<'a> {
    /// Start a pass over `deck` in an order drawn from `rng`
    pub fn start<R: Rng + ?Sized>(deck: &'a Deck, rng: &mut R) -> Result<Self> {
        if deck.is_empty() {
            return Err(FlashcardError::EmptyDeck(deck.id.clone()));
        }

        log::debug!("Starting session over deck '{}' ({} cards)", deck.name, deck.len());

        Ok(Self {
            deck,
            order: shuffled_order(deck.len(), rng),
            cursor: 0,
            state: SessionState::InProgress,
            stats: SessionStats::fresh(deck.len()),
        })
    }

    pub fn deck(&self) -> &'a Deck {
        self.deck
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// The card order for this pass, as indices into the deck
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// 1-based number of the current card and the total card count
    pub fn position(&self) -> (usize, usize) {
        (self.cursor + 1, self.order.len())
    }

    /// The card being asked, or `None` once the pass is complete
    pub fn current_card(&self) -> Option<&'a CardRecord> {
        if self.state == SessionState::Complete {
            return None;
        }
        Some(self.card_at_cursor())
    }

    /// Outcome of the current card, available until the session advances
    pub fn last_answer(&self) -> Option<AnswerFeedback<'a>> {
        match self.state {
            SessionState::Checked { correct } => Some(AnswerFeedback {
                correct,
                expected: self.card_at_cursor().back(),
            }),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    /// Every card answered and none wrong
    pub fn is_perfect_run(&self) -> bool {
        self.is_complete() && self.stats.incorrect == 0 && self.stats.remaining == 0
    }

    /// Check `answer` against the current card
    pub fn submit_answer(&mut self, answer: &str) -> Result<bool> {
        if self.state != SessionState::InProgress {
            return Err(self.invalid("submit an answer"));
        }

        let correct = answers_match(answer, self.card_at_cursor().back());
        if correct {
            self.stats.correct += 1;
        } else {
            self.stats.incorrect += 1;
        }
        self.stats.remaining -= 1;
        self.state = SessionState::Checked { correct };

        Ok(correct)
    }

    /// Move past a checked card; completes the pass after the last one
    pub fn advance(&mut self) -> Result<SessionState> {
        if !matches!(self.state, SessionState::Checked { .. }) {
            return Err(self.invalid("advance"));
        }

        if self.cursor + 1 < self.order.len() {
            self.cursor += 1;
            self.state = SessionState::InProgress;
        } else {
            self.complete();
        }

        Ok(self.state)
    }

    /// End the pass now, keeping the current tally
    pub fn finish_early(&mut self) -> Result<SessionStats> {
        if self.is_complete() {
            return Err(self.invalid("finish early"));
        }

        self.complete();
        Ok(self.stats)
    }

    /// Start another pass over the same deck with a fresh order
    pub fn replay<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        if !self.is_complete() {
            return Err(self.invalid("replay"));
        }

        self.order = shuffled_order(self.deck.len(), rng);
        self.cursor = 0;
        self.state = SessionState::InProgress;
        self.stats = SessionStats::fresh(self.deck.len());
        log::debug!("Replaying deck '{}'", self.deck.name);
        Ok(())
    }

    /// Submit when waiting for an answer, advance when already checked
    pub fn submit_or_advance(&mut self, answer: &str) -> Result<StepOutcome> {
        match self.state {
            SessionState::InProgress => {
                let correct = self.submit_answer(answer)?;
                Ok(StepOutcome::Checked { correct })
            }
            SessionState::Checked { .. } => match self.advance()? {
                SessionState::Complete => Ok(StepOutcome::Completed),
                _ => Ok(StepOutcome::Advanced),
            },
            SessionState::Complete => Err(self.invalid("continue")),
        }
    }

    /// Leave the session, handing back the final tally
    pub fn return_to_catalog(self) -> SessionStats {
        self.stats
    }

    fn complete(&mut self) {
        self.state = SessionState::Complete;
        log::info!(
            "Finished deck '{}': {} correct, {} incorrect, {} remaining",
            self.deck.name,
            self.stats.correct,
            self.stats.incorrect,
            self.stats.remaining
        );
    }

    fn card_at_cursor(&self) -> &'a CardRecord {
        &self.deck.cards[self.order[self.cursor]]
    }

    fn invalid(&self, operation: &'static str) -> FlashcardError {
        FlashcardError::InvalidTransition {
            operation,
            state: self.state,
        }
    }
}

/// Uniform random permutation of `0..len` (Fisher-Yates)
fn shuffled_order<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    order.shuffle(rng);
    order
}
