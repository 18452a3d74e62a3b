use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use rand::Rng;

use cypress_lib::flashcards::{SessionState, SessionStats, StepOutcome, StudySession};

use crate::app::App;
use crate::render::terminal::{self, Color};

const HELP: &str =
    "Type the answer and press Enter. Commands: :next moves on after a check, :finish ends the pass, :quit leaves.";

pub fn run(app: &App, query: &str, use_color: bool) -> Result<()> {
    let id = app.find_deck(query)?;
    let mut rng = rand::thread_rng();
    let mut session = app.catalog.select_deck_with_rng(&id, &mut rng)
        .with_context(|| format!("Cannot study '{}'", query))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stats = run_loop(&mut session, stdin.lock(), stdout.lock(), &mut rng, use_color)?;
    log::debug!("Left study session with {:?}", stats);
    Ok(())
}

enum Command<'l> {
    Next,
    Finish,
    Quit,
    Answer(&'l str),
}

fn parse_command(line: &str) -> Command<'_> {
    match line.trim() {
        ":next" | ":n" => Command::Next,
        ":finish" => Command::Finish,
        ":quit" | ":q" => Command::Quit,
        _ => Command::Answer(line),
    }
}

/// Drive `session` from `input` until the user leaves or input ends
pub fn run_loop<I, O, R>(
    session: &mut StudySession<'_>,
    mut input: I,
    mut out: O,
    rng: &mut R,
    use_color: bool,
) -> Result<SessionStats>
where
    I: BufRead,
    O: Write,
    R: Rng + ?Sized,
{
    writeln!(out, "{}", terminal::paint(&session.deck().name, Color::BOLD, use_color))?;
    writeln!(out, "{}", terminal::paint(HELP, Color::DIM, use_color))?;

    let mut line = String::new();
    loop {
        match session.state() {
            SessionState::InProgress => {
                if let Some(card) = session.current_card() {
                    writeln!(out)?;
                    writeln!(out, "{}", terminal::render_progress(session.position(), use_color))?;
                    for front_line in terminal::render_front(card, use_color) {
                        writeln!(out, "{}", front_line)?;
                    }
                }
                write!(out, "> ")?;
            }
            SessionState::Checked { .. } => write!(out, "(Enter for next card) ")?,
            SessionState::Complete => {
                writeln!(out)?;
                for stats_line in terminal::render_stats(&session.stats(), use_color) {
                    writeln!(out, "{}", stats_line)?;
                }
                if session.is_perfect_run() {
                    writeln!(out, "{}", terminal::paint("Perfect run!", Color::GREEN, use_color))?;
                }
                write!(out, "[r] replay, [q] back to decks: ")?;
            }
        }
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        if session.is_complete() {
            if line.trim().eq_ignore_ascii_case("r") {
                session.replay(&mut *rng)?;
                continue;
            }
            break;
        }

        match parse_command(&line) {
            Command::Quit => break,
            Command::Next => match session.state() {
                SessionState::Checked { .. } => {
                    session.advance()?;
                }
                _ => {
                    let hint = "Answer the card first, or :finish to stop.";
                    writeln!(out, "{}", terminal::paint(hint, Color::YELLOW, use_color))?;
                }
            },
            Command::Finish => {
                session.finish_early()?;
            }
            Command::Answer(answer) => match session.submit_or_advance(answer)? {
                StepOutcome::Checked { correct: true } => {
                    writeln!(out, "{}", terminal::paint("Correct!", Color::GREEN, use_color))?;
                }
                StepOutcome::Checked { correct: false } => {
                    writeln!(out, "{}", terminal::paint("Incorrect!", Color::RED, use_color))?;
                    if let Some(feedback) = session.last_answer() {
                        writeln!(out, "Correct answer: {}", feedback.expected)?;
                    }
                }
                StepOutcome::Advanced | StepOutcome::Completed => {}
            },
        }
    }

    Ok(session.stats())
}
