//! Plays a round on plain stdin/stdout.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::board::{Row, TileStatus, WORD_LENGTH};
use crate::client::ScoringService;
use crate::controller::GameController;
use crate::input::Action;
use crate::mode::GameMode;
use crate::session::SessionPhase;

/// Formats a row: `[C]` correct, `(R)` present, ` a ` absent, ` X ` typed, ` _ ` empty.
pub fn format_row(row: &Row) -> String {
    row.iter()
        .map(|tile| {
            let letter = tile.letter.unwrap_or('_');
            match tile.status {
                TileStatus::Correct => format!("[{}]", letter),
                TileStatus::Present => format!("({})", letter),
                TileStatus::Absent => format!(" {} ", letter.to_ascii_lowercase()),
                TileStatus::Filled | TileStatus::Empty => format!(" {} ", letter),
            }
        })
        .collect()
}

fn print_state<W: Write>(out: &mut W, controller: &GameController, limit: usize) -> Result<()> {
    writeln!(out)?;
    for row in controller.board().rows() {
        writeln!(out, "  {}", format_row(row))?;
    }
    if !controller.suggestions().is_empty() {
        writeln!(out, "Suggestions for next guess and their probabilities:")?;
        for suggestion in controller.suggestions().iter().take(limit) {
            writeln!(out, "  {}: {:.4}", suggestion.word, suggestion.probability)?;
        }
    }
    Ok(())
}

fn flush_notices<W: Write>(out: &mut W, controller: &mut GameController) -> Result<()> {
    for notice in controller.notices().items() {
        writeln!(out, "! {}", notice.message())?;
    }
    while controller.dismiss_latest_notice() {}
    Ok(())
}

/// Runs an interactive round.
///
/// Lines of input are guesses; `:new` starts another round and `:q` quits.
/// Returns when the round ends, input runs out, or the session is lost.
#[instrument(skip_all, fields(%mode))]
pub async fn run_line<S, R, W>(
    service: &S,
    controller: &mut GameController,
    mode: GameMode,
    suggestion_limit: usize,
    input: R,
    mut out: W,
) -> Result<()>
where
    S: ScoringService + ?Sized,
    R: BufRead,
    W: Write,
{
    info!("Starting line mode");
    controller.start_game(service, mode).await;
    flush_notices(&mut out, controller)?;
    if controller.phase() != SessionPhase::Active {
        anyhow::bail!("Could not start a game");
    }
    writeln!(out, "Game on, start guessing")?;

    let mut lines = input.lines();
    loop {
        print_state(&mut out, controller, suggestion_limit)?;

        match controller.phase() {
            SessionPhase::Over => {
                match controller.session().revealed_word() {
                    Some(word) => writeln!(out, "Game Over! The word was: {}", word)?,
                    None => writeln!(out, "Game Over!")?,
                }
                return Ok(());
            }
            SessionPhase::Idle => {
                writeln!(out, "Session ended. Type :new to start another game.")?;
            }
            SessionPhase::Active | SessionPhase::Submitting => {}
        }

        write!(out, "Enter your guess: ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            debug!("Input closed");
            writeln!(out)?;
            return Ok(());
        };
        let line = line.context("Failed to read input")?;
        let guess = line.trim();

        match guess {
            ":q" | ":quit" => return Ok(()),
            ":new" => {
                controller.start_game(service, mode).await;
                flush_notices(&mut out, controller)?;
                continue;
            }
            _ => {}
        }

        if guess.chars().count() != WORD_LENGTH || !guess.chars().all(|c| c.is_ascii_alphabetic()) {
            writeln!(out, "Guesses must be {} letters.", WORD_LENGTH)?;
            continue;
        }

        controller.type_word(guess);
        controller.press(service, Action::Submit).await;
        flush_notices(&mut out, controller)?;
    }
}
