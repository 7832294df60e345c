//! Game session controller.
//!
//! Owns the board, cursor and session, and is the only thing that mutates
//! them. Every transition is a synchronous `&mut self` step. Network calls
//! are split in two: a `begin_*` step hands out a ticket describing the
//! request, and a `complete_*` step applies the response for that ticket.
//! The runtime is free to await the request anywhere in between; tickets from
//! a session that has since been replaced are discarded.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use derive_getters::Getters;
use tracing::{debug, error, info, instrument, warn};

use crate::board::{Board, Cursor, MAX_ROWS, TileStatus, WORD_LENGTH};
use crate::client::{GuessResponse, ScoringService, StartedGame, Suggestion, with_deadline};
use crate::error::{Rejection, ServiceError};
use crate::input::Action;
use crate::mode::GameMode;
use crate::notice::{NOTICE_LIFETIME, NoticeLevel, Notices};
use crate::scoring::map_states;
use crate::session::{Session, SessionPhase};

/// Default deadline for a request to the scoring service.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// An outstanding start-game request.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct StartTicket {
    #[getter(skip)]
    seq: u64,
    mode: GameMode,
}

/// An outstanding guess.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GuessTicket {
    #[getter(skip)]
    generation: u64,
    session_id: String,
    word: String,
    row: usize,
}

/// What happened to a completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The response was applied to the current state.
    Applied,
    /// The response belonged to a superseded request and was dropped.
    Discarded,
}

/// A scored row, kept for the round summary.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct GuessRecord {
    word: String,
    statuses: [TileStatus; WORD_LENGTH],
    reward: Option<f64>,
}

/// The game session state machine.
#[derive(Debug, Getters)]
pub struct GameController {
    board: Board,
    cursor: Cursor,
    session: Session,
    suggestions: Vec<Suggestion>,
    history: Vec<GuessRecord>,
    notices: Notices,
    /// Mode of the round currently on the board.
    mode: Option<GameMode>,
    request_timeout: Duration,
    /// Bumped by every successful start; guess tickets carry it.
    #[getter(skip)]
    generation: u64,
    /// Sequence number of the most recently issued start request.
    #[getter(skip)]
    latest_start: u64,
}

impl GameController {
    /// Creates an idle controller.
    #[instrument]
    pub fn new(notice_lifetime: Duration, request_timeout: Duration) -> Self {
        info!("Creating game controller");
        Self {
            board: Board::new(),
            cursor: Cursor::origin(),
            session: Session::new(),
            suggestions: Vec::new(),
            history: Vec::new(),
            notices: Notices::new(notice_lifetime),
            mode: None,
            request_timeout,
            generation: 0,
            latest_start: 0,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    /// Raises a notice stamped with the current time.
    pub fn notify(&mut self, level: NoticeLevel, message: impl AsRef<str>) -> u64 {
        self.notices.push(level, message, Instant::now())
    }

    /// Drops expired notices.
    pub fn expire_notices(&mut self, now: Instant) {
        self.notices.expire(now);
    }

    /// Dismisses one notice by id.
    pub fn dismiss_notice(&mut self, id: u64) -> bool {
        self.notices.dismiss(id)
    }

    /// Dismisses the newest notice.
    pub fn dismiss_latest_notice(&mut self) -> bool {
        self.notices.dismiss_latest()
    }

    /// Dismisses every notice.
    pub fn dismiss_all_notices(&mut self) {
        self.notices.clear();
    }

    /// Best status seen so far for each letter, for keyboard hints.
    pub fn letter_hints(&self) -> BTreeMap<char, TileStatus> {
        let mut hints = BTreeMap::new();
        for tile in self.board.rows().iter().flatten() {
            let Some(letter) = tile.letter else { continue };
            if !tile.status.is_scored() {
                continue;
            }
            let entry = hints.entry(letter).or_insert(tile.status);
            if tile.status.hint_rank() > entry.hint_rank() {
                *entry = tile.status;
            }
        }
        hints
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Applies one input action.
    ///
    /// Returns a ticket when the action starts a guess submission; the caller
    /// must send the request and feed the response to
    /// [`complete_guess`](Self::complete_guess).
    #[instrument(skip(self), fields(row = self.cursor.row, tile = self.cursor.tile))]
    pub fn handle_action(&mut self, action: Action) -> Option<GuessTicket> {
        if !self.session.accepts_input() || *self.session.submitting() || !self.cursor.on_board() {
            debug!(phase = %self.phase(), "Input ignored");
            return None;
        }

        match action {
            Action::Letter(ch) => {
                if self.cursor.tile < WORD_LENGTH && ch.is_ascii_alphabetic() {
                    let letter = ch.to_ascii_uppercase();
                    self.board.set_tile(
                        self.cursor.row,
                        self.cursor.tile,
                        Some(letter),
                        TileStatus::Filled,
                    );
                    self.cursor.tile += 1;
                }
                None
            }
            Action::Delete => {
                if self.cursor.tile > 0 {
                    self.cursor.tile -= 1;
                    self.board
                        .set_tile(self.cursor.row, self.cursor.tile, None, TileStatus::Empty);
                }
                None
            }
            Action::Submit => {
                if !self.cursor.row_complete() {
                    debug!("Row incomplete, submit ignored");
                    return None;
                }
                let word = self.board.word(self.cursor.row).to_ascii_lowercase();
                self.begin_guess(&word)
            }
        }
    }

    /// Replaces whatever is typed in the current row with `word`.
    ///
    /// Goes through the same actions as the keyboard; characters beyond the
    /// row or outside `A-Z` are skipped.
    pub fn type_word(&mut self, word: &str) {
        if !self.session.accepts_input() || *self.session.submitting() {
            return;
        }
        while self.cursor.tile > 0 {
            self.handle_action(Action::Delete);
        }
        for ch in word.chars() {
            self.handle_action(Action::Letter(ch));
        }
    }

    // ------------------------------------------------------------------
    // Start game
    // ------------------------------------------------------------------

    /// Issues a start-game request. Any earlier outstanding start is superseded.
    #[instrument(skip(self))]
    pub fn begin_start_game(&mut self, mode: GameMode) -> StartTicket {
        self.latest_start += 1;
        debug!(seq = self.latest_start, "Start game issued");
        StartTicket {
            seq: self.latest_start,
            mode,
        }
    }

    /// Applies a start-game response.
    ///
    /// Success resets everything. Failure changes nothing but a notice.
    #[instrument(skip(self, result), fields(mode = %ticket.mode))]
    pub fn complete_start_game(
        &mut self,
        ticket: StartTicket,
        result: Result<StartedGame, ServiceError>,
    ) -> Completion {
        if ticket.seq != self.latest_start {
            warn!(
                seq = ticket.seq,
                latest = self.latest_start,
                "Discarding superseded start game response"
            );
            return Completion::Discarded;
        }

        match result {
            Ok(started) => {
                let (session_id, suggestions) = started.into_parts();
                self.generation += 1;
                self.board = Board::new();
                self.cursor = Cursor::origin();
                self.session = Session::started(session_id, ticket.mode == GameMode::Daily);
                self.suggestions = suggestions;
                self.history.clear();
                self.mode = Some(ticket.mode);
                info!(generation = self.generation, "New round ready");
            }
            Err(err) => {
                warn!(error = %err, "Start game failed");
                self.notify(NoticeLevel::Error, format!("Could not start game: {}", err));
            }
        }
        Completion::Applied
    }

    // ------------------------------------------------------------------
    // Guesses
    // ------------------------------------------------------------------

    /// Issues a guess for the current row.
    ///
    /// Returns `None` without touching anything if a guess is already in
    /// flight or there is no active session.
    #[instrument(skip(self))]
    pub fn begin_guess(&mut self, word: &str) -> Option<GuessTicket> {
        if *self.session.submitting() {
            debug!("Guess already in flight, ignoring");
            return None;
        }
        if !self.session.accepts_input() {
            debug!(phase = %self.phase(), "No active session, ignoring guess");
            return None;
        }
        let Some(session_id) = self.session.session_id().clone() else {
            warn!("Active session without id, ignoring guess");
            return None;
        };

        self.session.set_submitting(true);
        info!(row = self.cursor.row, "Guess submitted");
        Some(GuessTicket {
            generation: self.generation,
            session_id,
            word: word.to_string(),
            row: self.cursor.row,
        })
    }

    /// Applies a make-guess response.
    #[instrument(skip(self, result), fields(row = ticket.row, guess = %ticket.word))]
    pub fn complete_guess(
        &mut self,
        ticket: GuessTicket,
        result: Result<GuessResponse, ServiceError>,
    ) -> Completion {
        let same_session = self.session.session_id().as_deref() == Some(ticket.session_id.as_str());
        if ticket.generation != self.generation || !same_session || ticket.row != self.cursor.row {
            warn!(
                ticket_generation = ticket.generation,
                generation = self.generation,
                "Discarding guess response from a previous session"
            );
            return Completion::Discarded;
        }

        self.session.set_submitting(false);
        match result {
            Ok(response) => self.apply_scored_row(&ticket, response),
            Err(err) => self.apply_guess_failure(err),
        }
        Completion::Applied
    }

    fn apply_scored_row(&mut self, ticket: &GuessTicket, response: GuessResponse) {
        let statuses = match map_states(&response.state) {
            Ok(statuses) => statuses,
            Err(err) => {
                error!(error = %err, state = ?response.state, "Guess response violates contract");
                self.abandon_round(&err);
                return;
            }
        };

        let row = self.cursor.row;
        self.board.set_row_statuses(row, &statuses);
        self.suggestions = response.suggestions;
        self.history.push(GuessRecord {
            word: ticket.word.to_ascii_uppercase(),
            statuses,
            reward: response.reward,
        });
        if let Some(is_daily) = response.is_daily {
            self.session.set_daily(is_daily);
        }
        if let Some(server_row) = response.current_row
            && server_row != row + 1
        {
            warn!(server_row, client_row = row + 1, "Server guess count disagrees with board");
        }

        if response.done {
            let revealed = response.target_word.map(|w| w.to_ascii_uppercase());
            let solved = statuses.iter().all(|s| *s == TileStatus::Correct);
            let message = match (&revealed, solved) {
                (_, true) => format!("Solved in {}!", row + 1),
                (Some(word), false) => format!("The word was {}", word),
                (None, false) => "Game over".to_string(),
            };
            self.session.finish(revealed);
            self.notify(NoticeLevel::Success, message);
            return;
        }

        if row < MAX_ROWS {
            self.cursor = Cursor {
                row: row + 1,
                tile: 0,
            };
        }
        debug!(row = self.cursor.row, "Advanced to next row");
    }

    fn apply_guess_failure(&mut self, err: ServiceError) {
        match &err {
            ServiceError::Rejected(Rejection::InvalidWord) => {
                info!("Guess not in word list");
                self.notify(NoticeLevel::Error, "Invalid word");
            }
            ServiceError::Rejected(Rejection::InvalidSession) => {
                warn!("Session rejected by server");
                self.session.invalidate();
                self.notify(
                    NoticeLevel::Error,
                    "Session expired. Please start a new game.",
                );
            }
            ServiceError::ContractViolation(detail) => {
                error!(detail = %detail, "Guess response violates contract");
                self.abandon_round(&err);
            }
            _ => {
                warn!(error = %err, "Guess failed");
                self.notify(NoticeLevel::Error, err.to_string());
            }
        }
    }

    /// The service has counted a guess the board cannot show, so the round
    /// can no longer be kept in step with it.
    fn abandon_round(&mut self, err: &ServiceError) {
        self.session.invalidate();
        self.notify(NoticeLevel::Error, format!("{}. Please start a new game.", err));
    }

    // ------------------------------------------------------------------
    // Awaiting helpers
    // ------------------------------------------------------------------

    /// Starts a round and waits for the response.
    pub async fn start_game<S>(&mut self, service: &S, mode: GameMode) -> Completion
    where
        S: ScoringService + ?Sized,
    {
        let ticket = self.begin_start_game(mode);
        let result = with_deadline(self.request_timeout, service.start_game(mode)).await;
        self.complete_start_game(ticket, result)
    }

    /// Sends a guess ticket and applies the response.
    pub async fn send_guess<S>(&mut self, service: &S, ticket: GuessTicket) -> Completion
    where
        S: ScoringService + ?Sized,
    {
        let result = with_deadline(
            self.request_timeout,
            service.make_guess(&ticket.word, &ticket.session_id),
        )
        .await;
        self.complete_guess(ticket, result)
    }

    /// Applies an action, awaiting the guess it triggers, if any.
    pub async fn press<S>(&mut self, service: &S, action: Action) -> Option<Completion>
    where
        S: ScoringService + ?Sized,
    {
        let ticket = self.handle_action(action)?;
        Some(self.send_guess(service, ticket).await)
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(NOTICE_LIFETIME, REQUEST_TIMEOUT)
    }
}
