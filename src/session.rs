//! Session identity and lifecycle flags for one round.

use derive_getters::Getters;
use tracing::{debug, info, instrument};

/// Coarse lifecycle phase derived from the session flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum SessionPhase {
    /// No playable round (never started, start failed, or session expired).
    Idle,
    /// Accepting input.
    Active,
    /// A guess is in flight.
    Submitting,
    /// Round finished; only a new start-game leaves this phase.
    Over,
}

/// Server-issued identity plus lifecycle flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct Session {
    /// Opaque token from start-game.
    session_id: Option<String>,
    /// Round is playable.
    active: bool,
    /// A guess is outstanding.
    submitting: bool,
    /// Round finished.
    over: bool,
    /// Answer revealed by the service on completion.
    revealed_word: Option<String>,
    /// Whether the service reported this round as the daily puzzle.
    is_daily: bool,
}

impl Session {
    /// An empty, inactive session.
    pub fn new() -> Self {
        Self::default()
    }

    /// A freshly started session. Discards everything from any earlier one.
    #[instrument(skip(session_id))]
    pub fn started(session_id: String, is_daily: bool) -> Self {
        info!(session_id = %session_id, "Session started");
        Self {
            session_id: Some(session_id),
            active: true,
            is_daily,
            ..Self::default()
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        if self.over {
            SessionPhase::Over
        } else if !self.active {
            SessionPhase::Idle
        } else if self.submitting {
            SessionPhase::Submitting
        } else {
            SessionPhase::Active
        }
    }

    /// Whether the input router should act on input.
    pub fn accepts_input(&self) -> bool {
        self.active && !self.over
    }

    pub(crate) fn set_submitting(&mut self, submitting: bool) {
        debug!(submitting, "Submitting flag changed");
        self.submitting = submitting;
    }

    pub(crate) fn set_daily(&mut self, is_daily: bool) {
        self.is_daily = is_daily;
    }

    /// Marks the session unusable after the service forgot it.
    pub(crate) fn invalidate(&mut self) {
        info!(session_id = ?self.session_id, "Session invalidated");
        self.active = false;
    }

    /// Ends the round, recording the answer if the service sent one.
    pub(crate) fn finish(&mut self, revealed_word: Option<String>) {
        info!(session_id = ?self.session_id, revealed = ?revealed_word, "Round over");
        self.over = true;
        self.active = false;
        self.revealed_word = revealed_word;
    }
}
