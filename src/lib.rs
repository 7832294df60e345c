//! Strictly Wordle - terminal client for a solver-backed word game
//!
//! The crate models one round of a five-letter word game whose scoring and
//! suggestions come from a remote service.
//!
//! # Architecture
//!
//! - **Board**: fixed 6x5 grid of tiles plus the input cursor
//! - **Input**: physical and on-screen keys mapped to one [`Action`] type
//! - **Controller**: session state machine, guess protocol, error recovery
//! - **Scoring**: numeric letter states mapped to tile colours
//! - **Client**: HTTP access to the scoring service
//! - **TUI / line mode**: presentation over controller snapshots
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use strictly_wordle::{Action, GameController, GameMode, HttpScoringClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = HttpScoringClient::new("http://localhost:5001", Duration::from_secs(10))?;
//! let mut controller = GameController::default();
//! controller.start_game(&client, GameMode::Daily).await;
//! controller.type_word("crane");
//! controller.press(&client, Action::Submit).await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod client;
mod config;
mod controller;
mod error;
mod input;
mod mode;
mod notice;
mod scoring;
mod session;

/// Line-oriented stdin/stdout front end.
pub mod line;
/// Terminal UI front end.
pub mod tui;

// Crate-level exports - Board model
pub use board::{
    Board, Cursor, MAX_ROWS, Row, Tile, TileStatus, WORD_LENGTH, cursor_invariant_holds,
};

// Crate-level exports - Input routing
pub use input::{Action, Routed, VirtualKey, route_key};

// Crate-level exports - Session state machine
pub use controller::{
    Completion, GameController, GuessRecord, GuessTicket, REQUEST_TIMEOUT, StartTicket,
};
pub use session::{Session, SessionPhase};

// Crate-level exports - Result mapping
pub use scoring::{map_states, status_for};

// Crate-level exports - Scoring service
pub use client::{
    GuessResponse, HttpScoringClient, ScoringService, StartedGame, Suggestion, with_deadline,
};
pub use error::{Rejection, ServiceError};
pub use mode::GameMode;

// Crate-level exports - Notices
pub use notice::{NOTICE_LIFETIME, Notice, NoticeLevel, Notices};

// Crate-level exports - Configuration
pub use config::{ConfigError, ENV_MODE, ENV_SERVER_URL, ENV_TIMEOUT_SECS, WordleConfig};
