//! Scripted scoring service shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use strictly_wordle::{
    GameController, GameMode, GuessResponse, ScoringService, ServiceError, StartedGame, Suggestion,
};

/// Replays queued responses in order and records what it was asked.
#[derive(Default)]
pub struct ScriptedService {
    starts: Mutex<VecDeque<Result<StartedGame, ServiceError>>>,
    guesses: Mutex<VecDeque<Result<GuessResponse, ServiceError>>>,
    start_calls: AtomicUsize,
    guess_calls: AtomicUsize,
    sent: Mutex<Vec<(String, String)>>,
    modes: Mutex<Vec<GameMode>>,
    delay: Option<Duration>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every guess take `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push_start(&self, result: Result<StartedGame, ServiceError>) -> &Self {
        self.starts.lock().unwrap().push_back(result);
        self
    }

    pub fn push_guess(&self, result: Result<GuessResponse, ServiceError>) -> &Self {
        self.guesses.lock().unwrap().push_back(result);
        self
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn guess_calls(&self) -> usize {
        self.guess_calls.load(Ordering::SeqCst)
    }

    /// `(guess, session_id)` pairs in the order they were sent.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn modes(&self) -> Vec<GameMode> {
        self.modes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScoringService for ScriptedService {
    async fn start_game(&self, mode: GameMode) -> Result<StartedGame, ServiceError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.modes.lock().unwrap().push(mode);
        self.starts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::Transport("no scripted start".to_string())))
    }

    async fn make_guess(
        &self,
        guess: &str,
        session_id: &str,
    ) -> Result<GuessResponse, ServiceError> {
        self.guess_calls.fetch_add(1, Ordering::SeqCst);
        self.sent
            .lock()
            .unwrap()
            .push((guess.to_string(), session_id.to_string()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.guesses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(ServiceError::Transport("no scripted guess".to_string())))
    }
}

pub fn started(session_id: &str) -> Result<StartedGame, ServiceError> {
    Ok(StartedGame::new(
        session_id.to_string(),
        vec![
            Suggestion::new("slate".to_string(), 0.4),
            Suggestion::new("crane".to_string(), 0.3),
        ],
    ))
}

pub fn scored(
    state: &[i64],
    done: bool,
    target_word: Option<&str>,
) -> Result<GuessResponse, ServiceError> {
    Ok(GuessResponse {
        state: state.iter().map(|v| Value::from(*v)).collect(),
        suggestions: vec![Suggestion::new("later".to_string(), 0.9)],
        done,
        target_word: target_word.map(str::to_string),
        reward: Some(0.5),
        current_row: None,
        is_daily: None,
    })
}

/// A controller with a live session `session_id`.
pub async fn active_controller(service: &ScriptedService, session_id: &str) -> GameController {
    let mut controller = GameController::default();
    service.push_start(started(session_id));
    controller.start_game(service, GameMode::Random).await;
    controller
}
