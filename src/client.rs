//! HTTP client for the scoring service.

use std::time::Duration;

use async_trait::async_trait;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::error::{Rejection, ServiceError};
use crate::mode::GameMode;

/// A ranked next-guess suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
pub struct Suggestion {
    /// Suggested word.
    pub word: String,
    /// Probability in `[0, 1]` assigned by the solver.
    pub probability: f64,
}

/// Body of a start-game response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StartGameResponse {
    status: String,
    session_id: String,
    #[serde(default)]
    suggestions: Vec<Suggestion>,
}

/// A freshly started game.
#[derive(Debug, Clone, PartialEq, Getters, new)]
pub struct StartedGame {
    session_id: String,
    suggestions: Vec<Suggestion>,
}

impl StartedGame {
    /// Splits into session id and suggestions.
    pub fn into_parts(self) -> (String, Vec<Suggestion>) {
        (self.session_id, self.suggestions)
    }
}

/// Body of a make-guess request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct GuessRequest<'a> {
    guess: &'a str,
    session_id: &'a str,
}

/// Body of a successful make-guess response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GuessResponse {
    /// One numeric state per letter.
    pub state: Vec<serde_json::Value>,
    /// Updated suggestions.
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
    /// Whether the round is finished.
    #[serde(default)]
    pub done: bool,
    /// Answer, sent once the round is finished.
    #[serde(default)]
    pub target_word: Option<String>,
    /// Solver reward for this guess.
    #[serde(default)]
    pub reward: Option<f64>,
    /// Number of guesses the server has recorded.
    #[serde(default)]
    pub current_row: Option<usize>,
    /// Whether this is the daily puzzle.
    #[serde(default)]
    pub is_daily: Option<bool>,
}

/// Body of a non-2xx response.
#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Body of the connectivity probe.
#[derive(Debug, Clone, Deserialize)]
struct PingBody {
    message: String,
}

/// The remote service that starts rounds and scores guesses.
#[async_trait]
pub trait ScoringService: Send + Sync {
    /// Starts a new round.
    async fn start_game(&self, mode: GameMode) -> Result<StartedGame, ServiceError>;

    /// Scores a guess within a session.
    async fn make_guess(&self, guess: &str, session_id: &str)
    -> Result<GuessResponse, ServiceError>;
}

/// Runs a request with a deadline, turning expiry into [`ServiceError::TimedOut`].
pub async fn with_deadline<T, F>(deadline: Duration, request: F) -> Result<T, ServiceError>
where
    F: std::future::Future<Output = Result<T, ServiceError>>,
{
    match tokio::time::timeout(deadline, request).await {
        Ok(result) => result,
        Err(_) => {
            warn!(deadline_secs = deadline.as_secs(), "Request deadline expired");
            Err(ServiceError::TimedOut(deadline))
        }
    }
}

/// reqwest-backed [`ScoringService`].
#[derive(Debug, Clone)]
pub struct HttpScoringClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpScoringClient {
    /// Creates a client with a cookie store and a per-request timeout.
    #[instrument(skip_all)]
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                error!(error = %e, "Failed to build HTTP client");
                ServiceError::Transport(e.to_string())
            })?;

        info!(timeout_secs = timeout.as_secs(), "Created scoring client");
        Ok(Self {
            base_url,
            client,
            timeout,
        })
    }

    /// Base URL of the service.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Probes `/api/test-cors` and returns the server's message.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn ping(&self) -> Result<String, ServiceError> {
        let response = self
            .client
            .get(self.endpoint("/api/test-cors"))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;
        debug!(status = %status, body = %text, "Ping response");

        if !status.is_success() {
            return Err(rejection_from_body(status, &text));
        }

        let body: PingBody = serde_json::from_str(&text)
            .map_err(|e| ServiceError::ContractViolation(format!("ping body: {}", e)))?;
        Ok(body.message)
    }

    fn transport_error(&self, err: reqwest::Error) -> ServiceError {
        if err.is_timeout() {
            warn!(error = %err, "Request timed out");
            ServiceError::TimedOut(self.timeout)
        } else {
            warn!(error = %err, "Request failed");
            ServiceError::from(err)
        }
    }
}

/// Builds the error for a non-2xx response.
fn rejection_from_body(status: reqwest::StatusCode, text: &str) -> ServiceError {
    match serde_json::from_str::<ErrorBody>(text) {
        Ok(body) => ServiceError::Rejected(Rejection::from_message(&body.error)),
        Err(_) => ServiceError::Rejected(Rejection::Other(format!("HTTP {}", status))),
    }
}

#[async_trait]
impl ScoringService for HttpScoringClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn start_game(&self, mode: GameMode) -> Result<StartedGame, ServiceError> {
        info!(%mode, "Starting game");

        let response = self
            .client
            .post(self.endpoint(mode.start_path()))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;
        debug!(status = %status, body = %text, "Start game response");

        if !status.is_success() {
            let err = rejection_from_body(status, &text);
            warn!(error = %err, "Start game rejected");
            return Err(err);
        }

        let body: StartGameResponse = serde_json::from_str(&text).map_err(|e| {
            error!(error = %e, body = %text, "Malformed start game response");
            ServiceError::ContractViolation(format!("start game body: {}", e))
        })?;

        if body.status != "success" {
            warn!(status = %body.status, "Start game did not report success");
            return Err(ServiceError::Rejected(Rejection::Other(format!(
                "Could not start game ({})",
                body.status
            ))));
        }

        info!(session_id = %body.session_id, suggestions = body.suggestions.len(), "Game started");
        Ok(StartedGame::new(body.session_id, body.suggestions))
    }

    #[instrument(skip(self, session_id), fields(base_url = %self.base_url))]
    async fn make_guess(
        &self,
        guess: &str,
        session_id: &str,
    ) -> Result<GuessResponse, ServiceError> {
        info!("Sending guess");

        let response = self
            .client
            .post(self.endpoint("/api/make-guess"))
            .json(&GuessRequest { guess, session_id })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;
        debug!(status = %status, body = %text, "Guess response");

        if !status.is_success() {
            let err = rejection_from_body(status, &text);
            warn!(error = %err, "Guess rejected");
            return Err(err);
        }

        serde_json::from_str(&text).map_err(|e| {
            error!(error = %e, body = %text, "Malformed guess response");
            ServiceError::ContractViolation(format!("guess body: {}", e))
        })
    }
}
