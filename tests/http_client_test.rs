//! Tests for the reqwest scoring client against a local mock service.

use std::time::Duration;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use strictly_wordle::{
    GameMode, HttpScoringClient, Rejection, ScoringService, ServiceError, TileStatus, map_states,
};

async fn start_random() -> Response {
    Json(json!({
        "status": "success",
        "session_id": "abc",
        "suggestions": [
            {"word": "slate", "probability": 0.6},
            {"word": "crane", "probability": 0.4}
        ]
    }))
    .into_response()
}

async fn start_daily() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Could not fetch daily word"})),
    )
        .into_response()
}

async fn start_standard() -> Response {
    Json(json!({"status": "pending", "session_id": "zzz", "suggestions": []})).into_response()
}

async fn make_guess(Json(body): Json<Value>) -> Response {
    let guess = body["guess"].as_str().unwrap_or_default().to_string();
    let session_id = body["session_id"].as_str().unwrap_or_default();

    if session_id != "abc" {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "Invalid session"})))
            .into_response();
    }

    match guess.as_str() {
        "zzzzz" => {
            (StatusCode::BAD_REQUEST, Json(json!({"error": "Invalid word"}))).into_response()
        }
        "crash" => (StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").into_response(),
        "sleep" => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"state": [0, 0, 0, 0, 0], "suggestions": [], "done": false}))
                .into_response()
        }
        "short" => Json(json!({"state": [2, 2], "suggestions": [], "done": false})).into_response(),
        "crane" => Json(json!({
            "state": [2, 2, 2, 2, 2],
            "reward": 10.0,
            "done": true,
            "suggestions": [],
            "current_row": 1,
            "is_daily": false,
            "target_word": "crane"
        }))
        .into_response(),
        _ => Json(json!({
            "state": [2, 1, 0, 0, -1],
            "reward": -1.0,
            "done": false,
            "suggestions": [{"word": "later", "probability": 1.0}],
            "current_row": 1,
            "is_daily": false
        }))
        .into_response(),
    }
}

async fn test_cors() -> Response {
    Json(json!({"message": "CORS works!"})).into_response()
}

async fn spawn_mock_service() -> String {
    let app = Router::new()
        .route("/api/start-game-random", post(start_random))
        .route("/api/start-game-daily", post(start_daily))
        .route("/api/start-game", post(start_standard))
        .route("/api/make-guess", post(make_guess))
        .route("/api/test-cors", get(test_cors));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock service");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock service failed");
    });
    format!("http://{}", addr)
}

fn client(base_url: &str) -> HttpScoringClient {
    HttpScoringClient::new(base_url, Duration::from_millis(500)).expect("Failed to build client")
}

#[tokio::test]
async fn test_start_game_parses_session_and_suggestions() {
    let base = spawn_mock_service().await;
    let started = client(&base).start_game(GameMode::Random).await.unwrap();

    assert_eq!(started.session_id(), "abc");
    assert_eq!(started.suggestions().len(), 2);
    assert_eq!(started.suggestions()[0].word, "slate");
}

#[tokio::test]
async fn test_start_game_surfaces_service_error() {
    let base = spawn_mock_service().await;
    let err = client(&base).start_game(GameMode::Daily).await.unwrap_err();

    assert_eq!(
        err,
        ServiceError::Rejected(Rejection::Other("Could not fetch daily word".to_string()))
    );
}

#[tokio::test]
async fn test_start_game_requires_success_status() {
    let base = spawn_mock_service().await;
    let err = client(&base).start_game(GameMode::Standard).await.unwrap_err();
    assert!(matches!(err, ServiceError::Rejected(Rejection::Other(_))));
}

#[tokio::test]
async fn test_make_guess_success() {
    let base = spawn_mock_service().await;
    let response = client(&base).make_guess("slate", "abc").await.unwrap();

    assert!(!response.done);
    assert_eq!(response.reward, Some(-1.0));
    assert_eq!(response.current_row, Some(1));
    assert_eq!(
        map_states(&response.state).unwrap(),
        [
            TileStatus::Correct,
            TileStatus::Present,
            TileStatus::Absent,
            TileStatus::Absent,
            TileStatus::Absent,
        ]
    );
}

#[tokio::test]
async fn test_make_guess_completion_carries_target() {
    let base = spawn_mock_service().await;
    let response = client(&base).make_guess("crane", "abc").await.unwrap();
    assert!(response.done);
    assert_eq!(response.target_word.as_deref(), Some("crane"));
}

#[tokio::test]
async fn test_make_guess_rejections_are_classified() {
    let base = spawn_mock_service().await;
    let client = client(&base);

    let err = client.make_guess("zzzzz", "abc").await.unwrap_err();
    assert_eq!(err, ServiceError::Rejected(Rejection::InvalidWord));

    let err = client.make_guess("slate", "expired").await.unwrap_err();
    assert_eq!(err, ServiceError::Rejected(Rejection::InvalidSession));

    let err = client.make_guess("crash", "abc").await.unwrap_err();
    assert_eq!(
        err,
        ServiceError::Rejected(Rejection::Other("HTTP 500 Internal Server Error".to_string()))
    );
}

#[tokio::test]
async fn test_short_state_parses_but_fails_mapping() {
    let base = spawn_mock_service().await;
    let response = client(&base).make_guess("short", "abc").await.unwrap();
    assert!(matches!(map_states(&response.state), Err(ServiceError::ContractViolation(_))));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let base = spawn_mock_service().await;
    let client = HttpScoringClient::new(base, Duration::from_millis(200)).unwrap();
    let err = client.make_guess("sleep", "abc").await.unwrap_err();
    assert_eq!(err, ServiceError::TimedOut(Duration::from_millis(200)));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}", addr))
        .start_game(GameMode::Random)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Transport(_) | ServiceError::TimedOut(_)));
}

#[tokio::test]
async fn test_ping_reports_message() {
    let base = spawn_mock_service().await;
    let message = client(&base).ping().await.unwrap();
    assert_eq!(message, "CORS works!");
}
