//! Tests for the TUI application state and rendering.

mod support;

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{Terminal, backend::TestBackend};
use strictly_wordle::tui::{App, KeyHit, ServiceEvent, draw};
use strictly_wordle::{GameController, GameMode, NoticeLevel, SessionPhase, TileStatus, VirtualKey};
use support::{ScriptedService, scored, started};
use tokio::sync::mpsc;

fn render(app: &mut App) -> (Vec<KeyHit>, String) {
    let mut terminal = Terminal::new(TestBackend::new(120, 45)).expect("Failed to create terminal");
    let mut hits = Vec::new();
    terminal
        .draw(|f| hits = draw(f, app))
        .expect("Failed to draw");
    app.set_keyboard(hits.clone());
    let text: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect();
    (hits, text)
}

async fn started_app(
    service: Arc<ScriptedService>,
) -> (App, mpsc::UnboundedReceiver<ServiceEvent>) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(GameController::default(), service, tx, GameMode::Random, 5);
    app.start_game(GameMode::Random);
    assert!(app.is_starting());

    let event = rx.recv().await.expect("Start event");
    app.handle_service_event(event);
    (app, rx)
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

#[tokio::test]
async fn test_idle_screen_shows_title_and_keyboard() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut app = App::new(
        GameController::default(),
        Arc::new(ScriptedService::new()),
        tx,
        GameMode::Daily,
        5,
    );

    let (hits, text) = render(&mut app);

    assert_eq!(hits.len(), 28);
    assert!(text.contains("Strictly Wordle"));
    assert!(text.contains("no game"));
    assert!(text.contains("Suggestions"));
}

#[tokio::test]
async fn test_started_game_renders_suggestions() {
    let service = Arc::new(ScriptedService::new());
    service.push_start(started("s1"));
    let (mut app, _rx) = started_app(service).await;

    assert!(!app.is_starting());
    assert_eq!(app.controller().phase(), SessionPhase::Active);

    let (_, text) = render(&mut app);
    assert!(text.contains("SLATE"));
    assert!(text.contains("guess 1/6"));
}

#[tokio::test]
async fn test_keys_and_clicks_fill_the_row() {
    let service = Arc::new(ScriptedService::new());
    service.push_start(started("s1"));
    let (mut app, _rx) = started_app(service).await;
    let (hits, _) = render(&mut app);

    press(&mut app, KeyCode::Char('c'));
    let r = hits
        .iter()
        .find(|hit| hit.key == VirtualKey::Letter('R'))
        .expect("R key on screen");
    app.handle_mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: r.area.x + 1,
        row: r.area.y + 1,
        modifiers: KeyModifiers::NONE,
    });

    let board = app.controller().board();
    assert_eq!(board.tile(0, 0).and_then(|t| t.letter), Some('C'));
    assert_eq!(board.tile(0, 1).and_then(|t| t.letter), Some('R'));
    assert_eq!(app.controller().cursor().tile, 2);

    press(&mut app, KeyCode::Backspace);
    assert_eq!(app.controller().cursor().tile, 1);
}

#[tokio::test]
async fn test_enter_submits_and_applies_score() {
    let service = Arc::new(ScriptedService::new());
    service.push_start(started("s1"));
    service.push_guess(scored(&[2, 0, 0, 0, 1], false, None));
    let (mut app, mut rx) = started_app(Arc::clone(&service)).await;

    for ch in "crane".chars() {
        press(&mut app, KeyCode::Char(ch));
    }
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.controller().phase(), SessionPhase::Submitting);

    let event = rx.recv().await.expect("Guess event");
    app.handle_service_event(event);

    assert_eq!(app.controller().phase(), SessionPhase::Active);
    assert_eq!(app.controller().cursor().row, 1);
    assert_eq!(
        app.controller().letter_hints().get(&'C'),
        Some(&TileStatus::Correct)
    );
    assert_eq!(service.sent(), vec![("crane".to_string(), "s1".to_string())]);
}

#[tokio::test]
async fn test_quit_chord_and_notice_dismissal() {
    let service = Arc::new(ScriptedService::new());
    let (mut app, _rx) = started_app(service).await;

    // No scripted start, so the round failed with a notice.
    assert_eq!(app.controller().phase(), SessionPhase::Idle);
    assert!(!app.controller().notices().is_empty());

    press(&mut app, KeyCode::Esc);
    assert!(app.controller().notices().is_empty());

    app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
    assert!(app.should_quit());
}

#[tokio::test]
async fn test_dismiss_all_chords_clear_every_notice() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut app = App::new(
        GameController::default(),
        Arc::new(ScriptedService::new()),
        tx,
        GameMode::Random,
        5,
    );

    for message in ["one", "two", "three"] {
        app.controller_mut().notify(NoticeLevel::Error, message);
    }
    app.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
    assert!(app.controller().notices().is_empty());

    for message in ["one", "two"] {
        app.controller_mut().notify(NoticeLevel::Info, message);
    }
    app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::SHIFT));
    assert!(app.controller().notices().is_empty());
}

#[tokio::test]
async fn test_superseded_start_keeps_newest_in_flight() {
    let service = Arc::new(ScriptedService::new());
    service.push_start(started("newest"));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(GameController::default(), service, tx, GameMode::Random, 5);

    let older = app.controller_mut().begin_start_game(GameMode::Random);
    app.start_game(GameMode::Daily);
    app.handle_service_event(ServiceEvent::Started(older, started("older")));

    assert!(app.is_starting());
    assert_eq!(app.controller().phase(), SessionPhase::Idle);
    let (_, text) = render(&mut app);
    assert!(text.contains("starting..."));

    let event = rx.recv().await.expect("Start event");
    app.handle_service_event(event);

    assert!(!app.is_starting());
    assert_eq!(app.controller().session().session_id().as_deref(), Some("newest"));
    assert_eq!(*app.controller().mode(), Some(GameMode::Daily));
}

#[tokio::test]
async fn test_used_up_board_waits_for_result() {
    let service = Arc::new(ScriptedService::new());
    service.push_start(started("s1"));
    for _ in 0..6 {
        service.push_guess(scored(&[0, 0, 0, 0, 0], false, None));
    }
    let (mut app, mut rx) = started_app(Arc::clone(&service)).await;

    for _ in 0..6 {
        for ch in "crane".chars() {
            press(&mut app, KeyCode::Char(ch));
        }
        press(&mut app, KeyCode::Enter);
        let event = rx.recv().await.expect("Guess event");
        app.handle_service_event(event);
    }

    assert_eq!(service.guess_calls(), 6);
    assert_eq!(app.controller().phase(), SessionPhase::Active);
    let (_, text) = render(&mut app);
    assert!(text.contains("waiting for result"));
    assert!(!text.contains("guess 7/6"));
}
