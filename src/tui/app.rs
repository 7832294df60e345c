//! Application state and event handling.

use std::sync::Arc;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::client::{GuessResponse, ScoringService, StartedGame, with_deadline};
use crate::controller::{Completion, GameController, GuessTicket, StartTicket};
use crate::error::ServiceError;
use crate::input::{Action, route_key};
use crate::mode::GameMode;

use super::keyboard::{KeyHit, hit_test};

/// Responses coming back from spawned requests.
#[derive(Debug)]
pub enum ServiceEvent {
    /// A start-game request finished.
    Started(StartTicket, Result<StartedGame, ServiceError>),
    /// A guess request finished.
    Scored(GuessTicket, Result<GuessResponse, ServiceError>),
}

/// Main application state.
pub struct App {
    controller: GameController,
    service: Arc<dyn ScoringService>,
    events: mpsc::UnboundedSender<ServiceEvent>,
    mode: GameMode,
    suggestion_limit: usize,
    keyboard: Vec<KeyHit>,
    starting: bool,
    should_quit: bool,
}

impl App {
    /// Creates a new application.
    pub fn new(
        controller: GameController,
        service: Arc<dyn ScoringService>,
        events: mpsc::UnboundedSender<ServiceEvent>,
        mode: GameMode,
        suggestion_limit: usize,
    ) -> Self {
        Self {
            controller,
            service,
            events,
            mode,
            suggestion_limit,
            keyboard: Vec::new(),
            starting: false,
            should_quit: false,
        }
    }

    /// The game controller.
    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    /// Mutable access to the controller, for the runtime's housekeeping.
    pub fn controller_mut(&mut self) -> &mut GameController {
        &mut self.controller
    }

    /// Mode used for new games.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// How many suggestions to show.
    pub fn suggestion_limit(&self) -> usize {
        self.suggestion_limit
    }

    /// Whether a start-game request is outstanding.
    pub fn is_starting(&self) -> bool {
        self.starting
    }

    /// Whether the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Records where the on-screen keys were last drawn.
    pub fn set_keyboard(&mut self, hits: Vec<KeyHit>) {
        self.keyboard = hits;
    }

    /// Spawns a start-game request.
    #[instrument(skip(self))]
    pub fn start_game(&mut self, mode: GameMode) {
        info!("Requesting new game");
        self.mode = mode;
        self.starting = true;
        let ticket = self.controller.begin_start_game(mode);
        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        let deadline = *self.controller.request_timeout();
        tokio::spawn(async move {
            let result = with_deadline(deadline, service.start_game(mode)).await;
            let _ = events.send(ServiceEvent::Started(ticket, result));
        });
    }

    fn send_guess(&self, ticket: GuessTicket) {
        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        let deadline = *self.controller.request_timeout();
        tokio::spawn(async move {
            let result = with_deadline(
                deadline,
                service.make_guess(ticket.word(), ticket.session_id()),
            )
            .await;
            let _ = events.send(ServiceEvent::Scored(ticket, result));
        });
    }

    /// Applies an action and sends the guess it triggers, if any.
    pub fn apply_action(&mut self, action: Action) {
        if let Some(ticket) = self.controller.handle_action(action) {
            self.send_guess(ticket);
        }
    }

    /// Applies a finished request.
    #[instrument(skip(self))]
    pub fn handle_service_event(&mut self, event: ServiceEvent) {
        match event {
            ServiceEvent::Started(ticket, result) => {
                let completion = self.controller.complete_start_game(ticket, result);
                debug!(?completion, "Start game completed");
                // A superseded start leaves the newest one in flight.
                if completion == Completion::Applied {
                    self.starting = false;
                }
            }
            ServiceEvent::Scored(ticket, result) => {
                let completion = self.controller.complete_guess(ticket, result);
                debug!(?completion, "Guess completed");
            }
        }
    }

    /// Handles a key press.
    ///
    /// Control chords and function keys drive the app; everything else goes
    /// through the input router.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                info!("User quit");
                self.should_quit = true;
                return;
            }
            KeyCode::Char('n') if ctrl => {
                self.start_game(self.mode);
                return;
            }
            KeyCode::F(2) => {
                self.start_game(GameMode::Random);
                return;
            }
            KeyCode::F(3) => {
                self.start_game(GameMode::Daily);
                return;
            }
            KeyCode::Char('d') if ctrl => {
                self.controller.dismiss_all_notices();
                return;
            }
            KeyCode::Esc if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.controller.dismiss_all_notices();
                return;
            }
            KeyCode::Esc => {
                self.controller.dismiss_latest_notice();
                return;
            }
            _ => {}
        }

        let routed = route_key(key);
        if let Some(action) = routed.action {
            self.apply_action(action);
        }
    }

    /// Handles a mouse event; left clicks press on-screen keys.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if let Some(key) = hit_test(&self.keyboard, mouse.column, mouse.row) {
            debug!(?key, "On-screen key pressed");
            self.apply_action(key.action());
        }
    }
}
