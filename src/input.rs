//! Input routing: physical keys and on-screen keys become one action type.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::trace;

/// What the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Type an uppercase letter into the next tile.
    Letter(char),
    /// Clear the last typed tile.
    Delete,
    /// Send the completed row.
    Submit,
}

/// A key on the on-screen keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VirtualKey {
    /// Letter key.
    Letter(char),
    /// `ENTER` key.
    Enter,
    /// `←` key.
    Back,
}

impl VirtualKey {
    /// Parses a key token as labelled on the keyboard.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "ENTER" => Some(Self::Enter),
            "←" | "BACKSPACE" => Some(Self::Back),
            _ => single_letter(token).map(Self::Letter),
        }
    }

    /// The label drawn on the key.
    pub fn label(self) -> String {
        match self {
            Self::Letter(c) => c.to_string(),
            Self::Enter => "ENTER".to_string(),
            Self::Back => "←".to_string(),
        }
    }

    /// Translates the key into an action.
    pub fn action(self) -> Action {
        match self {
            Self::Letter(c) => Action::Letter(c.to_ascii_uppercase()),
            Self::Enter => Action::Submit,
            Self::Back => Action::Delete,
        }
    }
}

fn single_letter(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
        _ => None,
    }
}

/// Result of routing a physical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Routed {
    /// The action, if the key maps to one.
    pub action: Option<Action>,
    /// The key must not reach any other handler.
    pub consumed: bool,
}

/// Maps a physical key press.
///
/// Enter, Backspace and unmodified ASCII letters map to actions. Enter is
/// always consumed, even when nothing else happens with it.
pub fn route_key(key: KeyEvent) -> Routed {
    let modified = key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER);

    let routed = match key.code {
        KeyCode::Enter => Routed {
            action: (!modified).then_some(Action::Submit),
            consumed: true,
        },
        KeyCode::Backspace if !modified => Routed {
            action: Some(Action::Delete),
            consumed: true,
        },
        KeyCode::Char(c) if !modified && c.is_ascii_alphabetic() => Routed {
            action: Some(Action::Letter(c.to_ascii_uppercase())),
            consumed: true,
        },
        _ => Routed {
            action: None,
            consumed: false,
        },
    };

    trace!(code = ?key.code, ?routed, "Routed key");
    routed
}
