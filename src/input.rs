//! Input injection collaborator backed by `enigo` (feature `input`).
//!
//! The typical consumer of a successful match: move the pointer to the match
//! center and click, or inject keys once the target is on screen.

use crate::trace::trace_event;
use crate::util::{RukuliError, RukuliResult};
use enigo::{Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use std::str::FromStr;

/// Mouse buttons this crate can click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Converts to the enigo button code.
    fn to_button(self) -> Button {
        match self {
            MouseButton::Left => Button::Left,
            MouseButton::Right => Button::Right,
            MouseButton::Middle => Button::Middle,
        }
    }
}

impl FromStr for MouseButton {
    type Err = RukuliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(MouseButton::Left),
            "right" => Ok(MouseButton::Right),
            "middle" => Ok(MouseButton::Middle),
            _ => Err(RukuliError::UnknownButton {
                name: s.to_string(),
            }),
        }
    }
}

/// Maps a textual key name to an enigo key.
///
/// Single characters fall through as Unicode keys; anything else unknown is
/// `None` so callers can surface [`RukuliError::UnknownKey`].
pub fn key_from_name(name: &str) -> Option<Key> {
    match name.to_ascii_lowercase().as_str() {
        "shift" => Some(Key::Shift),
        "control" | "ctrl" => Some(Key::Control),
        "alt" | "option" => Some(Key::Alt),
        "meta" | "command" | "cmd" | "super" => Some(Key::Meta),
        "return" | "enter" => Some(Key::Return),
        "escape" | "esc" => Some(Key::Escape),
        "tab" => Some(Key::Tab),
        "backspace" => Some(Key::Backspace),
        "delete" | "del" => Some(Key::Delete),
        "space" | " " => Some(Key::Space),
        "up" => Some(Key::UpArrow),
        "down" => Some(Key::DownArrow),
        "left" => Some(Key::LeftArrow),
        "right" => Some(Key::RightArrow),
        "home" => Some(Key::Home),
        "end" => Some(Key::End),
        "pageup" => Some(Key::PageUp),
        "pagedown" => Some(Key::PageDown),
        "f1" => Some(Key::F1),
        "f2" => Some(Key::F2),
        "f3" => Some(Key::F3),
        "f4" => Some(Key::F4),
        "f5" => Some(Key::F5),
        "f6" => Some(Key::F6),
        "f7" => Some(Key::F7),
        "f8" => Some(Key::F8),
        "f9" => Some(Key::F9),
        "f10" => Some(Key::F10),
        "f11" => Some(Key::F11),
        "f12" => Some(Key::F12),
        _ if name.chars().count() == 1 => name.chars().next().map(Key::Unicode),
        _ => None,
    }
}

/// Pointer and keyboard injection over one enigo handle.
pub struct InputDriver {
    enigo: Enigo,
}

impl InputDriver {
    /// Connects to the platform input facility.
    pub fn open() -> RukuliResult<Self> {
        let enigo = Enigo::new(&Settings::default()).map_err(|err| RukuliError::Input {
            reason: err.to_string(),
        })?;
        Ok(Self { enigo })
    }

    /// Moves the pointer to absolute screen coordinates.
    pub fn move_to(&mut self, x: i32, y: i32) -> RukuliResult<()> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|err| RukuliError::Input {
                reason: err.to_string(),
            })
    }

    /// Moves the pointer to `(x, y)` and clicks `button` there.
    pub fn click_at(&mut self, x: i32, y: i32, button: MouseButton) -> RukuliResult<()> {
        self.move_to(x, y)?;
        trace_event!("click", x = x, y = y);
        self.enigo
            .button(button.to_button(), Direction::Click)
            .map_err(|err| RukuliError::Input {
                reason: err.to_string(),
            })
    }

    /// Presses a key down without releasing it.
    pub fn press_key(&mut self, key: Key) -> RukuliResult<()> {
        self.key(key, Direction::Press)
    }

    /// Releases a previously pressed key.
    pub fn release_key(&mut self, key: Key) -> RukuliResult<()> {
        self.key(key, Direction::Release)
    }

    /// Presses and releases a key.
    pub fn tap_key(&mut self, key: Key) -> RukuliResult<()> {
        self.key(key, Direction::Click)
    }

    /// Types a string through the platform text input path.
    pub fn type_text(&mut self, text: &str) -> RukuliResult<()> {
        trace_event!("type_text", len = text.len());
        self.enigo.text(text).map_err(|err| RukuliError::Input {
            reason: err.to_string(),
        })
    }

    fn key(&mut self, key: Key, direction: Direction) -> RukuliResult<()> {
        self.enigo
            .key(key, direction)
            .map_err(|err| RukuliError::Input {
                reason: err.to_string(),
            })
    }
}
