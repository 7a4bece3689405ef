//! Input processing for the terminal client.
//!
//! This module owns the keyboard-to-command mapping so the rest of the
//! application can remain agnostic about concrete key bindings or the
//! specifics of `crossterm` events.

use crossterm::event::{KeyCode, KeyEvent};
use mine_core::Direction;

/// High-level command decoded from one key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    ToggleMenu,
    NewGame,
    Continue,
    Sell,
    UpgradePickaxe,
    UpgradeEnergy,
    RefreshLeaderboard,
    Quit,
    None,
}

/// Translates `KeyEvent`s into commands for the current screen.
///
/// Movement keys only apply in the mine; letter shortcuts for the shop and
/// menu only apply while the menu is open.
pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent, menu_open: bool) -> Command {
        match key.code {
            KeyCode::Esc => Command::ToggleMenu,
            KeyCode::Char(ch) if menu_open => Self::menu_char(ch),
            KeyCode::Char(ch) => Self::mine_char(ch),
            KeyCode::Up if !menu_open => Command::Move(Direction::Up),
            KeyCode::Down if !menu_open => Command::Move(Direction::Down),
            KeyCode::Left if !menu_open => Command::Move(Direction::Left),
            KeyCode::Right if !menu_open => Command::Move(Direction::Right),
            _ => Command::None,
        }
    }

    fn mine_char(raw: char) -> Command {
        match raw.to_ascii_lowercase() {
            'w' => Command::Move(Direction::Up),
            's' => Command::Move(Direction::Down),
            'a' => Command::Move(Direction::Left),
            'd' => Command::Move(Direction::Right),
            'q' => Command::Quit,
            _ => Command::None,
        }
    }

    fn menu_char(raw: char) -> Command {
        match raw.to_ascii_lowercase() {
            'n' => Command::NewGame,
            'c' => Command::Continue,
            's' => Command::Sell,
            'p' => Command::UpgradePickaxe,
            'e' => Command::UpgradeEnergy,
            'l' => Command::RefreshLeaderboard,
            'q' => Command::Quit,
            _ => Command::None,
        }
    }
}
