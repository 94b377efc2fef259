//! Keyboard input collector
//!
//! Tracks which keys are held. The frame loop only asks "is left/right
//! down"; one-shot keys (pause, mute, autopilot) are classified on keydown.

use std::collections::HashSet;

use crate::sim::TickInput;

/// One-shot commands triggered on keydown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    TogglePause,
    ToggleMute,
    ToggleAutopilot,
}

/// Map a `KeyboardEvent.key` value to a one-shot command
pub fn command_for_key(key: &str) -> Option<KeyCommand> {
    match key {
        "p" | "P" => Some(KeyCommand::TogglePause),
        "m" | "M" => Some(KeyCommand::ToggleMute),
        "i" | "I" => Some(KeyCommand::ToggleAutopilot),
        _ => None,
    }
}

fn is_left_key(key: &str) -> bool {
    matches!(key, "ArrowLeft" | "a" | "A")
}

fn is_right_key(key: &str) -> bool {
    matches!(key, "ArrowRight" | "d" | "D")
}

/// Currently held keys
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        self.held.insert(key.to_string());
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(key);
    }

    /// Forget everything (window lost focus, keyups will never arrive)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    pub fn left(&self) -> bool {
        self.held.iter().any(|k| is_left_key(k))
    }

    pub fn right(&self) -> bool {
        self.held.iter().any(|k| is_right_key(k))
    }

    /// Snapshot for the next frame
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.left(),
            right: self.right(),
        }
    }
}
