use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Keys the game polls each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    Sprint,
    /// Debug: drop every chunk so the window regenerates.
    ClearChunks,
    /// Debug: drop chunks and entities without touching the score.
    ResetWorld,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
}

/// A polled input device: answers "is this pressed right now" queries.
///
/// Window backends and scripted drivers both implement this; the core only
/// ever samples it once per frame.
pub trait InputSource {
    fn is_key_pressed(&self, key: Key) -> bool;

    /// Absolute cursor position in window pixels, if a cursor is attached.
    fn cursor_position(&self) -> Option<Vec2>;

    fn is_mouse_pressed(&self, button: MouseButton) -> bool;
}

/// Mutable snapshot of input state, fed by whoever owns the window.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys_held: HashSet<Key>,
    buttons_held: HashSet<MouseButton>,
    cursor: Option<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key(&mut self, key: Key, pressed: bool) {
        if pressed {
            self.keys_held.insert(key);
        } else {
            self.keys_held.remove(&key);
        }
    }

    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.buttons_held.insert(button);
        } else {
            self.buttons_held.remove(&button);
        }
    }

    pub fn set_cursor(&mut self, position: Vec2) {
        self.cursor = Some(position);
    }

    /// Release every key and button. The cursor position is kept.
    pub fn release_all(&mut self) {
        self.keys_held.clear();
        self.buttons_held.clear();
    }
}

impl InputSource for InputState {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.keys_held.contains(&key)
    }

    fn cursor_position(&self) -> Option<Vec2> {
        self.cursor
    }

    fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.buttons_held.contains(&button)
    }
}
