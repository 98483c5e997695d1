use glam::Vec2;

use crate::source::{InputSource, Key, MouseButton};

/// Which movement keys are held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Doubles ground speed while held.
    pub sprint: bool,
}

impl MovementInput {
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
    }
}

/// Everything the game core consumes from input in one frame.
///
/// Built once per frame from an [`InputSource`]; the core never looks at the
/// source directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub movement: MovementInput,
    /// Absolute cursor position, fed to the camera's cursor tracker.
    pub cursor: Option<Vec2>,
    pub fire: bool,
    pub clear_chunks: bool,
    pub reset_world: bool,
    pub quit: bool,
}

impl FrameInput {
    /// Sample a source.
    pub fn poll(source: &impl InputSource) -> Self {
        Self {
            movement: MovementInput {
                forward: source.is_key_pressed(Key::Forward),
                backward: source.is_key_pressed(Key::Backward),
                left: source.is_key_pressed(Key::StrafeLeft),
                right: source.is_key_pressed(Key::StrafeRight),
                sprint: source.is_key_pressed(Key::Sprint),
            },
            cursor: source.cursor_position(),
            fire: source.is_mouse_pressed(MouseButton::Left),
            clear_chunks: source.is_key_pressed(Key::ClearChunks),
            reset_world: source.is_key_pressed(Key::ResetWorld),
            quit: source.is_key_pressed(Key::Quit),
        }
    }
}
