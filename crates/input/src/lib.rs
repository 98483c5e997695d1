//! Input: polled key/cursor/mouse state mapped to per-frame commands.
//!
//! # Invariants
//! - The game core reads a [`FrameInput`], never raw window events.
//! - Input is sampled once per frame; nothing is pushed into the core.

pub mod action;
mod cursor;
mod source;

pub use action::{FrameInput, MovementInput};
pub use cursor::CursorTracker;
pub use source::{InputSource, InputState, Key, MouseButton};

pub fn crate_info() -> &'static str {
    "thicket-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
