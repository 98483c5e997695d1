use glam::Vec2;
use thicket_input::{InputSource, InputState, Key, MouseButton};

/// Frames per scripted movement block, two seconds at 60 fps.
const BLOCK: u64 = 120;
/// Frames for one full left-right-left cursor sweep.
const SWEEP_PERIOD: u64 = 240;
const SWEEP_HALF_WIDTH: f32 = 400.0;
const CURSOR_ORIGIN: Vec2 = Vec2::new(800.0, 450.0);

/// Scripted input source for headless runs.
///
/// Walks forward the whole time, strafes in alternating blocks, sprints in
/// bursts, holds fire on every other frame and sweeps the cursor so the view
/// pans back and forth. Presses quit once the frame budget is spent.
#[derive(Debug, Clone)]
pub struct Autopilot {
    state: InputState,
    frame: u64,
    frames: u64,
}

impl Autopilot {
    pub fn new(frames: u64) -> Self {
        Self {
            state: InputState::new(),
            frame: 0,
            frames,
        }
    }

    /// Frames scripted so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Set up the held keys and cursor for the next frame.
    pub fn advance(&mut self) {
        let f = self.frame;
        self.frame += 1;
        self.state.release_all();

        if f >= self.frames {
            self.state.set_key(Key::Quit, true);
            return;
        }

        let block = (f / BLOCK) % 4;
        self.state.set_key(Key::Forward, true);
        self.state.set_key(Key::StrafeLeft, block == 1);
        self.state.set_key(Key::StrafeRight, block == 3);
        self.state.set_key(Key::Sprint, (f / (BLOCK * 3)) % 2 == 1);
        self.state.set_button(MouseButton::Left, f % 2 == 0);

        self.state.set_cursor(CURSOR_ORIGIN + Vec2::X * sweep(f) * SWEEP_HALF_WIDTH);
    }
}

/// Triangle wave in [-1, 1] starting at -1.
fn sweep(frame: u64) -> f32 {
    let t = (frame % SWEEP_PERIOD) as f32 / SWEEP_PERIOD as f32;
    1.0 - 4.0 * (t - 0.5).abs()
}

impl InputSource for Autopilot {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.state.is_key_pressed(key)
    }

    fn cursor_position(&self) -> Option<Vec2> {
        self.state.cursor_position()
    }

    fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.state.is_mouse_pressed(button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thicket_input::FrameInput;

    #[test]
    fn quits_after_budget() {
        let mut pilot = Autopilot::new(3);
        let mut played = 0;
        loop {
            pilot.advance();
            if FrameInput::poll(&pilot).quit {
                break;
            }
            played += 1;
        }
        assert_eq!(played, 3);
    }

    #[test]
    fn zero_budget_quits_immediately() {
        let mut pilot = Autopilot::new(0);
        pilot.advance();
        let input = FrameInput::poll(&pilot);
        assert!(input.quit);
        assert!(input.movement.is_idle());
    }

    #[test]
    fn fire_is_held_every_other_frame() {
        let mut pilot = Autopilot::new(10);
        let fired: Vec<bool> = (0..4)
            .map(|_| {
                pilot.advance();
                FrameInput::poll(&pilot).fire
            })
            .collect();
        assert_eq!(fired, [true, false, true, false]);
    }

    #[test]
    fn strafes_in_blocks() {
        let mut pilot = Autopilot::new(1000);
        for _ in 0..=BLOCK {
            pilot.advance();
        }
        let input = FrameInput::poll(&pilot);
        assert!(input.movement.forward);
        assert!(input.movement.left);
        assert!(!input.movement.right);
    }

    #[test]
    fn cursor_sweeps_across_screen() {
        assert_eq!(sweep(0), -1.0);
        assert_eq!(sweep(SWEEP_PERIOD / 2), 1.0);
        assert_eq!(sweep(SWEEP_PERIOD / 4), 0.0);
    }
}
