use glam::Vec2;

/// Turns absolute cursor positions into per-sample deltas.
///
/// The first sample after creation or [`CursorTracker::reset`] only records
/// the reference position, so activating the cursor never produces a jump.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorTracker {
    last: Option<Vec2>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta from the previous sample, in window pixels (y grows downward).
    pub fn delta(&mut self, position: Vec2) -> Vec2 {
        let delta = match self.last {
            Some(last) => position - last,
            None => Vec2::ZERO,
        };
        self.last = Some(position);
        delta
    }

    /// Forget the reference position; the next sample seeds it again.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn is_seeded(&self) -> bool {
        self.last.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_seeds_without_delta() {
        let mut tracker = CursorTracker::new();
        assert_eq!(tracker.delta(Vec2::new(800.0, 450.0)), Vec2::ZERO);
        assert!(tracker.is_seeded());
        assert_eq!(tracker.delta(Vec2::new(810.0, 440.0)), Vec2::new(10.0, -10.0));
    }

    #[test]
    fn reset_reseeds() {
        let mut tracker = CursorTracker::new();
        tracker.delta(Vec2::new(0.0, 0.0));
        tracker.reset();
        assert_eq!(tracker.delta(Vec2::new(500.0, 500.0)), Vec2::ZERO);
    }
}
