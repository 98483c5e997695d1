use crate::config::SpawnTuning;

/// Accumulates frame time and fires once it strictly exceeds `delay`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    elapsed: f32,
    delay: f32,
}

impl Cooldown {
    pub fn new(delay: f32) -> Self {
        Self {
            elapsed: 0.0,
            delay,
        }
    }

    /// A cooldown that fires on the first positive tick.
    pub fn primed(delay: f32) -> Self {
        Self {
            elapsed: delay,
            delay,
        }
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn set_delay(&mut self, delay: f32) {
        self.delay = delay;
    }

    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn is_ready(&self) -> bool {
        self.elapsed > self.delay
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Reset and return true if ready.
    pub fn try_fire(&mut self) -> bool {
        if self.is_ready() {
            self.reset();
            true
        } else {
            false
        }
    }
}

/// Shortens the enemy spawn interval every period, down to a floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyRamp {
    timer: Cooldown,
    step: f32,
    floor: f32,
}

impl DifficultyRamp {
    pub fn new(tuning: &SpawnTuning) -> Self {
        Self {
            timer: Cooldown::new(tuning.difficulty_period),
            step: tuning.difficulty_step,
            floor: tuning.enemy_delay_floor,
        }
    }

    /// Advance by `dt`; when the period elapses, tighten `spawn` and return
    /// true. The interval is never pushed below the floor, but a starting
    /// interval already under it is left alone.
    pub fn tick(&mut self, dt: f32, spawn: &mut Cooldown) -> bool {
        self.timer.tick(dt);
        if !self.timer.try_fire() {
            return false;
        }
        if spawn.delay() > self.floor {
            spawn.set_delay((spawn.delay() - self.step).max(self.floor));
        }
        tracing::debug!(enemy_delay = spawn.delay(), "difficulty raised");
        true
    }

    pub fn reset(&mut self) {
        self.timer.reset();
    }
}
