//! Game kernel: authoritative world state and the per-frame update.
//!
//! # Invariants
//! - [`WorldState`] is the only writer of chunks, entities, timers and score.
//! - The update phase finishes before the draw phase reads anything.
//! - Entities never sink below the ground plane.

pub mod config;
pub mod entity;
pub mod spawn;
pub mod timer;
pub mod world;

pub use config::{ConfigError, EnemyTuning, GameConfig, ProjectileTuning, SpawnTuning};
pub use entity::{Entity, EntityKind};
pub use timer::{Cooldown, DifficultyRamp};
pub use world::{FrameOutcome, WorldState};

pub fn crate_info() -> &'static str {
    "thicket-kernel v0.1.0"
}
