//! Game tuning, loadable from JSON. Every field has a default, so a config
//! file only needs the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thicket_render::CameraConfig;
use thicket_stream::StreamConfig;

/// Errors from loading or validating a [`GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Spawn cadence and difficulty ramp. Times are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub shot_delay: f32,
    /// Enemy spawn interval at the start of a run.
    pub enemy_delay: f32,
    /// The ramp never pushes the enemy interval below this.
    pub enemy_delay_floor: f32,
    pub difficulty_period: f32,
    pub difficulty_step: f32,
    /// Enemies appear this far beyond the render distance.
    pub spawn_margin: f32,
    pub spawn_height_min: f32,
    pub spawn_height_max: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            shot_delay: 0.1,
            enemy_delay: 6.0,
            enemy_delay_floor: 1.0,
            difficulty_period: 5.0,
            difficulty_step: 0.2,
            spawn_margin: 10.0,
            spawn_height_min: 0.1,
            spawn_height_max: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub speed: f32,
    /// Projectiles leave this far below eye height.
    pub muzzle_drop: f32,
    pub shininess: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: 40.0,
            muzzle_drop: 0.5,
            shininess: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub speed: f32,
    pub radius: f32,
    /// Enemies steer toward a point this far below eye height.
    pub aim_drop: f32,
    pub shininess: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            speed: 14.5,
            radius: 1.4,
            aim_drop: 0.3,
            shininess: 20.0,
        }
    }
}

/// Complete game configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub camera: CameraConfig,
    pub stream: StreamConfig,
    pub spawn: SpawnTuning,
    pub projectile: ProjectileTuning,
    pub enemy: EnemyTuning,
    /// Enemies closer than this raise the danger level.
    pub danger_radius: f32,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            stream: StreamConfig::default(),
            spawn: SpawnTuning::default(),
            projectile: ProjectileTuning::default(),
            enemy: EnemyTuning::default(),
            danger_radius: 16.0,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Read and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        tracing::debug!(path = %path.as_ref().display(), "config loaded");
        Ok(config)
    }

    /// Reject values the game loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            (self.stream.chunk_width > 0.0, "stream.chunk_width must be positive"),
            (self.stream.chunk_height > 0.0, "stream.chunk_height must be positive"),
            (self.stream.window_radius >= 0, "stream.window_radius must not be negative"),
            (self.camera.render_distance > 0.0, "camera.render_distance must be positive"),
            (self.camera.screen_height > 0, "camera.screen_height must be positive"),
            (self.spawn.enemy_delay_floor > 0.0, "spawn.enemy_delay_floor must be positive"),
            (self.spawn.difficulty_period > 0.0, "spawn.difficulty_period must be positive"),
            (self.spawn.spawn_margin >= 0.0, "spawn.spawn_margin must not be negative"),
            (
                self.spawn.spawn_height_min < self.spawn.spawn_height_max,
                "spawn.spawn_height_min must be below spawn.spawn_height_max",
            ),
            (self.danger_radius > 0.0, "danger_radius must be positive"),
        ];
        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, message)) => Err(ConfigError::Invalid((*message).to_string())),
            None => Ok(()),
        }
    }
}
