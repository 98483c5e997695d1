use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Non-owning handle to geometry loaded once by the application.
///
/// The handle is an index into the application's asset table. Core logic
/// copies it freely and never frees or mutates what it points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModelHandle(pub u32);

/// The geometry handles the game core draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSet {
    pub ground: ModelHandle,
    pub tree: ModelHandle,
    pub bullet: ModelHandle,
    pub enemy: ModelHandle,
    pub sky: ModelHandle,
}

impl Default for ModelSet {
    /// Sequential handles in the order the standard asset table registers them.
    fn default() -> Self {
        Self {
            ground: ModelHandle(0),
            tree: ModelHandle(1),
            bullet: ModelHandle(2),
            enemy: ModelHandle(3),
            sky: ModelHandle(4),
        }
    }
}

/// Translation and per-axis scale submitted to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn uniform(translation: Vec3, scale: f32) -> Self {
        Self {
            translation,
            scale: Vec3::splat(scale),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}
