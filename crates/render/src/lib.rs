//! Rendering adapter: the draw capability the game core submits to, the
//! first-person camera, and scene lighting.
//!
//! # Invariants
//! - Renderers never mutate world state; they only receive submissions.
//! - Visibility tests live on the camera so every drawable culls the same way.
//!
//! # Workaround
//! No GPU backend lives in this workspace. [`DrawRecorder`] and
//! [`DebugTextRenderer`] implement the capability for headless runs and tests;
//! a GPU backend implements the same trait without changing callers.

mod camera;
mod lighting;
mod renderer;

pub use camera::{Camera, CameraConfig};
pub use lighting::{LIGHT_DIRECTION, SKY_COLOUR, SceneLighting};
pub use renderer::{DebugTextRenderer, DrawCall, DrawRecorder, Renderer, uniforms};

pub fn crate_info() -> &'static str {
    "thicket-render v0.1.0"
}
