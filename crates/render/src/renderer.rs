use std::collections::BTreeMap;
use std::fmt::Write as _;

use glam::Vec3;
use thicket_common::{ModelHandle, Transform};

/// Names of the per-draw parameters the core submits.
pub mod uniforms {
    pub const SHININESS: &str = "shininess";
    pub const VIEW_POSITION: &str = "viewPos";
    pub const LIGHT_DIRECTION: &str = "light.direction";
    pub const LIGHT_AMBIENT: &str = "light.ambient";
    pub const LIGHT_DIFFUSE: &str = "light.diffuse";
    pub const LIGHT_SPECULAR: &str = "light.specular";
    pub const FOG_COLOUR: &str = "fogColor";
    pub const RENDER_DISTANCE: &str = "renderDistance";
}

/// Draw capability consumed by the game core.
///
/// Submissions are stateful: a transform or parameter stays bound until the
/// next submission of the same kind, and `draw_geometry` uses whatever is
/// bound at that moment.
pub trait Renderer {
    fn submit_transform(&mut self, translation: Vec3, scale: Vec3);

    fn submit_material_scalar(&mut self, name: &str, value: f32);

    fn submit_vector(&mut self, name: &str, value: Vec3);

    fn draw_geometry(&mut self, model: ModelHandle);
}

/// One recorded `draw_geometry` call with the state bound at the time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub model: ModelHandle,
    pub transform: Transform,
    pub shininess: Option<f32>,
}

/// Renderer that records draw calls instead of issuing them.
///
/// Used by the headless runner for per-frame statistics and by tests to
/// observe what the core decided to draw.
#[derive(Debug, Default)]
pub struct DrawRecorder {
    bound_transform: Transform,
    scalars: BTreeMap<String, f32>,
    vectors: BTreeMap<String, Vec3>,
    draws: Vec<DrawCall>,
}

impl DrawRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    /// Number of draws of one model.
    pub fn count_for(&self, model: ModelHandle) -> usize {
        self.draws.iter().filter(|d| d.model == model).count()
    }

    pub fn vector(&self, name: &str) -> Option<Vec3> {
        self.vectors.get(name).copied()
    }

    pub fn scalar(&self, name: &str) -> Option<f32> {
        self.scalars.get(name).copied()
    }

    /// Drop recorded draws and bound state, ready for the next frame.
    pub fn clear(&mut self) {
        self.bound_transform = Transform::default();
        self.scalars.clear();
        self.vectors.clear();
        self.draws.clear();
    }
}

impl Renderer for DrawRecorder {
    fn submit_transform(&mut self, translation: Vec3, scale: Vec3) {
        self.bound_transform = Transform { translation, scale };
    }

    fn submit_material_scalar(&mut self, name: &str, value: f32) {
        self.scalars.insert(name.to_string(), value);
    }

    fn submit_vector(&mut self, name: &str, value: Vec3) {
        self.vectors.insert(name.to_string(), value);
    }

    fn draw_geometry(&mut self, model: ModelHandle) {
        self.draws.push(DrawCall {
            model,
            transform: self.bound_transform,
            shininess: self.scalars.get(uniforms::SHININESS).copied(),
        });
    }
}

/// Debug text renderer: writes every submission as a line of text.
///
/// Useful for dumping a single frame from the CLI.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    out: String,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> &str {
        &self.out
    }

    pub fn finish(self) -> String {
        self.out
    }
}

impl Renderer for DebugTextRenderer {
    fn submit_transform(&mut self, translation: Vec3, scale: Vec3) {
        let _ = writeln!(
            self.out,
            "transform pos=({:.2}, {:.2}, {:.2}) scale=({:.2}, {:.2}, {:.2})",
            translation.x, translation.y, translation.z, scale.x, scale.y, scale.z
        );
    }

    fn submit_material_scalar(&mut self, name: &str, value: f32) {
        let _ = writeln!(self.out, "scalar {name}={value:.3}");
    }

    fn submit_vector(&mut self, name: &str, value: Vec3) {
        let _ = writeln!(
            self.out,
            "vector {name}=({:.3}, {:.3}, {:.3})",
            value.x, value.y, value.z
        );
    }

    fn draw_geometry(&mut self, model: ModelHandle) {
        let _ = writeln!(self.out, "draw model={}", model.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_captures_bound_state() {
        let mut r = DrawRecorder::new();
        r.submit_transform(Vec3::new(1.0, 0.0, 2.0), Vec3::ONE);
        r.submit_material_scalar(uniforms::SHININESS, 10.0);
        r.draw_geometry(ModelHandle(3));

        assert_eq!(r.draws().len(), 1);
        let call = r.draws()[0];
        assert_eq!(call.model, ModelHandle(3));
        assert_eq!(call.transform.translation, Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(call.shininess, Some(10.0));
    }

    #[test]
    fn recorder_counts_per_model_and_clears() {
        let mut r = DrawRecorder::new();
        r.draw_geometry(ModelHandle(1));
        r.draw_geometry(ModelHandle(1));
        r.draw_geometry(ModelHandle(2));
        assert_eq!(r.count_for(ModelHandle(1)), 2);
        assert_eq!(r.count_for(ModelHandle(2)), 1);

        r.clear();
        assert!(r.draws().is_empty());
        assert_eq!(r.scalar(uniforms::SHININESS), None);
    }

    #[test]
    fn debug_text_renderer_writes_lines() {
        let mut r = DebugTextRenderer::new();
        r.submit_vector(uniforms::FOG_COLOUR, Vec3::ZERO);
        r.submit_transform(Vec3::ZERO, Vec3::splat(70.0));
        r.draw_geometry(ModelHandle(4));

        let out = r.finish();
        assert!(out.contains("vector fogColor="));
        assert!(out.contains("scale=(70.00, 70.00, 70.00)"));
        assert!(out.contains("draw model=4"));
    }
}
