use glam::Vec3;

use crate::renderer::{Renderer, uniforms};

/// Directional light shared by every pass.
pub const LIGHT_DIRECTION: Vec3 = Vec3::new(-0.2, -0.5, -0.3);

/// Base sky tint; fog fades toward it as danger drops.
pub const SKY_COLOUR: Vec3 = Vec3::new(91.0 / 255.0, 110.0 / 255.0, 225.0 / 255.0);

/// Light parameters for one draw pass.
///
/// Danger in `[0, 1]` darkens the scene and shifts it toward red; at zero the
/// forest is lit normally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLighting {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub fog_colour: Vec3,
}

impl SceneLighting {
    /// Sky dome pass: flat ambient only, no fog.
    pub fn sky(danger: f32) -> Self {
        Self {
            ambient: Vec3::splat(0.7 - danger * 0.7),
            diffuse: Vec3::ZERO,
            specular: Vec3::ZERO,
            fog_colour: Vec3::ZERO,
        }
    }

    /// Ground, decoration and entity pass.
    pub fn world(danger: f32) -> Self {
        Self {
            ambient: Vec3::new(0.2 + danger / 10.0, 0.2 - danger / 5.0, 0.2 - danger / 5.0),
            diffuse: Vec3::new(0.5 - danger / 4.0, 0.5 - danger / 2.0, 0.5 - danger / 2.0),
            specular: Vec3::splat(1.0 - danger),
            fog_colour: SKY_COLOUR * (0.7 - danger * 0.7),
        }
    }

    pub fn submit(&self, renderer: &mut dyn Renderer) {
        renderer.submit_vector(uniforms::LIGHT_DIRECTION, LIGHT_DIRECTION);
        renderer.submit_vector(uniforms::LIGHT_AMBIENT, self.ambient);
        renderer.submit_vector(uniforms::LIGHT_DIFFUSE, self.diffuse);
        renderer.submit_vector(uniforms::LIGHT_SPECULAR, self.specular);
        renderer.submit_vector(uniforms::FOG_COLOUR, self.fog_colour);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawRecorder;

    #[test]
    fn calm_world_lighting() {
        let l = SceneLighting::world(0.0);
        assert_eq!(l.ambient, Vec3::splat(0.2));
        assert_eq!(l.diffuse, Vec3::splat(0.5));
        assert_eq!(l.specular, Vec3::ONE);
        assert!((l.fog_colour - SKY_COLOUR * 0.7).length() < 1e-6);
    }

    #[test]
    fn full_danger_goes_dark_and_red() {
        let l = SceneLighting::world(1.0);
        assert!(l.ambient.x > l.ambient.y);
        assert_eq!(l.specular, Vec3::ZERO);
        assert!(l.fog_colour.length() < 1e-6);
        assert!(SceneLighting::sky(1.0).ambient.length() < 1e-6);
    }

    #[test]
    fn submit_binds_every_parameter() {
        let mut r = DrawRecorder::new();
        SceneLighting::world(0.5).submit(&mut r);
        assert_eq!(r.vector(uniforms::LIGHT_DIRECTION), Some(LIGHT_DIRECTION));
        assert!(r.vector(uniforms::LIGHT_AMBIENT).is_some());
        assert!(r.vector(uniforms::FOG_COLOUR).is_some());
    }
}
