use glam::Vec3;
use thicket_common::ModelHandle;
use thicket_render::{Camera, Renderer, uniforms};

use crate::config::{EnemyTuning, ProjectileTuning};

/// Slack on the view and range tests when culling an entity for drawing.
pub const DRAW_TOLERANCE: f32 = 2.0;

/// What an entity is, and the motion state that comes with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    /// Drawn but never moves.
    Static,
    Projectile { velocity: Vec3, speed: f32 },
    /// Hostile sphere that collides with points inside `radius`.
    Enemy { velocity: Vec3, speed: f32, radius: f32 },
}

/// A drawable world object.
///
/// Removal is two-phase: collision passes set `marked_for_removal`, and the
/// owning collection drops marked entities afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    position: Vec3,
    model: ModelHandle,
    shininess: f32,
    kind: EntityKind,
    pub marked_for_removal: bool,
}

impl Entity {
    pub fn new_static(position: Vec3, model: ModelHandle, shininess: f32) -> Self {
        Self {
            position,
            model,
            shininess,
            kind: EntityKind::Static,
            marked_for_removal: false,
        }
    }

    /// A projectile travelling along `direction` (normalized here).
    pub fn projectile(
        position: Vec3,
        direction: Vec3,
        tuning: &ProjectileTuning,
        model: ModelHandle,
    ) -> Self {
        Self {
            position,
            model,
            shininess: tuning.shininess,
            kind: EntityKind::Projectile {
                velocity: direction.normalize_or_zero(),
                speed: tuning.speed,
            },
            marked_for_removal: false,
        }
    }

    /// A stationary enemy; it starts moving once given a velocity.
    pub fn enemy(position: Vec3, tuning: &EnemyTuning, model: ModelHandle) -> Self {
        Self {
            position,
            model,
            shininess: tuning.shininess,
            kind: EntityKind::Enemy {
                velocity: Vec3::ZERO,
                speed: tuning.speed,
                radius: tuning.radius,
            },
            marked_for_removal: false,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn model(&self) -> ModelHandle {
        self.model
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    pub fn velocity(&self) -> Option<Vec3> {
        match self.kind {
            EntityKind::Static => None,
            EntityKind::Projectile { velocity, .. } | EntityKind::Enemy { velocity, .. } => {
                Some(velocity)
            }
        }
    }

    /// Replace the direction of travel. Static entities ignore this.
    pub fn set_velocity(&mut self, new_velocity: Vec3) {
        match &mut self.kind {
            EntityKind::Static => {}
            EntityKind::Projectile { velocity, .. } | EntityKind::Enemy { velocity, .. } => {
                *velocity = new_velocity;
            }
        }
    }

    /// Integrate one step. A mover that dips below the ground is put back on
    /// it and, if it was still heading down, bounces.
    pub fn update(&mut self, dt: f32) {
        match &mut self.kind {
            EntityKind::Static => {}
            EntityKind::Projectile { velocity, speed } | EntityKind::Enemy { velocity, speed, .. } => {
                self.position += *velocity * *speed * dt;
                if self.position.y < 0.0 {
                    self.position.y = 0.0;
                    if velocity.y < 0.0 {
                        velocity.y = -velocity.y;
                    }
                }
            }
        }
    }

    /// Strictly-inside sphere test; only enemies collide.
    pub fn is_colliding_with(&self, point: Vec3) -> bool {
        match self.kind {
            EntityKind::Enemy { radius, .. } => self.position.distance(point) < radius,
            _ => false,
        }
    }

    pub fn draw(&self, renderer: &mut dyn Renderer, camera: &Camera) {
        if !(camera.is_in_field_of_view(self.position, DRAW_TOLERANCE)
            && camera.is_within_render_distance(self.position, DRAW_TOLERANCE))
        {
            return;
        }
        renderer.submit_transform(self.position, Vec3::ONE);
        renderer.submit_material_scalar(uniforms::SHININESS, self.shininess);
        renderer.draw_geometry(self.model);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thicket_render::DrawRecorder;

    fn bullet(position: Vec3, direction: Vec3) -> Entity {
        Entity::projectile(position, direction, &ProjectileTuning::default(), ModelHandle(2))
    }

    #[test]
    fn projectile_moves_at_speed() {
        let mut p = bullet(Vec3::new(0.0, 2.0, 0.0), Vec3::new(3.0, 0.0, 0.0));
        p.update(0.5);
        assert!((p.position() - Vec3::new(20.0, 2.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn bounce_reflects_downward_velocity() {
        let mut p = bullet(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.0, -1.0, 0.0));
        p.update(0.1);
        assert_eq!(p.position().y, 0.0);
        assert_eq!(p.velocity(), Some(Vec3::new(0.0, 1.0, 0.0)));

        p.update(0.1);
        assert!(p.position().y > 3.9);
    }

    #[test]
    fn enemy_bounces_off_ground() {
        let mut e = Entity::enemy(Vec3::new(0.0, 0.5, 0.0), &EnemyTuning::default(), ModelHandle(3));
        e.set_velocity(Vec3::new(0.6, -0.8, 0.0));
        e.update(0.1);
        assert_eq!(e.position().y, 0.0);
        assert!((e.position().x - 0.87).abs() < 1e-4);
        assert_eq!(e.velocity(), Some(Vec3::new(0.6, 0.8, 0.0)));

        e.update(0.1);
        assert!((e.position().y - 1.16).abs() < 1e-4);
    }

    #[test]
    fn upward_velocity_below_ground_is_only_clamped() {
        let mut p = bullet(Vec3::new(0.0, -5.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        p.update(0.01);
        assert_eq!(p.position().y, 0.0);
        assert_eq!(p.velocity(), Some(Vec3::Y));
    }

    #[test]
    fn static_entities_never_move() {
        let mut e = Entity::new_static(Vec3::new(1.0, -1.0, 1.0), ModelHandle(0), 1.0);
        e.set_velocity(Vec3::X);
        e.update(10.0);
        assert_eq!(e.position(), Vec3::new(1.0, -1.0, 1.0));
        assert_eq!(e.velocity(), None);
    }

    #[test]
    fn enemy_collision_is_strict() {
        let enemy = Entity::enemy(Vec3::ZERO, &EnemyTuning::default(), ModelHandle(3));
        assert!(enemy.is_colliding_with(Vec3::new(1.39, 0.0, 0.0)));
        assert!(!enemy.is_colliding_with(Vec3::new(1.4, 0.0, 0.0)));
        assert!(!bullet(Vec3::ZERO, Vec3::X).is_colliding_with(Vec3::ZERO));
    }

    #[test]
    fn draw_skips_entities_behind_camera() {
        let camera = Camera::default();
        let ahead = camera.position() + camera.horizontal_front() * 10.0;
        let behind = camera.position() - camera.horizontal_front() * 10.0;
        let mut recorder = DrawRecorder::new();

        bullet(ahead, Vec3::X).draw(&mut recorder, &camera);
        bullet(behind, Vec3::X).draw(&mut recorder, &camera);

        assert_eq!(recorder.draws().len(), 1);
        assert_eq!(recorder.draws()[0].transform.translation, ahead);
        assert_eq!(recorder.draws()[0].shininess, Some(20.0));
    }
}
