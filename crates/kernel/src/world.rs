use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thicket_common::{ModelSet, Transform};
use thicket_input::FrameInput;
use thicket_render::{Camera, Renderer, SceneLighting, uniforms};
use thicket_stream::{ChunkField, Regeneration};

use crate::config::{ConfigError, GameConfig};
use crate::entity::Entity;
use crate::spawn::{enemy_spawn_position, muzzle_position};
use crate::timer::{Cooldown, DifficultyRamp};

const SKY_SHININESS: f32 = 1.0;

/// What happened during one call to [`WorldState::update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    pub enemies_destroyed: u32,
    /// The frame stopped at the death check; nothing after it ran.
    pub player_died: bool,
    pub fired: bool,
    pub enemy_spawned: bool,
    pub difficulty_raised: bool,
    pub regeneration: Option<Regeneration>,
    pub projectiles_expired: usize,
}

/// The authoritative game state.
///
/// Owns the camera, every chunk and entity, the spawn timers, score and the
/// seeded RNG. All mutation goes through [`update`](Self::update); drawing
/// only reads.
pub struct WorldState {
    config: GameConfig,
    models: ModelSet,
    camera: Camera,
    field: ChunkField,
    projectiles: Vec<Entity>,
    enemies: Vec<Entity>,
    shot_cooldown: Cooldown,
    enemy_cooldown: Cooldown,
    difficulty: DifficultyRamp,
    score: u32,
    high_score: u32,
    danger: f32,
    frame: u64,
    rng: StdRng,
}

impl WorldState {
    /// Build a fresh world. No chunks exist until the first update.
    pub fn new(config: GameConfig, models: ModelSet) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        tracing::info!(seed = ?config.seed, "world created");
        Ok(Self {
            camera: Camera::new(config.camera.clone()),
            field: ChunkField::new(config.stream.clone(), models),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            shot_cooldown: Cooldown::primed(config.spawn.shot_delay),
            enemy_cooldown: Cooldown::new(config.spawn.enemy_delay),
            difficulty: DifficultyRamp::new(&config.spawn),
            score: 0,
            high_score: 0,
            danger: 0.0,
            frame: 0,
            rng,
            models,
            config,
        })
    }

    /// Seed the high score, typically from the persisted value.
    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.high_score = high_score;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn chunks(&self) -> &ChunkField {
        &self.field
    }

    pub fn projectiles(&self) -> &[Entity] {
        &self.projectiles
    }

    pub fn enemies(&self) -> &[Entity] {
        &self.enemies
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// The value to persist at shutdown.
    pub fn best_score(&self) -> u32 {
        self.high_score.max(self.score)
    }

    /// Proximity of the nearest enemy, 0 (safe) to 1 (touching).
    pub fn danger(&self) -> f32 {
        self.danger
    }

    /// Current enemy spawn interval in seconds.
    pub fn enemy_delay(&self) -> f32 {
        self.enemy_cooldown.delay()
    }

    /// Number of completed updates.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance the world by `dt` seconds.
    pub fn update(&mut self, input: &FrameInput, dt: f32) -> FrameOutcome {
        let _span = tracing::info_span!("frame_update", frame = self.frame).entered();
        self.frame += 1;
        let mut outcome = FrameOutcome::default();

        if input.reset_world {
            tracing::info!("world reset requested");
            self.clear_world();
        } else if input.clear_chunks {
            tracing::info!(chunks = self.field.len(), "chunk clear requested");
            self.field.clear();
        }

        self.camera.apply_movement_input(input.movement, dt);
        if let Some(cursor) = input.cursor {
            self.camera.track_cursor(cursor);
        }

        outcome.enemies_destroyed = self.resolve_projectile_hits();
        self.score += outcome.enemies_destroyed;

        self.danger = self.compute_danger();

        let player = self.camera.position();
        if self.enemies.iter().any(|e| e.is_colliding_with(player)) {
            self.handle_player_death();
            outcome.player_died = true;
            return outcome;
        }

        outcome.difficulty_raised = self.difficulty.tick(dt, &mut self.enemy_cooldown);

        self.shot_cooldown.tick(dt);
        if input.fire && self.shot_cooldown.try_fire() {
            self.fire();
            outcome.fired = true;
        }
        self.enemy_cooldown.tick(dt);
        if self.enemy_cooldown.try_fire() {
            let pos = enemy_spawn_position(
                player,
                self.camera.render_distance(),
                &self.config.spawn,
                &mut self.rng,
            );
            self.spawn_enemy_at(pos);
            outcome.enemy_spawned = true;
        }

        self.advance_entities(dt);

        let render_distance = self.camera.render_distance();
        outcome.regeneration = self
            .field
            .reconcile(player, render_distance, &mut self.rng)
            .regeneration;

        outcome.projectiles_expired = self.cull_projectiles();

        tracing::trace!(
            score = self.score,
            danger = self.danger,
            chunks = self.field.len(),
            projectiles = self.projectiles.len(),
            enemies = self.enemies.len(),
            "frame complete"
        );
        outcome
    }

    /// Submit the frame: sky pass, world lighting, chunks, then entities.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        let camera = &self.camera;
        renderer.submit_vector(uniforms::VIEW_POSITION, camera.position());
        renderer.submit_material_scalar(uniforms::RENDER_DISTANCE, camera.render_distance());

        SceneLighting::sky(self.danger).submit(renderer);
        let dome = Transform::uniform(camera.position(), camera.render_distance());
        renderer.submit_transform(dome.translation, dome.scale);
        renderer.submit_material_scalar(uniforms::SHININESS, SKY_SHININESS);
        renderer.draw_geometry(self.models.sky);

        SceneLighting::world(self.danger).submit(renderer);
        self.field.draw(renderer, camera);
        for entity in self.projectiles.iter().chain(&self.enemies) {
            entity.draw(renderer, camera);
        }
    }

    /// Fire a projectile from just below the eye along the look direction.
    pub fn fire(&mut self) {
        let origin = muzzle_position(self.camera.position(), self.config.projectile.muzzle_drop);
        self.projectiles.push(Entity::projectile(
            origin,
            self.camera.front(),
            &self.config.projectile,
            self.models.bullet,
        ));
    }

    /// Place an enemy, already aimed at the player.
    pub fn spawn_enemy_at(&mut self, position: Vec3) {
        let mut enemy = Entity::enemy(position, &self.config.enemy, self.models.enemy);
        enemy.set_velocity((self.aim_target() - position).normalize_or_zero());
        tracing::debug!(?position, delay = self.enemy_cooldown.delay(), "enemy spawned");
        self.enemies.push(enemy);
    }

    /// Empty chunks and entities. Score and timers are untouched.
    pub fn clear_world(&mut self) {
        self.field.clear();
        self.projectiles.clear();
        self.enemies.clear();
    }

    /// Commit the score, then start a new run.
    pub fn handle_player_death(&mut self) {
        let score = self.score;
        self.high_score = self.high_score.max(score);
        tracing::info!(score, high_score = self.high_score, "player caught");

        self.score = 0;
        self.danger = 0.0;
        self.clear_world();
        self.enemy_cooldown = Cooldown::new(self.config.spawn.enemy_delay);
        self.difficulty.reset();
        self.camera.reset_cursor();
    }

    /// Mark every enemy hit by a projectile, then drop both sides.
    fn resolve_projectile_hits(&mut self) -> u32 {
        let mut destroyed = 0;
        for projectile in &mut self.projectiles {
            let point = projectile.position();
            for enemy in self.enemies.iter_mut().filter(|e| !e.marked_for_removal) {
                if enemy.is_colliding_with(point) {
                    enemy.marked_for_removal = true;
                    projectile.marked_for_removal = true;
                    destroyed += 1;
                }
            }
        }
        if destroyed > 0 {
            tracing::debug!(destroyed, "enemies shot down");
        }
        self.enemies.retain(|e| !e.marked_for_removal);
        self.projectiles.retain(|p| !p.marked_for_removal);
        destroyed
    }

    fn compute_danger(&self) -> f32 {
        let radius = self.config.danger_radius;
        let player = self.camera.position();
        self.enemies
            .iter()
            .map(|e| e.position().distance(player))
            .filter(|&distance| distance < radius)
            .map(|distance| 1.0 - (distance + 1.0) / radius)
            .fold(0.0, f32::max)
            .clamp(0.0, 1.0)
    }

    /// Enemies steer at a point just below the eye.
    fn aim_target(&self) -> Vec3 {
        self.camera.position() - Vec3::Y * self.config.enemy.aim_drop
    }

    fn advance_entities(&mut self, dt: f32) {
        for projectile in &mut self.projectiles {
            projectile.update(dt);
        }
        let target = self.aim_target();
        for enemy in &mut self.enemies {
            enemy.set_velocity((target - enemy.position()).normalize_or_zero());
            enemy.update(dt);
        }
    }

    /// Drop projectiles that travelled past twice the chunk cull radius.
    fn cull_projectiles(&mut self) -> usize {
        let player = self.camera.position();
        let limit = 2.0 * self.field.cull_radius(self.camera.render_distance());
        let before = self.projectiles.len();
        self.projectiles.retain(|p| p.position().distance(player) <= limit);
        before - self.projectiles.len()
    }
}
