use glam::Vec3;
use thicket_kernel::{Entity, EntityKind, WorldState};
use thicket_stream::ChunkCoord;

/// World inspector for developer tooling.
///
/// Read-only queries against the world state for logging and debugging.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the world state.
    pub fn summary(world: &WorldState) -> WorldSummary {
        WorldSummary {
            frame: world.frame(),
            score: world.score(),
            high_score: world.high_score(),
            chunks: world.chunks().len(),
            projectiles: world.projectiles().len(),
            enemies: world.enemies().len(),
            danger: world.danger(),
            enemy_delay: world.enemy_delay(),
        }
    }

    /// Every projectile, then every enemy.
    pub fn list_entities(world: &WorldState) -> Vec<EntityInfo> {
        world
            .projectiles()
            .iter()
            .chain(world.enemies())
            .map(EntityInfo::from_entity)
            .collect()
    }

    /// The enemy closest to the player, if any.
    pub fn nearest_enemy(world: &WorldState) -> Option<EntityInfo> {
        let player = world.camera().position();
        world
            .enemies()
            .iter()
            .min_by(|a, b| {
                a.position()
                    .distance(player)
                    .total_cmp(&b.position().distance(player))
            })
            .map(EntityInfo::from_entity)
    }

    /// Active chunk coordinates in grid order.
    pub fn chunk_coords(world: &WorldState) -> Vec<ChunkCoord> {
        world.chunks().chunks().map(|c| c.coord()).collect()
    }
}

/// Summary of world state for the inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSummary {
    pub frame: u64,
    pub score: u32,
    pub high_score: u32,
    pub chunks: usize,
    pub projectiles: usize,
    pub enemies: usize,
    pub danger: f32,
    pub enemy_delay: f32,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: frame={} score={} high={} chunks={} projectiles={} enemies={} danger={:.2} enemy_delay={:.1}s",
            self.frame,
            self.score,
            self.high_score,
            self.chunks,
            self.projectiles,
            self.enemies,
            self.danger,
            self.enemy_delay,
        )
    }
}

/// Detailed info about a single entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityInfo {
    pub kind: &'static str,
    pub position: Vec3,
    pub velocity: Vec3,
}

impl EntityInfo {
    fn from_entity(entity: &Entity) -> Self {
        let kind = match entity.kind() {
            EntityKind::Static => "static",
            EntityKind::Projectile { .. } => "projectile",
            EntityKind::Enemy { .. } => "enemy",
        };
        Self {
            kind,
            position: entity.position(),
            velocity: entity.velocity().unwrap_or(Vec3::ZERO),
        }
    }
}

impl std::fmt::Display for EntityInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} pos=({:.2}, {:.2}, {:.2}) vel=({:.2}, {:.2}, {:.2})",
            self.kind,
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z,
        )
    }
}
