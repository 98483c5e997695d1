use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thicket_common::ModelSet;
use thicket_render::{Camera, Renderer};

use crate::chunk::{Chunk, DecorationConfig};
use crate::grid::{ChunkCoord, ChunkGrid, coords_in_radius};

/// Streaming configuration: tile size, window radius and unload distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub chunk_width: f32,
    pub chunk_height: f32,
    /// Radius (in chunks) of the square window generated around the player.
    pub window_radius: i32,
    /// Slack added to each footprint edge when deciding which chunk the
    /// player stands on.
    pub border_tolerance: f32,
    /// Chunks farther than render distance plus this margin are unloaded.
    pub cull_margin: f32,
    pub decorations: DecorationConfig,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            chunk_width: 30.0,
            chunk_height: 30.0,
            window_radius: 3,
            border_tolerance: 1.0,
            cull_margin: 100.0,
            decorations: DecorationConfig::default(),
        }
    }
}

/// Why a reconcile pass regenerated the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regeneration {
    /// The player stood on no known chunk; everything was rebuilt.
    LostCoverage,
    /// The player crossed onto a chunk other than the current square.
    NewSquare,
}

/// Statistics from the last reconcile pass, for instrumentation.
#[derive(Debug, Clone, Default)]
pub struct StreamStats {
    pub chunks_spawned: usize,
    pub chunks_culled: usize,
    pub total_chunks: usize,
    pub regeneration: Option<Regeneration>,
    pub elapsed: Duration,
}

/// The active set of chunks around the player.
///
/// Keyed by grid coordinate in a `BTreeMap`, so "first colliding chunk" and
/// generation order are deterministic for a given seed.
pub struct ChunkField {
    config: StreamConfig,
    grid: ChunkGrid,
    models: ModelSet,
    chunks: BTreeMap<ChunkCoord, Chunk>,
    current_square: Option<ChunkCoord>,
    stats: StreamStats,
}

impl ChunkField {
    pub fn new(config: StreamConfig, models: ModelSet) -> Self {
        let grid = ChunkGrid::new(config.chunk_width, config.chunk_height);
        Self {
            config,
            grid,
            models,
            chunks: BTreeMap::new(),
            current_square: None,
            stats: StreamStats::default(),
        }
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn grid(&self) -> &ChunkGrid {
        &self.grid
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Active chunks in coordinate order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// The chunk the player was last confirmed standing on.
    pub fn current_square(&self) -> Option<ChunkCoord> {
        self.current_square
    }

    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }

    pub fn cull_radius(&self, render_distance: f32) -> f32 {
        render_distance + self.config.cull_margin
    }

    /// Coordinates of every chunk whose widened footprint contains `pos`.
    pub fn colliding(&self, pos: Vec3) -> Vec<ChunkCoord> {
        self.chunks
            .values()
            .filter(|c| c.contains(pos, self.config.border_tolerance))
            .map(Chunk::coord)
            .collect()
    }

    /// Generate every missing chunk in the window around `center`.
    /// Existing chunks are left untouched. Returns how many were created.
    pub fn fill_around<R: Rng + ?Sized>(&mut self, center: ChunkCoord, rng: &mut R) -> usize {
        let mut spawned = 0;
        for coord in coords_in_radius(center, self.config.window_radius) {
            if self.chunks.contains_key(&coord) {
                continue;
            }
            let chunk = Chunk::generate(
                coord,
                &self.grid,
                &self.models,
                self.config.decorations,
                rng,
            );
            tracing::debug!(?coord, trees = chunk.decorations().len(), "chunk generated");
            self.chunks.insert(coord, chunk);
            spawned += 1;
        }
        spawned
    }

    /// Unload chunks farther than the cull radius. Returns how many went.
    pub fn cull(&mut self, player: Vec3, render_distance: f32) -> usize {
        let radius = self.cull_radius(render_distance);
        let before = self.chunks.len();
        self.chunks.retain(|coord, chunk| {
            let keep = chunk.origin().distance(player) <= radius;
            if !keep {
                tracing::debug!(?coord, "chunk unloaded");
            }
            keep
        });
        before - self.chunks.len()
    }

    /// Bring the window in line with the player's position.
    ///
    /// If the player stands on no chunk, the whole set is rebuilt around the
    /// player's cell. If they stand on chunks but none is the current square,
    /// the first one becomes the current square and the window is topped up
    /// around it. Far chunks are unloaded in the same pass.
    pub fn reconcile<R: Rng + ?Sized>(
        &mut self,
        player: Vec3,
        render_distance: f32,
        rng: &mut R,
    ) -> &StreamStats {
        let _span = tracing::info_span!("chunk_reconcile").entered();
        let started = Instant::now();

        let culled = self.cull(player, render_distance);
        let colliding = self.colliding(player);

        let mut regeneration = None;
        let mut spawned = 0;
        match colliding.first() {
            None => {
                let center = self.grid.coord_at(player);
                self.chunks.clear();
                self.current_square = Some(center);
                spawned = self.fill_around(center, rng);
                regeneration = Some(Regeneration::LostCoverage);
                tracing::info!(?center, spawned, "no chunk under player, window rebuilt");
            }
            Some(&first) => {
                let on_current = self
                    .current_square
                    .is_some_and(|current| colliding.contains(&current));
                if !on_current {
                    self.current_square = Some(first);
                    spawned = self.fill_around(first, rng);
                    regeneration = Some(Regeneration::NewSquare);
                    tracing::debug!(square = ?first, spawned, "entered new square");
                }
            }
        }

        self.stats = StreamStats {
            chunks_spawned: spawned,
            chunks_culled: culled,
            total_chunks: self.chunks.len(),
            regeneration,
            elapsed: started.elapsed(),
        };

        tracing::trace!(
            spawned,
            culled,
            total = self.chunks.len(),
            "reconcile complete"
        );

        &self.stats
    }

    /// Drop every chunk and forget the current square.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.current_square = None;
    }

    pub fn draw(&self, renderer: &mut dyn Renderer, camera: &Camera) {
        for chunk in self.chunks.values() {
            chunk.draw(renderer, camera);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    const RENDER_DISTANCE: f32 = 70.0;

    fn field() -> ChunkField {
        ChunkField::new(StreamConfig::default(), ModelSet::default())
    }

    #[test]
    fn stream_config_defaults() {
        let config = StreamConfig::default();
        assert_eq!(config.chunk_width, 30.0);
        assert_eq!(config.window_radius, 3);
        assert_eq!(config.border_tolerance, 1.0);
        assert_eq!(config.cull_margin, 100.0);
    }

    #[test]
    fn first_reconcile_builds_full_window_at_origin() {
        let mut field = field();
        let mut rng = StdRng::seed_from_u64(1);
        let stats = field.reconcile(Vec3::new(0.0, 3.0, 0.0), RENDER_DISTANCE, &mut rng);

        assert_eq!(stats.chunks_spawned, 49);
        assert_eq!(stats.regeneration, Some(Regeneration::LostCoverage));
        assert_eq!(field.len(), 49);
        assert_eq!(field.current_square(), Some(ChunkCoord::new(0, 0)));

        let xs: HashSet<i32> = field.chunks().map(|c| c.origin().x as i32).collect();
        let zs: HashSet<i32> = field.chunks().map(|c| c.origin().z as i32).collect();
        let expected: HashSet<i32> = (-3..=3).map(|i| i * 30).collect();
        assert_eq!(xs, expected);
        assert_eq!(zs, expected);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let mut field = field();
        let mut rng = StdRng::seed_from_u64(2);
        let player = Vec3::new(4.0, 3.0, -7.0);
        field.reconcile(player, RENDER_DISTANCE, &mut rng);
        let before: Vec<ChunkCoord> = field.chunks().map(Chunk::coord).collect();

        let stats = field.reconcile(player, RENDER_DISTANCE, &mut rng);
        assert_eq!(stats.chunks_spawned, 0);
        assert_eq!(stats.chunks_culled, 0);
        assert_eq!(stats.regeneration, None);

        let after: Vec<ChunkCoord> = field.chunks().map(Chunk::coord).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn coordinates_stay_unique_while_walking() {
        let mut field = field();
        let mut rng = StdRng::seed_from_u64(3);
        for step in 0..400 {
            let player = Vec3::new(step as f32 * 1.3, 3.0, step as f32 * -0.7);
            field.reconcile(player, RENDER_DISTANCE, &mut rng);
            let coords: Vec<ChunkCoord> = field.chunks().map(Chunk::coord).collect();
            let unique: HashSet<ChunkCoord> = coords.iter().copied().collect();
            assert_eq!(coords.len(), unique.len());
            assert!(!field.colliding(player).is_empty());
        }
    }

    #[test]
    fn crossing_into_new_square_tops_up_window() {
        let mut field = field();
        let mut rng = StdRng::seed_from_u64(4);
        field.reconcile(Vec3::new(0.0, 3.0, 0.0), RENDER_DISTANCE, &mut rng);

        // Well inside the neighbouring tile, outside the origin tile's tolerance.
        let stats = field.reconcile(Vec3::new(20.0, 3.0, 0.0), RENDER_DISTANCE, &mut rng);
        assert_eq!(stats.regeneration, Some(Regeneration::NewSquare));
        assert_eq!(stats.chunks_spawned, 7);
        assert_eq!(field.current_square(), Some(ChunkCoord::new(1, 0)));
        assert_eq!(field.len(), 56);
    }

    #[test]
    fn border_overlap_keeps_current_square() {
        let mut field = field();
        let mut rng = StdRng::seed_from_u64(5);
        field.reconcile(Vec3::new(0.0, 3.0, 0.0), RENDER_DISTANCE, &mut rng);

        // Within the 1-unit overlap the player still counts as on (0, 0).
        let stats = field.reconcile(Vec3::new(15.5, 3.0, 0.0), RENDER_DISTANCE, &mut rng);
        assert_eq!(stats.regeneration, None);
        assert_eq!(field.current_square(), Some(ChunkCoord::new(0, 0)));
    }

    #[test]
    fn teleport_rebuilds_window() {
        let mut field = field();
        let mut rng = StdRng::seed_from_u64(6);
        field.reconcile(Vec3::new(0.0, 3.0, 0.0), RENDER_DISTANCE, &mut rng);

        let stats = field.reconcile(Vec3::new(3000.0, 3.0, 3000.0), RENDER_DISTANCE, &mut rng);
        assert_eq!(stats.regeneration, Some(Regeneration::LostCoverage));
        assert_eq!(stats.chunks_culled, 49);
        assert_eq!(field.len(), 49);
        assert_eq!(field.current_square(), Some(ChunkCoord::new(100, 100)));
    }

    #[test]
    fn far_chunks_unload_after_walking_away() {
        let mut field = field();
        let mut rng = StdRng::seed_from_u64(7);
        let mut x = 0.0;
        while x < 600.0 {
            field.reconcile(Vec3::new(x, 3.0, 0.0), RENDER_DISTANCE, &mut rng);
            x += 2.0;
        }
        let radius = field.cull_radius(RENDER_DISTANCE);
        let player = Vec3::new(x - 2.0, 3.0, 0.0);
        assert!(field.chunks().all(|c| c.origin().distance(player) <= radius));
        assert!(!field.contains(ChunkCoord::new(0, 0)));
    }

    #[test]
    fn clear_forgets_current_square() {
        let mut field = field();
        let mut rng = StdRng::seed_from_u64(8);
        field.reconcile(Vec3::ZERO, RENDER_DISTANCE, &mut rng);
        field.clear();
        assert!(field.is_empty());
        assert_eq!(field.current_square(), None);
    }

    #[test]
    fn fill_around_skips_existing() {
        let mut field = field();
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(field.fill_around(ChunkCoord::new(0, 0), &mut rng), 49);
        assert_eq!(field.fill_around(ChunkCoord::new(0, 0), &mut rng), 0);
        assert_eq!(field.fill_around(ChunkCoord::new(0, 1), &mut rng), 7);
    }
}
