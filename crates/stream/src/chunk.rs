use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thicket_common::{ModelHandle, ModelSet};
use thicket_render::{Camera, Renderer, uniforms};

use crate::grid::{ChunkCoord, ChunkGrid};

pub const GROUND_SHININESS: f32 = 10.0;

/// How decorations (trees) are scattered and culled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationConfig {
    /// Upper bound of the uniform per-chunk count, inclusive.
    pub max_count: u32,
    /// Near-field and far-plane tolerance used when culling one decoration.
    pub cull_tolerance: f32,
    pub shininess: f32,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            max_count: 10,
            cull_tolerance: 10.0,
            shininess: 5.0,
        }
    }
}

/// One ground tile plus the decorations scattered over it.
#[derive(Debug, Clone)]
pub struct Chunk {
    coord: ChunkCoord,
    origin: Vec3,
    width: f32,
    height: f32,
    decorations: Vec<Vec3>,
    style: DecorationConfig,
    ground_model: ModelHandle,
    decoration_model: ModelHandle,
}

impl Chunk {
    /// Build a chunk, drawing its decoration layout from `rng`.
    pub fn generate<R: Rng + ?Sized>(
        coord: ChunkCoord,
        grid: &ChunkGrid,
        models: &ModelSet,
        style: DecorationConfig,
        rng: &mut R,
    ) -> Self {
        let origin = grid.origin(coord);
        let (half_w, half_h) = (grid.width() * 0.5, grid.height() * 0.5);

        let count = rng.gen_range(0..=style.max_count);
        let decorations = (0..count)
            .map(|_| {
                Vec3::new(
                    origin.x + rng.gen_range(-half_w..=half_w),
                    0.0,
                    origin.z + rng.gen_range(-half_h..=half_h),
                )
            })
            .collect();

        Self {
            coord,
            origin,
            width: grid.width(),
            height: grid.height(),
            decorations,
            style,
            ground_model: models.ground,
            decoration_model: models.tree,
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn decorations(&self) -> &[Vec3] {
        &self.decorations
    }

    /// Footprint test on the ground plane, widened by `tolerance` on each side.
    pub fn contains(&self, pos: Vec3, tolerance: f32) -> bool {
        (pos.x - self.origin.x).abs() < self.width * 0.5 + tolerance
            && (pos.z - self.origin.z).abs() < self.height * 0.5 + tolerance
    }

    /// Draw the ground if it is within range, then each decoration that
    /// passes its own view and range tests.
    pub fn draw(&self, renderer: &mut dyn Renderer, camera: &Camera) {
        if camera.is_within_render_distance(self.origin, self.width) {
            renderer.submit_transform(self.origin, Vec3::ONE);
            renderer.submit_material_scalar(uniforms::SHININESS, GROUND_SHININESS);
            renderer.draw_geometry(self.ground_model);
        }

        let tolerance = self.style.cull_tolerance;
        let mut shininess_bound = false;
        for &pos in &self.decorations {
            if !(camera.is_in_field_of_view(pos, tolerance)
                && camera.is_within_render_distance(pos, tolerance))
            {
                continue;
            }
            if !shininess_bound {
                renderer.submit_material_scalar(uniforms::SHININESS, self.style.shininess);
                shininess_bound = true;
            }
            renderer.submit_transform(pos, Vec3::ONE);
            renderer.draw_geometry(self.decoration_model);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use thicket_render::DrawRecorder;

    fn grid() -> ChunkGrid {
        ChunkGrid::new(30.0, 30.0)
    }

    /// A chunk with a fixed decoration layout.
    fn planted(origin: Vec3, decorations: Vec<Vec3>) -> Chunk {
        let models = ModelSet::default();
        Chunk {
            coord: ChunkCoord::new(0, 0),
            origin,
            width: 30.0,
            height: 30.0,
            decorations,
            style: DecorationConfig::default(),
            ground_model: models.ground,
            decoration_model: models.tree,
        }
    }

    fn tree_positions(recorder: &DrawRecorder) -> Vec<Vec3> {
        let tree = ModelSet::default().tree;
        recorder
            .draws()
            .iter()
            .filter(|c| c.model == tree)
            .map(|c| c.transform.translation)
            .collect()
    }

    #[test]
    fn decorations_stay_inside_footprint() {
        let mut rng = StdRng::seed_from_u64(3);
        let style = DecorationConfig {
            max_count: 40,
            ..DecorationConfig::default()
        };
        for x in -3..=3 {
            let chunk = Chunk::generate(
                ChunkCoord::new(x, 2),
                &grid(),
                &ModelSet::default(),
                style,
                &mut rng,
            );
            assert!(chunk.decorations().len() <= 40);
            for d in chunk.decorations() {
                assert_eq!(d.y, 0.0);
                assert!(chunk.contains(*d, 0.001));
            }
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let make = || {
            let mut rng = StdRng::seed_from_u64(99);
            Chunk::generate(
                ChunkCoord::new(1, -1),
                &grid(),
                &ModelSet::default(),
                DecorationConfig::default(),
                &mut rng,
            )
        };
        assert_eq!(make().decorations(), make().decorations());
    }

    #[test]
    fn zero_max_count_means_bare_ground() {
        let mut rng = StdRng::seed_from_u64(1);
        let style = DecorationConfig {
            max_count: 0,
            ..DecorationConfig::default()
        };
        let chunk = Chunk::generate(
            ChunkCoord::new(0, 0),
            &grid(),
            &ModelSet::default(),
            style,
            &mut rng,
        );
        assert!(chunk.decorations().is_empty());
    }

    #[test]
    fn contains_respects_border_tolerance() {
        let mut rng = StdRng::seed_from_u64(1);
        let chunk = Chunk::generate(
            ChunkCoord::new(0, 0),
            &grid(),
            &ModelSet::default(),
            DecorationConfig::default(),
            &mut rng,
        );
        assert!(chunk.contains(Vec3::new(15.5, 3.0, 0.0), 1.0));
        assert!(!chunk.contains(Vec3::new(15.5, 3.0, 0.0), 0.0));
        assert!(!chunk.contains(Vec3::new(0.0, 3.0, -16.5), 1.0));
    }

    #[test]
    fn distant_chunk_draws_nothing() {
        let mut rng = StdRng::seed_from_u64(5);
        let chunk = Chunk::generate(
            ChunkCoord::new(10, 10),
            &grid(),
            &ModelSet::default(),
            DecorationConfig::default(),
            &mut rng,
        );
        let mut recorder = DrawRecorder::new();
        chunk.draw(&mut recorder, &Camera::default());
        assert!(recorder.draws().is_empty());
    }

    #[test]
    fn near_chunk_draws_ground_with_shininess() {
        let mut rng = StdRng::seed_from_u64(5);
        let models = ModelSet::default();
        let chunk = Chunk::generate(
            ChunkCoord::new(0, 0),
            &grid(),
            &models,
            DecorationConfig::default(),
            &mut rng,
        );
        let mut recorder = DrawRecorder::new();
        chunk.draw(&mut recorder, &Camera::default());

        assert_eq!(recorder.count_for(models.ground), 1);
        assert_eq!(recorder.draws()[0].shininess, Some(GROUND_SHININESS));
        for call in recorder.draws().iter().filter(|c| c.model == models.tree) {
            assert_eq!(call.shininess, Some(5.0));
        }
    }

    #[test]
    fn decorations_are_culled_independently_of_ground() {
        let models = ModelSet::default();
        let chunk = planted(
            Vec3::ZERO,
            vec![
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(-25.0, 0.0, 0.0),
                Vec3::new(20.0, 0.0, 20.0),
            ],
        );
        let mut recorder = DrawRecorder::new();
        chunk.draw(&mut recorder, &Camera::default());

        assert_eq!(recorder.count_for(models.ground), 1);
        assert_eq!(tree_positions(&recorder), [Vec3::new(10.0, 0.0, 0.0)]);
    }

    #[test]
    fn decoration_drawn_when_ground_is_out_of_range() {
        let models = ModelSet::default();
        // Ground origin is 150 away, past render distance plus one chunk width.
        let chunk = planted(Vec3::new(150.0, 0.0, 0.0), vec![Vec3::new(60.0, 0.0, 0.0)]);
        let mut recorder = DrawRecorder::new();
        chunk.draw(&mut recorder, &Camera::default());

        assert_eq!(recorder.count_for(models.ground), 0);
        assert_eq!(tree_positions(&recorder), [Vec3::new(60.0, 0.0, 0.0)]);
        assert_eq!(recorder.draws()[0].shininess, Some(5.0));
    }
}
