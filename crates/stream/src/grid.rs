use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Integer coordinate of a chunk on the ground grid (Y is ignored).
///
/// Ordered so chunk maps iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

/// Fixed-size chunk grid.
///
/// Chunk `(x, z)` is centred on world point `(x * width, 0, z * height)` and
/// spans half a tile in each direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkGrid {
    width: f32,
    height: f32,
}

impl ChunkGrid {
    pub fn new(width: f32, height: f32) -> Self {
        assert!(width > 0.0 && height > 0.0, "chunk size must be positive");
        Self { width, height }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// World-space centre of a chunk, on the ground plane.
    pub fn origin(&self, coord: ChunkCoord) -> Vec3 {
        Vec3::new(coord.x as f32 * self.width, 0.0, coord.z as f32 * self.height)
    }

    /// The chunk whose footprint contains `pos`.
    pub fn coord_at(&self, pos: Vec3) -> ChunkCoord {
        ChunkCoord {
            x: (pos.x / self.width).round() as i32,
            z: (pos.z / self.height).round() as i32,
        }
    }
}

/// Every coordinate within a square radius of `center`, in row order.
pub fn coords_in_radius(center: ChunkCoord, radius: i32) -> Vec<ChunkCoord> {
    let radius = radius.max(0);
    let side = (2 * radius + 1) as usize;
    let mut result = Vec::with_capacity(side * side);
    for dx in -radius..=radius {
        for dz in -radius..=radius {
            result.push(ChunkCoord::new(center.x + dx, center.z + dz));
        }
    }
    result
}
