//! Streaming: an endless forest built from fixed-size chunks that load just
//! ahead of the player and unload once far enough behind.
//!
//! # Invariants
//! - A chunk's identity is its grid coordinate; the active set never holds
//!   two chunks with the same coordinate.
//! - A chunk consumes randomness only while it is generated.
//! - Reconciling twice from the same position changes nothing.

mod chunk;
mod field;
mod grid;

pub use chunk::{Chunk, DecorationConfig, GROUND_SHININESS};
pub use field::{ChunkField, Regeneration, StreamConfig, StreamStats};
pub use grid::{ChunkCoord, ChunkGrid, coords_in_radius};

pub fn crate_info() -> &'static str {
    "thicket-stream v0.1.0"
}
