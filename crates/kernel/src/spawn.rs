//! Placement of newly spawned entities.

use glam::Vec3;
use rand::Rng;

use crate::config::SpawnTuning;

/// A point on the ring `render_distance + spawn_margin` around `player`, at a
/// random height.
///
/// One angle in [0, 90) picks the direction within a quadrant and two
/// independent sign flips pick the quadrant, so the horizontal direction is
/// always unit length and enemies never appear inside the visible radius.
pub fn enemy_spawn_position<R: Rng + ?Sized>(
    player: Vec3,
    render_distance: f32,
    tuning: &SpawnTuning,
    rng: &mut R,
) -> Vec3 {
    let angle = rng.gen_range(0.0_f32..90.0).to_radians();
    let height = rng.gen_range(tuning.spawn_height_min..tuning.spawn_height_max);

    let mut x = angle.cos();
    let mut z = angle.sin();
    if rng.gen_bool(0.5) {
        x = -x;
    }
    if rng.gen_bool(0.5) {
        z = -z;
    }

    let reach = render_distance + tuning.spawn_margin;
    Vec3::new(player.x + x * reach, height, player.z + z * reach)
}

/// Where a shot leaves the player: just below eye level.
pub fn muzzle_position(eye: Vec3, muzzle_drop: f32) -> Vec3 {
    eye - Vec3::Y * muzzle_drop
}
