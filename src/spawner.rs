/// Balloon factory.  Randomness is injected so tests can seed it.

use rand::Rng;

use crate::entities::{LevelDescriptor, SpawnPattern, Target, TARGET_HEIGHT};

/// Horizontal gap between consecutive balloons of one level.
const TARGET_SPACING: f32 = 25.0;

/// Build balloon number `index` of `level`.
pub fn spawn_target(
    level: &LevelDescriptor,
    index: usize,
    width: f32,
    height: f32,
    rng: &mut impl Rng,
) -> Target {
    let x = index as f32 * TARGET_SPACING + width / 2.0;
    let floor = (height - TARGET_HEIGHT).max(0.0);
    let y = match level.spawn {
        SpawnPattern::Line => floor,
        SpawnPattern::Random if floor > 0.0 => rng.gen_range(0.0..floor),
        SpawnPattern::Random => 0.0,
    };
    Target::new(x, y, level.speed)
}

/// The full batch for a level, in spawn order.
pub fn spawn_batch(
    level: &LevelDescriptor,
    width: f32,
    height: f32,
    rng: &mut impl Rng,
) -> Vec<Target> {
    (0..level.targets as usize)
        .map(|i| spawn_target(level, i, width, height, rng))
        .collect()
}
