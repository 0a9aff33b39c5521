//! World feature generation module.
//!
//! PARITY: Every generator consumes the random stream in the exact order of the Notchian
//! implementation, changing the order of two draws, or drawing where the Notchian code
//! short-circuits, breaks seed compatibility. Some loops below look odd for this reason.

use glam::IVec3;

use thiserror::Error;

use crate::util::JavaRandom;
use crate::world::VoxelAccess;


pub mod tree;
pub mod vein;
pub mod liquid;
pub mod dungeon;
pub mod mushroom;
pub mod ice;
pub mod plant;
pub mod deposit;


/// A trait for all feature generators, a feature is stamped into the world from one
/// origin and the generator returns true if it actually placed it.
///
/// Generators are immutable configuration, any working state only lives for the
/// duration of a call, so a single generator can be shared between worker threads as
/// long as each one owns its random stream and world region.
pub trait FeatureGenerator {

    /// Generate the feature at the given position in the world with given RNG.
    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool;

}


/// Error returned when constructing a generator from an invalid configuration, these
/// configurations would otherwise produce a degenerate or undefined random draw.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeatureConfigError {
    #[error("vein block count must be positive")]
    EmptyVein,
    #[error("metadata {0} does not fit in 4 bits")]
    MetadataOutOfRange(u8),
    #[error("radius {got} is too small, minimum is {min}")]
    RadiusTooSmall {
        min: i32,
        got: i32,
    },
    #[error("distribution spread must be positive, got {0}")]
    EmptySpread(i32),
    #[error("vein count per chunk must be positive, got {0}")]
    NoVeins(i32),
}


/// Offset a position by the triangular jitter of scatter placers, each component is the
/// difference of two bounded draws, drawn in X, Y then Z order.
#[inline]
pub(crate) fn scatter(pos: IVec3, rand: &mut JavaRandom, horizontal: i32, vertical: i32) -> IVec3 {
    let x = rand.next_bounded_int(horizontal) - rand.next_bounded_int(horizontal);
    let y = rand.next_bounded_int(vertical) - rand.next_bounded_int(vertical);
    let z = rand.next_bounded_int(horizontal) - rand.next_bounded_int(horizontal);
    pos + IVec3::new(x, y, z)
}


#[cfg(test)]
pub(crate) mod testutil {

    use glam::IVec3;

    use crate::world::{ChunkedWorld, RecordingWorld, VoxelAccess};
    use crate::block;

    /// Plain terrain: stone up to 59, dirt up to 62 and a grass surface at 63.
    pub fn grass_world() -> RecordingWorld<ChunkedWorld> {
        RecordingWorld::new(ChunkedWorld::with_layers(0, &[
            (block::STONE, 0, 60),
            (block::DIRT, 0, 3),
            (block::GRASS, 0, 1),
        ]))
    }

    /// A world of stone up to Y 127 included.
    pub fn stone_world() -> RecordingWorld<ChunkedWorld> {
        RecordingWorld::new(ChunkedWorld::with_layers(0, &[(block::STONE, 0, 128)]))
    }

    /// Count blocks of the given id in a cube of given radius around the center.
    pub fn count_blocks(world: &impl VoxelAccess, center: IVec3, radius: i32, id: u8) -> usize {
        let mut count = 0;
        for x in -radius..=radius {
            for y in -radius..=radius {
                for z in -radius..=radius {
                    if world.is_block(center + IVec3::new(x, y, z), id) {
                        count += 1;
                    }
                }
            }
        }
        count
    }

}
