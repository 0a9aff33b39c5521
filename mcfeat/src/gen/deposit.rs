//! Deposits of soft blocks under water, and boulder blobs.

use glam::IVec3;

use tracing::trace;

use crate::block::{self, BlockSet, material};
use crate::util::JavaRandom;
use crate::world::VoxelAccess;

use super::{FeatureGenerator, FeatureConfigError};


/// Minimum radius of discs, the drawn radius is in `2..radius`.
const MIN_DISC_RADIUS: i32 = 3;

const CLAY_REPLACEABLE: BlockSet = BlockSet::new(&[block::DIRT, block::CLAY]);
const SAND_REPLACEABLE: BlockSet = BlockSet::new(&[block::DIRT, block::GRASS]);

/// Blocks a blob falls through before landing.
const BLOB_FALL_THROUGH: BlockSet = BlockSet::new(&[block::AIR, block::LEAVES, block::LEAVES2]);


/// Common disc sweep of clay, sand and gravel deposits. The origin must be water, the
/// horizontal radius is drawn once and the disc is `half_height` thick on both sides.
fn place_disc<W: VoxelAccess + ?Sized>(
    world: &mut W,
    pos: IVec3,
    rand: &mut JavaRandom,
    max_radius: i32,
    half_height: i32,
    block_id: u8,
    replaceable: &BlockSet,
) -> bool {

    if !material::is_water(world.get_block_id(pos)) {
        return false;
    }

    let radius = rand.next_bounded_int(max_radius - 2) + 2;

    for x in pos.x - radius..=pos.x + radius {
        for z in pos.z - radius..=pos.z + radius {

            let dx = (x - pos.x) as f64;
            let dz = (z - pos.z) as f64;
            if dx * dx + dz * dz > (radius * radius) as f64 {
                continue;
            }

            for y in pos.y - half_height..=pos.y + half_height {
                let disc_pos = IVec3::new(x, y, z);
                if replaceable.contains(world.get_block_id(disc_pos)) {
                    world.place_block(disc_pos, block_id, 0);
                }
            }

        }
    }

    true

}


/// A generator for clay discs under water.
#[derive(Debug, Clone)]
pub struct ClayGenerator {
    count: i32,
}

impl ClayGenerator {

    /// Create a new clay generator, the count is the exclusive maximum disc radius.
    pub fn new(count: i32) -> Result<Self, FeatureConfigError> {
        if count < MIN_DISC_RADIUS {
            return Err(FeatureConfigError::RadiusTooSmall { min: MIN_DISC_RADIUS, got: count });
        }
        Ok(Self { count })
    }

    #[inline]
    pub fn count(&self) -> i32 {
        self.count
    }

}

impl FeatureGenerator for ClayGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {
        place_disc(world, pos, rand, self.count, 1, block::CLAY, &CLAY_REPLACEABLE)
    }

}


/// A generator for sand or gravel discs replacing the soil under water.
#[derive(Debug, Clone)]
pub struct SandGenerator {
    block_id: u8,
    radius: i32,
}

impl SandGenerator {

    /// Create a new disc generator of the given block, the radius is exclusive.
    pub fn new(block_id: u8, radius: i32) -> Result<Self, FeatureConfigError> {
        if radius < MIN_DISC_RADIUS {
            return Err(FeatureConfigError::RadiusTooSmall { min: MIN_DISC_RADIUS, got: radius });
        }
        Ok(Self { block_id, radius })
    }

    #[inline]
    pub fn block_id(&self) -> u8 {
        self.block_id
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

}

impl FeatureGenerator for SandGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {
        place_disc(world, pos, rand, self.radius, 2, self.block_id, &SAND_REPLACEABLE)
    }

}


/// A generator for blobs of three overlapping spheres stepping downhill, such as mossy
/// boulders in mega taiga.
#[derive(Debug, Clone)]
pub struct BlockBlobGenerator {
    block_id: u8,
    start_radius: i32,
}

impl BlockBlobGenerator {

    #[inline]
    pub fn new(block_id: u8, start_radius: i32) -> Self {
        Self { block_id, start_radius }
    }

    #[inline]
    pub fn new_mossy_cobblestone() -> Self {
        Self::new(block::MOSS_STONE, 0)
    }

}

impl FeatureGenerator for BlockBlobGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, mut pos: IVec3, rand: &mut JavaRandom) -> bool {

        while pos.y > 3 && BLOB_FALL_THROUGH.contains(world.get_block_id(pos - IVec3::Y)) {
            pos.y -= 1;
        }

        if pos.y <= 3 {
            return false;
        }

        for _ in 0..3 {

            let x_radius = self.start_radius + rand.next_bounded_int(2);
            let y_radius = self.start_radius + rand.next_bounded_int(2);
            let z_radius = self.start_radius + rand.next_bounded_int(2);

            let dist = (x_radius + y_radius + z_radius) as f64 * 0.333 + 0.5;
            let dist_sq = dist * dist;

            for x in pos.x - x_radius..=pos.x + x_radius {
                let dx = (x - pos.x) as f64 + 0.5;
                for z in pos.z - z_radius..=pos.z + z_radius {
                    let dz = (z - pos.z) as f64 + 0.5;
                    for y in pos.y - y_radius..=pos.y + y_radius {
                        let dy = (y - pos.y) as f64 + 0.5;
                        if dx * dx + dy * dy + dz * dz <= dist_sq {
                            world.place_block(IVec3::new(x, y, z), self.block_id, 0);
                        }
                    }
                }
            }

            pos.x += -(1 + rand.next_bounded_int(2)) + {
                let v = 1 + rand.next_bounded_int(2);
                rand.next_bounded_int(v)
            };
            pos.y -= rand.next_bounded_int(2);
            pos.z += -(1 + rand.next_bounded_int(2)) + {
                let v = 1 + rand.next_bounded_int(2);
                rand.next_bounded_int(v)
            };

        }

        trace!("blob of {} ending at {pos}", block::name(self.block_id));

        true

    }

}
