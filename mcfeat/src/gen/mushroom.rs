//! Huge mushroom generator.

use glam::IVec3;

use crate::block::{self, BlockSet};
use crate::util::JavaRandom;
use crate::world::VoxelAccess;

use super::FeatureGenerator;


/// Texture metadata of huge mushroom blocks, each tells which faces show the cap.
pub mod cap {
    pub const ALL_INSIDE: u8 = 0;
    pub const NORTH_WEST: u8 = 1;
    pub const NORTH: u8 = 2;
    pub const NORTH_EAST: u8 = 3;
    pub const WEST: u8 = 4;
    pub const CENTER: u8 = 5;
    pub const EAST: u8 = 6;
    pub const SOUTH_WEST: u8 = 7;
    pub const SOUTH: u8 = 8;
    pub const SOUTH_EAST: u8 = 9;
    pub const STEM: u8 = 10;
    pub const ALL_OUTSIDE: u8 = 14;
    pub const ALL_STEM: u8 = 15;
}

/// Blocks that a huge mushroom may replace.
const MUSHROOM_OVERRIDABLE: BlockSet = BlockSet::new(&[
    block::AIR,
    block::SAPLING,
    block::LOG,
    block::LEAVES,
    block::SNOW_LAYER,
    block::WOOD2,
    block::LEAVES2,
]);

/// Blocks accepted in the clearance volume.
const MUSHROOM_CLEARANCE: BlockSet = BlockSet::new(&[block::AIR, block::LEAVES, block::LEAVES2]);

const MUSHROOM_SOILS: BlockSet = BlockSet::new(&[block::DIRT, block::GRASS, block::MYCELIUM]);


/// Species of huge mushroom to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MushroomKind {
    /// Flat and wide brown cap.
    Brown,
    /// Rounded red cap hanging 3 blocks down.
    Red,
    /// Pick brown or red with one boolean draw on each call.
    Random,
}

impl MushroomKind {

    /// Return the block id of this kind, drawing for the random kind.
    fn resolve(self, rand: &mut JavaRandom) -> u8 {
        match self {
            MushroomKind::Brown => block::BROWN_MUSHROOM_BLOCK,
            MushroomKind::Red => block::RED_MUSHROOM_BLOCK,
            MushroomKind::Random if rand.next_boolean() => block::BROWN_MUSHROOM_BLOCK,
            MushroomKind::Random => block::RED_MUSHROOM_BLOCK,
        }
    }

}


/// A generator for huge mushrooms.
#[derive(Debug, Clone)]
pub struct BigMushroomGenerator {
    kind: MushroomKind,
}

impl BigMushroomGenerator {

    #[inline]
    pub fn new(kind: MushroomKind) -> Self {
        Self { kind }
    }

    #[inline]
    pub fn new_brown() -> Self {
        Self::new(MushroomKind::Brown)
    }

    #[inline]
    pub fn new_red() -> Self {
        Self::new(MushroomKind::Red)
    }

    #[inline]
    pub fn kind(&self) -> MushroomKind {
        self.kind
    }

}

impl FeatureGenerator for BigMushroomGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        let block_id = self.kind.resolve(rand);

        let mut height = rand.next_bounded_int(3) + 4;
        if rand.next_bounded_int(12) == 0 {
            height *= 2;
        }

        if pos.y < 1 || pos.y + height + 1 >= 256 {
            return false;
        }

        for y in pos.y..=pos.y + height + 1 {
            let radius = if y <= pos.y + 3 { 0 } else { 3 };
            for x in pos.x - radius..=pos.x + radius {
                for z in pos.z - radius..=pos.z + radius {
                    if !MUSHROOM_CLEARANCE.contains(world.get_block_id(IVec3::new(x, y, z))) {
                        return false;
                    }
                }
            }
        }

        if !MUSHROOM_SOILS.contains(world.get_block_id(pos - IVec3::Y)) {
            return false;
        }

        let top = pos.y + height;
        let cap_start = if block_id == block::RED_MUSHROOM_BLOCK { top - 3 } else { top };

        for y in cap_start..=top {

            let radius = if block_id == block::BROWN_MUSHROOM_BLOCK {
                3
            } else if y < top {
                2
            } else {
                1
            };

            let min_x = pos.x - radius;
            let max_x = pos.x + radius;
            let min_z = pos.z - radius;
            let max_z = pos.z + radius;

            for x in min_x..=max_x {
                for z in min_z..=max_z {

                    let mut meta = cap::CENTER;

                    if x == min_x {
                        meta -= 1;
                    } else if x == max_x {
                        meta += 1;
                    }

                    if z == min_z {
                        meta -= 3;
                    } else if z == max_z {
                        meta += 3;
                    }

                    if block_id == block::BROWN_MUSHROOM_BLOCK || y < top {

                        if (x == min_x || x == max_x) && (z == min_z || z == max_z) {
                            continue;
                        }

                        // Cells next to the cut corners take the diagonal texture.
                        let inner = radius - 1;
                        if (x == pos.x - inner && z == min_z) || (x == min_x && z == pos.z - inner) {
                            meta = cap::NORTH_WEST;
                        }
                        if (x == pos.x + inner && z == min_z) || (x == max_x && z == pos.z - inner) {
                            meta = cap::NORTH_EAST;
                        }
                        if (x == pos.x - inner && z == max_z) || (x == min_x && z == pos.z + inner) {
                            meta = cap::SOUTH_WEST;
                        }
                        if (x == pos.x + inner && z == max_z) || (x == max_x && z == pos.z + inner) {
                            meta = cap::SOUTH_EAST;
                        }

                    }

                    if meta == cap::CENTER && y < top {
                        meta = cap::ALL_INSIDE;
                    }

                    if meta != cap::ALL_INSIDE {
                        let cap_pos = IVec3::new(x, y, z);
                        if MUSHROOM_OVERRIDABLE.contains(world.get_block_id(cap_pos)) {
                            world.place_block(cap_pos, block_id, meta);
                        }
                    }

                }
            }

        }

        for dy in 0..height {
            let stem_pos = pos + IVec3::new(0, dy, 0);
            if MUSHROOM_OVERRIDABLE.contains(world.get_block_id(stem_pos)) {
                world.place_block(stem_pos, block_id, cap::STEM);
            }
        }

        true

    }

}
