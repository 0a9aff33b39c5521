//! Tree generation functions.

use glam::IVec3;

use crate::block::{self, BlockSet};
use crate::chunk::is_valid_y;
use crate::geom::PosExt;
use crate::util::JavaRandom;
use crate::world::VoxelAccess;

use super::FeatureGenerator;

mod simple;
mod big_oak;
mod dark_oak;
mod spruce;
mod savanna;
mod swamp;
mod jungle;
mod mega_pine;

pub use simple::SimpleTreeGenerator;
pub use big_oak::{BigOakTreeGenerator, BigOakParams};
pub use dark_oak::DarkOakTreeGenerator;
pub use spruce::{PineTreeGenerator, SpruceTreeGenerator};
pub use savanna::SavannaTreeGenerator;
pub use swamp::SwampTreeGenerator;
pub use jungle::{JungleTreeGenerator, MegaJungleTreeGenerator, JungleBushGenerator};
pub use mega_pine::MegaPineTreeGenerator;


/// Blocks that a growing tree is allowed to replace by default.
pub const TREE_OVERRIDABLE: BlockSet = BlockSet::new(&[
    block::AIR,
    block::SAPLING,
    block::LOG,
    block::LEAVES,
    block::SNOW_LAYER,
    block::LEAVES2,
    block::WOOD2,
]);

/// Blocks that a tree trunk can pass through when searching for the ground below.
const GROUND_PASSABLE: BlockSet = BlockSet::new(&[block::AIR, block::TALL_GRASS, block::LEAVES]);


/// Blocks and metadata of a tree species, along with the blocks it can replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    pub trunk_id: u8,
    pub trunk_meta: u8,
    pub leaf_id: u8,
    pub leaf_meta: u8,
    pub overridable: BlockSet,
}

impl TreeConfig {

    pub const OAK: Self = Self::new(block::LOG, block::LEAVES, 0);
    pub const SPRUCE: Self = Self::new(block::LOG, block::LEAVES, 1);
    pub const BIRCH: Self = Self::new(block::LOG, block::LEAVES, 2);
    pub const JUNGLE: Self = Self::new(block::LOG, block::LEAVES, 3);
    pub const ACACIA: Self = Self::new(block::WOOD2, block::LEAVES2, 0);
    pub const DARK_OAK: Self = Self::new(block::WOOD2, block::LEAVES2, 1);

    /// A species using the same metadata for both trunk and leaves.
    pub const fn new(trunk_id: u8, leaf_id: u8, meta: u8) -> Self {
        Self {
            trunk_id,
            trunk_meta: meta,
            leaf_id,
            leaf_meta: meta,
            overridable: TREE_OVERRIDABLE,
        }
    }

}


/// Check that the column of a small tree only contains overridable blocks, the checked
/// radius is 0 at the base, 1 along the trunk and 2 from the top of the trunk to two
/// blocks above it.
fn check_tree_column<W: VoxelAccess + ?Sized>(
    world: &W,
    pos: IVec3,
    height: i32,
    overridable: &BlockSet,
) -> bool {

    let mut radius = 0;

    for dy in 0..height + 3 {

        if dy == 1 || dy == height {
            radius += 1;
        }

        let y = pos.y + dy;
        if !is_valid_y(y) {
            return false;
        }

        for x in pos.x - radius..=pos.x + radius {
            for z in pos.z - radius..=pos.z + radius {
                if !overridable.contains(world.get_block_id(IVec3::new(x, y, z))) {
                    return false;
                }
            }
        }

    }

    true

}

/// Convert the soil below to dirt and grow a straight trunk, only replacing
/// overridable blocks.
fn place_trunk<W: VoxelAccess + ?Sized>(world: &mut W, pos: IVec3, config: &TreeConfig, height: i32) {
    world.place_block(pos.down(1), block::DIRT, 0);
    for dy in 0..height {
        let trunk_pos = pos.up(dy);
        if config.overridable.contains(world.get_block_id(trunk_pos)) {
            world.place_block(trunk_pos, config.trunk_id, config.trunk_meta);
        }
    }
}

/// Search downward from the given position for the first Y that stands on one of the
/// given soils, going through air, tall grass and leaves. Returns none if another block
/// is found first or if the bottom of the world is reached.
fn find_ground<W: VoxelAccess + ?Sized>(world: &W, pos: IVec3, soils: &BlockSet) -> Option<i32> {
    let mut y = pos.y;
    while y > 0 {
        let id = world.get_block_id(IVec3::new(pos.x, y - 1, pos.z));
        if soils.contains(id) {
            return Some(y);
        } else if !GROUND_PASSABLE.contains(id) {
            return None;
        }
        y -= 1;
    }
    None
}


/// A generic tree generator of any type.
#[derive(Debug, Clone)]
pub enum TreeGenerator {
    Simple(SimpleTreeGenerator),
    BigOak(BigOakTreeGenerator),
    DarkOak(DarkOakTreeGenerator),
    Pine(PineTreeGenerator),
    Spruce(SpruceTreeGenerator),
    Savanna(SavannaTreeGenerator),
    Swamp(SwampTreeGenerator),
    Jungle(JungleTreeGenerator),
    MegaJungle(MegaJungleTreeGenerator),
    MegaPine(MegaPineTreeGenerator),
    JungleBush(JungleBushGenerator),
}

impl TreeGenerator {

    #[inline]
    pub fn new_oak() -> Self {
        Self::Simple(SimpleTreeGenerator::new_oak())
    }

    #[inline]
    pub fn new_birch() -> Self {
        Self::Simple(SimpleTreeGenerator::new_birch())
    }

    #[inline]
    pub fn new_super_birch() -> Self {
        Self::Simple(SimpleTreeGenerator::new_super_birch())
    }

    #[inline]
    pub fn new_big_oak() -> Self {
        Self::BigOak(BigOakTreeGenerator::new())
    }

    #[inline]
    pub fn new_dark_oak() -> Self {
        Self::DarkOak(DarkOakTreeGenerator::new())
    }

    #[inline]
    pub fn new_pine() -> Self {
        Self::Pine(PineTreeGenerator::new())
    }

    #[inline]
    pub fn new_spruce() -> Self {
        Self::Spruce(SpruceTreeGenerator::new())
    }

    #[inline]
    pub fn new_savanna() -> Self {
        Self::Savanna(SavannaTreeGenerator::new())
    }

    #[inline]
    pub fn new_swamp() -> Self {
        Self::Swamp(SwampTreeGenerator::new())
    }

    #[inline]
    pub fn new_jungle() -> Self {
        Self::Jungle(JungleTreeGenerator::new())
    }

    #[inline]
    pub fn new_mega_jungle() -> Self {
        Self::MegaJungle(MegaJungleTreeGenerator::new())
    }

    #[inline]
    pub fn new_mega_pine(podzol: bool) -> Self {
        Self::MegaPine(MegaPineTreeGenerator::new(podzol))
    }

    #[inline]
    pub fn new_jungle_bush() -> Self {
        Self::JungleBush(JungleBushGenerator::new_jungle())
    }

}

impl FeatureGenerator for TreeGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {
        match self {
            TreeGenerator::Simple(gen) => gen.generate(world, pos, rand),
            TreeGenerator::BigOak(gen) => gen.generate(world, pos, rand),
            TreeGenerator::DarkOak(gen) => gen.generate(world, pos, rand),
            TreeGenerator::Pine(gen) => gen.generate(world, pos, rand),
            TreeGenerator::Spruce(gen) => gen.generate(world, pos, rand),
            TreeGenerator::Savanna(gen) => gen.generate(world, pos, rand),
            TreeGenerator::Swamp(gen) => gen.generate(world, pos, rand),
            TreeGenerator::Jungle(gen) => gen.generate(world, pos, rand),
            TreeGenerator::MegaJungle(gen) => gen.generate(world, pos, rand),
            TreeGenerator::MegaPine(gen) => gen.generate(world, pos, rand),
            TreeGenerator::JungleBush(gen) => gen.generate(world, pos, rand),
        }
    }

}
