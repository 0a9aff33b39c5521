use glam::IVec3;

use crate::block::{self, BlockSet};
use crate::geom::PosExt;
use crate::util::JavaRandom;
use crate::world::VoxelAccess;
use crate::gen::FeatureGenerator;

use super::{TreeConfig, check_tree_column};


const LEAF_REPLACEABLE: BlockSet = BlockSet::new(&[block::AIR, block::LEAVES, block::VINE]);
const TRUNK_REPLACEABLE: BlockSet = LEAF_REPLACEABLE.with(block::LEAVES2);


/// A feature generator for simple trees of varying blocks and height.
#[derive(Debug, Clone)]
pub struct SimpleTreeGenerator {
    config: TreeConfig,
    /// Minimum height for the simple tree.
    min_height: i32,
    /// Exclusive bound of an additional random height, zero to disable.
    extra_height: i32,
}

impl SimpleTreeGenerator {

    #[inline]
    pub fn new(config: TreeConfig, min_height: i32, extra_height: i32) -> Self {
        Self {
            config,
            min_height,
            extra_height,
        }
    }

    #[inline]
    pub fn new_oak() -> Self {
        Self::new(TreeConfig::OAK, 4, 0)
    }

    #[inline]
    pub fn new_birch() -> Self {
        Self::new(TreeConfig::BIRCH, 5, 0)
    }

    /// Birch tree with up to 6 more blocks of trunk.
    #[inline]
    pub fn new_super_birch() -> Self {
        Self::new(TreeConfig::BIRCH, 5, 7)
    }

}

impl FeatureGenerator for SimpleTreeGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        let mut height = rand.next_bounded_int(3) + self.min_height;
        if self.extra_height > 0 {
            height += rand.next_bounded_int(self.extra_height);
        }

        if !check_tree_column(world, pos, height, &self.config.overridable) {
            return false;
        }

        if !matches!(world.get_block_id(pos.down(1)), block::GRASS | block::DIRT | block::FARMLAND) {
            return false;
        }

        world.place_block(pos.down(1), block::DIRT, 0);

        let top = pos.y + height;
        for y in (top - 3)..=top {

            let dy = y - top;  // Delta from top of the tree.
            let radius = 1 - dy / 2;

            for x in pos.x - radius..=pos.x + radius {
                for z in pos.z - radius..=pos.z + radius {
                    let dx = (x - pos.x).abs();
                    let dz = (z - pos.z).abs();
                    // PARITY: Corner draw happens before the top layer test.
                    if dx != radius || dz != radius || (rand.next_bounded_int(2) != 0 && dy != 0) {
                        let leaf_pos = IVec3::new(x, y, z);
                        if LEAF_REPLACEABLE.contains(world.get_block_id(leaf_pos)) {
                            world.place_block(leaf_pos, self.config.leaf_id, self.config.leaf_meta);
                        }
                    }
                }
            }

        }

        for dy in 0..height {
            let trunk_pos = pos.up(dy);
            if TRUNK_REPLACEABLE.contains(world.get_block_id(trunk_pos)) {
                world.place_block(trunk_pos, self.config.trunk_id, self.config.trunk_meta);
            }
        }

        true

    }

}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::gen::testutil::grass_world;

    #[test]
    fn birch_height_range() {
        for seed in 0..32 {
            let mut world = grass_world();
            let mut rand = JavaRandom::new(seed);
            let origin = IVec3::new(0, 64, 0);
            assert!(SimpleTreeGenerator::new_super_birch().generate(&mut world, origin, &mut rand));
            let trunk = (0..20).take_while(|&dy| world.is_block(origin.up(dy), block::LOG)).count();
            assert!((5..=13).contains(&trunk), "trunk of {trunk}");
            assert_eq!(world.get_block(origin), (block::LOG, 2));
        }
    }

    #[test]
    fn blocked_by_stone() {
        let mut world = grass_world();
        world.place_block(IVec3::new(0, 66, 1), block::STONE, 0);
        world.clear();
        let mut rand = JavaRandom::new(0);
        assert!(!SimpleTreeGenerator::new_oak().generate(&mut world, IVec3::new(0, 64, 0), &mut rand));
        assert!(world.writes().is_empty());
    }

}
