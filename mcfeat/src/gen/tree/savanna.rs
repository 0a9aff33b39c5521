use glam::IVec3;

use crate::block;
use crate::chunk::is_valid_y;
use crate::geom::PosExt;
use crate::util::{Face, JavaRandom};
use crate::world::VoxelAccess;
use crate::gen::FeatureGenerator;

use super::TreeConfig;


/// A generator for acacia trees, a bent trunk with a flat canopy and an optional second
/// branch going in another direction.
#[derive(Debug, Clone)]
pub struct SavannaTreeGenerator {
    config: TreeConfig,
}

impl SavannaTreeGenerator {

    #[inline]
    pub fn new() -> Self {
        Self { config: TreeConfig::ACACIA }
    }

    fn check_column<W: VoxelAccess + ?Sized>(&self, world: &W, pos: IVec3, height: i32) -> bool {
        for y in pos.y..=pos.y + 1 + height {
            let radius = if y >= pos.y + 1 + height - 2 {
                2
            } else if y == pos.y {
                0
            } else {
                1
            };
            if !is_valid_y(y) {
                return false;
            }
            for x in pos.x - radius..=pos.x + radius {
                for z in pos.z - radius..=pos.z + radius {
                    if !self.config.overridable.contains(world.get_block_id(IVec3::new(x, y, z))) {
                        return false;
                    }
                }
            }
        }
        true
    }

    fn place_leaf<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3) {
        if matches!(world.get_block_id(pos), block::AIR | block::LEAVES | block::LEAVES2) {
            world.place_block(pos, self.config.leaf_id, self.config.leaf_meta);
        }
    }

    fn place_canopy<W: VoxelAccess + ?Sized>(&self, world: &mut W, center: IVec3) {

        for dx in -3i32..=3 {
            for dz in -3i32..=3 {
                if dx.abs() != 3 || dz.abs() != 3 {
                    self.place_leaf(world, center + IVec3::new(dx, 0, dz));
                }
            }
        }

        let center = center.up(1);
        for dx in -1..=1 {
            for dz in -1..=1 {
                self.place_leaf(world, center + IVec3::new(dx, 0, dz));
            }
        }

        self.place_leaf(world, center.east(2));
        self.place_leaf(world, center.west(2));
        self.place_leaf(world, center.south(2));
        self.place_leaf(world, center.north(2));

    }

    fn place_small_canopy<W: VoxelAccess + ?Sized>(&self, world: &mut W, center: IVec3) {

        for dx in -2i32..=2 {
            for dz in -2i32..=2 {
                if dx.abs() != 2 || dz.abs() != 2 {
                    self.place_leaf(world, center + IVec3::new(dx, 0, dz));
                }
            }
        }

        let center = center.up(1);
        for dx in -1..=1 {
            for dz in -1..=1 {
                self.place_leaf(world, center + IVec3::new(dx, 0, dz));
            }
        }

    }

}

impl Default for SavannaTreeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureGenerator for SavannaTreeGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        let height = rand.next_bounded_int(3) + rand.next_bounded_int(3) + 5;

        if pos.y < 1 || pos.y + height + 1 > 256 {
            return false;
        }

        if !self.check_column(world, pos, height) {
            return false;
        }

        if !matches!(world.get_block_id(pos.down(1)), block::GRASS | block::DIRT) || pos.y >= 256 - height - 1 {
            return false;
        }

        world.place_block(pos.down(1), block::DIRT, 0);

        let dir = rand.next_bounded_int(4);
        let bend = Face::HORIZONTAL[dir as usize].delta();
        let bend_start = height - rand.next_bounded_int(4) - 1;
        let mut bend_remaining = 3 - rand.next_bounded_int(3);

        let mut trunk = pos;
        for dy in 0..height {
            if dy >= bend_start && bend_remaining > 0 {
                trunk += bend;
                bend_remaining -= 1;
            }
            trunk.y = pos.y + dy;
            world.place_block(trunk, self.config.trunk_id, self.config.trunk_meta);
        }

        self.place_canopy(world, trunk);

        let branch_dir = rand.next_bounded_int(4);
        if branch_dir != dir {

            let branch = Face::HORIZONTAL[branch_dir as usize].delta();
            let mut dy = bend_start - rand.next_bounded_int(2) - 1;
            let mut length = 1 + rand.next_bounded_int(3);

            // The branch starts back from the trunk origin.
            let mut branch_pos = pos;
            let mut branch_top = None;

            while dy < height && length > 0 {
                if dy >= 1 {
                    branch_pos += branch;
                    branch_pos.y = pos.y + dy;
                    world.place_block(branch_pos, self.config.trunk_id, self.config.trunk_meta);
                    branch_top = Some(branch_pos);
                }
                dy += 1;
                length -= 1;
            }

            if let Some(top) = branch_top {
                self.place_small_canopy(world, top);
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
    fn acacia_blocks() {
        for seed in 0..8 {
            let mut world = grass_world();
            let origin = IVec3::new(0, 64, 0);
            let mut rand = JavaRandom::new(seed);
            assert!(SavannaTreeGenerator::new().generate(&mut world, origin, &mut rand));
            assert_eq!(world.get_block(origin), (block::WOOD2, 0));
            for &(id, meta) in world.diff().values() {
                assert!(matches!((id, meta), (block::WOOD2, 0) | (block::LEAVES2, 0) | (block::DIRT, 0)));
            }
        }
    }

}
