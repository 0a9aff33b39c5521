use glam::IVec3;

use crate::block::{self, BlockSet};
use crate::geom::PosExt;
use crate::util::{Face, JavaRandom};
use crate::world::VoxelAccess;
use crate::gen::FeatureGenerator;

use super::TreeConfig;


const CAN_GROW_INTO: BlockSet = BlockSet::new(&[
    block::AIR,
    block::LEAVES,
    block::LEAVES2,
    block::LOG,
    block::WOOD2,
    block::SAPLING,
    block::VINE,
]);


/// A generator for 2x2 dark oak trees, with a trunk that may bend and a wide flat crown.
#[derive(Debug, Clone)]
pub struct DarkOakTreeGenerator {
    config: TreeConfig,
}

impl DarkOakTreeGenerator {

    #[inline]
    pub fn new() -> Self {
        Self { config: TreeConfig::DARK_OAK }
    }

    fn place_log<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3) {
        if CAN_GROW_INTO.contains(world.get_block_id(pos)) {
            world.place_block(pos, self.config.trunk_id, self.config.trunk_meta);
        }
    }

    fn place_leaf<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3) {
        if world.is_air(pos) {
            world.place_block(pos, self.config.leaf_id, self.config.leaf_meta);
        }
    }

    /// Place leaves on the four cells mirrored around the 2x2 trunk top.
    fn place_mirrored_leaves<W: VoxelAccess + ?Sized>(&self, world: &mut W, center: IVec3, dx: i32, dz: i32) {
        self.place_leaf(world, IVec3::new(center.x + dx, center.y, center.z + dz));
        self.place_leaf(world, IVec3::new(1 + center.x - dx, center.y, center.z + dz));
        self.place_leaf(world, IVec3::new(center.x + dx, center.y, 1 + center.z - dz));
        self.place_leaf(world, IVec3::new(1 + center.x - dx, center.y, 1 + center.z - dz));
    }

}

impl Default for DarkOakTreeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureGenerator for DarkOakTreeGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        let height = rand.next_bounded_int(3) + rand.next_bounded_int(2) + 6;

        if pos.y < 1 || pos.y + height + 1 >= 256 {
            return false;
        }

        let below = pos.down(1);
        if !matches!(world.get_block_id(below), block::GRASS | block::DIRT) {
            return false;
        }

        if !check_column(world, pos, height) {
            return false;
        }

        for soil_pos in [below, below.east(1), below.south(1), below.south(1).east(1)] {
            if matches!(world.get_block_id(soil_pos), block::GRASS | block::FARMLAND) {
                world.place_block(soil_pos, block::DIRT, 0);
            }
        }

        let bend = Face::HORIZONTAL[rand.next_bounded_int(4) as usize].delta();
        let bend_start = height - rand.next_bounded_int(4);
        let mut bend_remaining = 2 - rand.next_bounded_int(3);

        let mut trunk_x = pos.x;
        let mut trunk_z = pos.z;
        let top_y = pos.y + height - 1;

        for dy in 0..height {

            if dy >= bend_start && bend_remaining > 0 {
                trunk_x += bend.x;
                trunk_z += bend.z;
                bend_remaining -= 1;
            }

            let log_pos = IVec3::new(trunk_x, pos.y + dy, trunk_z);
            if matches!(world.get_block_id(log_pos), block::AIR | block::LEAVES | block::LEAVES2) {
                self.place_log(world, log_pos);
                self.place_log(world, log_pos.east(1));
                self.place_log(world, log_pos.south(1));
                self.place_log(world, log_pos.east(1).south(1));
            }

        }

        let top = IVec3::new(trunk_x, top_y, trunk_z);

        for dx in -2..=0 {
            for dz in -2..=0 {
                self.place_mirrored_leaves(world, top.down(1), dx, dz);
                if (dx > -2 || dz > -1) && (dx != -1 || dz != -2) {
                    self.place_mirrored_leaves(world, top.up(1), dx, dz);
                }
            }
        }

        if rand.next_boolean() {
            let cap = top.up(2);
            self.place_leaf(world, cap);
            self.place_leaf(world, cap.east(1));
            self.place_leaf(world, cap.east(1).south(1));
            self.place_leaf(world, cap.south(1));
        }

        for dx in -3i32..=4 {
            for dz in -3i32..=4 {
                let corner = (dx == -3 || dx == 4) && (dz == -3 || dz == 4);
                if !corner && (dx.abs() < 3 || dz.abs() < 3) {
                    self.place_leaf(world, top + IVec3::new(dx, 0, dz));
                }
            }
        }

        for dx in -1..=2 {
            for dz in -1..=2 {

                let outside = dx < 0 || dx > 1 || dz < 0 || dz > 1;
                if !outside || rand.next_bounded_int(3) > 0 {
                    continue;
                }

                // PARITY: Hanging logs are relative to the origin, not to the bent trunk.
                let length = rand.next_bounded_int(3) + 2;
                for i in 0..length {
                    self.place_log(world, IVec3::new(pos.x + dx, top_y - i - 1, pos.z + dz));
                }

                let center = top + IVec3::new(dx, 0, dz);
                for lx in -1..=1 {
                    for lz in -1..=1 {
                        self.place_leaf(world, center + IVec3::new(lx, 0, lz));
                    }
                }

                for lx in -2i32..=2 {
                    for lz in -2i32..=2 {
                        if lx.abs() != 2 || lz.abs() != 2 {
                            self.place_leaf(world, center + IVec3::new(lx, -1, lz));
                        }
                    }
                }

            }
        }

        true

    }

}

/// The column check radius is 0 at the base, 1 along the trunk and 2 for the top three
/// layers, all blocks must be ones a tree can grow into.
fn check_column<W: VoxelAccess + ?Sized>(world: &W, pos: IVec3, height: i32) -> bool {
    for dy in 0..=height + 1 {
        let radius = if dy >= height - 1 {
            2
        } else if dy == 0 {
            0
        } else {
            1
        };
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                if !CAN_GROW_INTO.contains(world.get_block_id(pos + IVec3::new(dx, dy, dz))) {
                    return false;
                }
            }
        }
    }
    true
}
