use glam::IVec3;

use crate::block::{self, material};
use crate::chunk::is_valid_y;
use crate::geom::PosExt;
use crate::util::{Face, JavaRandom};
use crate::world::VoxelAccess;
use crate::gen::FeatureGenerator;

use super::TreeConfig;


/// Faces where vines may hang from a leaf block, in draw order.
const VINE_FACES: [Face; 4] = [Face::NegX, Face::PosX, Face::NegZ, Face::PosZ];


/// A generator for swamp oaks, they can root under shallow water and carry vines.
#[derive(Debug, Clone)]
pub struct SwampTreeGenerator {
    config: TreeConfig,
}

impl SwampTreeGenerator {
    #[inline]
    pub fn new() -> Self {
        Self { config: TreeConfig::OAK }
    }
}

impl Default for SwampTreeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureGenerator for SwampTreeGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, mut pos: IVec3, rand: &mut JavaRandom) -> bool {

        let height = rand.next_bounded_int(4) + 5;

        while material::is_water(world.get_block_id(pos.down(1))) {
            pos = pos.down(1);
        }

        if pos.y < 1 || pos.y + height + 1 > 256 {
            return false;
        }

        if !check_column(world, pos, height) {
            return false;
        }

        if !matches!(world.get_block_id(pos.down(1)), block::GRASS | block::DIRT) || pos.y >= 256 - height - 1 {
            return false;
        }

        world.place_block(pos.down(1), block::DIRT, 0);

        let top = pos.y + height;

        for y in top - 3..=top {
            let dy = y - top;
            let radius = 2 - dy / 2;
            for dx in -radius..=radius {
                for dz in -radius..=radius {
                    if dx.abs() != radius || dz.abs() != radius || (rand.next_bounded_int(2) != 0 && dy != 0) {
                        world.place_block(IVec3::new(pos.x + dx, y, pos.z + dz), self.config.leaf_id, self.config.leaf_meta);
                    }
                }
            }
        }

        for dy in 0..height {
            let trunk_pos = pos.up(dy);
            let id = world.get_block_id(trunk_pos);
            if id == block::AIR || id == block::LEAVES || material::is_water(id) {
                world.place_block(trunk_pos, self.config.trunk_id, self.config.trunk_meta);
            }
        }

        for y in top - 3..=top {
            let radius = 2 - (y - top) / 2;
            for x in pos.x - radius..=pos.x + radius {
                for z in pos.z - radius..=pos.z + radius {
                    let leaf_pos = IVec3::new(x, y, z);
                    if !world.is_block(leaf_pos, block::LEAVES) {
                        continue;
                    }
                    for face in VINE_FACES {
                        let vine_pos = leaf_pos.offset(face, 1);
                        if rand.next_bounded_int(4) == 0 && world.is_air(vine_pos) {
                            hang_vine(world, vine_pos, face.vine_meta());
                        }
                    }
                }
            }
        }

        true

    }

}

/// Column check of swamp trees, water is only accepted on the base layer.
fn check_column<W: VoxelAccess + ?Sized>(world: &W, pos: IVec3, height: i32) -> bool {

    for y in pos.y..=pos.y + 1 + height {

        let radius = if y >= pos.y + 1 + height - 2 {
            3
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
                let id = world.get_block_id(IVec3::new(x, y, z));
                if id == block::AIR || id == block::LEAVES {
                    continue;
                }
                if !material::is_water(id) || y > pos.y {
                    return false;
                }
            }
        }

    }

    true

}

/// Place a vine and extend it down by up to 4 blocks while there is air.
fn hang_vine<W: VoxelAccess + ?Sized>(world: &mut W, mut pos: IVec3, meta: u8) {
    world.place_block(pos, block::VINE, meta);
    for _ in 0..4 {
        pos = pos.down(1);
        if !world.is_air(pos) {
            break;
        }
        world.place_block(pos, block::VINE, meta);
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::gen::testutil::{grass_world, count_blocks};

    #[test]
    fn roots_under_water() {

        let mut world = grass_world();
        let origin = IVec3::new(0, 64, 0);
        // A single water block on top of the grass.
        world.place_block(origin.down(1), block::STILL_WATER, 0);
        world.place_block(origin.down(2), block::GRASS, 0);

        let grown = (0..16).any(|seed| {
            let mut rand = JavaRandom::new(seed);
            SwampTreeGenerator::new().generate(&mut world, origin, &mut rand)
        });

        assert!(grown);
        assert_eq!(world.get_block_id(origin.down(2)), block::DIRT);
        assert_eq!(world.get_block(origin.down(1)), (block::LOG, 0));

    }

    #[test]
    fn vines_hang_from_leaves() {
        let mut total = 0;
        for seed in 0..8 {
            let mut world = grass_world();
            let origin = IVec3::new(0, 64, 0);
            let mut rand = JavaRandom::new(seed);
            assert!(SwampTreeGenerator::new().generate(&mut world, origin, &mut rand));
            total += count_blocks(&world, origin.up(6), 6, block::VINE);
            for (&pos, &(id, meta)) in world.diff() {
                if id == block::VINE {
                    assert!(matches!(meta, 1 | 2 | 4 | 8), "vine at {pos} has meta {meta}");
                }
            }
        }
        assert!(total > 0);
    }

}
