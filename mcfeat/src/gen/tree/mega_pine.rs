use glam::IVec3;

use crate::block::{self, BlockSet};
use crate::util::JavaRandom;
use crate::world::VoxelAccess;
use crate::gen::FeatureGenerator;

use super::{TreeConfig, find_ground};


const MEGA_PINE_SOILS: BlockSet = BlockSet::new(&[block::GRASS, block::DIRT, block::PODZOL]);

/// Dirt metadata of the podzol variant.
const PODZOL_DIRT_META: u8 = 2;


/// A generator for huge 2x2 pine trees of the mega taiga, optionally spreading podzol
/// around their base.
#[derive(Debug, Clone)]
pub struct MegaPineTreeGenerator {
    config: TreeConfig,
    podzol: bool,
}

impl MegaPineTreeGenerator {

    #[inline]
    pub fn new(podzol: bool) -> Self {
        Self { config: TreeConfig::SPRUCE, podzol }
    }

    fn place_podzol<W: VoxelAccess + ?Sized>(&self, world: &mut W, rand: &mut JavaRandom, base: IVec3) {
        let radius = 2 + rand.next_bounded_int(2);
        for dx in -radius..=1 + radius {
            for dz in -radius..=1 + radius {
                if dx * dx + dz * dz > (radius + 1) * (radius + 1) {
                    continue;
                }
                let soil_pos = IVec3::new(base.x + dx, base.y - 1, base.z + dz);
                if matches!(world.get_block_id(soil_pos), block::GRASS | block::DIRT) {
                    world.place_block(soil_pos, block::DIRT, PODZOL_DIRT_META);
                }
            }
        }
    }

}

impl FeatureGenerator for MegaPineTreeGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        let Some(ground_y) = find_ground(world, pos, &MEGA_PINE_SOILS) else {
            return false;
        };

        if ground_y > 110 {
            return false;
        }

        let base = IVec3::new(pos.x, ground_y, pos.z);
        for dx in 0..=1 {
            for dz in 0..=1 {
                if !MEGA_PINE_SOILS.contains(world.get_block_id(base + IVec3::new(dx, -1, dz))) {
                    return false;
                }
            }
        }

        let height = 13 + rand.next_bounded_int(15);

        if self.podzol {
            self.place_podzol(world, rand, base);
        }

        for dy in 0..height {
            for dx in 0..=1 {
                for dz in 0..=1 {
                    world.place_block(base + IVec3::new(dx, dy, dz), self.config.trunk_id, self.config.trunk_meta);
                }
            }
        }

        let top = ground_y + height;
        let leaf_start = top - rand.next_bounded_int(3) - 3;

        for y in (leaf_start..=top).rev() {

            let from_top = top - y;
            let radius = if from_top < 2 {
                0
            } else if from_top < 6 {
                1 + from_top / 2
            } else {
                2 + rand.next_bounded_int(2)
            };

            for x in pos.x - radius..=pos.x + 1 + radius {
                for z in pos.z - radius..=pos.z + 1 + radius {
                    // Distance from the north west trunk column.
                    if (x - pos.x).abs() + (z - pos.z).abs() > radius + 2 {
                        continue;
                    }
                    let leaf_pos = IVec3::new(x, y, z);
                    if matches!(world.get_block_id(leaf_pos), block::AIR | block::LEAVES) {
                        world.place_block(leaf_pos, self.config.leaf_id, self.config.leaf_meta);
                    }
                }
            }

        }

        true

    }

}
