//! Conifer trees of the taiga.

use glam::IVec3;

use crate::block::{self, BlockSet};
use crate::geom::PosExt;
use crate::util::JavaRandom;
use crate::world::VoxelAccess;
use crate::gen::FeatureGenerator;

use super::{TreeConfig, place_trunk};


/// Blocks replaced by conifer leaves and pine logs.
const CONIFER_REPLACEABLE: BlockSet = BlockSet::new(&[block::AIR, block::LEAVES, block::SNOW_LAYER]);


/// Place a square layer of leaves with its corners cut when the radius is positive.
fn place_conifer_layer<W: VoxelAccess + ?Sized>(world: &mut W, center: IVec3, radius: i32, config: &TreeConfig) {
    for dx in -radius..=radius {
        for dz in -radius..=radius {
            if dx.abs() == radius && dz.abs() == radius && radius > 0 {
                continue;
            }
            let pos = center + IVec3::new(dx, 0, dz);
            if CONIFER_REPLACEABLE.contains(world.get_block_id(pos)) {
                world.place_block(pos, config.leaf_id, config.leaf_meta);
            }
        }
    }
}


/// A generator for tall pine trees with a short crown.
#[derive(Debug, Clone)]
pub struct PineTreeGenerator {
    config: TreeConfig,
}

impl PineTreeGenerator {
    #[inline]
    pub fn new() -> Self {
        Self { config: TreeConfig::SPRUCE }
    }
}

impl Default for PineTreeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureGenerator for PineTreeGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        let height = rand.next_bounded_int(5) + 7;
        let foliage_start = height - rand.next_bounded_int(2) - 3;

        if pos.y < 1 || pos.y + height + 1 > 256 {
            return false;
        }

        let soil = world.get_block_id(pos.down(1));
        if !matches!(soil, block::GRASS | block::DIRT | block::FARMLAND | block::PODZOL) {
            return false;
        }

        if soil == block::GRASS {
            world.place_block(pos.down(1), block::DIRT, 0);
        }

        let foliage_y = pos.y + foliage_start;
        let mut radius = 0;

        for y in (foliage_y..=pos.y + height).rev() {

            place_conifer_layer(world, IVec3::new(pos.x, y, pos.z), radius, &self.config);

            if radius >= 1 && y == foliage_y + 1 {
                radius -= 1;
            } else if radius < 2 {
                radius += 1;
            }

        }

        // PARITY: The trunk bound is drawn again at each iteration.
        let mut dy = 0;
        while dy < height - rand.next_bounded_int(3) {
            let trunk_pos = pos.up(dy);
            if CONIFER_REPLACEABLE.contains(world.get_block_id(trunk_pos)) {
                world.place_block(trunk_pos, self.config.trunk_id, self.config.trunk_meta);
            }
            dy += 1;
        }

        true

    }

}


/// A generator for spruce trees, a cone of leaf rings of alternating radius.
#[derive(Debug, Clone)]
pub struct SpruceTreeGenerator {
    config: TreeConfig,
}

impl SpruceTreeGenerator {
    #[inline]
    pub fn new() -> Self {
        Self { config: TreeConfig::SPRUCE }
    }
}

impl Default for SpruceTreeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureGenerator for SpruceTreeGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        if !matches!(world.get_block_id(pos.down(1)), block::GRASS | block::DIRT | block::PODZOL) {
            return false;
        }

        let height = rand.next_bounded_int(4) + 6;
        let top_size = height - (1 + rand.next_bounded_int(2));
        let leaves_radius = 2 + rand.next_bounded_int(2);

        let trunk_height = height - rand.next_bounded_int(3);
        place_trunk(world, pos, &self.config, trunk_height);

        let mut radius = rand.next_bounded_int(2);
        let mut max_radius = 1;
        let mut min_radius = 0;

        for dy in 0..=top_size {

            place_conifer_layer(world, pos.up(height - dy), radius, &self.config);

            if radius >= max_radius {
                radius = min_radius;
                min_radius = 1;
                max_radius = (max_radius + 1).min(leaves_radius);
            } else {
                radius += 1;
            }

        }

        true

    }

}
