//! Jungle trees, small and mega, and the jungle floor bush.

use glam::IVec3;

use crate::block::{self, BlockSet};
use crate::geom::PosExt;
use crate::util::math::JAVA_PI;
use crate::util::{Face, JavaRandom};
use crate::world::VoxelAccess;
use crate::gen::FeatureGenerator;

use super::{TreeConfig, find_ground};


/// Vine metadata for the hanging direction drawn under jungle leaves.
const HANGING_VINE_META: [u8; 4] = [1, 2, 4, 8];

const SMALL_JUNGLE_SOILS: BlockSet = BlockSet::new(&[block::GRASS, block::DIRT, block::SAND]);

const MEGA_CAN_GROW_INTO: BlockSet = BlockSet::new(&[block::AIR, block::LEAVES, block::SAPLING, block::VINE]);


/// Place a vine with 2 in 3 chance if the position is air, the draw happens first.
fn try_place_vine<W: VoxelAccess + ?Sized>(world: &mut W, rand: &mut JavaRandom, pos: IVec3, face: Face) {
    if rand.next_bounded_int(3) > 0 && world.is_air(pos) {
        world.place_block(pos, block::VINE, face.vine_meta());
    }
}


/// A generator for small jungle trees, with vines along the trunk and below leaves.
#[derive(Debug, Clone)]
pub struct JungleTreeGenerator {
    config: TreeConfig,
    vines: bool,
}

impl JungleTreeGenerator {

    #[inline]
    pub fn new() -> Self {
        Self { config: TreeConfig::JUNGLE, vines: true }
    }

    /// Same tree without any vine, this doesn't consume vine draws.
    #[inline]
    pub fn new_without_vines() -> Self {
        Self { config: TreeConfig::JUNGLE, vines: false }
    }

    fn grow_vine_below<W: VoxelAccess + ?Sized>(&self, world: &mut W, rand: &mut JavaRandom, pos: IVec3) {

        if rand.next_bounded_int(4) != 0 {
            return;
        }

        let meta = HANGING_VINE_META[rand.next_bounded_int(4) as usize];
        let length = rand.next_bounded_int(4) + 1;

        let mut y = pos.y - 1;
        while y >= pos.y - length && y > 0 {
            let vine_pos = IVec3::new(pos.x, y, pos.z);
            if !world.is_air(vine_pos) {
                break;
            }
            world.place_block(vine_pos, block::VINE, meta);
            y -= 1;
        }

    }

}

impl Default for JungleTreeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureGenerator for JungleTreeGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        let height = 4 + rand.next_bounded_int(7);

        let Some(ground_y) = find_ground(world, pos, &SMALL_JUNGLE_SOILS) else {
            return false;
        };

        if ground_y > 127 - height {
            return false;
        }

        let base = IVec3::new(pos.x, ground_y, pos.z);
        // Sand is found as ground but doesn't grow anything.
        if !matches!(world.get_block_id(base.down(1)), block::GRASS | block::DIRT) {
            return false;
        }

        world.place_block(base.down(1), block::DIRT, 0);

        for dy in 0..height {
            let trunk_pos = base.up(dy);
            world.place_block(trunk_pos, self.config.trunk_id, self.config.trunk_meta);
            if self.vines && dy > 0 {
                try_place_vine(world, rand, trunk_pos.west(1), Face::NegX);
                try_place_vine(world, rand, trunk_pos.east(1), Face::PosX);
                try_place_vine(world, rand, trunk_pos.north(1), Face::NegZ);
                try_place_vine(world, rand, trunk_pos.south(1), Face::PosZ);
            }
        }

        let top = ground_y + height;
        for y in top - 3..=top {
            let dy = y - top;
            let radius = 1 - dy / 2;
            for dx in -radius..=radius {
                for dz in -radius..=radius {

                    if dx.abs() == radius && dz.abs() == radius && (dy == 0 || rand.next_bounded_int(2) == 0) {
                        continue;
                    }

                    let leaf_pos = IVec3::new(pos.x + dx, y, pos.z + dz);
                    if world.is_air(leaf_pos) {
                        world.place_block(leaf_pos, self.config.leaf_id, self.config.leaf_meta);
                        if self.vines && dy < 0 {
                            self.grow_vine_below(world, rand, leaf_pos);
                        }
                    }

                }
            }
        }

        true

    }

}


/// A generator for huge 2x2 jungle trees, with side branches and vines all along the
/// trunk.
#[derive(Debug, Clone)]
pub struct MegaJungleTreeGenerator {
    config: TreeConfig,
    base_height: i32,
}

impl MegaJungleTreeGenerator {

    #[inline]
    pub fn new() -> Self {
        Self { config: TreeConfig::JUNGLE, base_height: 10 }
    }

    fn place_leaf<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3) {
        if matches!(world.get_block_id(pos), block::AIR | block::LEAVES) {
            world.place_block(pos, self.config.leaf_id, self.config.leaf_meta);
        }
    }

    /// Square layer of leaves without its corners.
    fn place_leaf_layer<W: VoxelAccess + ?Sized>(&self, world: &mut W, center: IVec3, radius: i32) {
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                if dx.abs() != radius || dz.abs() != radius {
                    self.place_leaf(world, center + IVec3::new(dx, 0, dz));
                }
            }
        }
    }

    /// Disc layer of leaves.
    fn place_leaf_disc<W: VoxelAccess + ?Sized>(&self, world: &mut W, center: IVec3, radius: i32) {
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                if dx * dx + dz * dz <= radius * radius {
                    self.place_leaf(world, center + IVec3::new(dx, 0, dz));
                }
            }
        }
    }

    fn place_log<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3) -> bool {
        if MEGA_CAN_GROW_INTO.contains(world.get_block_id(pos)) {
            world.place_block(pos, self.config.trunk_id, self.config.trunk_meta);
            true
        } else {
            false
        }
    }

}

impl Default for MegaJungleTreeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureGenerator for MegaJungleTreeGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        let height = rand.next_bounded_int(20) + self.base_height;

        if pos.y < 1 || pos.y + height + 1 > 256 {
            return false;
        }

        let below = pos.down(1);
        let soils = [below, below.east(1), below.south(1), below.east(1).south(1)];
        if !soils.iter().all(|&soil_pos| matches!(world.get_block_id(soil_pos), block::GRASS | block::DIRT)) {
            return false;
        }

        for soil_pos in soils {
            world.place_block(soil_pos, block::DIRT, 0);
        }

        let crown = pos.up(height);
        for dy in -2..=0 {
            self.place_leaf_disc(world, crown.up(dy), 3 + dy);
        }

        let mut branch_y = height - 2 - rand.next_bounded_int(4);
        while branch_y > height / 2 {

            let angle = rand.next_float() as f64 * JAVA_PI * 2.0;
            let (sin, cos) = angle.sin_cos();

            let mut end = pos;
            for i in 0..5 {
                end = IVec3::new(
                    pos.x + (1.5 + cos * i as f64) as i32,
                    pos.y + branch_y - 3 + i / 2,
                    pos.z + (1.5 + sin * i as f64) as i32,
                );
                world.place_block(end, self.config.trunk_id, self.config.trunk_meta);
            }

            let layers = 1 + rand.next_bounded_int(2);
            for y in branch_y - layers..=branch_y {
                let center = IVec3::new(end.x, pos.y + y, end.z);
                self.place_leaf_layer(world, center, 1 - (y - branch_y));
            }

            branch_y -= 2 + rand.next_bounded_int(4);

        }

        for dy in 0..height {

            let trunk_pos = pos.up(dy);
            if self.place_log(world, trunk_pos) && dy > 0 {
                try_place_vine(world, rand, trunk_pos.west(1), Face::NegX);
                try_place_vine(world, rand, trunk_pos.north(1), Face::NegZ);
            }

            if dy < height - 1 {

                let east = trunk_pos.east(1);
                if self.place_log(world, east) && dy > 0 {
                    try_place_vine(world, rand, east.east(1), Face::PosX);
                    try_place_vine(world, rand, east.north(1), Face::NegZ);
                }

                let south_east = trunk_pos.south(1).east(1);
                if self.place_log(world, south_east) && dy > 0 {
                    try_place_vine(world, rand, south_east.east(1), Face::PosX);
                    try_place_vine(world, rand, south_east.south(1), Face::PosZ);
                }

                let south = trunk_pos.south(1);
                if self.place_log(world, south) && dy > 0 {
                    try_place_vine(world, rand, south.west(1), Face::NegX);
                    try_place_vine(world, rand, south.south(1), Face::PosZ);
                }

            }

        }

        true

    }

}


/// A generator for small bushes made of a single log covered by a leaf mound.
#[derive(Debug, Clone)]
pub struct JungleBushGenerator {
    log_id: u8,
    log_meta: u8,
    leaf_id: u8,
    leaf_meta: u8,
}

impl JungleBushGenerator {

    #[inline]
    pub fn new(log_id: u8, log_meta: u8, leaf_id: u8, leaf_meta: u8) -> Self {
        Self { log_id, log_meta, leaf_id, leaf_meta }
    }

    /// The jungle floor bush, a jungle log with oak leaves.
    #[inline]
    pub fn new_jungle() -> Self {
        Self::new(block::LOG, 3, block::LEAVES, 0)
    }

}

impl FeatureGenerator for JungleBushGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        let mut y = pos.y;
        while y > 0 && world.is_air(IVec3::new(pos.x, y, pos.z)) {
            y -= 1;
        }
        y += 1;

        let base = IVec3::new(pos.x, y, pos.z);
        if !matches!(world.get_block_id(base.down(1)), block::GRASS | block::DIRT) {
            return false;
        }

        world.place_block(base.down(1), block::DIRT, 0);
        world.place_block(base, self.log_id, self.log_meta);

        for dy in 0i32..=2 {
            let radius = 2 - dy;
            for dx in -radius..=radius {
                for dz in -radius..=radius {
                    if dx.abs() != radius || dz.abs() != radius || rand.next_bounded_int(2) != 0 {
                        let leaf_pos = base + IVec3::new(dx, dy, dz);
                        if matches!(world.get_block_id(leaf_pos), block::AIR | block::LEAVES) {
                            world.place_block(leaf_pos, self.leaf_id, self.leaf_meta);
                        }
                    }
                }
            }
        }

        true

    }

}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::gen::testutil::{grass_world, count_blocks};
    use crate::world::{ChunkedWorld, RecordingWorld};

    #[test]
    fn small_jungle_finds_ground() {
        let mut world = grass_world();
        let mut rand = JavaRandom::new(3);
        // Start well above the ground, the tree drops to the surface.
        assert!(JungleTreeGenerator::new().generate(&mut world, IVec3::new(0, 90, 0), &mut rand));
        assert_eq!(world.get_block(IVec3::new(0, 64, 0)), (block::LOG, 3));
        assert_eq!(world.get_block_id(IVec3::new(0, 63, 0)), block::DIRT);
    }

    #[test]
    fn small_jungle_on_sand() {
        let mut world = grass_world();
        world.place_block(IVec3::new(0, 63, 0), block::SAND, 0);
        world.clear();
        let mut rand = JavaRandom::new(3);
        assert!(!JungleTreeGenerator::new().generate(&mut world, IVec3::new(0, 64, 0), &mut rand));
        assert!(world.writes().is_empty());
    }

    #[test]
    fn small_jungle_too_high() {
        // Ground at 125 leaves no room under the 127 limit.
        let mut world = RecordingWorld::new(ChunkedWorld::with_layers(0, &[
            (block::STONE, 0, 124),
            (block::GRASS, 0, 1),
        ]));
        let mut rand = JavaRandom::new(3);
        assert!(!JungleTreeGenerator::new().generate(&mut world, IVec3::new(0, 126, 0), &mut rand));
    }

    #[test]
    fn mega_jungle_trunk() {
        let mut world = grass_world();
        let origin = IVec3::new(8, 64, 8);
        let mut rand = JavaRandom::new(11);
        assert!(MegaJungleTreeGenerator::new().generate(&mut world, origin, &mut rand));
        for pos in [origin, origin.east(1), origin.south(1), origin.east(1).south(1)] {
            assert_eq!(world.get_block(pos), (block::LOG, 3));
        }
        assert!(count_blocks(&world, origin.up(8), 8, block::VINE) > 0);
    }

    #[test]
    fn bush_drops_to_ground() {
        let mut world = grass_world();
        let mut rand = JavaRandom::new(0);
        assert!(JungleBushGenerator::new_jungle().generate(&mut world, IVec3::new(0, 80, 0), &mut rand));
        assert_eq!(world.get_block(IVec3::new(0, 64, 0)), (block::LOG, 3));
        assert_eq!(world.get_block(IVec3::new(0, 65, 0)), (block::LEAVES, 0));
        assert_eq!(world.get_block_id(IVec3::new(0, 63, 0)), block::DIRT);
    }

}
