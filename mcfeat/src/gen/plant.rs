//! Plants feature generation.
//!
//! All these placers run a fixed number of independent trials around the origin, a
//! failed trial never prevents the following ones.

use glam::IVec3;

use crate::block::plant::{PlantType, double_plant};
use crate::block::{self, BlockSet, material};
use crate::chunk::is_valid_y;
use crate::geom::PosExt;
use crate::util::{Face, JavaRandom};
use crate::world::VoxelAccess;

use super::{FeatureGenerator, scatter};


const BUSH_SOILS: BlockSet = BlockSet::new(&[block::GRASS, block::DIRT, block::FARMLAND]);
const DEAD_BUSH_SOILS: BlockSet = BlockSet::new(&[block::SAND, block::DIRT, block::HARDENED_CLAY, block::STAINED_CLAY]);
const CACTUS_SOILS: BlockSet = BlockSet::new(&[block::SAND, block::CACTUS]);
const SUGAR_CANES_SOILS: BlockSet = BlockSet::new(&[block::GRASS, block::DIRT, block::SAND]);

/// Blocks that don't hold a vine.
const VINE_UNSUPPORTED: BlockSet = BlockSet::new(&[block::AIR, block::VINE, block::TALL_GRASS, block::DEAD_BUSH]);


/// A generator for flower, mushroom and other single block plant patches.
#[derive(Debug, Clone)]
pub struct BushGenerator {
    plant: PlantType,
}

impl BushGenerator {

    #[inline]
    pub fn new(plant: PlantType) -> Self {
        Self { plant }
    }

    #[inline]
    pub fn new_flower(meta: u8) -> Self {
        Self::new(PlantType::flower(meta))
    }

    #[inline]
    pub fn new_dandelion() -> Self {
        Self::new(PlantType::dandelion())
    }

    #[inline]
    pub fn plant(&self) -> PlantType {
        self.plant
    }

}

impl FeatureGenerator for BushGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        for _ in 0..64 {

            let place_pos = scatter(pos, rand, 8, 4);
            if !is_valid_y(place_pos.y) {
                continue;
            }

            if world.is_air(place_pos) && BUSH_SOILS.contains(world.get_block_id(place_pos.down(1))) {
                world.place_block(place_pos, self.plant.id(), self.plant.meta());
            }

        }

        true

    }

}


/// A generator for dead bushes.
#[derive(Debug, Clone, Default)]
pub struct DeadBushGenerator(());

impl DeadBushGenerator {
    #[inline]
    pub fn new() -> Self {
        Self(())
    }
}

impl FeatureGenerator for DeadBushGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        for _ in 0..4 {

            let place_pos = scatter(pos, rand, 8, 4);
            if !is_valid_y(place_pos.y) {
                continue;
            }

            if world.is_air(place_pos) && DEAD_BUSH_SOILS.contains(world.get_block_id(place_pos.down(1))) {
                world.place_block(place_pos, block::DEAD_BUSH, 0);
            }

        }

        true

    }

}


/// A generator for tall grass and ferns.
#[derive(Debug, Clone)]
pub struct TallGrassGenerator {
    metadata: u8,
}

impl TallGrassGenerator {

    #[inline]
    pub fn new(metadata: u8) -> Self {
        Self { metadata: metadata & 0xF }
    }

    #[inline]
    pub fn new_grass() -> Self {
        Self::new(1)
    }

    #[inline]
    pub fn new_fern() -> Self {
        Self::new(2)
    }

}

impl FeatureGenerator for TallGrassGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        for _ in 0..128 {

            let place_pos = scatter(pos, rand, 8, 4);
            if !is_valid_y(place_pos.y) {
                continue;
            }

            if world.is_air(place_pos) && material::is_grass_or_dirt(world.get_block_id(place_pos.down(1))) {
                world.place_block(place_pos, block::TALL_GRASS, self.metadata);
            }

        }

        true

    }

}


/// A generator for sugar canes.
#[derive(Debug, Clone, Default)]
pub struct SugarCanesGenerator(());

impl SugarCanesGenerator {
    #[inline]
    pub fn new() -> Self {
        Self(())
    }
}

impl FeatureGenerator for SugarCanesGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        for _ in 0..20 {

            // Canes only spread horizontally.
            let place_pos = pos + IVec3 {
                x: rand.next_bounded_int(4) - rand.next_bounded_int(4),
                y: 0,
                z: rand.next_bounded_int(4) - rand.next_bounded_int(4),
            };

            if !is_valid_y(place_pos.y) {
                continue;
            }

            let ground_pos = place_pos.down(1);
            if !world.is_air(place_pos) || !SUGAR_CANES_SOILS.contains(world.get_block_id(ground_pos)) {
                continue;
            }

            let near_water = [Face::NegX, Face::PosX, Face::NegZ, Face::PosZ].into_iter()
                .any(|face| material::is_water(world.get_block_id(ground_pos.offset(face, 1))));

            if near_water {
                let v = rand.next_bounded_int(3) + 1;
                let height = rand.next_bounded_int(v) + 2;
                for dy in 0..height {
                    let cane_pos = place_pos.up(dy);
                    if world.is_air(cane_pos) {
                        world.place_block(cane_pos, block::SUGAR_CANES, 0);
                    }
                }
            }

        }

        true

    }

}


/// A generator for pumpkins, randomly oriented.
#[derive(Debug, Clone, Default)]
pub struct PumpkinGenerator(());

impl PumpkinGenerator {
    #[inline]
    pub fn new() -> Self {
        Self(())
    }
}

impl FeatureGenerator for PumpkinGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        for _ in 0..64 {

            let place_pos = scatter(pos, rand, 8, 4);
            if !is_valid_y(place_pos.y) {
                continue;
            }

            if world.is_air(place_pos) && world.is_block(place_pos.down(1), block::GRASS) {
                world.place_block(place_pos, block::PUMPKIN, rand.next_bounded_int(4) as u8);
            }

        }

        true

    }

}


/// A generator for cactus.
#[derive(Debug, Clone, Default)]
pub struct CactusGenerator(());

impl CactusGenerator {
    #[inline]
    pub fn new() -> Self {
        Self(())
    }
}

impl FeatureGenerator for CactusGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        for _ in 0..10 {

            let place_pos = scatter(pos, rand, 8, 4);
            if !is_valid_y(place_pos.y) {
                continue;
            }

            if world.is_air(place_pos) && CACTUS_SOILS.contains(world.get_block_id(place_pos.down(1))) {
                let v = rand.next_bounded_int(3) + 1;
                let height = rand.next_bounded_int(v) + 1;
                for dy in 0..height {
                    let cactus_pos = place_pos.up(dy);
                    if world.is_air(cactus_pos) {
                        world.place_block(cactus_pos, block::CACTUS, 0);
                    }
                }
            }

        }

        true

    }

}


/// A generator for vines attached to any supporting block around air.
#[derive(Debug, Clone, Default)]
pub struct VinesGenerator(());

impl VinesGenerator {
    #[inline]
    pub fn new() -> Self {
        Self(())
    }
}

impl FeatureGenerator for VinesGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        for _ in 0..64 {

            let place_pos = scatter(pos, rand, 8, 4);
            if !is_valid_y(place_pos.y) || !world.is_air(place_pos) {
                continue;
            }

            let meta = Face::HORIZONTAL.into_iter()
                .filter(|&face| !VINE_UNSUPPORTED.contains(world.get_block_id(place_pos.offset(face, 1))))
                .fold(0, |meta, face| meta | face.vine_meta());

            if meta != 0 {
                world.place_block(place_pos, block::VINE, meta);
            }

        }

        true

    }

}


/// A generator for lily pads on water.
#[derive(Debug, Clone, Default)]
pub struct WaterlilyGenerator(());

impl WaterlilyGenerator {
    #[inline]
    pub fn new() -> Self {
        Self(())
    }
}

impl FeatureGenerator for WaterlilyGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        for _ in 0..10 {

            let place_pos = scatter(pos, rand, 8, 4);
            if !is_valid_y(place_pos.y) {
                continue;
            }

            if world.is_air(place_pos) && material::is_water(world.get_block_id(place_pos.down(1))) {
                world.place_block(place_pos, block::WATER_LILY, 0);
            }

        }

        true

    }

}


/// A generator for two blocks tall plants, only this placer reports whether at least
/// one trial succeeded.
#[derive(Debug, Clone)]
pub struct DoublePlantGenerator {
    variant: u8,
}

impl DoublePlantGenerator {

    /// Create a generator for the given variant, see [`double_plant`].
    #[inline]
    pub fn new(variant: u8) -> Self {
        Self { variant: variant & 0x7 }
    }

    #[inline]
    pub fn variant(&self) -> u8 {
        self.variant
    }

}

impl FeatureGenerator for DoublePlantGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        let mut placed = false;

        for _ in 0..64 {

            let place_pos = scatter(pos, rand, 8, 4);
            // The upper half must fit below the build limit.
            if place_pos.y < 0 || place_pos.y >= 254 {
                continue;
            }

            if world.is_air(place_pos)
            && world.is_air(place_pos.up(1))
            && BUSH_SOILS.contains(world.get_block_id(place_pos.down(1))) {
                world.place_block(place_pos, block::DOUBLE_PLANT, self.variant);
                world.place_block(place_pos.up(1), block::DOUBLE_PLANT, double_plant::UPPER_BIT | self.variant);
                placed = true;
            }

        }

        placed

    }

}


/// A generator for patches of blocks with a random orientation on grass, such as melons.
#[derive(Debug, Clone)]
pub struct BlockPatchGenerator {
    block_id: u8,
}

impl BlockPatchGenerator {

    #[inline]
    pub fn new(block_id: u8) -> Self {
        Self { block_id }
    }

}

impl FeatureGenerator for BlockPatchGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        for _ in 0..64 {

            let place_pos = scatter(pos, rand, 8, 4);
            if !is_valid_y(place_pos.y) {
                continue;
            }

            if world.is_air(place_pos) && world.is_block(place_pos.down(1), block::GRASS) {
                // PARITY: The block is first placed unoriented then set again.
                world.place_block(place_pos, self.block_id, 0);
                let meta = rand.next_bounded_int(4) as u8;
                world.place_block(place_pos, self.block_id, meta);
            }

        }

        true

    }

}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::block::plant::flower;
    use crate::gen::testutil::grass_world;
    use crate::world::{ChunkedWorld, RecordingWorld};

    const ORIGIN: IVec3 = IVec3::new(8, 64, 8);

    fn sand_world() -> RecordingWorld<ChunkedWorld> {
        RecordingWorld::new(ChunkedWorld::with_layers(0, &[
            (block::STONE, 0, 60),
            (block::SAND, 0, 4),
        ]))
    }

    /// Check that every write is the given block on the surface at Y 64.
    fn assert_surface(world: &RecordingWorld<ChunkedWorld>, id: u8) -> usize {
        for write in world.writes() {
            assert_eq!(write.id, id);
            assert_eq!(write.pos.y, 64, "{write:?}");
            assert!((write.pos - ORIGIN).abs().max_element() <= 7);
        }
        world.writes().len()
    }

    #[test]
    fn flowers_on_grass() {
        let mut world = grass_world();
        let mut rand = JavaRandom::new(0);
        assert!(BushGenerator::new_flower(flower::ALLIUM).generate(&mut world, ORIGIN, &mut rand));
        assert!(assert_surface(&world, block::RED_FLOWER) > 0);
        assert!(world.writes().iter().all(|w| w.metadata == flower::ALLIUM));
    }

    #[test]
    fn bush_trial_count() {
        // One trial is 6 draws, none are drawn on success.
        let mut world = grass_world();
        let mut rand = JavaRandom::new(7);
        BushGenerator::new_dandelion().generate(&mut world, ORIGIN, &mut rand);
        let mut expected = JavaRandom::new(7);
        for _ in 0..64 * 6 {
            expected.next_bounded_int(8);
        }
        assert_eq!(rand.next_int(), expected.next_int());
    }

    #[test]
    fn dead_bush_on_sand() {
        let mut world = sand_world();
        let mut rand = JavaRandom::new(0);
        for _ in 0..16 {
            DeadBushGenerator::new().generate(&mut world, ORIGIN, &mut rand);
        }
        assert!(assert_surface(&world, block::DEAD_BUSH) > 0);
    }

    #[test]
    fn tall_grass_not_on_sand() {
        let mut world = sand_world();
        let mut rand = JavaRandom::new(0);
        assert!(TallGrassGenerator::new_grass().generate(&mut world, ORIGIN, &mut rand));
        assert!(world.writes().is_empty());
    }

    #[test]
    fn tall_grass_metadata() {
        let mut world = grass_world();
        let mut rand = JavaRandom::new(0);
        TallGrassGenerator::new_fern().generate(&mut world, ORIGIN, &mut rand);
        assert!(assert_surface(&world, block::TALL_GRASS) > 0);
        assert!(world.writes().iter().all(|w| w.metadata == 2));
    }

    #[test]
    fn pumpkin_orientation() {
        let mut world = grass_world();
        let mut rand = JavaRandom::new(0);
        PumpkinGenerator::new().generate(&mut world, ORIGIN, &mut rand);
        assert!(assert_surface(&world, block::PUMPKIN) > 0);
        assert!(world.writes().iter().all(|w| w.metadata < 4));
    }

    #[test]
    fn cactus_columns() {

        let mut world = sand_world();
        let mut rand = JavaRandom::new(0);
        for _ in 0..8 {
            CactusGenerator::new().generate(&mut world, ORIGIN, &mut rand);
        }

        assert!(!world.writes().is_empty());
        for write in world.writes() {
            assert_eq!(write.id, block::CACTUS);
            assert!((64..64 + 3 + 3).contains(&write.pos.y), "{write:?}");
            // Each cactus block stands on sand or another cactus.
            let below = world.get_block_id(write.pos.down(1));
            assert!(below == block::SAND || below == block::CACTUS);
        }

    }

    #[test]
    fn sugar_canes_need_water() {

        let mut world = grass_world();
        let mut rand = JavaRandom::new(0);
        assert!(SugarCanesGenerator::new().generate(&mut world, ORIGIN, &mut rand));
        assert!(world.writes().is_empty());

        // A water line along X, canes grow on both banks.
        for x in 0..16 {
            world.place_block(IVec3::new(x, 63, 8), block::STILL_WATER, 0);
        }
        world.clear();

        for _ in 0..4 {
            SugarCanesGenerator::new().generate(&mut world, ORIGIN, &mut rand);
        }

        assert!(!world.writes().is_empty());
        for write in world.writes() {
            assert_eq!(write.id, block::SUGAR_CANES);
            assert!(matches!(write.pos.z, 7 | 9), "{write:?}");
            assert!((64..68).contains(&write.pos.y));
        }

    }

    #[test]
    fn vines_on_walls() {

        let mut world = grass_world();
        // A stone pillar at the origin.
        for y in 64..70 {
            world.place_block(IVec3::new(8, y, 8), block::STONE, 0);
        }
        world.clear();

        let mut rand = JavaRandom::new(0);
        for _ in 0..8 {
            VinesGenerator::new().generate(&mut world, ORIGIN, &mut rand);
        }

        let mut on_pillar = 0;
        for write in world.writes() {
            assert_eq!(write.id, block::VINE);
            if write.pos.y < 64 {
                continue;
            }
            // Above the ground vines only hold on the pillar.
            let expected = match (write.pos.x - 8, write.pos.z - 8) {
                (1, 0) => Face::NegX.vine_meta(),
                (-1, 0) => Face::PosX.vine_meta(),
                (0, 1) => Face::NegZ.vine_meta(),
                (0, -1) => Face::PosZ.vine_meta(),
                _ => panic!("unexpected vine at {}", write.pos),
            };
            assert_eq!(write.metadata, expected);
            on_pillar += 1;
        }

        assert!(on_pillar > 0);

    }

    #[test]
    fn waterlily_on_water() {
        let mut world = grass_world();
        for x in 0..16 {
            for z in 0..16 {
                world.place_block(IVec3::new(x, 63, z), block::STILL_WATER, 0);
            }
        }
        world.clear();
        let mut rand = JavaRandom::new(0);
        for _ in 0..4 {
            WaterlilyGenerator::new().generate(&mut world, ORIGIN, &mut rand);
        }
        assert!(assert_surface(&world, block::WATER_LILY) > 0);
    }

    #[test]
    fn double_plant_halves() {

        let mut world = grass_world();
        let mut rand = JavaRandom::new(0);
        assert!(DoublePlantGenerator::new(double_plant::ROSE_BUSH).generate(&mut world, ORIGIN, &mut rand));

        for (&pos, &(id, meta)) in world.diff() {
            assert_eq!(id, block::DOUBLE_PLANT);
            if pos.y == 64 {
                assert_eq!(meta, double_plant::ROSE_BUSH);
                assert_eq!(world.get_block(pos.up(1)), (block::DOUBLE_PLANT, double_plant::UPPER_BIT | double_plant::ROSE_BUSH));
            } else {
                assert_eq!(pos.y, 65);
            }
        }

    }

    #[test]
    fn double_plant_nothing_placed() {
        let mut world = sand_world();
        let mut rand = JavaRandom::new(0);
        assert!(!DoublePlantGenerator::new(double_plant::SUNFLOWER).generate(&mut world, ORIGIN, &mut rand));
        assert!(world.writes().is_empty());
    }

    #[test]
    fn block_patch_written_twice() {

        let mut world = grass_world();
        let mut rand = JavaRandom::new(0);
        assert!(BlockPatchGenerator::new(block::PUMPKIN).generate(&mut world, ORIGIN, &mut rand));

        let writes = world.writes();
        assert!(!writes.is_empty());
        assert_eq!(writes.len() % 2, 0);
        for pair in writes.chunks(2) {
            assert_eq!(pair[0].pos, pair[1].pos);
            assert_eq!(pair[0].metadata, 0);
            assert!(pair[1].metadata < 4);
        }

    }

}
