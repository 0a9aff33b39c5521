//! Dungeon generator.

use glam::IVec3;

use tracing::trace;

use crate::util::JavaRandom;
use crate::world::VoxelAccess;
use crate::block;

use super::FeatureGenerator;


/// A generator for mob spawner dungeon.
#[derive(Debug, Clone, Default)]
pub struct DungeonGenerator {}

impl DungeonGenerator {
    pub fn new() -> Self {
        Self {}
    }
}

impl FeatureGenerator for DungeonGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        let x_radius = rand.next_bounded_int(2) + 2;
        let z_radius = rand.next_bounded_int(2) + 2;
        let height = 3;
        let mut air_count = 0usize;

        let start = pos - IVec3::new(x_radius + 1, 1, z_radius + 1);
        let end = pos + IVec3::new(x_radius + 1, height + 1, z_radius + 1);

        for x in start.x..=end.x {
            for y in start.y..=end.y {
                for z in start.z..=end.z {

                    let check_pos = IVec3::new(x, y, z);
                    let solid = !world.is_air(check_pos);

                    if y == start.y && !solid {
                        return false;
                    } else if y == end.y && !solid {
                        return false;
                    } else if y == pos.y && (x == start.x || x == end.x || z == start.z || z == end.z) {
                        if world.is_air(check_pos) && world.is_air(check_pos + IVec3::Y) {
                            air_count += 1;
                        }
                    }

                }
            }
        }

        if air_count < 1 || air_count > 5 {
            trace!("dungeon at {pos} rejected with {air_count} openings");
            return false;
        }

        // Carve the dungeon and fill walls, the ceiling layer is never touched.
        for x in start.x..=end.x {
            for y in (start.y..end.y).rev() {
                for z in start.z..=end.z {

                    let carve_pos = IVec3::new(x, y, z);
                    if x != start.x && y != start.y && z != start.z && x != end.x && z != end.z {
                        if !world.is_block(carve_pos, block::CHEST) {
                            world.place_block(carve_pos, block::AIR, 0);
                        }
                    } else if y >= 0 && world.is_air(carve_pos - IVec3::Y) {
                        world.place_block(carve_pos, block::AIR, 0);
                    } else if !matches!(world.get_block_id(carve_pos), block::AIR | block::CHEST) {
                        if y == start.y && rand.next_bounded_int(4) != 0 {
                            world.place_block(carve_pos, block::MOSS_STONE, 0);
                        } else {
                            world.place_block(carve_pos, block::COBBLESTONE, 0);
                        }
                    }

                }
            }
        }

        world.place_block(pos, block::MONSTER_SPAWNER, 0);
        trace!("dungeon at {pos} placed, size {}x{}", x_radius * 2 + 1, z_radius * 2 + 1);

        true

    }

}
