//! Liquids generation.

use glam::{IVec3, DVec3};

use tracing::trace;

use crate::block::{self, material};
use crate::geom::PosExt;
use crate::util::{Face, JavaRandom};
use crate::world::VoxelAccess;

use super::FeatureGenerator;


/// Occupancy of a lake, indexed `[X][Z][Y]`.
type LakeFill = [[[bool; 8]; 16]; 16];


/// A generator for lakes.
#[derive(Debug, Clone)]
pub struct LakeGenerator {
    fluid_id: u8,
}

impl LakeGenerator {

    /// Create a new lake generator for the given block id.
    #[inline]
    pub fn new(fluid_id: u8) -> Self {
        Self { fluid_id }
    }

    #[inline]
    pub fn new_water() -> Self {
        Self::new(block::STILL_WATER)
    }

    #[inline]
    pub fn new_lava() -> Self {
        Self::new(block::STILL_LAVA)
    }

}

impl FeatureGenerator for LakeGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, mut pos: IVec3, rand: &mut JavaRandom) -> bool {

        // Lake have a maximum size of 16x8x16, so we subtract half.
        pos -= IVec3::new(8, 0, 8);
        while pos.y > 5 && world.is_air(pos) {
            pos.y -= 1;
        }

        if pos.y <= 4 {
            return false;
        }

        pos.y -= 4;

        let mut fill: Box<LakeFill> = Box::new([[[false; 8]; 16]; 16]);

        let count = rand.next_bounded_int(4) + 4;
        for _ in 0..count {

            let size = rand.next_dvec3() *
                DVec3::new(6.0, 4.0, 6.0) +
                DVec3::new(3.0, 2.0, 3.0);

            let center = rand.next_dvec3() *
                (DVec3::new(16.0, 8.0, 16.0) - size - DVec3::new(2.0, 4.0, 2.0)) +
                DVec3::new(1.0, 2.0, 1.0) + size / 2.0;

            let half_size = size / 2.0;

            for dx in 1..15 {
                for dz in 1..15 {
                    for dy in 1..7 {
                        let dist = (DVec3::new(dx as f64, dy as f64, dz as f64) - center) / half_size;
                        if dist.length_squared() < 1.0 {
                            fill[dx][dz][dy] = true;
                        }
                    }
                }
            }

        }

        // The lake must not open on an existing fluid above its surface.
        for dx in 0..16 {
            for dz in 0..16 {
                for dy in 4..8 {
                    if is_lake_border(&fill, dx, dz, dy) {
                        let check_pos = pos + IVec3::new(dx as i32, dy as i32, dz as i32);
                        if material::is_fluid(world.get_block_id(check_pos)) {
                            trace!("lake at {pos} opens on fluid at {check_pos}");
                            return false;
                        }
                    }
                }
            }
        }

        for dx in 0..16 {
            for dz in 0..16 {
                for dy in 0..8 {

                    if !fill[dx][dz][dy] {
                        continue;
                    }

                    let place_pos = pos + IVec3::new(dx as i32, dy as i32, dz as i32);
                    if material::is_water(world.get_block_id(place_pos))
                    || material::is_water(world.get_block_id(place_pos.up(1))) {
                        continue;
                    }

                    world.place_block(place_pos, if dy >= 4 { block::AIR } else { self.fluid_id }, 0);

                }
            }
        }

        true

    }

}

/// Return true if the cell is not part of the lake but touches it.
fn is_lake_border(fill: &LakeFill, dx: usize, dz: usize, dy: usize) -> bool {
    !fill[dx][dz][dy] && (
        dx < 15 && fill[dx + 1][dz][dy] ||
        dx > 0  && fill[dx - 1][dz][dy] ||
        dz < 15 && fill[dx][dz + 1][dy] ||
        dz > 0  && fill[dx][dz - 1][dy] ||
        dy < 7  && fill[dx][dz][dy + 1] ||
        dy > 0  && fill[dx][dz][dy - 1]
    )
}


/// A generator for single liquid springs in stone walls.
#[derive(Debug, Clone)]
pub struct SpringGenerator {
    fluid_id: u8,
}

impl SpringGenerator {

    /// Create a new spring generator for the given block id.
    #[inline]
    pub fn new(fluid_id: u8) -> Self {
        Self { fluid_id }
    }

}

impl FeatureGenerator for SpringGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, _rand: &mut JavaRandom) -> bool {

        if !world.is_block(pos.up(1), block::STONE) {
            return false;
        } else if !world.is_block(pos.down(1), block::STONE) {
            return false;
        } else if !matches!(world.get_block_id(pos), block::AIR | block::STONE) {
            return false;
        }

        let mut stone_count = 0;
        let mut air_count = 0;

        for face in Face::HORIZONTAL {
            match world.get_block_id(pos.offset(face, 1)) {
                block::STONE => stone_count += 1,
                block::AIR => air_count += 1,
                _ => {}
            }
        }

        if stone_count == 3 && air_count == 1 {
            world.place_block_notify(pos, self.fluid_id, 0)
        } else {
            false
        }

    }

}
