//! Ice plains features, packed ice paths and ice spikes.

use glam::IVec3;

use tracing::trace;

use crate::block::{self, BlockSet};
use crate::util::JavaRandom;
use crate::world::VoxelAccess;

use super::{FeatureGenerator, FeatureConfigError};


/// Blocks turned into packed ice by paths.
const PATH_REPLACEABLE: BlockSet = BlockSet::new(&[block::DIRT, block::SNOW_BLOCK, block::ICE]);

/// Blocks turned into packed ice by spikes.
const SPIKE_REPLACEABLE: BlockSet = PATH_REPLACEABLE.with(block::AIR);

/// Blocks a spike root may dig through.
const ROOT_REPLACEABLE: BlockSet = SPIKE_REPLACEABLE.with(block::PACKED_ICE);


/// Descend from the given position through air, down to Y 2, and return the snow block
/// position found, if any.
fn find_snow<W: VoxelAccess + ?Sized>(world: &W, mut pos: IVec3) -> Option<IVec3> {
    while world.is_air(pos) && pos.y > 2 {
        pos.y -= 1;
    }
    world.is_block(pos, block::SNOW_BLOCK).then_some(pos)
}


/// A generator for flat discs of packed ice laid in snow.
#[derive(Debug, Clone)]
pub struct IcePathGenerator {
    width: i32,
}

impl IcePathGenerator {

    /// Minimum base width of a path, paths of exactly this width never draw.
    pub const MIN_WIDTH: i32 = 2;

    /// Create a new ice path generator, the disc radius is drawn in `2..width`.
    pub fn new(width: i32) -> Result<Self, FeatureConfigError> {
        if width < Self::MIN_WIDTH {
            return Err(FeatureConfigError::RadiusTooSmall { min: Self::MIN_WIDTH, got: width });
        }
        Ok(Self { width })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

}

impl FeatureGenerator for IcePathGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        let Some(pos) = find_snow(world, pos) else {
            return false;
        };

        let mut radius = 2;
        if self.width > 2 {
            radius += rand.next_bounded_int(self.width - 2);
        }

        for dx in -radius..=radius {
            for dz in -radius..=radius {

                if dx * dx + dz * dz > radius * radius {
                    continue;
                }

                for dy in -1..=1 {
                    let ice_pos = pos + IVec3::new(dx, dy, dz);
                    if PATH_REPLACEABLE.contains(world.get_block_id(ice_pos)) {
                        world.place_block(ice_pos, block::PACKED_ICE, 0);
                    }
                }

            }
        }

        true

    }

}


/// A generator for tapering packed ice spikes, rarely lifted into tall pillars, each
/// anchored by a root column digging down through the snow.
#[derive(Debug, Clone, Default)]
pub struct IceSpikeGenerator {}

impl IceSpikeGenerator {
    pub fn new() -> Self {
        Self {}
    }
}

impl FeatureGenerator for IceSpikeGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        let Some(mut pos) = find_snow(world, pos) else {
            return false;
        };

        pos.y += rand.next_bounded_int(4);

        let height = rand.next_bounded_int(4) + 7;
        let base_radius = height / 4 + rand.next_bounded_int(2);

        if base_radius > 1 && rand.next_bounded_int(60) == 0 {
            pos.y += 10 + rand.next_bounded_int(30);
            trace!("tall ice spike at {pos}");
        }

        for dy in 0..height {

            let layer_radius = (1.0 - dy as f64 / height as f64) * base_radius as f64;
            let radius = layer_radius.ceil() as i32;

            for dx in -radius..=radius {
                let fx = dx.abs() as f64 - 0.25;
                for dz in -radius..=radius {
                    let fz = dz.abs() as f64 - 0.25;

                    let on_edge = dx == -radius || dx == radius || dz == -radius || dz == radius;
                    if (dx == 0 && dz == 0) || (fx * fx + fz * fz <= layer_radius * layer_radius && (!on_edge || rand.next_float() <= 0.75)) {

                        let ice_pos = pos + IVec3::new(dx, dy, dz);
                        if SPIKE_REPLACEABLE.contains(world.get_block_id(ice_pos)) {
                            world.place_block(ice_pos, block::PACKED_ICE, 0);
                        }

                        // Mirror the spike below the origin.
                        if dy != 0 && radius > 1 {
                            let ice_pos = pos + IVec3::new(dx, -dy, dz);
                            if SPIKE_REPLACEABLE.contains(world.get_block_id(ice_pos)) {
                                world.place_block(ice_pos, block::PACKED_ICE, 0);
                            }
                        }

                    }

                }
            }

        }

        let root_radius = (base_radius - 1).clamp(0, 1);

        for dx in -root_radius..=root_radius {
            for dz in -root_radius..=root_radius {

                let mut root_pos = pos + IVec3::new(dx, -1, dz);
                let mut depth = if dx.abs() == 1 && dz.abs() == 1 {
                    rand.next_bounded_int(5)
                } else {
                    50
                };

                while root_pos.y > 50 {

                    if !ROOT_REPLACEABLE.contains(world.get_block_id(root_pos)) {
                        break;
                    }

                    world.place_block(root_pos, block::PACKED_ICE, 0);
                    root_pos.y -= 1;
                    depth -= 1;

                    if depth <= 0 {
                        root_pos.y -= rand.next_bounded_int(5) + 1;
                        depth = rand.next_bounded_int(5);
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
    use crate::world::{ChunkedWorld, RecordingWorld};

    /// Stone up to 59, dirt up to 62 and a snow block surface at 63.
    fn snow_world() -> RecordingWorld<ChunkedWorld> {
        RecordingWorld::new(ChunkedWorld::with_layers(0, &[
            (block::STONE, 0, 60),
            (block::DIRT, 0, 3),
            (block::SNOW_BLOCK, 0, 1),
        ]))
    }

    #[test]
    fn path_width_validation() {
        assert_eq!(IcePathGenerator::new(1).unwrap_err(), FeatureConfigError::RadiusTooSmall { min: 2, got: 1 });
        assert_eq!(IcePathGenerator::new(4).unwrap().width(), 4);
    }

    #[test]
    fn path_without_draw() {

        let mut world = snow_world();
        let mut rand = JavaRandom::new(0);
        let origin = IVec3::new(8, 80, 8);
        assert!(IcePathGenerator::new(2).unwrap().generate(&mut world, origin, &mut rand));

        // Width 2 never draws from the stream.
        assert_eq!(rand.next_int(), JavaRandom::new(0).next_int());

        assert_eq!(world.get_block_id(IVec3::new(8, 63, 8)), block::PACKED_ICE);
        assert_eq!(world.get_block_id(IVec3::new(10, 62, 8)), block::PACKED_ICE);
        assert_eq!(world.get_block_id(IVec3::new(10, 63, 10)), block::SNOW_BLOCK);
        // Stone under the dirt is never replaced.
        assert_eq!(world.get_block_id(IVec3::new(8, 59, 8)), block::STONE);
        assert!(world.writes().iter().all(|w| (62..=63).contains(&w.pos.y)));

    }

    #[test]
    fn path_needs_snow() {
        let mut world = crate::gen::testutil::grass_world();
        let mut rand = JavaRandom::new(0);
        assert!(!IcePathGenerator::new(4).unwrap().generate(&mut world, IVec3::new(8, 80, 8), &mut rand));
        assert!(world.writes().is_empty());
    }

    #[test]
    fn spike_column() {

        for seed in 0..8 {

            let mut world = snow_world();
            let mut rand = JavaRandom::new(seed);
            let origin = IVec3::new(8, 100, 8);
            assert!(IceSpikeGenerator::new().generate(&mut world, origin, &mut rand));

            // The center column always goes up at least 7 blocks from the snow surface.
            let height = world.get_height(8, 8);
            assert!(height >= 63 + 7, "seed {seed}: height {height}");
            assert_eq!(world.get_block_id(IVec3::new(8, height - 1, 8)), block::PACKED_ICE);

            for (&pos, &(id, meta)) in world.diff() {
                assert_eq!((id, meta), (block::PACKED_ICE, 0));
                assert!(pos.y > 50, "{pos}");
            }

        }

    }

    #[test]
    fn spike_needs_snow() {
        let mut world = RecordingWorld::new(ChunkedWorld::new(0));
        let mut rand = JavaRandom::new(0);
        assert!(!IceSpikeGenerator::new().generate(&mut world, IVec3::new(8, 100, 8), &mut rand));
        assert!(world.writes().is_empty());
    }

}
