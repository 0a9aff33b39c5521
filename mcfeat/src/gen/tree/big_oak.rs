use glam::IVec3;

use crate::block::{self, BlockSet};
use crate::geom::{BlockLine, PosExt};
use crate::util::math::JAVA_PI;
use crate::util::JavaRandom;
use crate::world::VoxelAccess;
use crate::gen::FeatureGenerator;


/// Blocks a branch line can go through.
const BRANCH_PASSABLE: BlockSet = BlockSet::new(&[
    block::AIR,
    block::LEAVES,
    block::SAPLING,
    block::VINE,
    block::LOG,
]);


/// Shape parameters of big oak trees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BigOakParams {
    pub height_attenuation: f64,
    pub branch_slope: f64,
    pub scale_width: f64,
    pub leaf_density: f64,
    /// Trunk width, 1 or 2.
    pub trunk_size: i32,
    /// Exclusive bound of the random height added to 5.
    pub height_limit_limit: i32,
    /// Height of a foliage cluster.
    pub leaf_distance_limit: i32,
}

impl Default for BigOakParams {
    fn default() -> Self {
        Self {
            height_attenuation: 0.618,
            branch_slope: 0.381,
            scale_width: 1.0,
            leaf_density: 1.0,
            trunk_size: 1,
            height_limit_limit: 12,
            leaf_distance_limit: 4,
        }
    }
}


/// A generator for big oak trees, with branches and foliage clusters.
#[derive(Debug, Clone, Default)]
pub struct BigOakTreeGenerator {
    params: BigOakParams,
}

impl BigOakTreeGenerator {

    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_params(params: BigOakParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &BigOakParams {
        &self.params
    }

}

impl FeatureGenerator for BigOakTreeGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        // The tree only consumes one draw from the caller stream.
        let mut rand = rand.derive_child();
        let height_limit = 5 + rand.next_bounded_int(self.params.height_limit_limit);

        let mut tree = BigOakTree {
            params: &self.params,
            origin: pos,
            height_limit,
            height: 0,
            nodes: Vec::new(),
            rand,
        };

        if !tree.check_location(world) {
            return false;
        }

        tree.place_node_list(world);
        tree.place_leaves(world);
        tree.place_trunk(world);
        tree.place_node_bases(world);
        true

    }

}


/// A foliage cluster of a big oak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FoliageNode {
    /// Bottom center of the cluster.
    pos: IVec3,
    /// Y coordinate on the trunk where the branch to this node starts.
    branch_base: i32,
}

/// Working state of a single big oak generation.
struct BigOakTree<'a> {
    params: &'a BigOakParams,
    origin: IVec3,
    height_limit: i32,
    height: i32,
    nodes: Vec<FoliageNode>,
    rand: JavaRandom,
}

impl BigOakTree<'_> {

    fn check_location<W: VoxelAccess + ?Sized>(&mut self, world: &W) -> bool {

        if !matches!(world.get_block_id(self.origin.down(1)), block::DIRT | block::GRASS | block::FARMLAND) {
            return false;
        }

        match check_line(world, self.origin, self.origin.up(self.height_limit - 1)) {
            None => true,
            Some(limit) if limit < 6 => false,
            Some(limit) => {
                self.height_limit = limit;
                true
            }
        }

    }

    fn place_node_list<W: VoxelAccess + ?Sized>(&mut self, world: &W) {

        let params = self.params;
        let origin = self.origin;

        self.height = ((self.height_limit as f64 * params.height_attenuation) as i32).min(self.height_limit - 1);

        let per_layer = ((1.382 + (params.leaf_density * self.height_limit as f64 / 13.0).powi(2)) as i32).max(1);
        let top_base = origin.y + self.height;
        let mut layer = self.height_limit - params.leaf_distance_limit;

        self.nodes.push(FoliageNode {
            pos: origin.up(layer),
            branch_base: top_base,
        });

        while layer >= 0 {

            let size = self.layer_size(layer);
            if size >= 0.0 {
                for _ in 0..per_layer {

                    let dist = params.scale_width * size as f64 * (self.rand.next_float() as f64 + 0.328);
                    let angle = (self.rand.next_float() as f64 * 2.0) * JAVA_PI;

                    let node_pos = IVec3::new(
                        (origin.x as f64 + dist * angle.sin() + 0.5).floor() as i32,
                        origin.y + layer - 1,
                        (origin.z as f64 + dist * angle.cos() + 0.5).floor() as i32,
                    );

                    if check_line(world, node_pos, node_pos.up(params.leaf_distance_limit)).is_some() {
                        continue;
                    }

                    let dx = origin.x - node_pos.x;
                    let dz = origin.z - node_pos.z;
                    let base_y = node_pos.y as f64 - ((dx * dx + dz * dz) as f64).sqrt() * params.branch_slope;
                    let base_y = if base_y > top_base as f64 { top_base } else { base_y as i32 };

                    let base_pos = IVec3::new(origin.x, base_y, origin.z);
                    if check_line(world, base_pos, node_pos).is_none() {
                        self.nodes.push(FoliageNode {
                            pos: node_pos,
                            branch_base: base_y,
                        });
                    }

                }
            }

            layer -= 1;

        }

    }

    fn layer_size(&self, layer: i32) -> f32 {

        if (layer as f32) < self.height_limit as f32 * 0.3 {
            return -1.0;
        }

        let half = self.height_limit as f32 / 2.0;
        let offset = half - layer as f32;

        let size = if offset == 0.0 {
            half
        } else if offset.abs() >= half {
            return 0.0;
        } else {
            ((half * half - offset * offset) as f64).sqrt() as f32
        };

        size * 0.5

    }

    fn place_leaves<W: VoxelAccess + ?Sized>(&self, world: &mut W) {
        let limit = self.params.leaf_distance_limit;
        for node in &self.nodes {
            for dy in 0..limit {
                let radius = if dy != 0 && dy != limit - 1 { 3.0 } else { 2.0 };
                place_cross_section(world, node.pos.up(dy), radius);
            }
        }
    }

    fn place_trunk<W: VoxelAccess + ?Sized>(&self, world: &mut W) {
        let from = self.origin;
        let to = self.origin.up(self.height);
        place_limb(world, from, to);
        if self.params.trunk_size == 2 {
            place_limb(world, from.east(1), to.east(1));
            place_limb(world, from.east(1).south(1), to.east(1).south(1));
            place_limb(world, from.south(1), to.south(1));
        }
    }

    fn place_node_bases<W: VoxelAccess + ?Sized>(&self, world: &mut W) {
        for node in &self.nodes {
            let base_pos = IVec3::new(self.origin.x, node.branch_base, self.origin.z);
            let base_height = (node.branch_base - self.origin.y) as f64;
            if base_pos != node.pos && base_height >= self.height_limit as f64 * 0.2 {
                place_limb(world, base_pos, node.pos);
            }
        }
    }

}


/// Place a horizontal disc of leaves, only replacing air and leaves.
fn place_cross_section<W: VoxelAccess + ?Sized>(world: &mut W, center: IVec3, radius: f32) {

    let extent = (radius as f64 + 0.618) as i32;
    let radius_sq = (radius * radius) as f64;

    for dx in -extent..=extent {
        for dz in -extent..=extent {
            let a = (dx.abs() as f64 + 0.5).powi(2);
            let b = (dz.abs() as f64 + 0.5).powi(2);
            if a + b <= radius_sq {
                let pos = center + IVec3::new(dx, 0, dz);
                if matches!(world.get_block_id(pos), block::AIR | block::LEAVES) {
                    world.place_block(pos, block::LEAVES, 0);
                }
            }
        }
    }

}

/// Place a line of logs, oriented along the dominant horizontal axis from its start.
fn place_limb<W: VoxelAccess + ?Sized>(world: &mut W, from: IVec3, to: IVec3) {
    for pos in BlockLine::new(from, to) {
        let dx = (pos.x - from.x).abs();
        let dz = (pos.z - from.z).abs();
        let max = dx.max(dz);
        let meta = if max == 0 {
            0
        } else if dx == max {
            4
        } else {
            8
        };
        world.place_block(pos, block::LOG, meta);
    }
}

/// Walk a line and return the step index of the first block a branch cannot go through.
fn check_line<W: VoxelAccess + ?Sized>(world: &W, from: IVec3, to: IVec3) -> Option<i32> {
    BlockLine::new(from, to)
        .position(|pos| !BRANCH_PASSABLE.contains(world.get_block_id(pos)))
        .map(|index| index as i32)
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::gen::testutil::{grass_world, count_blocks};

    #[test]
    fn layer_size() {
        let tree = BigOakTree {
            params: &BigOakParams::default(),
            origin: IVec3::ZERO,
            height_limit: 10,
            height: 0,
            nodes: Vec::new(),
            rand: JavaRandom::new(0),
        };
        assert_eq!(tree.layer_size(2), -1.0);
        assert_eq!(tree.layer_size(5), 2.5);
        assert_eq!(tree.layer_size(10), 0.0);
        assert!((tree.layer_size(7) - 2.291_288).abs() < 1e-5);
    }

    #[test]
    fn limb_axis() {
        let mut world = grass_world();
        place_limb(&mut world, IVec3::new(0, 70, 0), IVec3::new(4, 71, 1));
        assert_eq!(world.get_block(IVec3::new(0, 70, 0)), (block::LOG, 0));
        assert_eq!(world.get_block(IVec3::new(4, 71, 1)), (block::LOG, 4));
        world.clear();
        place_limb(&mut world, IVec3::new(0, 70, 0), IVec3::new(0, 70, -3));
        assert_eq!(world.get_block(IVec3::new(0, 70, -3)), (block::LOG, 8));
        assert_eq!(world.writes().len(), 4);
    }

    #[test]
    fn check_line_stops() {
        let mut world = grass_world();
        assert_eq!(check_line(&world, IVec3::new(0, 64, 0), IVec3::new(0, 74, 0)), None);
        world.place_block(IVec3::new(0, 70, 0), block::STONE, 0);
        assert_eq!(check_line(&world, IVec3::new(0, 64, 0), IVec3::new(0, 74, 0)), Some(6));
        assert_eq!(check_line(&world, IVec3::new(0, 70, 0), IVec3::new(0, 70, 0)), None);
    }

    #[test]
    fn consumes_one_draw() {
        let mut world = grass_world();
        let mut rand = JavaRandom::new(42);
        let mut reference = JavaRandom::new(42);
        reference.next_int();
        assert!(BigOakTreeGenerator::new().generate(&mut world, IVec3::new(0, 64, 0), &mut rand));
        assert_eq!(rand.get_state(), reference.get_state());
        assert!(count_blocks(&world, IVec3::new(0, 72, 0), 8, block::LEAVES) > 0);
        assert_eq!(world.get_block_id(IVec3::new(0, 64, 0)), block::LOG);
    }

}
