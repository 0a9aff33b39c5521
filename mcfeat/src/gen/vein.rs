//! Ore vein feature and the standard ore distribution of a chunk.

use glam::IVec3;

use tracing::{debug, instrument};

use crate::util::math::{JAVA_PI, mc_sin, mc_cos, java_floor};
use crate::util::JavaRandom;
use crate::world::VoxelAccess;
use crate::block;

use super::{FeatureGenerator, FeatureConfigError};


/// Static configuration of an ore vein.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OreVeinSpec {
    /// The only block the vein replaces.
    host: u8,
    ore_id: u8,
    ore_meta: u8,
    /// Number of ellipsoids along the vein, also scales their size.
    count: i32,
}

impl OreVeinSpec {

    pub fn new(host: u8, ore_id: u8, ore_meta: u8, count: i32) -> Result<Self, FeatureConfigError> {
        if count <= 0 {
            Err(FeatureConfigError::EmptyVein)
        } else if ore_meta > 0x0F {
            Err(FeatureConfigError::MetadataOutOfRange(ore_meta))
        } else {
            Ok(Self { host, ore_id, ore_meta, count })
        }
    }

    /// A vein replacing stone.
    #[inline]
    pub fn new_ore(ore_id: u8, ore_meta: u8, count: i32) -> Result<Self, FeatureConfigError> {
        Self::new(block::STONE, ore_id, ore_meta, count)
    }

    #[inline]
    pub fn host(&self) -> u8 {
        self.host
    }

    #[inline]
    pub fn ore(&self) -> (u8, u8) {
        (self.ore_id, self.ore_meta)
    }

    #[inline]
    pub fn count(&self) -> i32 {
        self.count
    }

}


/// A generator for ore veins, a chain of ellipsoids along a random horizontal segment
/// thicker at its middle.
#[derive(Debug, Clone)]
pub struct OreVeinGenerator {
    spec: OreVeinSpec,
}

impl OreVeinGenerator {

    #[inline]
    pub fn new(spec: OreVeinSpec) -> Self {
        Self { spec }
    }

    #[inline]
    pub fn spec(&self) -> &OreVeinSpec {
        &self.spec
    }

}

impl FeatureGenerator for OreVeinGenerator {

    fn generate<W: VoxelAccess + ?Sized>(&self, world: &mut W, pos: IVec3, rand: &mut JavaRandom) -> bool {

        let count = self.spec.count;

        let angle = rand.next_float() as f64 * JAVA_PI;
        let angle_sin = mc_sin(angle as f32);
        let angle_cos = mc_cos(angle as f32);
        let half_len = count as f32 / 8.0;

        let start_x = ((pos.x + 8) as f32 + angle_sin * half_len) as f64;
        let stop_x = ((pos.x + 8) as f32 - angle_sin * half_len) as f64;
        let start_z = ((pos.z + 8) as f32 + angle_cos * half_len) as f64;
        let stop_z = ((pos.z + 8) as f32 - angle_cos * half_len) as f64;

        let start_y = (pos.y + rand.next_bounded_int(3) - 2) as f64;
        let stop_y = (pos.y + rand.next_bounded_int(3) - 2) as f64;

        for i in 0..count {

            let t = i as f64 / count as f64;
            let center_x = start_x + (stop_x - start_x) * t;
            let center_y = start_y + (stop_y - start_y) * t;
            let center_z = start_z + (stop_z - start_z) * t;

            let base_size = rand.next_double() * count as f64 / 16.0;
            let profile = mc_sin((JAVA_PI * t) as f32) as f64 + 1.0;
            let half_width = (profile * base_size + 1.0) / 2.0;
            let half_height = (profile * base_size + 1.0) / 2.0;

            let min_x = java_floor(center_x - half_width);
            let min_y = java_floor(center_y - half_height);
            let min_z = java_floor(center_z - half_width);
            let max_x = java_floor(center_x + half_width);
            let max_y = java_floor(center_y + half_height);
            let max_z = java_floor(center_z + half_width);

            for x in min_x..=max_x {

                let dx = (x as f64 + 0.5 - center_x) / half_width;
                if dx * dx >= 1.0 {
                    continue;
                }

                for y in min_y..=max_y {

                    let dy = (y as f64 + 0.5 - center_y) / half_height;
                    if dx * dx + dy * dy >= 1.0 {
                        continue;
                    }

                    for z in min_z..=max_z {

                        let dz = (z as f64 + 0.5 - center_z) / half_width;
                        if dx * dx + dy * dy + dz * dz >= 1.0 {
                            continue;
                        }

                        let ore_pos = IVec3::new(x, y, z);
                        if (0..=255).contains(&y) && world.is_block(ore_pos, self.spec.host) {
                            world.place_block(ore_pos, self.spec.ore_id, self.spec.ore_meta);
                        }

                    }

                }

            }

        }

        true

    }

}


/// Vertical distribution of vein origins in a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OreDistribution {
    /// Uniform in `min..max`, bounds are swapped if inverted.
    Uniform {
        min: i32,
        max: i32,
    },
    /// Sum of two uniform draws in `0..spread`, shifted around the center.
    Triangular {
        center: i32,
        spread: i32,
    },
}

impl OreDistribution {

    fn next_y(self, rand: &mut JavaRandom) -> i32 {
        match self {
            OreDistribution::Uniform { mut min, mut max } => {
                if max < min {
                    std::mem::swap(&mut min, &mut max);
                } else if max == min {
                    if min < 255 {
                        max += 1;
                    } else {
                        min -= 1;
                    }
                }
                rand.next_bounded_int(max - min) + min
            }
            OreDistribution::Triangular { center, spread } => {
                rand.next_bounded_int(spread) + rand.next_bounded_int(spread) + center - spread
            }
        }
    }

}


/// An ore vein generated a given number of times per chunk.
#[derive(Debug, Clone)]
pub struct OreLayer {
    vein: OreVeinGenerator,
    veins_per_chunk: i32,
    distribution: OreDistribution,
}

impl OreLayer {

    pub fn new(spec: OreVeinSpec, veins_per_chunk: i32, distribution: OreDistribution) -> Result<Self, FeatureConfigError> {
        if veins_per_chunk <= 0 {
            return Err(FeatureConfigError::NoVeins(veins_per_chunk));
        }
        if let OreDistribution::Triangular { spread, .. } = distribution {
            if spread <= 0 {
                return Err(FeatureConfigError::EmptySpread(spread));
            }
        }
        Ok(Self { vein: OreVeinGenerator::new(spec), veins_per_chunk, distribution })
    }

    #[inline]
    pub fn vein(&self) -> &OreVeinGenerator {
        &self.vein
    }

    #[inline]
    pub fn veins_per_chunk(&self) -> i32 {
        self.veins_per_chunk
    }

    #[inline]
    pub fn distribution(&self) -> OreDistribution {
        self.distribution
    }

}


/// Generate all the given ore layers in order for the chunk whose minimum corner is at
/// the given block X/Z coordinates. Each vein draws its origin as X, Y then Z.
#[instrument(skip_all)]
pub fn generate_ore_in_chunk<W: VoxelAccess + ?Sized>(
    world: &mut W,
    rand: &mut JavaRandom,
    chunk_x: i32,
    chunk_z: i32,
    layers: &[OreLayer],
) {

    let base = IVec3::new(chunk_x, 0, chunk_z);

    for layer in layers {
        for _ in 0..layer.veins_per_chunk {
            let x = rand.next_bounded_int(16);
            let y = layer.distribution.next_y(rand);
            let z = rand.next_bounded_int(16);
            layer.vein.generate(world, base + IVec3::new(x, y, z), rand);
        }
        debug!("generated {} veins of {}", layer.veins_per_chunk, block::name(layer.vein.spec.ore_id));
    }

}


/// The standard overworld ore table, in generation order.
pub fn overworld_ores() -> Vec<OreLayer> {

    const fn uniform(id: u8, meta: u8, count: i32, veins: i32, max: i32) -> OreLayer {
        OreLayer {
            vein: OreVeinGenerator {
                spec: OreVeinSpec { host: block::STONE, ore_id: id, ore_meta: meta, count },
            },
            veins_per_chunk: veins,
            distribution: OreDistribution::Uniform { min: 0, max },
        }
    }

    vec![
        uniform(block::DIRT, 0, 33, 10, 256),
        uniform(block::GRAVEL, 0, 33, 8, 256),
        uniform(block::STONE, 3, 33, 10, 80),   // Diorite
        uniform(block::STONE, 1, 33, 10, 80),   // Granite
        uniform(block::STONE, 5, 33, 10, 80),   // Andesite
        uniform(block::COAL_ORE, 0, 17, 20, 128),
        uniform(block::IRON_ORE, 0, 9, 20, 64),
        uniform(block::GOLD_ORE, 0, 9, 2, 32),
        uniform(block::REDSTONE_ORE, 0, 8, 8, 16),
        uniform(block::DIAMOND_ORE, 0, 8, 1, 16),
        OreLayer {
            vein: OreVeinGenerator {
                spec: OreVeinSpec { host: block::STONE, ore_id: block::LAPIS_ORE, ore_meta: 0, count: 7 },
            },
            veins_per_chunk: 1,
            distribution: OreDistribution::Triangular { center: 16, spread: 16 },
        },
    ]

}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::gen::testutil::stone_world;

    #[test]
    fn spec_validation() {
        assert_eq!(OreVeinSpec::new_ore(block::COAL_ORE, 0, 0), Err(FeatureConfigError::EmptyVein));
        assert_eq!(OreVeinSpec::new_ore(block::COAL_ORE, 16, 8), Err(FeatureConfigError::MetadataOutOfRange(16)));
        let spec = OreVeinSpec::new_ore(block::COAL_ORE, 0, 17).unwrap();
        assert_eq!(spec.host(), block::STONE);
        assert_eq!(spec.ore(), (block::COAL_ORE, 0));
        assert_eq!(OreLayer::new(spec, 0, OreDistribution::Uniform { min: 0, max: 10 }).unwrap_err(), FeatureConfigError::NoVeins(0));
        assert_eq!(OreLayer::new(spec, 1, OreDistribution::Triangular { center: 16, spread: 0 }).unwrap_err(), FeatureConfigError::EmptySpread(0));
    }

    #[test]
    fn only_replaces_host() {

        let mut world = stone_world();
        // Some dirt right in the middle of the vein.
        for x in 6..11 {
            world.place_block(IVec3::new(x, 40, 8), block::DIRT, 0);
        }
        world.clear();

        let vein = OreVeinGenerator::new(OreVeinSpec::new_ore(block::IRON_ORE, 0, 9).unwrap());
        for seed in 0..16 {
            let mut rand = JavaRandom::new(seed);
            assert!(vein.generate(&mut world, IVec3::new(0, 40, 0), &mut rand));
        }

        assert!(!world.writes().is_empty());
        for write in world.writes() {
            assert_eq!(write.prev.0, block::STONE, "{write:?}");
            assert_eq!(write.id, block::IRON_ORE);
        }

    }

    #[test]
    fn no_write_below_zero() {
        let mut world = stone_world();
        let vein = OreVeinGenerator::new(OreVeinSpec::new_ore(block::DIAMOND_ORE, 0, 8).unwrap());
        for seed in 0..32 {
            let mut rand = JavaRandom::new(seed);
            vein.generate(&mut world, IVec3::new(0, 0, 0), &mut rand);
        }
        assert!(world.writes().iter().all(|w| w.pos.y >= 0));
    }

    #[test]
    fn triangular_range() {
        let mut rand = JavaRandom::new(9);
        let dist = OreDistribution::Triangular { center: 16, spread: 16 };
        for _ in 0..1000 {
            let y = dist.next_y(&mut rand);
            assert!((0..=30).contains(&y));
        }
        let dist = OreDistribution::Uniform { min: 20, max: 20 };
        for _ in 0..100 {
            assert_eq!(dist.next_y(&mut rand), 20);
        }
        let dist = OreDistribution::Uniform { min: 30, max: 10 };
        for _ in 0..1000 {
            assert!((10..30).contains(&dist.next_y(&mut rand)));
        }
    }

    #[test]
    fn chunk_distribution() {
        let mut world = stone_world();
        let mut rand = JavaRandom::new(1234);
        generate_ore_in_chunk(&mut world, &mut rand, 32, -16, &overworld_ores());
        let mut found_coal = false;
        for write in world.writes() {
            // Stone variants keep the stone id, so later veins may still replace them.
            assert_eq!(write.prev.0, block::STONE);
            found_coal |= write.id == block::COAL_ORE;
        }
        assert!(found_coal);
    }

}
