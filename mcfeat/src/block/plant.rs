//! Decorative plant variants.

use crate::block;


/// Flower variants of the red flower block.
pub mod flower {
    pub const POPPY: u8 = 0;
    pub const BLUE_ORCHID: u8 = 1;
    pub const ALLIUM: u8 = 2;
    pub const AZURE_BLUET: u8 = 3;
    pub const RED_TULIP: u8 = 4;
    pub const ORANGE_TULIP: u8 = 5;
    pub const WHITE_TULIP: u8 = 6;
    pub const PINK_TULIP: u8 = 7;
    pub const OXEYE_DAISY: u8 = 8;
}

/// Variants of the two blocks tall double plant.
pub mod double_plant {
    pub const SUNFLOWER: u8 = 0;
    pub const LILAC: u8 = 1;
    pub const GRASS: u8 = 2;
    pub const FERN: u8 = 3;
    pub const ROSE_BUSH: u8 = 4;
    pub const PEONY: u8 = 5;
    /// Bit set on the metadata of the upper half.
    pub const UPPER_BIT: u8 = 8;
}


/// A block and metadata pair describing a plant to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlantType {
    id: u8,
    meta: u8,
}

impl PlantType {

    /// Create a new plant type, the metadata is masked to 4 bits.
    #[inline]
    pub const fn new(id: u8, meta: u8) -> Self {
        Self { id, meta: meta & 0xF }
    }

    #[inline]
    pub const fn flower(meta: u8) -> Self {
        Self::new(block::RED_FLOWER, meta)
    }

    #[inline]
    pub const fn dandelion() -> Self {
        Self::new(block::DANDELION, 0)
    }

    #[inline]
    pub const fn id(self) -> u8 {
        self.id
    }

    #[inline]
    pub const fn meta(self) -> u8 {
        self.meta
    }

}


/// Select the flower that grows where the given noise value is sampled, the value is
/// clamped to `-1.0..=1.0`.
pub fn flower_for_noise(noise: f64) -> PlantType {

    let n = noise.clamp(-1.0, 1.0);

    let meta = if n < -0.8 {
        flower::WHITE_TULIP
    } else if n < -0.6 {
        flower::ORANGE_TULIP
    } else if n < -0.4 {
        flower::RED_TULIP
    } else if n < -0.2 {
        flower::PINK_TULIP
    } else if n < 0.0 {
        flower::OXEYE_DAISY
    } else if n < 0.2 {
        flower::POPPY
    } else if n < 0.4 {
        flower::ALLIUM
    } else if n < 0.6 {
        flower::AZURE_BLUET
    } else if n < 0.8 {
        flower::RED_TULIP
    } else {
        return PlantType::dandelion();
    };

    PlantType::flower(meta)

}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn meta_masked() {
        let plant = PlantType::new(block::TALL_GRASS, 0x1F);
        assert_eq!(plant.meta(), 0xF);
        assert_eq!(plant.id(), block::TALL_GRASS);
    }

    #[test]
    fn noise_thresholds() {
        assert_eq!(flower_for_noise(-5.0), PlantType::flower(flower::WHITE_TULIP));
        assert_eq!(flower_for_noise(-0.7), PlantType::flower(flower::ORANGE_TULIP));
        assert_eq!(flower_for_noise(-0.1), PlantType::flower(flower::OXEYE_DAISY));
        assert_eq!(flower_for_noise(0.0), PlantType::flower(flower::POPPY));
        assert_eq!(flower_for_noise(0.5), PlantType::flower(flower::AZURE_BLUET));
        assert_eq!(flower_for_noise(0.7), PlantType::flower(flower::RED_TULIP));
        assert_eq!(flower_for_noise(0.8), PlantType::dandelion());
        assert_eq!(flower_for_noise(3.0), PlantType::dandelion());
    }

}
