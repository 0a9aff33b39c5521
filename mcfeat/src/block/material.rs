//! Fluid and soil predicates on block ids.

use crate::block;


/// Return true if the block is water, flowing or still.
#[inline]
pub fn is_water(id: u8) -> bool {
    matches!(id, block::WATER | block::STILL_WATER)
}

/// Return true if the block is lava, flowing or still.
#[inline]
pub fn is_lava(id: u8) -> bool {
    matches!(id, block::LAVA | block::STILL_LAVA)
}

/// Return true if the block is any fluid.
#[inline]
pub fn is_fluid(id: u8) -> bool {
    is_water(id) || is_lava(id)
}

/// Return true if the block is a grass or dirt soil.
#[inline]
pub fn is_grass_or_dirt(id: u8) -> bool {
    matches!(id, block::GRASS | block::DIRT)
}
