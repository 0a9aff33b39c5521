//! Block enumeration and functions to query block names.
//!
//! Numeric ids follow the pocket edition numbering, only blocks read or written by
//! the feature generators are listed.

use std::collections::HashMap;

use once_cell::sync::Lazy;

// Block behaviors.
pub mod material;

mod set;
pub use set::BlockSet;

pub mod plant;


/// Internal macro to easily define blocks registry.
macro_rules! blocks {
    (
        $($ident:ident / $id:literal : $name:literal),* $(,)?
    ) => {

        static NAMES: [&'static str; 256] = {
            let mut arr = [""; 256];
            $(arr[$id as usize] = $name;)*
            arr
        };

        $(pub const $ident: u8 = $id;)*

    };
}

blocks! {
    AIR/0:                  "air",
    STONE/1:                "stone",
    GRASS/2:                "grass",
    DIRT/3:                 "dirt",
    COBBLESTONE/4:          "cobblestone",
    SAPLING/6:              "sapling",
    WATER/8:                "flowing_water",
    STILL_WATER/9:          "water",
    LAVA/10:                "flowing_lava",
    STILL_LAVA/11:          "lava",
    SAND/12:                "sand",
    GRAVEL/13:              "gravel",
    GOLD_ORE/14:            "gold_ore",
    IRON_ORE/15:            "iron_ore",
    COAL_ORE/16:            "coal_ore",
    LOG/17:                 "log",
    LEAVES/18:              "leaves",
    LAPIS_ORE/21:           "lapis_ore",
    TALL_GRASS/31:          "tall_grass",
    DEAD_BUSH/32:           "dead_bush",
    DANDELION/37:           "dandelion",
    RED_FLOWER/38:          "red_flower",
    BROWN_MUSHROOM/39:      "brown_mushroom",
    RED_MUSHROOM/40:        "red_mushroom",
    MOSS_STONE/48:          "moss_stone",
    MONSTER_SPAWNER/52:     "monster_spawner",
    CHEST/54:               "chest",
    DIAMOND_ORE/56:         "diamond_ore",
    FARMLAND/60:            "farmland",
    REDSTONE_ORE/73:        "redstone_ore",
    SNOW_LAYER/78:          "snow_layer",
    ICE/79:                 "ice",
    SNOW_BLOCK/80:          "snow_block",
    CACTUS/81:              "cactus",
    CLAY/82:                "clay",
    SUGAR_CANES/83:         "sugar_canes",
    PUMPKIN/86:             "pumpkin",
    BROWN_MUSHROOM_BLOCK/99: "brown_mushroom_block",
    RED_MUSHROOM_BLOCK/100: "red_mushroom_block",
    VINE/106:               "vine",
    MYCELIUM/110:           "mycelium",
    WATER_LILY/111:         "water_lily",
    EMERALD_ORE/129:        "emerald_ore",
    STAINED_CLAY/159:       "stained_clay",
    LEAVES2/161:            "leaves2",
    WOOD2/162:              "wood2",
    HARDENED_CLAY/172:      "hardened_clay",
    PACKED_ICE/174:         "packed_ice",
    DOUBLE_PLANT/175:       "double_plant",
    PODZOL/243:             "podzol",
}

/// Reverse lookup table, built on first use and never mutated afterward.
static IDS: Lazy<HashMap<&'static str, u8>> = Lazy::new(|| {
    NAMES.iter()
        .enumerate()
        .filter(|(_, name)| !name.is_empty())
        .map(|(id, &name)| (name, id as u8))
        .collect()
});

/// Find a block name from its id, empty if the id is unknown.
#[inline]
pub const fn name(id: u8) -> &'static str {
    NAMES[id as usize]
}

/// Find a block id from its name.
pub fn from_name(name: &str) -> Option<u8> {
    IDS.get(name).copied()
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn name_round_trip() {
        assert_eq!(name(LEAVES2), "leaves2");
        assert_eq!(from_name("podzol"), Some(PODZOL));
        assert_eq!(from_name("air"), Some(AIR));
        assert_eq!(from_name("bedrock"), None);
        assert_eq!(from_name(""), None);
    }

}
