//! Deterministic world feature generation for Minecraft-like voxel worlds.
//!
//! Every generator reproduces the random draws of the Notchian implementation, so a
//! given seed places exactly the same trees, ores, lakes and plants.

pub mod util;
pub mod geom;

pub mod block;

pub mod chunk;
pub mod world;
pub mod config;
pub mod gen;
