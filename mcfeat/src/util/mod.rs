//! Various math utilities.

mod rand;
mod face;
pub mod math;

pub use rand::JavaRandom;
pub use face::Face;
