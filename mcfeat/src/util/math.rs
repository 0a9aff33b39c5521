//! Math utilities specialized for Minecraft, such as sin/cos precomputed tables, in order
//! to get the best parity with Minecraft generation.

use once_cell::sync::Lazy;


#[allow(clippy::approx_constant)]
pub const JAVA_PI: f64 = 3.141592653589793;

/// Number of entries in the sine table, one full turn.
const SIN_TABLE_LEN: usize = 65536;

static SIN_TABLE: Lazy<Box<[f32]>> = Lazy::new(|| {
    (0..SIN_TABLE_LEN)
        .map(|i| (i as f64 * JAVA_PI * 2.0 / SIN_TABLE_LEN as f64).sin() as f32)
        .collect()
});


#[inline]
fn sin_table(index: i32) -> f32 {
    SIN_TABLE[(index & 0xFFFF) as usize]
}

/// Computes the sine of a number (in radians) through the lookup table.
#[inline]
pub fn mc_sin(x: f32) -> f32 {
    sin_table((x * 10430.378) as i32)
}

/// Computes the cosine of a number (in radians) through the lookup table.
#[inline]
pub fn mc_cos(x: f32) -> f32 {
    sin_table((x * 10430.378 + 16384.0) as i32)
}

/// Floor a double to an integer the way Java's `MathHelper.floor` does.
#[inline]
pub fn java_floor(value: f64) -> i32 {
    let i = value as i32;
    if value < i as f64 { i - 1 } else { i }
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn table_quadrants() {
        assert_eq!(mc_sin(0.0), 0.0);
        assert_eq!(mc_cos(0.0), 1.0);
        assert!((mc_sin(JAVA_PI as f32 / 2.0) - 1.0).abs() < 1e-6);
        assert!((mc_cos(JAVA_PI as f32) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn negative_angles_wrap() {
        assert!((mc_sin(-JAVA_PI as f32 / 2.0) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn floor() {
        assert_eq!(java_floor(1.5), 1);
        assert_eq!(java_floor(-0.5), -1);
        assert_eq!(java_floor(-2.0), -2);
        assert_eq!(java_floor(3.0), 3);
    }

}
