//! # Utility Module
//!
//! Small numeric helpers shared by the layout planners.

use rand::Rng;

/// Clamps a value between a minimum and maximum.
///
/// # Examples
///
/// ```
/// use city_streets::utils::util::clamp;
///
/// assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
/// assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
/// assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
/// ```
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Draws uniformly from `[low, high)`, or returns `low` when the range is empty.
pub fn uniform_or_low<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    if low < high {
        rng.random_range(low..high)
    } else {
        low
    }
}

/// Derives an independent seed for item `index` of a seeded batch.
pub fn sub_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
