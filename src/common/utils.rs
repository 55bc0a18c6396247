//! Scalar math utilities.
//!
//! Angle constants and conversions, small generic numeric helpers and the
//! bit-counting helpers used when sizing aligned buffers.

use crate::vector::Vec3;
use std::ops::{BitAnd, Mul, Sub};

pub const PI: f32 = std::f32::consts::PI;
pub const INV_PI: f32 = 1.0 / PI;
pub const TWO_PI: f32 = PI * 2.0;
pub const HALF_PI: f32 = std::f32::consts::FRAC_PI_2;
pub const QUARTER_PI: f32 = std::f32::consts::FRAC_PI_4;
pub const F_INFINITY: f32 = f32::INFINITY;

#[inline]
pub const fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * (PI / 180.0)
}

#[inline]
pub const fn radians_to_degrees(radians: f32) -> f32 {
    radians * (180.0 / PI)
}

/// Wrap an angle in radians into `[-PI, PI]`.
///
/// Angles already in range come back unchanged. Infinite and NaN angles
/// return NaN.
#[inline]
pub fn center_angle_around_zero(radians: f32) -> f32 {
    if (-PI..=PI).contains(&radians) {
        return radians;
    }
    let wrapped = radians.rem_euclid(TWO_PI);
    let centered = if wrapped > PI { wrapped - TWO_PI } else { wrapped };
    debug_assert!(centered.is_nan() || (-PI..=PI).contains(&centered));
    centered
}

/// Clamp `value` into `[min, max]`. Works for floats, unlike [`Ord::clamp`].
#[inline]
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    let value = if value < min { min } else { value };
    if value > max { max } else { value }
}

#[inline]
pub fn square<T: Mul<Output = T> + Copy>(value: T) -> T {
    value * value
}

#[inline]
pub fn cubed<T: Mul<Output = T> + Copy>(value: T) -> T {
    value * value * value
}

/// `-1` for negative input, `1` otherwise (zero counts as positive)
#[inline]
pub fn sign(value: f32) -> f32 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

/// True for powers of two. Zero also passes, matching the bit trick.
#[inline]
pub fn is_power_of_2<T>(value: T) -> bool
where
    T: BitAnd<Output = T> + Sub<Output = T> + PartialEq + Copy + From<u8>,
{
    value == T::from(0) || (value & (value - T::from(1))) == T::from(0)
}

/// Round `value` up to a multiple of `alignment`, which must be a power of two.
#[inline]
pub fn align_up(value: usize, alignment: usize) -> usize {
    debug_assert!(is_power_of_2(alignment));
    (value + alignment - 1) & !(alignment - 1)
}

/// Check that `value` is a multiple of `alignment`, which must be a power of two.
#[inline]
pub fn is_aligned(value: usize, alignment: usize) -> bool {
    debug_assert!(is_power_of_2(alignment));
    value & (alignment - 1) == 0
}

#[inline]
pub const fn count_trailing_zeros(value: u32) -> u32 {
    value.trailing_zeros()
}

#[inline]
pub const fn count_leading_zeros(value: u32) -> u32 {
    value.leading_zeros()
}

#[inline]
pub const fn count_bits(value: u32) -> u32 {
    value.count_ones()
}

/// Next power of two at or above `value`; 0 and 1 both give 1.
#[inline]
pub const fn next_power_of_2(value: u32) -> u32 {
    if value <= 1 {
        1
    } else {
        1 << (32 - count_leading_zeros(value - 1))
    }
}

/// Linear interpolation, `start` at `t == 0` and `end` at `t == 1`.
#[inline]
pub fn lerp(start: Vec3, end: Vec3, t: f32) -> Vec3 {
    start * (1.0 - t) + end * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angle_conversions() {
        assert_relative_eq!(degrees_to_radians(180.0), PI);
        assert_relative_eq!(radians_to_degrees(HALF_PI), 90.0);
        assert_relative_eq!(INV_PI * PI, 1.0);
    }

    #[test]
    fn test_center_angle_around_zero() {
        assert_relative_eq!(center_angle_around_zero(3.0 * PI), PI, epsilon = 1e-5);
        assert_relative_eq!(center_angle_around_zero(-1.5 * PI), HALF_PI, epsilon = 1e-5);
        assert_eq!(center_angle_around_zero(0.25), 0.25);
        assert_eq!(center_angle_around_zero(-PI), -PI);
        assert_relative_eq!(center_angle_around_zero(-3.0 * PI).abs(), PI, epsilon = 1e-5);
        assert_relative_eq!(center_angle_around_zero(5.0), 5.0 - TWO_PI, epsilon = 1e-6);
    }

    #[test]
    fn test_center_angle_non_finite_returns_nan() {
        assert!(center_angle_around_zero(f32::INFINITY).is_nan());
        assert!(center_angle_around_zero(f32::NEG_INFINITY).is_nan());
        assert!(center_angle_around_zero(f32::NAN).is_nan());
    }

    #[test]
    fn test_center_angle_large_magnitudes() {
        for radians in [1.0e7f32, -1.0e7, 3.0e38, -3.0e38] {
            let centered = center_angle_around_zero(radians);
            assert!((-PI..=PI).contains(&centered), "{radians} -> {centered}");
        }
    }

    #[test]
    fn test_numeric_helpers() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5, 0, 10), 0);
        assert_eq!(square(3), 9);
        assert_eq!(cubed(2.0), 8.0);
        assert_eq!(sign(-0.5), -1.0);
        assert_eq!(sign(0.0), 1.0);
    }

    #[test]
    fn test_bit_helpers() {
        assert!(is_power_of_2(16u32));
        assert!(!is_power_of_2(12u32));
        assert_eq!(align_up(13, 16), 16);
        assert_eq!(align_up(32, 16), 32);
        assert!(is_aligned(48, 16));
        assert!(!is_aligned(50, 16));
        assert_eq!(count_trailing_zeros(0b1000), 3);
        assert_eq!(count_trailing_zeros(0), 32);
        assert_eq!(count_leading_zeros(1), 31);
        assert_eq!(count_bits(0b1011), 3);
        assert_eq!(next_power_of_2(0), 1);
        assert_eq!(next_power_of_2(17), 32);
        assert_eq!(next_power_of_2(64), 64);
    }

    #[test]
    fn test_lerp() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(2.0, 4.0, 6.0);
        assert_eq!(lerp(a, b, 0.5), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(lerp(a, b, 0.0), a);
    }
}
