//! SIMD vector types.
//!
//! - [`Vec4`]: four float lanes.
//! - [`Vec3`]: same register as `Vec4`, with lane 3 kept equal to lane 2 so a
//!   stray read of the unused lane never divides by zero.
//! - [`UVec4`]: four `u32` lanes, used both as integers and as masks. A mask
//!   lane is true when its highest bit is set.
//! - [`Vec8`] / [`UVec8`]: eight lanes built from two 4-lane halves.
//!
//! All of them are plain `Copy` values over lane arrays; the instruction set
//! is picked at compile time by `crate::common::simd`.
//!
//! Swizzles take compile-time lane indices:
//!
//! ```
//! use topia_math::{Vec4, SWIZZLE_W, SWIZZLE_X, SWIZZLE_Y, SWIZZLE_Z};
//!
//! let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
//! let r = v.swizzle::<SWIZZLE_W, SWIZZLE_Z, SWIZZLE_Y, SWIZZLE_X>();
//! assert_eq!(r, Vec4::new(4.0, 3.0, 2.0, 1.0));
//! ```

mod mask;
mod uvec4;
mod uvec8;
mod vec3;
mod vec4;
mod vec8;

pub use mask::LaneMask;
pub use uvec4::UVec4;
pub use uvec8::UVec8;
pub use vec3::Vec3;
pub use vec4::{DEFAULT_CLOSE_TOLERANCE_SQ, DEFAULT_NORMALIZED_TOLERANCE, Vec4};
pub use vec8::Vec8;

/// Swizzle source lane X
pub const SWIZZLE_X: u32 = 0;
/// Swizzle source lane Y
pub const SWIZZLE_Y: u32 = 1;
/// Swizzle source lane Z
pub const SWIZZLE_Z: u32 = 2;
/// Swizzle source lane W
pub const SWIZZLE_W: u32 = 3;
/// Placeholder for a lane whose value does not matter
pub const SWIZZLE_UNUSED: u32 = 2;

/// Permute four lanes by compile-time indices.
#[inline(always)]
pub(crate) fn swizzle_lanes<T: Copy, const X: u32, const Y: u32, const Z: u32, const W: u32>(
    lanes: [T; 4],
) -> [T; 4] {
    const {
        assert!(
            X < 4 && Y < 4 && Z < 4 && W < 4,
            "swizzle lane index must be below 4"
        )
    };
    [
        lanes[X as usize],
        lanes[Y as usize],
        lanes[Z as usize],
        lanes[W as usize],
    ]
}

/// Apply the same 4-lane swizzle to both halves of an 8-lane array.
#[inline(always)]
pub(crate) fn swizzle_halves<T: Copy, const X: u32, const Y: u32, const Z: u32, const W: u32>(
    lanes: [T; 8],
) -> [T; 8] {
    const {
        assert!(
            X < 4 && Y < 4 && Z < 4 && W < 4,
            "swizzle lane index must be below 4"
        )
    };
    [
        lanes[X as usize],
        lanes[Y as usize],
        lanes[Z as usize],
        lanes[W as usize],
        lanes[4 + X as usize],
        lanes[4 + Y as usize],
        lanes[4 + Z as usize],
        lanes[4 + W as usize],
    ]
}
