use super::{
    LaneMask, SWIZZLE_UNUSED, SWIZZLE_W, SWIZZLE_X, SWIZZLE_Y, SWIZZLE_Z, UVec4, Vec3,
    swizzle_lanes,
};
use crate::common::error::{Error, Result};
use crate::common::layout::check_alignment;
use crate::common::simd::{Active, Backend, from_bits, to_bits};
use crate::float::Float4;
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// Default squared distance below which two vectors count as close
pub const DEFAULT_CLOSE_TOLERANCE_SQ: f32 = 1.0e-12;

/// Default tolerance on `length_sq() - 1` for a vector to count as normalized
pub const DEFAULT_NORMALIZED_TOLERANCE: f32 = 1.0e-6;

const SIGN_BIT: u32 = 0x8000_0000;

/// Four float lanes in one 16-byte aligned register.
#[derive(Debug, Clone, Copy, Default)]
#[repr(C, align(16))]
pub struct Vec4 {
    lanes: [f32; 4],
}

const _: () = assert!(std::mem::size_of::<Vec4>() == 16);
const _: () = assert!(std::mem::align_of::<Vec4>() == 16);

impl Vec4 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self {
            lanes: [x, y, z, w],
        }
    }

    #[inline(always)]
    pub(crate) const fn from_lanes(lanes: [f32; 4]) -> Self {
        Self { lanes }
    }

    #[inline(always)]
    pub(crate) const fn lanes(self) -> [f32; 4] {
        self.lanes
    }

    /// Extend a `Vec3` with an explicit W
    #[inline]
    pub fn from_vec3(v: Vec3, w: f32) -> Self {
        Self::new(v.x(), v.y(), v.z(), w)
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::replicate(0.0)
    }

    #[inline]
    pub const fn nan() -> Self {
        Self::replicate(f32::NAN)
    }

    #[inline]
    pub const fn replicate(v: f32) -> Self {
        Self { lanes: [v; 4] }
    }

    #[inline]
    pub fn load_float4(v: &Float4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }

    /// Load 4 floats from a 16-byte aligned address.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading a `Float4` and aligned to 16 bytes.
    #[inline]
    pub unsafe fn load_float4_aligned(ptr: *const Float4) -> Self {
        debug_assert!(ptr as usize % 16 == 0, "load_float4_aligned on unaligned address");
        unsafe { ptr.cast::<Vec4>().read() }
    }

    /// Checked form of [`Vec4::load_float4_aligned`].
    pub fn try_load_float4_aligned(v: &Float4) -> Result<Self> {
        check_alignment(v as *const Float4, 16)?;
        // SAFETY: `v` is a valid reference and the alignment was just checked.
        Ok(unsafe { Self::load_float4_aligned(v) })
    }

    /// Gather 4 floats, lane i read from `base + offsets[i] * SCALE` bytes.
    ///
    /// # Safety
    ///
    /// Every gathered address must be valid for an unaligned 4-byte read.
    #[inline]
    pub unsafe fn gather_float4<const SCALE: usize>(base: *const f32, offsets: UVec4) -> Self {
        let offsets = offsets.to_array();
        let bytes = base.cast::<u8>();
        let read = |i: usize| unsafe {
            bytes
                .add(offsets[i] as usize * SCALE)
                .cast::<f32>()
                .read_unaligned()
        };
        Self::new(read(0), read(1), read(2), read(3))
    }

    /// Checked form of [`Vec4::gather_float4`] over a slice.
    ///
    /// Fails with [`Error::IndexOutOfBounds`] when a scaled offset reaches past
    /// the end of `base`.
    pub fn try_gather_float4<const SCALE: usize>(base: &[f32], offsets: UVec4) -> Result<Self> {
        let len_bytes = std::mem::size_of_val(base);
        for offset in offsets.to_array() {
            let end = (offset as usize)
                .checked_mul(SCALE)
                .and_then(|start| start.checked_add(4));
            if !matches!(end, Some(end) if end <= len_bytes) {
                log::debug!(
                    "rejected gather offset {offset} (scale {SCALE}) over {} floats",
                    base.len()
                );
                return Err(Error::IndexOutOfBounds {
                    index: (offset as usize).saturating_mul(SCALE) / 4,
                    len: base.len(),
                });
            }
        }
        // SAFETY: every lane's 4-byte read was bounds checked against `base` above.
        Ok(unsafe { Self::gather_float4::<SCALE>(base.as_ptr(), offsets) })
    }

    // ------------------------------------------------------------------
    // Lane-wise statics
    // ------------------------------------------------------------------

    #[inline]
    pub fn min(a: Vec4, b: Vec4) -> Vec4 {
        Self::from_lanes(Active::min_f32(a.lanes, b.lanes))
    }

    #[inline]
    pub fn max(a: Vec4, b: Vec4) -> Vec4 {
        Self::from_lanes(Active::max_f32(a.lanes, b.lanes))
    }

    #[inline]
    pub fn equals(a: Vec4, b: Vec4) -> UVec4 {
        UVec4::from_lanes(Active::eq_f32(a.lanes, b.lanes))
    }

    #[inline]
    pub fn less(a: Vec4, b: Vec4) -> UVec4 {
        UVec4::from_lanes(Active::lt_f32(a.lanes, b.lanes))
    }

    #[inline]
    pub fn less_or_equal(a: Vec4, b: Vec4) -> UVec4 {
        UVec4::from_lanes(Active::le_f32(a.lanes, b.lanes))
    }

    #[inline]
    pub fn greater(a: Vec4, b: Vec4) -> UVec4 {
        UVec4::from_lanes(Active::gt_f32(a.lanes, b.lanes))
    }

    #[inline]
    pub fn greater_or_equal(a: Vec4, b: Vec4) -> UVec4 {
        UVec4::from_lanes(Active::ge_f32(a.lanes, b.lanes))
    }

    /// `mul1 * mul2 + add`, fused on targets with FMA
    #[inline]
    pub fn fused_multiply_add(mul1: Vec4, mul2: Vec4, add: Vec4) -> Vec4 {
        Self::from_lanes(Active::mul_add_f32(mul1.lanes, mul2.lanes, add.lanes))
    }

    /// Lane-wise `v2` where the control lane's highest bit is set, `v1` otherwise.
    #[inline]
    pub fn select(v1: Vec4, v2: Vec4, control: UVec4) -> Vec4 {
        Self::from_lanes(Active::select_f32(v1.lanes, v2.lanes, control.lanes()))
    }

    /// Bitwise or of the float bit patterns
    #[inline]
    pub fn or(a: Vec4, b: Vec4) -> Vec4 {
        Self::from_lanes(from_bits(Active::or_u32(to_bits(a.lanes), to_bits(b.lanes))))
    }

    /// Bitwise xor of the float bit patterns
    #[inline]
    pub fn xor(a: Vec4, b: Vec4) -> Vec4 {
        Self::from_lanes(from_bits(Active::xor_u32(to_bits(a.lanes), to_bits(b.lanes))))
    }

    /// Bitwise and of the float bit patterns
    #[inline]
    pub fn and(a: Vec4, b: Vec4) -> Vec4 {
        Self::from_lanes(from_bits(Active::and_u32(to_bits(a.lanes), to_bits(b.lanes))))
    }

    /// Sort the lanes of `value` ascending and apply the same permutation to
    /// `index`.
    ///
    /// Five compare-and-swap steps in three passes: (0,2)(1,3), (0,1)(2,3),
    /// (1,2). Equal values are never swapped.
    pub fn sort4(value: &mut Vec4, index: &mut UVec4) {
        Self::sort4_by(value, index, Vec4::less);
    }

    /// Like [`Vec4::sort4`] but highest value first.
    pub fn sort4_reverse(value: &mut Vec4, index: &mut UVec4) {
        Self::sort4_by(value, index, Vec4::greater);
    }

    #[inline(always)]
    fn sort4_by(value: &mut Vec4, index: &mut UVec4, swap: impl Fn(Vec4, Vec4) -> UVec4) {
        // Pass 1: lane 0 against 2, lane 1 against 3
        let v1 = value.swizzle::<SWIZZLE_Z, SWIZZLE_W, SWIZZLE_X, SWIZZLE_Y>();
        let i1 = index.swizzle::<SWIZZLE_Z, SWIZZLE_W, SWIZZLE_X, SWIZZLE_Y>();
        let c1 = swap(*value, v1).swizzle::<SWIZZLE_Z, SWIZZLE_W, SWIZZLE_Z, SWIZZLE_W>();
        *value = Vec4::select(*value, v1, c1);
        *index = UVec4::select(*index, i1, c1);

        // Pass 2: lane 0 against 1, lane 2 against 3
        let v2 = value.swizzle::<SWIZZLE_Y, SWIZZLE_X, SWIZZLE_W, SWIZZLE_Z>();
        let i2 = index.swizzle::<SWIZZLE_Y, SWIZZLE_X, SWIZZLE_W, SWIZZLE_Z>();
        let c2 = swap(*value, v2).swizzle::<SWIZZLE_Y, SWIZZLE_Y, SWIZZLE_W, SWIZZLE_W>();
        *value = Vec4::select(*value, v2, c2);
        *index = UVec4::select(*index, i2, c2);

        // Pass 3: lane 1 against 2
        let v3 = value.swizzle::<SWIZZLE_X, SWIZZLE_Z, SWIZZLE_Y, SWIZZLE_W>();
        let i3 = index.swizzle::<SWIZZLE_X, SWIZZLE_Z, SWIZZLE_Y, SWIZZLE_W>();
        let c3 = swap(*value, v3).swizzle::<SWIZZLE_X, SWIZZLE_Z, SWIZZLE_Z, SWIZZLE_W>();
        *value = Vec4::select(*value, v3, c3);
        *index = UVec4::select(*index, i3, c3);
    }

    // ------------------------------------------------------------------
    // Components
    // ------------------------------------------------------------------

    #[inline]
    pub const fn x(self) -> f32 {
        self.lanes[0]
    }

    #[inline]
    pub const fn y(self) -> f32 {
        self.lanes[1]
    }

    #[inline]
    pub const fn z(self) -> f32 {
        self.lanes[2]
    }

    #[inline]
    pub const fn w(self) -> f32 {
        self.lanes[3]
    }

    #[inline]
    pub fn set_x(&mut self, x: f32) {
        self.lanes[0] = x;
    }

    #[inline]
    pub fn set_y(&mut self, y: f32) {
        self.lanes[1] = y;
    }

    #[inline]
    pub fn set_z(&mut self, z: f32) {
        self.lanes[2] = z;
    }

    #[inline]
    pub fn set_w(&mut self, w: f32) {
        self.lanes[3] = w;
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        self.lanes
    }

    // ------------------------------------------------------------------
    // Tests
    // ------------------------------------------------------------------

    /// Squared distance to `other` at most [`DEFAULT_CLOSE_TOLERANCE_SQ`]
    #[inline]
    pub fn is_close(self, other: Vec4) -> bool {
        self.is_close_within(other, DEFAULT_CLOSE_TOLERANCE_SQ)
    }

    #[inline]
    pub fn is_close_within(self, other: Vec4, max_dist_sq: f32) -> bool {
        (other - self).length_sq() <= max_dist_sq
    }

    #[inline]
    pub fn is_normalized(self) -> bool {
        self.is_normalized_within(DEFAULT_NORMALIZED_TOLERANCE)
    }

    #[inline]
    pub fn is_normalized_within(self, tolerance: f32) -> bool {
        (self.length_sq() - 1.0).abs() <= tolerance
    }

    #[inline]
    pub fn is_nan(self) -> bool {
        Active::sign_mask_u32(Active::eq_f32(self.lanes, self.lanes)) != 0b1111
    }

    // ------------------------------------------------------------------
    // Lane shuffles
    // ------------------------------------------------------------------

    /// Permute lanes; each parameter names the source lane (`SWIZZLE_X` ..
    /// `SWIZZLE_W`) for that position.
    #[inline]
    pub fn swizzle<const X: u32, const Y: u32, const Z: u32, const W: u32>(self) -> Vec4 {
        Self::from_lanes(swizzle_lanes::<f32, X, Y, Z, W>(self.lanes))
    }

    #[inline]
    pub fn splat_x(self) -> Vec4 {
        Self::replicate(self.lanes[0])
    }

    #[inline]
    pub fn splat_y(self) -> Vec4 {
        Self::replicate(self.lanes[1])
    }

    #[inline]
    pub fn splat_z(self) -> Vec4 {
        Self::replicate(self.lanes[2])
    }

    #[inline]
    pub fn splat_w(self) -> Vec4 {
        Self::replicate(self.lanes[3])
    }

    // ------------------------------------------------------------------
    // Math
    // ------------------------------------------------------------------

    #[inline]
    pub fn abs(self) -> Vec4 {
        Self::from_lanes(from_bits(Active::and_u32(
            to_bits(self.lanes),
            [!SIGN_BIT; 4],
        )))
    }

    #[inline]
    pub fn reciprocal(self) -> Vec4 {
        Self::replicate(1.0) / self
    }

    /// Dot product of all four lanes, broadcast to every lane
    #[inline]
    pub fn dot_v(self, other: Vec4) -> Vec4 {
        Self::from_lanes(Active::dot4_f32(self.lanes, other.lanes))
    }

    #[inline]
    pub fn dot(self, other: Vec4) -> f32 {
        Active::dot4_f32(self.lanes, other.lanes)[0]
    }

    #[inline]
    pub fn length_sq(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    /// `self / self.length()`; NaN lanes for a zero vector.
    #[inline]
    pub fn normalized(self) -> Vec4 {
        self / self.dot_v(self).sqrt()
    }

    #[inline]
    pub fn sqrt(self) -> Vec4 {
        Self::from_lanes(Active::sqrt_f32(self.lanes))
    }

    /// 1.0 for lanes with the sign bit clear, -1.0 otherwise (so -0.0 gives -1.0)
    #[inline]
    pub fn sign(self) -> Vec4 {
        Vec4::or(
            Vec4::and(self, Vec4::replicate(-1.0)),
            Vec4::replicate(1.0),
        )
    }

    /// Sine and cosine of every lane
    pub fn sin_cos(self) -> (Vec4, Vec4) {
        let pairs = self.lanes.map(f32::sin_cos);
        (
            Self::from_lanes(pairs.map(|(s, _)| s)),
            Self::from_lanes(pairs.map(|(_, c)| c)),
        )
    }

    #[inline]
    pub fn reduce_min(self) -> f32 {
        let v = Vec4::min(
            self,
            self.swizzle::<SWIZZLE_Y, SWIZZLE_UNUSED, SWIZZLE_W, SWIZZLE_UNUSED>(),
        );
        Vec4::min(
            v,
            v.swizzle::<SWIZZLE_Z, SWIZZLE_UNUSED, SWIZZLE_UNUSED, SWIZZLE_UNUSED>(),
        )
        .x()
    }

    #[inline]
    pub fn reduce_max(self) -> f32 {
        let v = Vec4::max(
            self,
            self.swizzle::<SWIZZLE_Y, SWIZZLE_UNUSED, SWIZZLE_W, SWIZZLE_UNUSED>(),
        );
        Vec4::max(
            v,
            v.swizzle::<SWIZZLE_Z, SWIZZLE_UNUSED, SWIZZLE_UNUSED, SWIZZLE_UNUSED>(),
        )
        .x()
    }

    // ------------------------------------------------------------------
    // Conversion and store
    // ------------------------------------------------------------------

    #[inline]
    pub fn store_float4(self, out: &mut Float4) {
        *out = Float4::from(self.lanes);
    }

    /// Store 4 floats to a 16-byte aligned address.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing a `Float4` and aligned to 16 bytes.
    #[inline]
    pub unsafe fn store_float4_aligned(self, ptr: *mut Float4) {
        debug_assert!(ptr as usize % 16 == 0, "store_float4_aligned on unaligned address");
        unsafe { ptr.cast::<Vec4>().write(self) }
    }

    /// Checked form of [`Vec4::store_float4_aligned`].
    pub fn try_store_float4_aligned(self, out: &mut Float4) -> Result<()> {
        check_alignment(out as *const Float4, 16)?;
        // SAFETY: `out` is a valid exclusive reference and the alignment was just checked.
        unsafe { self.store_float4_aligned(out) };
        Ok(())
    }

    /// Truncate each lane to a signed integer, returned as its `u32` bit pattern.
    #[inline]
    pub fn to_int(self) -> UVec4 {
        UVec4::from_lanes(Active::f32_to_i32(self.lanes))
    }

    #[inline]
    pub fn reinterpret_as_int(self) -> UVec4 {
        UVec4::from_lanes(to_bits(self.lanes))
    }

    /// Lanes whose sign bit is set
    #[inline]
    pub fn sign_bits(self) -> LaneMask {
        LaneMask::from_bits_truncate(Active::sign_mask_f32(self.lanes))
    }
}

impl From<Float4> for Vec4 {
    #[inline]
    fn from(v: Float4) -> Self {
        Self::load_float4(&v)
    }
}

impl From<Vec4> for Float4 {
    #[inline]
    fn from(v: Vec4) -> Self {
        Float4::from(v.lanes)
    }
}

impl From<[f32; 4]> for Vec4 {
    #[inline]
    fn from(lanes: [f32; 4]) -> Self {
        Self { lanes }
    }
}

/// W takes the shadow copy of Z.
impl From<Vec3> for Vec4 {
    #[inline]
    fn from(v: Vec3) -> Self {
        Self::from_lanes(v.lanes())
    }
}

impl Index<usize> for Vec4 {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &f32 {
        debug_assert!(index < 4, "Vec4 component {index} out of range");
        &self.lanes[index]
    }
}

impl IndexMut<usize> for Vec4 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        debug_assert!(index < 4, "Vec4 component {index} out of range");
        &mut self.lanes[index]
    }
}

impl PartialEq for Vec4 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        UVec4::from_lanes(Active::eq_f32(self.lanes, other.lanes)).test_all_true()
    }
}

impl Mul for Vec4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, rhs: Vec4) -> Vec4 {
        Self::from_lanes(Active::mul_f32(self.lanes, rhs.lanes))
    }
}

impl Mul<f32> for Vec4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, rhs: f32) -> Vec4 {
        Self::from_lanes(Active::mul_f32(self.lanes, [rhs; 4]))
    }
}

impl Mul<Vec4> for f32 {
    type Output = Vec4;

    #[inline]
    fn mul(self, rhs: Vec4) -> Vec4 {
        rhs * self
    }
}

impl MulAssign for Vec4 {
    #[inline]
    fn mul_assign(&mut self, rhs: Vec4) {
        *self = *self * rhs;
    }
}

impl MulAssign<f32> for Vec4 {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl Div for Vec4 {
    type Output = Vec4;

    #[inline]
    fn div(self, rhs: Vec4) -> Vec4 {
        Self::from_lanes(Active::div_f32(self.lanes, rhs.lanes))
    }
}

impl Div<f32> for Vec4 {
    type Output = Vec4;

    #[inline]
    fn div(self, rhs: f32) -> Vec4 {
        Self::from_lanes(Active::div_f32(self.lanes, [rhs; 4]))
    }
}

impl DivAssign<f32> for Vec4 {
    #[inline]
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

impl Add for Vec4 {
    type Output = Vec4;

    #[inline]
    fn add(self, rhs: Vec4) -> Vec4 {
        Self::from_lanes(Active::add_f32(self.lanes, rhs.lanes))
    }
}

impl AddAssign for Vec4 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec4) {
        *self = *self + rhs;
    }
}

impl Sub for Vec4 {
    type Output = Vec4;

    #[inline]
    fn sub(self, rhs: Vec4) -> Vec4 {
        Self::from_lanes(Active::sub_f32(self.lanes, rhs.lanes))
    }
}

impl SubAssign for Vec4 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec4) {
        *self = *self - rhs;
    }
}

impl Neg for Vec4 {
    type Output = Vec4;

    #[inline]
    fn neg(self) -> Vec4 {
        Self::from_lanes(from_bits(Active::xor_u32(
            to_bits(self.lanes),
            [SIGN_BIT; 4],
        )))
    }
}

impl fmt::Display for Vec4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z, w] = self.lanes;
        write!(f, "{x}, {y}, {z}, {w}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_components_and_index() {
        let mut v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!((v.x(), v.y(), v.z(), v.w()), (1.0, 2.0, 3.0, 4.0));
        v[2] = 7.0;
        v.set_w(9.0);
        assert_eq!(v.to_array(), [1.0, 2.0, 7.0, 9.0]);
        assert_eq!(v[3], 9.0);
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_range_panics() {
        let v = Vec4::zero();
        let _ = v[4];
    }

    #[test]
    fn test_arithmetic() {
        let a = Vec4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vec4::new(2.0, 4.0, 6.0, 8.0);
        assert_eq!(a + b, Vec4::new(3.0, 6.0, 9.0, 12.0));
        assert_eq!(b - a, a);
        assert_eq!(a * 2.0, b);
        assert_eq!(2.0 * a, b);
        assert_eq!(b / 2.0, a);
        assert_eq!(b / a, Vec4::replicate(2.0));
        assert_eq!(-a, Vec4::new(-1.0, -2.0, -3.0, -4.0));

        let mut c = a;
        c += b;
        c -= a;
        c *= 0.5;
        assert_eq!(c, a);
    }

    #[test]
    fn test_division_by_zero_is_not_guarded() {
        let v = Vec4::new(1.0, -1.0, 0.0, 2.0) / 0.0;
        assert_eq!(v.x(), f32::INFINITY);
        assert_eq!(v.y(), f32::NEG_INFINITY);
        assert!(v.z().is_nan());
        assert!(v.is_nan());
    }

    #[test]
    fn test_swizzle_and_splat() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(
            v.swizzle::<SWIZZLE_W, SWIZZLE_Z, SWIZZLE_Y, SWIZZLE_X>(),
            Vec4::new(4.0, 3.0, 2.0, 1.0)
        );
        assert_eq!(
            v.swizzle::<SWIZZLE_X, SWIZZLE_X, SWIZZLE_Y, SWIZZLE_Y>(),
            Vec4::new(1.0, 1.0, 2.0, 2.0)
        );
        assert_eq!(v.splat_z(), Vec4::replicate(3.0));
        assert_eq!(v.splat_w(), Vec4::replicate(4.0));
    }

    #[test]
    fn test_compare_and_select() {
        let a = Vec4::new(1.0, 5.0, 3.0, -2.0);
        let b = Vec4::new(2.0, 4.0, 3.0, -3.0);
        assert_eq!(
            Vec4::less(a, b).get_trues(),
            LaneMask::X
        );
        assert_eq!(
            Vec4::less_or_equal(a, b).get_trues(),
            LaneMask::X | LaneMask::Z
        );
        assert_eq!(
            Vec4::greater_or_equal(a, b).get_trues(),
            LaneMask::Y | LaneMask::Z | LaneMask::W
        );
        assert_eq!(Vec4::equals(a, b).get_trues(), LaneMask::Z);

        let picked = Vec4::select(a, b, Vec4::greater(a, b));
        assert_eq!(picked, Vec4::min(a, b));
        assert_eq!(Vec4::max(a, b), Vec4::new(2.0, 5.0, 3.0, -2.0));
    }

    #[test]
    fn test_select_ignores_low_bits() {
        let a = Vec4::zero();
        let b = Vec4::replicate(1.0);
        let control = UVec4::new(0x8000_0000, 0x7fff_ffff, 0x8000_0001, 1);
        assert_eq!(Vec4::select(a, b, control), Vec4::new(1.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn test_sort4_example() {
        let mut value = Vec4::new(3.0, 1.0, 4.0, 2.0);
        let mut index = UVec4::new(0, 1, 2, 3);
        Vec4::sort4(&mut value, &mut index);
        assert_eq!(value, Vec4::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(index, UVec4::new(1, 3, 0, 2));

        let mut value = Vec4::new(3.0, 1.0, 4.0, 2.0);
        let mut index = UVec4::new(0, 1, 2, 3);
        Vec4::sort4_reverse(&mut value, &mut index);
        assert_eq!(value, Vec4::new(4.0, 3.0, 2.0, 1.0));
        assert_eq!(index, UVec4::new(2, 0, 3, 1));
    }

    #[test]
    fn test_dot_length_normalize() {
        let v = Vec4::new(1.0, 2.0, 2.0, 4.0);
        assert_eq!(v.dot(v), 25.0);
        assert_eq!(v.dot_v(Vec4::replicate(1.0)), Vec4::replicate(9.0));
        assert_eq!(v.length(), 5.0);
        assert!(v.normalized().is_normalized());
        assert!(Vec4::zero().normalized().is_nan());
        assert!(!v.is_normalized());
    }

    #[test]
    fn test_is_close() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert!(v.is_close(v + Vec4::replicate(1.0e-7)));
        assert!(!v.is_close(v + Vec4::new(0.0, 0.0, 1.0e-3, 0.0)));
        assert!(v.is_close_within(v + Vec4::new(0.0, 0.0, 1.0e-3, 0.0), 1.0e-5));
    }

    #[test]
    fn test_abs_sign_and_sign_bits() {
        let v = Vec4::new(-1.5, 2.0, -0.0, 0.0);
        assert_eq!(v.abs(), Vec4::new(1.5, 2.0, 0.0, 0.0));
        assert_eq!(v.sign(), Vec4::new(-1.0, 1.0, -1.0, 1.0));
        assert_eq!(v.sign_bits(), LaneMask::X | LaneMask::Z);
    }

    #[test]
    fn test_reduce() {
        let v = Vec4::new(3.0, -1.0, 7.0, 2.0);
        assert_eq!(v.reduce_min(), -1.0);
        assert_eq!(v.reduce_max(), 7.0);
    }

    #[test]
    fn test_int_conversion_and_reinterpret() {
        let v = Vec4::new(1.9, -2.7, 0.0, 65536.0);
        assert_eq!(v.to_int(), UVec4::new(1, (-2i32) as u32, 0, 65536));
        assert_eq!(v.reinterpret_as_int().x(), 1.9f32.to_bits());
        assert_eq!(v.reinterpret_as_int().reinterpret_as_float(), v);
    }

    #[test]
    fn test_reciprocal_and_sqrt() {
        let v = Vec4::new(1.0, 4.0, 16.0, 0.25);
        assert_eq!(v.sqrt(), Vec4::new(1.0, 2.0, 4.0, 0.5));
        assert_eq!(v.reciprocal(), Vec4::new(1.0, 0.25, 0.0625, 4.0));
    }

    #[test]
    fn test_sin_cos() {
        let (s, c) = Vec4::new(0.0, crate::common::utils::HALF_PI, 1.0, -1.0).sin_cos();
        assert_relative_eq!(s.x(), 0.0);
        assert_relative_eq!(s.y(), 1.0);
        assert_relative_eq!(c.x(), 1.0);
        assert_relative_eq!(c.y(), 0.0, epsilon = 1e-6);
        assert_relative_eq!(s.z() * s.z() + c.z() * c.z(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_aligned_load_store() {
        let mut slot = Vec4::zero();
        let slot_ptr = (&mut slot as *mut Vec4).cast::<Float4>();
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        unsafe { v.store_float4_aligned(slot_ptr) };
        assert_eq!(slot, v);
        let loaded = unsafe { Vec4::load_float4_aligned(slot_ptr) };
        assert_eq!(loaded, v);

        let source = unsafe { &*slot_ptr };
        assert_eq!(Vec4::try_load_float4_aligned(source), Ok(v));
    }

    #[test]
    fn test_try_load_rejects_misaligned() {
        let storage = [Vec4::zero(); 2];
        let floats = unsafe { std::slice::from_raw_parts(storage.as_ptr().cast::<f32>(), 8) };
        let misaligned = unsafe { &*floats[1..].as_ptr().cast::<Float4>() };
        assert!(matches!(
            Vec4::try_load_float4_aligned(misaligned),
            Err(Error::Misaligned { required: 16, .. })
        ));
    }

    #[test]
    fn test_try_store_float4_aligned() {
        let mut storage = [Vec4::zero(); 2];
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);

        let aligned = unsafe { &mut *storage.as_mut_ptr().cast::<Float4>() };
        assert_eq!(v.try_store_float4_aligned(aligned), Ok(()));
        assert_eq!(storage[0], v);

        let misaligned = unsafe { &mut *storage.as_mut_ptr().cast::<f32>().add(1).cast::<Float4>() };
        assert!(matches!(
            v.try_store_float4_aligned(misaligned),
            Err(Error::Misaligned { required: 16, .. })
        ));
        assert_eq!(storage, [v, Vec4::zero()]);
    }

    #[test]
    fn test_gather() {
        let table: Vec<f32> = (0..16).map(|i| i as f32 * 10.0).collect();
        let v = Vec4::try_gather_float4::<4>(&table, UVec4::new(3, 0, 15, 8)).unwrap();
        assert_eq!(v, Vec4::new(30.0, 0.0, 150.0, 80.0));

        // SCALE in bytes: stride of two floats
        let v = Vec4::try_gather_float4::<8>(&table, UVec4::new(0, 1, 2, 7)).unwrap();
        assert_eq!(v, Vec4::new(0.0, 20.0, 40.0, 140.0));

        assert_eq!(
            Vec4::try_gather_float4::<4>(&table, UVec4::new(0, 1, 16, 2)),
            Err(Error::IndexOutOfBounds { index: 16, len: 16 })
        );
    }

    #[test]
    fn test_gather_error_reports_float_index() {
        let table = [0.0f32; 16];
        // 9 * 8 bytes lands on float 18
        assert_eq!(
            Vec4::try_gather_float4::<8>(&table, UVec4::new(0, 9, 1, 2)),
            Err(Error::IndexOutOfBounds { index: 18, len: 16 })
        );
        // 20 bytes lands on float 5, whose read ends at byte 24 of 16
        let short = [0.0f32; 4];
        assert_eq!(
            Vec4::try_gather_float4::<1>(&short, UVec4::new(0, 20, 0, 0)),
            Err(Error::IndexOutOfBounds { index: 5, len: 4 })
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Vec4::new(1.0, -2.0, 0.5, 3.0).to_string(), "1, -2, 0.5, 3");
    }

    fn finite() -> impl Strategy<Value = f32> {
        -1.0e3f32..1.0e3
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_sort4_sorts_and_tracks_indices(lanes in prop::array::uniform4(finite())) {
            let original = Vec4::from(lanes);
            let mut value = original;
            let mut index = UVec4::new(0, 1, 2, 3);
            Vec4::sort4(&mut value, &mut index);

            prop_assert!(value.x() <= value.y() && value.y() <= value.z() && value.z() <= value.w());
            let mut seen = index.to_array();
            seen.sort_unstable();
            prop_assert_eq!(seen, [0, 1, 2, 3]);
            for i in 0..4 {
                prop_assert_eq!(original[index[i] as usize], value[i]);
            }
        }

        #[test]
        fn prop_sort4_reverse_sorts_descending(lanes in prop::array::uniform4(finite())) {
            let original = Vec4::from(lanes);
            let mut value = original;
            let mut index = UVec4::new(0, 1, 2, 3);
            Vec4::sort4_reverse(&mut value, &mut index);

            prop_assert!(value.x() >= value.y() && value.y() >= value.z() && value.z() >= value.w());
            for i in 0..4 {
                prop_assert_eq!(original[index[i] as usize], value[i]);
            }
        }

        #[test]
        fn prop_store_load_bit_exact(bits in prop::array::uniform4(any::<u32>())) {
            let stored = Float4::from(bits.map(f32::from_bits));
            let mut out = Float4::default();
            Vec4::load_float4(&stored).store_float4(&mut out);
            prop_assert_eq!(out.to_array().map(f32::to_bits), bits);
        }

        #[test]
        fn prop_normalized_has_unit_length(lanes in prop::array::uniform4(finite())) {
            let v = Vec4::from(lanes);
            prop_assume!(v.length() > 1.0e-3);
            prop_assert!((v.normalized().length() - 1.0).abs() < 1.0e-5);
        }
    }
}
