use super::{UVec4, Vec8, swizzle_halves};
use crate::common::simd::{Active, Backend, U32x8, join_u32, split_u32};
use std::ops::{Index, IndexMut};

/// Eight `u32` lanes, the 8-wide counterpart of [`UVec4`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(C, align(32))]
pub struct UVec8 {
    lanes: [u32; 8],
}

const _: () = assert!(std::mem::size_of::<UVec8>() == 32);
const _: () = assert!(std::mem::align_of::<UVec8>() == 32);

impl UVec8 {
    #[inline(always)]
    pub(crate) const fn from_lanes(lanes: U32x8) -> Self {
        Self { lanes }
    }

    #[inline(always)]
    pub(crate) const fn lanes(self) -> U32x8 {
        self.lanes
    }

    #[inline]
    pub fn from_halves(lo: UVec4, hi: UVec4) -> Self {
        Self::from_lanes(join_u32(lo.lanes(), hi.lanes()))
    }

    #[inline]
    pub const fn replicate(v: u32) -> Self {
        Self { lanes: [v; 8] }
    }

    #[inline]
    pub fn splat_x(v: UVec4) -> Self {
        Self::replicate(v.x())
    }

    #[inline]
    pub fn splat_y(v: UVec4) -> Self {
        Self::replicate(v.y())
    }

    #[inline]
    pub fn splat_z(v: UVec4) -> Self {
        Self::replicate(v.z())
    }

    #[inline]
    pub fn equals(a: UVec8, b: UVec8) -> UVec8 {
        Self::from_lanes(Active::eq_u32x8(a.lanes, b.lanes))
    }

    /// Lane-wise `v2` where the control lane's highest bit is set, `v1` otherwise.
    #[inline]
    pub fn select(v1: UVec8, v2: UVec8, control: UVec8) -> UVec8 {
        Self::from_lanes(Active::select_u32x8(v1.lanes, v2.lanes, control.lanes))
    }

    #[inline]
    pub fn or(a: UVec8, b: UVec8) -> UVec8 {
        Self::from_lanes(Active::or_u32x8(a.lanes, b.lanes))
    }

    #[inline]
    pub fn xor(a: UVec8, b: UVec8) -> UVec8 {
        Self::from_lanes(Active::xor_u32x8(a.lanes, b.lanes))
    }

    #[inline]
    pub fn and(a: UVec8, b: UVec8) -> UVec8 {
        Self::from_lanes(Active::and_u32x8(a.lanes, b.lanes))
    }

    /// Apply the same 4-lane swizzle to each half; lanes never cross halves.
    #[inline]
    pub fn swizzle<const X: u32, const Y: u32, const Z: u32, const W: u32>(self) -> UVec8 {
        Self::from_lanes(swizzle_halves::<u32, X, Y, Z, W>(self.lanes))
    }

    #[inline]
    pub fn test_any_true(self) -> bool {
        Active::sign_mask_u32x8(self.lanes) != 0
    }

    #[inline]
    pub fn test_all_true(self) -> bool {
        Active::sign_mask_u32x8(self.lanes) == 0xff
    }

    /// Number of lanes with the highest bit set
    #[inline]
    pub fn count_trues(self) -> u32 {
        Active::sign_mask_u32x8(self.lanes).count_ones()
    }

    #[inline]
    pub fn lower_vec4(self) -> UVec4 {
        UVec4::from_lanes(split_u32(self.lanes).0)
    }

    #[inline]
    pub fn upper_vec4(self) -> UVec4 {
        UVec4::from_lanes(split_u32(self.lanes).1)
    }

    /// Convert each lane, read as a signed integer, to a float
    #[inline]
    pub fn to_float(self) -> Vec8 {
        Vec8::from_lanes(Active::i32_to_f32x8(self.lanes))
    }

    #[inline]
    pub fn logical_shift_left<const COUNT: u32>(self) -> UVec8 {
        const { assert!(COUNT < 32, "shift count must be below 32") };
        Self::from_lanes(Active::shl_u32x8::<COUNT>(self.lanes))
    }

    #[inline]
    pub fn logical_shift_right<const COUNT: u32>(self) -> UVec8 {
        const { assert!(COUNT < 32, "shift count must be below 32") };
        Self::from_lanes(Active::shr_u32x8::<COUNT>(self.lanes))
    }

    #[inline]
    pub fn arithmetic_shift_right<const COUNT: u32>(self) -> UVec8 {
        const { assert!(COUNT < 32, "shift count must be below 32") };
        Self::from_lanes(Active::sra_u32x8::<COUNT>(self.lanes))
    }

    #[inline]
    pub const fn to_array(self) -> [u32; 8] {
        self.lanes
    }
}

impl From<[u32; 8]> for UVec8 {
    #[inline]
    fn from(lanes: [u32; 8]) -> Self {
        Self { lanes }
    }
}

impl Index<usize> for UVec8 {
    type Output = u32;

    #[inline]
    fn index(&self, index: usize) -> &u32 {
        debug_assert!(index < 8, "UVec8 component {index} out of range");
        &self.lanes[index]
    }
}

impl IndexMut<usize> for UVec8 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut u32 {
        debug_assert!(index < 8, "UVec8 component {index} out of range");
        &mut self.lanes[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{SWIZZLE_X, SWIZZLE_Y};

    const T: u32 = 0xffff_ffff;

    #[test]
    fn test_halves_and_splat() {
        let lo = UVec4::new(1, 2, 3, 4);
        let hi = UVec4::new(5, 6, 7, 8);
        let v = UVec8::from_halves(lo, hi);
        assert_eq!(v.lower_vec4(), lo);
        assert_eq!(v.upper_vec4(), hi);
        assert_eq!(UVec8::splat_y(hi), UVec8::replicate(6));
        assert_eq!(v[7], 8);
    }

    #[test]
    fn test_mask_ops() {
        let a = UVec8::from([T, 0, T, 0, T, 0, T, 0]);
        let b = UVec8::from([T, T, 0, 0, T, T, 0, 0]);
        assert_eq!(UVec8::and(a, b), UVec8::from([T, 0, 0, 0, T, 0, 0, 0]));
        assert_eq!(UVec8::or(a, b), UVec8::from([T, T, T, 0, T, T, T, 0]));
        assert_eq!(UVec8::xor(a, b), UVec8::from([0, T, T, 0, 0, T, T, 0]));
        assert!(a.test_any_true());
        assert!(!a.test_all_true());
        assert_eq!(a.count_trues(), 4);
        assert!(UVec8::replicate(0x8000_0000).test_all_true());
        assert!(!UVec8::replicate(0x7fff_ffff).test_any_true());
        assert_eq!(UVec8::equals(a, a), UVec8::replicate(T));
        assert_eq!(
            UVec8::select(UVec8::replicate(1), UVec8::replicate(2), a),
            UVec8::from([2, 1, 2, 1, 2, 1, 2, 1])
        );
    }

    #[test]
    fn test_swizzle_and_shifts() {
        let v = UVec8::from([0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(
            v.swizzle::<SWIZZLE_Y, SWIZZLE_Y, SWIZZLE_X, SWIZZLE_X>().to_array(),
            [1, 1, 0, 0, 5, 5, 4, 4]
        );
        let v = UVec8::replicate(0x8000_0010);
        assert_eq!(v.logical_shift_left::<4>(), UVec8::replicate(0x100));
        assert_eq!(v.logical_shift_right::<4>(), UVec8::replicate(0x0800_0001));
        assert_eq!(v.arithmetic_shift_right::<4>(), UVec8::replicate(0xf800_0001));
    }

    #[test]
    fn test_to_float() {
        let v = UVec8::from([0, 1, 2, 3, (-1i32) as u32, 5, 6, 1 << 24]);
        assert_eq!(
            v.to_float(),
            Vec8::from([0.0, 1.0, 2.0, 3.0, -1.0, 5.0, 6.0, 16_777_216.0])
        );
    }
}
