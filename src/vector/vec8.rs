use super::{UVec8, Vec4, swizzle_halves};
use crate::common::error::Result;
use crate::common::layout::{check_alignment, check_min_len};
use crate::common::simd::{Active, Backend, from_bits, join_f32, split_f32, to_bits};
use std::ops::{Add, Div, Index, IndexMut, Mul, Sub};

/// Eight float lanes, lanes 0..4 forming the low half and 4..8 the high half.
#[derive(Debug, Clone, Copy, Default)]
#[repr(C, align(32))]
pub struct Vec8 {
    lanes: [f32; 8],
}

const _: () = assert!(std::mem::size_of::<Vec8>() == 32);
const _: () = assert!(std::mem::align_of::<Vec8>() == 32);

impl Vec8 {
    #[inline(always)]
    pub(crate) const fn from_lanes(lanes: [f32; 8]) -> Self {
        Self { lanes }
    }

    #[inline]
    pub fn from_halves(lo: Vec4, hi: Vec4) -> Self {
        Self::from_lanes(join_f32(lo.lanes(), hi.lanes()))
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::replicate(0.0)
    }

    #[inline]
    pub const fn replicate(v: f32) -> Self {
        Self { lanes: [v; 8] }
    }

    /// X of `v` in all 8 lanes
    #[inline]
    pub fn splat_x(v: Vec4) -> Self {
        Self::replicate(v.x())
    }

    /// Y of `v` in all 8 lanes
    #[inline]
    pub fn splat_y(v: Vec4) -> Self {
        Self::replicate(v.y())
    }

    /// Z of `v` in all 8 lanes
    #[inline]
    pub fn splat_z(v: Vec4) -> Self {
        Self::replicate(v.z())
    }

    #[inline]
    pub fn fused_multiply_add(mul1: Vec8, mul2: Vec8, add: Vec8) -> Vec8 {
        Self::from_lanes(Active::mul_add_f32x8(mul1.lanes, mul2.lanes, add.lanes))
    }

    /// Lane-wise `v2` where the control lane's highest bit is set, `v1` otherwise.
    #[inline]
    pub fn select(v1: Vec8, v2: Vec8, control: UVec8) -> Vec8 {
        Self::from_lanes(Active::select_f32x8(v1.lanes, v2.lanes, control.lanes()))
    }

    #[inline]
    pub fn min(a: Vec8, b: Vec8) -> Vec8 {
        Self::from_lanes(Active::min_f32x8(a.lanes, b.lanes))
    }

    #[inline]
    pub fn max(a: Vec8, b: Vec8) -> Vec8 {
        Self::from_lanes(Active::max_f32x8(a.lanes, b.lanes))
    }

    #[inline]
    pub fn less(a: Vec8, b: Vec8) -> UVec8 {
        UVec8::from_lanes(Active::lt_f32x8(a.lanes, b.lanes))
    }

    #[inline]
    pub fn less_or_equal(a: Vec8, b: Vec8) -> UVec8 {
        UVec8::from_lanes(Active::le_f32x8(a.lanes, b.lanes))
    }

    #[inline]
    pub fn greater(a: Vec8, b: Vec8) -> UVec8 {
        UVec8::from_lanes(Active::gt_f32x8(a.lanes, b.lanes))
    }

    #[inline]
    pub fn greater_or_equal(a: Vec8, b: Vec8) -> UVec8 {
        UVec8::from_lanes(Active::ge_f32x8(a.lanes, b.lanes))
    }

    /// Load the first 8 floats of `v`.
    pub fn load_float8(v: &[f32]) -> Result<Self> {
        check_min_len(8, v.len())?;
        let mut lanes = [0.0; 8];
        lanes.copy_from_slice(&v[..8]);
        Ok(Self::from_lanes(lanes))
    }

    /// Load 8 floats from a 32-byte aligned address.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading 8 floats and aligned to 32 bytes.
    #[inline]
    pub unsafe fn load_float8_aligned(ptr: *const f32) -> Self {
        debug_assert!(ptr as usize % 32 == 0, "load_float8_aligned on unaligned address");
        unsafe { ptr.cast::<Vec8>().read() }
    }

    /// Checked form of [`Vec8::load_float8_aligned`] over the start of a slice.
    pub fn try_load_float8_aligned(v: &[f32]) -> Result<Self> {
        check_min_len(8, v.len())?;
        check_alignment(v.as_ptr(), 32)?;
        // SAFETY: 8 elements are present and the alignment was just checked.
        Ok(unsafe { Self::load_float8_aligned(v.as_ptr()) })
    }

    /// Store into the first 8 elements of `out`.
    pub fn store_float8(self, out: &mut [f32]) -> Result<()> {
        check_min_len(8, out.len())?;
        out[..8].copy_from_slice(&self.lanes);
        Ok(())
    }

    #[inline]
    pub fn reciprocal(self) -> Vec8 {
        Self::replicate(1.0) / self
    }

    /// Apply the same 4-lane swizzle to each half; lanes never cross halves.
    #[inline]
    pub fn swizzle<const X: u32, const Y: u32, const Z: u32, const W: u32>(self) -> Vec8 {
        Self::from_lanes(swizzle_halves::<f32, X, Y, Z, W>(self.lanes))
    }

    #[inline]
    pub fn abs(self) -> Vec8 {
        Self::from_lanes(from_bits(Active::and_u32x8(
            to_bits(self.lanes),
            [0x7fff_ffff; 8],
        )))
    }

    #[inline]
    pub fn lower_vec4(self) -> Vec4 {
        Vec4::from_lanes(split_f32(self.lanes).0)
    }

    #[inline]
    pub fn upper_vec4(self) -> Vec4 {
        Vec4::from_lanes(split_f32(self.lanes).1)
    }

    /// Smallest of the 8 lanes
    #[inline]
    pub fn reduce_min(self) -> f32 {
        Vec4::min(self.lower_vec4(), self.upper_vec4()).reduce_min()
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 8] {
        self.lanes
    }
}

impl From<[f32; 8]> for Vec8 {
    #[inline]
    fn from(lanes: [f32; 8]) -> Self {
        Self { lanes }
    }
}

impl Index<usize> for Vec8 {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &f32 {
        debug_assert!(index < 8, "Vec8 component {index} out of range");
        &self.lanes[index]
    }
}

impl IndexMut<usize> for Vec8 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        debug_assert!(index < 8, "Vec8 component {index} out of range");
        &mut self.lanes[index]
    }
}

impl PartialEq for Vec8 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        UVec8::from_lanes(Active::eq_f32x8(self.lanes, other.lanes)).test_all_true()
    }
}

impl Mul for Vec8 {
    type Output = Vec8;

    #[inline]
    fn mul(self, rhs: Vec8) -> Vec8 {
        Self::from_lanes(Active::mul_f32x8(self.lanes, rhs.lanes))
    }
}

impl Mul<f32> for Vec8 {
    type Output = Vec8;

    #[inline]
    fn mul(self, rhs: f32) -> Vec8 {
        Self::from_lanes(Active::mul_f32x8(self.lanes, [rhs; 8]))
    }
}

impl Add for Vec8 {
    type Output = Vec8;

    #[inline]
    fn add(self, rhs: Vec8) -> Vec8 {
        Self::from_lanes(Active::add_f32x8(self.lanes, rhs.lanes))
    }
}

impl Sub for Vec8 {
    type Output = Vec8;

    #[inline]
    fn sub(self, rhs: Vec8) -> Vec8 {
        Self::from_lanes(Active::sub_f32x8(self.lanes, rhs.lanes))
    }
}

impl Div for Vec8 {
    type Output = Vec8;

    #[inline]
    fn div(self, rhs: Vec8) -> Vec8 {
        Self::from_lanes(Active::div_f32x8(self.lanes, rhs.lanes))
    }
}
