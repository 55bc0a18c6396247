use super::{LaneMask, SWIZZLE_W, SWIZZLE_X, SWIZZLE_Y, SWIZZLE_Z, Vec4, swizzle_lanes};
use crate::common::error::{Error, Result};
use crate::common::layout::{check_alignment, check_min_len};
use crate::common::simd::{Active, Backend, from_bits};
use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul};

/// Four `u32` lanes used as integers or as a mask.
///
/// As a mask a lane is true when its highest bit is set; the other 31 bits
/// are ignored by selects and tests. Compares produce all-ones lanes for true
/// and zero lanes for false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(C, align(16))]
pub struct UVec4 {
    lanes: [u32; 4],
}

const _: () = assert!(std::mem::size_of::<UVec4>() == 16);
const _: () = assert!(std::mem::align_of::<UVec4>() == 16);

impl UVec4 {
    #[inline]
    pub const fn new(x: u32, y: u32, z: u32, w: u32) -> Self {
        Self {
            lanes: [x, y, z, w],
        }
    }

    #[inline(always)]
    pub(crate) const fn from_lanes(lanes: [u32; 4]) -> Self {
        Self { lanes }
    }

    #[inline(always)]
    pub(crate) const fn lanes(self) -> [u32; 4] {
        self.lanes
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::replicate(0)
    }

    #[inline]
    pub const fn replicate(v: u32) -> Self {
        Self { lanes: [v; 4] }
    }

    /// Load one int into X, zero Y, Z and W
    #[inline]
    pub const fn load_int(v: &u32) -> Self {
        Self::new(*v, 0, 0, 0)
    }

    /// Load the first 4 ints of `v`.
    ///
    /// Fails with [`Error::ElementCount`] when `v` holds fewer than 4 elements.
    #[inline]
    pub fn load_int4(v: &[u32]) -> Result<Self> {
        check_min_len(4, v.len())?;
        Ok(Self::from_lanes([v[0], v[1], v[2], v[3]]))
    }

    /// Load 4 ints from a 16-byte aligned address.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading 4 `u32` and aligned to 16 bytes.
    #[inline]
    pub unsafe fn load_int4_aligned(ptr: *const u32) -> Self {
        debug_assert!(ptr as usize % 16 == 0, "load_int4_aligned on unaligned address");
        unsafe { ptr.cast::<UVec4>().read() }
    }

    /// Checked form of [`UVec4::load_int4_aligned`] over the start of a slice.
    pub fn try_load_int4_aligned(v: &[u32]) -> Result<Self> {
        check_min_len(4, v.len())?;
        check_alignment(v.as_ptr(), 16)?;
        // SAFETY: 4 elements are present and the alignment was just checked.
        Ok(unsafe { Self::load_int4_aligned(v.as_ptr()) })
    }

    /// Gather 4 ints, lane i read from `base + offsets[i] * SCALE` bytes.
    ///
    /// # Safety
    ///
    /// Every gathered address must be valid for an unaligned 4-byte read.
    #[inline]
    pub unsafe fn gather_int4<const SCALE: usize>(base: *const u32, offsets: UVec4) -> Self {
        let bytes = base.cast::<u8>();
        Self::from_lanes(offsets.lanes.map(|offset| unsafe {
            bytes
                .add(offset as usize * SCALE)
                .cast::<u32>()
                .read_unaligned()
        }))
    }

    /// Checked form of [`UVec4::gather_int4`] over a slice.
    ///
    /// Fails with [`Error::IndexOutOfBounds`] when a scaled offset reaches past
    /// the end of `base`; the reported index counts `u32` elements.
    pub fn try_gather_int4<const SCALE: usize>(base: &[u32], offsets: UVec4) -> Result<Self> {
        let len_bytes = std::mem::size_of_val(base);
        for offset in offsets.lanes {
            let end = (offset as usize)
                .checked_mul(SCALE)
                .and_then(|start| start.checked_add(4));
            if !matches!(end, Some(end) if end <= len_bytes) {
                log::debug!(
                    "rejected gather offset {offset} (scale {SCALE}) over {} ints",
                    base.len()
                );
                return Err(Error::IndexOutOfBounds {
                    index: (offset as usize).saturating_mul(SCALE) / 4,
                    len: base.len(),
                });
            }
        }
        // SAFETY: every lane's 4-byte read was bounds checked against `base` above.
        Ok(unsafe { Self::gather_int4::<SCALE>(base.as_ptr(), offsets) })
    }

    // ------------------------------------------------------------------
    // Lane-wise statics
    // ------------------------------------------------------------------

    #[inline]
    pub fn min(a: UVec4, b: UVec4) -> UVec4 {
        Self::from_lanes(Active::min_u32(a.lanes, b.lanes))
    }

    #[inline]
    pub fn max(a: UVec4, b: UVec4) -> UVec4 {
        Self::from_lanes(Active::max_u32(a.lanes, b.lanes))
    }

    #[inline]
    pub fn equals(a: UVec4, b: UVec4) -> UVec4 {
        Self::from_lanes(Active::eq_u32(a.lanes, b.lanes))
    }

    /// Lane-wise `v2` where the control lane's highest bit is set, `v1` otherwise.
    #[inline]
    pub fn select(v1: UVec4, v2: UVec4, control: UVec4) -> UVec4 {
        Self::from_lanes(Active::select_u32(v1.lanes, v2.lanes, control.lanes))
    }

    #[inline]
    pub fn or(a: UVec4, b: UVec4) -> UVec4 {
        Self::from_lanes(Active::or_u32(a.lanes, b.lanes))
    }

    #[inline]
    pub fn xor(a: UVec4, b: UVec4) -> UVec4 {
        Self::from_lanes(Active::xor_u32(a.lanes, b.lanes))
    }

    #[inline]
    pub fn and(a: UVec4, b: UVec4) -> UVec4 {
        Self::from_lanes(Active::and_u32(a.lanes, b.lanes))
    }

    #[inline]
    pub fn not(a: UVec4) -> UVec4 {
        Self::from_lanes(Active::not_u32(a.lanes))
    }

    /// Move the lanes of `index` whose `value` lane is true to the front, in
    /// their original order, and fill the rest with `index.w()`.
    ///
    /// `value = (true, false, true, false)` with `index = (1, 2, 3, 4)` gives
    /// `(1, 3, 4, 4)`.
    pub fn sort4_true(value: UVec4, index: UVec4) -> UVec4 {
        // Lanes where Z is false take W
        let v = UVec4::select(
            index.swizzle::<SWIZZLE_X, SWIZZLE_Y, SWIZZLE_W, SWIZZLE_W>(),
            index,
            value.splat_z(),
        );
        // Lanes where Y is false shift down one
        let v = UVec4::select(
            v.swizzle::<SWIZZLE_X, SWIZZLE_Z, SWIZZLE_W, SWIZZLE_W>(),
            v,
            value.splat_y(),
        );
        // Lanes where X is false shift down one
        UVec4::select(
            v.swizzle::<SWIZZLE_Y, SWIZZLE_Z, SWIZZLE_W, SWIZZLE_W>(),
            v,
            value.splat_x(),
        )
    }

    // ------------------------------------------------------------------
    // Components
    // ------------------------------------------------------------------

    #[inline]
    pub const fn x(self) -> u32 {
        self.lanes[0]
    }

    #[inline]
    pub const fn y(self) -> u32 {
        self.lanes[1]
    }

    #[inline]
    pub const fn z(self) -> u32 {
        self.lanes[2]
    }

    #[inline]
    pub const fn w(self) -> u32 {
        self.lanes[3]
    }

    #[inline]
    pub fn set_x(&mut self, x: u32) {
        self.lanes[0] = x;
    }

    #[inline]
    pub fn set_y(&mut self, y: u32) {
        self.lanes[1] = y;
    }

    #[inline]
    pub fn set_z(&mut self, z: u32) {
        self.lanes[2] = z;
    }

    #[inline]
    pub fn set_w(&mut self, w: u32) {
        self.lanes[3] = w;
    }

    #[inline]
    pub const fn to_array(self) -> [u32; 4] {
        self.lanes
    }

    #[inline]
    pub fn swizzle<const X: u32, const Y: u32, const Z: u32, const W: u32>(self) -> UVec4 {
        Self::from_lanes(swizzle_lanes::<u32, X, Y, Z, W>(self.lanes))
    }

    #[inline]
    pub fn splat_x(self) -> UVec4 {
        Self::replicate(self.lanes[0])
    }

    #[inline]
    pub fn splat_y(self) -> UVec4 {
        Self::replicate(self.lanes[1])
    }

    #[inline]
    pub fn splat_z(self) -> UVec4 {
        Self::replicate(self.lanes[2])
    }

    #[inline]
    pub fn splat_w(self) -> UVec4 {
        Self::replicate(self.lanes[3])
    }

    // ------------------------------------------------------------------
    // Conversion and store
    // ------------------------------------------------------------------

    /// Convert each lane, read as a signed integer, to a float
    #[inline]
    pub fn to_float(self) -> Vec4 {
        Vec4::from_lanes(Active::i32_to_f32(self.lanes))
    }

    #[inline]
    pub fn reinterpret_as_float(self) -> Vec4 {
        Vec4::from_lanes(from_bits(self.lanes))
    }

    /// Store into the first 4 elements of `out`.
    #[inline]
    pub fn store_int4(self, out: &mut [u32]) -> Result<()> {
        check_min_len(4, out.len())?;
        out[..4].copy_from_slice(&self.lanes);
        Ok(())
    }

    /// Store 4 ints to a 16-byte aligned address.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing 4 `u32` and aligned to 16 bytes.
    #[inline]
    pub unsafe fn store_int4_aligned(self, ptr: *mut u32) {
        debug_assert!(ptr as usize % 16 == 0, "store_int4_aligned on unaligned address");
        unsafe { ptr.cast::<UVec4>().write(self) }
    }

    /// Checked form of [`UVec4::store_int4_aligned`] over the start of a slice.
    pub fn try_store_int4_aligned(self, out: &mut [u32]) -> Result<()> {
        check_min_len(4, out.len())?;
        check_alignment(out.as_ptr(), 16)?;
        // SAFETY: 4 elements are present and the alignment was just checked.
        unsafe { self.store_int4_aligned(out.as_mut_ptr()) };
        Ok(())
    }

    // ------------------------------------------------------------------
    // Mask tests
    // ------------------------------------------------------------------

    #[inline]
    pub fn test_any_true(self) -> bool {
        Active::sign_mask_u32(self.lanes) != 0
    }

    #[inline]
    pub fn test_any_xyz_true(self) -> bool {
        Active::sign_mask_u32(self.lanes) & 0b0111 != 0
    }

    #[inline]
    pub fn test_all_true(self) -> bool {
        Active::sign_mask_u32(self.lanes) == 0b1111
    }

    #[inline]
    pub fn test_all_xyz_true(self) -> bool {
        Active::sign_mask_u32(self.lanes) & 0b0111 == 0b0111
    }

    #[inline]
    pub fn count_trues(self) -> u32 {
        self.get_trues().count()
    }

    /// Lanes whose highest bit is set
    #[inline]
    pub fn get_trues(self) -> LaneMask {
        LaneMask::from_bits_truncate(Active::sign_mask_u32(self.lanes))
    }

    // ------------------------------------------------------------------
    // Bit manipulation
    // ------------------------------------------------------------------

    /// Shift every lane left by `COUNT` bits, filling with zeros
    #[inline]
    pub fn logical_shift_left<const COUNT: u32>(self) -> UVec4 {
        const { assert!(COUNT < 32, "shift count must be below 32") };
        Self::from_lanes(Active::shl_u32::<COUNT>(self.lanes))
    }

    /// Shift every lane right by `COUNT` bits, filling with zeros
    #[inline]
    pub fn logical_shift_right<const COUNT: u32>(self) -> UVec4 {
        const { assert!(COUNT < 32, "shift count must be below 32") };
        Self::from_lanes(Active::shr_u32::<COUNT>(self.lanes))
    }

    /// Shift every lane right by `COUNT` bits, filling with the highest bit
    #[inline]
    pub fn arithmetic_shift_right<const COUNT: u32>(self) -> UVec4 {
        const { assert!(COUNT < 32, "shift count must be below 32") };
        Self::from_lanes(Active::sra_u32::<COUNT>(self.lanes))
    }

    /// Split the 16-bit halves of X and Y into four lanes
    #[inline]
    pub fn expand4_uint16_lo(self) -> UVec4 {
        let [x, y, _, _] = self.lanes;
        Self::new(x & 0xffff, x >> 16, y & 0xffff, y >> 16)
    }

    /// Split the 16-bit halves of Z and W into four lanes
    #[inline]
    pub fn expand4_uint16_hi(self) -> UVec4 {
        let [_, _, z, w] = self.lanes;
        Self::new(z & 0xffff, z >> 16, w & 0xffff, w >> 16)
    }

    /// Bytes 0..4 (lane X, little endian) into four lanes
    #[inline]
    pub fn expand4_byte0(self) -> UVec4 {
        Self::expand_bytes(self.lanes[0])
    }

    /// Bytes 4..8 (lane Y) into four lanes
    #[inline]
    pub fn expand4_byte4(self) -> UVec4 {
        Self::expand_bytes(self.lanes[1])
    }

    /// Bytes 8..12 (lane Z) into four lanes
    #[inline]
    pub fn expand4_byte8(self) -> UVec4 {
        Self::expand_bytes(self.lanes[2])
    }

    /// Bytes 12..16 (lane W) into four lanes
    #[inline]
    pub fn expand4_byte12(self) -> UVec4 {
        Self::expand_bytes(self.lanes[3])
    }

    #[inline(always)]
    fn expand_bytes(lane: u32) -> UVec4 {
        Self::from_lanes(lane.to_le_bytes().map(u32::from))
    }

    /// Shift the lanes left by `4 - count` positions, filling with zeros.
    ///
    /// `count == 1` gives `(w, 0, 0, 0)`, `count == 3` gives `(y, z, w, 0)`.
    #[inline]
    pub fn shift_components_4_minus(self, count: usize) -> UVec4 {
        debug_assert!(count <= 4, "shift_components_4_minus count {count} above 4");
        let shift = 4 - count.min(4);
        Self::from_lanes(std::array::from_fn(|i| {
            self.lanes.get(i + shift).copied().unwrap_or(0)
        }))
    }
}

impl From<[u32; 4]> for UVec4 {
    #[inline]
    fn from(lanes: [u32; 4]) -> Self {
        Self { lanes }
    }
}

impl Index<usize> for UVec4 {
    type Output = u32;

    #[inline]
    fn index(&self, index: usize) -> &u32 {
        debug_assert!(index < 4, "UVec4 component {index} out of range");
        &self.lanes[index]
    }
}

impl IndexMut<usize> for UVec4 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut u32 {
        debug_assert!(index < 4, "UVec4 component {index} out of range");
        &mut self.lanes[index]
    }
}

/// Wrapping lane-wise multiply
impl Mul for UVec4 {
    type Output = UVec4;

    #[inline]
    fn mul(self, rhs: UVec4) -> UVec4 {
        Self::from_lanes(Active::mul_u32(self.lanes, rhs.lanes))
    }
}

/// Wrapping lane-wise add
impl Add for UVec4 {
    type Output = UVec4;

    #[inline]
    fn add(self, rhs: UVec4) -> UVec4 {
        Self::from_lanes(Active::add_u32(self.lanes, rhs.lanes))
    }
}

impl AddAssign for UVec4 {
    #[inline]
    fn add_assign(&mut self, rhs: UVec4) {
        *self = *self + rhs;
    }
}

impl fmt::Display for UVec4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z, w] = self.lanes;
        write!(f, "{x}, {y}, {z}, {w}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const T: u32 = 0xffff_ffff;

    #[test]
    fn test_sort4_true_example() {
        let value = UVec4::new(T, 0, T, 0);
        let index = UVec4::new(1, 2, 3, 4);
        assert_eq!(UVec4::sort4_true(value, index), UVec4::new(1, 3, 4, 4));
    }

    #[test]
    fn test_sort4_true_edges() {
        let index = UVec4::new(10, 11, 12, 13);
        assert_eq!(UVec4::sort4_true(UVec4::replicate(T), index), index);
        assert_eq!(UVec4::sort4_true(UVec4::zero(), index), UVec4::replicate(13));
        assert_eq!(
            UVec4::sort4_true(UVec4::new(0, 0x8000_0000, 0, 0), index),
            UVec4::new(11, 13, 13, 13)
        );
    }

    #[test]
    fn test_mask_tests_use_highest_bit() {
        let v = UVec4::new(0x8000_0000, 0x7fff_ffff, 1, 0xffff_fffe);
        assert!(v.test_any_true());
        assert!(!v.test_all_true());
        assert!(v.test_any_xyz_true());
        assert!(!v.test_all_xyz_true());
        assert_eq!(v.count_trues(), 2);
        assert_eq!(v.get_trues(), LaneMask::X | LaneMask::W);

        let xyz = UVec4::new(T, T, T, 0);
        assert!(xyz.test_all_xyz_true());
        assert!(!xyz.test_all_true());
        assert!(!UVec4::new(0, 0, 0, T).test_any_xyz_true());
    }

    #[test]
    fn test_bitwise_and_select() {
        let a = UVec4::new(0b1100, 0xf0, 0, T);
        let b = UVec4::new(0b1010, 0x0f, T, T);
        assert_eq!(UVec4::and(a, b), UVec4::new(0b1000, 0, 0, T));
        assert_eq!(UVec4::or(a, b), UVec4::new(0b1110, 0xff, T, T));
        assert_eq!(UVec4::xor(a, b), UVec4::new(0b0110, 0xff, T, 0));
        assert_eq!(UVec4::not(a), UVec4::new(!0b1100, !0xf0, T, 0));
        assert_eq!(
            UVec4::select(a, b, UVec4::new(0, T, 0x8000_0000, 0x7fff_ffff)),
            UVec4::new(0b1100, 0x0f, T, T)
        );
    }

    #[test]
    fn test_integer_arithmetic_wraps() {
        let a = UVec4::new(u32::MAX, 2, 3, 0x1000_0000);
        let b = UVec4::new(1, 3, 5, 0x10);
        assert_eq!(a + b, UVec4::new(0, 5, 8, 0x1000_0010));
        assert_eq!(a * b, UVec4::new(u32::MAX, 6, 15, 0));
        assert_eq!(UVec4::min(a, b), UVec4::new(1, 2, 3, 0x10));
        assert_eq!(UVec4::max(a, b), UVec4::new(u32::MAX, 3, 5, 0x1000_0000));

        let mut c = a;
        c += UVec4::replicate(1);
        assert_eq!(c, UVec4::new(0, 3, 4, 0x1000_0001));
    }

    #[test]
    fn test_shifts() {
        let v = UVec4::new(0x8000_0001, 0xff, 2, 0xf000_0000);
        assert_eq!(
            v.logical_shift_left::<4>(),
            UVec4::new(0x10, 0xff0, 0x20, 0)
        );
        assert_eq!(
            v.logical_shift_right::<4>(),
            UVec4::new(0x0800_0000, 0xf, 0, 0x0f00_0000)
        );
        assert_eq!(
            v.arithmetic_shift_right::<4>(),
            UVec4::new(0xf800_0000, 0xf, 0, 0xff00_0000)
        );
        assert_eq!(v.logical_shift_left::<0>(), v);
    }

    #[test]
    fn test_expand() {
        let v = UVec4::new(0x4433_2211, 0x8877_6655, 0xccbb_aa99, 0x00ff_eedd);
        assert_eq!(v.expand4_uint16_lo(), UVec4::new(0x2211, 0x4433, 0x6655, 0x8877));
        assert_eq!(v.expand4_uint16_hi(), UVec4::new(0xaa99, 0xccbb, 0xeedd, 0x00ff));
        assert_eq!(v.expand4_byte0(), UVec4::new(0x11, 0x22, 0x33, 0x44));
        assert_eq!(v.expand4_byte4(), UVec4::new(0x55, 0x66, 0x77, 0x88));
        assert_eq!(v.expand4_byte8(), UVec4::new(0x99, 0xaa, 0xbb, 0xcc));
        assert_eq!(v.expand4_byte12(), UVec4::new(0xdd, 0xee, 0xff, 0x00));
    }

    #[test]
    fn test_shift_components_4_minus() {
        let v = UVec4::new(1, 2, 3, 4);
        assert_eq!(v.shift_components_4_minus(0), UVec4::zero());
        assert_eq!(v.shift_components_4_minus(1), UVec4::new(4, 0, 0, 0));
        assert_eq!(v.shift_components_4_minus(3), UVec4::new(2, 3, 4, 0));
        assert_eq!(v.shift_components_4_minus(4), v);
    }

    #[test]
    fn test_float_conversions() {
        let v = UVec4::new(1, (-3i32) as u32, 0, 1 << 20);
        assert_eq!(v.to_float(), Vec4::new(1.0, -3.0, 0.0, 1_048_576.0));
        assert_eq!(
            UVec4::replicate(1.0f32.to_bits()).reinterpret_as_float(),
            Vec4::replicate(1.0)
        );
    }

    #[test]
    fn test_load_store_and_gather() {
        let data = [5u32, 6, 7, 8, 9];
        assert_eq!(UVec4::load_int(&data[4]), UVec4::new(9, 0, 0, 0));
        let v = UVec4::load_int4(&data[1..]).unwrap();
        assert_eq!(v, UVec4::new(6, 7, 8, 9));
        assert_eq!(
            UVec4::load_int4(&data[2..]),
            Err(Error::ElementCount { expected: 4, got: 3 })
        );

        let mut out = [0u32; 6];
        v.store_int4(&mut out[2..]).unwrap();
        assert_eq!(out, [0, 0, 6, 7, 8, 9]);
        assert_eq!(
            v.store_int4(&mut out[3..]),
            Err(Error::ElementCount { expected: 4, got: 3 })
        );
        assert_eq!(out, [0, 0, 6, 7, 8, 9]);

        let gathered = unsafe { UVec4::gather_int4::<4>(data.as_ptr(), UVec4::new(4, 0, 2, 2)) };
        assert_eq!(gathered, UVec4::new(9, 5, 7, 7));

        let mut slot = UVec4::zero();
        let ptr = (&mut slot as *mut UVec4).cast::<u32>();
        unsafe { v.store_int4_aligned(ptr) };
        assert_eq!(unsafe { UVec4::load_int4_aligned(ptr) }, v);
    }

    #[test]
    fn test_try_load_int4_aligned() {
        let aligned = UVec4::new(1, 2, 3, 4);
        let lanes = unsafe { std::slice::from_raw_parts((&aligned as *const UVec4).cast::<u32>(), 4) };
        assert_eq!(UVec4::try_load_int4_aligned(lanes), Ok(aligned));
        assert!(matches!(
            UVec4::try_load_int4_aligned(&lanes[1..]),
            Err(Error::ElementCount { expected: 4, got: 3 })
        ));
    }

    #[test]
    fn test_try_gather_int4() {
        let table: Vec<u32> = (0..8).map(|i| i * 100).collect();
        assert_eq!(
            UVec4::try_gather_int4::<4>(&table, UVec4::new(7, 0, 3, 3)),
            Ok(UVec4::new(700, 0, 300, 300))
        );
        // 8-byte stride, lane 1 starts at byte 32 of 32
        assert_eq!(
            UVec4::try_gather_int4::<8>(&table, UVec4::new(0, 4, 1, 2)),
            Err(Error::IndexOutOfBounds { index: 8, len: 8 })
        );
        assert!(UVec4::try_gather_int4::<4>(&table, UVec4::replicate(u32::MAX)).is_err());
    }

    #[test]
    fn test_try_store_int4_aligned() {
        let mut storage = [UVec4::zero(); 2];
        let lanes = unsafe { std::slice::from_raw_parts_mut(storage.as_mut_ptr().cast::<u32>(), 8) };
        let v = UVec4::new(1, 2, 3, 4);

        assert_eq!(v.try_store_int4_aligned(&mut lanes[4..]), Ok(()));
        assert!(matches!(
            v.try_store_int4_aligned(&mut lanes[1..]),
            Err(Error::Misaligned { required: 16, .. })
        ));
        assert_eq!(
            v.try_store_int4_aligned(&mut lanes[6..]),
            Err(Error::ElementCount { expected: 4, got: 2 })
        );
        assert_eq!(lanes, &[0, 0, 0, 0, 1, 2, 3, 4]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_sort4_true_partitions(bits in 0u32..16, index in any::<[u32; 4]>()) {
            let value = UVec4::from(std::array::from_fn(|i| if bits & (1 << i) != 0 { T } else { 0 }));
            let result = UVec4::sort4_true(value, UVec4::from(index));

            let kept: Vec<u32> = (0..4).filter(|i| bits & (1 << i) != 0).map(|i| index[i]).collect();
            for i in 0..4 {
                let expected = kept.get(i).copied().unwrap_or(index[3]);
                prop_assert_eq!(result[i], expected);
            }
        }

        #[test]
        fn prop_expand_bytes_reassembles(v in any::<[u32; 4]>()) {
            let v = UVec4::from(v);
            let bytes = v.expand4_byte8();
            let rebuilt = bytes.x() | bytes.y() << 8 | bytes.z() << 16 | bytes.w() << 24;
            prop_assert_eq!(rebuilt, v.z());
        }
    }
}
