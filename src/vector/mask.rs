use bitflags::bitflags;

bitflags! {
    /// One bit per lane, bit i set when lane i is true.
    ///
    /// Returned by [`UVec4::get_trues`](crate::UVec4::get_trues) and
    /// [`Vec4::sign_bits`](crate::Vec4::sign_bits).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LaneMask: u32 {
        const X = 1 << 0;
        const Y = 1 << 1;
        const Z = 1 << 2;
        const W = 1 << 3;
        const XYZ = Self::X.bits() | Self::Y.bits() | Self::Z.bits();
    }
}

impl LaneMask {
    /// Number of true lanes
    #[inline]
    pub const fn count(self) -> u32 {
        self.bits().count_ones()
    }
}
