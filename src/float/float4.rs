use crate::common::error::Result;
use crate::common::layout::cast_slice;
use std::fmt;
use std::ops::Index;
use zerocopy_derive::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Four packed floats. Convert to [`Vec4`](crate::Vec4) for calculations.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout,
)]
#[repr(C)]
pub struct Float4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

const _: () = assert!(std::mem::size_of::<Float4>() == 16);
const _: () = assert!(std::mem::align_of::<Float4>() == 4);

impl Float4 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn slice_from_bytes(bytes: &[u8]) -> Result<&[Float4]> {
        cast_slice(bytes)
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl Index<usize> for Float4 {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &f32 {
        debug_assert!(index < 4, "Float4 component {index} out of range");
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Float4 component {index} out of range"),
        }
    }
}

impl From<[f32; 4]> for Float4 {
    #[inline]
    fn from([x, y, z, w]: [f32; 4]) -> Self {
        Self { x, y, z, w }
    }
}

impl fmt::Display for Float4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}, {}", self.x, self.y, self.z, self.w)
    }
}
