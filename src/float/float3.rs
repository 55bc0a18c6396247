use crate::common::error::Result;
use crate::common::layout::cast_slice;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;
use zerocopy_derive::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Three packed floats. Convert to [`Vec3`](crate::Vec3) for calculations.
///
/// Unlike `Vec3` this is 12 bytes with 4-byte alignment, so arrays of it match
/// vertex position streams exactly.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout,
)]
#[repr(C)]
pub struct Float3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

const _: () = assert!(std::mem::size_of::<Float3>() == 12);
const _: () = assert!(std::mem::align_of::<Float3>() == 4);

/// Vertex positions as exchanged with mesh loading
pub type VertexList = Vec<Float3>;

impl Float3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// View a packed byte buffer as `Float3` values without copying.
    ///
    /// Fails when the buffer is not 4-byte aligned or its length is not a
    /// multiple of 12.
    pub fn slice_from_bytes(bytes: &[u8]) -> Result<&[Float3]> {
        cast_slice(bytes)
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Index<usize> for Float3 {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &f32 {
        debug_assert!(index < 3, "Float3 component {index} out of range");
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Float3 component {index} out of range"),
        }
    }
}

impl From<[f32; 3]> for Float3 {
    #[inline]
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Hashes the bit pattern of each component, with `-0.0` folded into `0.0`
/// so values that compare equal hash equal.
impl Hash for Float3 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in self.to_array() {
            let bits = if c == 0.0 { 0 } else { c.to_bits() };
            bits.hash(state);
        }
    }
}

impl fmt::Display for Float3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.z)
    }
}
