use crate::common::error::Result;
use crate::common::layout::cast_slice;
use std::fmt;
use zerocopy_derive::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Two packed floats, mainly used for texture coordinates.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout,
)]
#[repr(C)]
pub struct Float2 {
    pub x: f32,
    pub y: f32,
}

const _: () = assert!(std::mem::size_of::<Float2>() == 8);
const _: () = assert!(std::mem::align_of::<Float2>() == 4);

impl Float2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// View a packed byte buffer as `Float2` values without copying.
    pub fn slice_from_bytes(bytes: &[u8]) -> Result<&[Float2]> {
        cast_slice(bytes)
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl From<[f32; 2]> for Float2 {
    #[inline]
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Float2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zerocopy::IntoBytes;

    #[test]
    fn test_display() {
        assert_eq!(Float2::new(1.5, -2.0).to_string(), "1.5, -2");
    }

    #[test]
    fn test_slice_from_bytes() {
        let src = [Float2::new(1.0, 2.0), Float2::new(3.0, 4.0)];
        let view = Float2::slice_from_bytes(src.as_bytes()).unwrap();
        assert_eq!(view, &src);
    }
}
