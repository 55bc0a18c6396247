//! Error conversion implementations.
//!
//! Maps zerocopy cast failures onto the crate error so the layout helpers can
//! use `?` directly.

use super::types::Error;
use zerocopy::{CastError, ConvertError};

impl<'a, T> From<CastError<&'a [u8], [T]>> for Error {
    fn from(err: CastError<&'a [u8], [T]>) -> Self {
        match err {
            ConvertError::Alignment(e) => Error::Misaligned {
                address: e.into_src().as_ptr() as usize,
                required: std::mem::align_of::<T>(),
            },
            ConvertError::Size(e) => Error::BufferLength {
                expected: std::mem::size_of::<T>(),
                got: e.into_src().len(),
            },
            ConvertError::Validity(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::Misaligned {
            address: 0x1004,
            required: 16,
        };
        assert_eq!(
            err.to_string(),
            "Misaligned buffer: address 0x1004 is not 16-byte aligned"
        );

        let err = Error::ElementCount {
            expected: 16,
            got: 12,
        };
        assert_eq!(err.to_string(), "Element count mismatch: expected 16, got 12");
    }
}
