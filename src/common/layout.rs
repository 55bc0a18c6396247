//! Buffer boundary checks shared by the storage and vector types.
//!
//! Byte views go through zerocopy so the layout requirements are checked by
//! the trait bounds; only length and address alignment are checked at runtime.

use crate::common::error::{Error, Result};
use crate::common::utils::is_aligned;
use zerocopy::{FromBytes, Immutable};

/// View a byte buffer as a slice of `T` without copying.
pub(crate) fn cast_slice<T>(bytes: &[u8]) -> Result<&[T]>
where
    T: FromBytes + Immutable,
{
    <[T] as FromBytes>::ref_from_bytes(bytes).map_err(|e| {
        let err = Error::from(e);
        log::debug!("rejected {}-byte buffer cast: {}", bytes.len(), err);
        err
    })
}

/// Fail unless `ptr` sits on a `required`-byte boundary.
pub(crate) fn check_alignment<T>(ptr: *const T, required: usize) -> Result<()> {
    let address = ptr as usize;
    if is_aligned(address, required) {
        Ok(())
    } else {
        log::debug!("rejected aligned access at {address:#x}, needs {required} bytes");
        Err(Error::Misaligned { address, required })
    }
}

/// Fail unless `got` holds at least `expected` elements.
pub(crate) fn check_min_len(expected: usize, got: usize) -> Result<()> {
    if got >= expected {
        Ok(())
    } else {
        log::debug!("rejected buffer of {got} elements, needs {expected}");
        Err(Error::ElementCount { expected, got })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_slice_length() {
        let words = [0u32; 3];
        let view = zerocopy::IntoBytes::as_bytes(&words[..]);
        let floats: &[f32] = cast_slice(view).unwrap();
        assert_eq!(floats.len(), 3);

        let err = cast_slice::<f32>(&view[..7]).unwrap_err();
        assert_eq!(
            err,
            Error::BufferLength {
                expected: 4,
                got: 7
            }
        );
    }

    #[test]
    fn test_check_alignment() {
        let data = [0u32; 8];
        let base = data.as_ptr();
        assert!(check_alignment(base, 4).is_ok());
        let odd = (base as usize + 2) as *const u32;
        assert!(matches!(
            check_alignment(odd, 4),
            Err(Error::Misaligned { required: 4, .. })
        ));
    }

    #[test]
    fn test_check_min_len() {
        assert!(check_min_len(4, 4).is_ok());
        assert_eq!(
            check_min_len(4, 3),
            Err(Error::ElementCount {
                expected: 4,
                got: 3
            })
        );
    }
}
