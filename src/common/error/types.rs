//! Error types for the buffer boundary.
//!
//! Arithmetic on vectors and matrices never fails; degenerate input produces
//! IEEE-754 NaN or infinity instead. These errors only come from the checked
//! entry points that accept raw byte or float buffers.
use thiserror::Error;

/// Main error type for topia-math operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Byte buffer is not a whole number of elements
    #[error("Buffer length mismatch: {got} bytes is not a multiple of the {expected}-byte element")]
    BufferLength { expected: usize, got: usize },

    /// Address does not satisfy the alignment an aligned load or cast needs
    #[error("Misaligned buffer: address {address:#x} is not {required}-byte aligned")]
    Misaligned { address: usize, required: usize },

    /// Float buffer has the wrong number of elements
    #[error("Element count mismatch: expected {expected}, got {got}")]
    ElementCount { expected: usize, got: usize },

    /// Gather offset points outside the source slice
    #[error("Index {index} out of bounds for slice of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Result type for topia-math operations.
pub type Result<T> = std::result::Result<T, Error>;
