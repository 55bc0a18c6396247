//! Common infrastructure shared by the storage, vector and matrix types.
//!
//! Holds the error types, the compile-time selected SIMD backend, the buffer
//! boundary checks and the scalar helpers.

// Submodule declarations
pub mod error;
pub(crate) mod layout;
pub(crate) mod simd;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};
pub use simd::{backend_name, log_backend};
