//! Unified error types for topia-math.
//!
//! Only the buffer boundary (byte casts, checked aligned loads, checked
//! gathers) reports errors; see [`types::Error`].

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
