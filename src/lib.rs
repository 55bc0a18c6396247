//! Topia Math - SIMD vector and matrix types for real-time 3D transforms
//!
//! Every type is a plain `Copy` value. Arithmetic runs on a backend chosen at
//! compile time: SSE (with SSE4.1, FMA, AVX and AVX2 paths when those target
//! features are enabled) on x86_64, NEON on aarch64 and a portable scalar
//! backend everywhere else or with the `force-scalar` feature.
//!
//! # Features
//!
//! - **Storage types**: [`Float2`], [`Float3`] and [`Float4`] are packed,
//!   naturally aligned containers for mesh and buffer data
//! - **Vectors**: [`Vec3`] and [`Vec4`] with compile-time swizzles, a
//!   branch-free 4-lane sorting network and guarded normalization
//! - **Masks**: [`UVec4`] lanes are true when their highest bit is set, which
//!   is what the float comparisons produce
//! - **8-wide**: [`Vec8`] and [`UVec8`] for batched work, built from two halves
//! - **Transforms**: [`Mat44`] (column-major) and [`Quat`]
//!
//! # Example
//!
//! ```
//! use topia_math::{Mat44, Quat, Vec3, HALF_PI};
//!
//! let rotate = Quat::rotation(Vec3::axis_z(), HALF_PI);
//! let transform = Mat44::rotation_translation(rotate, Vec3::new(0.0, 0.0, 5.0));
//!
//! let p = transform * Vec3::axis_x();
//! assert!(p.is_close_within(Vec3::new(0.0, 1.0, 5.0), 1.0e-10));
//!
//! let back = transform.inversed_rotation_translation() * p;
//! assert!(back.is_close_within(Vec3::axis_x(), 1.0e-10));
//! ```
//!
//! # Example - Uploading a matrix
//!
//! ```
//! use topia_math::{Float4, Mat44, Vec3};
//!
//! let view = Mat44::look_at(Vec3::new(0.0, 2.0, -10.0), Vec3::zero(), Vec3::up());
//!
//! // Column-major, ready for a constant buffer
//! let flat: [f32; 16] = view.to_column_major();
//! assert_eq!(flat[15], 1.0);
//!
//! let mut columns = [Float4::default(); 4];
//! view.store_float4x4(&mut columns);
//! assert_eq!(Mat44::load_float4x4(&columns), view);
//! ```

/// Bulk transforms and queries over packed point arrays
pub mod batch;

/// Errors, the SIMD backend and scalar helpers
pub mod common;

/// Packed storage types
pub mod float;

/// Quaternions and 4x4 matrices
pub mod matrix;

/// SIMD vector and mask types
pub mod vector;

// Re-export commonly used types for convenience
pub use common::utils::{HALF_PI, PI, TWO_PI};
pub use common::{Error, Result, backend_name, log_backend};
pub use float::{Float2, Float3, Float4, VertexList};
pub use matrix::{Mat44, Quat};
pub use vector::{
    LaneMask, SWIZZLE_UNUSED, SWIZZLE_W, SWIZZLE_X, SWIZZLE_Y, SWIZZLE_Z, UVec4, UVec8, Vec3,
    Vec4, Vec8,
};
