//! Plain storage types.
//!
//! `Float2`, `Float3` and `Float4` are the exchange format with mesh data and
//! the rendering boundary: packed IEEE-754 single precision, natural 4-byte
//! alignment, component order X, Y, Z, W. They carry no arithmetic; load them
//! into [`Vec3`](crate::Vec3) or [`Vec4`](crate::Vec4) to compute.
//!
//! The layout is checked at compile time through the zerocopy derives and the
//! size assertions next to each type.

mod float2;
mod float3;
mod float4;

pub use float2::Float2;
pub use float3::{Float3, VertexList};
pub use float4::Float4;
