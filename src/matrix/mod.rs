//! Rotation and transform types built from [`Vec4`](crate::Vec4) columns.
//!
//! [`Mat44`] is column-major: element `(row, col)` lives in lane `row` of
//! column `col`, and a flat 16-float buffer produced by
//! [`Mat44::to_column_major`] is what the rendering boundary uploads.

mod mat44;
mod quat;
mod view;

pub use mat44::Mat44;
pub use quat::Quat;
