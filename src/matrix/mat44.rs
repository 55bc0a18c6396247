use super::Quat;
use crate::common::error::Result;
use crate::common::layout::{check_alignment, check_min_len};
use crate::float::Float4;
use crate::vector::{SWIZZLE_W, SWIZZLE_X, SWIZZLE_Y, SWIZZLE_Z, Vec3, Vec4};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};

const AXIS_W: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);

/// 4x4 float matrix stored as four [`Vec4`] columns.
///
/// Column 3 holds the translation of an affine transform. As a transform,
/// `a * b * v` applies `b` first.
#[derive(Debug, Clone, Copy)]
#[repr(C, align(16))]
pub struct Mat44 {
    cols: [Vec4; 4],
}

const _: () = assert!(std::mem::size_of::<Mat44>() == 64);
const _: () = assert!(std::mem::align_of::<Mat44>() == 16);

impl Mat44 {
    #[inline]
    pub const fn new(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(Vec4::zero(), Vec4::zero(), Vec4::zero(), Vec4::zero())
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::new(
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            AXIS_W,
        )
    }

    #[inline]
    pub const fn nan() -> Self {
        Self::new(Vec4::nan(), Vec4::nan(), Vec4::nan(), Vec4::nan())
    }

    pub fn load_float4x4(m: &[Float4; 4]) -> Self {
        Self::new(
            Vec4::load_float4(&m[0]),
            Vec4::load_float4(&m[1]),
            Vec4::load_float4(&m[2]),
            Vec4::load_float4(&m[3]),
        )
    }

    /// Load 4 consecutive columns from a 16-byte aligned address.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading 4 [`Float4`] and aligned to 16 bytes.
    pub unsafe fn load_float4x4_aligned(ptr: *const Float4) -> Self {
        unsafe {
            Self::new(
                Vec4::load_float4_aligned(ptr),
                Vec4::load_float4_aligned(ptr.add(1)),
                Vec4::load_float4_aligned(ptr.add(2)),
                Vec4::load_float4_aligned(ptr.add(3)),
            )
        }
    }

    /// Checked form of [`Mat44::load_float4x4_aligned`] over the start of a slice.
    pub fn try_load_float4x4_aligned(m: &[Float4]) -> Result<Self> {
        check_min_len(4, m.len())?;
        check_alignment(m.as_ptr(), 16)?;
        // SAFETY: 4 columns are present and the alignment was just checked.
        Ok(unsafe { Self::load_float4x4_aligned(m.as_ptr()) })
    }

    /// Build from the first 16 floats of a column-major buffer.
    pub fn from_column_major(data: &[f32]) -> Result<Self> {
        check_min_len(16, data.len())?;
        let col = |i: usize| Vec4::new(data[i * 4], data[i * 4 + 1], data[i * 4 + 2], data[i * 4 + 3]);
        Ok(Self::new(col(0), col(1), col(2), col(3)))
    }

    /// Flat column-major copy, the layout uploaded to constant buffers.
    pub fn to_column_major(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        for (chunk, col) in out.chunks_exact_mut(4).zip(&self.cols) {
            chunk.copy_from_slice(&col.to_array());
        }
        out
    }

    /// Rotation of `angle` radians around the X axis
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, c, s, 0.0),
            Vec4::new(0.0, -s, c, 0.0),
            AXIS_W,
        )
    }

    /// Rotation of `angle` radians around the Y axis
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(
            Vec4::new(c, 0.0, -s, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(s, 0.0, c, 0.0),
            AXIS_W,
        )
    }

    /// Rotation of `angle` radians around the Z axis
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(
            Vec4::new(c, s, 0.0, 0.0),
            Vec4::new(-s, c, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            AXIS_W,
        )
    }

    /// Rotation of `angle` radians around a normalized `axis`
    pub fn rotation_axis(axis: Vec3, angle: f32) -> Self {
        Self::rotation(Quat::rotation(axis, angle))
    }

    /// Rotation matrix of a unit quaternion.
    pub fn rotation(q: Quat) -> Self {
        debug_assert!(q.is_normalized(), "rotation from a non-unit quaternion");
        let (x, y, z, w) = (q.x(), q.y(), q.z(), q.w());
        let (tx, ty, tz) = (x + x, y + y, z + z);
        let (xx, yy, zz) = (tx * x, ty * y, tz * z);
        let (xy, xz, yz) = (tx * y, tx * z, ty * z);
        let (xw, yw, zw) = (tx * w, ty * w, tz * w);
        Self::new(
            Vec4::new((1.0 - yy) - zz, xy + zw, xz - yw, 0.0),
            Vec4::new(xy - zw, (1.0 - zz) - xx, yz + xw, 0.0),
            Vec4::new(xz + yw, yz - xw, (1.0 - xx) - yy, 0.0),
            AXIS_W,
        )
    }

    pub fn translation(v: Vec3) -> Self {
        let mut m = Self::identity();
        m.set_translation(v);
        m
    }

    /// Rigid transform rotating by `r` then translating by `t`.
    pub fn rotation_translation(r: Quat, t: Vec3) -> Self {
        let mut m = Self::rotation(r);
        m.set_translation(t);
        m
    }

    /// Closed-form inverse of [`rotation_translation`](Self::rotation_translation).
    pub fn inverse_rotation_translation(r: Quat, t: Vec3) -> Self {
        let mut m = Self::rotation(r.conjugated());
        m.set_translation(-m.multiply_3x3(t));
        m
    }

    /// Uniform scale
    pub fn scale(factor: f32) -> Self {
        Self::scale_vec(Vec3::replicate(factor))
    }

    pub fn scale_vec(v: Vec3) -> Self {
        Self::new(
            Vec4::new(v.x(), 0.0, 0.0, 0.0),
            Vec4::new(0.0, v.y(), 0.0, 0.0),
            Vec4::new(0.0, 0.0, v.z(), 0.0),
            AXIS_W,
        )
    }

    /// `v1 * v2^T` in the upper 3x3.
    pub fn outer_product(v1: Vec3, v2: Vec3) -> Self {
        let v1 = Vec4::from_vec3(v1, 0.0);
        Self::new(v1 * v2.splat_x(), v1 * v2.splat_y(), v1 * v2.splat_z(), AXIS_W)
    }

    /// Matrix form of `v.cross(..)`.
    pub fn cross_product(v: Vec3) -> Self {
        let (x, y, z) = (v.x(), v.y(), v.z());
        Self::new(
            Vec4::new(0.0, z, -y, 0.0),
            Vec4::new(-z, 0.0, x, 0.0),
            Vec4::new(y, -x, 0.0, 0.0),
            AXIS_W,
        )
    }

    /// Matrix `m` such that `m * p.xyzw() == (q * p).xyzw()`.
    pub fn quat_left_multiply(q: Quat) -> Self {
        let q = q.xyzw();
        Self::new(
            q.swizzle::<SWIZZLE_W, SWIZZLE_Z, SWIZZLE_Y, SWIZZLE_X>() * Vec4::new(1.0, 1.0, -1.0, -1.0),
            q.swizzle::<SWIZZLE_Z, SWIZZLE_W, SWIZZLE_X, SWIZZLE_Y>() * Vec4::new(-1.0, 1.0, 1.0, -1.0),
            q.swizzle::<SWIZZLE_Y, SWIZZLE_X, SWIZZLE_W, SWIZZLE_Z>() * Vec4::new(1.0, -1.0, 1.0, -1.0),
            q,
        )
    }

    /// Matrix `m` such that `m * p.xyzw() == (p * q).xyzw()`.
    pub fn quat_right_multiply(q: Quat) -> Self {
        let q = q.xyzw();
        Self::new(
            q.swizzle::<SWIZZLE_W, SWIZZLE_Z, SWIZZLE_Y, SWIZZLE_X>() * Vec4::new(1.0, -1.0, 1.0, -1.0),
            q.swizzle::<SWIZZLE_Z, SWIZZLE_W, SWIZZLE_X, SWIZZLE_Y>() * Vec4::new(1.0, 1.0, -1.0, -1.0),
            q.swizzle::<SWIZZLE_Y, SWIZZLE_X, SWIZZLE_W, SWIZZLE_Z>() * Vec4::new(-1.0, 1.0, 1.0, -1.0),
            q,
        )
    }

    #[inline]
    pub fn element(&self, row: usize, col: usize) -> f32 {
        debug_assert!(row < 4 && col < 4, "Mat44 element ({row}, {col}) out of range");
        self.cols[col][row]
    }

    #[inline]
    pub fn set_element(&mut self, row: usize, col: usize, value: f32) {
        debug_assert!(row < 4 && col < 4, "Mat44 element ({row}, {col}) out of range");
        self.cols[col][row] = value;
    }

    #[inline]
    pub fn is_close(&self, other: &Mat44) -> bool {
        self.is_close_within(other, crate::vector::DEFAULT_CLOSE_TOLERANCE_SQ)
    }

    /// Every column within `max_dist_sq` squared distance of the matching column.
    pub fn is_close_within(&self, other: &Mat44, max_dist_sq: f32) -> bool {
        self.cols
            .iter()
            .zip(&other.cols)
            .all(|(a, b)| a.is_close_within(*b, max_dist_sq))
    }

    /// Upper 3x3 times `v`, ignoring translation.
    #[inline]
    pub fn multiply_3x3(&self, v: Vec3) -> Vec3 {
        Vec3::from(
            self.cols[0] * v.splat_x() + self.cols[1] * v.splat_y() + self.cols[2] * v.splat_z(),
        )
    }

    /// Transpose of the upper 3x3 times `v`.
    #[inline]
    pub fn multiply_3x3_transposed(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.axis_x().dot(v),
            self.axis_y().dot(v),
            self.axis_z().dot(v),
        )
    }

    /// Product of the upper 3x3 parts; row and column 3 are those of the identity.
    pub fn multiply_3x3_mat(&self, rhs: &Mat44) -> Mat44 {
        let col = |i: usize| Vec4::from_vec3(self.multiply_3x3(Vec3::from(rhs.cols[i])), 0.0);
        Mat44::new(col(0), col(1), col(2), AXIS_W)
    }

    /// `self^T * rhs` over the upper 3x3.
    pub fn multiply_3x3_left_transposed(&self, rhs: &Mat44) -> Mat44 {
        self.transposed_3x3().multiply_3x3_mat(rhs)
    }

    /// `self * rhs^T` over the upper 3x3.
    pub fn multiply_3x3_right_transposed(&self, rhs: &Mat44) -> Mat44 {
        self.multiply_3x3_mat(&rhs.transposed_3x3())
    }

    #[inline]
    pub fn axis_x(&self) -> Vec3 {
        Vec3::from(self.cols[0])
    }

    #[inline]
    pub fn set_axis_x(&mut self, v: Vec3) {
        self.cols[0] = Vec4::from_vec3(v, 0.0);
    }

    #[inline]
    pub fn axis_y(&self) -> Vec3 {
        Vec3::from(self.cols[1])
    }

    #[inline]
    pub fn set_axis_y(&mut self, v: Vec3) {
        self.cols[1] = Vec4::from_vec3(v, 0.0);
    }

    #[inline]
    pub fn axis_z(&self) -> Vec3 {
        Vec3::from(self.cols[2])
    }

    #[inline]
    pub fn set_axis_z(&mut self, v: Vec3) {
        self.cols[2] = Vec4::from_vec3(v, 0.0);
    }

    /// Translation held in column 3
    #[inline]
    pub fn translation_part(&self) -> Vec3 {
        Vec3::from(self.cols[3])
    }

    #[inline]
    pub fn set_translation(&mut self, v: Vec3) {
        self.cols[3] = Vec4::from_vec3(v, 1.0);
    }

    #[inline]
    pub fn diagonal3(&self) -> Vec3 {
        Vec3::new(self.cols[0].x(), self.cols[1].y(), self.cols[2].z())
    }

    pub fn set_diagonal3(&mut self, v: Vec3) {
        self.cols[0].set_x(v.x());
        self.cols[1].set_y(v.y());
        self.cols[2].set_z(v.z());
    }

    #[inline]
    pub fn diagonal4(&self) -> Vec4 {
        Vec4::new(self.cols[0].x(), self.cols[1].y(), self.cols[2].z(), self.cols[3].w())
    }

    pub fn set_diagonal4(&mut self, v: Vec4) {
        self.set_diagonal3(Vec3::from(v));
        self.cols[3].set_w(v.w());
    }

    #[inline]
    pub fn column3(&self, col: usize) -> Vec3 {
        debug_assert!(col < 4, "Mat44 column {col} out of range");
        Vec3::from(self.cols[col])
    }

    /// Overwrite XYZ of a column, clearing W.
    #[inline]
    pub fn set_column3(&mut self, col: usize, v: Vec3) {
        debug_assert!(col < 4, "Mat44 column {col} out of range");
        self.cols[col] = Vec4::from_vec3(v, if col == 3 { 1.0 } else { 0.0 });
    }

    #[inline]
    pub fn column4(&self, col: usize) -> Vec4 {
        debug_assert!(col < 4, "Mat44 column {col} out of range");
        self.cols[col]
    }

    #[inline]
    pub fn set_column4(&mut self, col: usize, v: Vec4) {
        debug_assert!(col < 4, "Mat44 column {col} out of range");
        self.cols[col] = v;
    }

    pub fn store_float4x4(&self, out: &mut [Float4; 4]) {
        for (dst, col) in out.iter_mut().zip(&self.cols) {
            col.store_float4(dst);
        }
    }

    pub fn transposed(&self) -> Mat44 {
        let [c0, c1, c2, c3] = self.cols;
        let row = |i: usize| Vec4::new(c0[i], c1[i], c2[i], c3[i]);
        Mat44::new(row(0), row(1), row(2), row(3))
    }

    /// Transpose of the upper 3x3; row and column 3 are those of the identity.
    pub fn transposed_3x3(&self) -> Mat44 {
        let [c0, c1, c2, _] = self.cols;
        let row = |i: usize| Vec4::new(c0[i], c1[i], c2[i], 0.0);
        Mat44::new(row(0), row(1), row(2), AXIS_W)
    }

    /// General inverse by cofactor expansion. A singular matrix yields
    /// non-finite elements.
    pub fn inversed(&self) -> Mat44 {
        let a = |r: usize, c: usize| self.cols[c][r];

        let s0 = a(0, 0) * a(1, 1) - a(1, 0) * a(0, 1);
        let s1 = a(0, 0) * a(1, 2) - a(1, 0) * a(0, 2);
        let s2 = a(0, 0) * a(1, 3) - a(1, 0) * a(0, 3);
        let s3 = a(0, 1) * a(1, 2) - a(1, 1) * a(0, 2);
        let s4 = a(0, 1) * a(1, 3) - a(1, 1) * a(0, 3);
        let s5 = a(0, 2) * a(1, 3) - a(1, 2) * a(0, 3);

        let c5 = a(2, 2) * a(3, 3) - a(3, 2) * a(2, 3);
        let c4 = a(2, 1) * a(3, 3) - a(3, 1) * a(2, 3);
        let c3 = a(2, 1) * a(3, 2) - a(3, 1) * a(2, 2);
        let c2 = a(2, 0) * a(3, 3) - a(3, 0) * a(2, 3);
        let c1 = a(2, 0) * a(3, 2) - a(3, 0) * a(2, 2);
        let c0 = a(2, 0) * a(3, 1) - a(3, 0) * a(2, 1);

        let det = s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0;
        let inv = 1.0 / det;

        // b(r, c) laid out per column
        Mat44::new(
            Vec4::new(
                a(1, 1) * c5 - a(1, 2) * c4 + a(1, 3) * c3,
                -a(1, 0) * c5 + a(1, 2) * c2 - a(1, 3) * c1,
                a(1, 0) * c4 - a(1, 1) * c2 + a(1, 3) * c0,
                -a(1, 0) * c3 + a(1, 1) * c1 - a(1, 2) * c0,
            ) * inv,
            Vec4::new(
                -a(0, 1) * c5 + a(0, 2) * c4 - a(0, 3) * c3,
                a(0, 0) * c5 - a(0, 2) * c2 + a(0, 3) * c1,
                -a(0, 0) * c4 + a(0, 1) * c2 - a(0, 3) * c0,
                a(0, 0) * c3 - a(0, 1) * c1 + a(0, 2) * c0,
            ) * inv,
            Vec4::new(
                a(3, 1) * s5 - a(3, 2) * s4 + a(3, 3) * s3,
                -a(3, 0) * s5 + a(3, 2) * s2 - a(3, 3) * s1,
                a(3, 0) * s4 - a(3, 1) * s2 + a(3, 3) * s0,
                -a(3, 0) * s3 + a(3, 1) * s1 - a(3, 2) * s0,
            ) * inv,
            Vec4::new(
                -a(2, 1) * s5 + a(2, 2) * s4 - a(2, 3) * s3,
                a(2, 0) * s5 - a(2, 2) * s2 + a(2, 3) * s1,
                -a(2, 0) * s4 + a(2, 1) * s2 - a(2, 3) * s0,
                a(2, 0) * s3 - a(2, 1) * s1 + a(2, 2) * s0,
            ) * inv,
        )
    }

    /// Inverse of a matrix holding only rotation and translation.
    pub fn inversed_rotation_translation(&self) -> Mat44 {
        let mut m = self.transposed_3x3();
        m.set_translation(-m.multiply_3x3(self.translation_part()));
        m
    }

    pub fn determinant_3x3(&self) -> f32 {
        self.axis_x().dot(self.axis_y().cross(self.axis_z()))
    }

    /// Adjugate of the upper 3x3; row and column 3 are those of the identity.
    pub fn adjointed_3x3(&self) -> Mat44 {
        let (x, y, z) = (self.axis_x(), self.axis_y(), self.axis_z());
        Mat44::new(
            Vec4::from_vec3(y.cross(z), 0.0),
            Vec4::from_vec3(z.cross(x), 0.0),
            Vec4::from_vec3(x.cross(y), 0.0),
            AXIS_W,
        )
        .transposed_3x3()
    }

    /// Inverse of the upper 3x3; row and column 3 are those of the identity.
    pub fn inversed_3x3(&self) -> Mat44 {
        let inv_det = 1.0 / self.determinant_3x3();
        let adj = self.adjointed_3x3();
        Mat44::new(
            adj.cols[0] * inv_det,
            adj.cols[1] * inv_det,
            adj.cols[2] * inv_det,
            AXIS_W,
        )
    }

    /// Upper 3x3 with the translation column reset; W lanes of the axes are kept.
    pub fn rotation_part(&self) -> Mat44 {
        Mat44::new(self.cols[0], self.cols[1], self.cols[2], AXIS_W)
    }

    /// Upper 3x3 with the bottom row cleared as well.
    pub fn rotation_safe(&self) -> Mat44 {
        Mat44::new(
            Vec4::from_vec3(self.axis_x(), 0.0),
            Vec4::from_vec3(self.axis_y(), 0.0),
            Vec4::from_vec3(self.axis_z(), 0.0),
            AXIS_W,
        )
    }

    /// Replace the first 3 columns with those of `rotation`.
    pub fn set_rotation(&mut self, rotation: &Mat44) {
        self.cols[..3].copy_from_slice(&rotation.cols[..3]);
    }

    /// Unit quaternion of the rotation part, branching on the largest
    /// diagonal term so the divisor stays away from zero.
    pub fn quaternion(&self) -> Quat {
        let m = |r: usize, c: usize| self.cols[c][r];
        let trace = m(0, 0) + m(1, 1) + m(2, 2);

        if trace >= 0.0 {
            let s = (trace + 1.0).sqrt();
            let w = 0.5 * s;
            let s = 0.5 / s;
            return Quat::new(
                (m(2, 1) - m(1, 2)) * s,
                (m(0, 2) - m(2, 0)) * s,
                (m(1, 0) - m(0, 1)) * s,
                w,
            );
        }

        if m(0, 0) >= m(1, 1) && m(0, 0) >= m(2, 2) {
            let s = (m(0, 0) - (m(1, 1) + m(2, 2)) + 1.0).sqrt();
            let x = 0.5 * s;
            let s = 0.5 / s;
            Quat::new(
                x,
                (m(0, 1) + m(1, 0)) * s,
                (m(2, 0) + m(0, 2)) * s,
                (m(2, 1) - m(1, 2)) * s,
            )
        } else if m(1, 1) >= m(2, 2) {
            let s = (m(1, 1) - (m(2, 2) + m(0, 0)) + 1.0).sqrt();
            let y = 0.5 * s;
            let s = 0.5 / s;
            Quat::new(
                (m(0, 1) + m(1, 0)) * s,
                y,
                (m(1, 2) + m(2, 1)) * s,
                (m(0, 2) - m(2, 0)) * s,
            )
        } else {
            let s = (m(2, 2) - (m(0, 0) + m(1, 1)) + 1.0).sqrt();
            let z = 0.5 * s;
            let s = 0.5 / s;
            Quat::new(
                (m(2, 0) + m(0, 2)) * s,
                (m(1, 2) + m(2, 1)) * s,
                z,
                (m(1, 0) - m(0, 1)) * s,
            )
        }
    }

    /// Matrix that transforms directions (normals) like this matrix does;
    /// lengths are not preserved.
    pub fn direction_preserving_matrix(&self) -> Mat44 {
        self.rotation_part().inversed_3x3().transposed_3x3()
    }

    /// `self * Mat44::scale_vec(scale)`
    pub fn pre_scaled(&self, scale: Vec3) -> Mat44 {
        Mat44::new(
            self.cols[0] * scale.x(),
            self.cols[1] * scale.y(),
            self.cols[2] * scale.z(),
            self.cols[3],
        )
    }

    /// `Mat44::scale_vec(scale) * self`
    pub fn post_scaled(&self, scale: Vec3) -> Mat44 {
        let s = Vec4::from_vec3(scale, 1.0);
        Mat44::new(
            self.cols[0] * s,
            self.cols[1] * s,
            self.cols[2] * s,
            self.cols[3] * s,
        )
    }

    /// Split into an orthonormal rotation plus translation and a per-axis
    /// scale, so that `self == rotation * Mat44::scale_vec(scale)`.
    ///
    /// The axes are orthogonalized with modified Gram-Schmidt, so the
    /// equality only holds when the axes were already orthogonal. A
    /// mirrored basis reports a negative Z scale.
    pub fn decompose(&self) -> (Mat44, Vec3) {
        let x = self.axis_x();
        let mut y = self.axis_y();
        let mut z = self.axis_z();

        let x_dot_x = x.length_sq();
        y -= x * (x.dot(y) / x_dot_x);
        z -= x * (x.dot(z) / x_dot_x);
        let y_dot_y = y.length_sq();
        z -= y * (y.dot(z) / y_dot_y);
        let z_dot_z = z.length_sq();

        let z_sign = if x.cross(y).dot(z) < 0.0 { -1.0 } else { 1.0 };
        let scale = Vec3::new(x_dot_x.sqrt(), y_dot_y.sqrt(), z_sign * z_dot_z.sqrt());

        let rotation = Mat44::new(
            Vec4::from_vec3(x / scale.x(), 0.0),
            Vec4::from_vec3(y / scale.y(), 0.0),
            Vec4::from_vec3(z / scale.z(), 0.0),
            self.cols[3],
        );
        (rotation, scale)
    }
}

impl Default for Mat44 {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialEq for Mat44 {
    fn eq(&self, other: &Self) -> bool {
        self.cols == other.cols
    }
}

/// Multiplying by the identity returns a matrix `==` to the input when every
/// element is finite. Signed zeros are not kept: a `-0.0` element comes back
/// as `0.0`, and an infinite element turns its zero products into NaN.
impl Mul for Mat44 {
    type Output = Mat44;

    fn mul(self, rhs: Mat44) -> Mat44 {
        Mat44::new(
            self * rhs.cols[0],
            self * rhs.cols[1],
            self * rhs.cols[2],
            self * rhs.cols[3],
        )
    }
}

/// Transform a point: the translation column is added.
impl Mul<Vec3> for Mat44 {
    type Output = Vec3;

    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        Vec3::from(
            self.cols[0] * v.splat_x()
                + self.cols[1] * v.splat_y()
                + self.cols[2] * v.splat_z()
                + self.cols[3],
        )
    }
}

impl Mul<Vec4> for Mat44 {
    type Output = Vec4;

    #[inline]
    fn mul(self, v: Vec4) -> Vec4 {
        self.cols[0] * v.splat_x()
            + self.cols[1] * v.splat_y()
            + self.cols[2] * v.splat_z()
            + self.cols[3] * v.splat_w()
    }
}

impl Mul<f32> for Mat44 {
    type Output = Mat44;

    fn mul(self, rhs: f32) -> Mat44 {
        Mat44 {
            cols: self.cols.map(|c| c * rhs),
        }
    }
}

impl Mul<Mat44> for f32 {
    type Output = Mat44;

    fn mul(self, rhs: Mat44) -> Mat44 {
        rhs * self
    }
}

impl MulAssign<f32> for Mat44 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl Add for Mat44 {
    type Output = Mat44;

    fn add(self, rhs: Mat44) -> Mat44 {
        let mut out = self;
        out += rhs;
        out
    }
}

impl AddAssign for Mat44 {
    fn add_assign(&mut self, rhs: Mat44) {
        for (a, b) in self.cols.iter_mut().zip(rhs.cols) {
            *a += b;
        }
    }
}

impl Neg for Mat44 {
    type Output = Mat44;

    fn neg(self) -> Mat44 {
        Mat44 {
            cols: self.cols.map(|c| -c),
        }
    }
}

impl Sub for Mat44 {
    type Output = Mat44;

    fn sub(self, rhs: Mat44) -> Mat44 {
        let mut out = self;
        for (a, b) in out.cols.iter_mut().zip(rhs.cols) {
            *a -= b;
        }
        out
    }
}

impl fmt::Display for Mat44 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [c0, c1, c2, c3] = &self.cols;
        write!(f, "{c0}, {c1}, {c2}, {c3}")
    }
}
