use crate::vector::{
    DEFAULT_CLOSE_TOLERANCE_SQ, DEFAULT_NORMALIZED_TOLERANCE, SWIZZLE_W, SWIZZLE_X, SWIZZLE_Y,
    SWIZZLE_Z, Vec3, Vec4,
};
use std::fmt;
use std::ops::{Mul, Neg};

/// Rotation quaternion stored as `(x, y, z, w)` with `w` the real part.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct Quat {
    value: Vec4,
}

impl Quat {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self {
            value: Vec4::new(x, y, z, w),
        }
    }

    #[inline]
    pub const fn from_vec4(value: Vec4) -> Self {
        Self { value }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Rotation of `angle` radians around `axis`, which must be normalized.
    pub fn rotation(axis: Vec3, angle: f32) -> Self {
        debug_assert!(axis.is_normalized(), "rotation axis must be normalized");
        let (s, c) = (0.5 * angle).sin_cos();
        Self::from_vec4(Vec4::from_vec3(axis * s, c))
    }

    #[inline]
    pub const fn x(self) -> f32 {
        self.value.x()
    }

    #[inline]
    pub const fn y(self) -> f32 {
        self.value.y()
    }

    #[inline]
    pub const fn z(self) -> f32 {
        self.value.z()
    }

    #[inline]
    pub const fn w(self) -> f32 {
        self.value.w()
    }

    /// Imaginary part
    #[inline]
    pub fn xyz(self) -> Vec3 {
        Vec3::from(self.value)
    }

    #[inline]
    pub const fn xyzw(self) -> Vec4 {
        self.value
    }

    #[inline]
    pub fn length_sq(self) -> f32 {
        self.value.length_sq()
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.value.length()
    }

    #[inline]
    pub fn normalized(self) -> Self {
        Self::from_vec4(self.value.normalized())
    }

    #[inline]
    pub fn is_normalized(self) -> bool {
        self.value.is_normalized_within(DEFAULT_NORMALIZED_TOLERANCE)
    }

    #[inline]
    pub fn is_close(self, other: Quat) -> bool {
        self.value.is_close_within(other.value, DEFAULT_CLOSE_TOLERANCE_SQ)
    }

    #[inline]
    pub fn conjugated(self) -> Self {
        Self::from_vec4(self.value * Vec4::new(-1.0, -1.0, -1.0, 1.0))
    }

    /// Multiplicative inverse; equals [`conjugated`](Self::conjugated) for unit quaternions.
    #[inline]
    pub fn inversed(self) -> Self {
        Self::from_vec4(self.conjugated().value / self.length_sq())
    }

    #[inline]
    pub fn dot(self, other: Quat) -> f32 {
        self.value.dot(other.value)
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::identity()
    }
}

/// Hamilton product: `(a * b) * v` rotates by `b` first.
impl Mul for Quat {
    type Output = Quat;

    fn mul(self, rhs: Quat) -> Quat {
        let l = self.value;
        let r = rhs.value;
        let x_terms = r.swizzle::<SWIZZLE_W, SWIZZLE_Z, SWIZZLE_Y, SWIZZLE_X>()
            * Vec4::new(1.0, -1.0, 1.0, -1.0);
        let y_terms = r.swizzle::<SWIZZLE_Z, SWIZZLE_W, SWIZZLE_X, SWIZZLE_Y>()
            * Vec4::new(1.0, 1.0, -1.0, -1.0);
        let z_terms = r.swizzle::<SWIZZLE_Y, SWIZZLE_X, SWIZZLE_W, SWIZZLE_Z>()
            * Vec4::new(-1.0, 1.0, 1.0, -1.0);
        Quat::from_vec4(
            l.splat_x() * x_terms + l.splat_y() * y_terms + l.splat_z() * z_terms + l.splat_w() * r,
        )
    }
}

/// Rotate a vector by a unit quaternion.
impl Mul<Vec3> for Quat {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Vec3 {
        debug_assert!(self.is_normalized(), "rotating by a non-unit quaternion");
        let axis = self.xyz();
        let t = axis.cross(v) * 2.0;
        v + t * self.w() + axis.cross(t)
    }
}

impl Mul<f32> for Quat {
    type Output = Quat;

    #[inline]
    fn mul(self, rhs: f32) -> Quat {
        Quat::from_vec4(self.value * rhs)
    }
}

impl Neg for Quat {
    type Output = Quat;

    #[inline]
    fn neg(self) -> Quat {
        Quat::from_vec4(-self.value)
    }
}

impl fmt::Display for Quat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}
