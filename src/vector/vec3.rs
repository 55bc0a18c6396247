use super::{
    DEFAULT_CLOSE_TOLERANCE_SQ, DEFAULT_NORMALIZED_TOLERANCE, SWIZZLE_X, SWIZZLE_Y, SWIZZLE_Z,
    UVec4, Vec4, swizzle_lanes,
};
use crate::common::simd::{Active, Backend, from_bits, to_bits};
use crate::common::utils::{PI, TWO_PI};
use crate::float::Float3;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign};

const SIGN_BIT: u32 = 0x8000_0000;

/// Subdivision depth of the octahedron behind [`Vec3::unit_sphere`]
const UNIT_SPHERE_LEVELS: u32 = 3;

static UNIT_SPHERE: Lazy<Vec<Vec3>> = Lazy::new(build_unit_sphere);

/// Three float lanes stored in a 4-lane register.
///
/// Lane 3 always holds a copy of lane 2, so lane-wise division or square root
/// never touches an unrelated value in the unused lane.
#[derive(Debug, Clone, Copy, Default)]
#[repr(C, align(16))]
pub struct Vec3 {
    lanes: [f32; 4],
}

const _: () = assert!(std::mem::size_of::<Vec3>() == 16);
const _: () = assert!(std::mem::align_of::<Vec3>() == 16);

impl Vec3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            lanes: [x, y, z, z],
        }
    }

    /// Wrap lanes that already satisfy the W == Z invariant
    #[inline(always)]
    pub(crate) fn from_lanes(lanes: [f32; 4]) -> Self {
        let v = Self { lanes };
        v.check_w();
        v
    }

    /// Wrap arbitrary lanes, replacing W with Z
    #[inline(always)]
    pub(crate) const fn fix_w(lanes: [f32; 4]) -> Self {
        Self {
            lanes: [lanes[0], lanes[1], lanes[2], lanes[2]],
        }
    }

    #[inline(always)]
    pub(crate) const fn lanes(self) -> [f32; 4] {
        self.lanes
    }

    /// Debug check that lane 3 carries the same bits as lane 2
    #[inline(always)]
    pub(crate) fn check_w(&self) {
        debug_assert!(
            self.lanes[3].to_bits() == self.lanes[2].to_bits(),
            "Vec3 W lane {} does not shadow Z lane {}",
            self.lanes[3],
            self.lanes[2]
        );
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::replicate(0.0)
    }

    #[inline]
    pub const fn nan() -> Self {
        Self::replicate(f32::NAN)
    }

    #[inline]
    pub const fn one() -> Self {
        Self::replicate(1.0)
    }

    #[inline]
    pub const fn replicate(v: f32) -> Self {
        Self { lanes: [v; 4] }
    }

    #[inline]
    pub const fn axis_x() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn neg_axis_x() -> Self {
        Self::new(-1.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn axis_y() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    #[inline]
    pub const fn neg_axis_y() -> Self {
        Self::new(0.0, -1.0, 0.0)
    }

    #[inline]
    pub const fn axis_z() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn neg_axis_z() -> Self {
        Self::new(0.0, 0.0, -1.0)
    }

    #[inline]
    pub const fn forward() -> Self {
        Self::axis_z()
    }

    #[inline]
    pub const fn back() -> Self {
        Self::neg_axis_z()
    }

    #[inline]
    pub const fn left() -> Self {
        Self::neg_axis_x()
    }

    #[inline]
    pub const fn right() -> Self {
        Self::axis_x()
    }

    #[inline]
    pub const fn up() -> Self {
        Self::axis_y()
    }

    #[inline]
    pub const fn down() -> Self {
        Self::neg_axis_y()
    }

    #[inline]
    pub const fn load_float3(v: &Float3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// Load a `Float3` with one 16-byte read.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading 16 bytes, i.e. one float past the
    /// `Float3`. The extra float is discarded.
    #[inline]
    pub unsafe fn load_float3_unsafe(ptr: *const Float3) -> Self {
        let lanes = unsafe { ptr.cast::<[f32; 4]>().read_unaligned() };
        Self::fix_w(lanes)
    }

    /// Unit vector from spherical angles: `theta` in `[0, PI]` from the Z axis,
    /// `phi` in `[0, 2 PI]` counter clockwise from the X axis around Z.
    pub fn unit_spherical(theta: f32, phi: f32) -> Self {
        let (sin_theta, cos_theta) = theta.sin_cos();
        let (sin_phi, cos_phi) = phi.sin_cos();
        Self::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
    }

    /// Random unit vector from two draws of `uniform`, which must yield values
    /// in `[0, 1)`. The first draw picks `theta`, the second `phi`.
    ///
    /// Both angles are sampled uniformly, so directions cluster toward the
    /// poles.
    pub fn random_unit(mut uniform: impl FnMut() -> f32) -> Self {
        let theta = PI * uniform();
        let phi = TWO_PI * uniform();
        Self::unit_spherical(theta, phi)
    }

    /// Directions spread evenly over the unit sphere, built on first use.
    pub fn unit_sphere() -> &'static [Vec3] {
        &UNIT_SPHERE
    }

    // ------------------------------------------------------------------
    // Lane-wise statics
    // ------------------------------------------------------------------

    #[inline]
    pub fn min(a: Vec3, b: Vec3) -> Vec3 {
        Self::from_lanes(Active::min_f32(a.lanes, b.lanes))
    }

    #[inline]
    pub fn max(a: Vec3, b: Vec3) -> Vec3 {
        Self::from_lanes(Active::max_f32(a.lanes, b.lanes))
    }

    #[inline]
    pub fn clamp(v: Vec3, min: Vec3, max: Vec3) -> Vec3 {
        Self::min(Self::max(v, min), max)
    }

    #[inline]
    pub fn equals(a: Vec3, b: Vec3) -> UVec4 {
        UVec4::from_lanes(Active::eq_f32(a.lanes, b.lanes))
    }

    #[inline]
    pub fn less(a: Vec3, b: Vec3) -> UVec4 {
        UVec4::from_lanes(Active::lt_f32(a.lanes, b.lanes))
    }

    #[inline]
    pub fn less_or_equal(a: Vec3, b: Vec3) -> UVec4 {
        UVec4::from_lanes(Active::le_f32(a.lanes, b.lanes))
    }

    #[inline]
    pub fn greater(a: Vec3, b: Vec3) -> UVec4 {
        UVec4::from_lanes(Active::gt_f32(a.lanes, b.lanes))
    }

    #[inline]
    pub fn greater_or_equal(a: Vec3, b: Vec3) -> UVec4 {
        UVec4::from_lanes(Active::ge_f32(a.lanes, b.lanes))
    }

    #[inline]
    pub fn fused_multiply_add(mul1: Vec3, mul2: Vec3, add: Vec3) -> Vec3 {
        Self::from_lanes(Active::mul_add_f32(mul1.lanes, mul2.lanes, add.lanes))
    }

    /// Lane-wise `v2` where the control lane's highest bit is set, `v1`
    /// otherwise. The W lane of `control` is ignored.
    #[inline]
    pub fn select(v1: Vec3, v2: Vec3, control: UVec4) -> Vec3 {
        Self::fix_w(Active::select_f32(v1.lanes, v2.lanes, control.lanes()))
    }

    #[inline]
    pub fn or(a: Vec3, b: Vec3) -> Vec3 {
        Self::from_lanes(from_bits(Active::or_u32(to_bits(a.lanes), to_bits(b.lanes))))
    }

    #[inline]
    pub fn xor(a: Vec3, b: Vec3) -> Vec3 {
        Self::from_lanes(from_bits(Active::xor_u32(to_bits(a.lanes), to_bits(b.lanes))))
    }

    #[inline]
    pub fn and(a: Vec3, b: Vec3) -> Vec3 {
        Self::from_lanes(from_bits(Active::and_u32(to_bits(a.lanes), to_bits(b.lanes))))
    }

    // ------------------------------------------------------------------
    // Components
    // ------------------------------------------------------------------

    #[inline]
    pub const fn x(self) -> f32 {
        self.lanes[0]
    }

    #[inline]
    pub const fn y(self) -> f32 {
        self.lanes[1]
    }

    #[inline]
    pub const fn z(self) -> f32 {
        self.lanes[2]
    }

    #[inline]
    pub fn set_x(&mut self, x: f32) {
        self.lanes[0] = x;
    }

    #[inline]
    pub fn set_y(&mut self, y: f32) {
        self.lanes[1] = y;
    }

    #[inline]
    pub fn set_z(&mut self, z: f32) {
        self.lanes[2] = z;
        self.lanes[3] = z;
    }

    /// Set component 0, 1 or 2
    #[inline]
    pub fn set_component(&mut self, index: usize, value: f32) {
        debug_assert!(index < 3, "Vec3 component {index} out of range");
        self.lanes[..3][index] = value;
        self.lanes[3] = self.lanes[2];
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.lanes[0], self.lanes[1], self.lanes[2]]
    }

    // ------------------------------------------------------------------
    // Tests
    // ------------------------------------------------------------------

    #[inline]
    pub fn is_close(self, other: Vec3) -> bool {
        self.is_close_within(other, DEFAULT_CLOSE_TOLERANCE_SQ)
    }

    #[inline]
    pub fn is_close_within(self, other: Vec3, max_dist_sq: f32) -> bool {
        (other - self).length_sq() <= max_dist_sq
    }

    #[inline]
    pub fn is_near_zero(self) -> bool {
        self.is_near_zero_within(DEFAULT_CLOSE_TOLERANCE_SQ)
    }

    #[inline]
    pub fn is_near_zero_within(self, max_dist_sq: f32) -> bool {
        self.length_sq() <= max_dist_sq
    }

    #[inline]
    pub fn is_normalized(self) -> bool {
        self.is_normalized_within(DEFAULT_NORMALIZED_TOLERANCE)
    }

    #[inline]
    pub fn is_normalized_within(self, tolerance: f32) -> bool {
        (self.length_sq() - 1.0).abs() <= tolerance
    }

    #[inline]
    pub fn is_nan(self) -> bool {
        Active::sign_mask_u32(Active::eq_f32(self.lanes, self.lanes)) & 0b0111 != 0b0111
    }

    // ------------------------------------------------------------------
    // Lane shuffles
    // ------------------------------------------------------------------

    /// Permute X, Y and Z; the new W copies the new Z.
    #[inline]
    pub fn swizzle<const X: u32, const Y: u32, const Z: u32>(self) -> Vec3 {
        Self::from_lanes(swizzle_lanes::<f32, X, Y, Z, Z>(self.lanes))
    }

    #[inline]
    pub fn splat_x(self) -> Vec4 {
        Vec4::replicate(self.lanes[0])
    }

    #[inline]
    pub fn splat_y(self) -> Vec4 {
        Vec4::replicate(self.lanes[1])
    }

    #[inline]
    pub fn splat_z(self) -> Vec4 {
        Vec4::replicate(self.lanes[2])
    }

    /// Index of the smallest of X, Y and Z
    #[inline]
    pub fn lowest_component_index(self) -> usize {
        let [x, y, z, _] = self.lanes;
        if x < y {
            if z < x { 2 } else { 0 }
        } else if z < y {
            2
        } else {
            1
        }
    }

    /// Index of the largest of X, Y and Z
    #[inline]
    pub fn highest_component_index(self) -> usize {
        let [x, y, z, _] = self.lanes;
        if x > y {
            if z > x { 2 } else { 0 }
        } else if z > y {
            2
        } else {
            1
        }
    }

    // ------------------------------------------------------------------
    // Math
    // ------------------------------------------------------------------

    #[inline]
    pub fn abs(self) -> Vec3 {
        Self::from_lanes(from_bits(Active::and_u32(
            to_bits(self.lanes),
            [!SIGN_BIT; 4],
        )))
    }

    #[inline]
    pub fn reciprocal(self) -> Vec3 {
        Self::one() / self
    }

    #[inline]
    pub fn cross(self, other: Vec3) -> Vec3 {
        let t1 = self.swizzle::<SWIZZLE_Y, SWIZZLE_Z, SWIZZLE_X>()
            * other.swizzle::<SWIZZLE_Z, SWIZZLE_X, SWIZZLE_Y>();
        let t2 = self.swizzle::<SWIZZLE_Z, SWIZZLE_X, SWIZZLE_Y>()
            * other.swizzle::<SWIZZLE_Y, SWIZZLE_Z, SWIZZLE_X>();
        t1 - t2
    }

    /// Dot product of X, Y and Z, broadcast to every lane
    #[inline]
    pub fn dot_v(self, other: Vec3) -> Vec3 {
        Self::from_lanes(Active::dot3_f32(self.lanes, other.lanes))
    }

    /// Dot product of X, Y and Z, broadcast to every lane of a `Vec4`
    #[inline]
    pub fn dot_v4(self, other: Vec3) -> Vec4 {
        Vec4::from_lanes(Active::dot3_f32(self.lanes, other.lanes))
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> f32 {
        Active::dot3_f32(self.lanes, other.lanes)[0]
    }

    #[inline]
    pub fn length_sq(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    /// `self / self.length()`; NaN lanes for a zero vector.
    #[inline]
    pub fn normalized(self) -> Vec3 {
        self / self.dot_v(self).sqrt()
    }

    /// Normalize, or return `zero_value` when the length is too small to divide by.
    #[inline]
    pub fn normalized_or(self, zero_value: Vec3) -> Vec3 {
        let len_sq = self.dot_v(self);
        if len_sq.x() <= f32::MIN_POSITIVE {
            zero_value
        } else {
            self / len_sq.sqrt()
        }
    }

    /// A unit vector perpendicular to this one.
    pub fn normalized_perpendicular(self) -> Vec3 {
        let [x, y, z, _] = self.lanes;
        if x.abs() > y.abs() {
            let len = (x * x + z * z).sqrt();
            Vec3::new(z, 0.0, -x) / len
        } else {
            let len = (y * y + z * z).sqrt();
            Vec3::new(0.0, z, -y) / len
        }
    }

    #[inline]
    pub fn sqrt(self) -> Vec3 {
        Self::from_lanes(Active::sqrt_f32(self.lanes))
    }

    /// 1.0 for lanes with the sign bit clear, -1.0 otherwise
    #[inline]
    pub fn sign(self) -> Vec3 {
        Vec3::or(Vec3::and(self, Vec3::replicate(-1.0)), Vec3::one())
    }

    #[inline]
    pub fn reduce_min(self) -> f32 {
        let [x, y, z, _] = self.lanes;
        x.min(y).min(z)
    }

    #[inline]
    pub fn reduce_max(self) -> f32 {
        let [x, y, z, _] = self.lanes;
        x.max(y).max(z)
    }

    // ------------------------------------------------------------------
    // Conversion and store
    // ------------------------------------------------------------------

    #[inline]
    pub fn store_float3(self, out: &mut Float3) {
        *out = Float3::from(self.to_array());
    }

    #[inline]
    pub fn to_int(self) -> UVec4 {
        UVec4::from_lanes(Active::f32_to_i32(self.lanes))
    }

    #[inline]
    pub fn reinterpret_as_int(self) -> UVec4 {
        UVec4::from_lanes(to_bits(self.lanes))
    }
}

fn build_unit_sphere() -> Vec<Vec3> {
    let mut seen = HashSet::new();
    let mut directions = Vec::new();
    let octahedron = [
        Vec3::axis_x(),
        Vec3::neg_axis_x(),
        Vec3::axis_y(),
        Vec3::neg_axis_y(),
        Vec3::axis_z(),
        Vec3::neg_axis_z(),
    ];
    for &vx in &octahedron[0..2] {
        for &vy in &octahedron[2..4] {
            for &vz in &octahedron[4..6] {
                subdivide(vx, vy, vz, UNIT_SPHERE_LEVELS, &mut seen, &mut directions);
            }
        }
    }
    log::trace!("built unit sphere table with {} directions", directions.len());
    directions
}

fn subdivide(
    a: Vec3,
    b: Vec3,
    c: Vec3,
    level: u32,
    seen: &mut HashSet<[u32; 3]>,
    out: &mut Vec<Vec3>,
) {
    if level == 0 {
        for v in [a, b, c] {
            if seen.insert(v.to_array().map(f32::to_bits)) {
                out.push(v);
            }
        }
        return;
    }
    let ab = (a + b).normalized();
    let bc = (b + c).normalized();
    let ca = (c + a).normalized();
    subdivide(a, ab, ca, level - 1, seen, out);
    subdivide(ab, b, bc, level - 1, seen, out);
    subdivide(ca, bc, c, level - 1, seen, out);
    subdivide(ab, bc, ca, level - 1, seen, out);
}

impl From<Float3> for Vec3 {
    #[inline]
    fn from(v: Float3) -> Self {
        Self::load_float3(&v)
    }
}

impl From<Vec3> for Float3 {
    #[inline]
    fn from(v: Vec3) -> Self {
        Float3::from(v.to_array())
    }
}

/// Drops W, replacing it with the Z shadow.
impl From<Vec4> for Vec3 {
    #[inline]
    fn from(v: Vec4) -> Self {
        Self::fix_w(v.lanes())
    }
}

impl From<[f32; 3]> for Vec3 {
    #[inline]
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl Index<usize> for Vec3 {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &f32 {
        debug_assert!(index < 3, "Vec3 component {index} out of range");
        &self.lanes[..3][index]
    }
}

impl PartialEq for Vec3 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Vec3::equals(*self, *other).test_all_xyz_true()
    }
}

impl Mul for Vec3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        Self::from_lanes(Active::mul_f32(self.lanes, rhs.lanes))
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Self::from_lanes(Active::mul_f32(self.lanes, [rhs; 4]))
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs * self
    }
}

impl MulAssign for Vec3 {
    #[inline]
    fn mul_assign(&mut self, rhs: Vec3) {
        *self = *self * rhs;
    }
}

impl MulAssign<f32> for Vec3 {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl Div for Vec3 {
    type Output = Vec3;

    #[inline]
    fn div(self, rhs: Vec3) -> Vec3 {
        Self::from_lanes(Active::div_f32(self.lanes, rhs.lanes))
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;

    #[inline]
    fn div(self, rhs: f32) -> Vec3 {
        Self::from_lanes(Active::div_f32(self.lanes, [rhs; 4]))
    }
}

impl DivAssign<f32> for Vec3 {
    #[inline]
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Self::from_lanes(Active::add_f32(self.lanes, rhs.lanes))
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Self::from_lanes(Active::sub_f32(self.lanes, rhs.lanes))
    }
}

impl SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec3) {
        *self = *self - rhs;
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    #[inline]
    fn neg(self) -> Vec3 {
        Self::from_lanes(from_bits(Active::xor_u32(
            to_bits(self.lanes),
            [SIGN_BIT; 4],
        )))
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.to_array();
        write!(f, "{x}, {y}, {z}")
    }
}
