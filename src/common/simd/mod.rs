//! SIMD backends for the vector types.
//!
//! Every vector type stores plain lane arrays and hands them to one backend
//! that is fixed at compile time. The backend owns the hardware register
//! view; `__m128`, `float32x4_t` and friends never appear outside of it.
//!
//! # Supported Architectures
//!
//! ## x86_64
//! - **SSE2**: baseline for all 4-wide float and integer operations
//! - **SSE4.1**: blend-based select, dot products, 32-bit integer multiply and min/max
//! - **FMA**: fused multiply-add
//! - **AVX**: native 8-wide float operations
//! - **AVX2**: native 8-wide integer compares and shifts
//!
//! ## aarch64 (ARM)
//! - **NEON**: all 4-wide operations (always available)
//!
//! ## Other targets
//! - Scalar lane-by-lane implementation. The `force-scalar` feature selects
//!   it on every target.
//!
//! # Selection
//!
//! Instruction-set paths are picked with `#[cfg(target_feature = ...)]`, not
//! with runtime detection, so a hot loop over vectors inlines straight to the
//! instructions. Build with e.g. `RUSTFLAGS="-C target-cpu=native"` to enable
//! the wider paths.
//!
//! 8-wide operations default to running the 4-wide operation on the low and
//! high halves. A backend overrides them when it has native 256-bit lanes.

#[cfg(all(target_arch = "aarch64", not(feature = "force-scalar")))]
mod neon;
#[cfg_attr(
    all(
        not(test),
        not(feature = "force-scalar"),
        any(target_arch = "x86_64", target_arch = "aarch64")
    ),
    allow(dead_code)
)]
pub(crate) mod scalar;
#[cfg(all(target_arch = "x86_64", not(feature = "force-scalar")))]
mod sse;

pub(crate) type F32x4 = [f32; 4];
pub(crate) type U32x4 = [u32; 4];
pub(crate) type F32x8 = [f32; 8];
pub(crate) type U32x8 = [u32; 8];

/// The backend compiled into this build.
#[cfg(all(target_arch = "x86_64", not(feature = "force-scalar")))]
pub(crate) type Active = sse::Sse;

/// The backend compiled into this build.
#[cfg(all(target_arch = "aarch64", not(feature = "force-scalar")))]
pub(crate) type Active = neon::Neon;

/// The backend compiled into this build.
#[cfg(any(
    feature = "force-scalar",
    not(any(target_arch = "x86_64", target_arch = "aarch64"))
))]
pub(crate) type Active = scalar::Scalar;

/// Name of the instruction set the vector types were compiled against.
///
/// # Examples
///
/// ```
/// let name = topia_math::backend_name();
/// assert!(!name.is_empty());
/// ```
#[inline]
pub fn backend_name() -> &'static str {
    Active::NAME
}

/// Report the compiled-in backend through the `log` facade.
///
/// Meant to be called once during application start-up.
pub fn log_backend() {
    log::debug!(
        "topia-math vector backend: {} (4-wide {} bytes, 8-wide {} bytes)",
        Active::NAME,
        std::mem::size_of::<F32x4>(),
        std::mem::size_of::<F32x8>()
    );
}

/// The fixed operation set each architecture implements.
///
/// Masks follow one convention everywhere: a lane is true when its highest
/// bit is set. Compares produce all-ones or all-zeros lanes; selects only look
/// at the highest bit.
pub(crate) trait Backend {
    const NAME: &'static str;

    // ------------------------------------------------------------------
    // 4 x f32
    // ------------------------------------------------------------------

    fn add_f32(a: F32x4, b: F32x4) -> F32x4;
    fn sub_f32(a: F32x4, b: F32x4) -> F32x4;
    fn mul_f32(a: F32x4, b: F32x4) -> F32x4;
    fn div_f32(a: F32x4, b: F32x4) -> F32x4;
    fn min_f32(a: F32x4, b: F32x4) -> F32x4;
    fn max_f32(a: F32x4, b: F32x4) -> F32x4;
    fn sqrt_f32(a: F32x4) -> F32x4;

    /// `a * b + c`, fused when the target supports it
    fn mul_add_f32(a: F32x4, b: F32x4, c: F32x4) -> F32x4;

    fn eq_f32(a: F32x4, b: F32x4) -> U32x4;
    fn lt_f32(a: F32x4, b: F32x4) -> U32x4;
    fn le_f32(a: F32x4, b: F32x4) -> U32x4;
    fn gt_f32(a: F32x4, b: F32x4) -> U32x4;
    fn ge_f32(a: F32x4, b: F32x4) -> U32x4;

    /// Lane-wise `b` where the control lane's highest bit is set, else `a`
    fn select_f32(a: F32x4, b: F32x4, control: U32x4) -> F32x4;

    /// Dot product of lanes 0..3, broadcast to all lanes
    fn dot3_f32(a: F32x4, b: F32x4) -> F32x4;

    /// Dot product of all four lanes, broadcast to all lanes
    fn dot4_f32(a: F32x4, b: F32x4) -> F32x4;

    /// Truncating float to signed int conversion, out-of-range lanes are backend-defined
    fn f32_to_i32(a: F32x4) -> U32x4;

    /// Sign bit of lane i in bit i
    fn sign_mask_f32(a: F32x4) -> u32;

    // ------------------------------------------------------------------
    // 4 x u32
    // ------------------------------------------------------------------

    fn add_u32(a: U32x4, b: U32x4) -> U32x4;
    fn mul_u32(a: U32x4, b: U32x4) -> U32x4;
    fn min_u32(a: U32x4, b: U32x4) -> U32x4;
    fn max_u32(a: U32x4, b: U32x4) -> U32x4;
    fn eq_u32(a: U32x4, b: U32x4) -> U32x4;
    fn and_u32(a: U32x4, b: U32x4) -> U32x4;
    fn or_u32(a: U32x4, b: U32x4) -> U32x4;
    fn xor_u32(a: U32x4, b: U32x4) -> U32x4;
    fn not_u32(a: U32x4) -> U32x4;
    fn select_u32(a: U32x4, b: U32x4, control: U32x4) -> U32x4;
    fn shl_u32<const COUNT: u32>(a: U32x4) -> U32x4;
    fn shr_u32<const COUNT: u32>(a: U32x4) -> U32x4;
    fn sra_u32<const COUNT: u32>(a: U32x4) -> U32x4;

    /// Signed int to float conversion
    fn i32_to_f32(a: U32x4) -> F32x4;

    /// Highest bit of lane i in bit i
    fn sign_mask_u32(a: U32x4) -> u32;

    // ------------------------------------------------------------------
    // 8 x f32 / 8 x u32, double-pumped unless overridden
    // ------------------------------------------------------------------

    #[inline(always)]
    fn add_f32x8(a: F32x8, b: F32x8) -> F32x8 {
        pump_f32(a, b, Self::add_f32)
    }

    #[inline(always)]
    fn sub_f32x8(a: F32x8, b: F32x8) -> F32x8 {
        pump_f32(a, b, Self::sub_f32)
    }

    #[inline(always)]
    fn mul_f32x8(a: F32x8, b: F32x8) -> F32x8 {
        pump_f32(a, b, Self::mul_f32)
    }

    #[inline(always)]
    fn div_f32x8(a: F32x8, b: F32x8) -> F32x8 {
        pump_f32(a, b, Self::div_f32)
    }

    #[inline(always)]
    fn min_f32x8(a: F32x8, b: F32x8) -> F32x8 {
        pump_f32(a, b, Self::min_f32)
    }

    #[inline(always)]
    fn max_f32x8(a: F32x8, b: F32x8) -> F32x8 {
        pump_f32(a, b, Self::max_f32)
    }

    #[inline(always)]
    fn mul_add_f32x8(a: F32x8, b: F32x8, c: F32x8) -> F32x8 {
        let (a_lo, a_hi) = split_f32(a);
        let (b_lo, b_hi) = split_f32(b);
        let (c_lo, c_hi) = split_f32(c);
        join_f32(
            Self::mul_add_f32(a_lo, b_lo, c_lo),
            Self::mul_add_f32(a_hi, b_hi, c_hi),
        )
    }

    #[inline(always)]
    fn eq_f32x8(a: F32x8, b: F32x8) -> U32x8 {
        pump_cmp(a, b, Self::eq_f32)
    }

    #[inline(always)]
    fn lt_f32x8(a: F32x8, b: F32x8) -> U32x8 {
        pump_cmp(a, b, Self::lt_f32)
    }

    #[inline(always)]
    fn gt_f32x8(a: F32x8, b: F32x8) -> U32x8 {
        pump_cmp(a, b, Self::gt_f32)
    }

    #[inline(always)]
    fn le_f32x8(a: F32x8, b: F32x8) -> U32x8 {
        pump_cmp(a, b, Self::le_f32)
    }

    #[inline(always)]
    fn ge_f32x8(a: F32x8, b: F32x8) -> U32x8 {
        pump_cmp(a, b, Self::ge_f32)
    }

    #[inline(always)]
    fn select_f32x8(a: F32x8, b: F32x8, control: U32x8) -> F32x8 {
        let (a_lo, a_hi) = split_f32(a);
        let (b_lo, b_hi) = split_f32(b);
        let (c_lo, c_hi) = split_u32(control);
        join_f32(
            Self::select_f32(a_lo, b_lo, c_lo),
            Self::select_f32(a_hi, b_hi, c_hi),
        )
    }

    #[inline(always)]
    fn i32_to_f32x8(a: U32x8) -> F32x8 {
        let (lo, hi) = split_u32(a);
        join_f32(Self::i32_to_f32(lo), Self::i32_to_f32(hi))
    }

    #[inline(always)]
    fn eq_u32x8(a: U32x8, b: U32x8) -> U32x8 {
        pump_u32(a, b, Self::eq_u32)
    }

    #[inline(always)]
    fn and_u32x8(a: U32x8, b: U32x8) -> U32x8 {
        pump_u32(a, b, Self::and_u32)
    }

    #[inline(always)]
    fn or_u32x8(a: U32x8, b: U32x8) -> U32x8 {
        pump_u32(a, b, Self::or_u32)
    }

    #[inline(always)]
    fn xor_u32x8(a: U32x8, b: U32x8) -> U32x8 {
        pump_u32(a, b, Self::xor_u32)
    }

    #[inline(always)]
    fn select_u32x8(a: U32x8, b: U32x8, control: U32x8) -> U32x8 {
        let (a_lo, a_hi) = split_u32(a);
        let (b_lo, b_hi) = split_u32(b);
        let (c_lo, c_hi) = split_u32(control);
        join_u32(
            Self::select_u32(a_lo, b_lo, c_lo),
            Self::select_u32(a_hi, b_hi, c_hi),
        )
    }

    #[inline(always)]
    fn shl_u32x8<const COUNT: u32>(a: U32x8) -> U32x8 {
        let (lo, hi) = split_u32(a);
        join_u32(Self::shl_u32::<COUNT>(lo), Self::shl_u32::<COUNT>(hi))
    }

    #[inline(always)]
    fn shr_u32x8<const COUNT: u32>(a: U32x8) -> U32x8 {
        let (lo, hi) = split_u32(a);
        join_u32(Self::shr_u32::<COUNT>(lo), Self::shr_u32::<COUNT>(hi))
    }

    #[inline(always)]
    fn sra_u32x8<const COUNT: u32>(a: U32x8) -> U32x8 {
        let (lo, hi) = split_u32(a);
        join_u32(Self::sra_u32::<COUNT>(lo), Self::sra_u32::<COUNT>(hi))
    }

    #[inline(always)]
    fn sign_mask_u32x8(a: U32x8) -> u32 {
        let (lo, hi) = split_u32(a);
        Self::sign_mask_u32(lo) | (Self::sign_mask_u32(hi) << 4)
    }
}

// ============================================================================
// Lane helpers shared by the backends and the vector types
// ============================================================================

#[inline(always)]
pub(crate) fn split_f32(v: F32x8) -> (F32x4, F32x4) {
    ([v[0], v[1], v[2], v[3]], [v[4], v[5], v[6], v[7]])
}

#[inline(always)]
pub(crate) fn join_f32(lo: F32x4, hi: F32x4) -> F32x8 {
    [lo[0], lo[1], lo[2], lo[3], hi[0], hi[1], hi[2], hi[3]]
}

#[inline(always)]
pub(crate) fn split_u32(v: U32x8) -> (U32x4, U32x4) {
    ([v[0], v[1], v[2], v[3]], [v[4], v[5], v[6], v[7]])
}

#[inline(always)]
pub(crate) fn join_u32(lo: U32x4, hi: U32x4) -> U32x8 {
    [lo[0], lo[1], lo[2], lo[3], hi[0], hi[1], hi[2], hi[3]]
}

/// Reinterpret float lanes as their IEEE-754 bit patterns
#[inline(always)]
pub(crate) fn to_bits<const N: usize>(v: [f32; N]) -> [u32; N] {
    v.map(f32::to_bits)
}

/// Reinterpret bit patterns as float lanes
#[inline(always)]
pub(crate) fn from_bits<const N: usize>(v: [u32; N]) -> [f32; N] {
    v.map(f32::from_bits)
}

#[inline(always)]
fn pump_f32(a: F32x8, b: F32x8, op: impl Fn(F32x4, F32x4) -> F32x4) -> F32x8 {
    let (a_lo, a_hi) = split_f32(a);
    let (b_lo, b_hi) = split_f32(b);
    join_f32(op(a_lo, b_lo), op(a_hi, b_hi))
}

#[inline(always)]
fn pump_cmp(a: F32x8, b: F32x8, op: impl Fn(F32x4, F32x4) -> U32x4) -> U32x8 {
    let (a_lo, a_hi) = split_f32(a);
    let (b_lo, b_hi) = split_f32(b);
    join_u32(op(a_lo, b_lo), op(a_hi, b_hi))
}

#[inline(always)]
fn pump_u32(a: U32x8, b: U32x8, op: impl Fn(U32x4, U32x4) -> U32x4) -> U32x8 {
    let (a_lo, a_hi) = split_u32(a);
    let (b_lo, b_hi) = split_u32(b);
    join_u32(op(a_lo, b_lo), op(a_hi, b_hi))
}

#[cfg(test)]
mod tests {
    use super::scalar::Scalar;
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn lanes4() -> impl Strategy<Value = F32x4> {
        prop::array::uniform4(-1000.0f32..1000.0)
    }

    fn lanes8() -> impl Strategy<Value = F32x8> {
        prop::array::uniform8(-1000.0f32..1000.0)
    }

    #[test]
    fn test_backend_name_is_reported() {
        assert_eq!(backend_name(), Active::NAME);
        assert!(!backend_name().is_empty());
    }

    #[test]
    fn test_select_uses_only_highest_bit() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        let control = [0x8000_0000, 0x7fff_ffff, 0xffff_ffff, 0x0000_0001];
        assert_eq!(Active::select_f32(a, b, control), [5.0, 2.0, 7.0, 4.0]);
        assert_eq!(
            Active::select_u32([1, 2, 3, 4], [5, 6, 7, 8], control),
            [5, 2, 7, 4]
        );
    }

    #[test]
    fn test_sign_masks() {
        assert_eq!(Active::sign_mask_f32([-1.0, 2.0, -0.0, 4.0]), 0b0101);
        assert_eq!(
            Active::sign_mask_u32([0, 0x8000_0000, 0xffff_ffff, 1]),
            0b0110
        );
        assert_eq!(
            Active::sign_mask_u32x8([0x8000_0000, 0, 0, 0, 0, 0, 0, 0xffff_ffff]),
            0b1000_0001
        );
    }

    #[test]
    fn test_shifts() {
        let v = [0x8000_0010, 1, 0xf000_0000, 0x0000_ff00];
        assert_eq!(
            Active::shl_u32::<4>(v),
            [0x0000_0100, 0x10, 0x0000_0000, 0x000f_f000]
        );
        assert_eq!(
            Active::shr_u32::<4>(v),
            [0x0800_0001, 0, 0x0f00_0000, 0x0000_0ff0]
        );
        assert_eq!(
            Active::sra_u32::<4>(v),
            [0xf800_0001, 0, 0xff00_0000, 0x0000_0ff0]
        );
    }

    #[test]
    fn test_dot_products_broadcast() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        assert_eq!(Active::dot3_f32(a, b), [38.0; 4]);
        assert_eq!(Active::dot4_f32(a, b), [70.0; 4]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_arithmetic_matches_scalar(a in lanes4(), b in lanes4()) {
            prop_assert_eq!(Active::add_f32(a, b), Scalar::add_f32(a, b));
            prop_assert_eq!(Active::sub_f32(a, b), Scalar::sub_f32(a, b));
            prop_assert_eq!(Active::mul_f32(a, b), Scalar::mul_f32(a, b));
            prop_assert_eq!(Active::min_f32(a, b), Scalar::min_f32(a, b));
            prop_assert_eq!(Active::max_f32(a, b), Scalar::max_f32(a, b));
            prop_assert_eq!(Active::lt_f32(a, b), Scalar::lt_f32(a, b));
            prop_assert_eq!(Active::ge_f32(a, b), Scalar::ge_f32(a, b));
            prop_assert_eq!(Active::f32_to_i32(a), Scalar::f32_to_i32(a));
        }

        #[test]
        fn prop_dot_matches_scalar(a in lanes4(), b in lanes4()) {
            let active = Active::dot4_f32(a, b);
            let reference = Scalar::dot4_f32(a, b);
            for i in 0..4 {
                assert_relative_eq!(active[i], reference[i], epsilon = 1e-2, max_relative = 1e-5);
            }
        }

        #[test]
        fn prop_integer_ops_match_scalar(a in any::<[u32; 4]>(), b in any::<[u32; 4]>()) {
            prop_assert_eq!(Active::add_u32(a, b), Scalar::add_u32(a, b));
            prop_assert_eq!(Active::mul_u32(a, b), Scalar::mul_u32(a, b));
            prop_assert_eq!(Active::min_u32(a, b), Scalar::min_u32(a, b));
            prop_assert_eq!(Active::max_u32(a, b), Scalar::max_u32(a, b));
            prop_assert_eq!(Active::select_u32(a, b, a), Scalar::select_u32(a, b, a));
            prop_assert_eq!(Active::sra_u32::<7>(a), Scalar::sra_u32::<7>(a));
        }

        #[test]
        fn prop_wide_ops_match_halves(a in lanes8(), b in lanes8()) {
            let (a_lo, a_hi) = split_f32(a);
            let (b_lo, b_hi) = split_f32(b);
            prop_assert_eq!(
                Active::mul_f32x8(a, b),
                join_f32(Scalar::mul_f32(a_lo, b_lo), Scalar::mul_f32(a_hi, b_hi))
            );
            prop_assert_eq!(
                Active::lt_f32x8(a, b),
                join_u32(Scalar::lt_f32(a_lo, b_lo), Scalar::lt_f32(a_hi, b_hi))
            );
        }
    }
}
