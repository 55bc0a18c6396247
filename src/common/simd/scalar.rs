//! Portable lane-by-lane backend.
//!
//! Used on targets without a vector backend and with the `force-scalar`
//! feature. Also the reference the other backends are tested against. Float
//! min/max follow the SSE convention of returning the second operand when
//! the compare is false.

use super::{Backend, F32x4, U32x4};
use std::array::from_fn;

/// Scalar backend
pub(crate) struct Scalar;

#[inline(always)]
fn mask(b: bool) -> u32 {
    if b { u32::MAX } else { 0 }
}

impl Backend for Scalar {
    const NAME: &'static str = "scalar";

    #[inline(always)]
    fn add_f32(a: F32x4, b: F32x4) -> F32x4 {
        from_fn(|i| a[i] + b[i])
    }

    #[inline(always)]
    fn sub_f32(a: F32x4, b: F32x4) -> F32x4 {
        from_fn(|i| a[i] - b[i])
    }

    #[inline(always)]
    fn mul_f32(a: F32x4, b: F32x4) -> F32x4 {
        from_fn(|i| a[i] * b[i])
    }

    #[inline(always)]
    fn div_f32(a: F32x4, b: F32x4) -> F32x4 {
        from_fn(|i| a[i] / b[i])
    }

    #[inline(always)]
    fn min_f32(a: F32x4, b: F32x4) -> F32x4 {
        from_fn(|i| if a[i] < b[i] { a[i] } else { b[i] })
    }

    #[inline(always)]
    fn max_f32(a: F32x4, b: F32x4) -> F32x4 {
        from_fn(|i| if a[i] > b[i] { a[i] } else { b[i] })
    }

    #[inline(always)]
    fn sqrt_f32(a: F32x4) -> F32x4 {
        a.map(f32::sqrt)
    }

    #[inline(always)]
    fn mul_add_f32(a: F32x4, b: F32x4, c: F32x4) -> F32x4 {
        from_fn(|i| a[i] * b[i] + c[i])
    }

    #[inline(always)]
    fn eq_f32(a: F32x4, b: F32x4) -> U32x4 {
        from_fn(|i| mask(a[i] == b[i]))
    }

    #[inline(always)]
    fn lt_f32(a: F32x4, b: F32x4) -> U32x4 {
        from_fn(|i| mask(a[i] < b[i]))
    }

    #[inline(always)]
    fn le_f32(a: F32x4, b: F32x4) -> U32x4 {
        from_fn(|i| mask(a[i] <= b[i]))
    }

    #[inline(always)]
    fn gt_f32(a: F32x4, b: F32x4) -> U32x4 {
        from_fn(|i| mask(a[i] > b[i]))
    }

    #[inline(always)]
    fn ge_f32(a: F32x4, b: F32x4) -> U32x4 {
        from_fn(|i| mask(a[i] >= b[i]))
    }

    #[inline(always)]
    fn select_f32(a: F32x4, b: F32x4, control: U32x4) -> F32x4 {
        from_fn(|i| if control[i] & 0x8000_0000 != 0 { b[i] } else { a[i] })
    }

    #[inline(always)]
    fn dot3_f32(a: F32x4, b: F32x4) -> F32x4 {
        let m = Self::mul_f32(a, b);
        [(m[0] + m[1]) + m[2]; 4]
    }

    #[inline(always)]
    fn dot4_f32(a: F32x4, b: F32x4) -> F32x4 {
        let m = Self::mul_f32(a, b);
        [(m[0] + m[1]) + (m[2] + m[3]); 4]
    }

    #[inline(always)]
    fn f32_to_i32(a: F32x4) -> U32x4 {
        a.map(|v| v as i32 as u32)
    }

    #[inline(always)]
    fn sign_mask_f32(a: F32x4) -> u32 {
        Self::sign_mask_u32(super::to_bits(a))
    }

    #[inline(always)]
    fn add_u32(a: U32x4, b: U32x4) -> U32x4 {
        from_fn(|i| a[i].wrapping_add(b[i]))
    }

    #[inline(always)]
    fn mul_u32(a: U32x4, b: U32x4) -> U32x4 {
        from_fn(|i| a[i].wrapping_mul(b[i]))
    }

    #[inline(always)]
    fn min_u32(a: U32x4, b: U32x4) -> U32x4 {
        from_fn(|i| a[i].min(b[i]))
    }

    #[inline(always)]
    fn max_u32(a: U32x4, b: U32x4) -> U32x4 {
        from_fn(|i| a[i].max(b[i]))
    }

    #[inline(always)]
    fn eq_u32(a: U32x4, b: U32x4) -> U32x4 {
        from_fn(|i| mask(a[i] == b[i]))
    }

    #[inline(always)]
    fn and_u32(a: U32x4, b: U32x4) -> U32x4 {
        from_fn(|i| a[i] & b[i])
    }

    #[inline(always)]
    fn or_u32(a: U32x4, b: U32x4) -> U32x4 {
        from_fn(|i| a[i] | b[i])
    }

    #[inline(always)]
    fn xor_u32(a: U32x4, b: U32x4) -> U32x4 {
        from_fn(|i| a[i] ^ b[i])
    }

    #[inline(always)]
    fn not_u32(a: U32x4) -> U32x4 {
        a.map(|v| !v)
    }

    #[inline(always)]
    fn select_u32(a: U32x4, b: U32x4, control: U32x4) -> U32x4 {
        from_fn(|i| if control[i] & 0x8000_0000 != 0 { b[i] } else { a[i] })
    }

    #[inline(always)]
    fn shl_u32<const COUNT: u32>(a: U32x4) -> U32x4 {
        a.map(|v| v << COUNT)
    }

    #[inline(always)]
    fn shr_u32<const COUNT: u32>(a: U32x4) -> U32x4 {
        a.map(|v| v >> COUNT)
    }

    #[inline(always)]
    fn sra_u32<const COUNT: u32>(a: U32x4) -> U32x4 {
        a.map(|v| ((v as i32) >> COUNT) as u32)
    }

    #[inline(always)]
    fn i32_to_f32(a: U32x4) -> F32x4 {
        a.map(|v| v as i32 as f32)
    }

    #[inline(always)]
    fn sign_mask_u32(a: U32x4) -> u32 {
        a.iter()
            .enumerate()
            .fold(0, |acc, (i, v)| acc | ((v >> 31) << i))
    }
}
