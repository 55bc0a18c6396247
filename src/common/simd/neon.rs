//! aarch64 NEON backend.
//!
//! NEON is mandatory on aarch64, so there is no feature gating here. 8-wide
//! operations run as two 128-bit halves through the trait defaults.

use super::{Backend, F32x4, U32x4};
use std::arch::aarch64::*;

/// NEON backend
pub(crate) struct Neon;

#[inline(always)]
fn load_f(v: F32x4) -> float32x4_t {
    unsafe { vld1q_f32(v.as_ptr()) }
}

#[inline(always)]
fn store_f(v: float32x4_t) -> F32x4 {
    let mut out = [0.0f32; 4];
    unsafe { vst1q_f32(out.as_mut_ptr(), v) };
    out
}

#[inline(always)]
fn load_u(v: U32x4) -> uint32x4_t {
    unsafe { vld1q_u32(v.as_ptr()) }
}

#[inline(always)]
fn store_u(v: uint32x4_t) -> U32x4 {
    let mut out = [0u32; 4];
    unsafe { vst1q_u32(out.as_mut_ptr(), v) };
    out
}

/// Spread the highest bit of each lane over the whole lane
#[inline(always)]
fn full_mask(control: uint32x4_t) -> uint32x4_t {
    unsafe { vreinterpretq_u32_s32(vshrq_n_s32::<31>(vreinterpretq_s32_u32(control))) }
}

impl Backend for Neon {
    const NAME: &'static str = "neon";

    #[inline(always)]
    fn add_f32(a: F32x4, b: F32x4) -> F32x4 {
        store_f(unsafe { vaddq_f32(load_f(a), load_f(b)) })
    }

    #[inline(always)]
    fn sub_f32(a: F32x4, b: F32x4) -> F32x4 {
        store_f(unsafe { vsubq_f32(load_f(a), load_f(b)) })
    }

    #[inline(always)]
    fn mul_f32(a: F32x4, b: F32x4) -> F32x4 {
        store_f(unsafe { vmulq_f32(load_f(a), load_f(b)) })
    }

    #[inline(always)]
    fn div_f32(a: F32x4, b: F32x4) -> F32x4 {
        store_f(unsafe { vdivq_f32(load_f(a), load_f(b)) })
    }

    #[inline(always)]
    fn min_f32(a: F32x4, b: F32x4) -> F32x4 {
        store_f(unsafe { vminq_f32(load_f(a), load_f(b)) })
    }

    #[inline(always)]
    fn max_f32(a: F32x4, b: F32x4) -> F32x4 {
        store_f(unsafe { vmaxq_f32(load_f(a), load_f(b)) })
    }

    #[inline(always)]
    fn sqrt_f32(a: F32x4) -> F32x4 {
        store_f(unsafe { vsqrtq_f32(load_f(a)) })
    }

    #[inline(always)]
    fn mul_add_f32(a: F32x4, b: F32x4, c: F32x4) -> F32x4 {
        store_f(unsafe { vfmaq_f32(load_f(c), load_f(a), load_f(b)) })
    }

    #[inline(always)]
    fn eq_f32(a: F32x4, b: F32x4) -> U32x4 {
        store_u(unsafe { vceqq_f32(load_f(a), load_f(b)) })
    }

    #[inline(always)]
    fn lt_f32(a: F32x4, b: F32x4) -> U32x4 {
        store_u(unsafe { vcltq_f32(load_f(a), load_f(b)) })
    }

    #[inline(always)]
    fn le_f32(a: F32x4, b: F32x4) -> U32x4 {
        store_u(unsafe { vcleq_f32(load_f(a), load_f(b)) })
    }

    #[inline(always)]
    fn gt_f32(a: F32x4, b: F32x4) -> U32x4 {
        store_u(unsafe { vcgtq_f32(load_f(a), load_f(b)) })
    }

    #[inline(always)]
    fn ge_f32(a: F32x4, b: F32x4) -> U32x4 {
        store_u(unsafe { vcgeq_f32(load_f(a), load_f(b)) })
    }

    #[inline(always)]
    fn select_f32(a: F32x4, b: F32x4, control: U32x4) -> F32x4 {
        store_f(unsafe { vbslq_f32(full_mask(load_u(control)), load_f(b), load_f(a)) })
    }

    #[inline(always)]
    fn dot3_f32(a: F32x4, b: F32x4) -> F32x4 {
        let sum = unsafe {
            let mul = vmulq_f32(load_f(a), load_f(b));
            vaddvq_f32(vsetq_lane_f32::<3>(0.0, mul))
        };
        [sum; 4]
    }

    #[inline(always)]
    fn dot4_f32(a: F32x4, b: F32x4) -> F32x4 {
        let sum = unsafe { vaddvq_f32(vmulq_f32(load_f(a), load_f(b))) };
        [sum; 4]
    }

    #[inline(always)]
    fn f32_to_i32(a: F32x4) -> U32x4 {
        store_u(unsafe { vreinterpretq_u32_s32(vcvtq_s32_f32(load_f(a))) })
    }

    #[inline(always)]
    fn sign_mask_f32(a: F32x4) -> u32 {
        Self::sign_mask_u32(super::to_bits(a))
    }

    #[inline(always)]
    fn add_u32(a: U32x4, b: U32x4) -> U32x4 {
        store_u(unsafe { vaddq_u32(load_u(a), load_u(b)) })
    }

    #[inline(always)]
    fn mul_u32(a: U32x4, b: U32x4) -> U32x4 {
        store_u(unsafe { vmulq_u32(load_u(a), load_u(b)) })
    }

    #[inline(always)]
    fn min_u32(a: U32x4, b: U32x4) -> U32x4 {
        store_u(unsafe { vminq_u32(load_u(a), load_u(b)) })
    }

    #[inline(always)]
    fn max_u32(a: U32x4, b: U32x4) -> U32x4 {
        store_u(unsafe { vmaxq_u32(load_u(a), load_u(b)) })
    }

    #[inline(always)]
    fn eq_u32(a: U32x4, b: U32x4) -> U32x4 {
        store_u(unsafe { vceqq_u32(load_u(a), load_u(b)) })
    }

    #[inline(always)]
    fn and_u32(a: U32x4, b: U32x4) -> U32x4 {
        store_u(unsafe { vandq_u32(load_u(a), load_u(b)) })
    }

    #[inline(always)]
    fn or_u32(a: U32x4, b: U32x4) -> U32x4 {
        store_u(unsafe { vorrq_u32(load_u(a), load_u(b)) })
    }

    #[inline(always)]
    fn xor_u32(a: U32x4, b: U32x4) -> U32x4 {
        store_u(unsafe { veorq_u32(load_u(a), load_u(b)) })
    }

    #[inline(always)]
    fn not_u32(a: U32x4) -> U32x4 {
        store_u(unsafe { vmvnq_u32(load_u(a)) })
    }

    #[inline(always)]
    fn select_u32(a: U32x4, b: U32x4, control: U32x4) -> U32x4 {
        store_u(unsafe { vbslq_u32(full_mask(load_u(control)), load_u(b), load_u(a)) })
    }

    #[inline(always)]
    fn shl_u32<const COUNT: u32>(a: U32x4) -> U32x4 {
        store_u(unsafe { vshlq_u32(load_u(a), vdupq_n_s32(COUNT as i32)) })
    }

    #[inline(always)]
    fn shr_u32<const COUNT: u32>(a: U32x4) -> U32x4 {
        // Negative shift counts shift right
        store_u(unsafe { vshlq_u32(load_u(a), vdupq_n_s32(-(COUNT as i32))) })
    }

    #[inline(always)]
    fn sra_u32<const COUNT: u32>(a: U32x4) -> U32x4 {
        store_u(unsafe {
            vreinterpretq_u32_s32(vshlq_s32(
                vreinterpretq_s32_u32(load_u(a)),
                vdupq_n_s32(-(COUNT as i32)),
            ))
        })
    }

    #[inline(always)]
    fn i32_to_f32(a: U32x4) -> F32x4 {
        store_f(unsafe { vcvtq_f32_s32(vreinterpretq_s32_u32(load_u(a))) })
    }

    #[inline(always)]
    fn sign_mask_u32(a: U32x4) -> u32 {
        const LANE_SHIFT: [i32; 4] = [0, 1, 2, 3];
        unsafe {
            let bits = vshrq_n_u32::<31>(load_u(a));
            vaddvq_u32(vshlq_u32(bits, vld1q_s32(LANE_SHIFT.as_ptr())))
        }
    }
}
