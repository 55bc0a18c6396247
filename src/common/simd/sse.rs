//! x86_64 backend.
//!
//! SSE2 is part of the x86_64 baseline. SSE4.1, FMA, AVX and AVX2 paths are
//! compiled in when the matching `target_feature` is enabled.

use super::{Backend, F32x4, U32x4};
#[cfg(target_feature = "avx")]
use super::{F32x8, U32x8};
use std::arch::x86_64::*;

/// SSE family backend
pub(crate) struct Sse;

#[inline(always)]
fn load_ps(v: F32x4) -> __m128 {
    unsafe { _mm_loadu_ps(v.as_ptr()) }
}

#[inline(always)]
fn store_ps(v: __m128) -> F32x4 {
    let mut out = [0.0f32; 4];
    unsafe { _mm_storeu_ps(out.as_mut_ptr(), v) };
    out
}

#[inline(always)]
fn load_si(v: U32x4) -> __m128i {
    unsafe { _mm_loadu_si128(v.as_ptr() as *const __m128i) }
}

#[inline(always)]
fn store_si(v: __m128i) -> U32x4 {
    let mut out = [0u32; 4];
    unsafe { _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, v) };
    out
}

/// Sum all four lanes and broadcast the result
#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn horizontal_sum(v: __m128) -> __m128 {
    unsafe {
        // (y, x, w, z)
        let shuf = _mm_shuffle_ps::<0b10_11_00_01>(v, v);
        let sums = _mm_add_ps(v, shuf);
        // (z+w, z+w, x+y, x+y)
        let shuf = _mm_shuffle_ps::<0b01_00_11_10>(sums, sums);
        _mm_add_ps(sums, shuf)
    }
}

#[cfg(target_feature = "avx")]
#[inline(always)]
fn load_ps8(v: F32x8) -> __m256 {
    unsafe { _mm256_loadu_ps(v.as_ptr()) }
}

#[cfg(target_feature = "avx")]
#[inline(always)]
fn store_ps8(v: __m256) -> F32x8 {
    let mut out = [0.0f32; 8];
    unsafe { _mm256_storeu_ps(out.as_mut_ptr(), v) };
    out
}

#[cfg(target_feature = "avx")]
#[inline(always)]
fn load_si8(v: U32x8) -> __m256i {
    unsafe { _mm256_loadu_si256(v.as_ptr() as *const __m256i) }
}

#[cfg(target_feature = "avx")]
#[inline(always)]
fn store_si8(v: __m256i) -> U32x8 {
    let mut out = [0u32; 8];
    unsafe { _mm256_storeu_si256(out.as_mut_ptr() as *mut __m256i, v) };
    out
}

impl Backend for Sse {
    const NAME: &'static str = if cfg!(target_feature = "avx2") {
        "avx2"
    } else if cfg!(target_feature = "avx") {
        "avx"
    } else if cfg!(target_feature = "sse4.1") {
        "sse4.1"
    } else {
        "sse2"
    };

    #[inline(always)]
    fn add_f32(a: F32x4, b: F32x4) -> F32x4 {
        store_ps(unsafe { _mm_add_ps(load_ps(a), load_ps(b)) })
    }

    #[inline(always)]
    fn sub_f32(a: F32x4, b: F32x4) -> F32x4 {
        store_ps(unsafe { _mm_sub_ps(load_ps(a), load_ps(b)) })
    }

    #[inline(always)]
    fn mul_f32(a: F32x4, b: F32x4) -> F32x4 {
        store_ps(unsafe { _mm_mul_ps(load_ps(a), load_ps(b)) })
    }

    #[inline(always)]
    fn div_f32(a: F32x4, b: F32x4) -> F32x4 {
        store_ps(unsafe { _mm_div_ps(load_ps(a), load_ps(b)) })
    }

    #[inline(always)]
    fn min_f32(a: F32x4, b: F32x4) -> F32x4 {
        store_ps(unsafe { _mm_min_ps(load_ps(a), load_ps(b)) })
    }

    #[inline(always)]
    fn max_f32(a: F32x4, b: F32x4) -> F32x4 {
        store_ps(unsafe { _mm_max_ps(load_ps(a), load_ps(b)) })
    }

    #[inline(always)]
    fn sqrt_f32(a: F32x4) -> F32x4 {
        store_ps(unsafe { _mm_sqrt_ps(load_ps(a)) })
    }

    #[inline(always)]
    fn mul_add_f32(a: F32x4, b: F32x4, c: F32x4) -> F32x4 {
        #[cfg(target_feature = "fma")]
        let r = unsafe { _mm_fmadd_ps(load_ps(a), load_ps(b), load_ps(c)) };
        #[cfg(not(target_feature = "fma"))]
        let r = unsafe { _mm_add_ps(_mm_mul_ps(load_ps(a), load_ps(b)), load_ps(c)) };
        store_ps(r)
    }

    #[inline(always)]
    fn eq_f32(a: F32x4, b: F32x4) -> U32x4 {
        store_si(unsafe { _mm_castps_si128(_mm_cmpeq_ps(load_ps(a), load_ps(b))) })
    }

    #[inline(always)]
    fn lt_f32(a: F32x4, b: F32x4) -> U32x4 {
        store_si(unsafe { _mm_castps_si128(_mm_cmplt_ps(load_ps(a), load_ps(b))) })
    }

    #[inline(always)]
    fn le_f32(a: F32x4, b: F32x4) -> U32x4 {
        store_si(unsafe { _mm_castps_si128(_mm_cmple_ps(load_ps(a), load_ps(b))) })
    }

    #[inline(always)]
    fn gt_f32(a: F32x4, b: F32x4) -> U32x4 {
        store_si(unsafe { _mm_castps_si128(_mm_cmpgt_ps(load_ps(a), load_ps(b))) })
    }

    #[inline(always)]
    fn ge_f32(a: F32x4, b: F32x4) -> U32x4 {
        store_si(unsafe { _mm_castps_si128(_mm_cmpge_ps(load_ps(a), load_ps(b))) })
    }

    #[inline(always)]
    fn select_f32(a: F32x4, b: F32x4, control: U32x4) -> F32x4 {
        #[cfg(target_feature = "sse4.1")]
        let r = unsafe {
            _mm_blendv_ps(load_ps(a), load_ps(b), _mm_castsi128_ps(load_si(control)))
        };
        #[cfg(not(target_feature = "sse4.1"))]
        let r = unsafe {
            let mask = _mm_castsi128_ps(_mm_srai_epi32::<31>(load_si(control)));
            _mm_or_ps(_mm_andnot_ps(mask, load_ps(a)), _mm_and_ps(mask, load_ps(b)))
        };
        store_ps(r)
    }

    #[inline(always)]
    fn dot3_f32(a: F32x4, b: F32x4) -> F32x4 {
        #[cfg(target_feature = "sse4.1")]
        let r = unsafe { _mm_dp_ps::<0x7f>(load_ps(a), load_ps(b)) };
        #[cfg(not(target_feature = "sse4.1"))]
        let r = unsafe {
            let xyz = _mm_castsi128_ps(_mm_set_epi32(0, -1, -1, -1));
            horizontal_sum(_mm_and_ps(_mm_mul_ps(load_ps(a), load_ps(b)), xyz))
        };
        store_ps(r)
    }

    #[inline(always)]
    fn dot4_f32(a: F32x4, b: F32x4) -> F32x4 {
        #[cfg(target_feature = "sse4.1")]
        let r = unsafe { _mm_dp_ps::<0xff>(load_ps(a), load_ps(b)) };
        #[cfg(not(target_feature = "sse4.1"))]
        let r = horizontal_sum(unsafe { _mm_mul_ps(load_ps(a), load_ps(b)) });
        store_ps(r)
    }

    #[inline(always)]
    fn f32_to_i32(a: F32x4) -> U32x4 {
        store_si(unsafe { _mm_cvttps_epi32(load_ps(a)) })
    }

    #[inline(always)]
    fn sign_mask_f32(a: F32x4) -> u32 {
        unsafe { _mm_movemask_ps(load_ps(a)) as u32 }
    }

    #[inline(always)]
    fn add_u32(a: U32x4, b: U32x4) -> U32x4 {
        store_si(unsafe { _mm_add_epi32(load_si(a), load_si(b)) })
    }

    #[inline(always)]
    fn mul_u32(a: U32x4, b: U32x4) -> U32x4 {
        #[cfg(target_feature = "sse4.1")]
        return store_si(unsafe { _mm_mullo_epi32(load_si(a), load_si(b)) });
        #[cfg(not(target_feature = "sse4.1"))]
        return std::array::from_fn(|i| a[i].wrapping_mul(b[i]));
    }

    #[inline(always)]
    fn min_u32(a: U32x4, b: U32x4) -> U32x4 {
        #[cfg(target_feature = "sse4.1")]
        return store_si(unsafe { _mm_min_epu32(load_si(a), load_si(b)) });
        #[cfg(not(target_feature = "sse4.1"))]
        return std::array::from_fn(|i| a[i].min(b[i]));
    }

    #[inline(always)]
    fn max_u32(a: U32x4, b: U32x4) -> U32x4 {
        #[cfg(target_feature = "sse4.1")]
        return store_si(unsafe { _mm_max_epu32(load_si(a), load_si(b)) });
        #[cfg(not(target_feature = "sse4.1"))]
        return std::array::from_fn(|i| a[i].max(b[i]));
    }

    #[inline(always)]
    fn eq_u32(a: U32x4, b: U32x4) -> U32x4 {
        store_si(unsafe { _mm_cmpeq_epi32(load_si(a), load_si(b)) })
    }

    #[inline(always)]
    fn and_u32(a: U32x4, b: U32x4) -> U32x4 {
        store_si(unsafe { _mm_and_si128(load_si(a), load_si(b)) })
    }

    #[inline(always)]
    fn or_u32(a: U32x4, b: U32x4) -> U32x4 {
        store_si(unsafe { _mm_or_si128(load_si(a), load_si(b)) })
    }

    #[inline(always)]
    fn xor_u32(a: U32x4, b: U32x4) -> U32x4 {
        store_si(unsafe { _mm_xor_si128(load_si(a), load_si(b)) })
    }

    #[inline(always)]
    fn not_u32(a: U32x4) -> U32x4 {
        store_si(unsafe { _mm_xor_si128(load_si(a), _mm_set1_epi32(-1)) })
    }

    #[inline(always)]
    fn select_u32(a: U32x4, b: U32x4, control: U32x4) -> U32x4 {
        #[cfg(target_feature = "sse4.1")]
        let r = unsafe {
            _mm_castps_si128(_mm_blendv_ps(
                _mm_castsi128_ps(load_si(a)),
                _mm_castsi128_ps(load_si(b)),
                _mm_castsi128_ps(load_si(control)),
            ))
        };
        #[cfg(not(target_feature = "sse4.1"))]
        let r = unsafe {
            let mask = _mm_srai_epi32::<31>(load_si(control));
            _mm_or_si128(_mm_andnot_si128(mask, load_si(a)), _mm_and_si128(mask, load_si(b)))
        };
        store_si(r)
    }

    #[inline(always)]
    fn shl_u32<const COUNT: u32>(a: U32x4) -> U32x4 {
        store_si(unsafe { _mm_sll_epi32(load_si(a), _mm_cvtsi32_si128(COUNT as i32)) })
    }

    #[inline(always)]
    fn shr_u32<const COUNT: u32>(a: U32x4) -> U32x4 {
        store_si(unsafe { _mm_srl_epi32(load_si(a), _mm_cvtsi32_si128(COUNT as i32)) })
    }

    #[inline(always)]
    fn sra_u32<const COUNT: u32>(a: U32x4) -> U32x4 {
        store_si(unsafe { _mm_sra_epi32(load_si(a), _mm_cvtsi32_si128(COUNT as i32)) })
    }

    #[inline(always)]
    fn i32_to_f32(a: U32x4) -> F32x4 {
        store_ps(unsafe { _mm_cvtepi32_ps(load_si(a)) })
    }

    #[inline(always)]
    fn sign_mask_u32(a: U32x4) -> u32 {
        unsafe { _mm_movemask_ps(_mm_castsi128_ps(load_si(a))) as u32 }
    }

    // ------------------------------------------------------------------
    // AVX: native 8-wide float lanes
    // ------------------------------------------------------------------

    #[cfg(target_feature = "avx")]
    #[inline(always)]
    fn add_f32x8(a: F32x8, b: F32x8) -> F32x8 {
        store_ps8(unsafe { _mm256_add_ps(load_ps8(a), load_ps8(b)) })
    }

    #[cfg(target_feature = "avx")]
    #[inline(always)]
    fn sub_f32x8(a: F32x8, b: F32x8) -> F32x8 {
        store_ps8(unsafe { _mm256_sub_ps(load_ps8(a), load_ps8(b)) })
    }

    #[cfg(target_feature = "avx")]
    #[inline(always)]
    fn mul_f32x8(a: F32x8, b: F32x8) -> F32x8 {
        store_ps8(unsafe { _mm256_mul_ps(load_ps8(a), load_ps8(b)) })
    }

    #[cfg(target_feature = "avx")]
    #[inline(always)]
    fn div_f32x8(a: F32x8, b: F32x8) -> F32x8 {
        store_ps8(unsafe { _mm256_div_ps(load_ps8(a), load_ps8(b)) })
    }

    #[cfg(target_feature = "avx")]
    #[inline(always)]
    fn min_f32x8(a: F32x8, b: F32x8) -> F32x8 {
        store_ps8(unsafe { _mm256_min_ps(load_ps8(a), load_ps8(b)) })
    }

    #[cfg(target_feature = "avx")]
    #[inline(always)]
    fn max_f32x8(a: F32x8, b: F32x8) -> F32x8 {
        store_ps8(unsafe { _mm256_max_ps(load_ps8(a), load_ps8(b)) })
    }

    #[cfg(all(target_feature = "avx", target_feature = "fma"))]
    #[inline(always)]
    fn mul_add_f32x8(a: F32x8, b: F32x8, c: F32x8) -> F32x8 {
        store_ps8(unsafe { _mm256_fmadd_ps(load_ps8(a), load_ps8(b), load_ps8(c)) })
    }

    #[cfg(target_feature = "avx")]
    #[inline(always)]
    fn eq_f32x8(a: F32x8, b: F32x8) -> U32x8 {
        store_si8(unsafe {
            _mm256_castps_si256(_mm256_cmp_ps::<_CMP_EQ_OQ>(load_ps8(a), load_ps8(b)))
        })
    }

    #[cfg(target_feature = "avx")]
    #[inline(always)]
    fn lt_f32x8(a: F32x8, b: F32x8) -> U32x8 {
        store_si8(unsafe {
            _mm256_castps_si256(_mm256_cmp_ps::<_CMP_LT_OQ>(load_ps8(a), load_ps8(b)))
        })
    }

    #[cfg(target_feature = "avx")]
    #[inline(always)]
    fn gt_f32x8(a: F32x8, b: F32x8) -> U32x8 {
        store_si8(unsafe {
            _mm256_castps_si256(_mm256_cmp_ps::<_CMP_GT_OQ>(load_ps8(a), load_ps8(b)))
        })
    }

    #[cfg(target_feature = "avx")]
    #[inline(always)]
    fn le_f32x8(a: F32x8, b: F32x8) -> U32x8 {
        store_si8(unsafe {
            _mm256_castps_si256(_mm256_cmp_ps::<_CMP_LE_OQ>(load_ps8(a), load_ps8(b)))
        })
    }

    #[cfg(target_feature = "avx")]
    #[inline(always)]
    fn ge_f32x8(a: F32x8, b: F32x8) -> U32x8 {
        store_si8(unsafe {
            _mm256_castps_si256(_mm256_cmp_ps::<_CMP_GE_OQ>(load_ps8(a), load_ps8(b)))
        })
    }

    #[cfg(target_feature = "avx")]
    #[inline(always)]
    fn select_f32x8(a: F32x8, b: F32x8, control: U32x8) -> F32x8 {
        store_ps8(unsafe {
            _mm256_blendv_ps(load_ps8(a), load_ps8(b), _mm256_castsi256_ps(load_si8(control)))
        })
    }

    #[cfg(target_feature = "avx")]
    #[inline(always)]
    fn i32_to_f32x8(a: U32x8) -> F32x8 {
        store_ps8(unsafe { _mm256_cvtepi32_ps(load_si8(a)) })
    }

    #[cfg(target_feature = "avx")]
    #[inline(always)]
    fn and_u32x8(a: U32x8, b: U32x8) -> U32x8 {
        store_si8(unsafe {
            _mm256_castps_si256(_mm256_and_ps(
                _mm256_castsi256_ps(load_si8(a)),
                _mm256_castsi256_ps(load_si8(b)),
            ))
        })
    }

    #[cfg(target_feature = "avx")]
    #[inline(always)]
    fn or_u32x8(a: U32x8, b: U32x8) -> U32x8 {
        store_si8(unsafe {
            _mm256_castps_si256(_mm256_or_ps(
                _mm256_castsi256_ps(load_si8(a)),
                _mm256_castsi256_ps(load_si8(b)),
            ))
        })
    }

    #[cfg(target_feature = "avx")]
    #[inline(always)]
    fn xor_u32x8(a: U32x8, b: U32x8) -> U32x8 {
        store_si8(unsafe {
            _mm256_castps_si256(_mm256_xor_ps(
                _mm256_castsi256_ps(load_si8(a)),
                _mm256_castsi256_ps(load_si8(b)),
            ))
        })
    }

    #[cfg(target_feature = "avx")]
    #[inline(always)]
    fn select_u32x8(a: U32x8, b: U32x8, control: U32x8) -> U32x8 {
        store_si8(unsafe {
            _mm256_castps_si256(_mm256_blendv_ps(
                _mm256_castsi256_ps(load_si8(a)),
                _mm256_castsi256_ps(load_si8(b)),
                _mm256_castsi256_ps(load_si8(control)),
            ))
        })
    }

    #[cfg(target_feature = "avx")]
    #[inline(always)]
    fn sign_mask_u32x8(a: U32x8) -> u32 {
        unsafe { _mm256_movemask_ps(_mm256_castsi256_ps(load_si8(a))) as u32 }
    }

    // ------------------------------------------------------------------
    // AVX2: native 8-wide integer lanes
    // ------------------------------------------------------------------

    #[cfg(target_feature = "avx2")]
    #[inline(always)]
    fn eq_u32x8(a: U32x8, b: U32x8) -> U32x8 {
        store_si8(unsafe { _mm256_cmpeq_epi32(load_si8(a), load_si8(b)) })
    }

    #[cfg(target_feature = "avx2")]
    #[inline(always)]
    fn shl_u32x8<const COUNT: u32>(a: U32x8) -> U32x8 {
        store_si8(unsafe { _mm256_sll_epi32(load_si8(a), _mm_cvtsi32_si128(COUNT as i32)) })
    }

    #[cfg(target_feature = "avx2")]
    #[inline(always)]
    fn shr_u32x8<const COUNT: u32>(a: U32x8) -> U32x8 {
        store_si8(unsafe { _mm256_srl_epi32(load_si8(a), _mm_cvtsi32_si128(COUNT as i32)) })
    }

    #[cfg(target_feature = "avx2")]
    #[inline(always)]
    fn sra_u32x8<const COUNT: u32>(a: U32x8) -> U32x8 {
        store_si8(unsafe { _mm256_sra_epi32(load_si8(a), _mm_cvtsi32_si128(COUNT as i32)) })
    }
}
