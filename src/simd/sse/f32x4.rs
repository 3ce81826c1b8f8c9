//! SSE 4-lane f32 SIMD vector.
//!
//! `F32x4` wraps the 128-bit `__m128` register. SSE is part of the x86_64 baseline, but the
//! kernels built on this type still declare `#[target_feature(enable = "sse")]` so they
//! also compile for 32-bit x86 targets, where it is detected at runtime.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, AddAssign, Mul};

use crate::simd::traits::{Alignment, SimdLoad, SimdReduce};

/// SSE memory alignment requirement in bytes (`_mm_load_ps`).
pub(crate) const SSE_ALIGNMENT: usize = 16;

/// Number of f32 elements in a 128-bit register.
pub(crate) const LANE_COUNT: usize = 4;

/// SSE SIMD vector containing 4 packed f32 values.
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    pub elements: __m128,
}

impl Alignment<f32> for F32x4 {
    const ALIGNMENT: usize = SSE_ALIGNMENT;
}

impl SimdLoad<f32> for F32x4 {
    type Output = Self;

    #[inline(always)]
    unsafe fn zeros() -> Self::Output {
        Self {
            elements: _mm_setzero_ps(),
        }
    }

    /// Loads 4 elements from 16-byte aligned memory with `_mm_load_ps`.
    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self::Output {
        debug_assert!(Self::is_aligned(ptr), "Pointer must be {SSE_ALIGNMENT}-byte aligned");

        Self {
            elements: _mm_load_ps(ptr),
        }
    }

    /// Loads 4 elements from any address with `_mm_loadu_ps`.
    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self::Output {
        Self {
            elements: _mm_loadu_ps(ptr),
        }
    }
}

impl SimdReduce<f32> for F32x4 {
    #[inline(always)]
    unsafe fn horizontal_sum(&self) -> f32 {
        let mut lanes = [0.0f32; LANE_COUNT];
        _mm_storeu_ps(lanes.as_mut_ptr(), self.elements);

        lanes.iter().sum()
    }
}

impl Add for F32x4 {
    type Output = Self;

    /// Lane-wise addition (`_mm_add_ps`).
    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm_add_ps(self.elements, rhs.elements) },
        }
    }
}

impl AddAssign for F32x4 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul for F32x4 {
    type Output = Self;

    /// Lane-wise multiplication (`_mm_mul_ps`).
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm_mul_ps(self.elements, rhs.elements) },
        }
    }
}
