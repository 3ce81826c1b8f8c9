#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use std::ops::{Add, AddAssign, Mul};

use crate::simd::traits::{Alignment, SimdLoad, SimdReduce};

pub const NEON_ALIGNMENT: usize = 16;

pub const LANE_COUNT: usize = 4;

/// A SIMD vector of 4 32-bit floating point values
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    pub elements: float32x4_t,
}

impl Alignment<f32> for F32x4 {
    const ALIGNMENT: usize = NEON_ALIGNMENT;
}

impl SimdLoad<f32> for F32x4 {
    type Output = Self;

    #[inline(always)]
    unsafe fn zeros() -> Self::Output {
        Self {
            elements: vdupq_n_f32(0.0),
        }
    }

    /// `vld1q_f32` has no alignment requirement; aligned input only saves a cache line split.
    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self::Output {
        Self::load_unaligned(ptr)
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self::Output {
        Self {
            elements: vld1q_f32(ptr),
        }
    }
}

impl SimdReduce<f32> for F32x4 {
    #[inline(always)]
    unsafe fn horizontal_sum(&self) -> f32 {
        let mut lanes = [0.0f32; LANE_COUNT];
        vst1q_f32(lanes.as_mut_ptr(), self.elements);

        lanes.iter().sum()
    }
}

impl Add for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { vaddq_f32(self.elements, rhs.elements) },
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

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { vmulq_f32(self.elements, rhs.elements) },
        }
    }
}
