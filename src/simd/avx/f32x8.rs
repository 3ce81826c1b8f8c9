//! AVX 8-lane f32 SIMD vector implementation.
//!
//! This module provides `F32x8`, a SIMD vector type that wraps Intel's `__m256` intrinsic
//! type to perform vectorized operations on 8 single-precision floating-point values
//! simultaneously using 256-bit AVX instructions.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: Intel processors with AVX support (Sandy Bridge and later)
//! - **Target Architecture**: x86_64 (and x86)
//!
//! # Performance Characteristics
//!
//! - **Vector Width**: 256 bits (8 × f32)
//! - **Memory Alignment**: `load_aligned()` requires 32-byte aligned data
//!
//! # Supported Operations
//!
//! ## Loading
//! - `zeros()` - Zeroed accumulator register
//! - `load_aligned()`, `load_unaligned()` - Direct memory loading
//!
//! ## Reduction
//! - `horizontal_sum()` - Collapses the 8 lanes into one scalar, lane 0 first
//!
//! ## Arithmetic Operators
//! - Element-wise addition (`+`, `+=`) and multiplication (`*`)

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, AddAssign, Mul};

use crate::simd::traits::{Alignment, SimdLoad, SimdReduce};

/// AVX memory alignment requirement in bytes.
///
/// `_mm256_load_ps` faults unless its address is a multiple of 32 bytes.
pub(crate) const AVX_ALIGNMENT: usize = 32;

/// Number of f32 elements that fit in an AVX 256-bit vector.
///
/// AVX vectors contain 8 single-precision floating-point values (8 × 32 bits = 256 bits).
pub(crate) const LANE_COUNT: usize = 8;

/// AVX SIMD vector containing 8 packed f32 values.
///
/// Every lane is processed independently: adding or multiplying two `F32x8` never moves
/// data across lanes, which is what makes a final horizontal reduction valid for
/// accumulators built from them.
#[derive(Copy, Clone, Debug)]
pub struct F32x8 {
    /// AVX 256-bit vector register containing 8 packed f32 values
    pub elements: __m256,
}

impl Alignment<f32> for F32x8 {
    const ALIGNMENT: usize = AVX_ALIGNMENT;
}

impl SimdLoad<f32> for F32x8 {
    type Output = Self;

    /// Returns a vector with all 8 lanes set to `0.0`.
    #[inline(always)]
    unsafe fn zeros() -> Self::Output {
        Self {
            elements: _mm256_setzero_ps(),
        }
    }

    /// Loads 8 elements from 32-byte aligned memory.
    ///
    /// This is the fastest loading method when alignment is guaranteed.
    /// Uses the `_mm256_load_ps` intrinsic.
    ///
    /// # Safety
    ///
    /// Pointer must be 32-byte aligned and point to at least 8 valid f32 values.
    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self::Output {
        debug_assert!(Self::is_aligned(ptr), "Pointer must be {AVX_ALIGNMENT}-byte aligned");

        Self {
            elements: _mm256_load_ps(ptr),
        }
    }

    /// Loads 8 elements from unaligned memory.
    ///
    /// Works with any memory alignment. Uses the `_mm256_loadu_ps` intrinsic.
    ///
    /// # Safety
    ///
    /// Pointer must point to at least 8 valid f32 values.
    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self::Output {
        Self {
            elements: _mm256_loadu_ps(ptr),
        }
    }
}

impl SimdReduce<f32> for F32x8 {
    /// Sums the 8 lanes through a stack scratch array.
    #[inline(always)]
    unsafe fn horizontal_sum(&self) -> f32 {
        let mut lanes = [0.0f32; LANE_COUNT];
        _mm256_storeu_ps(lanes.as_mut_ptr(), self.elements);

        lanes.iter().sum()
    }
}

/// Element-wise addition using `_mm256_add_ps`, 8 additions in one instruction.
impl Add for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_add_ps(self.elements, rhs.elements) },
        }
    }
}

impl AddAssign for F32x8 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Element-wise multiplication using `_mm256_mul_ps`.
///
/// `x * x` squares each lane independently.
impl Mul for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_mul_ps(self.elements, rhs.elements) },
        }
    }
}
