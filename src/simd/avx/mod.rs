//! AVX SIMD implementations for 256-bit vector operations.
//!
//! This module contains the widest kernels of the crate, built on Intel's Advanced Vector
//! Extensions (AVX). Only AVX-level floating-point instructions are used (`vaddps`,
//! `vmulps`, `vmovaps`/`vmovups`), so AVX2 is not required. AVX is available on Intel
//! processors since Sandy Bridge (2011) and AMD processors since Bulldozer (2011).
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: Intel Sandy Bridge (2011+) or AMD Bulldozer (2011+)
//! - **Target Architecture**: x86 or x86_64
//! - **Compilation**: kernels carry `#[target_feature(enable = "avx")]`, no global
//!   `-C target-feature` flag is needed
//! - **Runtime Detection**: done by [`crate::dispatch`] before any kernel is called
//!
//! # Available Types
//!
//! - [`f32x8`]: 256-bit vector containing 8 packed single-precision floating-point values
//!
//! # Performance Characteristics
//!
//! - **Vector Width**: 256 bits (8 × f32)
//! - **Unrolling**: 4 registers per loop iteration, 32 elements
//! - **Memory Alignment**: the aligned kernel requires 32-byte aligned input
//!
//! # Usage Example
//!
//! ```rust
//! use simdly_stats::Variant;
//!
//! let data = [1.0f32; 100];
//! if Variant::AvxUnaligned.is_supported() {
//!     let result = Variant::AvxUnaligned.try_compute(&data).unwrap();
//!     assert_eq!(result.mean, 1.0);
//! }
//! ```

pub mod f32x8;

pub(crate) mod stddev;
