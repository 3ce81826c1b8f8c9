//! ARM NEON SIMD implementations for 128-bit vector operations.
//!
//! NEON is available on all AArch64 processors, including Apple Silicon and AWS Graviton.
//! Unlike SSE/AVX, NEON loads have no aligned form, so a single kernel serves every
//! buffer.
//!
//! # Performance Characteristics
//!
//! - **Vector Width**: 128 bits (4 × f32)
//! - **Unrolling**: 4 registers per loop iteration, 16 elements

pub mod f32x4;

pub(crate) mod stddev;
