//! SSE SIMD implementations for 128-bit vector operations.
//!
//! Two kernel widths live here, each in an aligned (`_mm_load_ps`, 16-byte boundary) and an
//! unaligned (`_mm_loadu_ps`) flavour:
//!
//! - one register per iteration, 4 elements;
//! - four registers per iteration, 16 elements.
//!
//! # Architecture Requirements
//!
//! - **Target Architecture**: x86 or x86_64
//! - **CPU Support**: SSE (always present on x86_64)
//! - **Runtime Detection**: done by [`crate::dispatch`] before any kernel is called

pub mod f32x4;

pub(crate) mod stddev;
