//! Single-pass mean and population standard deviation of `f32` buffers.
//!
//! The crate ships one reduction, `Σx` and `Σx²` in a single traversal followed by
//!
//! ```text
//! mean   = Σx / N
//! stddev = sqrt(Σx² / N − mean²)
//! ```
//!
//! implemented by several kernels of increasing vector width (scalar, SSE, unrolled SSE,
//! AVX, NEON). They all share the scalar remainder loop and the closing formula in
//! [`stats`], and agree with each other within floating-point tolerance.
//!
//! # Quick start
//!
//! ```rust
//! use simdly_stats::{stddev_and_mean, SimdStddevMean};
//!
//! let samples = vec![5.0f32; 10];
//! let result = stddev_and_mean(&samples);
//! assert_eq!(result.mean, 5.0);
//! assert_eq!(result.stddev, 0.0);
//!
//! // Same numbers through the slice trait
//! let result = samples.par_simd_stddev_and_mean();
//! assert_eq!(result.mean, 5.0);
//! ```
//!
//! # Choosing a kernel explicitly
//!
//! [`Variant`] names every kernel. [`Variant::try_compute`] checks the CPU and the buffer
//! alignment first; [`Variant::compute`] leaves both to the caller.
//!
//! ```rust
//! use simdly_stats::{utils::AlignedBuffer, Variant};
//!
//! let buffer = AlignedBuffer::from_slice(&[1.0, 2.0, 3.0, 4.0]);
//! for variant in Variant::supported() {
//!     let result = variant.try_compute(&buffer).unwrap();
//!     assert_eq!(result.mean, 2.5);
//! }
//! ```
//!
//! # Accuracy
//!
//! The single-pass formula cancels badly when the mean is large compared to the spread of
//! the samples. This is part of the numeric contract of the crate and is not corrected.

pub mod dispatch;
pub mod error;
pub mod simd;
pub mod stats;
pub mod utils;

pub use dispatch::{stddev_and_mean, stddev_and_mean_into, Capabilities, Variant};
pub use error::{Result, StatsError};
pub use simd::SimdStddevMean;
pub use stats::{StddevAndMean, Sums};

/// Buffers shorter than this are not split across threads by `par_simd_*` methods.
pub const PARALLEL_SIMD_THRESHOLD: usize = 1 << 18;

/// Elements per rayon task in `par_simd_*` methods.
///
/// A multiple of every kernel width and of 32 bytes, so chunks keep the alignment of the
/// buffer they come from.
pub const PARALLEL_CHUNK_SIZE: usize = 1 << 16;
