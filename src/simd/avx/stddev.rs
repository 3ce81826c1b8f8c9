//! AVX stddev/mean accumulation.
//!
//! # Algorithm
//!
//! ```text
//! for each block of 32 floats:              // 4 × 256-bit loads
//!     sum    += x0; sum += x1; sum += x2; sum += x3
//!     sum_sq += (x0·x0 + x1·x1) + (x2·x2 + x3·x3)   // lane-wise squares
//! sum, sum_sq = horizontal_sum(sum), horizontal_sum(sum_sq)
//! for each of the trailing (len mod 32) floats:
//!     sum_sq += x·x; sum += x
//! ```
//!
//! The closing formula is applied by the caller through [`Sums::finish`].
//!
//! [`Sums::finish`]: crate::stats::Sums::finish

pub(crate) mod float32 {
    use crate::{
        simd::{
            avx::f32x8::{self, F32x8},
            traits::{Alignment, SimdLoad, SimdReduce},
        },
        stats::Sums,
    };

    /// Number of 256-bit registers loaded per loop iteration.
    pub(crate) const UNROLL: usize = 4;

    /// Elements consumed per loop iteration.
    pub(crate) const UNROLLED_WIDTH: usize = UNROLL * f32x8::LANE_COUNT;

    #[inline(always)]
    unsafe fn load<const ALIGNED: bool>(ptr: *const f32) -> F32x8 {
        if ALIGNED {
            F32x8::load_aligned(ptr)
        } else {
            F32x8::load_unaligned(ptr)
        }
    }

    /// Shared body of the aligned and unaligned kernels.
    ///
    /// Blocks are taken with `chunks_exact`, so when `input` starts on a 32-byte boundary
    /// every block does too (a block is 128 bytes long).
    #[inline(always)]
    unsafe fn accumulate<const ALIGNED: bool>(input: &[f32]) -> Sums {
        let blocks = input.chunks_exact(UNROLLED_WIDTH);
        let tail = blocks.remainder();

        let mut sum = F32x8::zeros();
        let mut sum_sq = F32x8::zeros();

        for block in blocks {
            let ptr = block.as_ptr();

            let x0 = load::<ALIGNED>(ptr);
            let x1 = load::<ALIGNED>(ptr.add(f32x8::LANE_COUNT));
            let x2 = load::<ALIGNED>(ptr.add(2 * f32x8::LANE_COUNT));
            let x3 = load::<ALIGNED>(ptr.add(3 * f32x8::LANE_COUNT));

            sum += x0;
            sum += x1;
            sum += x2;
            sum += x3;

            let sq01 = x0 * x0 + x1 * x1;
            let sq23 = x2 * x2 + x3 * x3;
            sum_sq += sq01 + sq23;
        }

        Sums::new(sum.horizontal_sum(), sum_sq.horizontal_sum()).extend(tail)
    }

    /// Accumulates `Σx` and `Σx²` with 32-byte aligned loads.
    ///
    /// # Safety
    ///
    /// - The CPU must support AVX.
    /// - `input` must start on a 32-byte boundary (unchecked in release builds).
    #[target_feature(enable = "avx")]
    pub(crate) unsafe fn accumulate_aligned(input: &[f32]) -> Sums {
        debug_assert!(
            input.is_empty() || F32x8::is_aligned(input.as_ptr()),
            "input must be {}-byte aligned",
            f32x8::AVX_ALIGNMENT
        );

        accumulate::<true>(input)
    }

    /// Accumulates `Σx` and `Σx²` with unaligned loads.
    ///
    /// # Safety
    ///
    /// The CPU must support AVX.
    #[target_feature(enable = "avx")]
    pub(crate) unsafe fn accumulate_unaligned(input: &[f32]) -> Sums {
        accumulate::<false>(input)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::float32::*;
    use crate::{
        simd::avx::f32x8::LANE_COUNT,
        stats::{accumulate_generic, StddevAndMean},
        utils::AlignedBuffer,
    };

    fn avx_available() -> bool {
        is_x86_feature_detected!("avx")
    }

    /// Integer samples keep every partial sum exact, whatever the summation order.
    fn integer_data(len: usize, seed: u64) -> Vec<f32> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len)
            .map(|_| rng.random_range(-100i32..=100) as f32)
            .collect()
    }

    fn both(input: &AlignedBuffer) -> [StddevAndMean; 2] {
        unsafe {
            [
                accumulate_aligned(input).finish(input.len()),
                accumulate_unaligned(input).finish(input.len()),
            ]
        }
    }

    #[test]
    fn test_width_constants() {
        assert_eq!(UNROLLED_WIDTH, 32);
        assert_eq!(UNROLLED_WIDTH % LANE_COUNT, 0);
    }

    #[test]
    fn test_empty_input() {
        if !avx_available() {
            return;
        }

        for result in both(&AlignedBuffer::zeroed(0)) {
            assert_eq!(result, StddevAndMean::default());
        }
    }

    #[test]
    fn test_single_element() {
        if !avx_available() {
            return;
        }

        for x in [3.0f32, -0.1, 1e6] {
            for result in both(&AlignedBuffer::from_slice(&[x])) {
                assert_eq!(result.mean, x);
                assert_eq!(result.stddev, 0.0);
            }
        }
    }

    #[test]
    fn test_prefix_and_remainder_boundaries() {
        if !avx_available() {
            return;
        }

        let widths = [LANE_COUNT, 2 * LANE_COUNT, UNROLLED_WIDTH, 2 * UNROLLED_WIDTH];
        for width in widths {
            for len in [width - 1, width, width + 1] {
                let data = integer_data(len, (width * 1000 + len) as u64);
                let buffer = AlignedBuffer::from_slice(&data);
                let expected = accumulate_generic(&data);

                assert_eq!(unsafe { accumulate_aligned(&buffer) }, expected, "aligned, len {len}");
                assert_eq!(unsafe { accumulate_unaligned(&buffer) }, expected, "unaligned, len {len}");
            }
        }
    }

    #[test]
    fn test_unaligned_offsets() {
        if !avx_available() {
            return;
        }

        let data = integer_data(300, 99);
        let buffer = AlignedBuffer::from_slice(&data);

        for offset in 1..LANE_COUNT {
            let input = &buffer[offset..];
            assert_eq!(
                unsafe { accumulate_unaligned(input) },
                accumulate_generic(input),
                "offset {offset}"
            );
        }
    }

    #[test]
    fn test_aligned_sub_slice_on_32_byte_boundary() {
        if !avx_available() {
            return;
        }

        let data = integer_data(200, 5);
        let buffer = AlignedBuffer::from_slice(&data);
        let input = &buffer[LANE_COUNT..LANE_COUNT + 100];

        assert_eq!(unsafe { accumulate_aligned(input) }, accumulate_generic(input));
    }

    #[test]
    fn test_half_positive_half_negative() {
        if !avx_available() {
            return;
        }

        let a = 3.0f32;
        for len in [2usize, 32, 64, 66, 1000] {
            let data: Vec<f32> = (0..len).map(|i| if i % 2 == 0 { a } else { -a }).collect();
            for result in both(&AlignedBuffer::from_slice(&data)) {
                assert_eq!(result.mean, 0.0, "len {len}");
                assert_eq!(result.stddev, a, "len {len}");
            }
        }
    }

    #[test]
    fn test_random_against_generic() {
        if !avx_available() {
            return;
        }

        let mut rng = StdRng::seed_from_u64(2024);
        for len in [1_000usize, 65_537, 1_000_000] {
            let data: Vec<f32> = (0..len).map(|_| rng.random_range(-1.0..1.0)).collect();
            let buffer = AlignedBuffer::from_slice(&data);
            let expected = accumulate_generic(&data).finish(len);

            for result in both(&buffer) {
                let rel = ((result.stddev - expected.stddev) / expected.stddev).abs();
                assert!(rel < 1e-4, "len {len}: stddev {} vs {}", result.stddev, expected.stddev);
                assert!((result.mean - expected.mean).abs() < 1e-4, "len {len}: mean");
            }
        }
    }
}
