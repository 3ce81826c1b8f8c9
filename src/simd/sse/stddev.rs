pub(crate) mod float32 {
    use crate::{
        simd::{
            sse::f32x4::{self, F32x4},
            traits::{Alignment, SimdLoad, SimdReduce},
        },
        stats::Sums,
    };

    /// Elements consumed per iteration by the 4-register kernels.
    pub(crate) const UNROLLED_WIDTH: usize = 4 * f32x4::LANE_COUNT;

    #[inline(always)]
    unsafe fn load<const ALIGNED: bool>(ptr: *const f32) -> F32x4 {
        if ALIGNED {
            F32x4::load_aligned(ptr)
        } else {
            F32x4::load_unaligned(ptr)
        }
    }

    /// One register per iteration: `W = 4`.
    #[inline(always)]
    unsafe fn accumulate<const ALIGNED: bool>(input: &[f32]) -> Sums {
        let blocks = input.chunks_exact(f32x4::LANE_COUNT);
        let tail = blocks.remainder();

        let mut sum = F32x4::zeros();
        let mut sum_sq = F32x4::zeros();

        for block in blocks {
            let x = load::<ALIGNED>(block.as_ptr());
            sum += x;
            sum_sq += x * x;
        }

        Sums::new(sum.horizontal_sum(), sum_sq.horizontal_sum()).extend(tail)
    }

    /// Four registers per iteration: `W = 16`.
    ///
    /// Values go into the sum accumulator one register at a time; the four lane-wise
    /// squares are added pairwise before reaching the square accumulator.
    #[inline(always)]
    unsafe fn accumulate_unrolled<const ALIGNED: bool>(input: &[f32]) -> Sums {
        let blocks = input.chunks_exact(UNROLLED_WIDTH);
        let tail = blocks.remainder();

        let mut sum = F32x4::zeros();
        let mut sum_sq = F32x4::zeros();

        for block in blocks {
            let ptr = block.as_ptr();

            let x0 = load::<ALIGNED>(ptr);
            let x1 = load::<ALIGNED>(ptr.add(f32x4::LANE_COUNT));
            let x2 = load::<ALIGNED>(ptr.add(2 * f32x4::LANE_COUNT));
            let x3 = load::<ALIGNED>(ptr.add(3 * f32x4::LANE_COUNT));

            sum += x0;
            sum += x1;
            sum += x2;
            sum += x3;

            sum_sq += (x0 * x0 + x1 * x1) + (x2 * x2 + x3 * x3);
        }

        Sums::new(sum.horizontal_sum(), sum_sq.horizontal_sum()).extend(tail)
    }

    /// # Safety
    ///
    /// SSE must be available and `input` must start on a 16-byte boundary.
    #[target_feature(enable = "sse")]
    pub(crate) unsafe fn accumulate_aligned(input: &[f32]) -> Sums {
        debug_assert!(input.is_empty() || F32x4::is_aligned(input.as_ptr()));
        accumulate::<true>(input)
    }

    /// # Safety
    ///
    /// SSE must be available.
    #[target_feature(enable = "sse")]
    pub(crate) unsafe fn accumulate_unaligned(input: &[f32]) -> Sums {
        accumulate::<false>(input)
    }

    /// # Safety
    ///
    /// SSE must be available and `input` must start on a 16-byte boundary.
    #[target_feature(enable = "sse")]
    pub(crate) unsafe fn accumulate_unrolled_aligned(input: &[f32]) -> Sums {
        debug_assert!(input.is_empty() || F32x4::is_aligned(input.as_ptr()));
        accumulate_unrolled::<true>(input)
    }

    /// # Safety
    ///
    /// SSE must be available.
    #[target_feature(enable = "sse")]
    pub(crate) unsafe fn accumulate_unrolled_unaligned(input: &[f32]) -> Sums {
        accumulate_unrolled::<false>(input)
    }
}
