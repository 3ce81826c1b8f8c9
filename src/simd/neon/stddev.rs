pub(crate) mod float32 {
    use crate::{
        simd::{
            neon::f32x4::{self, F32x4},
            traits::{SimdLoad, SimdReduce},
        },
        stats::Sums,
    };

    /// Elements consumed per iteration: four 128-bit registers.
    pub(crate) const UNROLLED_WIDTH: usize = 4 * f32x4::LANE_COUNT;

    /// Accumulates `Σx` and `Σx²`, 16 elements per iteration.
    ///
    /// # Safety
    ///
    /// The CPU must support NEON (always true on AArch64 Linux and macOS).
    #[target_feature(enable = "neon")]
    pub(crate) unsafe fn accumulate(input: &[f32]) -> Sums {
        let blocks = input.chunks_exact(UNROLLED_WIDTH);
        let tail = blocks.remainder();

        let mut sum = F32x4::zeros();
        let mut sum_sq = F32x4::zeros();

        for block in blocks {
            let ptr = block.as_ptr();

            let x0 = F32x4::load_unaligned(ptr);
            let x1 = F32x4::load_unaligned(ptr.add(f32x4::LANE_COUNT));
            let x2 = F32x4::load_unaligned(ptr.add(2 * f32x4::LANE_COUNT));
            let x3 = F32x4::load_unaligned(ptr.add(3 * f32x4::LANE_COUNT));

            sum += x0;
            sum += x1;
            sum += x2;
            sum += x3;

            sum_sq += (x0 * x0 + x1 * x1) + (x2 * x2 + x3 * x3);
        }

        Sums::new(sum.horizontal_sum(), sum_sq.horizontal_sum()).extend(tail)
    }
}
