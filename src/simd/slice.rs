use rayon::prelude::*;

use crate::{
    dispatch::{stddev_and_mean, Variant},
    simd::traits::SimdStddevMean,
    stats::{accumulate_generic, StddevAndMean, Sums},
    PARALLEL_CHUNK_SIZE, PARALLEL_SIMD_THRESHOLD,
};

#[inline(always)]
fn scalar_stddev_and_mean(input: &[f32]) -> StddevAndMean {
    accumulate_generic(input).finish(input.len())
}

/// Splits `input` into `PARALLEL_CHUNK_SIZE` chunks accumulated on the rayon pool.
///
/// Chunk partial sums are merged in buffer order, so the result does not depend on how
/// the pool schedules the chunks.
fn par_simd_stddev_and_mean(input: &[f32]) -> StddevAndMean {
    if input.len() < PARALLEL_SIMD_THRESHOLD {
        return stddev_and_mean(input);
    }

    let variant = Variant::select(input);

    let partials: Vec<Sums> = input
        .par_chunks(PARALLEL_CHUNK_SIZE)
        // SAFETY: `variant` accepts `input`, and every chunk starts a multiple of
        // `PARALLEL_CHUNK_SIZE` floats after it, which keeps the alignment of `input`.
        .map(|chunk| unsafe { variant.accumulate(chunk) })
        .collect();

    partials
        .into_iter()
        .fold(Sums::default(), Sums::merge)
        .finish(input.len())
}

impl SimdStddevMean for &[f32] {
    #[inline(always)]
    fn scalar_stddev_and_mean(self) -> StddevAndMean {
        scalar_stddev_and_mean(self)
    }

    #[inline(always)]
    fn simd_stddev_and_mean(self) -> StddevAndMean {
        stddev_and_mean(self)
    }

    #[inline(always)]
    fn par_simd_stddev_and_mean(self) -> StddevAndMean {
        par_simd_stddev_and_mean(self)
    }
}

impl SimdStddevMean for &Vec<f32> {
    #[inline(always)]
    fn scalar_stddev_and_mean(self) -> StddevAndMean {
        scalar_stddev_and_mean(self)
    }

    #[inline(always)]
    fn simd_stddev_and_mean(self) -> StddevAndMean {
        stddev_and_mean(self)
    }

    #[inline(always)]
    fn par_simd_stddev_and_mean(self) -> StddevAndMean {
        par_simd_stddev_and_mean(self)
    }
}
