use crate::stats::StddevAndMean;

/// Memory alignment requirement of a SIMD vector type.
pub trait Alignment<T> {
    /// Natural alignment of the vector register, in bytes.
    const ALIGNMENT: usize;

    /// Checks whether `ptr` satisfies [`Alignment::ALIGNMENT`].
    #[inline(always)]
    fn is_aligned(ptr: *const T) -> bool {
        (ptr as usize) % Self::ALIGNMENT == 0
    }
}

/// Full-width loads into a SIMD vector.
pub trait SimdLoad<T> {
    type Output;

    /// Vector with every lane set to zero.
    ///
    /// # Safety
    ///
    /// The CPU must support the instruction set of the implementing type.
    unsafe fn zeros() -> Self::Output;

    /// Loads one full vector from aligned memory.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for a full vector of reads and aligned to
    /// [`Alignment::ALIGNMENT`].
    unsafe fn load_aligned(ptr: *const T) -> Self::Output;

    /// Loads one full vector with no alignment requirement.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for a full vector of reads.
    unsafe fn load_unaligned(ptr: *const T) -> Self::Output;
}

/// Horizontal reductions of a SIMD vector.
pub trait SimdReduce<T> {
    /// Sums every lane into one scalar, lane 0 first.
    ///
    /// # Safety
    ///
    /// The CPU must support the instruction set of the implementing type.
    unsafe fn horizontal_sum(&self) -> T;
}

/// Single-pass mean and population standard deviation of a buffer.
///
/// Mirrors the `scalar_* / simd_* / par_simd_*` layout of the other slice traits of the
/// crate:
///
/// - `scalar_*` always runs the one-element-per-iteration reference kernel;
/// - `simd_*` runs the widest kernel the CPU and the buffer alignment allow;
/// - `par_simd_*` splits large buffers across the rayon pool and combines the partial sums
///   before applying the closing formula once.
///
/// All three agree within floating-point tolerance; they differ in summation order only.
pub trait SimdStddevMean {
    fn scalar_stddev_and_mean(self) -> StddevAndMean;
    fn simd_stddev_and_mean(self) -> StddevAndMean;
    fn par_simd_stddev_and_mean(self) -> StddevAndMean;
}
