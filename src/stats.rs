//! Shared arithmetic for every stddev/mean kernel.
//!
//! Each kernel only differs in how it fills the vectorized prefix of the buffer. Once its
//! lane accumulators are collapsed, the remainder loop and the closing formula are the ones
//! defined here, so all variants stay on the same numeric contract.
//!
//! # Numeric contract
//!
//! ```text
//! mean     = Σx / N
//! variance = Σx² / N − mean²
//! stddev   = sqrt(variance)
//! ```
//!
//! This is the single-pass form of the population variance. It vectorizes well but loses
//! precision when `|mean|` is large compared to the spread of the data; for such inputs the
//! computed variance can even dip slightly below zero, in which case `stddev` is `NaN`.
//! Callers rely on this exact arithmetic, so it is kept as is.

/// Scalar accumulator pair: running `Σx` and `Σx²`.
///
/// Kernels produce one after their horizontal reduction, then feed the scalar remainder of
/// the buffer through [`Sums::extend`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Sums {
    /// Running sum of the samples.
    pub sum: f32,
    /// Running sum of the squared samples.
    pub sum_sq: f32,
}

impl Sums {
    /// Creates an accumulator pair from already reduced sums.
    #[inline(always)]
    pub const fn new(sum: f32, sum_sq: f32) -> Self {
        Self { sum, sum_sq }
    }

    /// Adds one sample.
    #[inline(always)]
    pub fn push(&mut self, x: f32) {
        self.sum_sq += x * x;
        self.sum += x;
    }

    /// Adds every sample of `tail`, in buffer order.
    #[inline(always)]
    pub fn extend(mut self, tail: &[f32]) -> Self {
        for &x in tail {
            self.push(x);
        }
        self
    }

    /// Combines the sums of two disjoint parts of a buffer.
    #[inline(always)]
    pub fn merge(self, other: Self) -> Self {
        Self {
            sum: self.sum + other.sum,
            sum_sq: self.sum_sq + other.sum_sq,
        }
    }

    /// Applies the closing formula for a buffer of `len` samples.
    ///
    /// Returns zeros for `len == 0`.
    #[inline(always)]
    pub fn finish(self, len: usize) -> StddevAndMean {
        if len == 0 {
            return StddevAndMean::default();
        }

        let n = len as f32;

        let mean = self.sum / n;
        let variance = self.sum_sq / n - mean * mean;

        StddevAndMean {
            stddev: variance.sqrt(),
            mean,
        }
    }
}

/// Population standard deviation and arithmetic mean of a buffer.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StddevAndMean {
    pub stddev: f32,
    pub mean: f32,
}

impl StddevAndMean {
    /// Writes both values into caller-provided locations.
    #[inline(always)]
    pub fn write_into(self, stddev: &mut f32, mean: &mut f32) {
        *stddev = self.stddev;
        *mean = self.mean;
    }
}

/// Reference kernel: one element per iteration, no vector registers.
///
/// Always available; every other variant must agree with it within floating-point
/// tolerance.
#[inline]
pub fn accumulate_generic(input: &[f32]) -> Sums {
    Sums::default().extend(input)
}
