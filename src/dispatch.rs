//! Variant selection.
//!
//! Every kernel has the same contract and differs only in vector width and in what it
//! requires from the caller: an instruction set, and for the aligned kernels a buffer
//! starting on the register's natural boundary. This module names the kernels
//! ([`Variant`]), probes the CPU once ([`Capabilities`]) and routes a call to exactly one
//! kernel.

use std::fmt;
use std::sync::OnceLock;

use log::{debug, trace};

use crate::{
    error::{misaligned_input, unsupported_variant, Result},
    stats::{accumulate_generic, StddevAndMean, Sums},
};

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
use crate::simd::{avx, sse};

#[cfg(target_arch = "aarch64")]
use crate::simd::neon;

/// Instruction sets the kernels can use, as detected at runtime.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub sse: bool,
    pub avx: bool,
    pub neon: bool,
}

impl Capabilities {
    /// Probes the running CPU.
    pub fn detect() -> Self {
        Capabilities {
            sse: Self::detect_sse(),
            avx: Self::detect_avx(),
            neon: Self::detect_neon(),
        }
    }

    /// Capabilities of the running CPU, probed on first use and cached for the process.
    pub fn get() -> Self {
        static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();

        *CAPABILITIES.get_or_init(|| {
            let capabilities = Self::detect();
            debug!("detected cpu capabilities: {capabilities:?}");
            capabilities
        })
    }

    fn detect_sse() -> bool {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            is_x86_feature_detected!("sse")
        }

        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
        {
            false
        }
    }

    fn detect_avx() -> bool {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            is_x86_feature_detected!("avx")
        }

        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
        {
            false
        }
    }

    fn detect_neon() -> bool {
        #[cfg(target_arch = "aarch64")]
        {
            std::arch::is_aarch64_feature_detected!("neon")
        }

        #[cfg(not(target_arch = "aarch64"))]
        {
            false
        }
    }
}

/// The stddev/mean kernels shipped by the crate.
///
/// | Variant                | Elements per iteration | Alignment | Instruction set |
/// |------------------------|------------------------|-----------|-----------------|
/// | `Generic`              | 1                      | -         | -               |
/// | `SseAligned`           | 4                      | 16 bytes  | SSE             |
/// | `SseUnaligned`         | 4                      | -         | SSE             |
/// | `SseUnrolledAligned`   | 16                     | 16 bytes  | SSE             |
/// | `SseUnrolledUnaligned` | 16                     | -         | SSE             |
/// | `AvxAligned`           | 32                     | 32 bytes  | AVX             |
/// | `AvxUnaligned`         | 32                     | -         | AVX             |
/// | `Neon`                 | 16                     | -         | NEON            |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    Generic,
    SseAligned,
    SseUnaligned,
    SseUnrolledAligned,
    SseUnrolledUnaligned,
    AvxAligned,
    AvxUnaligned,
    Neon,
}

impl Variant {
    /// Every variant, narrowest first.
    pub const ALL: [Variant; 8] = [
        Variant::Generic,
        Variant::SseAligned,
        Variant::SseUnaligned,
        Variant::SseUnrolledAligned,
        Variant::SseUnrolledUnaligned,
        Variant::AvxAligned,
        Variant::AvxUnaligned,
        Variant::Neon,
    ];

    /// Selection order: widest first, aligned before unaligned at equal width.
    const PREFERENCE: [Variant; 8] = [
        Variant::AvxAligned,
        Variant::AvxUnaligned,
        Variant::Neon,
        Variant::SseUnrolledAligned,
        Variant::SseUnrolledUnaligned,
        Variant::SseAligned,
        Variant::SseUnaligned,
        Variant::Generic,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Variant::Generic => "generic",
            Variant::SseAligned => "a_sse",
            Variant::SseUnaligned => "u_sse",
            Variant::SseUnrolledAligned => "a_sse_unrolled",
            Variant::SseUnrolledUnaligned => "u_sse_unrolled",
            Variant::AvxAligned => "a_avx",
            Variant::AvxUnaligned => "u_avx",
            Variant::Neon => "neon",
        }
    }

    /// Elements consumed per iteration of the vectorized prefix loop.
    pub const fn width(self) -> usize {
        match self {
            Variant::Generic => 1,
            Variant::SseAligned | Variant::SseUnaligned => 4,
            Variant::SseUnrolledAligned | Variant::SseUnrolledUnaligned | Variant::Neon => 16,
            Variant::AvxAligned | Variant::AvxUnaligned => 32,
        }
    }

    /// Byte alignment the input must start on, if any.
    pub const fn alignment(self) -> Option<usize> {
        match self {
            Variant::SseAligned | Variant::SseUnrolledAligned => Some(16),
            Variant::AvxAligned => Some(32),
            _ => None,
        }
    }

    /// Whether the running CPU has the instruction set of this variant.
    pub fn is_supported(self) -> bool {
        self.is_supported_by(Capabilities::get())
    }

    pub fn is_supported_by(self, capabilities: Capabilities) -> bool {
        match self {
            Variant::Generic => true,
            Variant::SseAligned
            | Variant::SseUnaligned
            | Variant::SseUnrolledAligned
            | Variant::SseUnrolledUnaligned => capabilities.sse,
            Variant::AvxAligned | Variant::AvxUnaligned => capabilities.avx,
            Variant::Neon => capabilities.neon,
        }
    }

    /// Supported variants of the running CPU, narrowest first.
    pub fn supported() -> Vec<Variant> {
        Self::ALL
            .into_iter()
            .filter(|variant| variant.is_supported())
            .collect()
    }

    /// Whether `input` meets this variant's alignment precondition.
    ///
    /// An empty buffer is never read, so it qualifies for every variant.
    #[inline(always)]
    pub fn is_aligned_for(self, input: &[f32]) -> bool {
        match self.alignment() {
            Some(alignment) => input.is_empty() || (input.as_ptr() as usize) % alignment == 0,
            None => true,
        }
    }

    /// Whether this variant can run on `input` on the running CPU.
    #[inline(always)]
    pub fn accepts(self, input: &[f32]) -> bool {
        self.is_supported() && self.is_aligned_for(input)
    }

    /// Widest variant accepting `input`. Falls back to [`Variant::Generic`].
    #[inline]
    pub fn select(input: &[f32]) -> Variant {
        let capabilities = Capabilities::get();

        let variant = Self::PREFERENCE
            .into_iter()
            .find(|variant| variant.is_supported_by(capabilities) && variant.is_aligned_for(input))
            .unwrap_or(Variant::Generic);

        trace!("selected {variant} for {} elements", input.len());
        variant
    }

    /// Runs the vectorized prefix, horizontal reduction and scalar remainder of this
    /// variant, returning `Σx` and `Σx²`.
    ///
    /// A variant that is not compiled for the current target architecture runs the
    /// generic kernel.
    ///
    /// # Safety
    ///
    /// The caller must ensure [`Variant::accepts`] holds for `input`: the CPU supports
    /// the variant and, for aligned variants, `input` starts on the required boundary.
    /// Neither is checked.
    #[inline]
    pub unsafe fn accumulate(self, input: &[f32]) -> Sums {
        match self {
            Variant::Generic => accumulate_generic(input),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Variant::SseAligned => sse::stddev::float32::accumulate_aligned(input),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Variant::SseUnaligned => sse::stddev::float32::accumulate_unaligned(input),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Variant::SseUnrolledAligned => sse::stddev::float32::accumulate_unrolled_aligned(input),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Variant::SseUnrolledUnaligned => {
                sse::stddev::float32::accumulate_unrolled_unaligned(input)
            }
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Variant::AvxAligned => avx::stddev::float32::accumulate_aligned(input),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Variant::AvxUnaligned => avx::stddev::float32::accumulate_unaligned(input),
            #[cfg(target_arch = "aarch64")]
            Variant::Neon => neon::stddev::float32::accumulate(input),
            _ => accumulate_generic(input),
        }
    }

    /// Standard deviation and mean of `input` with this variant.
    ///
    /// # Safety
    ///
    /// Same contract as [`Variant::accumulate`].
    #[inline]
    pub unsafe fn compute(self, input: &[f32]) -> StddevAndMean {
        self.accumulate(input).finish(input.len())
    }

    /// Writes the standard deviation and mean of `input` into `stddev` and `mean`.
    ///
    /// # Safety
    ///
    /// Same contract as [`Variant::accumulate`].
    #[inline]
    pub unsafe fn compute_into(self, stddev: &mut f32, mean: &mut f32, input: &[f32]) {
        self.compute(input).write_into(stddev, mean)
    }

    /// Checked form of [`Variant::compute`].
    ///
    /// # Errors
    ///
    /// - [`StatsError::UnsupportedVariant`](crate::StatsError::UnsupportedVariant) if the
    ///   CPU lacks the variant's instruction set;
    /// - [`StatsError::MisalignedInput`](crate::StatsError::MisalignedInput) if a non-empty
    ///   `input` does not meet the variant's alignment.
    pub fn try_compute(self, input: &[f32]) -> Result<StddevAndMean> {
        if !self.is_supported() {
            return Err(unsupported_variant(self.name()));
        }

        if !self.is_aligned_for(input) {
            return Err(misaligned_input(
                self.name(),
                input.as_ptr() as usize,
                self.alignment().unwrap_or(1),
            ));
        }

        // SAFETY: both preconditions were checked above.
        Ok(unsafe { self.compute(input) })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Standard deviation and mean of `input`, computed with the widest variant the CPU and
/// the buffer alignment allow.
///
/// ```rust
/// let result = simdly_stats::stddev_and_mean(&[1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(result.mean, 2.5);
/// assert!((result.stddev - 1.118_034).abs() < 1e-6);
/// ```
#[inline]
pub fn stddev_and_mean(input: &[f32]) -> StddevAndMean {
    let variant = Variant::select(input);

    // SAFETY: `select` only returns variants accepting `input`.
    unsafe { variant.compute(input) }
}

/// Out-parameter form of [`stddev_and_mean`].
#[inline]
pub fn stddev_and_mean_into(stddev: &mut f32, mean: &mut f32, input: &[f32]) {
    stddev_and_mean(input).write_into(stddev, mean)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::{error::StatsError, utils::AlignedBuffer};

    #[test]
    fn test_generic_is_always_supported() {
        assert!(Variant::Generic.is_supported());
        assert!(Variant::Generic.is_supported_by(Capabilities::default()));
        assert!(Variant::supported().contains(&Variant::Generic));
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = Variant::ALL.iter().map(|variant| variant.name()).collect();
        assert_eq!(names.len(), Variant::ALL.len());
    }

    #[test]
    fn test_preference_covers_every_variant() {
        let preferred: HashSet<_> = Variant::PREFERENCE.iter().collect();
        let all: HashSet<_> = Variant::ALL.iter().collect();
        assert_eq!(preferred, all);
    }

    #[test]
    fn test_aligned_variants_declare_alignment() {
        for variant in Variant::ALL {
            let aligned = variant.name().starts_with("a_");
            assert_eq!(variant.alignment().is_some(), aligned, "{variant}");
        }
    }

    #[test]
    fn test_capabilities_are_cached() {
        assert_eq!(Capabilities::get(), Capabilities::get());
        assert_eq!(Capabilities::get(), Capabilities::detect());
    }

    #[test]
    fn test_select_without_capabilities_is_generic() {
        let data = AlignedBuffer::zeroed(64);
        let none = Capabilities::default();
        let selected = Variant::PREFERENCE
            .into_iter()
            .find(|variant| variant.is_supported_by(none) && variant.is_aligned_for(&data));
        assert_eq!(selected, Some(Variant::Generic));
    }

    #[test]
    fn test_select_never_picks_aligned_variant_for_misaligned_input() {
        let buffer = AlignedBuffer::zeroed(128);
        let input = &buffer[1..];
        let selected = Variant::select(input);

        assert!(selected.accepts(input));
        assert_eq!(selected.alignment(), None, "picked {selected}");
    }

    #[test]
    fn test_select_prefers_widest_on_aligned_input() {
        let buffer = AlignedBuffer::zeroed(128);
        let selected = Variant::select(&buffer);

        for variant in Variant::supported() {
            assert!(
                variant.width() <= selected.width(),
                "{variant} is wider than selected {selected}"
            );
        }
    }

    #[test]
    fn test_try_compute_rejects_misaligned_input() {
        let buffer = AlignedBuffer::from_slice(&[1.0; 40]);
        let input = &buffer[1..];

        for variant in Variant::supported() {
            let result = variant.try_compute(input);
            match variant.alignment() {
                Some(alignment) => assert_eq!(
                    result,
                    Err(StatsError::MisalignedInput {
                        variant: variant.name(),
                        address: input.as_ptr() as usize,
                        required_alignment: alignment,
                    })
                ),
                None => assert_eq!(result.map(|r| r.mean), Ok(1.0), "{variant}"),
            }
        }
    }

    #[test]
    fn test_try_compute_rejects_unsupported_variant() {
        for variant in Variant::ALL {
            if !variant.is_supported() {
                assert_eq!(
                    variant.try_compute(&[1.0]),
                    Err(StatsError::UnsupportedVariant {
                        variant: variant.name()
                    })
                );
            }
        }
    }

    #[test]
    fn test_empty_input_accepted_by_every_supported_variant() {
        let empty: &[f32] = &[];
        for variant in Variant::supported() {
            assert_eq!(variant.try_compute(empty), Ok(StddevAndMean::default()));
        }
    }

    #[test]
    fn test_stddev_and_mean_into() {
        let mut stddev = f32::NAN;
        let mut mean = f32::NAN;
        stddev_and_mean_into(&mut stddev, &mut mean, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(mean, 2.5);
        assert!((stddev - 1.25f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_compute_into_matches_compute() {
        let data: Vec<f32> = (0..100).map(|i| (i % 7) as f32).collect();
        let buffer = AlignedBuffer::from_slice(&data);

        for variant in Variant::supported() {
            let mut stddev = 0.0;
            let mut mean = 0.0;
            unsafe { variant.compute_into(&mut stddev, &mut mean, &buffer) };
            let expected = unsafe { variant.compute(&buffer) };
            assert_eq!((stddev, mean), (expected.stddev, expected.mean), "{variant}");
        }
    }
}
