#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod avx;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod sse;

#[cfg(target_arch = "aarch64")]
pub mod neon;

pub mod slice;

pub mod traits;

pub use traits::{Alignment, SimdLoad, SimdReduce, SimdStddevMean};
