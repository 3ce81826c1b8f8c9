//! Error types for checked kernel selection.
//!
//! The kernels themselves never fail. These errors are only produced by
//! [`Variant::try_compute`](crate::Variant::try_compute), which verifies the two
//! preconditions the unchecked kernels leave to the caller.

use std::fmt;

/// Errors that can occur when a specific kernel variant is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// The CPU lacks the instruction set the variant is built on.
    UnsupportedVariant {
        /// Name of the requested variant.
        variant: &'static str,
    },
    /// The input does not start on the boundary an aligned variant requires.
    MisalignedInput {
        /// Name of the requested variant.
        variant: &'static str,
        /// Start address of the input buffer.
        address: usize,
        /// Alignment the variant requires, in bytes.
        required_alignment: usize,
    },
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::UnsupportedVariant { variant } => {
                write!(f, "Unsupported variant: {variant} is not available on this CPU")
            }
            StatsError::MisalignedInput {
                variant,
                address,
                required_alignment,
            } => write!(
                f,
                "Misaligned input: {variant} requires {required_alignment} byte alignment (address: {address:#x})"
            ),
        }
    }
}

impl std::error::Error for StatsError {}

/// Result type alias for checked kernel calls.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Creates an unsupported variant error.
pub fn unsupported_variant(variant: &'static str) -> StatsError {
    StatsError::UnsupportedVariant { variant }
}

/// Creates a misaligned input error.
pub fn misaligned_input(variant: &'static str, address: usize, required_alignment: usize) -> StatsError {
    StatsError::MisalignedInput {
        variant,
        address,
        required_alignment,
    }
}
