/// The [`baghash`](crate) package reports all failures through [`BagHashError`].
/// Three families of errors can happen when computing a hash:
///
/// - Validation errors ([`BagHashError::InvalidOptions`], [`BagHashError::ZeroSamplingBound`]):
///   malformed or out-of-range inputs, detected before any buffer work begins.
///   Fully recoverable; the caller retries with corrected input.
///
/// - Resource errors ([`BagHashError::BufferTooLarge`], [`BagHashError::OutOfMemory`]):
///   the block buffer cannot be obtained, either because the size computation
///   overflows or because the allocator refuses it. Fatal to the current
///   invocation; state acquired so far is released before the error surfaces.
///
/// - Sequencing errors ([`BagHashError::ExtractBeforeMix`]): a digest was
///   requested from a [`HashState`](crate::HashState) that has not completed a
///   mixing pass. Always avoidable by correct call ordering.
///
/// A [`core::result::Result`] wrapper called [`BagHashResult`] (having error
/// fixed to [`BagHashError`]) is also provided.
use std::{error::Error, fmt::Display};

/// Failure modes of the hashing construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BagHashError {
    /// A cost parameter is malformed; the message names the offending field.
    InvalidOptions(&'static str),
    /// A uniform sample over the empty range `[0, 0)` was requested.
    ZeroSamplingBound,
    /// `n_blocks * block_size` does not fit in the address space.
    BufferTooLarge,
    /// The allocator could not provide the block buffer.
    OutOfMemory,
    /// Extraction was attempted before any mixing pass completed.
    ExtractBeforeMix,
}

/// The result type of every fallible operation in this crate.
pub type BagHashResult<T> = Result<T, BagHashError>;

impl Display for BagHashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOptions(what) => write!(f, "invalid options: {}", what),
            Self::ZeroSamplingBound => write!(f, "cannot sample from an empty range"),
            Self::BufferTooLarge => write!(f, "block buffer size overflows the address space"),
            Self::OutOfMemory => write!(f, "block buffer allocation failed"),
            Self::ExtractBeforeMix => write!(f, "cannot extract a digest before mixing"),
        }
    }
}

impl Error for BagHashError {}
