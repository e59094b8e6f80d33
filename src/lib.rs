//! Memory-hard password hashing with expander-graph mixing.
//!
//! This crate implements the single-buffer "bag" construction of the Balloon
//! hashing family: a password hash whose evaluation provably requires a large
//! amount of working memory for a long time, resisting hardware-accelerated
//! guessing.
//!
//! # Overview
//!
//! One invocation allocates a contiguous buffer of fixed-size blocks, seeds
//! block 0 from the password and salt, expands it deterministically over the
//! whole buffer, and then performs `time_cost` in-place mixing passes. On
//! every pass each block is overwritten with the compression of its
//! predecessor, itself, and `n_neighbors` pseudorandomly chosen blocks; the
//! neighbor choices come from a random stream seeded by the salt. Reading
//! blocks already rewritten earlier in the same pass is intentional: the
//! pass forms one sequential chain of data-dependent overwrites, which is
//! the memory-hardness argument. The digest is finally derived from the last
//! block.
//!
//! ```
//! use baghash::{baghash, BagHashOptions, CompressionMethod, MixMethod};
//!
//! let options = BagHashOptions {
//!     space_cost: 1024,
//!     time_cost: 3,
//!     xor_then_hash: false,
//!     n_neighbors: 3,
//!     compression: CompressionMethod::Keccak1600,
//!     mix: MixMethod::SingleBuffer,
//! };
//!
//! let mut digest = [0u8; 32];
//! baghash(&mut digest, b"password", b"salt1234", &options).unwrap();
//!
//! // Same inputs, same digest.
//! let mut again = [0u8; 32];
//! baghash(&mut again, b"password", b"salt1234", &options).unwrap();
//! assert_eq!(digest, again);
//! ```
//!
//! The crate exposes the construction's working parts — [`HashState`],
//! [`Bitstream`] — for callers composing their own lifecycle, but
//! [`baghash`] is the intended entry point.
//!
//! This is not a constant-time implementation: the mixing pattern is
//! data-dependent by design. It is also not a general KDF framework and
//! defines no credential envelope around the raw digest.
//!
//! # Acknowledgements
//!
//! The construction follows "Balloon Hashing: A Memory-Hard Function
//! Providing Provable Protection Against Sequential Attacks" by Dan Boneh,
//! Henry Corrigan-Gibbs, and Stuart Schechter.

#[cfg(target_endian = "big")]
compile_error!(
    r#"
This crate doesn't support big-endian targets.
"#
);

/// The deterministic salt-seeded random stream.
mod bitstream;
/// Block compressor dispatch.
mod compress;
/// Top-level construction.
mod construction;
/// Built-in error types.
mod errors;
/// Cost parameters and primitive selection.
mod options;
/// Duplex sponge over keccak-f[1600].
mod sponge;
/// Buffer ownership and the fill/mix/extract lifecycle.
mod hash_state;
/// Unit-tests.
#[cfg(test)]
mod tests;

pub use bitstream::{Bitstream, BitstreamSeed};
pub use construction::baghash;
pub use errors::{BagHashError, BagHashResult};
pub use hash_state::HashState;
pub use options::{BagHashOptions, CompressionMethod, MixMethod};
