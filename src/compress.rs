//! The block compressor: a narrow dispatch layer mapping an ordered list of
//! fixed-size blocks to one fixed-size block, over a selectable primitive.
//!
//! No cryptography is implemented here; the arms delegate to the
//! [`keccak`]-backed sponge and to [`digest::Digest`] implementors from the
//! [`sha2`] and [`blake2`] crates.

use blake2::Blake2b512;
use digest::Digest;
use sha2::Sha512;

use crate::options::CompressionMethod;
use crate::sponge::{KeccakSponge, RATE};

impl CompressionMethod {
    /// Block size in bytes. Constant per method, and therefore constant for
    /// the lifetime of any hash state using the method.
    pub fn block_size(self) -> usize {
        match self {
            // One duplex rate, so a single squeeze fills a whole block.
            Self::Keccak1600 => RATE,
            Self::ArgonBlake2b => 64,
            Self::Sha512 => 64,
        }
    }
}

/// Compress `blocks` (at least two, each exactly one block in size) into
/// `out`, as a deterministic function of the ordered input contents.
///
/// `_xor_then_hash` selects how the inputs are combined before the primitive
/// is applied. The only combination implemented today hashes the ordered
/// concatenation; the XOR-then-hash variant is the reserved alternative.
pub(crate) fn compress(
    out: &mut [u8],
    blocks: &[&[u8]],
    method: CompressionMethod,
    _xor_then_hash: bool,
) {
    let block_size = method.block_size();
    debug_assert!(blocks.len() >= 2);
    debug_assert!(blocks.iter().all(|block| block.len() == block_size));
    debug_assert_eq!(out.len(), block_size);

    compress_parts(out, blocks, method);
}

/// Populate blocks `1..n_blocks` of `buffer` from block 0.
///
/// Forward chain: each block hashes its predecessor together with its own
/// position, so block `i` is a fixed function of the seed block and `i`, and
/// the chain covers the whole buffer.
pub(crate) fn expand(buffer: &mut [u8], n_blocks: usize, method: CompressionMethod) {
    let block_size = method.block_size();
    debug_assert_eq!(buffer.len(), n_blocks * block_size);

    for i in 1..n_blocks {
        let (filled, rest) = buffer.split_at_mut(i * block_size);
        let prev = &filled[(i - 1) * block_size..];
        let index = (i as u64).to_le_bytes();
        compress_parts(&mut rest[..block_size], &[prev, &index], method);
    }
}

fn compress_parts(out: &mut [u8], parts: &[&[u8]], method: CompressionMethod) {
    match method {
        CompressionMethod::Keccak1600 => {
            let mut sponge = KeccakSponge::default();
            for part in parts {
                sponge.absorb(part);
            }
            sponge.squeeze(out);
        }
        CompressionMethod::ArgonBlake2b => digest_parts::<Blake2b512>(out, parts),
        CompressionMethod::Sha512 => digest_parts::<Sha512>(out, parts),
    }
}

fn digest_parts<D: Digest>(out: &mut [u8], parts: &[&[u8]]) {
    debug_assert_eq!(out.len(), <D as Digest>::output_size());
    let mut hasher = D::new();
    for part in parts {
        hasher.update(part);
    }
    out.copy_from_slice(&hasher.finalize());
}
