//! The hash state: one contiguous owned block buffer and the
//! fill → expand → mix → extract lifecycle over it.

use zeroize::{Zeroize, Zeroizing};

use crate::bitstream::{Bitstream, BitstreamSeed};
use crate::compress::{compress, expand};
use crate::errors::{BagHashError, BagHashResult};
use crate::options::BagHashOptions;

/// Working state of one hashing invocation.
///
/// The state owns a buffer of `n_blocks * block_size` bytes and a random
/// stream seeded from the salt alone. Both live exactly as long as the state:
/// the buffer is zeroized and freed when the state is dropped, and a second
/// release is not expressible. States are never shared between invocations;
/// independent invocations may run in parallel, each on its own state.
///
/// The lifecycle is `new` → [`fill`](Self::fill) → [`mix`](Self::mix)
/// (once per unit of time cost) → [`extract`](Self::extract). Extraction
/// before the first completed pass fails with
/// [`BagHashError::ExtractBeforeMix`].
pub struct HashState {
    buffer: Vec<u8>,
    n_blocks: usize,
    block_size: usize,
    has_mixed: bool,
    bitstream: Bitstream,
    opts: BagHashOptions,
}

impl HashState {
    /// Allocate the block buffer and seed the mixing stream from `salt`.
    ///
    /// The block count is derived from `space_cost` and forced even. The
    /// buffer length is computed with checked arithmetic; an overflow is
    /// reported as [`BagHashError::BufferTooLarge`] and an allocator refusal
    /// as [`BagHashError::OutOfMemory`], in both cases before any block work.
    pub fn new(opts: &BagHashOptions, salt: &[u8]) -> BagHashResult<Self> {
        opts.validate()?;

        let n_blocks = opts
            .n_blocks()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or(BagHashError::BufferTooLarge)?;
        let block_size = opts.compression.block_size();
        let buffer_len = n_blocks
            .checked_mul(block_size)
            .ok_or(BagHashError::BufferTooLarge)?;

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(buffer_len)
            .map_err(|_| BagHashError::OutOfMemory)?;
        buffer.resize(buffer_len, 0);

        let mut seed = BitstreamSeed::new();
        seed.add(salt);

        Ok(Self {
            buffer,
            n_blocks,
            block_size,
            has_mixed: false,
            bitstream: seed.finalize(),
            opts: opts.clone(),
        })
    }

    /// Derive block 0 from the password and salt, then expand it over the
    /// rest of the buffer.
    ///
    /// Block 0 comes from a fresh one-shot stream, never from the state's
    /// own mixing stream: the mixing stream is seeded from the salt alone
    /// and consumed incrementally for the whole lifetime of the state, while
    /// this derivation is self-contained.
    pub fn fill(&mut self, password: &[u8], salt: &[u8]) {
        fill_bytes_from_parts(&mut self.buffer[..self.block_size], &[salt, password]);
        expand(&mut self.buffer, self.n_blocks, self.opts.compression);
    }

    /// One full mixing pass over the buffer, in place and in index order.
    ///
    /// Each block is overwritten with the compression of its predecessor
    /// (wrapping to the last block at index 0), itself, and `n_neighbors`
    /// blocks drawn from the mixing stream. Blocks rewritten earlier in the
    /// same pass are read back in their new form; the pass is a single
    /// sequential chain of data-dependent overwrites and must not be
    /// reordered or parallelized.
    pub fn mix(&mut self) -> BagHashResult<()> {
        let n_to_hash = self.opts.n_neighbors as usize + 2;
        let mut indices = Vec::with_capacity(n_to_hash);
        let mut new_block = Zeroizing::new(vec![0u8; self.block_size]);

        for i in 0..self.n_blocks {
            indices.clear();
            indices.push(if i == 0 { self.n_blocks - 1 } else { i - 1 });
            indices.push(i);
            for _ in 0..self.opts.n_neighbors {
                let neighbor = self.bitstream.sample_uniform(self.n_blocks as u64)?;
                indices.push(neighbor as usize);
            }

            let blocks: Vec<&[u8]> = indices.iter().map(|&j| self.block(j)).collect();
            compress(
                &mut new_block,
                &blocks,
                self.opts.compression,
                self.opts.xor_then_hash,
            );

            let start = i * self.block_size;
            self.buffer[start..start + self.block_size].copy_from_slice(&new_block);
        }

        self.has_mixed = true;
        Ok(())
    }

    /// Derive `out.len()` digest bytes from the final block.
    ///
    /// Uses the same one-shot derivation scheme as [`fill`](Self::fill),
    /// seeded by the final block contents alone, independent of the mixing
    /// stream. Fails unless at least one mixing pass has completed.
    pub fn extract(&self, out: &mut [u8]) -> BagHashResult<()> {
        if !self.has_mixed {
            return Err(BagHashError::ExtractBeforeMix);
        }
        fill_bytes_from_parts(out, &[self.block(self.n_blocks - 1)]);
        Ok(())
    }

    #[inline]
    fn block(&self, i: usize) -> &[u8] {
        debug_assert!(i < self.n_blocks);
        &self.buffer[i * self.block_size..(i + 1) * self.block_size]
    }
}

impl Drop for HashState {
    fn drop(&mut self) {
        self.buffer.zeroize();
    }
}

/// Fill `out` deterministically from the given seed parts, added in order to
/// a fresh one-shot stream.
fn fill_bytes_from_parts(out: &mut [u8], parts: &[&[u8]]) {
    let mut seed = BitstreamSeed::new();
    for part in parts {
        seed.add(part);
    }
    seed.finalize().fill(out);
}
