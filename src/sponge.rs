//! A byte-oriented duplex sponge over the permutation [`keccak::f1600`],
//! built in overwrite mode (cf. [Wikipedia](https://en.wikipedia.org/wiki/Sponge_function#Duplex_construction)).
//!
//! **Warning**: this is not SHA-3. The same permutation is used underneath,
//! but the duplex construction, padding and initialization differ. The sponge
//! backs both the seeded random stream and the permutation-based block
//! compressor; neither needs NIST compatibility, only a deterministic
//! absorb/squeeze primitive with a one-way ratchet.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bytes absorbed or squeezed between permutations.
pub(crate) const RATE: usize = 136;
/// Total state width in bytes: rate plus capacity.
const WIDTH: usize = RATE + 64;

/// A 200-byte permutation state that is always 8-byte aligned, so that a
/// pointer to it is safely convertible to a pointer to the `[u64; 25]` lane
/// array `keccak::f1600` operates on.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
#[repr(align(8))]
struct AlignedState([u8; WIDTH]);

fn lanes(state: &mut AlignedState) -> &mut [u64; 25] {
    unsafe { &mut *(state as *mut AlignedState as *mut [u64; 25]) }
}

/// A duplex sponge in overwrite mode.
///
/// Absorbed data is written over the first [`RATE`] bytes of the state; the
/// capacity bytes are never touched directly. [`KeccakSponge::ratchet`]
/// permutes and erases the rate portion, after which the state holds no
/// recoverable information about the material absorbed so far.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct KeccakSponge {
    state: AlignedState,
    absorb_pos: usize,
    squeeze_pos: usize,
}

impl Default for KeccakSponge {
    fn default() -> Self {
        Self {
            state: AlignedState([0u8; WIDTH]),
            absorb_pos: 0,
            squeeze_pos: RATE,
        }
    }
}

impl KeccakSponge {
    pub(crate) fn absorb(&mut self, mut input: &[u8]) {
        while !input.is_empty() {
            if self.absorb_pos == RATE {
                self.permute();
                self.absorb_pos = 0;
            }
            let chunk_len = usize::min(input.len(), RATE - self.absorb_pos);
            let (chunk, rest) = input.split_at(chunk_len);
            self.state.0[self.absorb_pos..self.absorb_pos + chunk_len].copy_from_slice(chunk);
            self.absorb_pos += chunk_len;
            input = rest;
        }
        self.squeeze_pos = RATE;
    }

    pub(crate) fn squeeze(&mut self, mut output: &mut [u8]) {
        while !output.is_empty() {
            if self.squeeze_pos == RATE {
                self.permute();
                self.squeeze_pos = 0;
                self.absorb_pos = 0;
            }
            let chunk_len = usize::min(output.len(), RATE - self.squeeze_pos);
            let (chunk, rest) = output.split_at_mut(chunk_len);
            chunk.copy_from_slice(&self.state.0[self.squeeze_pos..self.squeeze_pos + chunk_len]);
            self.squeeze_pos += chunk_len;
            output = rest;
        }
    }

    /// Permute and erase the rate portion of the state.
    ///
    /// Data absorbed before the ratchet can no longer be recovered from the
    /// state, and the next squeeze starts from a fresh permutation.
    pub(crate) fn ratchet(&mut self) {
        self.permute();
        self.state.0[..RATE].iter_mut().for_each(|b| b.zeroize());
        self.absorb_pos = 0;
        self.squeeze_pos = RATE;
    }

    fn permute(&mut self) {
        keccak::f1600(lanes(&mut self.state));
    }
}
