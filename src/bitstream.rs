//! The deterministic random stream driving the mixing phase.
//!
//! A [`Bitstream`] is a salt-seeded generator producing an arbitrary-length
//! pseudorandom byte stream and unbiased bounded integers. Seeding and
//! streaming are split across two types: [`BitstreamSeed`] only absorbs seed
//! material, and the only way to start squeezing output is to consume it with
//! [`BitstreamSeed::finalize`]. Adding seed material after finalization is
//! therefore not expressible, and neither is releasing the same stream twice.
//!
//! ```
//! use baghash::BitstreamSeed;
//!
//! let mut seed = BitstreamSeed::new();
//! seed.add(b"salt1234").add(b"password");
//! let mut stream = seed.finalize();
//!
//! let mut bytes = [0u8; 16];
//! stream.fill(&mut bytes);
//! let die = stream.sample_uniform(6).unwrap();
//! assert!(die < 6);
//! ```

use rand::{CryptoRng, RngCore};

use crate::errors::{BagHashError, BagHashResult};
use crate::sponge::KeccakSponge;

/// A random stream still in its seeding phase.
///
/// Each added byte string is absorbed with a length frame, so the finalized
/// stream depends on the content, the order, and the boundaries of the seed
/// material: `add(a); add(b)` never collides with `add(ab)`.
pub struct BitstreamSeed {
    sponge: KeccakSponge,
}

impl BitstreamSeed {
    pub fn new() -> Self {
        Self {
            sponge: KeccakSponge::default(),
        }
    }

    /// Absorb one byte string of seed material.
    pub fn add(&mut self, material: &[u8]) -> &mut Self {
        self.sponge.absorb(&(material.len() as u64).to_le_bytes());
        self.sponge.absorb(material);
        self
    }

    /// Mix all added material into the internal state and switch to the
    /// streaming phase. The seed handle is consumed; the seeding phase cannot
    /// be re-entered.
    pub fn finalize(mut self) -> Bitstream {
        self.sponge.ratchet();
        Bitstream {
            sponge: self.sponge,
        }
    }
}

impl Default for BitstreamSeed {
    fn default() -> Self {
        Self::new()
    }
}

/// A finalized random stream.
///
/// Every call advances the sponge state; the stream is not restartable from
/// an earlier point. Output is streaming-consistent: filling 16 bytes equals
/// filling 8 bytes twice.
pub struct Bitstream {
    sponge: KeccakSponge,
}

impl Bitstream {
    /// Fill `output` with the next pseudorandom bytes of the stream.
    pub fn fill(&mut self, output: &mut [u8]) {
        self.sponge.squeeze(output);
    }

    /// Return an integer uniformly distributed over `[0, bound)`.
    ///
    /// Draws whose residue class is over-represented in the `u64` range are
    /// rejected and redrawn, so the result carries no modulo bias.
    pub fn sample_uniform(&mut self, bound: u64) -> BagHashResult<u64> {
        if bound == 0 {
            return Err(BagHashError::ZeroSamplingBound);
        }
        // 2^64 mod bound. The draws in [cutoff, 2^64) form a contiguous run
        // of exactly floor(2^64 / bound) * bound values, so every residue
        // appears the same number of times.
        let cutoff = bound.wrapping_neg() % bound;
        loop {
            let draw = self.next_u64();
            if draw >= cutoff {
                return Ok(draw % bound);
            }
        }
    }
}

impl RngCore for Bitstream {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill(buf.as_mut());
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill(buf.as_mut());
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.fill(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill(dest);
        Ok(())
    }
}

impl CryptoRng for Bitstream {}
