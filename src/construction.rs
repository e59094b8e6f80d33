//! The top-level construction: validate, drive a hash state through its
//! lifecycle, and copy out the digest.

use log::debug;

use crate::errors::BagHashResult;
use crate::hash_state::HashState;
use crate::options::BagHashOptions;

/// Compute the memory-hard hash of `password` and `salt` under the given
/// cost options, writing exactly `out.len()` digest bytes.
///
/// The computation is strictly sequential: one buffer, `time_cost` in-place
/// mixing passes, each a chain of data-dependent overwrites. It fails fast
/// on invalid options, with no partial work, and stops at the first error of
/// any later phase with no partial digest written; the working buffer is
/// zeroized and released on every path.
///
/// The digest is a raw byte sequence with no envelope. A caller that needs a
/// storable credential format must record the salt and cost parameters
/// alongside it.
///
/// ```
/// use baghash::{baghash, BagHashOptions};
///
/// let options = BagHashOptions::default();
/// let mut digest = [0u8; 32];
/// baghash(&mut digest, b"correct horse", b"battery staple", &options).unwrap();
/// assert_ne!(digest, [0u8; 32]);
/// ```
pub fn baghash(
    out: &mut [u8],
    password: &[u8],
    salt: &[u8],
    opts: &BagHashOptions,
) -> BagHashResult<()> {
    opts.validate()?;
    debug!(
        "baghash: space_cost={} time_cost={} n_neighbors={} compression={:?}",
        opts.space_cost, opts.time_cost, opts.n_neighbors, opts.compression
    );

    let mut state = HashState::new(opts, salt)?;
    state.fill(password, salt);
    for _ in 0..opts.time_cost {
        state.mix()?;
    }
    state.extract(out)
}
