//! Incremental SpookyHash V2: the same digest as [`crate::hash128`] for the
//! concatenation of every chunk passed to [`SpookyHasher::update`].

use core::hash::{BuildHasher, Hasher};

use crate::mixing::{end, mix_block, read_block, BLOCK_SIZE, BUF_SIZE, NUM_VARS, SC_CONST};
use crate::oneshot::hash_short_from_seeds;

/// Streaming SpookyHash V2 state.
///
/// Holds twelve 64-bit accumulators, a 192-byte staging buffer, and the
/// counters needed to route `finalize` to the same path the one-shot
/// routine would take for the bytes absorbed so far.
#[derive(Clone)]
pub struct SpookyHasher {
    state: [u64; NUM_VARS],
    buf: [u8; BUF_SIZE],
    length: u64,
    remainder: usize,
}

impl SpookyHasher {
    /// Start a new stream with the given seed pair.
    pub fn new(seed1: u64, seed2: u64) -> Self {
        let mut state = [0u64; NUM_VARS];
        state[0] = seed1;
        state[1] = seed2;
        SpookyHasher {
            state,
            buf: [0u8; BUF_SIZE],
            length: 0,
            remainder: 0,
        }
    }

    /// Append `bytes` to the stream.
    pub fn update(&mut self, bytes: &[u8]) {
        let new_remainder = bytes.len() + self.remainder;

        // Short enough that we still don't know whether this stream will
        // ever cross into the long path; just buffer it.
        if new_remainder < BUF_SIZE {
            self.buf[self.remainder..new_remainder].copy_from_slice(bytes);
            self.remainder = new_remainder;
            self.length += bytes.len() as u64;
            return;
        }

        let mut h = if self.length < BUF_SIZE as u64 {
            let (s0, s1) = (self.state[0], self.state[1]);
            [
                s0, s1, SC_CONST, s0, s1, SC_CONST, s0, s1, SC_CONST, s0, s1, SC_CONST,
            ]
        } else {
            self.state
        };

        self.length += bytes.len() as u64;
        let mut cursor = 0;

        if self.remainder > 0 {
            let prefix = BUF_SIZE - self.remainder;
            self.buf[self.remainder..BUF_SIZE].copy_from_slice(&bytes[..prefix]);
            mix_block(&mut h, &read_block(&self.buf[0..BLOCK_SIZE]));
            mix_block(&mut h, &read_block(&self.buf[BLOCK_SIZE..BUF_SIZE]));
            cursor = prefix;
        }

        let rest = &bytes[cursor..];
        let num_blocks = rest.len() / BLOCK_SIZE;
        for i in 0..num_blocks {
            mix_block(&mut h, &read_block(&rest[i * BLOCK_SIZE..]));
        }

        let processed = num_blocks * BLOCK_SIZE;
        let tail = &rest[processed..];
        self.remainder = tail.len();
        self.buf[..tail.len()].copy_from_slice(tail);

        self.state = h;
    }

    /// Return the 128-bit digest of everything absorbed since construction
    /// (or since the last call to a method that resets the stream — there
    /// is none; `SpookyHasher` only grows). Safe to call repeatedly; a
    /// subsequent `update` continues the same stream.
    pub fn finalize128(&self) -> (u64, u64) {
        if self.length < BUF_SIZE as u64 {
            return hash_short_from_seeds(
                &self.buf[..self.length as usize],
                self.state[0],
                self.state[1],
            );
        }

        let mut h = self.state;
        let mut remainder = self.remainder;
        let mut block = [0u8; BLOCK_SIZE];

        if remainder >= BLOCK_SIZE {
            mix_block(&mut h, &read_block(&self.buf[0..BLOCK_SIZE]));
            remainder -= BLOCK_SIZE;
            block[..remainder].copy_from_slice(&self.buf[BLOCK_SIZE..BLOCK_SIZE + remainder]);
        } else {
            block[..remainder].copy_from_slice(&self.buf[..remainder]);
        }
        block[BLOCK_SIZE - 1] = remainder as u8;

        let d = read_block(&block);
        end(&mut h, &d);
        (h[0], h[1])
    }

    /// Total number of bytes absorbed since construction.
    pub fn len(&self) -> u64 {
        self.length
    }

    /// Whether any bytes have been absorbed yet.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Snapshot the fifteen fields needed to resume this stream elsewhere
    /// (spec §6's persisted-state layout).
    pub fn to_state(&self) -> HasherState {
        HasherState {
            buf: self.buf,
            s: self.state,
            length: self.length,
            remainder: self.remainder as u32,
        }
    }

    /// Rebuild a hasher from a previously snapshotted state.
    pub fn from_state(state: HasherState) -> Self {
        SpookyHasher {
            state: state.s,
            buf: state.buf,
            length: state.length,
            remainder: state.remainder as usize,
        }
    }
}

impl Default for SpookyHasher {
    /// Seeded with the crate's default seed in both halves (spec §3).
    fn default() -> Self {
        SpookyHasher::new(SC_CONST, SC_CONST)
    }
}

impl Hasher for SpookyHasher {
    /// The low 64 bits of the digest. Use [`SpookyHasher::finalize128`] for
    /// the full 128-bit pair.
    fn finish(&self) -> u64 {
        self.finalize128().0
    }

    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }
}

/// Plain-value snapshot of a [`SpookyHasher`]'s state, suitable for
/// serialization by a host application (spec §6, §9).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HasherState {
    /// The 192-byte staging buffer.
    pub buf: [u8; BUF_SIZE],
    /// The twelve accumulator lanes.
    pub s: [u64; NUM_VARS],
    /// Total bytes absorbed since construction.
    pub length: u64,
    /// Bytes currently held in `buf`.
    pub remainder: u32,
}

/// A [`BuildHasher`] for [`SpookyHasher`], carrying a fixed seed pair so the
/// type can be used with `HashMap::with_hasher`/`HashSet::with_hasher`.
#[derive(Clone, Copy, Debug)]
pub struct SpookyBuildHasher {
    seed1: u64,
    seed2: u64,
}

impl SpookyBuildHasher {
    /// Build hasher instances seeded with `(seed1, seed2)`.
    pub fn new(seed1: u64, seed2: u64) -> Self {
        SpookyBuildHasher { seed1, seed2 }
    }
}

impl Default for SpookyBuildHasher {
    fn default() -> Self {
        SpookyBuildHasher::new(SC_CONST, SC_CONST)
    }
}

impl BuildHasher for SpookyBuildHasher {
    type Hasher = SpookyHasher;

    fn build_hasher(&self) -> SpookyHasher {
        SpookyHasher::new(self.seed1, self.seed2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oneshot::hash128;

    fn chunks<'a>(data: &'a [u8], sizes: &[usize]) -> Vec<&'a [u8]> {
        let mut out = Vec::new();
        let mut i = 0;
        let mut si = 0;
        while i < data.len() {
            let sz = sizes[si % sizes.len()].min(data.len() - i);
            out.push(&data[i..i + sz]);
            i += sz;
            si += 1;
        }
        out
    }

    const SC: u64 = SC_CONST;

    #[test]
    fn streamed_matches_one_shot_at_boundary_lengths() {
        for len in [0usize, 15, 16, 31, 32, 95, 96, 191, 192, 193, 287, 288] {
            let data: Vec<u8> = (0..len).map(|i| (i * 7 + 3) as u8).collect();
            let expected = hash128(&data, SC, SC);
            for sizes in [[1usize].as_slice(), &[2], &[3], &[7], &[97], &[193]] {
                let mut hasher = SpookyHasher::new(SC, SC);
                for chunk in chunks(&data, sizes) {
                    hasher.update(chunk);
                }
                assert_eq!(
                    hasher.finalize128(),
                    expected,
                    "len={len} chunk sizes={sizes:?}"
                );
            }
        }
    }

    #[test]
    fn streamed_1_2_3_dots_matches_one_shot() {
        let data = [0x55u8; 1000];
        let expected = hash128(&data, SC, SC);
        let mut hasher = SpookyHasher::new(SC, SC);
        let mut offset = 0;
        let mut step = 1;
        while offset < data.len() {
            let take = step.min(data.len() - offset);
            hasher.update(&data[offset..offset + take]);
            offset += take;
            step += 1;
        }
        assert_eq!(hasher.finalize128(), expected);
    }

    #[test]
    fn finalize_is_idempotent() {
        let mut hasher = SpookyHasher::new(SC, SC);
        hasher.update(b"hello world");
        assert_eq!(hasher.finalize128(), hasher.finalize128());
    }

    #[test]
    fn finalize_does_not_mutate_state() {
        let x = b"hello ";
        let y = b"world, this message is long enough to cross into the long path after concatenation with more bytes appended here to be safe";
        let mut combined = Vec::new();
        combined.extend_from_slice(x);
        combined.extend_from_slice(y);

        let mut hasher = SpookyHasher::new(SC, SC);
        hasher.update(x);
        let _ = hasher.finalize128();
        hasher.update(y);
        let h2 = hasher.finalize128();

        assert_eq!(h2, hash128(&combined, SC, SC));
    }

    #[test]
    fn std_hash_trait_matches_finalize128_low_half() {
        let mut hasher = SpookyHasher::default();
        hasher.write(b"abc");
        assert_eq!(Hasher::finish(&hasher), hasher.finalize128().0);
    }

    #[test]
    fn build_hasher_round_trips_through_state_snapshot() {
        let mut hasher = SpookyHasher::new(1, 2);
        hasher.update(&[0u8; 250]);
        let snapshot = hasher.to_state();
        let restored = SpookyHasher::from_state(snapshot);
        assert_eq!(hasher.finalize128(), restored.finalize128());
    }

    #[test]
    fn default_seed_is_sc_const() {
        let default_digest = SpookyHasher::default().finalize128();
        let explicit_digest = SpookyHasher::new(SC, SC).finalize128();
        assert_eq!(default_digest, explicit_digest);
    }
}
