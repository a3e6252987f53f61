// Deterministic, portable random source for maze generation.
//
// Two pieces live here:
// - `RandomSource`: the narrow trait every generator entry point takes. It
//   exposes exactly the draws the pipeline needs (a uniform real in [0, 1)
//   and a uniform integer in a half-open range), so tests can swap in a
//   scripted source that forces particular choices.
// - `GameRng`: the production implementor, xoshiro256++ (Blackman & Vigna,
//   2019) with SplitMix64 seeding. Hand-rolled with zero external
//   dependencies so the output stream is identical on every platform.
//
// `shuffle()` is the one derived operation: an in-place Fisher–Yates pass that
// walks from the back of the slice, drawing `range_usize(0, i + 1)` per step.
// The maze carver relies on that exact draw order for same-seed reproducibility.
//
// **Critical constraint: determinism.** Every method on `GameRng` must produce
// identical output given the same prior state, regardless of platform, compiler
// version, or optimization level. Do not use floating-point arithmetic in the
// core generator, stdlib PRNG, or any source of non-determinism in this module.

use serde::{Deserialize, Serialize};

/// The draws a maze generation pass consumes.
///
/// Object-safe so callers can hand a `&mut dyn RandomSource` through the
/// pipeline when the concrete generator isn't known at compile time.
pub trait RandomSource {
    /// A uniform real in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// A uniform integer in `[low, high)`. Panics if `low >= high`.
    fn range_usize(&mut self, low: usize, high: usize) -> usize;

    /// Return `true` with probability `p`.
    ///
    /// `p <= 0.0` always returns false, `p >= 1.0` always returns true.
    fn random_bool(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// Shuffle `items` in place with a uniform permutation.
///
/// Consumes `items.len() - 1` draws (none for slices shorter than two).
pub fn shuffle<T, R: RandomSource + ?Sized>(rng: &mut R, items: &mut [T]) {
    let mut n = items.len();
    while n > 1 {
        n -= 1;
        let k = rng.range_usize(0, n + 1);
        items.swap(k, n);
    }
}

/// Xoshiro256++ PRNG, the default `RandomSource`.
///
/// The maze generator owns no RNG of its own; the host creates one of these
/// from a seed and lends it to every regeneration, so a single ordered stream
/// covers grammar expansion, carving, and start selection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRng {
    s: [u64; 4],
}

impl GameRng {
    /// Create a new PRNG seeded from a `u64`.
    ///
    /// Uses SplitMix64 to expand the seed into the 256-bit internal state.
    /// Two `GameRng` instances created with the same seed will produce
    /// identical output sequences.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Generate a uniform random integer in `[low, high)`.
    ///
    /// Uses rejection sampling to avoid modulo bias.
    /// Panics if `low >= high`.
    pub fn range_u64(&mut self, low: u64, high: u64) -> u64 {
        assert!(low < high, "range_u64: low must be less than high");
        let range = high - low;
        if range.is_power_of_two() {
            return low + (self.next_u64() & (range - 1));
        }
        let threshold = range.wrapping_neg() % range; // = (2^64 - range) % range
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return low + (r % range);
            }
        }
    }
}

impl RandomSource for GameRng {
    /// Upper 53 bits of a `u64` fill the f64 mantissa.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range_usize(&mut self, low: usize, high: usize) -> usize {
        self.range_u64(low as u64, high as u64) as usize
    }
}

/// SplitMix64, used only for seeding xoshiro256++ from a single `u64`.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
