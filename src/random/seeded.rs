//! Deterministic pseudo-random values derived from an integer seed.
//!
//! Every procedural subsystem draws from here, so a given seed always yields the same
//! positions, colors, and delays. Values are addressed by index instead of being pulled
//! from a mutable generator: `at(i)` never depends on how many values were read before.

/// Default spacing between consecutive seeds in a stream.
pub const DECORRELATION_STRIDE: i64 = 97;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Function mapping a seed to a value in `[0, 1)`.
pub enum SeedAlgorithm {
    /// `frac(sin(seed) * 10000)`. Matches previously rendered output but relies on the
    /// platform `sin`.
    #[default]
    Sine,
    /// SplitMix64 over the seed bits. Opt-in: bit-identical on every platform, but it
    /// produces different values than [`SeedAlgorithm::Sine`].
    SplitMix64,
}

/// `frac(sin(seed) * 10000)`, always in `[0, 1)`.
pub fn seeded_random(seed: i64) -> f64 {
    let x = (seed as f64).sin() * 10000.0;
    fold_unit(x - x.floor())
}

/// `count` values drawn at `seed + i * DECORRELATION_STRIDE`.
pub fn stream(seed: i64, count: usize) -> Vec<f64> {
    SeededSequence::new(seed).take(count)
}

/// Indexed sequence of seeded values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SeededSequence {
    seed: i64,
    stride: i64,
    algorithm: SeedAlgorithm,
}

impl SeededSequence {
    /// Sequence over `seed` with the default stride and [`SeedAlgorithm::Sine`].
    pub fn new(seed: i64) -> Self {
        Self {
            seed,
            stride: DECORRELATION_STRIDE,
            algorithm: SeedAlgorithm::Sine,
        }
    }

    /// Replace the spacing between consecutive seeds.
    pub fn with_stride(mut self, stride: i64) -> Self {
        self.stride = stride;
        self
    }

    /// Replace the seed-to-value function.
    pub fn with_algorithm(mut self, algorithm: SeedAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Base seed.
    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// The seed value backing index `i`.
    pub fn seed_at(&self, i: u64) -> i64 {
        self.seed.wrapping_add((i as i64).wrapping_mul(self.stride))
    }

    /// Value at index `i`, in `[0, 1)`.
    pub fn at(&self, i: u64) -> f64 {
        let s = self.seed_at(i);
        match self.algorithm {
            SeedAlgorithm::Sine => seeded_random(s),
            SeedAlgorithm::SplitMix64 => splitmix_unit(s as u64),
        }
    }

    /// Value at `i` mapped linearly onto `[lo, hi)`.
    pub fn range(&self, i: u64, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.at(i)
    }

    /// Sub-sequence for one record (particle, shape): its fields are read with
    /// `at(0)`, `at(1)`, ... starting from `seed_at(i)`.
    pub fn fork(&self, i: u64) -> Self {
        Self {
            seed: self.seed_at(i),
            stride: 1,
            algorithm: self.algorithm,
        }
    }

    /// The first `count` values.
    pub fn take(&self, count: usize) -> Vec<f64> {
        (0..count as u64).map(|i| self.at(i)).collect()
    }
}

fn splitmix_unit(seed: u64) -> f64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;
    // 53 bits of precision.
    ((z >> 11) as f64) * (1.0 / ((1u64 << 53) as f64))
}

// `x - floor(x)` rounds to 1.0 for tiny negative x.
fn fold_unit(v: f64) -> f64 {
    if v >= 1.0 { 0.0 } else { v }
}

#[cfg(test)]
#[path = "../../tests/unit/random/seeded.rs"]
mod tests;
