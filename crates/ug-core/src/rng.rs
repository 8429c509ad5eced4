//! Random number generation for mine generation
//!
//! Uses a seeded ChaCha RNG so a mine can be regenerated from its seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Sampling primitives consumed by mine generation.
///
/// `GameRng` is the production implementation. Tests swap in scripted
/// providers to force exact placements.
pub trait RandomProvider {
    /// Uniform integer in `0..n`. Returns 0 if n is 0.
    fn floor(&mut self, n: u32) -> u32;

    /// Uniform float in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform integer in `low..=high`. Returns `low` if `high <= low`.
    fn int_between(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        low + self.floor((high - low).saturating_add(1))
    }

    /// Pick one item with probability proportional to its weight.
    ///
    /// Weights that are negative or not finite count as zero. When every
    /// weight is zero the pick is uniform over `items`. Returns `None` only
    /// for an empty slice.
    fn from_weighted<'a, T>(&mut self, items: &'a [T], weights: &[f64]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }

        let weight_at = |i: usize| {
            weights
                .get(i)
                .copied()
                .filter(|w| w.is_finite() && *w > 0.0)
                .unwrap_or(0.0)
        };
        let total: f64 = (0..items.len()).map(weight_at).sum();
        if total <= 0.0 {
            return items.get(self.floor(items.len() as u32) as usize);
        }

        let mut roll = self.unit() * total;
        for (i, item) in items.iter().enumerate() {
            let weight = weight_at(i);
            if weight <= 0.0 {
                continue;
            }
            if roll < weight {
                return Some(item);
            }
            roll -= weight;
        }

        // Float rounding can leave a sliver past the last bucket
        (0..items.len()).rev().find(|&i| weight_at(i) > 0.0).map(|i| &items[i])
    }
}

/// Game random number generator
///
/// Wraps ChaCha8Rng for reproducible random number generation.
/// Note: RNG state is not serialized - a restored RNG restarts from its seed.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

// Only the seed is persisted
impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(GameRng::new(seed))
    }
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomProvider for GameRng {
    fn floor(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    fn unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
